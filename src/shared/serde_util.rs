//! Custom serde helpers for Horizon wire formats.

/// A number Horizon sends as a decimal string (`"sequence": "4294967296"`).
/// Plain JSON numbers are accepted on input; output is always the string form.
pub mod string_number {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::fmt::Display;
    use std::str::FromStr;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber<T> {
        String(String),
        Number(T),
    }

    pub fn serialize<S, T>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Display,
    {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: FromStr + Deserialize<'de>,
        T::Err: Display,
    {
        match StringOrNumber::<T>::deserialize(deserializer)? {
            StringOrNumber::String(s) => s
                .parse::<T>()
                .map_err(|e| serde::de::Error::custom(format!("Invalid number {s:?}: {e}"))),
            StringOrNumber::Number(n) => Ok(n),
        }
    }
}
