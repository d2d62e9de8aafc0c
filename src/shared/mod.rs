//! Shared key newtypes and input validation.
//!
//! Keys travel as strkeys (`G...` for public keys, `S...` for seeds). These
//! types parse and checksum-verify the strkey once, then carry raw bytes.
//! [`PublicKey`] serializes transparently as its strkey string, so it can be
//! used directly in wire types.

pub mod serde_util;

use ed25519_dalek::SigningKey;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;
use zeroize::{Zeroize, Zeroizing};

use crate::error::ValidationError;

// ─── PublicKey ───────────────────────────────────────────────────────────────

/// An ed25519 public key in strkey form (`G...`).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey([u8; 32]);

/// A ledger account identifier. Accounts are addressed by their master
/// public key.
pub type AccountId = PublicKey;

impl PublicKey {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Last four bytes of the key: the signature hint in a decorated
    /// signature.
    pub fn hint(&self) -> [u8; 4] {
        [self.0[28], self.0[29], self.0[30], self.0[31]]
    }

    pub fn to_verifying_key(&self) -> Result<ed25519_dalek::VerifyingKey, ValidationError> {
        ed25519_dalek::VerifyingKey::from_bytes(&self.0)
            .map_err(|_| ValidationError::PublicKeyInvalid)
    }
}

impl FromStr for PublicKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ValidationError::PublicKeyRequired);
        }
        stellar_strkey::ed25519::PublicKey::from_string(s)
            .map(|pk| Self(pk.0))
            .map_err(|_| ValidationError::PublicKeyInvalid)
    }
}

impl std::fmt::Display for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", stellar_strkey::ed25519::PublicKey(self.0).to_string())
    }
}

impl std::fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PublicKey({self})")
    }
}

impl Serialize for PublicKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PublicKey::from_str(&s)
            .map_err(|_| serde::de::Error::custom(format!("Invalid public key: {s}")))
    }
}

// ─── SecretSeed ──────────────────────────────────────────────────────────────

/// An ed25519 seed in strkey form (`S...`).
///
/// Zeroized on drop. Not `Clone`, not `Display`, not `Serialize`; `Debug`
/// prints the derived public key only.
pub struct SecretSeed(Zeroizing<[u8; 32]>);

impl SecretSeed {
    /// Parse and checksum-verify a secret seed.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ValidationError::SecretKeyRequired);
        }
        let mut decoded = stellar_strkey::ed25519::PrivateKey::from_string(s)
            .map_err(|_| ValidationError::SecretKeyInvalid)?;
        Ok(Self(take_seed(&mut decoded.0)))
    }

    /// Public key of the keypair this seed derives.
    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.signing_key().verifying_key().to_bytes())
    }

    pub(crate) fn signing_key(&self) -> SigningKey {
        SigningKey::from_bytes(&self.0)
    }
}

/// Move seed bytes into a wiped-on-drop buffer, zeroing the source.
fn take_seed(bytes: &mut [u8; 32]) -> Zeroizing<[u8; 32]> {
    let seed = Zeroizing::new(*bytes);
    bytes.zeroize();
    seed
}

impl std::fmt::Debug for SecretSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecretSeed(<redacted> for {})", self.public_key())
    }
}

// ─── Validation ──────────────────────────────────────────────────────────────

/// Field-level check for a public key input. `None` when valid.
pub fn public_key_error(input: &str) -> Option<ValidationError> {
    PublicKey::from_str(input).err()
}

/// Field-level check for a secret key input. `None` when valid.
pub fn secret_key_error(input: &str) -> Option<ValidationError> {
    SecretSeed::parse(input).err()
}

/// Parse a target account id, reporting account-specific messages.
pub fn parse_account_id(input: &str) -> Result<AccountId, ValidationError> {
    PublicKey::from_str(input).map_err(|e| match e {
        ValidationError::PublicKeyRequired => ValidationError::AccountIdRequired,
        _ => ValidationError::AccountIdInvalid,
    })
}
