//! Wire types for Horizon REST responses.

use serde::{Deserialize, Serialize};

use crate::shared::serde_util::string_number;
use crate::shared::{AccountId, PublicKey};
use crate::tx::BASE_FEE;

/// HAL collection page (`{"_embedded": {"records": [...]}}`).
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Page<T> {
    #[serde(rename = "_embedded")]
    pub embedded: Embedded<T>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Embedded<T> {
    pub records: Vec<T>,
}

impl<T> Page<T> {
    pub fn into_records(self) -> Vec<T> {
        self.embedded.records
    }
}

/// An account as returned by `/accounts` and `/accounts/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountRecord {
    pub id: AccountId,
    #[serde(with = "string_number")]
    pub sequence: i64,
    #[serde(default)]
    pub paging_token: String,
    #[serde(default)]
    pub signers: Vec<AccountSigner>,
}

impl AccountRecord {
    /// Weight of `key` among this account's signers, if present.
    pub fn signer_weight(&self, key: &PublicKey) -> Option<u32> {
        let key = key.to_string();
        self.signers.iter().find(|s| s.key == key).map(|s| s.weight)
    }
}

/// One signer entry. `key` stays a string: besides ed25519 keys, Horizon
/// lists pre-auth (`T...`), hash-x (`X...`) and signed-payload (`P...`)
/// signers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountSigner {
    pub key: String,
    pub weight: u32,
    #[serde(rename = "type", default)]
    pub signer_type: String,
}

/// Subset of `/fee_stats`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeeStats {
    pub last_ledger_base_fee: String,
}

impl FeeStats {
    /// Base fee in stroops; the protocol minimum when Horizon's value does
    /// not parse.
    pub fn base_fee(&self) -> u32 {
        self.last_ledger_base_fee
            .parse::<u32>()
            .ok()
            .filter(|fee| *fee > 0)
            .unwrap_or(BASE_FEE)
    }
}

/// Successful `POST /transactions` response: the revocation receipt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubmitTransactionResponse {
    pub hash: String,
    pub ledger: u32,
    #[serde(default = "default_true")]
    pub successful: bool,
    #[serde(default)]
    pub envelope_xdr: String,
    #[serde(default)]
    pub result_xdr: String,
}

fn default_true() -> bool {
    true
}

/// RFC 7807 problem document Horizon returns on errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Problem {
    #[serde(rename = "type", default)]
    pub problem_type: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub status: u16,
    #[serde(default)]
    pub detail: String,
    #[serde(default)]
    pub extras: Option<ProblemExtras>,
}

impl Problem {
    pub fn result_codes(&self) -> Option<&ResultCodes> {
        self.extras.as_ref()?.result_codes.as_ref()
    }

    /// Best single-line description.
    pub fn message(&self) -> String {
        match (self.title.is_empty(), self.detail.is_empty()) {
            (false, false) => format!("{}: {}", self.title, self.detail),
            (false, true) => self.title.clone(),
            (true, false) => self.detail.clone(),
            (true, true) => "Unknown error".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProblemExtras {
    #[serde(default)]
    pub result_codes: Option<ResultCodes>,
    #[serde(default)]
    pub result_xdr: Option<String>,
}

/// Transaction and per-operation result codes of a rejected submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResultCodes {
    #[serde(default)]
    pub transaction: String,
    #[serde(default)]
    pub operations: Vec<String>,
}

impl ResultCodes {
    /// Signatures did not satisfy the source account's (or an operation's)
    /// signing requirements.
    pub fn is_bad_auth(&self) -> bool {
        matches!(self.transaction.as_str(), "tx_bad_auth" | "tx_bad_auth_extra")
            || self.operations.iter().any(|op| op == "op_bad_auth")
    }
}

impl std::fmt::Display for ResultCodes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.transaction)?;
        if !self.operations.is_empty() {
            write!(f, " [{}]", self.operations.join(", "))?;
        }
        Ok(())
    }
}
