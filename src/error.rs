//! Error types, one enum per layer.
//!
//! `HttpError` never crosses the revocation boundary: [`RevocationError`]
//! classifies it into a `{title, message}` pair first.

use thiserror::Error;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Discovery(#[from] DiscoveryError),

    #[error("{0}")]
    Revocation(#[from] RevocationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Horizon transport errors.
#[derive(Error, Debug)]
pub enum HttpError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Rate limited")]
    RateLimited,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Timeout")]
    Timeout,

    /// Horizon rejected a submitted transaction.
    #[error("Transaction failed: {result_codes}")]
    TransactionFailed {
        status: u16,
        result_codes: crate::horizon::ResultCodes,
    },

    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl HttpError {
    /// True when Horizon said the signatures did not meet the account's
    /// signing requirements.
    pub fn is_bad_auth(&self) -> bool {
        match self {
            Self::TransactionFailed { result_codes, .. } => result_codes.is_bad_auth(),
            _ => false,
        }
    }
}

/// Local input validation, checked before any network call.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Public key is required.")]
    PublicKeyRequired,

    #[error("Public key is invalid.")]
    PublicKeyInvalid,

    #[error("Master key is required.")]
    SecretKeyRequired,

    #[error("Master key is invalid.")]
    SecretKeyInvalid,

    #[error("Account ID is required.")]
    AccountIdRequired,

    #[error("Account ID is invalid.")]
    AccountIdInvalid,
}

/// Signer-account discovery failures.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Failed to check public key: {0}.")]
    Query(String),
}

impl From<HttpError> for DiscoveryError {
    fn from(e: HttpError) -> Self {
        Self::Query(e.to_string())
    }
}

pub const GENERIC_ERROR_TITLE: &str = "Something went wrong";
pub const BAD_AUTH_TITLE: &str = "Wrong secret key";
pub const VALIDATION_TITLE: &str = "Invalid input";

const BAD_AUTH_MESSAGE: &str = "The network rejected the signature. Make sure you entered the \
     master secret key that is a signer on this account, then try again.";

/// Which step of the revocation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevocationErrorKind {
    /// Missing or malformed input; nothing was sent.
    Validation,
    /// The target account could not be loaded.
    AccountLoad,
    /// The signature did not satisfy the account's signing requirements.
    BadAuth,
    /// Any other failure while preparing or submitting the transaction.
    Submission,
}

/// A classified revocation failure, ready for display.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{title}: {message}")]
pub struct RevocationError {
    pub kind: RevocationErrorKind,
    pub title: String,
    pub message: String,
}

impl RevocationError {
    pub fn validation(e: ValidationError) -> Self {
        Self {
            kind: RevocationErrorKind::Validation,
            title: VALIDATION_TITLE.to_string(),
            message: e.to_string(),
        }
    }

    pub fn account_load(cause: &HttpError) -> Self {
        let cause = match cause {
            HttpError::NotFound(_) => "the account does not exist on this network".to_string(),
            other => other.to_string(),
        };
        Self::generic(RevocationErrorKind::AccountLoad, &cause)
    }

    pub fn bad_auth() -> Self {
        Self {
            kind: RevocationErrorKind::BadAuth,
            title: BAD_AUTH_TITLE.to_string(),
            message: BAD_AUTH_MESSAGE.to_string(),
        }
    }

    pub fn submission(cause: &str) -> Self {
        Self::generic(RevocationErrorKind::Submission, cause)
    }

    /// Classify a failed submission.
    pub fn from_submit(e: &HttpError) -> Self {
        if e.is_bad_auth() {
            Self::bad_auth()
        } else {
            Self::submission(&e.to_string())
        }
    }

    fn generic(kind: RevocationErrorKind, cause: &str) -> Self {
        Self {
            kind,
            title: GENERIC_ERROR_TITLE.to_string(),
            message: format!("We couldn’t revoke your account access: {cause}. Please try again."),
        }
    }
}

impl From<ValidationError> for RevocationError {
    fn from(e: ValidationError) -> Self {
        Self::validation(e)
    }
}
