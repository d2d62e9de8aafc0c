//! # sdp-revoke
//!
//! Emergency revocation of an SDP host's signing access on Stellar accounts.
//!
//! A master key that co-signs for host-operated accounts can list those
//! accounts and, on one of them, zero its own signing weight in a single
//! irreversible transaction.
//!
//! ## Architecture
//!
//! 1. **Core**: Key newtypes, validation, network descriptors, transaction
//!    building and signing
//! 2. **Ledger**: `LedgerApi` seam with the `HorizonHttp` implementation
//! 3. **Operations**: `Discovery::find` and `Revocation::execute`
//! 4. **High-Level Client**: `RevokeClient` bound to one network
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sdp_revoke::prelude::*;
//!
//! let client = HorizonRevokeClient::builder()
//!     .network(NetworkId::Testnet)
//!     .build()?;
//!
//! let accounts = client.discovery().find("GB43...").await?;
//!
//! // Only after the user confirmed:
//! let secret = SecretSeed::parse(&typed_secret)?;
//! let receipt = client.revocation().execute(&accounts[0], secret).await?;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Key newtypes and input validation.
pub mod shared;

/// Error types.
pub mod error;

/// Network selection and resolution.
pub mod network;

/// Transaction building, XDR and signing.
pub mod tx;

// ── Layer 2: Ledger ──────────────────────────────────────────────────────────

/// Ledger access: the `LedgerApi` trait, Horizon wire types and HTTP client.
pub mod horizon;

// ── Layer 3: Operations ──────────────────────────────────────────────────────

/// Discovery and revocation.
pub mod domain;

// ── Layer 4: High-Level Client ───────────────────────────────────────────────

/// `RevokeClient`: the primary entry point.
pub mod client;

pub use network::resolve_network;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Keys
    pub use crate::shared::{
        parse_account_id, public_key_error, secret_key_error, AccountId, PublicKey, SecretSeed,
    };

    // Network
    pub use crate::network::{resolve_network, NetworkConfig, NetworkId};

    // Errors
    pub use crate::error::{
        DiscoveryError, HttpError, RevocationError, RevocationErrorKind, SdkError,
        ValidationError,
    };

    // Ledger
    pub use crate::horizon::{AccountRecord, LedgerApi};

    // Operations
    pub use crate::domain::revocation::RevocationReceipt;

    // Client + sub-clients
    pub use crate::client::{DiscoveryClient, RevocationClient, RevokeClient};
    #[cfg(feature = "http")]
    pub use crate::client::{HorizonRevokeClient, RevokeClientBuilder};
    #[cfg(feature = "http")]
    pub use crate::horizon::HorizonHttp;
}
