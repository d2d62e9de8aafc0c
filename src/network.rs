//! Network selection: resolves a [`NetworkId`] to its Horizon endpoint and
//! passphrase.
//!
//! The passphrase is part of every transaction signature, so a transaction
//! built for one network is invalid on the other. All ledger access goes
//! through a resolved [`NetworkConfig`].

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::str::FromStr;

use crate::shared::AccountId;

/// Horizon URL for the public network.
pub const MAINNET_HORIZON_URL: &str = "https://horizon.stellar.org";

/// Horizon URL for the SDF test network.
pub const TESTNET_HORIZON_URL: &str = "https://horizon-testnet.stellar.org";

/// Passphrase of the public network.
pub const MAINNET_PASSPHRASE: &str = "Public Global Stellar Network ; September 2015";

/// Passphrase of the SDF test network.
pub const TESTNET_PASSPHRASE: &str = "Test SDF Network ; September 2015";

const EXPLORER_URL: &str = "https://stellar.expert/explorer";

/// The two networks the tool can talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkId {
    #[default]
    Mainnet,
    Testnet,
}

impl NetworkId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Mainnet => "Mainnet",
            Self::Testnet => "Testnet",
        }
    }
}

impl std::fmt::Display for NetworkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NetworkId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" | "public" | "pubnet" => Ok(Self::Mainnet),
            "testnet" => Ok(Self::Testnet),
            other => Err(format!("unknown network: {other} (expected mainnet or testnet)")),
        }
    }
}

/// Endpoint and passphrase of a resolved network. Immutable once resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    pub id: NetworkId,
    pub horizon_url: String,
    pub passphrase: &'static str,
}

impl NetworkConfig {
    /// Replace the Horizon endpoint (self-hosted Horizon), keeping the
    /// passphrase bound to the network id.
    pub fn with_horizon_url(mut self, url: &str) -> Self {
        self.horizon_url = url.trim_end_matches('/').to_string();
        self
    }

    /// SHA-256 of the passphrase: the network id mixed into every
    /// transaction signature payload.
    pub fn network_id(&self) -> [u8; 32] {
        Sha256::digest(self.passphrase.as_bytes()).into()
    }

    /// stellar.expert link for an account on this network.
    pub fn explorer_account_url(&self, account: &AccountId) -> String {
        let segment = match self.id {
            NetworkId::Mainnet => "public",
            NetworkId::Testnet => "testnet",
        };
        format!("{EXPLORER_URL}/{segment}/account/{account}")
    }
}

/// Resolve a network selection. Pure and infallible.
pub fn resolve_network(id: NetworkId) -> NetworkConfig {
    match id {
        NetworkId::Mainnet => NetworkConfig {
            id,
            horizon_url: MAINNET_HORIZON_URL.to_string(),
            passphrase: MAINNET_PASSPHRASE,
        },
        NetworkId::Testnet => NetworkConfig {
            id,
            horizon_url: TESTNET_HORIZON_URL.to_string(),
            passphrase: TESTNET_PASSPHRASE,
        },
    }
}
