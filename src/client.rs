//! High-level client: `RevokeClient` with the two operation sub-clients.
//!
//! A client is bound to one resolved network. Switching networks means
//! building a new client; nothing carries over.

use std::time::Duration;

use crate::domain::discovery::client::Discovery;
use crate::domain::revocation::client::Revocation;
use crate::horizon::{LedgerApi, MAX_PAGE_LIMIT};
use crate::network::{resolve_network, NetworkConfig, NetworkId};
use crate::tx::DEFAULT_TX_TIMEOUT;

#[cfg(feature = "http")]
use crate::error::SdkError;
#[cfg(feature = "http")]
use crate::horizon::client::{HorizonHttp, DEFAULT_REQUEST_TIMEOUT};

// Re-export sub-client types for convenience.
pub use crate::domain::discovery::client::Discovery as DiscoveryClient;
pub use crate::domain::revocation::client::Revocation as RevocationClient;

/// The primary entry point.
///
/// Holds no per-call state: every operation is an independent request built
/// from its arguments and the resolved network.
pub struct RevokeClient<L> {
    pub(crate) ledger: L,
    pub(crate) network: NetworkConfig,
    /// Validity window of built transactions.
    pub(crate) tx_timeout: Duration,
    /// Records requested per discovery page.
    pub(crate) page_limit: u32,
}

/// A client talking to Horizon over HTTP.
#[cfg(feature = "http")]
pub type HorizonRevokeClient = RevokeClient<HorizonHttp>;

#[cfg(feature = "http")]
impl RevokeClient<HorizonHttp> {
    pub fn builder() -> RevokeClientBuilder {
        RevokeClientBuilder::default()
    }
}

impl<L: LedgerApi> RevokeClient<L> {
    /// Client over an arbitrary ledger backend.
    pub fn with_ledger(network: NetworkConfig, ledger: L) -> Self {
        Self {
            ledger,
            network,
            tx_timeout: DEFAULT_TX_TIMEOUT,
            page_limit: MAX_PAGE_LIMIT,
        }
    }

    pub fn tx_timeout(mut self, timeout: Duration) -> Self {
        self.tx_timeout = timeout;
        self
    }

    /// Records per discovery page, clamped to `1..=200`.
    pub fn page_limit(mut self, limit: u32) -> Self {
        self.page_limit = limit.clamp(1, MAX_PAGE_LIMIT);
        self
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn discovery(&self) -> Discovery<'_, L> {
        Discovery { client: self }
    }

    pub fn revocation(&self) -> Revocation<'_, L> {
        Revocation { client: self }
    }

    pub fn network(&self) -> &NetworkConfig {
        &self.network
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }
}

impl<L: Clone> Clone for RevokeClient<L> {
    fn clone(&self) -> Self {
        Self {
            ledger: self.ledger.clone(),
            network: self.network.clone(),
            tx_timeout: self.tx_timeout,
            page_limit: self.page_limit,
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

#[cfg(feature = "http")]
pub struct RevokeClientBuilder {
    network: NetworkId,
    horizon_url: Option<String>,
    request_timeout: Duration,
    tx_timeout: Duration,
}

#[cfg(feature = "http")]
impl Default for RevokeClientBuilder {
    fn default() -> Self {
        Self {
            network: NetworkId::default(),
            horizon_url: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            tx_timeout: DEFAULT_TX_TIMEOUT,
        }
    }
}

#[cfg(feature = "http")]
impl RevokeClientBuilder {
    pub fn network(mut self, network: NetworkId) -> Self {
        self.network = network;
        self
    }

    /// Talk to a different Horizon for the selected network.
    pub fn horizon_url(mut self, url: &str) -> Self {
        self.horizon_url = Some(url.to_string());
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Validity window attached to the revocation transaction.
    pub fn tx_timeout(mut self, timeout: Duration) -> Self {
        self.tx_timeout = timeout;
        self
    }

    pub fn build(self) -> Result<HorizonRevokeClient, SdkError> {
        let mut network = resolve_network(self.network);
        if let Some(url) = &self.horizon_url {
            network = network.with_horizon_url(url);
        }
        let ledger = HorizonHttp::with_timeout(&network.horizon_url, self.request_timeout)?;
        Ok(RevokeClient::with_ledger(network, ledger).tx_timeout(self.tx_timeout))
    }
}
