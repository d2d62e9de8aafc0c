//! Discovery sub-client: find the accounts a key can co-sign for.

use std::str::FromStr;

use crate::client::RevokeClient;
use crate::domain::discovery::SignerAccounts;
use crate::error::DiscoveryError;
use crate::horizon::LedgerApi;
use crate::shared::{AccountId, PublicKey};

/// Sub-client for signer-account discovery.
pub struct Discovery<'a, L> {
    pub(crate) client: &'a RevokeClient<L>,
}

impl<'a, L: LedgerApi> Discovery<'a, L> {
    /// Validate `public_key`, then list every account where it is an active
    /// signer. Invalid input fails without touching the network.
    pub async fn find(&self, public_key: &str) -> Result<Vec<AccountId>, DiscoveryError> {
        let key = PublicKey::from_str(public_key)?;
        self.find_key(&key).await
    }

    /// List every account where `key` is an active signer, in ledger order.
    ///
    /// An empty list is a successful answer. Pages are followed until
    /// Horizon returns a short page.
    pub async fn find_key(&self, key: &PublicKey) -> Result<Vec<AccountId>, DiscoveryError> {
        let limit = self.client.page_limit;
        let ledger = &self.client.ledger;
        let mut found = SignerAccounts::new();
        let mut cursor: Option<String> = None;

        loop {
            let records = ledger
                .accounts_for_signer(key, cursor.as_deref(), limit)
                .await
                .map_err(|e| {
                    tracing::warn!(signer = %key, error = %e, "Signer query failed");
                    DiscoveryError::from(e)
                })?;

            tracing::debug!(signer = %key, records = records.len(), "Fetched signer page");
            found.extend_from(key, &records);

            if records.len() < limit as usize {
                break;
            }
            let next = records.last().map(|r| {
                if r.paging_token.is_empty() {
                    r.id.to_string()
                } else {
                    r.paging_token.clone()
                }
            });
            if next.is_none() || next == cursor {
                break;
            }
            cursor = next;
        }

        tracing::info!(
            signer = %key,
            network = %self.client.network.id,
            accounts = found.len(),
            "Signer discovery complete"
        );
        Ok(found.into_vec())
    }
}
