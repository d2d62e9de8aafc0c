//! Ledger access: the [`LedgerApi`] seam and its Horizon implementation.

#[cfg(feature = "http")]
pub mod client;
pub mod wire;

#[cfg(feature = "http")]
pub use client::HorizonHttp;
pub use wire::{
    AccountRecord, AccountSigner, FeeStats, Page, Problem, ResultCodes,
    SubmitTransactionResponse,
};

use async_trait::async_trait;

use crate::error::HttpError;
use crate::shared::{AccountId, PublicKey};
use crate::tx::SignedTransaction;

/// Largest page Horizon serves for collection endpoints.
pub const MAX_PAGE_LIMIT: u32 = 200;

/// The four ledger queries the core needs. Implemented over HTTP by
/// [`HorizonHttp`]; tests substitute an in-memory ledger.
#[async_trait]
pub trait LedgerApi: Send + Sync {
    /// One page of accounts that list `signer` among their signers, ordered
    /// ascending, starting after `cursor`.
    async fn accounts_for_signer(
        &self,
        signer: &PublicKey,
        cursor: Option<&str>,
        limit: u32,
    ) -> Result<Vec<AccountRecord>, HttpError>;

    /// Current state of one account. `HttpError::NotFound` when it does not
    /// exist.
    async fn load_account(&self, account: &AccountId) -> Result<AccountRecord, HttpError>;

    /// Recommended per-operation base fee, in stroops.
    async fn fetch_base_fee(&self) -> Result<u32, HttpError>;

    /// Submit a signed transaction and wait for inclusion or rejection.
    async fn submit_transaction(
        &self,
        tx: &SignedTransaction,
    ) -> Result<SubmitTransactionResponse, HttpError>;
}
