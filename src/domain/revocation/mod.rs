//! Revocation: zero the invoking key's signing weight on one account.
//!
//! This is irreversible once the network accepts it. Callers confirm with
//! the user before calling `execute`; the core never asks and never retries.

pub mod client;

use std::time::Duration;

use crate::horizon::{AccountRecord, SubmitTransactionResponse};
use crate::shared::PublicKey;
use crate::tx::{BuildError, SetOptionsOp, Transaction, TransactionBuilder};

/// Horizon's receipt for an accepted revocation.
pub type RevocationReceipt = SubmitTransactionResponse;

/// Build the single-operation revocation transaction for a loaded account.
pub fn build_revocation(
    account: &AccountRecord,
    signing_key: &PublicKey,
    base_fee: u32,
    timeout: Duration,
) -> Result<Transaction, BuildError> {
    TransactionBuilder::new(account.id, account.sequence)
        .base_fee(base_fee)
        .timeout(timeout)
        .set_options(SetOptionsOp::zero_weight(&account.id, signing_key))
        .build()
}
