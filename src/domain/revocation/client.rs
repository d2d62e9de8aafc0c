//! Revocation sub-client: load, fee, build, sign, submit.

use crate::client::RevokeClient;
use crate::domain::revocation::{build_revocation, RevocationReceipt};
use crate::error::RevocationError;
use crate::horizon::LedgerApi;
use crate::shared::{parse_account_id, AccountId, SecretSeed};

/// Sub-client for the revocation transaction.
pub struct Revocation<'a, L> {
    pub(crate) client: &'a RevokeClient<L>,
}

impl<'a, L: LedgerApi> Revocation<'a, L> {
    /// Validate raw inputs, then [`execute`](Self::execute). Invalid input
    /// fails with a `Validation` error before any network call.
    pub async fn execute_str(
        &self,
        target: &str,
        secret: &str,
    ) -> Result<RevocationReceipt, RevocationError> {
        let target = parse_account_id(target)?;
        let secret = SecretSeed::parse(secret)?;
        self.execute(&target, secret).await
    }

    /// Zero the weight of `secret`'s key on `target` and submit.
    ///
    /// Runs immediately and unconditionally. Steps run in order and the
    /// first failure ends the call: load account → fetch base fee → build →
    /// sign → submit. `secret` is consumed and wiped right after signing.
    pub async fn execute(
        &self,
        target: &AccountId,
        secret: SecretSeed,
    ) -> Result<RevocationReceipt, RevocationError> {
        let ledger = &self.client.ledger;
        let network = &self.client.network;
        let signer = secret.public_key();

        tracing::info!(
            account = %target,
            signer = %signer,
            network = %network.id,
            "Revoking signer weight"
        );

        let account = ledger.load_account(target).await.map_err(|e| {
            tracing::warn!(account = %target, error = %e, "Account load failed");
            RevocationError::account_load(&e)
        })?;

        let base_fee = ledger.fetch_base_fee().await.map_err(|e| {
            tracing::warn!(error = %e, "Base fee fetch failed");
            RevocationError::submission(&e.to_string())
        })?;

        let tx = build_revocation(&account, &signer, base_fee, self.client.tx_timeout)
            .map_err(|e| RevocationError::submission(&e.to_string()))?;

        let signed = tx.sign(&secret, &network.network_id());
        drop(secret);
        let signed = signed.map_err(|e| RevocationError::submission(&e.to_string()))?;

        tracing::info!(
            hash = %signed.hash_hex(),
            sequence = signed.transaction.sequence,
            fee = signed.transaction.fee,
            "Submitting revocation transaction"
        );

        let receipt = ledger.submit_transaction(&signed).await.map_err(|e| {
            let err = RevocationError::from_submit(&e);
            tracing::warn!(error = %e, kind = ?err.kind, "Revocation rejected");
            err
        })?;

        if !receipt.successful {
            tracing::warn!(hash = %receipt.hash, "Revocation included but not successful");
            return Err(RevocationError::submission(&format!(
                "transaction {} was not successful",
                receipt.hash
            )));
        }

        tracing::info!(hash = %receipt.hash, ledger = receipt.ledger, "Revocation accepted");
        Ok(receipt)
    }
}
