//! Signer-account discovery: which accounts list a key as an active signer.

pub mod client;

use std::collections::HashSet;

use crate::horizon::AccountRecord;
use crate::shared::{AccountId, PublicKey};

/// Whether `record` is a live delegation to `signer`.
///
/// Excludes the signer's own account (a master key on itself is not a
/// delegation) and accounts where the signer's weight is already zero.
/// Only the weight is considered, not the account's thresholds.
pub fn is_active_delegation(signer: &PublicKey, record: &AccountRecord) -> bool {
    if record.id == *signer {
        return false;
    }
    matches!(record.signer_weight(signer), Some(weight) if weight > 0)
}

/// Ordered, de-duplicated set of discovered accounts.
#[derive(Debug, Clone, Default)]
pub struct SignerAccounts {
    ids: Vec<AccountId>,
    seen: HashSet<AccountId>,
}

impl SignerAccounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every record that is an active delegation to `signer`, in order.
    pub fn extend_from<'r>(
        &mut self,
        signer: &PublicKey,
        records: impl IntoIterator<Item = &'r AccountRecord>,
    ) {
        for record in records {
            if is_active_delegation(signer, record) && self.seen.insert(record.id) {
                self.ids.push(record.id);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn into_vec(self) -> Vec<AccountId> {
        self.ids
    }
}
