//! Transaction building and signing for the single-operation revocation
//! transaction.
//!
//! Domain types here are thin wrappers; encoding goes through the
//! `stellar_xdr::curr` protocol types.
//!
//! ```text
//! hash     = SHA-256(TransactionSignaturePayload { network_id, Tx(tx) })
//! envelope = TransactionEnvelope::Tx { tx, signatures: [DecoratedSignature] }
//! ```

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::Utc;
use ed25519_dalek::{Signature, Signer as _, Verifier as _};
use sha2::{Digest, Sha256};
use std::time::Duration;
use stellar_xdr::curr::{self as xdr, Limits, WriteXdr};
use thiserror::Error;

use crate::shared::{AccountId, PublicKey, SecretSeed};

/// Protocol minimum per-operation fee, in stroops.
pub const BASE_FEE: u32 = 100;

/// Validity window attached to every built transaction.
pub const DEFAULT_TX_TIMEOUT: Duration = Duration::from_secs(30);

/// Transaction build errors.
#[derive(Debug, Error, PartialEq)]
pub enum BuildError {
    #[error("Transaction has no operation")]
    MissingOperation,

    #[error("Sequence number overflow")]
    SequenceOverflow,

    #[error("XDR encoding failed: {0}")]
    Xdr(#[from] xdr::Error),
}

// ============================================================================
// Preconditions
// ============================================================================

/// Ledger close-time window (unix seconds) in which the transaction is valid.
/// `max_time == 0` would mean unbounded; built transactions never use that.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeBounds {
    pub min_time: u64,
    pub max_time: u64,
}

impl TimeBounds {
    /// Valid from now until `timeout` from now.
    pub fn expiring_in(timeout: Duration) -> Self {
        let now = Utc::now().timestamp().max(0) as u64;
        Self {
            min_time: 0,
            max_time: now.saturating_add(timeout.as_secs()),
        }
    }
}

impl From<TimeBounds> for xdr::TimeBounds {
    fn from(bounds: TimeBounds) -> Self {
        Self {
            min_time: xdr::TimePoint(bounds.min_time),
            max_time: xdr::TimePoint(bounds.max_time),
        }
    }
}

// ============================================================================
// SetOptions
// ============================================================================

/// An ed25519 signer entry. Weight 0 removes the signer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signer {
    pub key: PublicKey,
    pub weight: u32,
}

/// The `SET_OPTIONS` fields this crate uses. Everything else is encoded as
/// absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SetOptionsOp {
    pub master_weight: Option<u32>,
    pub signer: Option<Signer>,
}

impl SetOptionsOp {
    /// Zero the weight of `signing_key` on `account`.
    ///
    /// The account's own key is its master key and is weighted through
    /// `masterWeight`; any other key is a signer entry.
    pub fn zero_weight(account: &AccountId, signing_key: &PublicKey) -> Self {
        if account == signing_key {
            Self {
                master_weight: Some(0),
                signer: None,
            }
        } else {
            Self {
                master_weight: None,
                signer: Some(Signer {
                    key: *signing_key,
                    weight: 0,
                }),
            }
        }
    }
}

impl From<&SetOptionsOp> for xdr::SetOptionsOp {
    fn from(op: &SetOptionsOp) -> Self {
        Self {
            inflation_dest: None,
            clear_flags: None,
            set_flags: None,
            master_weight: op.master_weight,
            low_threshold: None,
            med_threshold: None,
            high_threshold: None,
            home_domain: None,
            signer: op.signer.map(|signer| xdr::Signer {
                key: xdr::SignerKey::Ed25519(xdr::Uint256(*signer.key.as_bytes())),
                weight: signer.weight,
            }),
        }
    }
}

// ============================================================================
// Transaction
// ============================================================================

/// A v1 transaction carrying exactly one `SET_OPTIONS` operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub source: AccountId,
    pub fee: u32,
    pub sequence: i64,
    pub time_bounds: TimeBounds,
    pub operation: SetOptionsOp,
}

impl Transaction {
    /// The protocol form of this transaction.
    pub fn to_xdr_transaction(&self) -> Result<xdr::Transaction, BuildError> {
        let operation = xdr::Operation {
            source_account: None,
            body: xdr::OperationBody::SetOptions((&self.operation).into()),
        };
        Ok(xdr::Transaction {
            source_account: xdr::MuxedAccount::Ed25519(xdr::Uint256(*self.source.as_bytes())),
            fee: self.fee,
            seq_num: xdr::SequenceNumber(self.sequence),
            cond: xdr::Preconditions::Time(self.time_bounds.into()),
            memo: xdr::Memo::None,
            operations: vec![operation].try_into()?,
            ext: xdr::TransactionExt::V0,
        })
    }

    /// XDR of the bare transaction.
    pub fn to_xdr(&self) -> Result<Vec<u8>, BuildError> {
        Ok(self.to_xdr_transaction()?.to_xdr(Limits::none())?)
    }

    /// Hash that gets signed, bound to one network.
    pub fn hash(&self, network_id: &[u8; 32]) -> Result<[u8; 32], BuildError> {
        payload_hash(self.to_xdr_transaction()?, network_id)
    }

    /// Sign with `seed` for the network identified by `network_id`.
    pub fn sign(
        self,
        seed: &SecretSeed,
        network_id: &[u8; 32],
    ) -> Result<SignedTransaction, BuildError> {
        let tx = self.to_xdr_transaction()?;
        let hash = payload_hash(tx.clone(), network_id)?;

        let signing_key = seed.signing_key();
        let signature = signing_key.sign(&hash);
        let hint = PublicKey::from_bytes(signing_key.verifying_key().to_bytes()).hint();
        let signatures = vec![xdr::DecoratedSignature {
            hint: xdr::SignatureHint(hint),
            signature: xdr::Signature::try_from(signature.to_bytes().to_vec())?,
        }];

        let envelope = xdr::TransactionEnvelope::Tx(xdr::TransactionV1Envelope {
            tx,
            signatures: signatures.clone().try_into()?,
        })
        .to_xdr(Limits::none())?;

        Ok(SignedTransaction {
            transaction: self,
            hash,
            signatures,
            envelope,
        })
    }
}

fn payload_hash(tx: xdr::Transaction, network_id: &[u8; 32]) -> Result<[u8; 32], BuildError> {
    let payload = xdr::TransactionSignaturePayload {
        network_id: xdr::Hash(*network_id),
        tagged_transaction: xdr::TransactionSignaturePayloadTaggedTransaction::Tx(tx),
    };
    Ok(Sha256::digest(payload.to_xdr(Limits::none())?).into())
}

/// Builder for the revocation transaction.
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    source: AccountId,
    current_sequence: i64,
    base_fee: u32,
    timeout: Duration,
    time_bounds: Option<TimeBounds>,
    operation: Option<SetOptionsOp>,
}

impl TransactionBuilder {
    /// Start a transaction for `source`, whose current sequence number on
    /// the ledger is `current_sequence`.
    pub fn new(source: AccountId, current_sequence: i64) -> Self {
        Self {
            source,
            current_sequence,
            base_fee: BASE_FEE,
            timeout: DEFAULT_TX_TIMEOUT,
            time_bounds: None,
            operation: None,
        }
    }

    /// Per-operation fee in stroops.
    pub fn base_fee(mut self, fee: u32) -> Self {
        self.base_fee = fee;
        self
    }

    /// Validity window, counted from `build()`.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Fixed time bounds; overrides `timeout`.
    pub fn time_bounds(mut self, bounds: TimeBounds) -> Self {
        self.time_bounds = Some(bounds);
        self
    }

    pub fn set_options(mut self, op: SetOptionsOp) -> Self {
        self.operation = Some(op);
        self
    }

    pub fn build(self) -> Result<Transaction, BuildError> {
        let operation = self.operation.ok_or(BuildError::MissingOperation)?;
        let sequence = self
            .current_sequence
            .checked_add(1)
            .ok_or(BuildError::SequenceOverflow)?;

        Ok(Transaction {
            source: self.source,
            // one operation
            fee: self.base_fee,
            sequence,
            time_bounds: self
                .time_bounds
                .unwrap_or_else(|| TimeBounds::expiring_in(self.timeout)),
            operation,
        })
    }
}

// ============================================================================
// Signed envelope
// ============================================================================

/// A signed transaction ready for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    pub transaction: Transaction,
    hash: [u8; 32],
    pub signatures: Vec<xdr::DecoratedSignature>,
    envelope: Vec<u8>,
}

impl SignedTransaction {
    pub fn hash(&self) -> &[u8; 32] {
        &self.hash
    }

    /// Hex transaction hash, as Horizon reports it.
    pub fn hash_hex(&self) -> String {
        hex::encode(self.hash)
    }

    /// Whether one of the signatures verifies against `key`.
    pub fn is_signed_by(&self, key: &PublicKey) -> bool {
        let Ok(verifying_key) = key.to_verifying_key() else {
            return false;
        };
        self.signatures.iter().any(|s| {
            s.hint.0 == key.hint()
                && Signature::from_slice(s.signature.as_ref())
                    .is_ok_and(|sig| verifying_key.verify(&self.hash, &sig).is_ok())
        })
    }

    /// XDR `TransactionEnvelope`.
    pub fn to_envelope_xdr(&self) -> &[u8] {
        &self.envelope
    }

    /// Base64 envelope, the form Horizon's `POST /transactions` expects.
    pub fn to_envelope_base64(&self) -> String {
        BASE64.encode(&self.envelope)
    }
}
