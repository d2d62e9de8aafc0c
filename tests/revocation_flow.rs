//! End-to-end discovery and revocation against an in-memory ledger.
//!
//! `FakeLedger` answers the four `LedgerApi` calls from a map of accounts and
//! applies accepted `SET_OPTIONS` operations to it, so a revocation is visible
//! to the next discovery. Submissions are checked the way the network checks
//! them: the hash must be bound to the ledger's network and a signature must
//! verify against a signer with weight above zero.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use sdp_revoke::horizon::{AccountSigner, ResultCodes, SubmitTransactionResponse};
use sdp_revoke::prelude::*;
use sdp_revoke::tx::SignedTransaction;

const MASTER_SECRET: &str = "SAAQEAYEAUDAOCAJBIFQYDIOB4IBCEQTCQKRMFYYDENBWHA5DYPSBF5K";
const MASTER: &str = "GB43KVROR7TFJ6KAPCYRF2FJROTZAH4FHLTJLPWX4DRZCC5NASLGITR6";
const WRONG_SECRET: &str = "SADQOBYHA4DQOBYHA4DQOBYHA4DQOBYHA4DQOBYHA4DQOBYHA4DQP54X";
const HOST: &str = "GDNCT2K3ALQA76QVMRLXL6Y5FORCFIMUGOK65IDLSTRMAV5XXZU5APKK";

// ── Fake ledger ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Call {
    Query,
    Load,
    Fee,
    Submit,
}

#[derive(Default)]
struct Failures {
    query: bool,
    load: bool,
    fee: bool,
}

struct FakeLedger {
    network_id: [u8; 32],
    /// Keyed by paging token, so iteration is ledger order.
    accounts: Mutex<BTreeMap<u64, AccountRecord>>,
    calls: Mutex<Vec<Call>>,
    base_fee: u32,
    fail: Failures,
}

impl FakeLedger {
    fn new(network: &NetworkConfig) -> Self {
        Self {
            network_id: network.network_id(),
            accounts: Mutex::new(BTreeMap::new()),
            calls: Mutex::new(Vec::new()),
            base_fee: 100,
            fail: Failures::default(),
        }
    }

    /// Add an account whose own master key has weight 1, plus `signers`.
    fn with_account(self, id: AccountId, sequence: i64, signers: &[(PublicKey, u32)]) -> Self {
        {
            let mut accounts = self.accounts.lock().unwrap();
            let token = accounts.len() as u64 + 1;
            let mut entries = vec![signer_entry(&id, 1)];
            entries.extend(signers.iter().map(|(key, weight)| signer_entry(key, *weight)));
            accounts.insert(
                token,
                AccountRecord {
                    id,
                    sequence,
                    paging_token: token.to_string(),
                    signers: entries,
                },
            );
        }
        self
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn account(&self, id: &AccountId) -> Option<AccountRecord> {
        self.accounts
            .lock()
            .unwrap()
            .values()
            .find(|r| r.id == *id)
            .cloned()
    }
}

fn signer_entry(key: &PublicKey, weight: u32) -> AccountSigner {
    AccountSigner {
        key: key.to_string(),
        weight,
        signer_type: "ed25519_public_key".to_string(),
    }
}

fn rejected(transaction: &str) -> HttpError {
    HttpError::TransactionFailed {
        status: 400,
        result_codes: ResultCodes {
            transaction: transaction.to_string(),
            operations: vec![],
        },
    }
}

#[async_trait]
impl LedgerApi for FakeLedger {
    async fn accounts_for_signer(
        &self,
        signer: &PublicKey,
        cursor: Option<&str>,
        limit: u32,
    ) -> Result<Vec<AccountRecord>, HttpError> {
        self.record(Call::Query);
        if self.fail.query {
            return Err(HttpError::ServerError {
                status: 503,
                body: "unavailable".to_string(),
            });
        }
        let after = match cursor {
            Some(c) => c
                .parse::<u64>()
                .map_err(|_| HttpError::BadRequest(format!("bad cursor {c}")))?,
            None => 0,
        };
        let key = signer.to_string();
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts
            .range(after + 1..)
            .map(|(_, record)| record)
            .filter(|record| record.signers.iter().any(|s| s.key == key))
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn load_account(&self, account: &AccountId) -> Result<AccountRecord, HttpError> {
        self.record(Call::Load);
        if self.fail.load {
            return Err(HttpError::Timeout);
        }
        self.account(account)
            .ok_or_else(|| HttpError::NotFound("Resource Missing".to_string()))
    }

    async fn fetch_base_fee(&self) -> Result<u32, HttpError> {
        self.record(Call::Fee);
        if self.fail.fee {
            return Err(HttpError::RateLimited);
        }
        Ok(self.base_fee)
    }

    async fn submit_transaction(
        &self,
        tx: &SignedTransaction,
    ) -> Result<SubmitTransactionResponse, HttpError> {
        self.record(Call::Submit);

        // A hash computed for another network fails signature checks.
        if tx.transaction.hash(&self.network_id).ok().as_ref() != Some(tx.hash()) {
            return Err(rejected("tx_bad_auth"));
        }

        let mut accounts = self.accounts.lock().unwrap();
        let Some(account) = accounts
            .values_mut()
            .find(|r| r.id == tx.transaction.source)
        else {
            return Err(rejected("tx_no_source_account"));
        };
        if tx.transaction.sequence != account.sequence + 1 {
            return Err(rejected("tx_bad_seq"));
        }

        let authorized = account.signers.iter().any(|s| {
            s.weight > 0
                && s.key
                    .parse::<PublicKey>()
                    .map(|key| tx.is_signed_by(&key))
                    .unwrap_or(false)
        });
        if !authorized {
            return Err(rejected("tx_bad_auth"));
        }

        let op = &tx.transaction.operation;
        if let Some(signer) = &op.signer {
            let key = signer.key.to_string();
            if signer.weight == 0 {
                account.signers.retain(|s| s.key != key);
            }
        }
        if let Some(weight) = op.master_weight {
            let own = account.id.to_string();
            for s in account.signers.iter_mut().filter(|s| s.key == own) {
                s.weight = weight;
            }
        }
        account.sequence += 1;

        Ok(SubmitTransactionResponse {
            hash: tx.hash_hex(),
            ledger: 4242,
            successful: true,
            envelope_xdr: tx.to_envelope_base64(),
            result_xdr: String::new(),
        })
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

fn key(s: &str) -> PublicKey {
    s.parse().unwrap()
}

fn account_id(n: u8) -> AccountId {
    PublicKey::from_bytes([n; 32])
}

fn mainnet() -> NetworkConfig {
    resolve_network(NetworkId::Mainnet)
}

fn client(ledger: FakeLedger) -> RevokeClient<FakeLedger> {
    RevokeClient::with_ledger(mainnet(), ledger)
}

/// `MASTER` co-signs A1 and A2 with weight 1 and owns its own account.
fn delegated_ledger() -> (FakeLedger, AccountId, AccountId) {
    let master = key(MASTER);
    let a1 = account_id(11);
    let a2 = account_id(12);
    let ledger = FakeLedger::new(&mainnet())
        .with_account(master, 7, &[])
        .with_account(a1, 100, &[(master, 1)])
        .with_account(a2, 200, &[(master, 1)]);
    (ledger, a1, a2)
}

// ── Discovery ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_find_without_signer_records_is_empty() {
    let ledger = FakeLedger::new(&mainnet()).with_account(account_id(11), 1, &[]);
    let client = client(ledger);

    let found = client.discovery().find(MASTER).await.unwrap();
    assert!(found.is_empty());
}

#[tokio::test]
async fn test_find_excludes_own_account() {
    let (ledger, a1, a2) = delegated_ledger();
    let client = client(ledger);

    let found = client.discovery().find(MASTER).await.unwrap();
    assert_eq!(found, vec![a1, a2]);
}

#[tokio::test]
async fn test_find_excludes_zero_weight() {
    let master = key(MASTER);
    let active = account_id(21);
    let ledger = FakeLedger::new(&mainnet())
        .with_account(account_id(20), 1, &[(master, 0)])
        .with_account(active, 1, &[(master, 2)]);
    let client = client(ledger);

    let found = client.discovery().find(MASTER).await.unwrap();
    assert_eq!(found, vec![active]);
}

#[tokio::test]
async fn test_find_follows_pages() {
    let master = key(MASTER);
    let mut ledger = FakeLedger::new(&mainnet()).with_account(master, 1, &[]);
    let mut expected = Vec::new();
    for n in 30..37 {
        ledger = ledger.with_account(account_id(n), 1, &[(master, 1)]);
        expected.push(account_id(n));
    }
    let client = client(ledger).page_limit(3);

    let found = client.discovery().find(MASTER).await.unwrap();
    assert_eq!(found, expected);
    // 8 matching records at 3 per page.
    assert_eq!(client.ledger().calls(), vec![Call::Query; 3]);
}

#[tokio::test]
async fn test_find_invalid_key_makes_no_call() {
    let (ledger, _, _) = delegated_ledger();
    let client = client(ledger);

    let err = client.discovery().find("not-a-key").await.unwrap_err();
    assert!(matches!(
        err,
        DiscoveryError::Validation(ValidationError::PublicKeyInvalid)
    ));
    let err = client.discovery().find("  ").await.unwrap_err();
    assert!(matches!(
        err,
        DiscoveryError::Validation(ValidationError::PublicKeyRequired)
    ));
    assert!(client.ledger().calls().is_empty());
}

#[tokio::test]
async fn test_find_query_failure() {
    let (mut ledger, _, _) = delegated_ledger();
    ledger.fail.query = true;
    let client = client(ledger);

    let err = client.discovery().find(MASTER).await.unwrap_err();
    assert!(matches!(err, DiscoveryError::Query(_)));
    assert!(err.to_string().starts_with("Failed to check public key:"));
}

// ── Revocation ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_revoke_then_find_drops_account() {
    let (ledger, a1, a2) = delegated_ledger();
    let client = client(ledger);

    let secret = SecretSeed::parse(MASTER_SECRET).unwrap();
    let receipt = client.revocation().execute(&a1, secret).await.unwrap();

    assert!(receipt.successful);
    assert_eq!(receipt.hash.len(), 64);
    assert_eq!(
        client.ledger().calls(),
        vec![Call::Load, Call::Fee, Call::Submit]
    );

    let a1_after = client.ledger().account(&a1).unwrap();
    assert_eq!(a1_after.sequence, 101);
    assert_eq!(a1_after.signer_weight(&key(MASTER)), None);

    let found = client.discovery().find(MASTER).await.unwrap();
    assert_eq!(found, vec![a2]);
}

#[tokio::test]
async fn test_revoke_wrong_secret_is_bad_auth() {
    let (ledger, a1, _) = delegated_ledger();
    let client = client(ledger);

    let err = client
        .revocation()
        .execute_str(&a1.to_string(), WRONG_SECRET)
        .await
        .unwrap_err();

    assert_eq!(err.kind, RevocationErrorKind::BadAuth);
    assert_eq!(err.title, "Wrong secret key");
    assert_eq!(
        client.ledger().account(&a1).unwrap().signer_weight(&key(MASTER)),
        Some(1)
    );
}

#[tokio::test]
async fn test_revoke_twice_is_bad_auth() {
    let (ledger, a1, _) = delegated_ledger();
    let client = client(ledger);

    let first = SecretSeed::parse(MASTER_SECRET).unwrap();
    client.revocation().execute(&a1, first).await.unwrap();

    let second = SecretSeed::parse(MASTER_SECRET).unwrap();
    let err = client.revocation().execute(&a1, second).await.unwrap_err();
    assert_eq!(err.kind, RevocationErrorKind::BadAuth);
}

#[tokio::test]
async fn test_revoke_missing_account() {
    let (ledger, _, _) = delegated_ledger();
    let client = client(ledger);

    let secret = SecretSeed::parse(MASTER_SECRET).unwrap();
    let err = client
        .revocation()
        .execute(&account_id(99), secret)
        .await
        .unwrap_err();

    assert_eq!(err.kind, RevocationErrorKind::AccountLoad);
    assert_eq!(err.title, "Something went wrong");
    assert!(err.message.contains("does not exist"));
    assert_eq!(client.ledger().calls(), vec![Call::Load]);
}

#[tokio::test]
async fn test_revoke_load_failure_stops_before_submit() {
    let (mut ledger, a1, _) = delegated_ledger();
    ledger.fail.load = true;
    let client = client(ledger);

    let secret = SecretSeed::parse(MASTER_SECRET).unwrap();
    let err = client.revocation().execute(&a1, secret).await.unwrap_err();

    assert_eq!(err.kind, RevocationErrorKind::AccountLoad);
    assert_eq!(client.ledger().calls(), vec![Call::Load]);
}

#[tokio::test]
async fn test_revoke_fee_failure_stops_before_submit() {
    let (mut ledger, a1, _) = delegated_ledger();
    ledger.fail.fee = true;
    let client = client(ledger);

    let secret = SecretSeed::parse(MASTER_SECRET).unwrap();
    let err = client.revocation().execute(&a1, secret).await.unwrap_err();

    assert_eq!(err.kind, RevocationErrorKind::Submission);
    assert_eq!(client.ledger().calls(), vec![Call::Load, Call::Fee]);
}

#[tokio::test]
async fn test_revoke_invalid_input_makes_no_call() {
    let (ledger, a1, _) = delegated_ledger();
    let client = client(ledger);

    let err = client
        .revocation()
        .execute_str(&a1.to_string(), "SNOTASECRET")
        .await
        .unwrap_err();
    assert_eq!(err.kind, RevocationErrorKind::Validation);
    assert_eq!(err.message, "Master key is invalid.");

    let err = client
        .revocation()
        .execute_str("", MASTER_SECRET)
        .await
        .unwrap_err();
    assert_eq!(err.kind, RevocationErrorKind::Validation);
    assert_eq!(err.message, "Account ID is required.");

    assert!(client.ledger().calls().is_empty());
}

#[tokio::test]
async fn test_revoke_on_wrong_network_is_bad_auth() {
    let (ledger, a1, _) = delegated_ledger();
    // Ledger expects mainnet; the client signs for testnet.
    let client = RevokeClient::with_ledger(resolve_network(NetworkId::Testnet), ledger);

    let secret = SecretSeed::parse(MASTER_SECRET).unwrap();
    let err = client.revocation().execute(&a1, secret).await.unwrap_err();
    assert_eq!(err.kind, RevocationErrorKind::BadAuth);
}

#[tokio::test]
async fn test_revoke_own_account_zeroes_master_weight() {
    let (ledger, _, _) = delegated_ledger();
    let client = client(ledger);
    let master = key(MASTER);

    let secret = SecretSeed::parse(MASTER_SECRET).unwrap();
    client.revocation().execute(&master, secret).await.unwrap();

    let own = client.ledger().account(&master).unwrap();
    assert_eq!(own.signer_weight(&master), Some(0));
}

#[tokio::test]
async fn test_host_account_fixture_is_loadable() {
    let host = key(HOST);
    let ledger = FakeLedger::new(&mainnet()).with_account(host, 41, &[(key(MASTER), 1)]);
    let client = client(ledger);

    let found = client.discovery().find(MASTER).await.unwrap();
    assert_eq!(found, vec![host]);
}
