//! Live tests against the public testnet Horizon.
//!
//! All tests are `#[ignore]` because they require network access. None of
//! them submits a transaction.
//!
//! Run with:
//! ```bash
//! cargo test --test testnet_integration -- --ignored
//! ```

use std::time::Duration;

use sdp_revoke::prelude::*;

/// A key that is never funded, so no account lists it as a signer.
const UNUSED_KEY: &str = "GB43KVROR7TFJ6KAPCYRF2FJROTZAH4FHLTJLPWX4DRZCC5NASLGITR6";
const UNUSED_SECRET: &str = "SAAQEAYEAUDAOCAJBIFQYDIOB4IBCEQTCQKRMFYYDENBWHA5DYPSBF5K";

fn testnet_client() -> HorizonRevokeClient {
    HorizonRevokeClient::builder()
        .network(NetworkId::Testnet)
        .request_timeout(Duration::from_secs(20))
        .build()
        .expect("client should build")
}

#[tokio::test]
#[ignore]
async fn test_fee_stats_live() {
    let client = testnet_client();
    let fee = client.ledger().fetch_base_fee().await.expect("fee_stats");
    assert!(fee >= 100, "base fee below protocol minimum: {fee}");
}

#[tokio::test]
#[ignore]
async fn test_find_unused_key_is_empty() {
    let client = testnet_client();
    let found = client
        .discovery()
        .find(UNUSED_KEY)
        .await
        .expect("discovery should succeed");
    assert!(found.is_empty(), "unexpected accounts: {found:?}");
}

#[tokio::test]
#[ignore]
async fn test_revoke_missing_account_is_account_load() {
    let client = testnet_client();
    let target: AccountId = UNUSED_KEY.parse().unwrap();
    let secret = SecretSeed::parse(UNUSED_SECRET).unwrap();

    let err = client
        .revocation()
        .execute(&target, secret)
        .await
        .expect_err("unfunded account must not load");
    assert_eq!(err.kind, RevocationErrorKind::AccountLoad);
}
