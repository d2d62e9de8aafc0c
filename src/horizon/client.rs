//! Low-level Horizon HTTP client: `HorizonHttp`.
//!
//! One method per endpoint. Returns wire types. No retries: every request
//! is sent once and its outcome reported as-is.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::HttpError;
use crate::horizon::wire::{AccountRecord, FeeStats, Page, Problem, SubmitTransactionResponse};
use crate::horizon::LedgerApi;
use crate::shared::{AccountId, PublicKey};
use crate::tx::SignedTransaction;

/// Default per-request timeout. Submission blocks until the transaction is
/// included or Horizon gives up, so this is generous.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Low-level HTTP client for one Horizon instance.
#[derive(Clone)]
pub struct HorizonHttp {
    base_url: String,
    client: Client,
}

impl HorizonHttp {
    pub fn new(base_url: &str) -> Result<Self, HttpError> {
        Self::with_timeout(base_url, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, HttpError> {
        let client = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(4)
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Accounts ─────────────────────────────────────────────────────────

    pub async fn get_accounts_for_signer(
        &self,
        signer: &PublicKey,
        cursor: Option<&str>,
        limit: u32,
    ) -> Result<Page<AccountRecord>, HttpError> {
        let mut url = format!(
            "{}/accounts?signer={}&limit={}&order=asc",
            self.base_url, signer, limit
        );
        if let Some(c) = cursor {
            url = format!("{}&cursor={}", url, urlencoding::encode(c));
        }
        self.get(&url).await
    }

    pub async fn get_account(&self, account: &AccountId) -> Result<AccountRecord, HttpError> {
        let url = format!("{}/accounts/{}", self.base_url, account);
        self.get(&url).await
    }

    // ── Fees ─────────────────────────────────────────────────────────────

    pub async fn get_fee_stats(&self) -> Result<FeeStats, HttpError> {
        let url = format!("{}/fee_stats", self.base_url);
        self.get(&url).await
    }

    // ── Transactions ─────────────────────────────────────────────────────

    pub async fn post_transaction(
        &self,
        envelope_base64: &str,
    ) -> Result<SubmitTransactionResponse, HttpError> {
        let url = format!("{}/transactions", self.base_url);
        let body = format!("tx={}", urlencoding::encode(envelope_base64));
        let resp = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await?;
        Self::parse_response(resp).await
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, HttpError> {
        tracing::debug!(url, "GET");
        let resp = self.client.get(url).send().await?;
        Self::parse_response(resp).await
    }

    async fn parse_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, HttpError> {
        let status = resp.status();

        if status.is_success() {
            let body = resp.text().await?;
            return serde_json::from_str(&body).map_err(|e| HttpError::Decode(e.to_string()));
        }

        let status_code = status.as_u16();
        let body_text = resp.text().await.unwrap_or_default();
        let problem: Problem = serde_json::from_str(&body_text).unwrap_or_default();

        if let Some(codes) = problem.result_codes() {
            return Err(HttpError::TransactionFailed {
                status: status_code,
                result_codes: codes.clone(),
            });
        }

        let detail = if problem == Problem::default() {
            body_text
        } else {
            problem.message()
        };

        match status_code {
            404 => Err(HttpError::NotFound(detail)),
            429 => Err(HttpError::RateLimited),
            504 => Err(HttpError::Timeout),
            400..=499 => Err(HttpError::BadRequest(detail)),
            _ => Err(HttpError::ServerError {
                status: status_code,
                body: detail,
            }),
        }
    }
}

#[async_trait]
impl LedgerApi for HorizonHttp {
    async fn accounts_for_signer(
        &self,
        signer: &PublicKey,
        cursor: Option<&str>,
        limit: u32,
    ) -> Result<Vec<AccountRecord>, HttpError> {
        Ok(self
            .get_accounts_for_signer(signer, cursor, limit)
            .await?
            .into_records())
    }

    async fn load_account(&self, account: &AccountId) -> Result<AccountRecord, HttpError> {
        self.get_account(account).await
    }

    async fn fetch_base_fee(&self) -> Result<u32, HttpError> {
        Ok(self.get_fee_stats().await?.base_fee())
    }

    async fn submit_transaction(
        &self,
        tx: &SignedTransaction,
    ) -> Result<SubmitTransactionResponse, HttpError> {
        self.post_transaction(&tx.to_envelope_base64()).await
    }
}
