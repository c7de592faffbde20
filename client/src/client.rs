//! SEP-6 anchor client
//!
//! Outbound calls are single-shot GETs with no retry; the caller decides
//! what to do with a failure. The anchor's signing key is fetched once at
//! construction and backs every callback verification afterwards.

use std::sync::Arc;

use axum::Router;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::callback::{CallbackDispatcher, PoolConfig, TransactionHandler};
use crate::discovery::fetch_signing_key;
use crate::error::{Result, Sep6Error};
use crate::keys::{parse_account_id, WalletKeys};
use crate::types::{
    DepositResponse, ErrorResponse, InfoResponse, Order, Transaction, TransactionResponse,
    TransactionsResponse,
};
use crate::validation::{
    normalize_base_url, normalize_route_path, validate_amount, validate_not_empty,
};
use crate::webhook::{FreshnessPolicy, WebhookVerifier, DEFAULT_MAX_AGE_MINUTES};

/// Default page size for `GET /transactions`
pub const DEFAULT_TRANSACTIONS_LIMIT: u32 = 10;

/// Everything needed to build a [`Sep6Client`]
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ClientConfig {
    /// Wallet secret seed (`S...`); only used to derive the wallet address
    pub secret_key: String,
    /// Anchor base URL, e.g. `https://anchor.example.com/sep6`
    pub anchor_url: String,
    /// Horizon server URL
    pub horizon_url: String,
    /// This wallet's host, as the anchor signs it into callbacks
    pub home_domain: String,
    /// Callback freshness window
    pub max_age_minutes: u64,
}

impl ClientConfig {
    pub fn new(
        secret_key: impl Into<String>,
        anchor_url: impl Into<String>,
        horizon_url: impl Into<String>,
        home_domain: impl Into<String>,
    ) -> Self {
        Self {
            secret_key: secret_key.into(),
            anchor_url: anchor_url.into(),
            horizon_url: horizon_url.into(),
            home_domain: home_domain.into(),
            max_age_minutes: DEFAULT_MAX_AGE_MINUTES,
        }
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("anchor_url", &self.anchor_url)
            .field("horizon_url", &self.horizon_url)
            .field("home_domain", &self.home_domain)
            .field("max_age_minutes", &self.max_age_minutes)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub struct Sep6Client {
    http: reqwest::Client,
    anchor_url: String,
    horizon_url: String,
    wallet: WalletKeys,
    verifier: Arc<WebhookVerifier>,
}

impl Sep6Client {
    /// Validate the configuration and fetch the anchor's signing key
    pub async fn new(config: ClientConfig) -> Result<Self> {
        Self::with_http_client(config, reqwest::Client::new()).await
    }

    pub async fn with_http_client(config: ClientConfig, http: reqwest::Client) -> Result<Self> {
        let wallet = WalletKeys::from_secret_seed(&config.secret_key)?;
        let horizon_url = normalize_base_url("horizonServer", &config.horizon_url)?;
        let anchor_url = normalize_base_url("anchorUrl", &config.anchor_url)?;
        validate_not_empty(&[("homeDomain", config.home_domain.as_str())])?;

        let signing_key = fetch_signing_key(&http, &anchor_url).await.map_err(|e| {
            tracing::error!(anchor_url = %anchor_url, error = %e, "Could not load anchor signing key");
            Sep6Error::fetch("anchorUrl", "couldn't fetch Signing Key from stellar.toml")
        })?;
        parse_account_id(&signing_key).map_err(|e| Sep6Error::validation("SIGNING_KEY", e))?;

        let verifier = WebhookVerifier::new(signing_key, config.home_domain.clone())
            .with_freshness(FreshnessPolicy::from_minutes(config.max_age_minutes));

        tracing::info!(
            anchor_url = %anchor_url,
            address = %wallet.address(),
            "SEP-6 client ready"
        );

        Ok(Self {
            http,
            anchor_url,
            horizon_url,
            wallet,
            verifier: Arc::new(verifier),
        })
    }

    /// The wallet's public `G...` address
    pub fn address(&self) -> &str {
        self.wallet.address()
    }

    pub fn anchor_url(&self) -> &str {
        &self.anchor_url
    }

    pub fn horizon_url(&self) -> &str {
        &self.horizon_url
    }

    pub fn home_domain(&self) -> &str {
        self.verifier.home_domain()
    }

    /// The anchor's signing key, as published in its `stellar.toml`
    pub fn signing_key(&self) -> &str {
        self.verifier.signing_key()
    }

    pub fn verifier(&self) -> Arc<WebhookVerifier> {
        self.verifier.clone()
    }

    // ========================================================================
    // Outbound anchor API
    // ========================================================================

    /// `GET /info`
    pub async fn get_info(&self) -> Result<InfoResponse> {
        let url = self.endpoint("info", &[])?;
        self.send_request(url).await
    }

    /// `GET /transactions`
    ///
    /// With a memo the account is sent as `account:memo`.
    pub async fn get_transactions(
        &self,
        account: &str,
        memo: Option<u64>,
        asset_code: &str,
        limit: Option<u32>,
        order: Option<Order>,
    ) -> Result<Vec<Transaction>> {
        validate_not_empty(&[("account", account), ("asset_code", asset_code)])?;

        let account = match memo {
            Some(memo) => format!("{}:{}", account, memo),
            None => account.to_string(),
        };

        let mut params = vec![
            ("account", account),
            ("asset_code", asset_code.to_string()),
            ("limit", limit.unwrap_or(DEFAULT_TRANSACTIONS_LIMIT).to_string()),
        ];
        if let Some(order) = order {
            params.push(("order", order.as_str().to_string()));
        }

        let url = self.endpoint("transactions", &params)?;
        let resp: TransactionsResponse = self.send_request(url).await?;
        Ok(resp.transactions)
    }

    /// `GET /transaction?id=`
    pub async fn get_transaction(&self, transaction_id: &str) -> Result<Transaction> {
        validate_not_empty(&[("transactionID", transaction_id)])?;

        let url = self.endpoint("transaction", &[("id", transaction_id.to_string())])?;
        let resp: TransactionResponse = self.send_request(url).await?;
        Ok(resp.transaction)
    }

    /// `GET /deposit`, with an id memo and an optional status callback URL
    pub async fn create_deposit(
        &self,
        asset_code: &str,
        amount: f32,
        memo: u64,
        account: &str,
        on_change_callback: Option<&str>,
    ) -> Result<DepositResponse> {
        validate_not_empty(&[("assetCode", asset_code), ("account", account)])?;
        validate_amount(amount)?;

        let mut params = vec![
            ("asset_code", asset_code.to_string()),
            ("amount", format!("{:.6}", amount)),
            ("memo", memo.to_string()),
            ("memo_type", "id".to_string()),
            ("account", account.to_string()),
        ];
        if let Some(callback) = on_change_callback {
            params.push(("on_change_callback", callback.to_string()));
        }

        let url = self.endpoint("deposit", &params)?;
        self.send_request(url).await
    }

    // ========================================================================
    // Inbound callbacks
    // ========================================================================

    /// Start a dispatcher bound to this client's verifier
    pub fn callback_dispatcher(
        &self,
        handler: Arc<dyn TransactionHandler>,
        config: PoolConfig,
    ) -> Arc<CallbackDispatcher> {
        Arc::new(CallbackDispatcher::new(self.verifier.clone(), handler, config))
    }

    /// Router serving `POST path` for anchor status callbacks
    pub fn callback_router(
        &self,
        path: &str,
        handler: Arc<dyn TransactionHandler>,
        config: PoolConfig,
    ) -> Result<Router> {
        let path = normalize_route_path(path)?;
        Ok(self.callback_dispatcher(handler, config).into_router(&path))
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn endpoint(&self, path: &str, params: &[(&str, String)]) -> Result<Url> {
        let base = format!("{}/{}", self.anchor_url, path);
        let url = if params.is_empty() {
            Url::parse(&base)
        } else {
            Url::parse_with_params(&base, params)
        };
        url.map_err(|e| Sep6Error::fetch("URL", format!("Creating request failed: {}", e)))
    }

    async fn send_request<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        tracing::debug!(url = %url, "GET");

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| Sep6Error::fetch("Network", format!("Sending request failed: {}", e)))?;

        let status = resp.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(Sep6Error::fetch(
                "Rate Limit",
                "service has rate limited you, try again later",
            ));
        }
        if status != StatusCode::OK {
            let body = resp.text().await.unwrap_or_default();
            let detail = match serde_json::from_str::<ErrorResponse>(&body) {
                Ok(parsed) if !parsed.error.is_empty() => parsed.error,
                _ => body,
            };
            return Err(Sep6Error::fetch(
                "HTTP Response",
                format!("Received non-200 response ({}): {}", status.as_u16(), detail),
            ));
        }

        resp.json::<T>()
            .await
            .map_err(|e| Sep6Error::fetch("JSON Decode", format!("Decoding response failed: {}", e)))
    }
}
