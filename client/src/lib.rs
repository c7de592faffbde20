//! SEP-6 client - deposits and withdrawals against a Stellar anchor
//!
//! Two halves:
//! - [`Sep6Client`] talks to the anchor's REST API (`/info`, `/deposit`,
//!   `/transaction(s)`) and loads its signing key from `stellar.toml`.
//! - [`callback`] serves the anchor's status callbacks, accepting an update
//!   only after [`webhook::WebhookVerifier`] has checked its signature and
//!   freshness, then handing it to application code off the request path.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use sep6_client::{ClientConfig, PoolConfig, Sep6Client, Transaction};
//!
//! let client = Sep6Client::new(ClientConfig::new(
//!     secret_seed,
//!     "https://anchor.example.com/sep6",
//!     "https://horizon.stellar.org",
//!     "wallet.example.com",
//! ))
//! .await?;
//!
//! let router = client.callback_router(
//!     "/webhook",
//!     Arc::new(|update: Transaction| async move {
//!         println!("{} is now {}", update.id, update.status);
//!         Ok(())
//!     }),
//!     PoolConfig::default(),
//! )?;
//! ```

pub mod callback;
pub mod client;
pub mod discovery;
pub mod error;
pub mod keys;
pub mod types;
pub mod validation;
pub mod webhook;

#[cfg(test)]
mod test_support;

#[cfg(test)]
mod tests;

#[cfg(test)]
mod test_vectors;



pub use callback::{
    CallbackDispatcher, CallbackOutcome, DispatchStats, OverflowPolicy, PoolConfig, StatsSnapshot,
    TransactionHandler,
};
pub use client::{ClientConfig, Sep6Client, DEFAULT_TRANSACTIONS_LIMIT};
pub use error::{DispatchError, Result, Sep6Error, VerificationError};
pub use types::{DepositResponse, InfoResponse, Order, Transaction, TransactionResponse};
pub use webhook::{FreshnessPolicy, WebhookVerifier};
