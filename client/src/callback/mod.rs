//! Inbound status callbacks
//!
//! Every request runs the full check chain on its own task:
//! header selection, parse, freshness, canonical payload, signature,
//! then body decode. Only a verified update reaches the worker pool, and
//! the HTTP answer never waits on the handler.

pub mod pool;
pub mod stats;

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::json;

use crate::error::{DispatchError, VerificationError};
use crate::types::TransactionResponse;
use crate::webhook::{
    select_signature_header, WebhookVerifier, LEGACY_SIGNATURE_HEADER, SIGNATURE_HEADER,
};

pub use pool::{DispatchPool, OverflowPolicy, PoolConfig, TransactionHandler};
pub use stats::{DispatchStats, StatsSnapshot};

/// Terminal state of one callback
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackOutcome {
    /// Verified, decoded and queued for the handler
    Dispatched { transaction_id: String },
    /// Verified, but the body is not a transaction envelope; nothing dispatched
    Undecodable,
    /// Failed verification
    Rejected(VerificationError),
    /// Verified and decoded, but the pool would not take it
    Overflowed(DispatchError),
}

impl IntoResponse for CallbackOutcome {
    fn into_response(self) -> Response {
        match self {
            CallbackOutcome::Dispatched { .. } | CallbackOutcome::Undecodable => {
                (StatusCode::OK, Json(json!({}))).into_response()
            }
            CallbackOutcome::Rejected(err) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": err.to_string() }))).into_response()
            }
            CallbackOutcome::Overflowed(err) => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "error": err.to_string() })),
            )
                .into_response(),
        }
    }
}

/// Verifies callbacks and hands accepted updates to the pool
pub struct CallbackDispatcher {
    verifier: Arc<WebhookVerifier>,
    pool: DispatchPool,
    stats: Arc<DispatchStats>,
}

impl CallbackDispatcher {
    /// Start a dispatcher and its workers. Must be called inside a tokio runtime.
    pub fn new(
        verifier: Arc<WebhookVerifier>,
        handler: Arc<dyn TransactionHandler>,
        config: PoolConfig,
    ) -> Self {
        let stats = Arc::new(DispatchStats::default());
        let pool = DispatchPool::start(handler, config, stats.clone());
        Self {
            verifier,
            pool,
            stats,
        }
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    pub fn verifier(&self) -> &WebhookVerifier {
        &self.verifier
    }

    /// Process one callback from its headers and raw body bytes
    pub async fn process(&self, headers: &HeaderMap, body: &[u8]) -> CallbackOutcome {
        let verified =
            read_signature_header(headers).and_then(|header| self.verifier.verify(header, body));

        let signed = match verified {
            Ok(signed) => signed,
            Err(err) => {
                self.stats.record_rejected();
                tracing::warn!(reason = err.reason(), error = %err, "Rejected anchor callback");
                return CallbackOutcome::Rejected(err);
            }
        };
        self.stats.record_accepted();

        let envelope: TransactionResponse = match serde_json::from_slice(body) {
            Ok(envelope) => envelope,
            Err(e) => {
                self.stats.record_undecodable();
                tracing::warn!(
                    timestamp = signed.timestamp,
                    error = %e,
                    "Verified callback body is not a transaction update; not dispatched"
                );
                return CallbackOutcome::Undecodable;
            }
        };

        let update = envelope.transaction;
        let transaction_id = update.id.clone();
        let status = update.status.clone();

        match self.pool.submit(update).await {
            Ok(()) => {
                self.stats.record_dispatched();
                tracing::info!(
                    transaction_id = %transaction_id,
                    status = %status,
                    "Dispatched transaction update"
                );
                CallbackOutcome::Dispatched { transaction_id }
            }
            Err(err) => {
                self.stats.record_overflowed();
                tracing::error!(
                    transaction_id = %transaction_id,
                    error = %err,
                    "Could not queue transaction update"
                );
                CallbackOutcome::Overflowed(err)
            }
        }
    }

    /// Router serving `POST path` with this dispatcher
    pub fn into_router(self: Arc<Self>, path: &str) -> Router {
        Router::new()
            .route(path, post(handle_callback))
            .with_state(self)
    }
}

/// The header value to verify
///
/// A `Signature` header that is present but not visible ASCII is malformed;
/// it does not fall through to `X-Stellar-Signature`.
fn read_signature_header(headers: &HeaderMap) -> Result<&str, VerificationError> {
    let primary = headers
        .get(SIGNATURE_HEADER)
        .map(|v| {
            v.to_str()
                .map_err(|_| VerificationError::MalformedHeader("signature header is not visible ASCII"))
        })
        .transpose()?;
    let legacy = headers
        .get(LEGACY_SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok());

    select_signature_header(primary, legacy)
        .ok_or(VerificationError::MalformedHeader("no signature header provided"))
}

async fn handle_callback(
    State(dispatcher): State<Arc<CallbackDispatcher>>,
    headers: HeaderMap,
    body: Bytes,
) -> CallbackOutcome {
    dispatcher.process(&headers, &body).await
}
