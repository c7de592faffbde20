//! Bounded worker pool for verified transaction updates
//!
//! Updates go through a bounded queue drained by a fixed set of workers.
//! Each handler call runs in its own task so a panic only loses that update.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::sync::Mutex;

use super::stats::DispatchStats;
use crate::error::DispatchError;
use crate::types::Transaction;

pub const DEFAULT_WORKERS: usize = 4;
pub const DEFAULT_QUEUE_CAPACITY: usize = 256;

/// Application logic run for every accepted transaction update
#[async_trait]
pub trait TransactionHandler: Send + Sync + 'static {
    async fn handle(&self, update: Transaction) -> anyhow::Result<()>;
}

#[async_trait]
impl<F, Fut> TransactionHandler for F
where
    F: Fn(Transaction) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    async fn handle(&self, update: Transaction) -> anyhow::Result<()> {
        (self)(update).await
    }
}

/// What `submit` does when the queue is full
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverflowPolicy {
    /// Fail immediately with `DispatchError::QueueFull`
    #[default]
    Reject,
    /// Wait for a free slot
    Block,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    pub workers: usize,
    pub queue_capacity: usize,
    pub overflow: OverflowPolicy,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            overflow: OverflowPolicy::Reject,
        }
    }
}

/// Handle to the running workers; dropping it lets them drain and exit
pub struct DispatchPool {
    tx: mpsc::Sender<Transaction>,
    overflow: OverflowPolicy,
}

impl DispatchPool {
    /// Spawn the workers. Must be called inside a tokio runtime.
    pub fn start(
        handler: Arc<dyn TransactionHandler>,
        config: PoolConfig,
        stats: Arc<DispatchStats>,
    ) -> Self {
        let (tx, rx) = mpsc::channel(config.queue_capacity.max(1));
        let rx = Arc::new(Mutex::new(rx));

        for worker_id in 0..config.workers.max(1) {
            tokio::spawn(run_worker(worker_id, rx.clone(), handler.clone(), stats.clone()));
        }

        tracing::debug!(
            workers = config.workers.max(1),
            queue_capacity = config.queue_capacity.max(1),
            overflow = ?config.overflow,
            "Dispatch pool started"
        );

        Self {
            tx,
            overflow: config.overflow,
        }
    }

    /// Queue an update for the handler
    pub async fn submit(&self, update: Transaction) -> Result<(), DispatchError> {
        match self.overflow {
            OverflowPolicy::Reject => self.tx.try_send(update).map_err(|e| match e {
                TrySendError::Full(_) => DispatchError::QueueFull,
                TrySendError::Closed(_) => DispatchError::Closed,
            }),
            OverflowPolicy::Block => self
                .tx
                .send(update)
                .await
                .map_err(|_| DispatchError::Closed),
        }
    }
}

async fn run_worker(
    worker_id: usize,
    rx: Arc<Mutex<mpsc::Receiver<Transaction>>>,
    handler: Arc<dyn TransactionHandler>,
    stats: Arc<DispatchStats>,
) {
    loop {
        let next = {
            let mut rx = rx.lock().await;
            rx.recv().await
        };
        let Some(update) = next else {
            break;
        };

        let transaction_id = update.id.clone();
        let handler = handler.clone();
        match tokio::spawn(async move { handler.handle(update).await }).await {
            Ok(Ok(())) => {
                tracing::debug!(worker_id, transaction_id = %transaction_id, "Handler completed");
            }
            Ok(Err(e)) => {
                stats.record_handler_failure();
                tracing::warn!(worker_id, transaction_id = %transaction_id, error = %e, "Handler failed");
            }
            Err(e) => {
                stats.record_handler_failure();
                tracing::error!(worker_id, transaction_id = %transaction_id, error = %e, "Handler panicked");
            }
        }
    }

    tracing::debug!(worker_id, "Dispatch worker stopped");
}
