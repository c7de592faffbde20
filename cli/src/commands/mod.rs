//! CLI subcommands

pub mod address;
pub mod deposit;
pub mod info;
pub mod listen;
pub mod transaction;
pub mod transactions;

use anyhow::{Context, Result};
use colored::Colorize;

use sep6_client::{Sep6Client, Transaction};

use crate::config::{self, FileConfig, Overrides};

/// Resolve settings and the secret, then load the anchor's signing key
pub async fn connect(file: &FileConfig, overrides: &Overrides) -> Result<Sep6Client> {
    let settings = config::resolve_settings(file, overrides)?;
    let secret = config::load_secret(file)?;

    Sep6Client::new(settings.client_config(secret))
        .await
        .with_context(|| format!("Failed to connect to anchor at {}", settings.anchor_url))
}

/// One-line status summary
pub(crate) fn print_transaction(tx: &Transaction) {
    let status = match tx.status.as_str() {
        "completed" => tx.status.green(),
        "error" | "expired" | "no_market" | "too_small" | "too_large" => tx.status.red(),
        _ => tx.status.yellow(),
    };
    println!("  {} {} [{}]", tx.id.cyan(), tx.kind.dimmed(), status);

    if let Some(amount_in) = &tx.amount_in {
        println!("    Amount in:  {}", amount_in);
    }
    if let Some(amount_out) = &tx.amount_out {
        println!("    Amount out: {}", amount_out);
    }
    if let Some(fee) = &tx.amount_fee {
        println!("    Fee:        {}", fee);
    }
    if let Some(url) = &tx.more_info_url {
        println!("    More info:  {}", url.dimmed());
    }
}
