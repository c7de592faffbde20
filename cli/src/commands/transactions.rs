//! List transactions for an asset

use anyhow::Result;
use colored::Colorize;

use sep6_client::{Order, Sep6Client};

use super::print_transaction;

pub struct ListOptions {
    pub asset: String,
    /// Defaults to the wallet address
    pub account: Option<String>,
    pub memo: Option<u64>,
    pub limit: Option<u32>,
    pub order: Option<Order>,
}

pub async fn run(client: &Sep6Client, options: ListOptions) -> Result<()> {
    let account = options
        .account
        .unwrap_or_else(|| client.address().to_string());

    let transactions = client
        .get_transactions(
            &account,
            options.memo,
            &options.asset,
            options.limit,
            options.order,
        )
        .await?;

    println!();
    println!(
        "{} {} for {}",
        transactions.len().to_string().yellow().bold(),
        "transaction(s)".yellow().bold(),
        account.dimmed()
    );
    println!();

    for tx in &transactions {
        print_transaction(tx);
    }

    Ok(())
}
