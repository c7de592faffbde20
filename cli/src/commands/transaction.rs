//! Show one transaction

use anyhow::Result;
use colored::Colorize;

use sep6_client::Sep6Client;

use super::print_transaction;

pub async fn run(client: &Sep6Client, id: &str) -> Result<()> {
    let tx = client.get_transaction(id).await?;

    println!();
    println!("{}", "Transaction".yellow().bold());
    print_transaction(&tx);

    if let Some(started) = &tx.started_at {
        println!("    Started:    {}", started);
    }
    if let Some(completed) = &tx.completed_at {
        println!("    Completed:  {}", completed);
    }
    if let Some(hash) = &tx.stellar_transaction_id {
        println!("    Stellar tx: {}", hash);
    }
    if let Some(external) = &tx.external_transaction_id {
        println!("    External:   {}", external);
    }

    Ok(())
}
