//! Request deposit instructions

use anyhow::Result;
use colored::Colorize;

use sep6_client::Sep6Client;

pub struct DepositOptions {
    pub asset: String,
    pub amount: f32,
    pub memo: u64,
    /// Defaults to the wallet address
    pub account: Option<String>,
    pub callback: Option<String>,
}

pub async fn run(client: &Sep6Client, options: DepositOptions) -> Result<()> {
    let account = options
        .account
        .unwrap_or_else(|| client.address().to_string());

    println!(
        "{}",
        format!("Requesting {} {} deposit...", options.amount, options.asset).cyan()
    );

    let deposit = client
        .create_deposit(
            &options.asset,
            options.amount,
            options.memo,
            &account,
            options.callback.as_deref(),
        )
        .await?;

    println!();
    println!("{}", "Deposit Instructions".yellow().bold());
    println!();
    if !deposit.id.is_empty() {
        println!("  Transaction: {}", deposit.id.cyan());
    }
    if !deposit.how.is_empty() {
        println!("  How:         {}", deposit.how);
    }
    if let Some(eta) = deposit.eta {
        println!("  ETA:         {}s", eta);
    }
    if let Some(fee) = &deposit.fee_fixed {
        println!("  Fixed fee:   {}", fee);
    }
    if let Some(fee) = deposit.fee_percent {
        println!("  Fee:         {}%", fee);
    }

    let mut instructions: Vec<_> = deposit.instructions.iter().collect();
    instructions.sort_by(|a, b| a.0.cmp(b.0));
    for (name, field) in instructions {
        println!("  {}: {}", name.cyan(), field.value.green());
        if !field.description.is_empty() {
            println!("    {}", field.description.dimmed());
        }
    }

    if options.callback.is_none() {
        println!();
        println!(
            "{}",
            "No --callback given; poll with 'sep6 transaction <id>' for updates.".dimmed()
        );
    }

    Ok(())
}
