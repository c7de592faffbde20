//! Show what the anchor supports

use anyhow::Result;
use colored::Colorize;

use sep6_client::Sep6Client;

pub async fn run(client: &Sep6Client) -> Result<()> {
    let info = client.get_info().await?;

    println!();
    println!("{}", "Anchor".yellow().bold());
    println!("  URL:          {}", client.anchor_url());
    println!("  Signing key:  {}", client.signing_key());
    println!();

    println!("{}:", "Deposit".cyan());
    let mut deposits: Vec<_> = info.deposit.iter().collect();
    deposits.sort_by(|a, b| a.0.cmp(b.0));
    if deposits.is_empty() {
        println!("  {}", "none".dimmed());
    }
    for (code, asset) in deposits {
        if asset.enabled {
            println!(
                "  {} {} (min {}, max {})",
                code.green(),
                "enabled".green(),
                asset.min_amount,
                asset.max_amount
            );
        } else {
            println!("  {} {}", code, "disabled".red());
        }
    }
    println!();

    println!("{}:", "Withdraw".cyan());
    let mut withdrawals: Vec<_> = info.withdraw.iter().collect();
    withdrawals.sort_by(|a, b| a.0.cmp(b.0));
    if withdrawals.is_empty() {
        println!("  {}", "none".dimmed());
    }
    for (code, details) in withdrawals {
        if details.asset.enabled {
            let mut types: Vec<_> = details.types.keys().map(String::as_str).collect();
            types.sort_unstable();
            println!("  {} {} [{}]", code.green(), "enabled".green(), types.join(", "));
        } else {
            println!("  {} {}", code, "disabled".red());
        }
    }
    println!();

    println!("{}:", "Endpoints".cyan());
    println!("  /transaction:  {}", on_off(info.transaction.enabled));
    println!("  /transactions: {}", on_off(info.transactions.enabled));
    println!("  /fee:          {}", on_off(info.fee.enabled));

    Ok(())
}

fn on_off(enabled: bool) -> colored::ColoredString {
    if enabled {
        "enabled".green()
    } else {
        "disabled".dimmed()
    }
}
