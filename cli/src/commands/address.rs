//! Display the wallet address

use anyhow::{Context, Result};
use colored::Colorize;
use zeroize::Zeroize;

use sep6_client::keys::WalletKeys;

pub fn run(mut secret_key: String) -> Result<()> {
    let wallet = WalletKeys::from_secret_seed(&secret_key);
    secret_key.zeroize();
    let wallet = wallet.context("Failed to read wallet secret seed")?;

    println!();
    println!("{}", "Your Wallet Address".yellow().bold());
    println!();
    println!("{}", wallet.address());
    println!();
    println!(
        "{}",
        "Anchors send deposits to this account unless --account is given.".dimmed()
    );

    Ok(())
}
