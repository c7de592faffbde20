//! sep6 CLI - query a SEP-6 anchor and receive its signed status callbacks

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sep6_client::Order;

mod commands;
mod config;


use commands::*;
use config::{FileConfig, Overrides};

#[derive(Parser)]
#[command(name = "sep6")]
#[command(version = "0.1.0")]
#[command(about = "SEP-6 wallet client for Stellar anchors")]
#[command(long_about = r#"
sep6 talks to a Stellar anchor's SEP-6 deposit/withdraw API and serves
the endpoint the anchor posts transaction status updates to. Every
update is checked against the anchor's SIGNING_KEY before it is shown.

Quick Start:
  1. sep6 info                                 List the anchor's assets
  2. sep6 deposit --asset USDC --amount 10 --memo 1 --callback <url>
  3. sep6 listen                               Receive signed status updates
  4. sep6 transaction <id>                     Check a transaction
"#)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the config file (default: $SEP6_CONFIG, then ~/.sep6/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Anchor base URL
    #[arg(long, global = true)]
    anchor_url: Option<String>,

    /// This wallet's home domain, as the anchor signs it into callbacks
    #[arg(long, global = true)]
    home_domain: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the wallet address derived from the secret seed
    Address,

    /// Show the anchor's enabled deposit and withdraw assets
    Info,

    /// List transactions for an asset
    Transactions {
        /// Asset code, e.g. USDC
        #[arg(short, long)]
        asset: String,

        /// Account to list (default: this wallet)
        #[arg(long)]
        account: Option<String>,

        /// Memo identifying a sub-account
        #[arg(long)]
        memo: Option<u64>,

        /// Page size
        #[arg(short, long)]
        limit: Option<u32>,

        /// Sort order: asc or desc
        #[arg(long)]
        order: Option<Order>,
    },

    /// Show one transaction
    Transaction {
        /// Anchor transaction id
        id: String,
    },

    /// Request deposit instructions
    Deposit {
        /// Asset code, e.g. USDC
        #[arg(short, long)]
        asset: String,

        /// Amount to deposit
        #[arg(long)]
        amount: f32,

        /// Id memo the anchor attaches to the payment
        #[arg(short, long)]
        memo: u64,

        /// Receiving account (default: this wallet)
        #[arg(long)]
        account: Option<String>,

        /// URL the anchor posts status updates to
        #[arg(long)]
        callback: Option<String>,
    },

    /// Serve the callback endpoint and print verified updates
    Listen {
        /// Socket address to bind (default from [webhook] listen)
        #[arg(long)]
        listen: Option<String>,

        /// Route path (default from [webhook] path)
        #[arg(long)]
        path: Option<String>,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config_path = config::resolve_config_path(
        cli.config.as_deref(),
        std::env::var_os(config::CONFIG_ENV),
        config::default_config_path().ok(),
    )?;
    let file = match &config_path {
        Some(path) => config::load_config(path)?,
        None => FileConfig::default(),
    };
    let overrides = Overrides {
        anchor_url: cli.anchor_url,
        home_domain: cli.home_domain,
    };

    match cli.command {
        Commands::Address => {
            address::run(config::load_secret(&file)?)?;
        }
        Commands::Info => {
            let client = connect(&file, &overrides).await?;
            info::run(&client).await?;
        }
        Commands::Transactions { asset, account, memo, limit, order } => {
            let client = connect(&file, &overrides).await?;
            transactions::run(
                &client,
                transactions::ListOptions {
                    asset,
                    account,
                    memo,
                    limit,
                    order,
                },
            )
            .await?;
        }
        Commands::Transaction { id } => {
            let client = connect(&file, &overrides).await?;
            transaction::run(&client, &id).await?;
        }
        Commands::Deposit { asset, amount, memo, account, callback } => {
            let client = connect(&file, &overrides).await?;
            deposit::run(
                &client,
                deposit::DepositOptions {
                    asset,
                    amount,
                    memo,
                    account,
                    callback,
                },
            )
            .await?;
        }
        Commands::Listen { listen: addr, path } => {
            let settings = config::resolve_settings(&file, &overrides)?;
            let client = connect(&file, &overrides).await?;
            listen::run(&client, &settings.webhook, addr, path).await?;
        }
    }

    Ok(())
}
