//! Serve the callback endpoint

use std::sync::Arc;

use anyhow::{Context, Result};
use colored::Colorize;

use sep6_client::validation::normalize_route_path;
use sep6_client::{Sep6Client, Transaction};

use crate::config::WebhookConfig;

use super::print_transaction;

pub async fn run(
    client: &Sep6Client,
    webhook: &WebhookConfig,
    listen: Option<String>,
    path: Option<String>,
) -> Result<()> {
    let addr = listen.unwrap_or_else(|| webhook.listen.clone());
    let path = normalize_route_path(path.as_deref().unwrap_or(&webhook.path))?;

    let handler = |update: Transaction| async move {
        println!("{}", "Verified status update".green().bold());
        print_transaction(&update);
        Ok::<(), anyhow::Error>(())
    };
    let dispatcher = client.callback_dispatcher(Arc::new(handler), webhook.pool_config());
    let router = dispatcher.clone().into_router(&path);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    println!();
    println!("{}", "Listening for anchor callbacks".yellow().bold());
    println!("  Endpoint:    POST http://{}{}", addr, path);
    println!("  Anchor key:  {}", client.signing_key());
    println!("  Home domain: {}", client.home_domain());
    println!("  Window:      {}s", client.verifier().freshness().max_age().as_secs());
    println!();
    println!("{}", "Press Ctrl+C to stop.".dimmed());

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Callback server failed")?;

    let stats = dispatcher.stats();
    println!();
    println!("{}:", "Callbacks".cyan());
    println!("  Accepted:    {}", stats.accepted);
    println!("  Rejected:    {}", stats.rejected);
    println!("  Undecodable: {}", stats.undecodable);
    println!("  Dispatched:  {}", stats.dispatched);
    println!("  Overflowed:  {}", stats.overflowed);
    println!("  Failed:      {}", stats.handler_failures);

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Could not listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}
