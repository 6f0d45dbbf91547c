//! commentd - A Comment Resource API
//!
//! This is the main entry point for the commentd server.
//! It parses configuration, sets up logging and the document store, and
//! serves the comment API until Ctrl+C.

use anyhow::Context;
use clap::Parser;
use commentd::server::{build_app, serve, RequestStats};
use commentd::store::MemoryStore;
use commentd::Config;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn print_banner(config: &Config) {
    println!(
        r#"
commentd v{} - Comment Resource API
──────────────────────────────────────────────────────────────
Server started on http://{}{}
Ready to accept requests.

Use Ctrl+C to shutdown gracefully.
"#,
        commentd::VERSION,
        config.bind_address(),
        config.mount
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command-line arguments and environment
    let config = Config::parse();

    // Set up logging
    let filter = EnvFilter::try_new(&config.log_level)
        .with_context(|| format!("invalid log filter {:?}", config.log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    // Create the document store (shared across all requests)
    let store = Arc::new(MemoryStore::new());
    info!("In-memory document store initialized");

    let stats = Arc::new(RequestStats::new());
    let app = build_app(store.clone(), &config.mount, Arc::clone(&stats));

    // Bind the TCP listener
    let listener = TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_address()))?;

    print_banner(&config);

    // Set up graceful shutdown
    let shutdown = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Shutdown signal received, stopping server...");
    };

    serve(listener, app, shutdown).await?;

    let store_stats = store.stats();
    info!(
        requests = stats.requests(),
        server_errors = stats.server_errors(),
        documents = store_stats.documents,
        finds = store_stats.finds,
        inserts = store_stats.inserts,
        updates = store_stats.updates,
        deletes = store_stats.deletes,
        "Server shutdown complete"
    );
    Ok(())
}
