//! Expense tracking REST API backed by SQLite, plus the static page that
//! drives it.

pub mod config;
pub mod db;
pub mod error;
pub mod handler;
pub mod model;
pub mod route;
pub mod schema;
pub mod store;

use tracing_subscriber::EnvFilter;

use crate::{config::Config, store::ExpenseStore};

// Struct representing the application state
#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    pub store: ExpenseStore,
}

impl AppState {
    pub fn new(config: Config, store: ExpenseStore) -> Self {
        Self { config, store }
    }
}

/// Install the log subscriber for a binary. `RUST_LOG` wins over `default`.
pub fn init_tracing(default: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Resolves on Ctrl-C.
pub async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
