use std::sync::Arc;

use axum::Server;
use tracing::{error, info};

use expense_tracker::{
    config::Config, db::Database, init_tracing, route::create_router, shutdown_signal,
    store::ExpenseStore, AppState,
};

// Entry point of the expense API service
#[tokio::main]
async fn main() {
    // .env feeds both RUST_LOG and Config::load
    dotenv::dotenv().ok();
    init_tracing("expense_tracker=info,tower_http=info");

    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            error!("Failed to load configuration: {}", err);
            std::process::exit(1);
        }
    };

    let addr = match config.api_addr() {
        Ok(addr) => addr,
        Err(err) => {
            error!("{}", err);
            std::process::exit(1);
        }
    };

    let db = match Database::new(&config) {
        Ok(db) => db,
        Err(err) => {
            error!("Invalid DATABASE_URL: {}", err);
            std::process::exit(1);
        }
    };

    // Waits for the store the same way requests do
    if config.db_bootstrap_schema {
        match db.bootstrap().await {
            Ok(()) => info!("Connected to the database successfully!"),
            Err(err) => {
                error!("Failed to prepare the database: {}", err);
                std::process::exit(1);
            }
        }
    }

    if db.is_pooled() {
        info!(size = ?config.db_pool_size, "using a connection pool");
    } else {
        info!("opening one database connection per request");
    }

    let app_state = Arc::new(AppState::new(config, ExpenseStore::new(db)));
    let app = create_router(app_state);

    info!("Expense service is running on {}", addr);

    if let Err(err) = Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", err);
        std::process::exit(1);
    }
}
