use axum::Server;
use tracing::{error, info};

use expense_tracker::{config::Config, init_tracing, route::create_gui_router, shutdown_signal};

// Entry point of the GUI service: one static page on GET /
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

    let addr = match config.gui_addr() {
        Ok(addr) => addr,
        Err(err) => {
            error!("{}", err);
            std::process::exit(1);
        }
    };

    if !config.gui_page.exists() {
        error!("GUI page {} does not exist", config.gui_page.display());
    }

    let app = create_gui_router(&config);

    info!("GUI service is running on {}", addr);

    if let Err(err) = Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", err);
        std::process::exit(1);
    }
}
