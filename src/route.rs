use std::sync::Arc;

use axum::{
    http::{
        header::{ACCEPT, CONTENT_TYPE},
        HeaderValue, Method,
    },
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeFile,
    trace::TraceLayer,
};

use crate::{config::Config, handler::*, AppState};

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let cors = cors_layer(&app_state.config);

    Router::new()
        .route("/readiness", get(readiness))
        .route("/add-expense", post(add_expense))
        .route("/get-expenses", get(get_expenses))
        .route("/update-expense", put(update_expense))
        .route("/delete-expense", delete(delete_expense))
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

// The GUI service has a single page and no state
pub fn create_gui_router(config: &Config) -> Router {
    Router::new()
        .route_service("/", ServeFile::new(&config.gui_page))
        .layer(TraceLayer::new_for_http())
}

// The GUI page is served from another port, so the browser needs CORS
fn cors_layer(config: &Config) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([ACCEPT, CONTENT_TYPE]);

    match config
        .cors_allowed_origin
        .as_deref()
        .map(str::parse::<HeaderValue>)
    {
        Some(Ok(origin)) => cors.allow_origin(origin),
        _ => cors.allow_origin(Any),
    }
}
