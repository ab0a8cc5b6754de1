pub mod app_state;
pub mod config;
pub mod extractor;
pub mod fetcher;
pub mod health;
pub mod pop;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health::health_check))
        .route("/pop/{set_slug}", get(pop::handlers::get_pop_report))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
