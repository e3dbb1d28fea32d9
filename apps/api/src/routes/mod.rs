pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/business-data", post(handlers::handle_business_data))
        .route(
            "/regenerate-headline",
            get(handlers::handle_regenerate_headline),
        )
        .with_state(state)
}
