pub mod health;
pub mod ui;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(ui::index_handler))
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/cold-emails",
            post(handlers::handle_generate_cold_email),
        )
        .with_state(state)
}
