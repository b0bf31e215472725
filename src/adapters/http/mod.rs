pub mod routes;
pub mod state;

use axum::{routing::{get, post}, Router};
use crate::adapters::http::state::HttpState;

pub fn router(state: HttpState) -> Router {
    Router::new()
        .route("/api/config", get(routes::get_config))
        .route("/api/analyze", post(routes::analyze))
        .with_state(state)
}
