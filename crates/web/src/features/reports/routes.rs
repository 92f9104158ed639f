use axum::{Router, routing::get};

use crate::state::AppState;

use super::handlers::{get_report, update_report};

pub fn routes() -> Router<AppState> {
    Router::new().route("/:owner/:name", get(get_report).put(update_report))
}
