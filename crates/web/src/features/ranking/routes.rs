use axum::{Router, routing::get};

use crate::state::AppState;

use super::handlers::{download_csv, get_ranking};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/:program", get(get_ranking))
        .route("/:program/csv", get(download_csv))
}
