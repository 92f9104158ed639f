use axum::{
    Json,
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use ranking::RankingTable;

use crate::error::{WebError, WebResult};
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/ranking/{program}",
    params(
        ("program" = String, Path, description = "Program name")
    ),
    responses(
        (status = 200, description = "Ranked leaderboard for the program", body = RankingTable),
        (status = 502, description = "Upstream fetch failed")
    ),
    tag = "ranking"
)]
pub async fn get_ranking(
    State(state): State<AppState>,
    Path(program): Path<String>,
) -> WebResult<Response> {
    let table = services::load_table(state.service.as_ref(), &program).await?;

    Ok(Json(table).into_response())
}

#[utoipa::path(
    get,
    path = "/api/ranking/{program}/csv",
    params(
        ("program" = String, Path, description = "Program name")
    ),
    responses(
        (status = 200, description = "Leaderboard as a CSV attachment", content_type = "text/csv"),
        (status = 502, description = "Upstream fetch failed")
    ),
    tag = "ranking"
)]
pub async fn download_csv(
    State(state): State<AppState>,
    Path(program): Path<String>,
) -> WebResult<Response> {
    let table = services::load_table(state.service.as_ref(), &program).await?;
    let body = ranking::export::to_csv(&table).map_err(|e| WebError::Internal(e.to_string()))?;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        ranking::export::csv_filename(&program)
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}
