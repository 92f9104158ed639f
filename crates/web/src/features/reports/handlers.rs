use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use ranking::Report;
use ranking::dto::{SaveResponse, UpdateReportRequest};

use crate::error::WebResult;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/reports/{owner}/{name}",
    params(
        ("owner" = String, Path, description = "Report owner"),
        ("name" = String, Path, description = "Report name")
    ),
    responses(
        (status = 200, description = "Report found (or synthesized for a missing submission)", body = Report),
        (status = 400, description = "Malformed report name"),
        (status = 404, description = "Unknown student or round")
    ),
    tag = "reports"
)]
pub async fn get_report(
    State(state): State<AppState>,
    Path((owner, name)): Path<(String, String)>,
) -> WebResult<Response> {
    let report = services::open_report(state.service.as_ref(), &owner, &name).await?;

    Ok(Json(report).into_response())
}

#[utoipa::path(
    put,
    path = "/api/reports/{owner}/{name}",
    params(
        ("owner" = String, Path, description = "Report owner"),
        ("name" = String, Path, description = "Report name")
    ),
    request_body = UpdateReportRequest,
    responses(
        (status = 200, description = "Report saved; the refreshed row is returned", body = SaveResponse),
        (status = 400, description = "Validation error"),
        (status = 502, description = "Upstream rejected or failed the save")
    ),
    tag = "reports"
)]
pub async fn update_report(
    State(state): State<AppState>,
    Path((owner, name)): Path<(String, String)>,
    Json(request): Json<UpdateReportRequest>,
) -> WebResult<Response> {
    let response = services::save_report(state.service.as_ref(), &owner, &name, request).await?;

    Ok(Json(response).into_response())
}
