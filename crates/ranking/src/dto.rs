use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::table::RankingRow;

/// Raw score input from the editor. The UI may send a number or whatever
/// the administrator typed; coercion happens in `editor::coerce_score`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ScoreInput {
    Number(i64),
    Float(f64),
    Text(String),
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateReportRequest {
    #[serde(default)]
    #[validate(length(max = 65536, message = "report text too long"))]
    pub text: Option<String>,
    pub score: ScoreInput,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SaveResponse {
    pub message: String,
    /// Recomputed row for the affected student, so the client can patch it
    /// in place instead of reloading the whole page.
    pub row: Option<RankingRow>,
}
