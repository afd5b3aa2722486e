use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use super::domain::{CandidateRecord, SelectionRequest};
use super::selection::{SelectionEngine, SelectionError};

/// Wire payload for a selection call. The reference date is optional at the
/// HTTP boundary only; when omitted, the handler pins it to the server's
/// current date before entering the deterministic core.
#[derive(Debug, Deserialize)]
pub struct SelectionSubmission {
    pub candidates: Vec<CandidateRecord>,
    pub subject: String,
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
    #[serde(default)]
    pub target_school: Option<String>,
}

/// Router builder exposing the selection endpoint.
pub fn selection_router(engine: Arc<SelectionEngine>) -> Router {
    Router::new()
        .route("/api/v1/staffing/selection", post(select_handler))
        .with_state(engine)
}

pub(crate) async fn select_handler(
    State(engine): State<Arc<SelectionEngine>>,
    axum::Json(submission): axum::Json<SelectionSubmission>,
) -> Response {
    let SelectionSubmission {
        candidates,
        subject,
        as_of,
        target_school,
    } = submission;

    let request = SelectionRequest {
        subject,
        as_of: as_of.unwrap_or_else(|| chrono::Local::now().date_naive()),
        target_school,
    };

    match engine.select(&candidates, &request) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(error @ SelectionError::EmptyRoster) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(SelectionError::Candidate {
            index,
            label,
            violation,
        }) => {
            let payload = json!({
                "error": violation.to_string(),
                "candidate_index": index,
                "candidate": label,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
    }
}
