use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::Serialize;
use serde_json::json;

use super::criteria::CriteriaForm;
use super::domain::PostingId;
use super::repository::{CandidateRepository, PostingRepository};
use super::service::{RankingReport, ScoringService, ScoringServiceError};

#[derive(Debug, Serialize)]
struct CalculateResponse {
    status: bool,
    #[serde(flatten)]
    report: RankingReport,
}

/// Router builder exposing the calculate and preview endpoints.
pub fn scoring_router<P, C>(service: Arc<ScoringService<P, C>>) -> Router
where
    P: PostingRepository + 'static,
    C: CandidateRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/postings/:posting_id/scoring/calculate",
            post(calculate_handler::<P, C>),
        )
        .route(
            "/api/v1/postings/:posting_id/scoring/preview",
            post(preview_handler::<P, C>),
        )
        .with_state(service)
}

pub(crate) async fn calculate_handler<P, C>(
    State(service): State<Arc<ScoringService<P, C>>>,
    Path(posting_id): Path<String>,
    payload: Result<axum::Json<CriteriaForm>, JsonRejection>,
) -> Response
where
    P: PostingRepository + 'static,
    C: CandidateRepository + 'static,
{
    let axum::Json(form) = match payload {
        Ok(form) => form,
        Err(rejection) => return rejection_response(rejection),
    };
    let posting_id = PostingId(posting_id);
    match service.calculate(&posting_id, form) {
        Ok(report) => {
            let body = CalculateResponse {
                status: true,
                report,
            };
            (StatusCode::OK, axum::Json(body)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn preview_handler<P, C>(
    State(service): State<Arc<ScoringService<P, C>>>,
    Path(posting_id): Path<String>,
    payload: Result<axum::Json<CriteriaForm>, JsonRejection>,
) -> Response
where
    P: PostingRepository + 'static,
    C: CandidateRepository + 'static,
{
    let axum::Json(form) = match payload {
        Ok(form) => form,
        Err(rejection) => return rejection_response(rejection),
    };
    let posting_id = PostingId(posting_id);
    match service.preview(&posting_id, form) {
        Ok(summary) => (StatusCode::OK, axum::Json(summary)).into_response(),
        Err(error) => error_response(error),
    }
}

/// Malformed or out-of-domain form bodies use the same envelope as scoring errors.
fn rejection_response(rejection: JsonRejection) -> Response {
    let payload = json!({
        "status": false,
        "errors": [{ "field": "form", "message": rejection.body_text() }],
    });
    (rejection.status(), axum::Json(payload)).into_response()
}

fn error_response(error: ScoringServiceError) -> Response {
    match error {
        ScoringServiceError::Scoring(error) => {
            let payload = json!({
                "status": false,
                "errors": [{ "field": error.field(), "message": error.to_string() }],
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        ScoringServiceError::PostingNotFound(posting_id) => {
            let payload = json!({
                "status": false,
                "errors": [{
                    "field": "posting_id",
                    "message": format!("posting {posting_id} not found"),
                }],
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        other => {
            let payload = json!({
                "status": false,
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
