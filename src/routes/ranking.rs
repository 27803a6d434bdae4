use crate::services::{
    ranking::{models::RankingEntry, RankingError, Submission},
    Services,
};
use axum::{
    body::Bytes,
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Extension, Json, Router,
};
use log::error;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Router function creates a new router with all the underlying
/// routes for this file.
///
/// Prefix: /api/ranking
pub fn router() -> Router {
    Router::new().route(
        "/api/ranking",
        get(get_ranking)
            .post(submit_score)
            // Only GET reads the ranking, HEAD would otherwise be routed to it
            .head(not_found)
            // Other methods are treated as an unknown resource
            .fallback(not_found),
    )
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

/// GET /api/ranking
///
/// Responds with the current ranking, a ranking that can't be
/// read is logged and responded to as an empty ranking
async fn get_ranking(Extension(services): Extension<Arc<Services>>) -> Json<Vec<RankingEntry>> {
    match services.ranking.get_ranking().await {
        Ok(ranking) => Json(ranking),
        Err(err) => {
            error!("Error reading ranking file: {}", err);
            Json(Vec::new())
        }
    }
}

/// Response to a successful submission
#[derive(Serialize)]
struct SubmitResponse {
    status: &'static str,
    ranking: Vec<RankingEntry>,
}

/// POST /api/ranking
///
/// Submits a new entry into the ranking responding with the updated
/// ranking. The body is read and parsed manually so that oversized or
/// malformed bodies are reported the same as any other failure
async fn submit_score(
    Extension(services): Extension<Arc<Services>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<SubmitResponse>, RankingError> {
    let body = body.map_err(RankingError::Body)?;
    let value: Value = serde_json::from_slice(&body).map_err(RankingError::MalformedJson)?;
    let entry: RankingEntry = serde_json::from_value(value).map_err(RankingError::InvalidEntry)?;

    let Submission { ranking, .. } = services.ranking.submit_score(entry).await?;

    Ok(Json(SubmitResponse {
        status: "success",
        ranking,
    }))
}

/// IntoResponse implementation for RankingError, all failures are an
/// empty 500 response
impl IntoResponse for RankingError {
    fn into_response(self) -> Response {
        error!("Error processing ranking submission: {}", self);
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}
