use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::HeaderMap,
};
use medigate_core::domain::analysis::{
    entities::{FindingSet, HistoryReport},
    ports::AnalysisService,
    value_objects::AnalysisRequest,
    variant::Variant,
};

use crate::application::{
    api_key::api_key_override,
    http::server::{
        api_entities::{
            api_error::{ApiError, ErrorResponse},
            response::Response,
        },
        app_state::AppState,
    },
};

#[utoipa::path(
    post,
    path = "/analyze",
    tag = "history",
    summary = "Analyze a patient history",
    description = "Forwards the JSON history verbatim into the model prompt and returns a structured profile, risks and timeline. The request body can be any JSON document.",
    params(
        ("x-api-key" = Option<String>, Header, description = "Overrides the server's default model API key"),
    ),
    responses(
        (status = 200, body = HistoryReport),
        (status = 400, description = "Body is not valid JSON", body = ErrorResponse),
        (status = 500, description = "No API key available or unexpected failure", body = ErrorResponse),
        (status = 502, description = "Model service rejected the request", body = ErrorResponse)
    ),
)]
pub async fn analyze_history(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Response<FindingSet>, ApiError> {
    let Json(payload) =
        payload.map_err(|e| ApiError::bad_request("Invalid JSON body", Some(e.body_text())))?;

    let result = state
        .service
        .analyze(
            api_key_override(&headers),
            Variant::History,
            AnalysisRequest::history(payload),
        )
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(result))
}
