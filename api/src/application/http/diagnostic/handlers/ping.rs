use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use medigate_core::domain::analysis::ports::AnalysisService;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::{
    api_key::api_key_override,
    http::server::{api_entities::api_error::ApiError, app_state::AppState},
};

#[derive(Debug, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct PingResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[utoipa::path(
    get,
    path = "/ping",
    tag = "diagnostic",
    summary = "Check the model API key",
    description = "Performs a one-token round trip to the model service to verify that the resolved API key is accepted.",
    params(
        ("x-api-key" = Option<String>, Header, description = "Overrides the server's default model API key"),
    ),
    responses(
        (status = 200, body = PingResponse),
        (status = 500, description = "No API key available or model service unreachable", body = PingResponse),
        (status = 502, description = "Model service rejected the key", body = PingResponse)
    ),
)]
pub async fn ping(State(state): State<AppState>, headers: HeaderMap) -> Response {
    match state.service.ping(api_key_override(&headers)).await {
        Ok(()) => (
            StatusCode::OK,
            Json(PingResponse {
                ok: true,
                error: None,
                details: None,
            }),
        )
            .into_response(),
        Err(e) => {
            let error = ApiError::from(e);
            tracing::warn!(status = error.status_code().as_u16(), "Ping failed: {}", error);

            let body = error.body();
            (
                error.status_code(),
                Json(PingResponse {
                    ok: false,
                    error: Some(body.error),
                    details: body.details,
                }),
            )
                .into_response()
        }
    }
}
