use axum::{
    extract::{Multipart, State, multipart::MultipartRejection},
    http::HeaderMap,
};
use medigate_core::domain::analysis::{
    entities::{DiagnosticReport, FindingSet},
    ports::AnalysisService,
    variant::Variant,
};

use crate::application::{
    api_key::api_key_override,
    http::{
        diagnostic::validators::{ImageAnalysisForm, read_image_form},
        server::{
            api_entities::{
                api_error::{ApiError, ErrorResponse},
                response::Response,
            },
            app_state::AppState,
        },
    },
};

#[utoipa::path(
    post,
    path = "/skin",
    tag = "diagnostic",
    summary = "Analyze a skin photo",
    description = "Sends the photo to the model and returns possible conditions sorted by probability. When the model output cannot be structured, a minimal result with an explanatory message is returned instead.",
    request_body(content = ImageAnalysisForm, content_type = "multipart/form-data"),
    params(
        ("x-api-key" = Option<String>, Header, description = "Overrides the server's default model API key"),
    ),
    responses(
        (status = 200, body = DiagnosticReport),
        (status = 400, description = "Missing image file", body = ErrorResponse),
        (status = 413, description = "Image larger than 5 MiB", body = ErrorResponse),
        (status = 500, description = "No API key available or unexpected failure", body = ErrorResponse),
        (status = 502, description = "Model service rejected the request", body = ErrorResponse)
    ),
)]
pub async fn analyze_skin(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response<FindingSet>, ApiError> {
    let request = read_image_form(multipart).await?;

    let result = state
        .service
        .analyze(api_key_override(&headers), Variant::Skin, request)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(result))
}
