use crate::application::http::{
    diagnostic::router::DiagnosticApiDoc, health::HealthApiDoc, history::router::HistoryApiDoc,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "MediGate API"
    ),
    nest(
        (path = "/diagnostic", api = DiagnosticApiDoc),
        (path = "/history", api = HistoryApiDoc),
    )
)]
pub struct ApiDoc;

/// Full document, with the root-level health route merged in.
pub fn api_doc() -> utoipa::openapi::OpenApi {
    let mut openapi = ApiDoc::openapi();
    openapi.merge(HealthApiDoc::openapi());
    openapi
}
