use super::handlers::{
    analyze_eye::{__path_analyze_eye, analyze_eye},
    analyze_skin::{__path_analyze_skin, analyze_skin},
    ping::{__path_ping, ping},
};
use crate::application::http::server::app_state::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(ping, analyze_skin, analyze_eye))]
pub struct DiagnosticApiDoc;

pub fn diagnostic_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/diagnostic/ping", state.args.server.root_path),
            get(ping),
        )
        .route(
            &format!("{}/diagnostic/skin", state.args.server.root_path),
            post(analyze_skin),
        )
        .route(
            &format!("{}/diagnostic/eye", state.args.server.root_path),
            post(analyze_eye),
        )
}
