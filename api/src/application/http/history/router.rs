use super::handlers::analyze_history::{__path_analyze_history, analyze_history};
use crate::application::http::server::app_state::AppState;
use axum::{Router, routing::post};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(analyze_history))]
pub struct HistoryApiDoc;

pub fn history_routes(state: AppState) -> Router<AppState> {
    Router::new().route(
        &format!("{}/history/analyze", state.args.server.root_path),
        post(analyze_history),
    )
}
