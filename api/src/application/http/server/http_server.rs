use std::sync::Arc;

use crate::application::api_key::API_KEY_HEADER;
use crate::application::http::diagnostic::router::diagnostic_routes;
use crate::application::http::health::health_routes;
use crate::application::http::history::router::history_routes;
use crate::application::http::server::app_state::AppState;
use crate::application::http::server::openapi::api_doc;
use crate::args::Args;

use axum::extract::DefaultBodyLimit;
use axum::http::header::{ACCEPT, CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{HeaderName, HeaderValue, Method};
use axum::routing::get;
use axum::{Json, Router};
use medigate_core::{
    application::create_service, domain::analysis::value_objects::MAX_ATTACHMENT_SIZE,
    domain::common::MedigateConfig,
};
use tower_http::cors::CorsLayer;
use tracing::{debug, info_span};
use utoipa_scalar::{Scalar, Servable as ScalarServable};

/// Transport-level body cap; leaves room for multipart framing around a
/// maximum-size image.
pub const MAX_BODY_SIZE: usize = MAX_ATTACHMENT_SIZE + 1024 * 1024;

pub fn state(args: Arc<Args>) -> Result<AppState, anyhow::Error> {
    let medigate_config: MedigateConfig = MedigateConfig::from(args.as_ref().clone());
    debug!(config = ?medigate_config, "Creating service");

    let service = create_service(medigate_config)?;

    Ok(AppState::new(args, service))
}

///  Returns the [`Router`] of this application.
pub fn router(state: AppState) -> Result<Router, anyhow::Error> {
    let trace_layer = tower_http::trace::TraceLayer::new_for_http().make_span_with(
        |request: &axum::extract::Request| {
            let uri: String = request.uri().to_string();
            info_span!("http_request", method = ?request.method(), uri)
        },
    );

    let allowed_origins = state
        .args
        .server
        .allowed_origins
        .iter()
        .map(|origin| HeaderValue::from_str(origin))
        .collect::<Result<Vec<HeaderValue>, _>>()?;

    debug!("Allowed origins: {:?}", allowed_origins);

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_origin(allowed_origins)
        .allow_headers([
            CONTENT_TYPE,
            CONTENT_LENGTH,
            ACCEPT,
            HeaderName::from_static(API_KEY_HEADER),
        ]);

    let root_path = state.args.server.root_path.clone();

    let mut openapi = api_doc();
    let mut paths = openapi.paths.clone();
    paths.paths = openapi
        .paths
        .paths
        .into_iter()
        .map(|(path, item)| (format!("{}{path}", root_path), item))
        .collect();
    openapi.paths = paths;

    let api_docs_url = format!("{}/api-docs/openapi.json", root_path);
    let openapi_json = openapi.clone();

    let router = axum::Router::new()
        .merge(Scalar::with_url(format!("{}/scalar", root_path), openapi))
        .route(
            &api_docs_url,
            get(move || async move { Json(openapi_json) }),
        )
        .merge(health_routes(state.clone()))
        .merge(diagnostic_routes(state.clone()))
        .merge(history_routes(state.clone()))
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state);
    Ok(router)
}
