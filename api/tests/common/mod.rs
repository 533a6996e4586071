use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use axum::{Router, extract::State, http::StatusCode};
use axum_test::TestServer;
use medigate_api::{
    application::http::server::http_server::{router, state},
    args::{Args, LlmArgs, LogArgs, ServerArgs},
};

/// Stand-in for the Gemini endpoint that replies with a fixed status and body
/// and counts the calls it receives.
pub struct StubUpstream {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
}

impl StubUpstream {
    pub async fn spawn(status: StatusCode, body: String) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));

        let app = Router::new()
            .fallback(move |State(hits): State<Arc<AtomicUsize>>| {
                let body = body.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    (
                        status,
                        [(axum::http::header::CONTENT_TYPE, "application/json")],
                        body,
                    )
                }
            })
            .with_state(hits.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}/v1beta", addr),
            hits,
        }
    }

    /// Upstream answering 200 with a single candidate holding `text`.
    pub async fn replying_text(text: &str) -> Self {
        let body = serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": text}]}}]
        });
        Self::spawn(StatusCode::OK, body.to_string()).await
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

pub fn args(base_url: &str, default_api_key: Option<&str>) -> Args {
    Args {
        server: ServerArgs {
            host: "127.0.0.1".to_string(),
            port: 0,
            root_path: String::new(),
            allowed_origins: vec!["http://localhost:5173".to_string()],
            service_name: "medigate".to_string(),
        },
        llm: LlmArgs {
            gemini_api_key: default_api_key.map(str::to_string),
            gemini_model: "gemini-test".to_string(),
            gemini_base_url: base_url.to_string(),
            llm_timeout_secs: 5,
        },
        log: LogArgs {
            log_filter: "info".to_string(),
            log_json: false,
        },
    }
}

pub fn test_server(upstream: &StubUpstream, default_api_key: Option<&str>) -> TestServer {
    let app_state = state(Arc::new(args(&upstream.base_url, default_api_key))).unwrap();
    TestServer::new(router(app_state).unwrap()).unwrap()
}
