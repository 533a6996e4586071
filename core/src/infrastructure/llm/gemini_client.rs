use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::{
    analysis::{
        entities::{ModelInstruction, ResponseFormat},
        ports::LLMClient,
    },
    common::entities::app_errors::CoreError,
    credential::Credential,
};

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Clone)]
pub struct GeminiLLMClient {
    base_url: String,
    model_name: String,
    client: Client,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    system_instruction: Content,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
    temperature: f32,
    response_mime_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
struct PartResponse {
    text: Option<String>,
}

impl GeminiLLMClient {
    pub fn new(base_url: String, model_name: String, timeout: Duration) -> Result<Self, CoreError> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            CoreError::InternalServerError(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model_name,
            client,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url, self.model_name
        )
    }

    fn build_request(instruction: &ModelInstruction) -> GeminiRequest {
        let mut parts = vec![Part::Text {
            text: instruction.user_text.clone(),
        }];

        if let Some(attachment) = &instruction.inline_attachment {
            parts.push(Part::InlineData {
                inline_data: InlineData {
                    mime_type: attachment.media_type.clone(),
                    data: attachment.base64_data.clone(),
                },
            });
        }

        let limits = instruction.generation_limits;

        GeminiRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part::Text {
                    text: instruction.system_directive.clone(),
                }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts,
            }],
            generation_config: GenerationConfig {
                max_output_tokens: limits.max_output_units,
                temperature: limits.temperature.clamp(0.0, 1.0),
                response_mime_type: match limits.response_format_hint {
                    ResponseFormat::Json => "application/json",
                },
            },
        }
    }

    /// Joins the text parts of the first candidate; no text yields "".
    fn collect_text(response: GeminiResponse) -> String {
        response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .unwrap_or_default()
    }

    async fn call_gemini_api(
        &self,
        credential: &Credential,
        request: GeminiRequest,
    ) -> Result<String, CoreError> {
        let response = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, credential.expose())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                tracing::error!("Gemini API request failed: {}", e);
                CoreError::TransportFailure(format!("LLM API error: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), "Gemini API error: {}", error_text);
            return Err(CoreError::UpstreamRejected {
                status: status.as_u16(),
                body: error_text,
            });
        }

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Gemini response: {}", e);
            CoreError::TransportFailure(format!("Failed to parse LLM response: {}", e))
        })?;

        Ok(Self::collect_text(gemini_response))
    }
}

impl LLMClient for GeminiLLMClient {
    async fn generate(
        &self,
        credential: &Credential,
        instruction: &ModelInstruction,
    ) -> Result<String, CoreError> {
        let request = Self::build_request(instruction);

        self.call_gemini_api(credential, request).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Json, Router,
        extract::State,
        http::{HeaderMap, StatusCode, Uri},
    };
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::analysis::{
        entities::{GenerationLimits, InlineAttachment},
        prompt::ping_instruction,
    };

    #[derive(Clone, Default)]
    struct Captured {
        api_key: Arc<Mutex<Option<String>>>,
        uri: Arc<Mutex<Option<String>>>,
        body: Arc<Mutex<Option<Value>>>,
    }

    async fn spawn_upstream(status: StatusCode, reply: &'static str) -> (String, Captured) {
        let captured = Captured::default();

        let app = Router::new()
            .fallback(
                move |State(captured): State<Captured>,
                      uri: Uri,
                      headers: HeaderMap,
                      Json(body): Json<Value>| async move {
                    *captured.api_key.lock().unwrap() = headers
                        .get(API_KEY_HEADER)
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string);
                    *captured.uri.lock().unwrap() = Some(uri.to_string());
                    *captured.body.lock().unwrap() = Some(body);
                    (status, reply)
                },
            )
            .with_state(captured.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}/v1beta", addr), captured)
    }

    fn client(base_url: String) -> GeminiLLMClient {
        GeminiLLMClient::new(base_url, "gemini-test".to_string(), Duration::from_secs(5)).unwrap()
    }

    fn image_instruction() -> ModelInstruction {
        ModelInstruction {
            system_directive: "system".to_string(),
            user_text: "user".to_string(),
            inline_attachment: Some(InlineAttachment {
                media_type: "image/png".to_string(),
                base64_data: "AAAA".to_string(),
            }),
            generation_limits: GenerationLimits::json(2048, 0.2),
        }
    }

    #[test]
    fn test_build_request_body() {
        let body = serde_json::to_value(GeminiLLMClient::build_request(&image_instruction()))
            .unwrap();

        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "system");
        assert!(body["systemInstruction"].get("role").is_none());
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "user");
        assert_eq!(
            body["contents"][0]["parts"][1]["inlineData"],
            json!({"mimeType": "image/png", "data": "AAAA"})
        );
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 2048);
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
    }

    #[test]
    fn test_collect_text_joins_parts() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "candidates": [
                {"content": {"parts": [{"text": "{\"a\":"}, {"inlineData": {}}, {"text": "1}"}]}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        }))
        .unwrap();

        assert_eq!(GeminiLLMClient::collect_text(response), "{\"a\":\n1}");
    }

    #[test]
    fn test_collect_text_without_candidates() {
        let response: GeminiResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(GeminiLLMClient::collect_text(response), "");

        let response: GeminiResponse =
            serde_json::from_value(json!({"candidates": [{"finishReason": "SAFETY"}]})).unwrap();
        assert_eq!(GeminiLLMClient::collect_text(response), "");
    }

    #[tokio::test]
    async fn test_generate_success() {
        let (base_url, captured) = spawn_upstream(
            StatusCode::OK,
            r#"{"candidates":[{"content":{"parts":[{"text":"{\"diseases\":[]}"}]}}]}"#,
        )
        .await;

        let text = client(base_url)
            .generate(&Credential::new("secret-key"), &image_instruction())
            .await
            .unwrap();

        assert_eq!(text, r#"{"diseases":[]}"#);
        assert_eq!(
            captured.api_key.lock().unwrap().as_deref(),
            Some("secret-key")
        );
        let uri = captured.uri.lock().unwrap().clone().unwrap();
        assert_eq!(uri, "/v1beta/models/gemini-test:generateContent");
        assert!(!uri.contains("secret-key"));
        let body = captured.body.lock().unwrap().clone().unwrap();
        let temperature = body["generationConfig"]["temperature"].as_f64().unwrap();
        assert!((temperature - 0.2).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_generate_upstream_rejected() {
        let (base_url, _) =
            spawn_upstream(StatusCode::SERVICE_UNAVAILABLE, "model overloaded").await;

        let result = client(base_url)
            .generate(&Credential::new("k"), &ping_instruction())
            .await;

        assert_eq!(
            result,
            Err(CoreError::UpstreamRejected {
                status: 503,
                body: "model overloaded".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_generate_undecodable_success_body() {
        let (base_url, _) = spawn_upstream(StatusCode::OK, "not json").await;

        let result = client(base_url)
            .generate(&Credential::new("k"), &ping_instruction())
            .await;

        assert!(matches!(result, Err(CoreError::TransportFailure(_))));
    }

    #[tokio::test]
    async fn test_generate_transport_failure() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = client(format!("http://{}", addr))
            .generate(&Credential::new("k"), &ping_instruction())
            .await;

        assert!(matches!(result, Err(CoreError::TransportFailure(_))));
    }
}
