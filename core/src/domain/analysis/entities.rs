use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationLimits {
    pub max_output_units: u32,
    /// Sampling temperature, within `[0, 1]`.
    pub temperature: f32,
    pub response_format_hint: ResponseFormat,
}

impl GenerationLimits {
    pub const fn json(max_output_units: u32, temperature: f32) -> Self {
        Self {
            max_output_units,
            temperature,
            response_format_hint: ResponseFormat::Json,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InlineAttachment {
    pub media_type: String,
    pub base64_data: String,
}

/// A fully built request for the generative model. Never mutated once sent.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelInstruction {
    pub system_directive: String,
    pub user_text: String,
    pub inline_attachment: Option<InlineAttachment>,
    pub generation_limits: GenerationLimits,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Severity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Source {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub name: String,
    /// Integer percentage, 0 to 100.
    pub probability: u8,
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub red_flags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tests: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub care_advice: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medications: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<Source>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub triage: Option<String>,
}

/// Result shape shared by the skin and eye analyses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticReport {
    pub diseases: Vec<Finding>,
    pub recommendations: Vec<String>,
    pub disclaimer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub triage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub red_flags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_tests: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medications: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<Source>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RiskFactor {
    pub factor: String,
    pub level: Severity,
    pub evidence: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TimelineEvent {
    pub date: String,
    pub event: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
    pub relation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct KnowledgeGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

/// Result shape of the patient-history analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HistoryReport {
    #[schema(value_type = Object)]
    pub profile: serde_json::Map<String, serde_json::Value>,
    pub risk_factors: Vec<RiskFactor>,
    pub red_flags: Vec<String>,
    pub timeline: Vec<TimelineEvent>,
    pub knowledge_graph: KnowledgeGraph,
    pub alerts: Vec<String>,
    pub suggestions: Vec<String>,
    pub risk_scores: BTreeMap<String, f64>,
    pub disclaimer: String,
}

/// Normalized response for one analysis request.
///
/// Held as a JSON object so that fields the model adds beyond the documented
/// shape reach the caller untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FindingSet(serde_json::Map<String, serde_json::Value>);

impl FindingSet {
    pub fn from_document(document: serde_json::Map<String, serde_json::Value>) -> Self {
        Self(document)
    }

    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }

    /// Findings of a diagnostic result; empty for history results.
    pub fn findings(&self) -> &[serde_json::Value] {
        self.0
            .get("diseases")
            .and_then(serde_json::Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn into_value(self) -> serde_json::Value {
        serde_json::Value::Object(self.0)
    }
}
