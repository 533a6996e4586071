use serde_json::{Map, Value, json};

use crate::domain::analysis::{entities::FindingSet, variant::Variant};

pub const SKIN_FALLBACK_MESSAGE: &str = "AI output could not be structured. Please try again with a clear, well-lit photo of the affected area.";

pub const EYE_FALLBACK_FINDING: &str = "Unable to analyze image";

pub const FALLBACK_TRIAGE: &str = "Primary care";

const EYE_RED_FLAG: &str =
    "Sudden vision loss, severe eye pain, or flashes and floaters need urgent care";

/// Builds the schema-valid substitute returned when the model output could
/// not be turned into a document.
///
/// Skin and eye fallbacks deliberately differ in depth: skin returns no
/// findings, eye returns one synthetic finding.
pub fn synthesize(variant: Variant) -> FindingSet {
    let document = match variant {
        Variant::Skin => skin_fallback(),
        Variant::Eye => eye_fallback(),
        Variant::History => history_fallback(),
    };

    FindingSet::from_document(document)
}

fn document<const N: usize>(fields: [(&str, Value); N]) -> Map<String, Value> {
    fields
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

fn skin_fallback() -> Map<String, Value> {
    document([
        ("diseases", json!([])),
        ("recommendations", json!([])),
        ("disclaimer", json!(Variant::Skin.disclaimer())),
        ("message", json!(SKIN_FALLBACK_MESSAGE)),
    ])
}

fn eye_fallback() -> Map<String, Value> {
    let finding = document([
        ("name", json!(EYE_FALLBACK_FINDING)),
        ("probability", json!(0)),
        ("severity", json!("Medium")),
        (
            "summary",
            json!("The image could not be analyzed reliably. An in-person eye examination is recommended."),
        ),
        ("redFlags", json!([EYE_RED_FLAG])),
        (
            "careAdvice",
            json!([
                "Avoid rubbing the eye and keep the area clean",
                "Book an appointment with a primary care provider or eye specialist"
            ]),
        ),
        ("triage", json!(FALLBACK_TRIAGE)),
    ]);

    document([
        ("diseases", Value::Array(vec![Value::Object(finding)])),
        (
            "recommendations",
            json!([
                "Retake the photo in good lighting with the eye fully in frame",
                "See a healthcare provider if symptoms persist or worsen"
            ]),
        ),
        ("disclaimer", json!(Variant::Eye.disclaimer())),
        ("triage", json!(FALLBACK_TRIAGE)),
        ("redFlags", json!([EYE_RED_FLAG])),
    ])
}

fn history_fallback() -> Map<String, Value> {
    document([
        ("profile", json!({})),
        ("riskFactors", json!([])),
        ("redFlags", json!([])),
        ("timeline", json!([])),
        ("knowledgeGraph", json!({"nodes": [], "edges": []})),
        ("alerts", json!([])),
        ("suggestions", json!([])),
        ("riskScores", json!({})),
        ("disclaimer", json!(Variant::History.disclaimer())),
    ])
}
