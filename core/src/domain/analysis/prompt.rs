use base64::{Engine as _, engine::general_purpose};

use crate::domain::{
    analysis::{
        entities::{GenerationLimits, InlineAttachment, ModelInstruction},
        value_objects::AnalysisRequest,
        variant::{ReportShape, Variant, VariantDescriptor},
    },
    common::entities::app_errors::CoreError,
};

const DIAGNOSTIC_SCHEMA: &str = r#"{
  "diseases": [
    {
      "name": "string",
      "probability": 0,
      "severity": "Low | Medium | High",
      "summary": "string",
      "redFlags": ["string"],
      "tests": ["string"],
      "careAdvice": ["string"],
      "medications": ["string"],
      "sources": [{ "title": "string", "url": "string" }]
    }
  ],
  "recommendations": ["string"],
  "triage": "string",
  "redFlags": ["string"],
  "suggestedTests": ["string"],
  "medications": ["string"],
  "sources": [{ "title": "string", "url": "string" }],
  "disclaimer": "string"
}"#;

const HISTORY_SCHEMA: &str = r#"{
  "profile": { "age": 0, "sex": "string", "conditions": ["string"], "medications": ["string"], "allergies": ["string"] },
  "riskFactors": [{ "factor": "string", "level": "Low | Medium | High", "evidence": "string" }],
  "redFlags": ["string"],
  "timeline": [{ "date": "string", "event": "string" }],
  "knowledgeGraph": {
    "nodes": [{ "id": "string", "label": "string", "type": "string" }],
    "edges": [{ "from": "string", "to": "string", "relation": "string" }]
  },
  "alerts": ["string"],
  "suggestions": ["string"],
  "riskScores": { "name": 0 },
  "disclaimer": "string"
}"#;

/// Builds the model instruction for one request. Identical inputs always
/// produce identical instructions.
pub fn build_instruction(
    variant: Variant,
    request: &AnalysisRequest,
) -> Result<ModelInstruction, CoreError> {
    let descriptor = variant.descriptor();

    match descriptor.shape {
        ReportShape::Diagnostic => build_diagnostic(descriptor, request),
        ReportShape::History => build_history(descriptor, request),
    }
}

/// Minimal round trip used to check that a credential is accepted.
pub fn ping_instruction() -> ModelInstruction {
    ModelInstruction {
        system_directive: "Reply with the single word: pong".to_string(),
        user_text: "ping".to_string(),
        inline_attachment: None,
        generation_limits: GenerationLimits::json(1, 0.0),
    }
}

fn build_diagnostic(
    descriptor: &VariantDescriptor,
    request: &AnalysisRequest,
) -> Result<ModelInstruction, CoreError> {
    let attachment = request
        .attachment
        .as_ref()
        .filter(|attachment| !attachment.bytes.is_empty())
        .ok_or(CoreError::MissingAttachment)?;

    let examples = descriptor
        .example_conditions
        .iter()
        .map(|condition| format!("- {condition}"))
        .collect::<Vec<_>>()
        .join("\n");

    let system_directive = format!(
        "You are an assistant that gives general, educational {specialty} information from a photo of the {subject}. \
You do not diagnose.\n\
Respond with a single JSON object and nothing else: no markdown, no code fences, no commentary.\n\
The JSON object must follow exactly this schema:\n{schema}\n\n\
Rules:\n\
- List 1 to 5 possible conditions in \"diseases\", using plain, lay-friendly names such as:\n{examples}\n\
- \"probability\" is an integer from 0 to 100. The probabilities of all entries must sum to 100 or less.\n\
- \"severity\" is one of \"Low\", \"Medium\" or \"High\". Severity reflects urgency, not certainty.\n\
- Only suggest over-the-counter medications and never give dosing beyond the package label.\n\
- \"disclaimer\" must be exactly: \"{disclaimer}\"",
        specialty = descriptor.specialty,
        subject = descriptor.subject,
        schema = DIAGNOSTIC_SCHEMA,
        examples = examples,
        disclaimer = descriptor.disclaimer,
    );

    let user_text = format!(
        "Analyze the attached {subject} image.\n\
Context from the user (informational only, it does not change the required format): affected area = \"{area}\".",
        subject = descriptor.subject,
        area = request.subject_area,
    );

    Ok(ModelInstruction {
        system_directive,
        user_text,
        inline_attachment: Some(InlineAttachment {
            media_type: attachment.declared_media_type.clone(),
            base64_data: general_purpose::STANDARD.encode(&attachment.bytes),
        }),
        generation_limits: descriptor.limits,
    })
}

fn build_history(
    descriptor: &VariantDescriptor,
    request: &AnalysisRequest,
) -> Result<ModelInstruction, CoreError> {
    let payload = request.raw_history_payload.as_ref().ok_or_else(|| {
        CoreError::InternalServerError("history analysis requires a payload".to_string())
    })?;

    let history = serde_json::to_string_pretty(payload)
        .map_err(|e| CoreError::InternalServerError(format!("Invalid history payload: {}", e)))?;

    let system_directive = format!(
        "You are an assistant that organizes a patient's self-reported medical history for educational purposes. \
You do not diagnose.\n\
Respond with a single JSON object and nothing else: no markdown, no code fences, no commentary.\n\
The JSON object must follow exactly this schema:\n{schema}\n\n\
Rules:\n\
- Only use facts present in the history. Leave a collection empty rather than inventing entries.\n\
- \"riskScores\" values are integers from 0 to 100.\n\
- \"disclaimer\" must be exactly: \"{disclaimer}\"",
        schema = HISTORY_SCHEMA,
        disclaimer = descriptor.disclaimer,
    );

    let user_text = format!("Patient history (JSON):\n{history}");

    Ok(ModelInstruction {
        system_directive,
        user_text,
        inline_attachment: None,
        generation_limits: descriptor.limits,
    })
}
