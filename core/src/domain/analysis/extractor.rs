use serde_json::Value;

use crate::domain::common::entities::app_errors::ExtractionFailure;

/// Recovers a JSON document from free-form model output.
///
/// The whole text is parsed first. If that fails, the span from the earliest
/// `{` or `[` to the last matching closer is parsed instead, which strips
/// surrounding prose and markdown fences. Unbalanced or JSON-like prose can
/// still fail.
pub fn extract(text: &str) -> Result<Value, ExtractionFailure> {
    if text.trim().is_empty() {
        return Err(ExtractionFailure::Empty);
    }

    if let Ok(document) = serde_json::from_str::<Value>(text) {
        return Ok(document);
    }

    let span = bracketed_span(text).ok_or(ExtractionFailure::NoDocument)?;

    serde_json::from_str::<Value>(span).map_err(|e| {
        tracing::debug!(error = %e, "bracketed span of model output is not valid JSON");
        ExtractionFailure::NoDocument
    })
}

fn bracketed_span(text: &str) -> Option<&str> {
    let start = text.find(['{', '['])?;
    let closer = match text.as_bytes()[start] {
        b'{' => '}',
        _ => ']',
    };
    let end = text.rfind(closer)?;

    if end <= start {
        return None;
    }

    Some(&text[start..=end])
}
