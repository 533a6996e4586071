use serde_json::{Map, Value};

use crate::domain::{
    analysis::{
        entities::FindingSet,
        variant::{ReportShape, Variant},
    },
    common::entities::app_errors::ExtractionFailure,
};

/// How many top-level medications are copied onto the leading finding.
pub const MAX_INHERITED_MEDICATIONS: usize = 10;

/// Applies structural repairs to a parsed model document.
///
/// Diagnostic results get a sorted `diseases` array and medication
/// inheritance on the top entry. History results pass through as returned.
pub fn normalize(document: Value, variant: Variant) -> Result<FindingSet, ExtractionFailure> {
    let Value::Object(mut document) = document else {
        return Err(ExtractionFailure::NotAnObject);
    };

    if variant.descriptor().shape == ReportShape::Diagnostic {
        normalize_diagnostic(&mut document);
    }

    Ok(FindingSet::from_document(document))
}

fn normalize_diagnostic(document: &mut Map<String, Value>) {
    let mut findings = match document.remove("diseases") {
        Some(Value::Array(findings)) => findings,
        _ if document.get("findings").is_some_and(Value::is_array) => {
            match document.remove("findings") {
                Some(Value::Array(findings)) => findings,
                _ => Vec::new(),
            }
        }
        _ => Vec::new(),
    };

    // Stable, so equal probabilities keep the model's order.
    findings.sort_by(|a, b| sort_probability(b).total_cmp(&sort_probability(a)));

    if let Some(Value::Array(shared)) = document.get("medications")
        && !shared.is_empty()
        && let Some(Value::Object(top)) = findings.first_mut()
        && lacks_medications(top)
    {
        let inherited = shared
            .iter()
            .take(MAX_INHERITED_MEDICATIONS)
            .cloned()
            .collect();
        top.insert("medications".to_string(), Value::Array(inherited));
    }

    document.insert("diseases".to_string(), Value::Array(findings));
}

/// Probability used for ordering only; the entry itself is left untouched.
fn sort_probability(finding: &Value) -> f64 {
    let probability = match finding.get("probability") {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
        _ => None,
    };

    probability.filter(|p| p.is_finite()).unwrap_or(0.0)
}

fn lacks_medications(finding: &Map<String, Value>) -> bool {
    match finding.get("medications") {
        None | Some(Value::Null) => true,
        Some(Value::Array(items)) => items.is_empty(),
        Some(Value::String(text)) => text.trim().is_empty(),
        Some(_) => false,
    }
}
