use std::future::Future;

use crate::domain::{
    analysis::{
        entities::{FindingSet, ModelInstruction},
        value_objects::AnalysisRequest,
        variant::Variant,
    },
    common::entities::app_errors::CoreError,
    credential::Credential,
};

/// Client for the external generative model.
#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync {
    /// Performs exactly one call and returns the concatenated text parts of
    /// the first candidate, possibly empty.
    fn generate(
        &self,
        credential: &Credential,
        instruction: &ModelInstruction,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}

/// Service trait for the analysis gateway
pub trait AnalysisService: Send + Sync {
    fn analyze(
        &self,
        api_key_override: Option<String>,
        variant: Variant,
        request: AnalysisRequest,
    ) -> impl Future<Output = Result<FindingSet, CoreError>> + Send;

    fn ping(
        &self,
        api_key_override: Option<String>,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}
