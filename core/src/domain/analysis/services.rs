use crate::domain::{
    analysis::{
        entities::FindingSet,
        extractor::extract,
        fallback::synthesize,
        normalizer::normalize,
        ports::{AnalysisService, LLMClient},
        prompt::{build_instruction, ping_instruction},
        value_objects::AnalysisRequest,
        variant::Variant,
    },
    common::{entities::app_errors::CoreError, services::Service},
    credential::resolve_credential,
};

impl<LLM> AnalysisService for Service<LLM>
where
    LLM: LLMClient,
{
    async fn analyze(
        &self,
        api_key_override: Option<String>,
        variant: Variant,
        request: AnalysisRequest,
    ) -> Result<FindingSet, CoreError> {
        // 1. Reject malformed input before anything else
        request.validate_for(variant)?;

        // 2. Resolve credential
        let credential = resolve_credential(
            api_key_override.as_deref(),
            self.llm_config.default_api_key.as_deref(),
        )?;

        // 3. Build instruction
        let instruction = build_instruction(variant, &request)?;

        tracing::info!(
            variant = %variant,
            subject_area_len = request.subject_area.len(),
            "Starting analysis"
        );

        // 4. Call LLM
        let raw_output = self.llm_client.generate(&credential, &instruction).await?;

        // 5. Extract and normalize, falling back on any failure
        let finding_set = match extract(&raw_output).and_then(|doc| normalize(doc, variant)) {
            Ok(finding_set) => finding_set,
            Err(e) => {
                tracing::warn!(
                    variant = %variant,
                    output_len = raw_output.len(),
                    reason = %e,
                    "Model output could not be structured, returning fallback"
                );
                synthesize(variant)
            }
        };

        tracing::info!(
            variant = %variant,
            findings = finding_set.findings().len(),
            "Analysis completed"
        );

        Ok(finding_set)
    }

    async fn ping(&self, api_key_override: Option<String>) -> Result<(), CoreError> {
        let credential = resolve_credential(
            api_key_override.as_deref(),
            self.llm_config.default_api_key.as_deref(),
        )?;

        self.llm_client
            .generate(&credential, &ping_instruction())
            .await?;

        Ok(())
    }
}
