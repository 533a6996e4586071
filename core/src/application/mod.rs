use crate::{
    domain::common::{MedigateConfig, entities::app_errors::CoreError, services::Service},
    infrastructure::llm::gemini_client::GeminiLLMClient,
};

pub type MedigateService = Service<GeminiLLMClient>;

pub fn create_service(config: MedigateConfig) -> Result<MedigateService, CoreError> {
    let llm_client = GeminiLLMClient::new(
        config.llm.gemini_base_url.clone(),
        config.llm.gemini_model.clone(),
        config.llm.timeout,
    )?;

    Ok(Service::new(llm_client, config.llm))
}
