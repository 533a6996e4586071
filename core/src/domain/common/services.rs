use crate::domain::{analysis::ports::LLMClient, common::LLMConfig};

#[derive(Clone)]
pub struct Service<LLM>
where
    LLM: LLMClient,
{
    pub(crate) llm_client: LLM,
    pub(crate) llm_config: LLMConfig,
}

impl<LLM> Service<LLM>
where
    LLM: LLMClient,
{
    pub fn new(llm_client: LLM, llm_config: LLMConfig) -> Self {
        Self {
            llm_client,
            llm_config,
        }
    }
}
