use std::{fmt, time::Duration};

use clap::Parser;
use medigate_core::domain::common::{LLMConfig, MedigateConfig};

#[derive(Debug, Clone, Parser)]
#[command(name = "medigate", version, about = "AI response gateway for health analyses")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub llm: LlmArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ServerArgs {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 3001)]
    pub port: u16,

    #[arg(long, env = "ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long,
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:5173"
    )]
    pub allowed_origins: Vec<String>,

    #[arg(long, env = "SERVICE_NAME", default_value = "medigate")]
    pub service_name: String,
}

#[derive(Clone, clap::Args)]
pub struct LlmArgs {
    /// Default key used when a request carries no x-api-key header.
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: Option<String>,

    #[arg(long, env = "GEMINI_MODEL", default_value = "gemini-1.5-flash")]
    pub gemini_model: String,

    #[arg(
        long,
        env = "GEMINI_BASE_URL",
        default_value = "https://generativelanguage.googleapis.com/v1beta"
    )]
    pub gemini_base_url: String,

    #[arg(long, env = "LLM_TIMEOUT_SECS", default_value_t = 60)]
    pub llm_timeout_secs: u64,
}

impl fmt::Debug for LlmArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmArgs")
            .field(
                "gemini_api_key",
                &self.gemini_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("gemini_model", &self.gemini_model)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("llm_timeout_secs", &self.llm_timeout_secs)
            .finish()
    }
}

#[derive(Debug, Clone, clap::Args)]
pub struct LogArgs {
    #[arg(long, env = "LOG_FILTER", default_value = "info")]
    pub log_filter: String,

    #[arg(long, env = "LOG_JSON")]
    pub log_json: bool,
}

impl From<Args> for MedigateConfig {
    fn from(args: Args) -> Self {
        MedigateConfig {
            llm: LLMConfig {
                default_api_key: args.llm.gemini_api_key,
                gemini_model: args.llm.gemini_model,
                gemini_base_url: args.llm.gemini_base_url,
                timeout: Duration::from_secs(args.llm.llm_timeout_secs),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_args() {
        let args = Args::parse_from(["medigate", "--gemini-api-key", "abc"]);
        assert_eq!(args.llm.gemini_api_key.as_deref(), Some("abc"));
        let timeout_secs = args.llm.llm_timeout_secs;

        let config = MedigateConfig::from(args);
        assert_eq!(config.llm.default_api_key.as_deref(), Some("abc"));
        assert_eq!(config.llm.timeout, Duration::from_secs(timeout_secs));
    }

    #[test]
    fn test_allowed_origins_are_split() {
        let args = Args::parse_from([
            "medigate",
            "--allowed-origins",
            "http://a.test,http://b.test",
        ]);
        assert_eq!(
            args.server.allowed_origins,
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
    }

    #[test]
    fn test_debug_hides_api_key() {
        let args = Args::parse_from(["medigate", "--gemini-api-key", "very-secret"]);
        assert!(!format!("{:?}", args).contains("very-secret"));
    }
}
