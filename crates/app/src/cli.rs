use std::time::Duration;

use clap::Parser;
use services::GeminiConfig;

/// Adaptive SAT math practice with generated questions.
#[derive(Debug, Parser)]
#[command(name = "satprep", version)]
pub struct Cli {
    /// Model name (overrides SATPREP_AI_MODEL)
    #[arg(long)]
    pub model: Option<String>,

    /// API base URL (overrides SATPREP_AI_BASE_URL)
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Give up on a question request after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// Source configuration from the environment with flag overrides applied.
    #[must_use]
    pub fn gemini_config(&self) -> Option<GeminiConfig> {
        GeminiConfig::from_env().map(|config| self.apply_overrides(config))
    }

    #[must_use]
    pub fn apply_overrides(&self, mut config: GeminiConfig) -> GeminiConfig {
        if let Some(model) = &self.model {
            config = config.with_model(model.clone());
        }
        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url.clone());
        }
        let timeout = self.timeout_secs.map(Duration::from_secs).or(config.timeout);
        config.with_timeout(timeout)
    }
}
