//! File configuration schema with defaults.

use crate::anthropic::gateway::RetryPolicy;
use scout_application::SolveParams;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors raised while loading or applying configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration load failed: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("API key environment variable {0} is not set")]
    MissingApiKey(String),
}

/// Top-level `scout.toml` schema.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default)]
    pub solver: SolverConfig,
}

/// Remote model provider settings.
///
/// The API key itself never lives in the file — only the name of the
/// environment variable that holds it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub base_url: String,
    pub model: String,
    pub api_key_env: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.anthropic.com".to_string(),
            model: "claude-sonnet-4-5".to_string(),
            api_key_env: "ANTHROPIC_API_KEY".to_string(),
        }
    }
}

/// Rate-limit retry settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub base_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay_secs: 10,
        }
    }
}

impl RetryConfig {
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            base_delay: Duration::from_secs(self.base_delay_secs),
        }
    }
}

/// Discovery loop settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    pub enforce_adjacency: bool,
    pub verbose_cell_description: bool,
    pub max_iterations: usize,
    pub max_context_tokens: u64,
    pub max_output_tokens: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        let params = SolveParams::default();
        Self {
            enforce_adjacency: params.enforce_adjacency,
            verbose_cell_description: params.verbose_cell_description,
            max_iterations: params.max_iterations,
            max_context_tokens: params.max_context_tokens,
            max_output_tokens: params.max_output_tokens,
        }
    }
}

impl SolverConfig {
    pub fn params(&self) -> SolveParams {
        SolveParams {
            enforce_adjacency: self.enforce_adjacency,
            verbose_cell_description: self.verbose_cell_description,
            max_iterations: self.max_iterations,
            max_context_tokens: self.max_context_tokens,
            max_output_tokens: self.max_output_tokens,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Figment;
    use figment::providers::{Format, Serialized, Toml};

    #[test]
    fn test_defaults_mirror_solve_params() {
        let config = FileConfig::default();
        assert_eq!(config.provider.api_key_env, "ANTHROPIC_API_KEY");
        assert_eq!(config.retry.max_attempts, 5);
        assert_eq!(config.retry.base_delay_secs, 10);

        let params = config.solver.params();
        assert!(params.enforce_adjacency);
        assert_eq!(params.max_iterations, 10_000);
        assert_eq!(params.max_context_tokens, 200_000);
    }

    #[test]
    fn test_retry_policy_conversion() {
        let policy = RetryConfig {
            max_attempts: 3,
            base_delay_secs: 2,
        }
        .policy();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.delay(1), Duration::from_secs(4));
    }

    #[test]
    fn test_partial_toml_overrides_defaults() {
        let figment = Figment::new()
            .merge(Serialized::defaults(FileConfig::default()))
            .merge(Toml::string(
                r#"
                [provider]
                model = "claude-haiku-4-5"

                [solver]
                verbose_cell_description = false
                "#,
            ));
        let config: FileConfig = figment.extract().unwrap();

        assert_eq!(config.provider.model, "claude-haiku-4-5");
        // Untouched fields keep their defaults.
        assert_eq!(config.provider.base_url, "https://api.anthropic.com");
        assert!(!config.solver.verbose_cell_description);
        assert!(config.solver.enforce_adjacency);
    }

    #[test]
    fn test_defaults_round_trip_through_toml() {
        let rendered = toml::to_string(&FileConfig::default()).unwrap();
        let parsed: FileConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.provider.model, FileConfig::default().provider.model);
        assert_eq!(parsed.retry.max_attempts, 5);
    }
}
