//! Configuration for the analyst pipeline.
//!
//! Load order: `.ai-analyst/config.toml` → environment variables → defaults.
//! The API credential is never part of this config; it comes from the secret store.

use crate::error::{AnalystError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = ".ai-analyst";
const CONFIG_FILE: &str = "config.toml";

/// Top-level analyst configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalystConfig {
    pub completion: CompletionConfig,
    pub prompt: PromptConfig,
    pub secret: SecretConfig,
}

/// Remote completion service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    /// Model identifier sent with every request.
    pub model: String,
    /// Scheme and host of the Responses API, without the `/v1/...` path.
    pub base_url: String,
    /// Global request timeout. `None` leaves the transport default in place.
    pub timeout_secs: Option<u64>,
}

/// Prompt construction settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    /// Upper bound on the rendered prompt, in characters.
    pub max_chars: usize,
}

/// Where the API credential lives in the OS keyring.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecretConfig {
    pub service: String,
    pub account: String,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            model: "gpt-5.2".to_string(),
            base_url: "https://api.openai.com".to_string(),
            timeout_secs: None,
        }
    }
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            max_chars: crate::prompt::DEFAULT_MAX_PROMPT_CHARS,
        }
    }
}

impl Default for SecretConfig {
    fn default() -> Self {
        Self {
            service: "AI_Analyst".to_string(),
            account: "OpenAI".to_string(),
        }
    }
}

/// Helper to parse an env var and apply it to a config field.
fn env_override<T: std::str::FromStr>(var: &str, target: &mut T) {
    if let Ok(v) = std::env::var(var)
        && let Ok(n) = v.parse()
    {
        *target = n;
    }
}

/// Path of the config file for a given working directory.
pub fn config_file(work_dir: &Path) -> PathBuf {
    work_dir.join(CONFIG_DIR).join(CONFIG_FILE)
}

impl AnalystConfig {
    /// Load config from `.ai-analyst/config.toml` under `work_dir`, with env var overrides.
    /// Falls back to defaults if no config file exists.
    pub fn load(work_dir: &Path) -> Result<Self> {
        let path = config_file(work_dir);

        let mut config = if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|e| {
                AnalystError::Configuration(format!("failed to read {}: {e}", path.display()))
            })?;
            Self::from_toml(&content)?
        } else {
            Self::default()
        };

        env_override("AI_ANALYST_MODEL", &mut config.completion.model);
        env_override("AI_ANALYST_BASE_URL", &mut config.completion.base_url);
        if let Ok(v) = std::env::var("AI_ANALYST_TIMEOUT_SECS")
            && let Ok(secs) = v.parse()
        {
            config.completion.timeout_secs = Some(secs);
        }
        env_override("AI_ANALYST_MAX_PROMPT_CHARS", &mut config.prompt.max_chars);

        config.validate()?;
        tracing::debug!(
            model = %config.completion.model,
            max_prompt_chars = config.prompt.max_chars,
            "loaded analyst config"
        );
        Ok(config)
    }

    /// Parse a TOML document into a config. Unspecified fields keep their defaults.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| AnalystError::Configuration(format!("invalid config file: {e}")))
    }

    pub fn validate(&self) -> Result<()> {
        if self.completion.model.trim().is_empty() {
            return Err(AnalystError::Configuration(
                "completion.model must not be empty".to_string(),
            ));
        }
        if self.completion.base_url.trim().is_empty() {
            return Err(AnalystError::Configuration(
                "completion.base_url must not be empty".to_string(),
            ));
        }
        if self.prompt.max_chars == 0 {
            return Err(AnalystError::Configuration(
                "prompt.max_chars must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
