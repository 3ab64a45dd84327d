use std::time::Duration;

use thiserror::Error;

use crate::chat::prompts::PromptStyle;

pub const DEFAULT_LLM_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_LLM_MODEL: &str = "gpt-3.5-turbo";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Required environment variable '{key}' is not set")]
    Missing { key: &'static str },

    #[error("Environment variable '{key}' is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },

    #[error("Could not build HTTP client: {0}")]
    HttpClient(String),
}

/// Settings for the text-generation endpoint.
#[derive(Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    /// `None` leaves the transport default in place.
    pub timeout: Option<Duration>,
}

// Hand-written so the credential never reaches a log line.
impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Application configuration loaded from environment variables.
/// Startup aborts if the API key is missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub llm: LlmConfig,
    pub prompt_style: PromptStyle,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. `from_env` passes the
    /// process environment; tests pass a fixed map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("OPENAI_API_KEY").ok_or(ConfigError::Missing {
            key: "OPENAI_API_KEY",
        })?;
        validate_api_key(&api_key)?;

        let timeout = match lookup("LLM_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw.parse::<u64>().map_err(|e| ConfigError::Invalid {
                    key: "LLM_TIMEOUT_SECS",
                    reason: e.to_string(),
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        let prompt_style = match lookup("PROMPT_STYLE") {
            Some(raw) => raw.parse::<PromptStyle>().map_err(|reason| ConfigError::Invalid {
                key: "PROMPT_STYLE",
                reason,
            })?,
            None => PromptStyle::default(),
        };

        let port = lookup("PORT")
            .unwrap_or_else(|| "8080".to_string())
            .parse::<u16>()
            .map_err(|e| ConfigError::Invalid {
                key: "PORT",
                reason: format!("must be a valid port number ({e})"),
            })?;

        Ok(Config {
            llm: LlmConfig {
                api_key,
                base_url: lookup("LLM_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_LLM_BASE_URL.to_string()),
                model: lookup("LLM_MODEL").unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string()),
                timeout,
            },
            prompt_style,
            port,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

/// Rejects keys that can never authenticate, so a bad credential is caught at
/// startup instead of surfacing as an upstream 401.
pub fn validate_api_key(key: &str) -> Result<(), ConfigError> {
    if key.trim().is_empty() {
        return Err(ConfigError::Invalid {
            key: "OPENAI_API_KEY",
            reason: "must not be blank".to_string(),
        });
    }
    if key.chars().any(char::is_whitespace) {
        return Err(ConfigError::Invalid {
            key: "OPENAI_API_KEY",
            reason: "must not contain whitespace".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_missing_api_key_is_config_error() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing { key: "OPENAI_API_KEY" }));
    }

    #[test]
    fn test_blank_api_key_is_invalid() {
        let err = Config::from_lookup(lookup_from(&[("OPENAI_API_KEY", "   ")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "OPENAI_API_KEY", .. }));
    }

    #[test]
    fn test_defaults_applied() {
        let config = Config::from_lookup(lookup_from(&[("OPENAI_API_KEY", "sk-test")])).unwrap();
        assert_eq!(config.llm.base_url, DEFAULT_LLM_BASE_URL);
        assert_eq!(config.llm.model, DEFAULT_LLM_MODEL);
        assert!(config.llm.timeout.is_none());
        assert_eq!(config.prompt_style, PromptStyle::Plain);
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
    }

    #[test]
    fn test_overrides_applied() {
        let config = Config::from_lookup(lookup_from(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("LLM_BASE_URL", "http://localhost:11434/v1"),
            ("LLM_MODEL", "gemma3:12b"),
            ("LLM_TIMEOUT_SECS", "30"),
            ("PROMPT_STYLE", "delimited"),
            ("PORT", "9000"),
        ]))
        .unwrap();
        assert_eq!(config.llm.base_url, "http://localhost:11434/v1");
        assert_eq!(config.llm.model, "gemma3:12b");
        assert_eq!(config.llm.timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.prompt_style, PromptStyle::Delimited);
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn test_bad_port_rejected() {
        let err = Config::from_lookup(lookup_from(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("PORT", "not-a-port"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = Config::from_lookup(lookup_from(&[("OPENAI_API_KEY", "sk-secret")])).unwrap();
        let printed = format!("{config:?}");
        assert!(!printed.contains("sk-secret"));
        assert!(printed.contains("<redacted>"));
    }
}
