//! Gateway configuration read from `PARLEY_*` environment variables.
//!
//! ```rust
//! use std::collections::HashMap;
//!
//! use parley::GatewayConfig;
//!
//! let vars = HashMap::from([("PARLEY_OLLAMA_MODEL", "llama3.2")]);
//! let config = GatewayConfig::from_lookup(|key| vars.get(key).map(|value| value.to_string()));
//!
//! assert_eq!(config.bind, "0.0.0.0:8080");
//! assert_eq!(config.ollama.as_ref().map(|b| b.default_model.as_str()), Some("llama3.2"));
//! assert!(config.openai.is_none());
//! ```

use std::time::Duration;

use crate::SecretString;

pub const DEFAULT_BIND: &str = "0.0.0.0:8080";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_OLLAMA_MODEL: &str = "gemma2:2b";
pub const DEFAULT_OLLAMA_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_OPENAI_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_OPENAI_TIMEOUT_SECS: u64 = 60;

/// Connection settings for one backend.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub base_url: String,
    pub default_model: String,
    pub timeout: Duration,
    pub api_key: Option<SecretString>,
}

impl BackendConfig {
    pub fn new(base_url: impl Into<String>, default_model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            default_model: default_model.into(),
            timeout: Duration::from_secs(DEFAULT_OLLAMA_TIMEOUT_SECS),
            api_key: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::new(api_key));
        self
    }
}

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub bind: String,
    pub log_level: String,
    pub log_json: bool,
    /// Prometheus listener address; no exporter is installed when unset.
    pub metrics_bind: Option<String>,
    /// `None` when `PARLEY_OLLAMA_ENABLED` is false.
    pub ollama: Option<BackendConfig>,
    /// `None` unless a non-empty `PARLEY_OPENAI_API_KEY` is set.
    pub openai: Option<BackendConfig>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl GatewayConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup. Missing or unparseable values take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |key: &str, default: &str| {
            non_empty(lookup(key)).unwrap_or_else(|| default.to_string())
        };
        let seconds = |key: &str, default: u64| {
            let secs = non_empty(lookup(key))
                .and_then(|value| value.parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(default);
            Duration::from_secs(secs)
        };
        let flag = |key: &str, default: bool| {
            non_empty(lookup(key))
                .and_then(|value| parse_bool(&value))
                .unwrap_or(default)
        };

        let ollama = flag("PARLEY_OLLAMA_ENABLED", true).then(|| {
            BackendConfig::new(
                text("PARLEY_OLLAMA_URL", DEFAULT_OLLAMA_URL),
                text("PARLEY_OLLAMA_MODEL", DEFAULT_OLLAMA_MODEL),
            )
            .with_timeout(seconds(
                "PARLEY_OLLAMA_TIMEOUT_SECS",
                DEFAULT_OLLAMA_TIMEOUT_SECS,
            ))
        });

        let openai = non_empty(lookup("PARLEY_OPENAI_API_KEY")).map(|api_key| {
            BackendConfig::new(
                text("PARLEY_OPENAI_URL", DEFAULT_OPENAI_URL),
                text("PARLEY_OPENAI_MODEL", DEFAULT_OPENAI_MODEL),
            )
            .with_timeout(seconds(
                "PARLEY_OPENAI_TIMEOUT_SECS",
                DEFAULT_OPENAI_TIMEOUT_SECS,
            ))
            .with_api_key(api_key)
        });

        Self {
            bind: text("PARLEY_BIND", DEFAULT_BIND),
            log_level: text("PARLEY_LOG", DEFAULT_LOG_LEVEL),
            log_json: flag("PARLEY_LOG_JSON", false),
            metrics_bind: non_empty(lookup("PARLEY_METRICS_BIND")),
            ollama,
            openai,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> GatewayConfig {
        let vars = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<HashMap<_, _>>();
        GatewayConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_enable_ollama_only() {
        let config = GatewayConfig::default();

        assert_eq!(config.bind, DEFAULT_BIND);
        assert_eq!(config.log_level, "info");
        assert!(!config.log_json);
        assert!(config.metrics_bind.is_none());
        assert!(config.openai.is_none());

        let ollama = config.ollama.expect("ollama enabled by default");
        assert_eq!(ollama.base_url, DEFAULT_OLLAMA_URL);
        assert_eq!(ollama.default_model, "gemma2:2b");
        assert_eq!(ollama.timeout, Duration::from_secs(120));
        assert!(ollama.api_key.is_none());
    }

    #[test]
    fn openai_requires_non_empty_key() {
        assert!(config_from(&[("PARLEY_OPENAI_API_KEY", "   ")]).openai.is_none());

        let config = config_from(&[
            ("PARLEY_OPENAI_API_KEY", "sk-test"),
            ("PARLEY_OPENAI_MODEL", "gpt-4o-mini"),
            ("PARLEY_OPENAI_TIMEOUT_SECS", "15"),
        ]);
        let openai = config.openai.expect("openai enabled");

        assert_eq!(openai.base_url, DEFAULT_OPENAI_URL);
        assert_eq!(openai.default_model, "gpt-4o-mini");
        assert_eq!(openai.timeout, Duration::from_secs(15));
        assert_eq!(
            openai.api_key.as_ref().map(SecretString::expose),
            Some("sk-test")
        );
    }

    #[test]
    fn unparseable_values_fall_back_to_defaults() {
        let config = config_from(&[
            ("PARLEY_LOG_JSON", "maybe"),
            ("PARLEY_OLLAMA_TIMEOUT_SECS", "soon"),
            ("PARLEY_OLLAMA_ENABLED", "sometimes"),
        ]);

        assert!(!config.log_json);
        assert_eq!(
            config.ollama.map(|ollama| ollama.timeout),
            Some(Duration::from_secs(DEFAULT_OLLAMA_TIMEOUT_SECS))
        );
    }

    #[test]
    fn ollama_can_be_disabled() {
        let config = config_from(&[
            ("PARLEY_OLLAMA_ENABLED", "false"),
            ("PARLEY_LOG_JSON", "true"),
            ("PARLEY_METRICS_BIND", "127.0.0.1:9000"),
        ]);

        assert!(config.ollama.is_none());
        assert!(config.log_json);
        assert_eq!(config.metrics_bind.as_deref(), Some("127.0.0.1:9000"));
    }
}
