use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

const DEFAULT_SUBMIT_TIMEOUT_SECS: u64 = 30;

/// Submission settings loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub submit_url: Option<String>,
    pub api_token: Option<String>,
    pub submit_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let submit_timeout = match var("DIAGNOSTIC_SUBMIT_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse()
                .context("DIAGNOSTIC_SUBMIT_TIMEOUT_SECS must be a whole number of seconds")?,
            None => DEFAULT_SUBMIT_TIMEOUT_SECS,
        };

        Ok(Self {
            submit_url: var("DIAGNOSTIC_SUBMIT_URL"),
            api_token: var("DIAGNOSTIC_API_TOKEN"),
            submit_timeout: Duration::from_secs(submit_timeout),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = config(&[]).unwrap();
        assert_eq!(config.submit_url, None);
        assert_eq!(config.api_token, None);
        assert_eq!(config.submit_timeout, Duration::from_secs(30));
    }

    #[test]
    fn reads_endpoint_token_and_timeout() {
        let config = config(&[
            ("DIAGNOSTIC_SUBMIT_URL", "https://intake.example.org/diagnostics"),
            ("DIAGNOSTIC_API_TOKEN", "tok_123"),
            ("DIAGNOSTIC_SUBMIT_TIMEOUT_SECS", " 5 "),
        ])
        .unwrap();
        assert_eq!(
            config.submit_url.as_deref(),
            Some("https://intake.example.org/diagnostics")
        );
        assert_eq!(config.api_token.as_deref(), Some("tok_123"));
        assert_eq!(config.submit_timeout, Duration::from_secs(5));
    }

    #[test]
    fn blank_values_are_unset() {
        let config = config(&[("DIAGNOSTIC_SUBMIT_URL", "  ")]).unwrap();
        assert_eq!(config.submit_url, None);
    }

    #[test]
    fn rejects_non_numeric_timeout() {
        let err = config(&[("DIAGNOSTIC_SUBMIT_TIMEOUT_SECS", "soon")]).unwrap_err();
        assert!(err.to_string().contains("DIAGNOSTIC_SUBMIT_TIMEOUT_SECS"));
    }
}
