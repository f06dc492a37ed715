use crate::api::{ApiConfig, EnvToken, TokenFile, TokenSource};
use crate::domain::GeoPoint;
use crate::poller::DEFAULT_POLL_INTERVAL;
use color_eyre::eyre::{eyre, Result};
use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";

const API_URL_VAR: &str = "WILDTRAILS_API_URL";
const TOKEN_FILE_VAR: &str = "WILDTRAILS_TOKEN_FILE";
const TOKEN_VAR: &str = "WILDTRAILS_TOKEN";
const POLL_SECS_VAR: &str = "WILDTRAILS_POLL_SECS";
const LOG_DIR_VAR: &str = "WILDTRAILS_LOG_DIR";

/// Runtime settings resolved from the environment (and `.env`).
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_url: String,
    pub token_file: PathBuf,
    /// Read the token from `WILDTRAILS_TOKEN` instead of the token file.
    pub token_from_env: bool,
    pub poll_interval: Duration,
    pub log_dir: PathBuf,
    pub home: GeoPoint,
}

/// Loads `.env` and builds the configuration from the process environment.
pub fn init_app_config() -> Result<AppConfig> {
    dotenv().ok();
    AppConfig::from_lookup(|key| env::var(key).ok())
}

impl AppConfig {
    /// Builds the configuration from any key lookup, so tests need not touch
    /// the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let poll_interval = match value(POLL_SECS_VAR) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(eyre!(
                        "{POLL_SECS_VAR} must be a positive number of seconds, got {raw:?}"
                    ))
                }
            },
            None => DEFAULT_POLL_INTERVAL,
        };

        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wildtrails");

        Ok(Self {
            api_url: value(API_URL_VAR).unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            token_file: value(TOKEN_FILE_VAR)
                .map_or_else(|| config_dir.join("token"), PathBuf::from),
            token_from_env: value(TOKEN_VAR).is_some(),
            poll_interval,
            log_dir: value(LOG_DIR_VAR).map_or_else(|| config_dir.join("logs"), PathBuf::from),
            home: GeoPoint::YALA,
        })
    }

    pub fn token_source(&self) -> Arc<dyn TokenSource> {
        if self.token_from_env {
            Arc::new(EnvToken::new(TOKEN_VAR))
        } else {
            Arc::new(TokenFile::new(&self.token_file))
        }
    }

    pub fn api_config(&self) -> ApiConfig {
        ApiConfig::new(self.api_url.clone(), self.token_source())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect::<HashMap<_, _>>();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() -> Result<()> {
        let config = AppConfig::from_lookup(lookup(&[]))?;
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.poll_interval, Duration::from_secs(30));
        assert!(config.token_file.ends_with("wildtrails/token"));
        assert!(!config.token_from_env);
        assert_eq!(config.home, GeoPoint::YALA);
        Ok(())
    }

    #[test]
    fn environment_values_override_defaults() -> Result<()> {
        let config = AppConfig::from_lookup(lookup(&[
            (API_URL_VAR, "https://ops.wildtrails.lk"),
            (TOKEN_FILE_VAR, "/tmp/wt-token"),
            (TOKEN_VAR, "abc"),
            (POLL_SECS_VAR, "5"),
            (LOG_DIR_VAR, "/tmp/wt-logs"),
        ]))?;
        assert_eq!(config.api_url, "https://ops.wildtrails.lk");
        assert_eq!(config.token_file, PathBuf::from("/tmp/wt-token"));
        assert!(config.token_from_env);
        assert_eq!(config.poll_interval, Duration::from_secs(5));
        assert_eq!(config.log_dir, PathBuf::from("/tmp/wt-logs"));
        Ok(())
    }

    #[test]
    fn zero_poll_interval_is_rejected() {
        assert!(AppConfig::from_lookup(lookup(&[(POLL_SECS_VAR, "0")])).is_err());
        assert!(AppConfig::from_lookup(lookup(&[(POLL_SECS_VAR, "soon")])).is_err());
    }
}
