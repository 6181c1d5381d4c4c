//! Process configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use chrono::NaiveDate;
use thiserror::Error;

use dumroo_ai::ModelConfig;

pub const API_KEY_VAR: &str = "GOOGLE_API_KEY";
pub const DATA_PATH_VAR: &str = "DUMROO_DATA_PATH";
pub const BIND_ADDR_VAR: &str = "DUMROO_BIND_ADDR";
pub const MODEL_VAR: &str = "DUMROO_MODEL";
pub const TEMPERATURE_VAR: &str = "DUMROO_TEMPERATURE";
pub const TIMEOUT_VAR: &str = "DUMROO_TIMEOUT_SECS";
pub const REFERENCE_DATE_VAR: &str = "DUMROO_REFERENCE_DATE";
pub const ENDPOINT_VAR: &str = "DUMROO_GEMINI_ENDPOINT";

const DEFAULT_DATA_PATH: &str = "data/students.json";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set; export your Gemini API key as {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {message}")]
    Invalid { name: &'static str, message: String },
}

/// Fully resolved runtime configuration.
#[derive(Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub data_path: PathBuf,
    pub bind_addr: SocketAddr,
    pub model: ModelConfig,
}

impl core::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &"<redacted>")
            .field("data_path", &self.data_path)
            .field("bind_addr", &self.bind_addr)
            .field("model", &self.model)
            .finish()
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve configuration through `lookup`; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_key = get(API_KEY_VAR).ok_or(ConfigError::Missing(API_KEY_VAR))?;

        let data_path =
            PathBuf::from(get(DATA_PATH_VAR).unwrap_or_else(|| DEFAULT_DATA_PATH.to_string()));

        let bind_addr = parse_or(get(BIND_ADDR_VAR), BIND_ADDR_VAR, || {
            SocketAddr::from_str(DEFAULT_BIND_ADDR).map_err(|e| e.to_string())
        })?;

        let mut model = ModelConfig::default();

        if let Some(name) = get(MODEL_VAR) {
            model = model.with_model(name.trim());
        }

        if let Some(raw) = get(TEMPERATURE_VAR) {
            let t: f32 = parse(&raw, TEMPERATURE_VAR)?;
            if !(t.is_finite() && t >= 0.0) {
                return Err(invalid(TEMPERATURE_VAR, "must be a finite number >= 0"));
            }
            model = model.with_temperature(t);
        }

        if let Some(raw) = get(TIMEOUT_VAR) {
            let secs: u64 = parse(&raw, TIMEOUT_VAR)?;
            if secs == 0 {
                return Err(invalid(TIMEOUT_VAR, "must be at least 1 second"));
            }
            model = model.with_timeout(Duration::from_secs(secs));
        }

        if let Some(raw) = get(REFERENCE_DATE_VAR) {
            let date: NaiveDate = parse(&raw, REFERENCE_DATE_VAR)?;
            model = model.with_reference_date(date);
        }

        if let Some(endpoint) = get(ENDPOINT_VAR) {
            model = model.with_endpoint(endpoint.trim());
        }

        Ok(Self {
            api_key,
            data_path,
            bind_addr,
            model,
        })
    }
}

fn invalid(name: &'static str, message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        name,
        message: message.into(),
    }
}

fn parse<T>(raw: &str, name: &'static str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: core::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| invalid(name, format!("'{}': {e}", raw.trim())))
}

fn parse_or<T, D>(raw: Option<String>, name: &'static str, default: D) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: core::fmt::Display,
    D: FnOnce() -> Result<T, String>,
{
    match raw {
        Some(raw) => parse(&raw, name),
        None => default().map_err(|e| invalid(name, e)),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_only_key_is_set() {
        let cfg = AppConfig::from_lookup(lookup(&[(API_KEY_VAR, "k")])).unwrap();
        assert_eq!(cfg.api_key, "k");
        assert_eq!(cfg.data_path, PathBuf::from("data/students.json"));
        assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:8080");
        assert_eq!(cfg.model, ModelConfig::default());
    }

    #[test]
    fn missing_or_blank_key_is_an_error() {
        assert_eq!(
            AppConfig::from_lookup(lookup(&[])).unwrap_err(),
            ConfigError::Missing(API_KEY_VAR)
        );
        assert_eq!(
            AppConfig::from_lookup(lookup(&[(API_KEY_VAR, "  ")])).unwrap_err(),
            ConfigError::Missing(API_KEY_VAR)
        );
    }

    #[test]
    fn overrides_are_applied() {
        let cfg = AppConfig::from_lookup(lookup(&[
            (API_KEY_VAR, "k"),
            (DATA_PATH_VAR, "/srv/data.json"),
            (BIND_ADDR_VAR, "127.0.0.1:9000"),
            (MODEL_VAR, "gemini-1.5-pro"),
            (TEMPERATURE_VAR, "0.4"),
            (TIMEOUT_VAR, "15"),
            (REFERENCE_DATE_VAR, "2025-09-01"),
            (ENDPOINT_VAR, "http://localhost:9999/v1beta"),
        ]))
        .unwrap();

        assert_eq!(cfg.data_path, PathBuf::from("/srv/data.json"));
        assert_eq!(cfg.bind_addr.port(), 9000);
        assert_eq!(cfg.model.model, "gemini-1.5-pro");
        assert_eq!(cfg.model.temperature, 0.4);
        assert_eq!(cfg.model.timeout, Duration::from_secs(15));
        assert_eq!(
            cfg.model.reference_date,
            NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()
        );
        assert_eq!(cfg.model.endpoint, "http://localhost:9999/v1beta");
    }

    #[test]
    fn malformed_values_are_rejected_not_defaulted() {
        for (name, value) in [
            (BIND_ADDR_VAR, "not-an-addr"),
            (TEMPERATURE_VAR, "warm"),
            (TEMPERATURE_VAR, "-1"),
            (TIMEOUT_VAR, "0"),
            (TIMEOUT_VAR, "soon"),
            (REFERENCE_DATE_VAR, "10/07/2025"),
        ] {
            let err =
                AppConfig::from_lookup(lookup(&[(API_KEY_VAR, "k"), (name, value)])).unwrap_err();
            assert!(
                matches!(err, ConfigError::Invalid { name: n, .. } if n == name),
                "{name}={value} should be invalid, got {err:?}"
            );
        }
    }

    #[test]
    fn debug_redacts_api_key() {
        let cfg = AppConfig::from_lookup(lookup(&[(API_KEY_VAR, "super-secret")])).unwrap();
        assert!(!format!("{cfg:?}").contains("super-secret"));
    }
}
