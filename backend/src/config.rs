//! Host settings, read from the environment at start-up.
//!
//! | variable                      | default                 |
//! |-------------------------------|-------------------------|
//! | `VAULT_CONSOLE_HOST`          | `127.0.0.1`             |
//! | `VAULT_CONSOLE_PORT`          | `8080`                  |
//! | `ETL_API_URL`                 | `http://localhost:8000` |
//! | `VAULT_CONSOLE_NO_BROWSER`    | unset (browser opens)   |
//! | `VAULT_CONSOLE_MAX_UPLOAD_MB` | `512`                   |

use thiserror::Error;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_ETL_API_URL: &str = "http://localhost:8000";
const DEFAULT_MAX_UPLOAD_MB: usize = 512;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} inválido: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// ETL service every `/api/*` request is forwarded to, without trailing slash.
    pub etl_api_url: String,
    pub open_browser: bool,
    /// Largest request body accepted by the proxy (batch uploads).
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = match get("VAULT_CONSOLE_PORT") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                name: "VAULT_CONSOLE_PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };
        let max_upload_mb: usize = match get("VAULT_CONSOLE_MAX_UPLOAD_MB") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                name: "VAULT_CONSOLE_MAX_UPLOAD_MB",
                value,
            })?,
            None => DEFAULT_MAX_UPLOAD_MB,
        };
        let etl_api_url = get("ETL_API_URL").unwrap_or_else(|| DEFAULT_ETL_API_URL.to_string());
        if !(etl_api_url.starts_with("http://") || etl_api_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                name: "ETL_API_URL",
                value: etl_api_url,
            });
        }
        let open_browser = !matches!(
            get("VAULT_CONSOLE_NO_BROWSER").as_deref(),
            Some("1" | "true" | "yes")
        );

        Ok(Self {
            host: get("VAULT_CONSOLE_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            etl_api_url: etl_api_url.trim_end_matches('/').to_string(),
            open_browser,
            max_upload_bytes: max_upload_mb * 1024 * 1024,
        })
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.url(), "http://127.0.0.1:8080");
        assert_eq!(config.etl_api_url, "http://localhost:8000");
        assert!(config.open_browser);
        assert_eq!(config.max_upload_bytes, 512 * 1024 * 1024);
    }

    #[test]
    fn overrides_are_read_and_normalised() {
        let config = Config::from_lookup(lookup(&[
            ("VAULT_CONSOLE_HOST", "0.0.0.0"),
            ("VAULT_CONSOLE_PORT", "9090"),
            ("ETL_API_URL", "http://etl.local:8000/api/"),
            ("VAULT_CONSOLE_NO_BROWSER", "1"),
            ("VAULT_CONSOLE_MAX_UPLOAD_MB", "64"),
        ]))
        .unwrap();
        assert_eq!(config.url(), "http://0.0.0.0:9090");
        assert_eq!(config.etl_api_url, "http://etl.local:8000/api");
        assert!(!config.open_browser);
        assert_eq!(config.max_upload_bytes, 64 * 1024 * 1024);
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = Config::from_lookup(lookup(&[("VAULT_CONSOLE_PORT", "  ")])).unwrap();
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert_eq!(
            Config::from_lookup(lookup(&[("VAULT_CONSOLE_PORT", "http")])),
            Err(ConfigError::Invalid {
                name: "VAULT_CONSOLE_PORT",
                value: "http".into()
            })
        );
        assert!(Config::from_lookup(lookup(&[("ETL_API_URL", "localhost:8000")])).is_err());
    }
}
