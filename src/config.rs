//! Service configuration module
//! Loads bind address, cron secret and store credentials from the environment

use crate::constants::{DEFAULT_HOST, DEFAULT_PORT, MIN_RECOMMENDED_SECRET_LEN};
use crate::error::{CronError, Result};
use std::env;
use url::Url;

/// Connection settings for the remote data store
#[derive(Clone)]
pub struct StoreConfig {
    /// Base URL of the store, always ending with '/'
    pub url: Url,
    /// Service credential sent with every procedure call
    pub service_key: String,
}

impl StoreConfig {
    /// Build a store configuration from a raw base URL and service key
    pub fn new(url: &str, service_key: impl Into<String>) -> Result<Self> {
        let service_key = service_key.into();
        if service_key.trim().is_empty() {
            return Err(CronError::ConfigError(
                "Store service key must not be empty".to_string(),
            ));
        }

        // Url::join drops the last path segment unless the base ends with '/'
        let mut url = Url::parse(url.trim())?;
        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(CronError::ConfigError(format!(
                    "Store URL must use http or https, got '{}'",
                    other
                )))
            }
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(Self { url, service_key })
    }
}

// Never print credentials
impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("url", &self.url.as_str())
            .field("service_key", &"<redacted>")
            .finish()
    }
}

/// Server configuration parameters
#[derive(Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Shared secret expected as `Bearer <secret>` on every cron request
    pub cron_secret: String,
    pub store: StoreConfig,
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("cron_secret", &"<redacted>")
            .field("store", &self.store)
            .finish()
    }
}

impl ServerConfig {
    /// Create a configuration explicitly, bypassing the environment
    pub fn new(
        host: impl Into<String>,
        port: u16,
        cron_secret: impl Into<String>,
        store: StoreConfig,
    ) -> Result<Self> {
        let cron_secret = cron_secret.into();
        Self::validate_secret(&cron_secret)?;

        Ok(Self {
            host: host.into(),
            port,
            cron_secret,
            store,
        })
    }

    /// Validate that the cron secret is usable
    fn validate_secret(secret: &str) -> Result<()> {
        if secret.trim().is_empty() {
            return Err(CronError::ConfigError(
                "Cron secret must not be empty".to_string(),
            ));
        }

        if secret.len() < MIN_RECOMMENDED_SECRET_LEN {
            log::warn!(
                "Cron secret is shorter than {} characters. Generate one with: openssl rand -base64 32",
                MIN_RECOMMENDED_SECRET_LEN
            );
        }

        Ok(())
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("MAINTENANCE_CRONS_HOST").unwrap_or(DEFAULT_HOST.to_string());
        let port = match lookup("MAINTENANCE_CRONS_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| {
                CronError::ConfigError(format!(
                    "MAINTENANCE_CRONS_PORT must be a port number, got '{}'",
                    raw
                ))
            })?,
            None => DEFAULT_PORT,
        };

        let cron_secret = lookup("MAINTENANCE_CRONS_SECRET")
            .or_else(|| lookup("CRON_SECRET"))
            .ok_or_else(|| {
                CronError::ConfigError(
                    "CRON_SECRET environment variable is required. \
                     Generate one with: openssl rand -base64 32"
                        .to_string(),
                )
            })?;

        let store_url = lookup("MAINTENANCE_CRONS_STORE_URL")
            .or_else(|| lookup("SUPABASE_URL"))
            .ok_or_else(|| {
                CronError::ConfigError("SUPABASE_URL environment variable is required".to_string())
            })?;

        let store_key = lookup("MAINTENANCE_CRONS_STORE_KEY")
            .or_else(|| lookup("SUPABASE_SERVICE_ROLE_KEY"))
            .ok_or_else(|| {
                CronError::ConfigError(
                    "SUPABASE_SERVICE_ROLE_KEY environment variable is required".to_string(),
                )
            })?;

        let store = StoreConfig::new(&store_url, store_key)?;

        Self::new(host, port, cron_secret, store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_requires_secret() {
        let result = ServerConfig::from_lookup(lookup_from(&[
            ("SUPABASE_URL", "https://store.example.com"),
            ("SUPABASE_SERVICE_ROLE_KEY", "service-key"),
        ]));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("CRON_SECRET"));
    }

    #[test]
    fn test_from_lookup_requires_store_credentials() {
        let result = ServerConfig::from_lookup(lookup_from(&[
            ("CRON_SECRET", "a-long-enough-cron-secret-value"),
            ("SUPABASE_URL", "https://store.example.com"),
        ]));
        assert!(result.unwrap_err().to_string().contains("SUPABASE_SERVICE_ROLE_KEY"));
    }

    #[test]
    fn test_from_lookup_defaults_and_aliases() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("CRON_SECRET", "a-long-enough-cron-secret-value"),
            ("SUPABASE_URL", "https://store.example.com"),
            ("SUPABASE_SERVICE_ROLE_KEY", "service-key"),
        ]))
        .unwrap();

        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.cron_secret, "a-long-enough-cron-secret-value");
        assert_eq!(config.store.url.as_str(), "https://store.example.com/");
        assert_eq!(config.store.service_key, "service-key");
    }

    #[test]
    fn test_prefixed_variables_take_precedence() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("MAINTENANCE_CRONS_PORT", "8081"),
            ("MAINTENANCE_CRONS_SECRET", "prefixed-secret-value-1234"),
            ("CRON_SECRET", "fallback-secret-value-5678"),
            ("MAINTENANCE_CRONS_STORE_URL", "http://127.0.0.1:54321/base"),
            ("MAINTENANCE_CRONS_STORE_KEY", "prefixed-key"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8081);
        assert_eq!(config.cron_secret, "prefixed-secret-value-1234");
        assert_eq!(config.store.url.as_str(), "http://127.0.0.1:54321/base/");
        assert_eq!(config.store.service_key, "prefixed-key");
    }

    #[test]
    fn test_rejects_unparsable_port() {
        let result = ServerConfig::from_lookup(lookup_from(&[
            ("MAINTENANCE_CRONS_PORT", "80a"),
            ("CRON_SECRET", "a-long-enough-cron-secret-value"),
            ("SUPABASE_URL", "https://store.example.com"),
            ("SUPABASE_SERVICE_ROLE_KEY", "service-key"),
        ]));
        let err = result.unwrap_err();
        assert!(matches!(err, CronError::ConfigError(_)));
        assert!(err.to_string().contains("MAINTENANCE_CRONS_PORT"));
        assert!(err.to_string().contains("80a"));
    }

    #[test]
    fn test_rejects_blank_secret_and_bad_url() {
        let store = StoreConfig::new("https://store.example.com", "key").unwrap();
        assert!(ServerConfig::new("127.0.0.1", 3000, "   ", store).is_err());

        assert!(StoreConfig::new("not a url", "key").is_err());
        assert!(StoreConfig::new("ftp://store.example.com", "key").is_err());
        assert!(StoreConfig::new("https://store.example.com", "").is_err());
    }

    #[test]
    fn test_debug_redacts_credentials() {
        let store = StoreConfig::new("https://store.example.com", "service-key").unwrap();
        let config = ServerConfig::new("127.0.0.1", 3000, "cron-secret-value-123", store).unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("service-key"));
        assert!(!rendered.contains("cron-secret-value-123"));
    }
}
