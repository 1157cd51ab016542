//! Startup configuration.
//!
//! Settings come from the process environment (after an optional `.env` file
//! has been loaded by the CLI) and may be overridden by command-line flags.
//! The resulting [`AppConfig`] is built once and passed explicitly to the
//! plan generator and the web layer.

use std::{env, time::Duration};

use crate::{
    error::{Result, TripMateError},
    services::Provider,
};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 7860;
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Values supplied on the command line; `None` falls back to the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub provider: Option<Provider>,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Clone)]
pub struct AppConfig {
    provider: Provider,
    api_key: String,
    model: Option<String>,
    base_url: Option<String>,
    timeout: Duration,
    host: String,
    port: u16,
}

impl AppConfig {
    pub fn new(provider: Provider, api_key: impl Into<String>) -> Self {
        Self {
            provider,
            api_key: api_key.into(),
            model: None,
            base_url: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }

    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::load(ConfigOverrides::default())
    }

    /// Read configuration from the process environment, preferring `overrides`
    pub fn load(overrides: ConfigOverrides) -> Result<Self> {
        Self::load_with(overrides, |name| env::var(name).ok())
    }

    pub(crate) fn load_with<F>(overrides: ConfigOverrides, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let provider = match overrides.provider {
            Some(provider) => provider,
            None => lookup("TRIPMATE_PROVIDER")
                .map(|value| value.parse::<Provider>())
                .transpose()?
                .unwrap_or_default(),
        };

        let api_key = overrides
            .api_key
            .filter(|key| !key.trim().is_empty())
            .or_else(|| provider.api_key_vars().iter().find_map(|&name| lookup(name)))
            .ok_or_else(|| {
                TripMateError::Config(format!(
                    "Could not find {}. Make sure you have it set in a .env file.",
                    provider.api_key_vars().join(" or ")
                ))
            })?;

        let timeout_secs = match overrides.timeout_secs {
            Some(secs) => secs,
            None => lookup("TRIPMATE_TIMEOUT_SECS")
                .map(|value| {
                    value.trim().parse::<u64>().map_err(|_| {
                        TripMateError::Config(format!(
                            "TRIPMATE_TIMEOUT_SECS must be a number of seconds, got `{}`",
                            value
                        ))
                    })
                })
                .transpose()?
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        };

        let port = match overrides.port {
            Some(port) => port,
            None => lookup("PORT")
                .map(|value| {
                    value.trim().parse::<u16>().map_err(|_| {
                        TripMateError::Config(format!("PORT must be a port number, got `{}`", value))
                    })
                })
                .transpose()?
                .unwrap_or(DEFAULT_PORT),
        };

        Ok(Self {
            provider,
            api_key: api_key.trim().to_string(),
            model: overrides.model.or_else(|| lookup("TRIPMATE_MODEL")),
            base_url: overrides.base_url.or_else(|| lookup("TRIPMATE_BASE_URL")),
            timeout: Duration::from_secs(timeout_secs),
            host: overrides
                .host
                .or_else(|| lookup("HOST"))
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_bind(mut self, host: impl Into<String>, port: u16) -> Self {
        self.host = host.into();
        self.port = port;
        self
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.provider.default_model())
    }

    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.provider.default_base_url())
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("provider", &self.provider)
            .field("api_key", &"<redacted>")
            .field("model", &self.model())
            .field("base_url", &self.base_url())
            .field("timeout", &self.timeout)
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}
