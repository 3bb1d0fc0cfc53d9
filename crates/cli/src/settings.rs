//! CLI configuration
//!
//! Sources, lowest priority first: built-in defaults, the `--config` file,
//! `VIGIL_*` environment variables (e.g. `VIGIL_CLIENT__BASE_URL`), then
//! command-line flags.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use vigil_http::{AuthClient, ClientError, DEFAULT_SESSION_PATH};

/// Top-level CLI settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub client: ClientSettings,

    #[serde(default)]
    pub watcher: WatcherSettings,
}

/// Auth backend connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// Base URL of the auth backend
    pub base_url: String,

    /// Path of the "get session" endpoint
    pub session_path: String,

    /// Bearer token sent with every request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bearer_token: Option<String>,

    /// Raw cookie header sent with every request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookie: Option<String>,

    /// Request timeout in seconds (0 disables the timeout)
    pub timeout_secs: u64,
}

/// Polling settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatcherSettings {
    /// Seconds between session checks
    pub interval_secs: u64,
}

/// Values given on the command line
#[derive(Debug, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub interval_secs: Option<u64>,
    pub bearer_token: Option<String>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            session_path: DEFAULT_SESSION_PATH.to_string(),
            bearer_token: None,
            cookie: None,
            timeout_secs: 30,
        }
    }
}

impl Default for WatcherSettings {
    fn default() -> Self {
        Self { interval_secs: 60 }
    }
}

impl Settings {
    /// Load settings from defaults, an optional file and the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = Self::default();

        let mut builder = config::Config::builder()
            .set_default("client.base_url", defaults.client.base_url)?
            .set_default("client.session_path", defaults.client.session_path)?
            .set_default("client.timeout_secs", defaults.client.timeout_secs)?
            .set_default("watcher.interval_secs", defaults.watcher.interval_secs)?;

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix("VIGIL")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Apply command-line values on top of the loaded settings
    pub fn apply_overrides(&mut self, overrides: Overrides) {
        if let Some(base_url) = overrides.base_url {
            self.client.base_url = base_url;
        }
        if let Some(interval_secs) = overrides.interval_secs {
            self.watcher.interval_secs = interval_secs;
        }
        if let Some(token) = overrides.bearer_token {
            self.client.bearer_token = Some(token);
        }
    }

    /// Copy with credentials masked, for display
    pub fn redacted(&self) -> Self {
        let mut settings = self.clone();
        if settings.client.bearer_token.is_some() {
            settings.client.bearer_token = Some("<redacted>".to_string());
        }
        if settings.client.cookie.is_some() {
            settings.client.cookie = Some("<redacted>".to_string());
        }
        settings
    }
}

impl ClientSettings {
    /// Build an HTTP client from these settings
    pub fn build_client(&self) -> Result<AuthClient, ClientError> {
        let mut builder = AuthClient::builder()
            .base_url(&self.base_url)
            .session_path(&self.session_path);

        if self.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(self.timeout_secs));
        }
        if let Some(token) = &self.bearer_token {
            builder = builder.bearer_token(token);
        }
        if let Some(cookie) = &self.cookie {
            builder = builder.cookie(cookie);
        }

        builder.build()
    }
}

impl WatcherSettings {
    pub const fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}
