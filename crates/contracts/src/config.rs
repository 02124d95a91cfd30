//! Typed environment configuration shared by the server and build tooling.
//!
//! Values are read through OrthoConfig from `SITEGEN_*` environment variables
//! (or the matching CLI flags and config file keys). The port carries an
//! OrthoConfig default so an empty environment still loads; the remaining
//! fields are optional and their accessors apply defaults.

use std::fmt;
use std::str::FromStr;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

/// Port used when `SITEGEN_PORT` is unset.
pub const DEFAULT_PORT: u16 = 3001;
/// API base URL used when `SITEGEN_API_BASE_URL` is unset.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3001/api";
/// Client origin used when `SITEGEN_CLIENT_ORIGIN` is unset.
pub const DEFAULT_CLIENT_ORIGIN: &str = "http://localhost:3000";

/// Configuration values that fail to parse or are missing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// `SITEGEN_ENVIRONMENT` holds an unknown value.
    #[error("unknown environment `{0}`; expected development, test or production")]
    UnknownEnvironment(String),
    /// A URL setting could not be parsed.
    #[error("{name} is not a valid URL: {message}")]
    InvalidUrl {
        /// Setting name.
        name: &'static str,
        /// Parser message.
        message: String,
    },
    /// A required setting is absent.
    #[error("{name} must be set in {environment}")]
    Missing {
        /// Setting name.
        name: &'static str,
        /// Environment that requires it.
        environment: RuntimeEnvironment,
    },
}

/// Deployment environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RuntimeEnvironment {
    /// Local development.
    #[default]
    Development,
    /// Automated test runs.
    Test,
    /// Live deployment.
    Production,
}

impl RuntimeEnvironment {
    /// Canonical lower-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Test => "test",
            Self::Production => "production",
        }
    }
}

impl fmt::Display for RuntimeEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuntimeEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "test" => Ok(Self::Test),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(ConfigError::UnknownEnvironment(s.to_owned())),
        }
    }
}

/// Environment settings loaded via OrthoConfig.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SITEGEN")]
pub struct EnvironmentSettings {
    /// Deployment environment name.
    pub environment: Option<String>,
    /// TCP port the API server listens on.
    #[ortho_config(default = 3001)]
    pub port: u16,
    /// Base URL the client uses to reach the API.
    pub api_base_url: Option<String>,
    /// Origin the web client is served from.
    pub client_origin: Option<String>,
    /// Connection string for the job store.
    pub database_url: Option<String>,
}

impl EnvironmentSettings {
    /// Configured environment, falling back to development.
    pub fn environment(&self) -> Result<RuntimeEnvironment, ConfigError> {
        self.environment
            .as_deref()
            .map_or(Ok(RuntimeEnvironment::default()), str::parse)
    }

    /// Configured port; [`DEFAULT_PORT`] unless overridden.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Configured API base URL, falling back to [`DEFAULT_API_BASE_URL`].
    pub fn api_base_url(&self) -> Result<Url, ConfigError> {
        parse_url(
            "SITEGEN_API_BASE_URL",
            self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL),
        )
    }

    /// Configured client origin, falling back to [`DEFAULT_CLIENT_ORIGIN`].
    pub fn client_origin(&self) -> Result<Url, ConfigError> {
        parse_url(
            "SITEGEN_CLIENT_ORIGIN",
            self.client_origin
                .as_deref()
                .unwrap_or(DEFAULT_CLIENT_ORIGIN),
        )
    }

    /// Configured database URL, if any.
    #[must_use]
    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref().filter(|url| !url.trim().is_empty())
    }

    /// Database URL, required in production and optional elsewhere.
    pub fn require_database_url(&self) -> Result<Option<&str>, ConfigError> {
        let environment = self.environment()?;
        match (environment, self.database_url()) {
            (RuntimeEnvironment::Production, None) => Err(ConfigError::Missing {
                name: "SITEGEN_DATABASE_URL",
                environment,
            }),
            (_, url) => Ok(url),
        }
    }
}

fn parse_url(name: &'static str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|err| ConfigError::InvalidUrl {
        name,
        message: err.to_string(),
    })
}
