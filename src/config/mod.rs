//! Configuration handling for the application.
//!
//! Everything is read from environment variables with development defaults,
//! so the binary starts with no setup. `Config::from_env` performs the
//! loading and validates the few values that can actually be wrong.

use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// Environment variable names. Public so tests can refer to them.
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_POP_BASE_URL: &str = "POP_BASE_URL";
pub const ENV_RENDER_BUDGET_SECS: &str = "RENDER_BUDGET_SECS";

/// Default development values used when environment variables are absent.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_POP_BASE_URL: &str = "https://www.psacard.com/pop";
const DEFAULT_RENDER_BUDGET_SECS: u64 = 20;

/// Application runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    bind_addr: String,
    pop_base_url: String,
    render_budget_secs: u64,
}

impl Config {
    /// Create a new config explicitly.
    pub fn new(
        bind_addr: impl Into<String>,
        pop_base_url: impl Into<String>,
        render_budget_secs: u64,
    ) -> Self {
        Self {
            bind_addr: bind_addr.into(),
            pop_base_url: pop_base_url.into(),
            render_budget_secs,
        }
    }

    /// Load from environment variables, falling back to development defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = env::var(ENV_BIND_ADDR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let pop_base_url =
            env::var(ENV_POP_BASE_URL).unwrap_or_else(|_| DEFAULT_POP_BASE_URL.to_string());

        let render_budget_secs = match env::var(ENV_RENDER_BUDGET_SECS) {
            Ok(raw) => raw.parse::<u64>().ok().filter(|secs| *secs > 0).ok_or(
                ConfigError::InvalidValue {
                    field: ENV_RENDER_BUDGET_SECS,
                    reason: format!("expected a positive integer, got {raw:?}"),
                },
            )?,
            Err(_) => DEFAULT_RENDER_BUDGET_SECS,
        };

        Ok(Self {
            bind_addr,
            pop_base_url,
            render_budget_secs,
        })
    }

    /// TCP bind address (host:port) for the HTTP server.
    pub fn bind_addr(&self) -> &str {
        &self.bind_addr
    }
    /// Base URL that set slugs are joined onto to address a pop-report page.
    pub fn pop_base_url(&self) -> &str {
        &self.pop_base_url
    }
    /// Overall time budget for one rendered-page acquisition.
    pub fn render_budget(&self) -> Duration {
        Duration::from_secs(self.render_budget_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(
            DEFAULT_BIND_ADDR,
            DEFAULT_POP_BASE_URL,
            DEFAULT_RENDER_BUDGET_SECS,
        )
    }
}

/// Errors that can occur while building a configuration.
#[derive(Debug)]
pub enum ConfigError {
    InvalidValue { field: &'static str, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl Error for ConfigError {}
