// src/config/models.rs
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_TIMEOUT_MESSAGE: &str = "Request timed out.";
pub const DEFAULT_VERSION_COMMAND: &str = "docker version --format '{{.Server.Version}}'";
pub const DEFAULT_SHELL: &str = "sh";

/// Everything except the probe list. Each field can be overridden through a
/// `HEALTHCHECK_*` environment variable.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Settings {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: SocketAddr,

    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    #[serde(default = "default_timeout_message")]
    pub timeout_message: String,

    #[serde(default = "default_version_command")]
    pub version_command: String,

    #[serde(default = "default_shell")]
    pub shell: String,
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.shell.trim().is_empty() {
            return Err(ConfigError::EmptyShell);
        }
        if self.version_command.trim().is_empty() {
            return Err(ConfigError::EmptyVersionCommand);
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            request_timeout_ms: default_request_timeout_ms(),
            timeout_message: default_timeout_message(),
            version_command: default_version_command(),
            shell: default_shell(),
        }
    }
}

/// Process-wide configuration. Built once in `main`, read-only afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    pub settings: Settings,
    /// Probe command lines, in the order they were given on the command line.
    pub probes: Arc<[String]>,
}

impl Config {
    pub fn new(settings: Settings, probes: Vec<String>) -> Self {
        Self {
            settings,
            probes: probes.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.settings.validate()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read settings: {0}")]
    Source(#[from] config::ConfigError),

    #[error("request timeout must be greater than zero")]
    ZeroTimeout,

    #[error("shell must not be empty")]
    EmptyShell,

    #[error("version command must not be empty")]
    EmptyVersionCommand,
}

fn default_listen_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

fn default_request_timeout_ms() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_MS
}

fn default_timeout_message() -> String {
    DEFAULT_TIMEOUT_MESSAGE.to_string()
}

fn default_version_command() -> String {
    DEFAULT_VERSION_COMMAND.to_string()
}

fn default_shell() -> String {
    DEFAULT_SHELL.to_string()
}
