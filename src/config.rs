//! Server configuration.
//!
//! Every option can come from a command-line flag or an environment
//! variable; flags win.

use crate::{DEFAULT_HOST, DEFAULT_MOUNT, DEFAULT_PORT};
use clap::Parser;

/// Errors from validating configuration values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("mount path must start with '/': {0:?}")]
    MountNotAbsolute(String),

    #[error("mount path must not be '/' or end with '/': {0:?}")]
    MountTrailingSlash(String),
}

/// Checks that a mount path can be nested into a router.
pub fn parse_mount(path: &str) -> Result<String, ConfigError> {
    if !path.starts_with('/') {
        return Err(ConfigError::MountNotAbsolute(path.to_string()));
    }
    if path.ends_with('/') {
        return Err(ConfigError::MountTrailingSlash(path.to_string()));
    }
    Ok(path.to_string())
}

/// commentd - a comment resource API over HTTP
#[derive(Debug, Clone, Parser)]
#[command(name = "commentd", version, about)]
pub struct Config {
    /// Host to bind to
    #[arg(short = 'H', long, env = "COMMENTD_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "COMMENTD_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Path prefix the comment routes are mounted under
    #[arg(long, env = "COMMENTD_MOUNT", default_value = DEFAULT_MOUNT, value_parser = parse_mount)]
    pub mount: String,

    /// Log filter directive, e.g. "info" or "commentd=debug"
    #[arg(long, env = "COMMENTD_LOG", default_value = "info")]
    pub log_level: String,
}

impl Config {
    /// Returns the bind address as a string
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
