//! Error handling for the rnws CLI.
//!
//! This module provides a hierarchical error type system using `thiserror`.
//! Each variant is written to be actionable: where the user can do something
//! about a failure, the message ends with a `Hint:` line.
//!
//! # Architecture
//!
//! - **Top-level errors** (`CliError`) represent broad categories of failures
//! - **Domain-specific errors** (`ConfigError`, `ServerError`, `BundleError`)
//!   carry the detailed context
//! - **Error conversion** is automatic via `#[from]` attributes
//!
//! # Example
//!
//! ```rust,no_run
//! use rnws::error::{ConfigError, Result};
//! use std::path::Path;
//!
//! fn require_config(path: &Path) -> Result<()> {
//!     if !path.exists() {
//!         return Err(ConfigError::NotFound(path.to_path_buf()).into());
//!     }
//!     Ok(())
//! }
//! ```

mod report;

pub use report::cli_error_to_miette;

use crate::cli::Platform;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration-related errors (file not found, invalid values, etc.)
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Packager, bundler or front proxy failures
    #[error("Server error: {0}")]
    Server(#[from] ServerError),

    /// Per-platform bundle failures
    #[error("Bundle error: {0}")]
    Bundle(#[from] BundleError),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

}

/// Configuration resolution errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The bundler config file does not exist at the resolved location
    #[error("Config file not found: {}\n\nHint: Create ./webpack.config.js or pass --config <path>", .0.display())]
    NotFound(PathBuf),

    /// A `.json` bundler config could not be parsed
    #[error("Invalid JSON in config file {}: {source}\n\nHint: Use a JSON validator to check syntax", .path.display())]
    InvalidJson {
        /// Path of the offending file
        path: PathBuf,
        /// Parser error
        #[source]
        source: serde_json::Error,
    },

    /// Missing required configuration field
    #[error("Missing required field: {field}\n\nHint: {hint}")]
    MissingField {
        /// Name of the missing field
        field: String,
        /// Helpful hint for providing the field
        hint: String,
    },

    /// Invalid value for a configuration option
    #[error("Invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The invalid value
        value: String,
        /// Helpful hint for correct values
        hint: String,
    },

    /// I/O error while reading config
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while starting, running or stopping the support server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// A child process could not be spawned
    #[error("Failed to launch {name} ({command}): {reason}\n\nHint: Install the project's node modules or point RNWS_{env_key}_BIN at the executable")]
    Spawn {
        /// Human readable service name ("packager", "bundler")
        name: &'static str,
        /// Command line that failed
        command: String,
        /// Underlying reason
        reason: String,
        /// Suffix of the environment variable that overrides the executable
        env_key: &'static str,
    },

    /// The front proxy could not bind its address
    #[error("Failed to bind to {addr}: {reason}\n\nHint: Choose another --port or stop the process using it")]
    Bind {
        /// Address that was requested
        addr: String,
        /// Underlying reason
        reason: String,
    },

    /// A service did not become ready in time
    #[error("{name} did not become ready at {url} within {timeout_secs}s\n\nHint: Run with --verbose to see its output")]
    NotReady {
        /// Human readable service name
        name: &'static str,
        /// URL that was probed
        url: String,
        /// Timeout that expired
        timeout_secs: u64,
    },

    /// A child process exited while we still needed it
    #[error("{name} exited unexpectedly ({status})\n\nHint: Run with --verbose to see its output")]
    ProcessExited {
        /// Human readable service name
        name: &'static str,
        /// Exit status description
        status: String,
    },

    /// Teardown failed
    #[error("Failed to stop server: {0}")]
    Stop(String),
}

/// Errors produced by individual bundle operations.
#[derive(Debug, Error)]
pub enum BundleError {
    /// The bundle request could not be sent or its body not read
    #[error("Failed to fetch {platform} bundle from {url}: {reason}")]
    Fetch {
        /// Platform being bundled
        platform: Platform,
        /// Requested URL
        url: String,
        /// Underlying reason
        reason: String,
    },

    /// The server answered with a non-success status
    #[error("Server answered {status} for the {platform} bundle ({url})\n\nHint: Check the bundler output for compile errors")]
    Status {
        /// Platform being bundled
        platform: Platform,
        /// Requested URL
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// The bundle could not be written to disk
    #[error("Failed to write {}: {source}\n\nHint: Check output directory permissions", .path.display())]
    Write {
        /// Target path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// One or more platforms failed while the others were allowed to finish
    #[error("{} of {} platform bundle(s) failed:\n{}", .failed.len(), .failed.len() + .succeeded.len(), format_failures(.failed))]
    PlatformsFailed {
        /// Platforms whose bundle was written
        succeeded: Vec<Platform>,
        /// Failed platforms with their error messages
        failed: Vec<(Platform, String)>,
    },
}

fn format_failures(failed: &[(Platform, String)]) -> String {
    failed
        .iter()
        .map(|(platform, reason)| format!("  - {}: {}", platform, reason))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_not_found() {
        let err = ConfigError::NotFound(PathBuf::from("/app/webpack.config.js"));
        let msg = err.to_string();
        assert!(msg.contains("Config file not found"));
        assert!(msg.contains("/app/webpack.config.js"));
        assert!(msg.contains("Hint:"));
    }

    #[test]
    fn test_config_error_invalid_value() {
        let err = ConfigError::InvalidValue {
            field: "packager_port".to_string(),
            value: "8080".to_string(),
            hint: "Ports must differ".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Invalid value for 'packager_port'"));
        assert!(msg.contains("8080"));
        assert!(msg.contains("Ports must differ"));
    }

    #[test]
    fn test_server_error_not_ready() {
        let err = ServerError::NotReady {
            name: "packager",
            url: "http://localhost:8081/status".to_string(),
            timeout_secs: 60,
        };
        let msg = err.to_string();
        assert!(msg.contains("packager did not become ready"));
        assert!(msg.contains("60s"));
    }

    #[test]
    fn test_server_error_spawn_mentions_override() {
        let err = ServerError::Spawn {
            name: "bundler",
            command: "webpack-dev-server --port 8082".to_string(),
            reason: "No such file or directory".to_string(),
            env_key: "BUNDLER",
        };
        assert!(err.to_string().contains("RNWS_BUNDLER_BIN"));
    }

    #[test]
    fn test_platforms_failed_lists_each_failure() {
        let err = BundleError::PlatformsFailed {
            succeeded: vec![Platform::Ios],
            failed: vec![(Platform::Android, "connection refused".to_string())],
        };
        let msg = err.to_string();
        assert!(msg.starts_with("1 of 2 platform bundle(s) failed"));
        assert!(msg.contains("  - android: connection refused"));
    }

    #[test]
    fn test_cli_error_from_config_error() {
        let config_err = ConfigError::NotFound(PathBuf::from("webpack.config.js"));
        let cli_err: CliError = config_err.into();
        assert!(matches!(cli_err, CliError::Config(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_cli_error_from_bundle_error() {
        let bundle_err = BundleError::Status {
            platform: Platform::Ios,
            url: "http://localhost:8080/index.ios.bundle".to_string(),
            status: 500,
        };
        let cli_err: CliError = bundle_err.into();
        assert!(matches!(cli_err, CliError::Bundle(_)));
    }
}
