//! Miette report conversion for CLI errors.

use crate::error::{BundleError, CliError, ConfigError};
use miette::Report;

/// Convert a `CliError` into a miette `Report` for terminal rendering.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Config(ConfigError::NotFound(path)) => miette::miette!(
            help = "Create ./webpack.config.js or pass --config <path>",
            "Config file not found: {}",
            path.display()
        ),
        CliError::Config(e) => miette::miette!("Configuration error: {}", e),
        CliError::Bundle(e) => bundle_error_to_miette(e),
        CliError::Server(e) => miette::miette!("Server error: {}", e),
        _ => miette::miette!("{}", err),
    }
}

/// Convert a `BundleError` into a miette `Report`.
pub fn bundle_error_to_miette(err: BundleError) -> Report {
    match err {
        BundleError::PlatformsFailed { succeeded, failed } if !succeeded.is_empty() => {
            let written = succeeded
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            let message = BundleError::PlatformsFailed { succeeded, failed }.to_string();
            miette::miette!(help = format!("Bundles for {} were written", written), "{}", message)
        }
        _ => miette::miette!("{}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Platform;
    use std::path::PathBuf;

    #[test]
    fn test_config_not_found_report() {
        let report = cli_error_to_miette(CliError::Config(ConfigError::NotFound(
            PathBuf::from("/tmp/app/webpack.config.js"),
        )));
        assert!(report
            .to_string()
            .contains("Config file not found: /tmp/app/webpack.config.js"));
    }

    #[test]
    fn test_partial_failure_report_names_written_platforms() {
        let report = bundle_error_to_miette(BundleError::PlatformsFailed {
            succeeded: vec![Platform::Ios],
            failed: vec![(Platform::Android, "timed out".to_string())],
        });
        let help = report.help().map(|h| h.to_string());
        assert_eq!(help.as_deref(), Some("Bundles for ios were written"));
        assert!(report.to_string().contains("android: timed out"));
    }
}
