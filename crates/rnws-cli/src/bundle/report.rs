use crate::cli::Platform;
use crate::error::BundleError;
use std::path::PathBuf;
use std::time::Duration;

/// A bundle that was written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleArtifact {
    pub platform: Platform,
    pub path: PathBuf,
    pub size: u64,
    pub elapsed: Duration,
}

/// Outcome of every bundle operation of one run.
#[derive(Debug, Default)]
pub struct BundleReport {
    /// Bundles that were written, in request order
    pub artifacts: Vec<BundleArtifact>,

    /// Platforms whose operation failed, in request order
    pub failures: Vec<(Platform, BundleError)>,
}

impl BundleReport {
    /// True when no operation failed.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Platforms whose bundle was written.
    pub fn succeeded(&self) -> Vec<Platform> {
        self.artifacts.iter().map(|a| a.platform).collect()
    }

    /// The written artifacts, or [`BundleError::PlatformsFailed`] naming
    /// every platform that failed and every one that succeeded.
    pub fn into_result(self) -> Result<Vec<BundleArtifact>, BundleError> {
        if self.failures.is_empty() {
            return Ok(self.artifacts);
        }

        Err(BundleError::PlatformsFailed {
            succeeded: self.artifacts.iter().map(|a| a.platform).collect(),
            failed: self
                .failures
                .into_iter()
                .map(|(platform, err)| (platform, err.to_string()))
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact(platform: Platform) -> BundleArtifact {
        BundleArtifact {
            platform,
            path: PathBuf::from(format!("/out/{}.bundle", platform)),
            size: 42,
            elapsed: Duration::from_millis(10),
        }
    }

    #[test]
    fn test_empty_report_is_success() {
        let report = BundleReport::default();
        assert!(report.is_success());
        assert!(report.into_result().unwrap().is_empty());
    }

    #[test]
    fn test_partial_failure_names_both_sides() {
        let report = BundleReport {
            artifacts: vec![artifact(Platform::Ios)],
            failures: vec![(
                Platform::Android,
                BundleError::Status {
                    platform: Platform::Android,
                    url: "http://localhost:8080/index.android.bundle".to_string(),
                    status: 500,
                },
            )],
        };
        assert!(!report.is_success());
        assert_eq!(report.succeeded(), vec![Platform::Ios]);

        match report.into_result() {
            Err(BundleError::PlatformsFailed { succeeded, failed }) => {
                assert_eq!(succeeded, vec![Platform::Ios]);
                assert_eq!(failed.len(), 1);
                assert_eq!(failed[0].0, Platform::Android);
                assert!(failed[0].1.contains("500"));
            }
            other => panic!("expected PlatformsFailed, got {:?}", other),
        }
    }
}
