use crate::bundle::{BundleArtifact, BundleRequest};
use crate::error::BundleError;
use async_trait::async_trait;
use std::time::Duration;

/// Where bundle bytes come from.
///
/// The production source asks the front server over HTTP; tests substitute
/// in-memory sources.
#[async_trait]
pub trait BundleSource: Send + Sync {
    /// Produce the bundle body for `request`.
    async fn fetch(&self, request: &BundleRequest) -> Result<Vec<u8>, BundleError>;
}

/// Fetches bundles from a running front server.
#[derive(Debug, Clone)]
pub struct HttpBundleSource {
    client: reqwest::Client,
    server_url: String,
}

impl HttpBundleSource {
    /// Source for the front server reachable at `server_url`.
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            server_url: server_url.into(),
        }
    }
}

#[async_trait]
impl BundleSource for HttpBundleSource {
    async fn fetch(&self, request: &BundleRequest) -> Result<Vec<u8>, BundleError> {
        let url = request.url(&self.server_url);
        tracing::debug!(platform = %request.platform, %url, "requesting bundle");

        let fetch_error = |reason: String| BundleError::Fetch {
            platform: request.platform,
            url: url.clone(),
            reason,
        };

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BundleError::Status {
                platform: request.platform,
                url: url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| fetch_error(format!("failed to read response: {}", e)))?;

        Ok(body.to_vec())
    }
}

/// Write `bytes` to the request's target path, creating parent directories.
pub async fn write_artifact(
    request: &BundleRequest,
    bytes: &[u8],
    elapsed: Duration,
) -> Result<BundleArtifact, BundleError> {
    let path = &request.target_path;
    let write_error = |source: std::io::Error| BundleError::Write {
        path: path.clone(),
        source,
    };

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(write_error)?;
    }
    tokio::fs::write(path, bytes).await.map_err(write_error)?;

    tracing::debug!(
        platform = %request.platform,
        path = %path.display(),
        bytes = bytes.len(),
        "bundle written"
    );

    Ok(BundleArtifact {
        platform: request.platform,
        path: path.clone(),
        size: bytes.len() as u64,
        elapsed,
    })
}
