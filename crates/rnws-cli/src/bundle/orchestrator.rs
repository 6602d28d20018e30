use crate::bundle::{write_artifact, BundleArtifact, BundleReport, BundleRequest, BundleSource};
use crate::error::{BundleError, Result};
use crate::server::ServerHandle;
use futures::future::join_all;
use std::time::Instant;

/// Start `server`, produce every requested bundle concurrently, then stop
/// the server exactly once.
///
/// A failing platform does not cancel its siblings; failures are collected in
/// the returned [`BundleReport`]. A start failure is returned after the
/// server has been stopped, and no bundle operation runs. A stop failure is
/// only returned when every bundle was written.
pub async fn run<S, B>(
    server: &mut S,
    source: &B,
    requests: Vec<BundleRequest>,
) -> Result<BundleReport>
where
    S: ServerHandle + ?Sized,
    B: BundleSource + ?Sized,
{
    if let Err(err) = server.start().await {
        if let Err(stop_err) = server.stop().await {
            tracing::warn!("failed to stop server after failed start: {}", stop_err);
        }
        return Err(err);
    }

    tracing::debug!(count = requests.len(), "starting bundle operations");

    // Every operation is created before any of them is polled.
    let operations: Vec<_> = requests
        .iter()
        .map(|request| execute(source, request))
        .collect();
    let outcomes = join_all(operations).await;

    let mut report = BundleReport::default();
    for (request, outcome) in requests.iter().zip(outcomes) {
        match outcome {
            Ok(artifact) => report.artifacts.push(artifact),
            Err(err) => {
                tracing::warn!(platform = %request.platform, "bundle failed: {}", err);
                report.failures.push((request.platform, err));
            }
        }
    }

    match server.stop().await {
        Ok(()) => Ok(report),
        Err(err) if report.is_success() => Err(err),
        Err(err) => {
            tracing::error!("failed to stop server: {}", err);
            Ok(report)
        }
    }
}

async fn execute<B>(
    source: &B,
    request: &BundleRequest,
) -> std::result::Result<BundleArtifact, BundleError>
where
    B: BundleSource + ?Sized,
{
    let started = Instant::now();
    let bytes = source.fetch(request).await?;
    write_artifact(request, &bytes, started.elapsed()).await
}
