//! Bundle command implementation.

use crate::bundle::{self, build_requests, BundleArtifact, HttpBundleSource};
use crate::cli::BundleArgs;
use crate::config::{self, CliOverrides, Invocation};
use crate::error::Result;
use crate::server::DevServer;
use crate::ui;
use std::path::Path;

/// Execute the bundle command.
///
/// # Process Flow
///
/// 1. Resolve options (fails if the webpack config is missing)
/// 2. Build one request per enabled platform
/// 3. Start the dev server, fetch every bundle concurrently, stop the server
/// 4. Print a summary; fail if any platform failed
pub async fn execute(args: BundleArgs, invocation: &Invocation) -> Result<()> {
    let resolved = config::resolve(invocation, &CliOverrides::from(&args))?;
    let options = &resolved.options;

    let requests = build_requests(&resolved);
    if requests.is_empty() {
        ui::warning("Both platforms are disabled; nothing will be bundled");
    }

    ui::info(&format!(
        "Bundling {} ({})",
        requests
            .iter()
            .map(|r| r.platform.to_string())
            .collect::<Vec<_>>()
            .join(", "),
        if options.optimize { "optimized" } else { "development" }
    ));

    let mut server = DevServer::new(&resolved, invocation);
    let source = HttpBundleSource::new(options.server_url());

    let spinner = ui::Spinner::new("Starting server and building bundles...");
    let report = match bundle::run(&mut server, &source, requests).await {
        Ok(report) => report,
        Err(e) => {
            spinner.fail("Bundling failed");
            return Err(e);
        }
    };

    if report.is_success() {
        spinner.finish("Bundles written");
    } else {
        spinner.fail("Some bundles failed");
    }

    let summary: Vec<_> = report
        .artifacts
        .iter()
        .map(|artifact| {
            (
                summary_label(artifact, &resolved.cwd),
                artifact.size,
                artifact.elapsed,
            )
        })
        .collect();
    if !summary.is_empty() {
        ui::print_bundle_summary(&summary);
    }

    report.into_result()?;
    Ok(())
}

/// `<platform> -> <path>`, with the path shown relative to `cwd` when inside it.
fn summary_label(artifact: &BundleArtifact, cwd: &Path) -> String {
    let shown = artifact.path.strip_prefix(cwd).unwrap_or(&artifact.path);
    format!("{} -> {}", artifact.platform, shown.display())
}
