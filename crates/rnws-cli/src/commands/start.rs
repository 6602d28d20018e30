//! Development server command.

use crate::cli::StartArgs;
use crate::config::{self, CliOverrides, Invocation};
use crate::error::Result;
use crate::server::{DevServer, ServerHandle};
use crate::ui;
use tokio::signal;

/// Execute the start command.
///
/// Resolves the options, starts the packager, webpack and the front proxy,
/// then serves until Ctrl+C or until one of them goes away. Everything that
/// was started is stopped before returning.
pub async fn execute(args: StartArgs, invocation: &Invocation) -> Result<()> {
    let resolved = config::resolve(invocation, &CliOverrides::from(&args))?;
    let options = &resolved.options;

    ui::info(&format!("Webpack config: {}", resolved.config_path.display()));
    if options.hot {
        ui::info("Hot module replacement enabled");
    }

    let spinner = ui::Spinner::new("Starting packager and webpack dev server...");
    let mut server = DevServer::new(&resolved, invocation);

    if let Err(e) = server.start().await {
        spinner.fail("Server failed to start");
        if let Err(stop_err) = server.stop().await {
            tracing::warn!("cleanup after failed start: {}", stop_err);
        }
        return Err(e);
    }
    spinner.finish(&format!("Server running at {}", options.server_url()));

    for platform in options.enabled_platforms() {
        ui::info(&format!(
            "{}: {}/{}.bundle?platform={}",
            platform,
            options.server_url(),
            options.entry(platform),
            platform
        ));
    }
    ui::info("Press Ctrl+C to stop");

    let outcome = tokio::select! {
        _ = signal::ctrl_c() => {
            ui::info("Shutting down...");
            Ok(())
        }
        closed = server.closed() => closed,
    };

    let stopped = server.stop().await;
    outcome?;
    stopped?;

    ui::success("Server stopped");
    Ok(())
}
