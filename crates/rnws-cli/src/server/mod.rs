//! The support server bundles are requested from.
//!
//! [`DevServer`] runs the React Native packager and the webpack dev server as
//! child processes and puts the front proxy in front of them. Callers only
//! see the [`ServerHandle`] lifecycle.

mod dev_server;
mod process;
mod proxy;

pub use dev_server::{bundler_command, packager_command, DevServer};
pub use process::{ManagedProcess, ProcessSpec};
pub use proxy::{router, ProxyConfig, ProxyServer, ProxyState, STATUS_BODY};

use crate::error::Result;
use async_trait::async_trait;

/// Start/stop lifecycle of a server.
#[async_trait]
pub trait ServerHandle: Send {
    /// Resolves once the server accepts requests. Not retried on failure.
    async fn start(&mut self) -> Result<()>;

    /// Release every port and child process. Safe to call more than once,
    /// including after a failed or partial start.
    async fn stop(&mut self) -> Result<()>;
}
