//! rnws - run webpack next to the React Native packager.
//!
//! The packager keeps serving the React Native runtime while webpack builds
//! the application code. A small front proxy stitches the two together so
//! apps and the `bundle` command only ever talk to one server.
//!
//! # Architecture
//!
//! - [`cli`] - Argument definitions (clap)
//! - [`config`] - Options resolution (defaults, `RNWS_*` variables, flags)
//! - [`server`] - Child processes, readiness probing and the front proxy
//! - [`bundle`] - Per-platform bundle fan-out and artifact writing
//! - [`commands`] - `start` and `bundle`
//! - [`error`] - Error types with actionable hints
//! - [`logger`], [`ui`] - Logging and terminal output
//!
//! # Example
//!
//! ```rust,no_run
//! use rnws::config::{resolve, CliOverrides, Invocation};
//!
//! # fn main() -> rnws::Result<()> {
//! let invocation = Invocation::from_process()?;
//! let resolved = resolve(&invocation, &CliOverrides::default())?;
//! println!("front proxy: {}", resolved.options.server_url());
//! # Ok(())
//! # }
//! ```

pub mod bundle;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod server;
pub mod ui;

pub use error::{BundleError, CliError, ConfigError, Result, ServerError};
