//! Command implementations for rnws.
//!
//! - [`start`] - Run the packager, webpack and the front proxy until Ctrl+C
//! - [`bundle`] - Produce one bundle file per enabled platform
//!
//! Each command provides an `execute` function that takes the parsed
//! arguments plus the captured [`Invocation`](crate::config::Invocation).

pub mod bundle;
pub mod start;

pub use bundle::execute as bundle_execute;
pub use start::execute as start_execute;
