//! Per-platform bundle production.
//!
//! A bundle operation asks the front server for `/<entry>.bundle` with the
//! platform's query parameters and writes the answer to the platform's
//! output path. [`run`] drives one operation per enabled platform against a
//! started server and always stops the server afterwards.

mod orchestrator;
mod report;
mod request;
mod source;

pub use orchestrator::run;
pub use report::{BundleArtifact, BundleReport};
pub use request::{build_requests, BundleRequest};
pub use source::{write_artifact, BundleSource, HttpBundleSource};
