//! Command-line interface definition for rnws.
//!
//! This module defines the CLI structure using clap v4's derive macros.
//!
//! # Command Structure
//!
//! - `rnws start` - Run the packager, the webpack dev server and the front proxy
//! - `rnws bundle` - Produce one bundle file per enabled platform, then exit
//!
//! Long options are kebab-case. The camelCase spellings (`--webpackPort`,
//! `--androidEntry`, ...) are accepted as aliases so existing npm scripts
//! keep working.

mod commands;
pub mod enums;
mod tests;
mod validation;

use clap::Parser;

pub use commands::{BundleArgs, Command, CommonArgs, StartArgs};
pub use enums::*;
pub use validation::parse_entry_name;

/// rnws - webpack + React Native packager, side by side
#[derive(Parser, Debug)]
#[command(
    name = "rnws",
    version,
    about = "Build React Native apps with webpack",
    long_about = "rnws runs webpack next to the React Native packager.\n\
                  `rnws start` serves platform bundles for development (with optional hot reload),\n\
                  `rnws bundle` writes optimized Android/iOS bundles for distribution."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    ///
    /// Also forwards the output of the packager and the webpack dev server.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
