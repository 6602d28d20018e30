//! Configuration resolution for rnws.
//!
//! Produces one immutable [`Options`] record per invocation by layering:
//! CLI flags > `RNWS_*` environment variables > defaults.
//!
//! The webpack configuration file itself is never interpreted here. It must
//! exist, and its content is attached to [`ResolvedOptions`] verbatim as an
//! opaque [`BundlerConfig`] payload.

mod conversions;
mod defaults;
mod loading;
mod types;
mod validation;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::cli::Platform;

pub use defaults::*;
pub use loading::resolve;
pub use types::*;

/// The flat options record for one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Options {
    /// Hostname the front proxy, packager and bundler are reached on
    pub hostname: String,

    /// Front proxy port (what the app talks to)
    pub port: u16,

    /// React Native packager port
    pub packager_port: u16,

    /// Webpack dev server port
    pub webpack_port: u16,

    /// Webpack config file, relative to the working directory
    pub config_path: PathBuf,

    /// Android support enabled
    pub android: bool,

    /// iOS support enabled
    pub ios: bool,

    /// Android entry module name
    pub android_entry: String,

    /// iOS entry module name
    pub ios_entry: String,

    /// Where `bundle` writes the Android bundle
    pub android_bundle_path: PathBuf,

    /// Where `bundle` writes the iOS bundle
    pub ios_bundle_path: PathBuf,

    /// Produce minified, non-dev bundles
    pub optimize: bool,

    /// Pass --reset-cache to the packager
    pub reset_cache: bool,

    /// Enable hot module replacement in the webpack dev server
    pub hot: bool,

    /// Packager executable
    pub packager_bin: PathBuf,

    /// Webpack dev server executable
    pub bundler_bin: PathBuf,

    /// How long `start` waits for the packager and webpack to answer
    pub startup_timeout_secs: u64,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            hostname: default_hostname(),
            port: DEFAULT_PORT,
            packager_port: DEFAULT_PACKAGER_PORT,
            webpack_port: DEFAULT_WEBPACK_PORT,
            config_path: PathBuf::from(DEFAULT_CONFIG_FILE),
            android: true,
            ios: true,
            android_entry: default_entry(Platform::Android),
            ios_entry: default_entry(Platform::Ios),
            android_bundle_path: default_bundle_path(Platform::Android),
            ios_bundle_path: default_bundle_path(Platform::Ios),
            optimize: true,
            reset_cache: false,
            hot: false,
            packager_bin: PathBuf::from(DEFAULT_PACKAGER_BIN),
            bundler_bin: PathBuf::from(DEFAULT_BUNDLER_BIN),
            startup_timeout_secs: DEFAULT_STARTUP_TIMEOUT_SECS,
        }
    }
}

impl Options {
    /// Whether bundles are served/produced for `platform`.
    pub fn is_enabled(&self, platform: Platform) -> bool {
        match platform {
            Platform::Android => self.android,
            Platform::Ios => self.ios,
        }
    }

    /// Entry module name for `platform`.
    pub fn entry(&self, platform: Platform) -> &str {
        match platform {
            Platform::Android => &self.android_entry,
            Platform::Ios => &self.ios_entry,
        }
    }

    /// Output path for `platform` as configured (not yet resolved).
    pub fn bundle_path(&self, platform: Platform) -> &PathBuf {
        match platform {
            Platform::Android => &self.android_bundle_path,
            Platform::Ios => &self.ios_bundle_path,
        }
    }

    /// Enabled platforms in request order.
    pub fn enabled_platforms(&self) -> Vec<Platform> {
        Platform::ALL
            .into_iter()
            .filter(|p| self.is_enabled(*p))
            .collect()
    }

    /// URL of the front proxy.
    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.hostname, self.port)
    }

    /// URL of the React Native packager.
    pub fn packager_url(&self) -> String {
        format!("http://{}:{}", self.hostname, self.packager_port)
    }

    /// URL of the webpack dev server.
    pub fn bundler_url(&self) -> String {
        format!("http://{}:{}", self.hostname, self.webpack_port)
    }
}
