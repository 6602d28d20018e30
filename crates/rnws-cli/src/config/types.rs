use serde::Serialize;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::config::Options;
use crate::error::Result;

/// Process-wide inputs of one invocation.
///
/// `main` captures these once; the resolver and the server only ever see
/// this record, which keeps them free of ambient reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    /// Working directory relative paths are resolved against
    pub cwd: PathBuf,

    /// Environment variables visible to the invocation
    pub env: BTreeMap<String, String>,
}

impl Invocation {
    /// Invocation rooted at `cwd` with an empty environment.
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            env: BTreeMap::new(),
        }
    }

    /// Capture the current process's working directory and environment.
    ///
    /// Variables whose name or value is not valid UTF-8 are left out.
    pub fn from_process() -> Result<Self> {
        Ok(Self {
            cwd: std::env::current_dir()?,
            env: utf8_vars(std::env::vars_os()),
        })
    }

    /// Builder-style helper to add one variable.
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Look up a variable.
    pub fn var(&self, key: &str) -> Option<&str> {
        self.env.get(key).map(String::as_str)
    }

    /// Resolve `path` against the working directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }
}

/// Keep the variables that are valid UTF-8 in both name and value.
pub(crate) fn utf8_vars(
    vars: impl IntoIterator<Item = (OsString, OsString)>,
) -> BTreeMap<String, String> {
    vars.into_iter()
        .filter_map(|(key, value)| match (key.into_string(), value.into_string()) {
            (Ok(key), Ok(value)) => Some((key, value)),
            (key, _) => {
                tracing::debug!(
                    "skipping non UTF-8 environment variable {:?}",
                    key.unwrap_or_else(|k| k.to_string_lossy().into_owned())
                );
                None
            }
        })
        .collect()
}

/// Options the user passed on the command line.
///
/// Unset fields are skipped when serialized so they never shadow
/// lower-priority layers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CliOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub packager_port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webpack_port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub android: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ios: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub android_entry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ios_entry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub android_bundle_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ios_bundle_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optimize: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reset_cache: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hot: Option<bool>,
}

/// The user's webpack configuration, carried as an opaque payload.
///
/// rnws never reads fields out of it. The dev server is pointed at the file
/// on disk; the parsed payload is kept so callers can inspect exactly what
/// was loaded.
#[derive(Debug, Clone, PartialEq)]
pub enum BundlerConfig {
    /// Parsed content of a `.json` config file
    Json(serde_json::Value),

    /// Verbatim source of a JavaScript config module
    Module(String),
}

impl BundlerConfig {
    /// Short description for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            BundlerConfig::Json(_) => "json",
            BundlerConfig::Module(_) => "module",
        }
    }
}

/// Result of configuration resolution.
#[derive(Debug, Clone)]
pub struct ResolvedOptions {
    /// Merged options
    pub options: Options,

    /// Working directory of the invocation
    pub cwd: PathBuf,

    /// Absolute path of the webpack config file
    pub config_path: PathBuf,

    /// Opaque webpack config payload
    pub bundler_config: BundlerConfig,
}

impl ResolvedOptions {
    /// Resolve a configured path (bundle output, executable) against the
    /// working directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }
}
