use std::path::PathBuf;

use crate::cli::Platform;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_PACKAGER_PORT: u16 = 8081;
pub const DEFAULT_WEBPACK_PORT: u16 = 8082;
pub const DEFAULT_CONFIG_FILE: &str = "webpack.config.js";
pub const DEFAULT_PACKAGER_BIN: &str = "node_modules/.bin/react-native";
pub const DEFAULT_BUNDLER_BIN: &str = "node_modules/.bin/webpack-dev-server";
pub const DEFAULT_STARTUP_TIMEOUT_SECS: u64 = 60;

/// Prefix of environment variables that override options (`RNWS_PORT=9000`).
pub const ENV_PREFIX: &str = "RNWS_";

/// Module the packager bundles to provide the React Native runtime that the
/// webpack output runs on top of.
pub const RUNTIME_MODULE: &str = "node_modules/react-native-webpack-server/runtime/index";

pub fn default_hostname() -> String {
    "localhost".to_string()
}

pub fn default_entry(platform: Platform) -> String {
    format!("index.{}", platform)
}

pub fn default_bundle_path(platform: Platform) -> PathBuf {
    match platform {
        Platform::Android => PathBuf::from("./android/app/src/main/assets/index.android.bundle"),
        Platform::Ios => PathBuf::from("./ios/main.jsbundle"),
    }
}
