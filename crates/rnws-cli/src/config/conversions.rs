use crate::cli::{BundleArgs, CommonArgs, StartArgs};
use crate::config::types::CliOverrides;

// Conversion implementations: CLI args -> config overrides.
// Boolean switches only override when they were passed.

impl From<&CommonArgs> for CliOverrides {
    fn from(args: &CommonArgs) -> Self {
        Self {
            hostname: args.hostname.clone(),
            port: args.port,
            packager_port: args.packager_port,
            webpack_port: args.webpack_port,
            config_path: args.config.clone(),
            android: args.no_android.then_some(false),
            ios: args.no_ios.then_some(false),
            android_entry: args.android_entry.clone(),
            ios_entry: args.ios_entry.clone(),
            reset_cache: args.reset_cache.then_some(true),
            ..Self::default()
        }
    }
}

impl From<&StartArgs> for CliOverrides {
    fn from(args: &StartArgs) -> Self {
        Self {
            hot: args.hot.then_some(true),
            // The dev server always serves unminified dev bundles by default.
            optimize: Some(false),
            ..Self::from(&args.common)
        }
    }
}

impl From<&BundleArgs> for CliOverrides {
    fn from(args: &BundleArgs) -> Self {
        Self {
            android_bundle_path: args.android_bundle_path.clone(),
            ios_bundle_path: args.ios_bundle_path.clone(),
            optimize: args.no_optimize.then_some(false),
            ..Self::from(&args.common)
        }
    }
}
