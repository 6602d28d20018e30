use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::cli::validation::parse_entry_name;

/// Available rnws subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the webpack server
    ///
    /// Launches the React Native packager and the webpack dev server, then
    /// serves combined platform bundles on --hostname:--port until Ctrl+C.
    Start(StartArgs),

    /// Bundle the app for distribution
    ///
    /// Starts the same servers, downloads one bundle per enabled platform
    /// into its output path, then shuts everything down.
    Bundle(BundleArgs),
}

/// Options shared by `start` and `bundle`.
///
/// Every field is optional: only flags that were actually passed override
/// the defaults and `RNWS_*` environment variables.
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Hostname on which the server will listen [default: localhost]
    #[arg(short = 'H', long, value_name = "HOSTNAME")]
    pub hostname: Option<String>,

    /// Port on which the server will listen [default: 8080]
    #[arg(short = 'P', long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Port on which the react-native packager will listen [default: 8081]
    #[arg(short = 'p', long, alias = "packagerPort", value_name = "PORT")]
    pub packager_port: Option<u16>,

    /// Port on which the webpack dev server will listen [default: 8082]
    #[arg(short = 'w', long, alias = "webpackPort", value_name = "PORT")]
    pub webpack_port: Option<u16>,

    /// Path to the webpack configuration file [default: webpack.config.js]
    ///
    /// Resolved relative to the current working directory. `.json` files are
    /// parsed, anything else is handed to webpack as-is.
    #[arg(short = 'c', long = "config", alias = "webpackConfigPath", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable support for Android
    #[arg(long)]
    pub no_android: bool,

    /// Disable support for iOS
    #[arg(long)]
    pub no_ios: bool,

    /// Android entry module name [default: index.android]
    ///
    /// Has no effect if --no-android is passed.
    #[arg(short = 'A', long, alias = "androidEntry", value_parser = parse_entry_name, value_name = "NAME")]
    pub android_entry: Option<String>,

    /// iOS entry module name [default: index.ios]
    ///
    /// Has no effect if --no-ios is passed.
    #[arg(short = 'I', long, alias = "iosEntry", value_parser = parse_entry_name, value_name = "NAME")]
    pub ios_entry: Option<String>,

    /// Remove cached react-native packager files
    #[arg(short = 'r', long, alias = "resetCache")]
    pub reset_cache: bool,
}

/// Arguments for the start command
#[derive(Args, Debug, Clone, Default)]
pub struct StartArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Enable hot module replacement
    ///
    /// Sets HOT=1 for the webpack dev server so the config can add the
    /// hot-reload entries and plugins.
    #[arg(long)]
    pub hot: bool,
}

/// Arguments for the bundle command
#[derive(Args, Debug, Clone, Default)]
pub struct BundleArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Path where the Android bundle should be written
    /// [default: ./android/app/src/main/assets/index.android.bundle]
    #[arg(long, alias = "androidBundlePath", value_name = "PATH")]
    pub android_bundle_path: Option<PathBuf>,

    /// Path where the iOS bundle should be written [default: ./ios/main.jsbundle]
    #[arg(long, alias = "iosBundlePath", value_name = "PATH")]
    pub ios_bundle_path: Option<PathBuf>,

    /// Skip optimization (dev bundle, not minified)
    #[arg(long)]
    pub no_optimize: bool,
}
