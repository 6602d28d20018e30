#[cfg(test)]
mod tests {
    use crate::cli::validation::parse_entry_name;
    use crate::cli::{Cli, Command, Platform};
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn test_parse_entry_name_valid() {
        assert_eq!(parse_entry_name("index.ios"), Ok("index.ios".to_string()));
        assert_eq!(parse_entry_name("app/main"), Ok("app/main".to_string()));
        assert_eq!(
            parse_entry_name("index.android"),
            Ok("index.android".to_string())
        );
    }

    #[test]
    fn test_parse_entry_name_invalid() {
        assert_eq!(
            parse_entry_name("").unwrap_err(),
            "Entry name cannot be empty"
        );
        assert!(parse_entry_name("/abs/index").is_err());
        assert!(parse_entry_name("index ios").is_err());
        assert!(parse_entry_name("index.ios?platform=ios").is_err());
        assert!(parse_entry_name("index#frag").is_err());
    }

    #[test]
    fn test_platform_enum_values() {
        use clap::ValueEnum;

        let platforms: Vec<_> = Platform::value_variants()
            .iter()
            .map(|v| v.to_possible_value().unwrap().get_name().to_string())
            .collect();
        assert_eq!(platforms, vec!["android", "ios"]);
        assert_eq!(Platform::from_query("IOS"), Some(Platform::Ios));
        assert_eq!(Platform::from_query("windows"), None);
    }

    #[test]
    fn test_cli_verbose_quiet_conflict() {
        let result = Cli::try_parse_from(["rnws", "--verbose", "--quiet", "start"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_start_args_defaults_are_unset() {
        let args = Cli::try_parse_from(["rnws", "start"]).unwrap();

        if let Command::Start(start) = args.command {
            assert!(start.common.hostname.is_none());
            assert!(start.common.port.is_none());
            assert!(start.common.config.is_none());
            assert!(!start.common.no_android);
            assert!(!start.common.no_ios);
            assert!(!start.common.reset_cache);
            assert!(!start.hot);
        } else {
            panic!("Expected Start command");
        }
    }

    #[test]
    fn test_start_args_short_flags() {
        let args = Cli::try_parse_from([
            "rnws", "start", "-H", "0.0.0.0", "-P", "9000", "-p", "9001", "-w", "9002", "-c",
            "config/webpack.js", "-A", "main.android", "-I", "main.ios", "-r", "--hot",
        ])
        .unwrap();

        let Command::Start(start) = args.command else {
            panic!("Expected Start command");
        };
        assert_eq!(start.common.hostname.as_deref(), Some("0.0.0.0"));
        assert_eq!(start.common.port, Some(9000));
        assert_eq!(start.common.packager_port, Some(9001));
        assert_eq!(start.common.webpack_port, Some(9002));
        assert_eq!(
            start.common.config,
            Some(PathBuf::from("config/webpack.js"))
        );
        assert_eq!(start.common.android_entry.as_deref(), Some("main.android"));
        assert_eq!(start.common.ios_entry.as_deref(), Some("main.ios"));
        assert!(start.common.reset_cache);
        assert!(start.hot);
    }

    #[test]
    fn test_camel_case_aliases() {
        let args = Cli::try_parse_from([
            "rnws",
            "bundle",
            "--webpackConfigPath",
            "webpack.prod.js",
            "--packagerPort",
            "7000",
            "--iosBundlePath",
            "build/main.jsbundle",
            "--androidBundlePath",
            "build/index.android.bundle",
        ])
        .unwrap();

        let Command::Bundle(bundle) = args.command else {
            panic!("Expected Bundle command");
        };
        assert_eq!(bundle.common.config, Some(PathBuf::from("webpack.prod.js")));
        assert_eq!(bundle.common.packager_port, Some(7000));
        assert_eq!(
            bundle.ios_bundle_path,
            Some(PathBuf::from("build/main.jsbundle"))
        );
        assert_eq!(
            bundle.android_bundle_path,
            Some(PathBuf::from("build/index.android.bundle"))
        );
    }

    #[test]
    fn test_bundle_platform_toggles() {
        let args =
            Cli::try_parse_from(["rnws", "bundle", "--no-android", "--no-optimize"]).unwrap();

        let Command::Bundle(bundle) = args.command else {
            panic!("Expected Bundle command");
        };
        assert!(bundle.common.no_android);
        assert!(!bundle.common.no_ios);
        assert!(bundle.no_optimize);
    }

    #[test]
    fn test_hot_is_start_only() {
        assert!(Cli::try_parse_from(["rnws", "bundle", "--hot"]).is_err());
        assert!(Cli::try_parse_from(["rnws", "start", "--no-optimize"]).is_err());
    }

    #[test]
    fn test_invalid_port_rejected() {
        assert!(Cli::try_parse_from(["rnws", "start", "--port", "70000"]).is_err());
        assert!(Cli::try_parse_from(["rnws", "start", "--port", "http"]).is_err());
    }
}
