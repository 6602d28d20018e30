use crate::cli::Platform;
use crate::config::ResolvedOptions;
use std::path::PathBuf;

/// One bundle to produce: which entry, for which platform, written where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleRequest {
    /// Target platform
    pub platform: Platform,

    /// Entry module name (`index.ios`)
    pub entry: String,

    /// Absolute output path
    pub target_path: PathBuf,

    /// Development bundle (warnings, dev-only checks)
    pub dev: bool,

    /// Minified output
    pub minify: bool,
}

impl BundleRequest {
    /// Request for `platform` using the resolved options.
    pub fn for_platform(resolved: &ResolvedOptions, platform: Platform) -> Self {
        let options = &resolved.options;
        Self {
            platform,
            entry: options.entry(platform).to_string(),
            target_path: resolved.resolve_path(options.bundle_path(platform)),
            dev: !options.optimize,
            minify: options.optimize,
        }
    }

    /// Path and query of the bundle on the front server.
    pub fn path_and_query(&self) -> String {
        format!(
            "/{}.bundle?platform={}&dev={}&minify={}",
            self.entry, self.platform, self.dev, self.minify
        )
    }

    /// Full URL of the bundle on the front server at `server_url`.
    pub fn url(&self, server_url: &str) -> String {
        format!("{}{}", server_url.trim_end_matches('/'), self.path_and_query())
    }
}

/// One request per enabled platform, Android first.
pub fn build_requests(resolved: &ResolvedOptions) -> Vec<BundleRequest> {
    resolved
        .options
        .enabled_platforms()
        .into_iter()
        .map(|platform| BundleRequest::for_platform(resolved, platform))
        .collect()
}
