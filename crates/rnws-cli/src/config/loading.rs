use crate::config::{BundlerConfig, CliOverrides, Invocation, Options, ResolvedOptions, ENV_PREFIX};
use crate::error::{ConfigError, Result};
use figment::{
    providers::Serialized,
    value::{Dict, Value},
    Figment,
};
use std::path::Path;

/// Resolve the options record for one invocation.
///
/// Fails with [`ConfigError::NotFound`] when the webpack config does not
/// exist at its resolved location; no options record is produced then.
pub fn resolve(invocation: &Invocation, overrides: &CliOverrides) -> Result<ResolvedOptions> {
    let options = Options::load(invocation, overrides)?;

    let config_path = invocation.resolve_path(&options.config_path);
    if !config_path.exists() {
        return Err(ConfigError::NotFound(config_path).into());
    }

    let bundler_config = BundlerConfig::read(&config_path)?;
    options.validate()?;

    tracing::debug!(
        config = %config_path.display(),
        kind = bundler_config.kind(),
        "resolved webpack config"
    );

    Ok(ResolvedOptions {
        options,
        cwd: invocation.cwd.clone(),
        config_path,
        bundler_config,
    })
}

impl Options {
    /// Merge defaults, `RNWS_*` variables and CLI overrides.
    /// Priority: CLI args > environment variables > defaults
    pub fn load(invocation: &Invocation, overrides: &CliOverrides) -> Result<Self> {
        Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Serialized::defaults(env_overrides(invocation)))
            .merge(Serialized::defaults(overrides))
            .extract()
            .map_err(|e| {
                let field = if e.path.is_empty() {
                    "configuration".to_string()
                } else {
                    e.path.join(".")
                };
                ConfigError::InvalidValue {
                    field,
                    value: e.kind.to_string(),
                    hint: format!("Check the {}* environment variables", ENV_PREFIX),
                }
                .into()
            })
    }
}

/// Collect `RNWS_*` variables as a figment dictionary keyed by field name.
fn env_overrides(invocation: &Invocation) -> Dict {
    invocation
        .env
        .iter()
        .filter_map(|(key, value)| {
            let field = key.strip_prefix(ENV_PREFIX)?;
            if field.is_empty() {
                return None;
            }
            let value: Value = value.parse().unwrap_or_else(|never| match never {});
            Some((field.to_ascii_lowercase(), value))
        })
        .collect()
}

impl BundlerConfig {
    /// Read the config file at `path`.
    ///
    /// `.json` files are parsed; anything else is kept as source text.
    pub fn read(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            let value = serde_json::from_str(&source).map_err(|source| ConfigError::InvalidJson {
                path: path.to_path_buf(),
                source,
            })?;
            Ok(BundlerConfig::Json(value))
        } else {
            Ok(BundlerConfig::Module(source))
        }
    }
}
