use crate::cli::{parse_entry_name, Platform};
use crate::config::Options;
use crate::error::{ConfigError, Result};

impl Options {
    /// Validate the merged options for logical consistency.
    pub fn validate(&self) -> Result<()> {
        if self.hostname.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "hostname".to_string(),
                hint: "Pass --hostname or unset RNWS_HOSTNAME".to_string(),
            }
            .into());
        }

        let ports = [
            ("port", self.port),
            ("packager_port", self.packager_port),
            ("webpack_port", self.webpack_port),
        ];
        for (i, (field, port)) in ports.iter().enumerate() {
            if *port == 0 {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    value: port.to_string(),
                    hint: "Port 0 cannot be advertised to the app; choose a fixed port".to_string(),
                }
                .into());
            }
            if let Some((other, _)) = ports[..i].iter().find(|(_, p)| p == port) {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    value: port.to_string(),
                    hint: format!("Already used by '{}'; every server needs its own port", other),
                }
                .into());
            }
        }

        for platform in self.enabled_platforms() {
            validate_platform(self, platform)?;
        }

        if self.startup_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "startup_timeout_secs".to_string(),
                value: "0".to_string(),
                hint: "The packager needs time to start; use at least 1".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

fn validate_platform(options: &Options, platform: Platform) -> Result<()> {
    let entry = options.entry(platform);
    if entry.trim().is_empty() {
        return Err(ConfigError::MissingField {
            field: format!("{}_entry", platform),
            hint: format!("Pass --{}-entry or disable it with --no-{}", platform, platform),
        }
        .into());
    }

    // Environment values skip clap's value parser
    parse_entry_name(entry).map_err(|reason| ConfigError::InvalidValue {
        field: format!("{}_entry", platform),
        value: entry.to_string(),
        hint: reason,
    })?;

    if options.bundle_path(platform).as_os_str().is_empty() {
        return Err(ConfigError::MissingField {
            field: format!("{}_bundle_path", platform),
            hint: format!(
                "Pass --{}-bundle-path or disable it with --no-{}",
                platform, platform
            ),
        }
        .into());
    }

    Ok(())
}
