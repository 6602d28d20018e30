use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mobile platform a bundle is produced for
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Android (bundle is usually shipped in app/src/main/assets)
    #[value(name = "android")]
    Android,

    /// iOS (bundle is usually shipped as main.jsbundle)
    #[value(name = "ios")]
    Ios,
}

impl Platform {
    /// All platforms, in the order bundle requests are issued.
    pub const ALL: [Platform; 2] = [Platform::Android, Platform::Ios];

    /// Identifier used in URLs (`?platform=ios`) and file names.
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Android => "android",
            Platform::Ios => "ios",
        }
    }

    /// Parse the `platform` query parameter sent by React Native clients.
    pub fn from_query(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "android" => Some(Platform::Android),
            "ios" => Some(Platform::Ios),
            _ => None,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
