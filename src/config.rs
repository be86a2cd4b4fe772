use config::{Config, ConfigError, File as ConfigFile};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Reserved unit name for the main application's template root.
pub const APP_UNIT: &str = "app";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Template root of the main application.
    pub app_root: String,
    /// Plugin name → template root of that plugin.
    #[serde(default)]
    pub plugins: BTreeMap<String, String>,
    /// Glob patterns for files and directories to skip while walking.
    #[serde(default)]
    pub ignore_patterns: Vec<String>,
    /// File extensions that count as templates. Empty list accepts any file.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    /// Directory delimiter used in relative paths and built trees.
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

fn default_extensions() -> Vec<String> {
    vec![".twig".to_string(), ".php".to_string()]
}

fn default_delimiter() -> char {
    '/'
}

pub fn load_configuration() -> Result<AppConfig, ConfigError> {
    let builder = Config::builder()
        .add_source(ConfigFile::with_name("Config").required(false))
        .build()?;
    builder.try_deserialize::<AppConfig>()
}

impl AppConfig {
    /// Template root for a unit name, or None if the unit is unknown.
    pub fn unit_root(&self, unit: &str) -> Option<&str> {
        if unit == APP_UNIT {
            return Some(self.app_root.as_str());
        }
        self.plugins.get(unit).map(String::as_str)
    }

    /// All configured units, app first.
    pub fn units(&self) -> Vec<(&str, &str)> {
        let mut units = vec![(APP_UNIT, self.app_root.as_str())];
        units.extend(self.plugins.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        units
    }

    /// Whether a file name carries one of the configured template extensions.
    pub fn is_template(&self, file_name: &str) -> bool {
        self.extensions.is_empty()
            || self
                .extensions
                .iter()
                .any(|ext| file_name.ends_with(ext.as_str()))
    }
}
