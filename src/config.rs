//! User configuration.
//! Loads `~/.projforge/config.json`, whose values become fallback
//! variables for every project.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, CUSTOM_TEMPLATES_DIR};
use crate::error::{Error, Result};
use crate::generator::write_atomic;
use crate::variables::VariableSet;

/// Contents of the configuration file. Every field is optional on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub default_author: Option<String>,
    pub default_org: Option<String>,
    pub default_license: Option<String>,
    /// Template used by `create` when none is named.
    pub default_template: String,
    /// Initialise a git repository after every successful `create`.
    pub auto_git: bool,
    /// Extra fallback variables.
    pub variables: IndexMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_author: None,
            default_org: None,
            default_license: Some("MIT".to_string()),
            default_template: "python-cli".to_string(),
            auto_git: false,
            variables: IndexMap::new(),
        }
    }
}

/// `~/.projforge`.
pub fn config_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(CONFIG_DIR_NAME))
        .ok_or_else(|| Error::Config("cannot determine the home directory".to_string()))
}

/// `~/.projforge/config.json`.
pub fn default_config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// `~/.projforge/templates`.
pub fn default_templates_dir() -> Result<PathBuf> {
    Ok(config_dir()?.join(CUSTOM_TEMPLATES_DIR))
}

impl Config {
    /// Loads the configuration at `path`, falling back to defaults when the file is absent.
    ///
    /// # Errors
    /// * `Error::Config` if the file exists but is not valid configuration JSON
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("No configuration at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        debug!("Loading configuration from {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|e| Error::from_io(e, path))?;
        serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("invalid configuration in '{}': {e}", path.display())))
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)?;
        write_atomic(path, &content).map_err(|e| Error::from_io(e, path))
    }

    /// Fallback variables: `author`, `org` and `license`, then `variables`.
    pub fn variable_defaults(&self) -> VariableSet {
        let mut defaults = VariableSet::new();
        let named = [
            ("author", &self.default_author),
            ("org", &self.default_org),
            ("license", &self.default_license),
        ];
        for (key, value) in named {
            if let Some(value) = value {
                defaults.insert(key, value.as_str());
            }
        }
        for (key, value) in &self.variables {
            defaults.insert(key, value);
        }
        defaults
    }
}
