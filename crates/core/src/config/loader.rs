//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, Result, ResultExt};
use std::path::{Path, PathBuf};

/// File names searched, in order, under the project root
pub const CONFIG_CANDIDATES: [&str; 3] =
    [".turbotea.toml", "turbotea.toml", ".config/turbotea.toml"];

/// Configuration wrapper
#[derive(Debug, Clone)]
pub struct Config {
    pub schema: ConfigSchema,
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load an explicit configuration file, or discover one in the current directory
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => {
                if !p.is_file() {
                    return Err(Error::config_not_found(p));
                }
                Self::from_file(p)
            }
            None => Self::load_from(Path::new(".")),
        }
    }

    /// Discover a configuration file under `project_root`, falling back to defaults
    pub fn load_from(project_root: &Path) -> Result<Self> {
        match find_config_file(project_root) {
            Some(p) => Self::from_file(&p),
            None => {
                tracing::debug!(root = %project_root.display(), "no config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load with defaults only (no file)
    pub fn default() -> Self {
        Self {
            schema: ConfigSchema::default(),
            path: None,
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        let schema = load_config_file(path)?;
        schema
            .validate()
            .context(format!("In config file {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(Self {
            schema,
            path: Some(path.to_path_buf()),
        })
    }
}

/// Find configuration file in standard locations
fn find_config_file(project_root: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES
        .iter()
        .map(|candidate| project_root.join(candidate))
        .find(|p| p.is_file())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::config(format!("Failed to read config file {}: {}", path.display(), e)).with_source(e)
    })?;

    let schema: ConfigSchema =
        toml::from_str(&content).map_err(|e| Error::from(e).with_context(path.display().to_string()))?;
    Ok(schema)
}
