//! Configuration schema definitions
//!
//! Every field carries a default, so a missing file behaves like an empty one.

use crate::env_file::{APP_NAME_KEY, DEFAULT_APP_NAME, DEFAULT_ENV_FILE};
use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_.]*$").unwrap());

/// Root configuration schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    #[serde(default)]
    pub app_name: AppNameConfig,

    #[serde(default)]
    pub android: AndroidConfig,
}

impl ConfigSchema {
    /// Check field values that TOML typing alone cannot enforce
    pub fn validate(&self) -> Result<()> {
        let app = &self.app_name;
        if app.env_file.trim().is_empty() {
            return Err(Error::invalid_config_value("app_name.env_file", "must not be empty"));
        }
        if app.key.is_empty() {
            return Err(Error::invalid_config_value("app_name.key", "must not be empty"));
        }
        if !IDENTIFIER.is_match(&app.placeholder) {
            return Err(Error::invalid_config_value(
                "app_name.placeholder",
                format!("`{}` is not a valid placeholder name", app.placeholder),
            ));
        }
        if self.android.application_id.trim().is_empty() {
            return Err(Error::invalid_config_value("android.application_id", "must not be empty"));
        }
        Ok(())
    }
}

/// Where the application display name comes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppNameConfig {
    /// Dotenv-style file, relative to the project root
    #[serde(default = "default_env_file")]
    pub env_file: String,

    /// Line prefix to match, including the `=`
    #[serde(default = "default_key")]
    pub key: String,

    /// Value used when the file or key is absent
    #[serde(default = "default_app_name")]
    pub default: String,

    /// Manifest placeholder that receives the value
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
}

impl Default for AppNameConfig {
    fn default() -> Self {
        Self {
            env_file: default_env_file(),
            key: default_key(),
            default: default_app_name(),
            placeholder: default_placeholder(),
        }
    }
}

fn default_env_file() -> String {
    DEFAULT_ENV_FILE.to_string()
}

fn default_key() -> String {
    APP_NAME_KEY.to_string()
}

fn default_app_name() -> String {
    DEFAULT_APP_NAME.to_string()
}

fn default_placeholder() -> String {
    "appName".to_string()
}

/// Android `defaultConfig` values reported by the tools
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AndroidConfig {
    #[serde(default = "default_package")]
    pub namespace: String,

    #[serde(default = "default_package")]
    pub application_id: String,

    /// JVM bytecode target for Java and Kotlin sources
    #[serde(default = "default_jvm_target")]
    pub jvm_target: String,
}

impl Default for AndroidConfig {
    fn default() -> Self {
        Self {
            namespace: default_package(),
            application_id: default_package(),
            jvm_target: default_jvm_target(),
        }
    }
}

fn default_package() -> String {
    "com.example.tea_multitenant".to_string()
}

fn default_jvm_target() -> String {
    "17".to_string()
}
