//! Manifest placeholder handling
//!
//! Builds the `manifestPlaceholders` map and substitutes `${name}` tokens in
//! `AndroidManifest.xml` templates.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use turbotea_core::config::AppNameConfig;
use turbotea_core::env_file::{self, ResolvedValue};
use turbotea_core::error::{Error, ErrorCode, Result};

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_.]*)\}").unwrap());

/// Ordered placeholder name to value map
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ManifestPlaceholders {
    values: BTreeMap<String, String>,
}

impl ManifestPlaceholders {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Placeholders for the project at `project_root`
    ///
    /// The display name always resolves; a missing `.env` falls back to the
    /// configured default.
    pub fn for_project(project_root: &Path, app: &AppNameConfig) -> Self {
        Self::with_app_name(app, &resolve_app_name(project_root, app))
    }

    /// Placeholders holding an already resolved display name
    pub fn with_app_name(app: &AppNameConfig, resolved: &ResolvedValue) -> Self {
        let mut placeholders = Self::new();
        placeholders.insert(&app.placeholder, resolved.value.as_str());
        placeholders
    }

    /// Set a placeholder, returning the previous value
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.values.insert(name.into(), value.into())
    }

    /// Value of `name`, if set
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Number of placeholders
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no placeholder is set
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Placeholders in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Resolve the application display name using the configured env file and key
pub fn resolve_app_name(project_root: &Path, app: &AppNameConfig) -> ResolvedValue {
    env_file::resolve_with_source(project_root, &app.env_file, &app.key, &app.default)
}

/// Replace every `${name}` token in `template`
///
/// Fails on the first token whose name has no value.
pub fn substitute(template: &str, placeholders: &ManifestPlaceholders) -> Result<String> {
    if let Some(missing) = PLACEHOLDER
        .captures_iter(template)
        .map(|caps| caps[1].to_string())
        .find(|name| placeholders.get(name).is_none())
    {
        return Err(Error::unknown_placeholder(&missing));
    }

    let rendered = PLACEHOLDER.replace_all(template, |caps: &Captures<'_>| {
        placeholders.get(&caps[1]).unwrap_or_default().to_string()
    });
    Ok(rendered.into_owned())
}

/// Render a manifest template file into `output`
pub fn render_file(template: &Path, output: &Path, placeholders: &ManifestPlaceholders) -> Result<()> {
    if !template.is_file() {
        return Err(Error::file_not_found(template));
    }
    let source = std::fs::read_to_string(template)?;
    let rendered = substitute(&source, placeholders)
        .map_err(|e| e.with_context(format!("In template {}", template.display())))?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output, rendered).map_err(|e| {
        Error::new(
            ErrorCode::ManifestError,
            format!("Failed to write {}: {}", output.display(), e),
        )
        .with_source(e)
    })?;

    tracing::info!(
        template = %template.display(),
        output = %output.display(),
        placeholders = placeholders.len(),
        "rendered manifest"
    );
    Ok(())
}
