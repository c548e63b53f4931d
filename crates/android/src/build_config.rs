//! Android `defaultConfig` snapshot
//!
//! Reporting only: the values the Gradle build would see for the application
//! module, with the app name resolved the same way.

use crate::manifest::{self, ManifestPlaceholders};
use serde::Serialize;
use std::path::Path;
use turbotea_core::config::ConfigSchema;
use turbotea_core::env_file::ResolvedValue;

/// Resolved default configuration for the application module
#[derive(Debug, Clone, Serialize)]
pub struct BuildDefaults {
    /// Kotlin/Java namespace of the module
    pub namespace: String,
    /// Package name of the installed app
    pub application_id: String,
    /// JVM bytecode target
    pub jvm_target: String,
    /// Display name and where it came from
    pub app_name: ResolvedValue,
    /// Placeholders handed to the manifest merger
    pub manifest_placeholders: ManifestPlaceholders,
}

impl BuildDefaults {
    /// Assemble defaults for the project at `project_root`
    pub fn resolve(project_root: &Path, schema: &ConfigSchema) -> Self {
        let app_name = manifest::resolve_app_name(project_root, &schema.app_name);
        let manifest_placeholders = ManifestPlaceholders::with_app_name(&schema.app_name, &app_name);

        Self {
            namespace: schema.android.namespace.clone(),
            application_id: schema.android.application_id.clone(),
            jvm_target: schema.android.jvm_target.clone(),
            app_name,
            manifest_placeholders,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use turbotea_core::env_file::ValueSource;

    #[test]
    fn test_defaults_without_files() {
        let dir = TempDir::new().unwrap();
        let defaults = BuildDefaults::resolve(dir.path(), &ConfigSchema::default());

        assert_eq!(defaults.application_id, "com.example.tea_multitenant");
        assert_eq!(defaults.namespace, "com.example.tea_multitenant");
        assert_eq!(defaults.jvm_target, "17");
        assert_eq!(defaults.app_name.source, ValueSource::Default);
        assert_eq!(
            defaults.manifest_placeholders.get("appName"),
            Some("Turbo Tea Multi-Tenant")
        );
    }

    #[test]
    fn test_placeholder_matches_resolved_name() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(".env"), "APP_NAME='Oolong'\n").unwrap();
        let defaults = BuildDefaults::resolve(dir.path(), &ConfigSchema::default());

        assert!(defaults.app_name.from_file());
        assert_eq!(defaults.manifest_placeholders.get("appName"), Some("Oolong"));
    }

    #[test]
    fn test_serializes_to_json() {
        let dir = TempDir::new().unwrap();
        let defaults = BuildDefaults::resolve(dir.path(), &ConfigSchema::default());
        let json = serde_json::to_value(&defaults).unwrap();

        assert_eq!(json["manifest_placeholders"]["appName"], "Turbo Tea Multi-Tenant");
        assert_eq!(json["app_name"]["source"]["kind"], "default");
    }
}
