//! Android build helpers for Turbo Tea
//!
//! This crate provides Android-specific functionality:
//! - Manifest placeholder resolution and template substitution
//! - `defaultConfig` reporting

#![warn(missing_docs)]

pub mod build_config;
pub mod manifest;

pub use build_config::BuildDefaults;
pub use manifest::ManifestPlaceholders;
