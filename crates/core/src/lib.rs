//! Core utilities for Turbo Tea build tools
//!
//! This crate provides shared functionality used by the platform tools:
//!
//! - **Error handling**: Structured errors with codes, context, and recovery suggestions
//! - **Configuration**: TOML-based tool configuration with validation
//! - **Env files**: Total, default-backed lookup of `KEY=VALUE` entries
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use turbotea_core::{config::Config, env_file};
//!
//! let config = Config::load_from(Path::new(".")).expect("invalid config");
//! let app = &config.schema.app_name;
//! let name = env_file::resolve(Path::new("."), &app.env_file, &app.key, &app.default);
//! println!("Building {name}");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod env_file;
pub mod error;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{AndroidConfig, AppNameConfig, Config, ConfigSchema};
    pub use crate::env_file::{resolve, resolve_with_source, ResolvedValue, ValueSource};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
}
