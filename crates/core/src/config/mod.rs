//! Configuration loading and schema definitions
//!
//! Tool configuration shared by every binary in the workspace.

mod loader;
mod schema;

pub use loader::{Config, CONFIG_CANDIDATES};
pub use schema::*;
