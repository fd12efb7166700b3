//! Configuration loading for the Adjustment Engine.
//!
//! This module loads engine settings, the salary component catalog and optional
//! master data from a directory of YAML files.
//!
//! # Example
//!
//! ```no_run
//! use adjustment_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Loaded engine: {}", config.settings().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{ComponentConfig, ComponentsConfig, EngineConfig, EngineSettings, ServerSettings};
