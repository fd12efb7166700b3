//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the engine
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::SalaryComponent;
use crate::store::MasterData;

use super::types::{ComponentsConfig, EngineConfig, EngineSettings};

/// Loads and provides access to the engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── engine.yaml       # Engine name, currency precision, server settings
/// ├── components.yaml   # Salary component catalog
/// └── master_data.yaml  # Optional seed employees, referrals and advances
/// ```
///
/// # Example
///
/// ```no_run
/// use adjustment_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
///
/// let bonus = loader.get_component("Bonus").unwrap();
/// println!("{} is an {}", bonus.name, bonus.component_type);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
    master_data: MasterData,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// `engine.yaml` and `components.yaml` are required. A missing
    /// `master_data.yaml` yields empty master data; a malformed one is an error.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use adjustment_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/default")?;
    /// # Ok::<(), adjustment_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<EngineSettings>(&path.join("engine.yaml"))?;
        let components = Self::load_yaml::<ComponentsConfig>(&path.join("components.yaml"))?;

        let master_data_path = path.join("master_data.yaml");
        let master_data = if master_data_path.exists() {
            Self::load_yaml::<MasterData>(&master_data_path)?
        } else {
            MasterData::default()
        };

        Ok(Self {
            config: EngineConfig::new(settings, components.components),
            master_data,
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &EngineSettings {
        self.config.settings()
    }

    /// Decimal places period amounts are rounded to.
    pub fn currency_precision(&self) -> u32 {
        self.settings().currency_precision
    }

    /// The socket address the HTTP service listens on.
    pub fn bind_address(&self) -> &str {
        &self.settings().server.bind_address
    }

    /// The seed data for the in-memory store.
    pub fn master_data(&self) -> &MasterData {
        &self.master_data
    }

    /// Resolves a salary component by name.
    ///
    /// # Returns
    ///
    /// Returns the component if it is in the catalog, or `ComponentNotFound`.
    pub fn get_component(&self, name: &str) -> EngineResult<SalaryComponent> {
        self.config
            .salary_component(name)
            .ok_or_else(|| EngineError::ComponentNotFound {
                name: name.to_string(),
            })
    }
}
