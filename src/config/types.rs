//! Configuration types for the adjustment engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use serde::Deserialize;
use std::collections::HashMap;

use crate::models::{ComponentType, SalaryComponent};

fn default_currency_precision() -> u32 {
    2
}

fn default_bind_address() -> String {
    "0.0.0.0:3000".to_string()
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// The socket address the service listens on.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
        }
    }
}

/// Engine settings from `engine.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineSettings {
    /// A display name for this deployment.
    pub name: String,
    /// Decimal places period amounts are rounded to.
    #[serde(default = "default_currency_precision")]
    pub currency_precision: u32,
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerSettings,
}

/// A salary component entry in the catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct ComponentConfig {
    /// Earning or deduction.
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    /// Short code shown on salary slips.
    #[serde(default)]
    pub abbr: String,
    /// Income tax component computed from tax slabs.
    #[serde(default)]
    pub variable_based_on_taxable_salary: bool,
}

/// Salary component catalog file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct ComponentsConfig {
    /// Map of component name to component details.
    pub components: HashMap<String, ComponentConfig>,
}

/// The complete engine configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    settings: EngineSettings,
    components: HashMap<String, ComponentConfig>,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(settings: EngineSettings, components: HashMap<String, ComponentConfig>) -> Self {
        Self {
            settings,
            components,
        }
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Returns the component catalog.
    pub fn components(&self) -> &HashMap<String, ComponentConfig> {
        &self.components
    }

    /// Builds the [`SalaryComponent`] for a catalog entry.
    pub fn salary_component(&self, name: &str) -> Option<SalaryComponent> {
        self.components.get(name).map(|c| SalaryComponent {
            name: name.to_string(),
            component_type: c.component_type,
            variable_based_on_taxable_salary: c.variable_based_on_taxable_salary,
        })
    }
}
