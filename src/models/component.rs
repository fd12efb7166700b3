//! Salary component model.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Whether a salary component adds to or deducts from pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentType {
    /// An earning line (e.g., bonus, arrears).
    #[serde(alias = "Earning", alias = "earnings")]
    Earning,
    /// A deduction line (e.g., advance recovery).
    #[serde(alias = "Deduction", alias = "deductions")]
    Deduction,
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentType::Earning => write!(f, "earning"),
            ComponentType::Deduction => write!(f, "deduction"),
        }
    }
}

/// A named pay component an adjustment applies to.
///
/// # Example
///
/// ```
/// use adjustment_engine::models::{ComponentType, SalaryComponent};
///
/// let bonus = SalaryComponent::new("Performance Bonus", ComponentType::Earning);
/// assert!(!bonus.variable_based_on_taxable_salary);
/// assert!(bonus.is_earning());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryComponent {
    /// The component name, unique within the catalog.
    pub name: String,
    /// Earning or deduction.
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    /// Set on income tax components whose amount is derived from tax slabs.
    #[serde(default)]
    pub variable_based_on_taxable_salary: bool,
}

impl SalaryComponent {
    /// Creates a component that is not tax-variable.
    pub fn new(name: impl Into<String>, component_type: ComponentType) -> Self {
        Self {
            name: name.into(),
            component_type,
            variable_based_on_taxable_salary: false,
        }
    }

    /// Returns true for earning components.
    pub fn is_earning(&self) -> bool {
        self.component_type == ComponentType::Earning
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_type_serialization() {
        assert_eq!(
            serde_json::to_string(&ComponentType::Earning).unwrap(),
            "\"earning\""
        );
        assert_eq!(
            serde_json::to_string(&ComponentType::Deduction).unwrap(),
            "\"deduction\""
        );
    }

    #[test]
    fn test_component_type_accepts_payroll_aliases() {
        let earning: ComponentType = serde_json::from_str("\"earnings\"").unwrap();
        let deduction: ComponentType = serde_json::from_str("\"Deduction\"").unwrap();
        assert_eq!(earning, ComponentType::Earning);
        assert_eq!(deduction, ComponentType::Deduction);
    }

    #[test]
    fn test_deserialize_component_with_type_field() {
        let json = r#"{
            "name": "Income Tax",
            "type": "deduction",
            "variable_based_on_taxable_salary": true
        }"#;
        let component: SalaryComponent = serde_json::from_str(json).unwrap();
        assert_eq!(component.component_type, ComponentType::Deduction);
        assert!(component.variable_based_on_taxable_salary);
        assert!(!component.is_earning());
    }

    #[test]
    fn test_tax_flag_defaults_to_false() {
        let json = r#"{"name": "Arrear", "type": "earning"}"#;
        let component: SalaryComponent = serde_json::from_str(json).unwrap();
        assert!(!component.variable_based_on_taxable_salary);
    }
}
