//! Error types for the Adjustment Engine.
//!
//! Business-rule rejections are modelled by [`RuleViolation`]. Each variant has a
//! stable [`RuleViolation::code`] and carries the identifiers, dates and component
//! names needed to render an actionable message. [`EngineError`] wraps rule
//! violations and adds the infrastructure and configuration failures, so callers
//! can tell "rule violated" apart from "could not evaluate the rule".

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::DocStatus;

/// The employment boundary a date was checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmploymentBound {
    /// The employee's date of joining (lower bound).
    Joining(NaiveDate),
    /// The employee's relieving date (upper bound).
    Relieving(NaiveDate),
}

impl fmt::Display for EmploymentBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmploymentBound::Joining(date) => write!(f, "before the joining date {}", date),
            EmploymentBound::Relieving(date) => write!(f, "after the relieving date {}", date),
        }
    }
}

/// A business rule that an adjustment, proration or aggregation request violated.
///
/// Rule violations are user-facing and never retried.
///
/// # Example
///
/// ```
/// use adjustment_engine::error::RuleViolation;
/// use rust_decimal::Decimal;
///
/// let violation = RuleViolation::NegativeAmount {
///     amount: Decimal::new(-1, 0),
/// };
/// assert_eq!(violation.code(), "NEGATIVE_AMOUNT");
/// assert_eq!(violation.to_string(), "Amount should not be less than zero (got -1)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleViolation {
    /// The employee is not active.
    #[error("Employee '{employee}' is not active")]
    InactiveEmployee {
        /// The employee identifier.
        employee: String,
    },

    /// The employee has no salary structure assignment.
    #[error("There is no salary structure assigned to '{employee}'. First assign a salary structure.")]
    NoSalaryStructure {
        /// The employee identifier.
        employee: String,
    },

    /// A date required by the adjustment's mode was not provided.
    #[error("Adjustment '{record}' is missing {field}")]
    MissingDate {
        /// The adjustment identifier.
        record: String,
        /// The name of the missing date field.
        field: &'static str,
    },

    /// A date range ends before it starts.
    #[error("Invalid date range: {end} is before {start}")]
    InvalidRange {
        /// The start of the range.
        start: NaiveDate,
        /// The end of the range.
        end: NaiveDate,
    },

    /// A date lies outside the employee's employment window.
    #[error("{field} {date} of employee '{employee}' is {bound}")]
    DateOutOfEmploymentWindow {
        /// The employee identifier.
        employee: String,
        /// The offending date field.
        field: &'static str,
        /// The offending date.
        date: NaiveDate,
        /// The boundary that was crossed.
        bound: EmploymentBound,
    },

    /// Another submitted recurring adjustment overlaps the candidate's range.
    #[error(
        "Additional salary {} already exists for component '{component}' for period {from_date} to {to_date}",
        .conflicting.join(", ")
    )]
    RecurringOverlap {
        /// The identifiers of every overlapping adjustment.
        conflicting: Vec<String>,
        /// The salary component name.
        component: String,
        /// The candidate's start date.
        from_date: NaiveDate,
        /// The candidate's end date.
        to_date: NaiveDate,
    },

    /// The referenced referral is not applicable for a referral bonus.
    #[error("Employee referral '{referral}' is not applicable for referral bonus")]
    ReferralNotApplicable {
        /// The referral identifier.
        referral: String,
    },

    /// A referral bonus was attached to a deduction component.
    #[error("Earning salary component is required for employee referral bonus, got '{component}'")]
    ReferralRequiresEarning {
        /// The salary component name.
        component: String,
    },

    /// The referenced referral has not been accepted.
    #[error("Referral bonus can only be created against an accepted referral; '{referral}' is {status}")]
    ReferralNotAccepted {
        /// The referral identifier.
        referral: String,
        /// The referral's current status.
        status: String,
    },

    /// Another overwrite-enabled adjustment already covers the candidate's date.
    #[error(
        "Additional salary for component '{component}' with overwrite enabled already exists for this date (reference: {conflicting})"
    )]
    DuplicateOverwrite {
        /// The salary component name.
        component: String,
        /// The conflicting adjustment identifier.
        conflicting: String,
    },

    /// A tax-variable component was used without overwrite enabled.
    #[error(
        "Component '{component}' is variable based on taxable salary; enable overwrite salary structure amount to use it"
    )]
    TaxComponentRequiresOverwrite {
        /// The salary component name.
        component: String,
    },

    /// The adjustment amount is negative.
    #[error("Amount should not be less than zero (got {amount})")]
    NegativeAmount {
        /// The rejected amount.
        amount: Decimal,
    },

    /// An adjustment's own range cannot be prorated.
    #[error("Adjustment '{record}' has a degenerate date range {from_date} to {to_date}")]
    DegenerateInterval {
        /// The adjustment identifier.
        record: String,
        /// The range start.
        from_date: NaiveDate,
        /// The range end.
        to_date: NaiveDate,
    },

    /// Proration was requested for a period the adjustment does not reach.
    #[error("Adjustment '{record}' does not apply to period {period_start} to {period_end}")]
    NonApplicablePeriod {
        /// The adjustment identifier.
        record: String,
        /// The period start.
        period_start: NaiveDate,
        /// The period end.
        period_end: NaiveDate,
    },

    /// More than one overwrite-enabled adjustment applies to one component in a period.
    #[error(
        "Multiple additional salaries with overwrite property exist for component '{component}' between {period_start} and {period_end}"
    )]
    MultipleOverwritesInPeriod {
        /// The salary component name.
        component: String,
        /// The period start.
        period_start: NaiveDate,
        /// The period end.
        period_end: NaiveDate,
    },

    /// A monetary amount exceeded the representable decimal range.
    #[error("Amount out of range while computing {operation} for {subject}")]
    AmountOverflow {
        /// The calculation that overflowed (e.g., "proration").
        operation: &'static str,
        /// The adjustment or employee the calculation was for.
        subject: String,
    },

    /// The requested document transition is not allowed from the current status.
    #[error("Cannot {action} adjustment '{record}' in status {status}")]
    InvalidTransition {
        /// The adjustment identifier.
        record: String,
        /// The attempted action (e.g., "submit").
        action: &'static str,
        /// The document's current status.
        status: DocStatus,
    },
}

impl RuleViolation {
    /// Returns the stable, machine-readable code for this violation.
    pub fn code(&self) -> &'static str {
        match self {
            RuleViolation::InactiveEmployee { .. } => "INACTIVE_EMPLOYEE",
            RuleViolation::NoSalaryStructure { .. } => "NO_SALARY_STRUCTURE",
            RuleViolation::MissingDate { .. } => "MISSING_DATE",
            RuleViolation::InvalidRange { .. } => "INVALID_RANGE",
            RuleViolation::DateOutOfEmploymentWindow { .. } => "DATE_OUT_OF_EMPLOYMENT_WINDOW",
            RuleViolation::RecurringOverlap { .. } => "RECURRING_OVERLAP",
            RuleViolation::ReferralNotApplicable { .. } => "REFERRAL_NOT_APPLICABLE",
            RuleViolation::ReferralRequiresEarning { .. } => "REFERRAL_REQUIRES_EARNING",
            RuleViolation::ReferralNotAccepted { .. } => "REFERRAL_NOT_ACCEPTED",
            RuleViolation::DuplicateOverwrite { .. } => "DUPLICATE_OVERWRITE",
            RuleViolation::TaxComponentRequiresOverwrite { .. } => {
                "TAX_COMPONENT_REQUIRES_OVERWRITE"
            }
            RuleViolation::NegativeAmount { .. } => "NEGATIVE_AMOUNT",
            RuleViolation::DegenerateInterval { .. } => "DEGENERATE_INTERVAL",
            RuleViolation::NonApplicablePeriod { .. } => "NON_APPLICABLE_PERIOD",
            RuleViolation::MultipleOverwritesInPeriod { .. } => "MULTIPLE_OVERWRITES_IN_PERIOD",
            RuleViolation::AmountOverflow { .. } => "AMOUNT_OVERFLOW",
            RuleViolation::InvalidTransition { .. } => "INVALID_TRANSITION",
        }
    }

    /// Returns true for violations caused by another stored adjustment.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            RuleViolation::RecurringOverlap { .. }
                | RuleViolation::DuplicateOverwrite { .. }
                | RuleViolation::MultipleOverwritesInPeriod { .. }
        )
    }
}

/// The main error type for the Adjustment Engine.
///
/// # Example
///
/// ```
/// use adjustment_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/engine.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/engine.yaml");
/// assert!(!error.is_rule_violation());
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A business rule was violated.
    #[error(transparent)]
    Rule(#[from] RuleViolation),

    /// An external collaborator could not answer a lookup.
    #[error("{collaborator} lookup failed: {message}")]
    Lookup {
        /// The collaborator that failed (e.g., "record store").
        collaborator: String,
        /// A description of the failure.
        message: String,
    },

    /// A referenced record does not exist.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// The kind of record (e.g., "Employee").
        kind: String,
        /// The identifier that was not found.
        id: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A salary component name is not in the configured catalog.
    #[error("Salary component not found: {name}")]
    ComponentNotFound {
        /// The component name that was not found.
        name: String,
    },
}

impl EngineError {
    /// Creates a [`EngineError::NotFound`] for the given record kind.
    pub fn not_found(kind: impl Into<String>, id: impl Into<String>) -> Self {
        EngineError::NotFound {
            kind: kind.into(),
            id: id.into(),
        }
    }

    /// Returns true if this error is a business-rule rejection rather than an
    /// infrastructure or configuration failure.
    pub fn is_rule_violation(&self) -> bool {
        matches!(self, EngineError::Rule(_))
    }

    /// Returns the wrapped rule violation, if any.
    pub fn rule(&self) -> Option<&RuleViolation> {
        match self {
            EngineError::Rule(violation) => Some(violation),
            _ => None,
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
