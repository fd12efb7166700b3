//! Employee advance records recovered through deduction adjustments.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The settlement status of an employee advance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvanceStatus {
    /// Requested but not (fully) paid out.
    #[default]
    Unpaid,
    /// Fully paid out, nothing settled yet.
    Paid,
    /// Fully settled by expense claims.
    Claimed,
    /// Fully settled by returns.
    Returned,
    /// Settled by a mix of claims and returns.
    PartlyClaimedAndReturned,
}

/// An advance paid to an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeAdvance {
    /// Unique identifier for the advance.
    pub id: String,
    /// The employee who received the advance.
    pub employee: String,
    /// The amount requested.
    pub advance_amount: Decimal,
    /// The amount paid out.
    #[serde(default)]
    pub paid_amount: Decimal,
    /// The amount settled through expense claims.
    #[serde(default)]
    pub claimed_amount: Decimal,
    /// The amount returned, including payroll deductions.
    #[serde(default)]
    pub return_amount: Decimal,
    /// The settlement status.
    #[serde(default)]
    pub status: AdvanceStatus,
}

impl EmployeeAdvance {
    /// Derives the settlement status from the paid, claimed and returned amounts.
    ///
    /// # Example
    ///
    /// ```
    /// use adjustment_engine::models::{AdvanceStatus, EmployeeAdvance};
    /// use rust_decimal::Decimal;
    ///
    /// let advance = EmployeeAdvance {
    ///     id: "ADV-0001".to_string(),
    ///     employee: "EMP-0001".to_string(),
    ///     advance_amount: Decimal::new(1000, 0),
    ///     paid_amount: Decimal::new(1000, 0),
    ///     claimed_amount: Decimal::ZERO,
    ///     return_amount: Decimal::new(1000, 0),
    ///     status: AdvanceStatus::Paid,
    /// };
    /// assert_eq!(advance.computed_status(), AdvanceStatus::Returned);
    /// ```
    pub fn computed_status(&self) -> AdvanceStatus {
        let claimed = self.claimed_amount;
        let returned = self.return_amount;
        let paid = self.paid_amount;

        if claimed > Decimal::ZERO && claimed == paid {
            AdvanceStatus::Claimed
        } else if returned > Decimal::ZERO && returned == paid {
            AdvanceStatus::Returned
        } else if claimed > Decimal::ZERO
            && returned > Decimal::ZERO
            && claimed.checked_add(returned) == Some(paid)
        {
            AdvanceStatus::PartlyClaimedAndReturned
        } else if paid > Decimal::ZERO && self.advance_amount == paid {
            AdvanceStatus::Paid
        } else {
            AdvanceStatus::Unpaid
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn advance(paid: i64, claimed: i64, returned: i64) -> EmployeeAdvance {
        EmployeeAdvance {
            id: "ADV-0001".to_string(),
            employee: "EMP-0001".to_string(),
            advance_amount: Decimal::new(1000, 0),
            paid_amount: Decimal::new(paid, 0),
            claimed_amount: Decimal::new(claimed, 0),
            return_amount: Decimal::new(returned, 0),
            status: AdvanceStatus::Unpaid,
        }
    }

    #[test]
    fn test_status_with_max_return_does_not_overflow() {
        let mut record = advance(1000, 400, 0);
        record.return_amount = Decimal::MAX;
        assert_eq!(record.computed_status(), AdvanceStatus::Paid);
    }

    #[test]
    fn test_unpaid_when_nothing_paid() {
        assert_eq!(advance(0, 0, 0).computed_status(), AdvanceStatus::Unpaid);
    }

    #[test]
    fn test_paid_when_fully_paid_out() {
        assert_eq!(advance(1000, 0, 0).computed_status(), AdvanceStatus::Paid);
    }

    #[test]
    fn test_paid_while_partially_returned() {
        assert_eq!(advance(1000, 0, 400).computed_status(), AdvanceStatus::Paid);
    }

    #[test]
    fn test_returned_when_fully_returned() {
        assert_eq!(
            advance(1000, 0, 1000).computed_status(),
            AdvanceStatus::Returned
        );
    }

    #[test]
    fn test_claimed_when_fully_claimed() {
        assert_eq!(
            advance(1000, 1000, 0).computed_status(),
            AdvanceStatus::Claimed
        );
    }

    #[test]
    fn test_partly_claimed_and_returned() {
        assert_eq!(
            advance(1000, 600, 400).computed_status(),
            AdvanceStatus::PartlyClaimedAndReturned
        );
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&AdvanceStatus::PartlyClaimedAndReturned).unwrap(),
            "\"partly_claimed_and_returned\""
        );
    }
}
