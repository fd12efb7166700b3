//! Employee referral records a referral bonus can be paid against.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The hiring status of a referral.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferralStatus {
    /// Not yet reviewed.
    #[default]
    Pending,
    /// Under review.
    InProcess,
    /// The referred candidate was hired.
    Accepted,
    /// The referred candidate was not hired.
    Rejected,
}

impl fmt::Display for ReferralStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferralStatus::Pending => write!(f, "pending"),
            ReferralStatus::InProcess => write!(f, "in_process"),
            ReferralStatus::Accepted => write!(f, "accepted"),
            ReferralStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// Whether the referral bonus has been paid out through payroll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferralPaymentStatus {
    /// No submitted adjustment pays the bonus.
    #[default]
    Unpaid,
    /// A submitted adjustment pays the bonus.
    Paid,
}

/// An employee referral.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Referral {
    /// Unique identifier for the referral.
    pub id: String,
    /// Whether the referral qualifies for a bonus.
    #[serde(default)]
    pub applicable_for_bonus: bool,
    /// The hiring status.
    #[serde(default)]
    pub status: ReferralStatus,
    /// The bonus payment status, flipped by lifecycle hooks.
    #[serde(default)]
    pub payment_status: ReferralPaymentStatus,
}
