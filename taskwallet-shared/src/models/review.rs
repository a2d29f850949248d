//! Admin review lifecycle
//!
//! Submissions, withdrawals, job withdrawals and premium requests all share
//! the same three-state lifecycle:
//!
//! ```text
//! PENDING ──approve──> APPROVED
//!    │
//!    └─────reject────> REJECTED
//! ```
//!
//! Both decided states are terminal. Deciding twice is a conflict, which is
//! what keeps rewards, refunds and upgrades from being applied more than once.

use crate::error::{StoreError, StoreResult};
use serde::{Deserialize, Serialize};

/// Review state of a member request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ReviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Pending => "PENDING",
            ReviewStatus::Approved => "APPROVED",
            ReviewStatus::Rejected => "REJECTED",
        }
    }

    /// Parses the wire form (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "PENDING" => Some(ReviewStatus::Pending),
            "APPROVED" => Some(ReviewStatus::Approved),
            "REJECTED" => Some(ReviewStatus::Rejected),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        *self == ReviewStatus::Pending
    }

    /// PENDING -> APPROVED
    pub fn approve(&mut self, what: &str) -> StoreResult<()> {
        self.decide(ReviewStatus::Approved, what)
    }

    /// PENDING -> REJECTED
    pub fn reject(&mut self, what: &str) -> StoreResult<()> {
        self.decide(ReviewStatus::Rejected, what)
    }

    fn decide(&mut self, outcome: ReviewStatus, what: &str) -> StoreResult<()> {
        if !self.is_pending() {
            return Err(StoreError::conflict(format!(
                "{} is already {}",
                what,
                self.as_str()
            )));
        }
        *self = outcome;
        Ok(())
    }
}
