//! Premium membership purchase claims
//!
//! Members pay the premium fee by mobile money outside the platform, then
//! submit the sender number and transaction ID here. Approval upgrades the
//! member.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{review::ReviewStatus, withdrawal::PayoutMethod};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PremiumRequest {
    pub id: Uuid,
    pub user_id: Uuid,
    pub method: PayoutMethod,
    pub sender_number: String,
    pub trx_id: String,

    /// Premium cost at request time
    pub amount: u64,

    pub status: ReviewStatus,
    pub date: NaiveDate,
}
