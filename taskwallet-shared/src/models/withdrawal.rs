//! Payout requests
//!
//! [`Withdrawal`] moves money out of a wallet. The amount is held (debited)
//! when the request is made; approval marks it paid and rejection refunds it.
//!
//! [`JobWithdrawal`] converts points earned on off-platform jobs into a
//! payout at the configured point rate. It never touches wallet balances.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{review::ReviewStatus, wallet::WalletKind};

/// Mobile money provider used for the payout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PayoutMethod {
    Bkash,
    Nagad,
    Rocket,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Withdrawal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub amount: u64,
    pub method: PayoutMethod,

    /// Receiving account number
    pub number: String,

    /// Wallet the amount was held from
    pub wallet: WalletKind,

    pub status: ReviewStatus,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobWithdrawal {
    pub id: Uuid,
    pub user_id: Uuid,

    /// Kind of job the points came from ("Data Entry", ...)
    pub job_type: String,

    pub points: u64,

    /// points x job_point_rate at request time
    pub amount: u64,

    pub wallet_number: String,
    pub proof_image: String,
    pub status: ReviewStatus,
    pub date: NaiveDate,
}
