//! Task submissions
//!
//! A submission is a member's proof that they completed a task. The reward
//! amount and the target wallet are copied from the task when the submission
//! is made, so later edits or deletion of the task do not change what an
//! approval pays.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{review::ReviewStatus, wallet::WalletKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSubmission {
    pub id: Uuid,
    pub user_id: Uuid,
    pub task_id: Uuid,

    /// Task title at submission time
    pub task_title: String,

    /// Link to the proof (screenshot, channel page, ...)
    pub proof_link: String,

    pub details: String,

    pub status: ReviewStatus,

    pub date: NaiveDate,

    /// Reward paid on approval
    pub amount: u64,

    /// Wallet credited on approval
    pub wallet: WalletKind,
}
