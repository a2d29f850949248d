//! The in-memory state behind [`super::Store`]
//!
//! `State` owns every collection and is what gets written to the snapshot.
//! Operations are grouped by concern in sibling modules as `impl State`
//! blocks; each one validates first and mutates last, so a returned error
//! means nothing changed.

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::quiz::QuizQuestion;
use crate::error::{StoreError, StoreResult};
use crate::models::{
    ledger::{Ledger, LedgerReason},
    premium::PremiumRequest,
    settings::Settings,
    submission::TaskSubmission,
    task::Task,
    ticket::Ticket,
    user::User,
    wallet::WalletKind,
    withdrawal::{JobWithdrawal, Withdrawal},
};

/// All platform data
///
/// Request collections are kept newest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct State {
    pub users: Vec<User>,
    pub tasks: Vec<Task>,
    pub submissions: Vec<TaskSubmission>,
    pub withdrawals: Vec<Withdrawal>,
    pub job_withdrawals: Vec<JobWithdrawal>,
    pub premium_requests: Vec<PremiumRequest>,
    pub tickets: Vec<Ticket>,
    pub settings: Settings,
    pub ledger: Ledger,

    /// Open quiz question per member; not persisted
    #[serde(skip)]
    pub(crate) quizzes: HashMap<Uuid, QuizQuestion>,
}

/// Calendar date used for `join_date` and request dates
pub(crate) fn today() -> NaiveDate {
    Utc::now().date_naive()
}

impl State {
    pub fn user(&self, id: Uuid) -> StoreResult<&User> {
        self.users
            .iter()
            .find(|u| u.id == id)
            .ok_or_else(|| StoreError::not_found("User not found"))
    }

    pub(crate) fn user_mut(&mut self, id: Uuid) -> StoreResult<&mut User> {
        self.users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| StoreError::not_found("User not found"))
    }

    pub fn user_by_phone(&self, phone: &str) -> Option<&User> {
        self.users.iter().find(|u| u.phone == phone)
    }

    pub fn user_by_ref_code(&self, code: &str) -> Option<&User> {
        self.users.iter().find(|u| u.ref_code == code)
    }

    pub fn task(&self, id: Uuid) -> StoreResult<&Task> {
        self.tasks
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::not_found("Task not found"))
    }

    /// Adds `amount` to a wallet and records it in the ledger
    pub(crate) fn credit(
        &mut self,
        user_id: Uuid,
        wallet: WalletKind,
        amount: u64,
        reason: LedgerReason,
        reference: Uuid,
    ) -> StoreResult<()> {
        if amount == 0 {
            return Ok(());
        }
        let delta = i64::try_from(amount)
            .map_err(|_| StoreError::validation("amount", "Amount is too large"))?;

        let balance = self.user_mut(user_id)?.balance_mut(wallet);
        *balance = balance
            .checked_add(amount)
            .ok_or_else(|| StoreError::validation("amount", "Balance would overflow"))?;

        self.ledger.append(user_id, wallet, delta, reason, reference);
        Ok(())
    }

    /// Removes `amount` from a wallet and records it in the ledger
    pub(crate) fn debit(
        &mut self,
        user_id: Uuid,
        wallet: WalletKind,
        amount: u64,
        reason: LedgerReason,
        reference: Uuid,
    ) -> StoreResult<()> {
        if amount == 0 {
            return Ok(());
        }
        let delta = i64::try_from(amount)
            .map_err(|_| StoreError::validation("amount", "Amount is too large"))?;

        let balance = self.user_mut(user_id)?.balance_mut(wallet);
        *balance = balance
            .checked_sub(amount)
            .ok_or_else(|| StoreError::validation("amount", "Insufficient balance"))?;

        self.ledger.append(user_id, wallet, -delta, reason, reference);
        Ok(())
    }
}

/// Rejects blank required text fields
pub(crate) fn require(field: &str, value: &str, message: &str) -> StoreResult<()> {
    if value.trim().is_empty() {
        return Err(StoreError::validation(field, message));
    }
    Ok(())
}
