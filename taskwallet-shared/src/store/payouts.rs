//! Withdrawals and job-point payouts

use tracing::info;
use uuid::Uuid;

use super::state::{require, today, State};
use crate::error::{StoreError, StoreResult};
use crate::models::{
    ledger::LedgerReason,
    review::ReviewStatus,
    wallet::WalletKind,
    withdrawal::{JobWithdrawal, PayoutMethod, Withdrawal},
};

/// Input for a withdrawal request
#[derive(Debug, Clone)]
pub struct RequestWithdrawal {
    pub amount: u64,
    pub method: PayoutMethod,
    pub number: String,
    pub wallet: WalletKind,
}

/// Input for a job-point payout request
#[derive(Debug, Clone)]
pub struct RequestJobWithdrawal {
    pub job_type: String,
    pub points: u64,
    pub wallet_number: String,
    pub proof_image: String,
}

impl State {
    /// Requests a payout, holding the amount from the chosen wallet
    pub fn request_withdrawal(
        &mut self,
        user_id: Uuid,
        data: RequestWithdrawal,
    ) -> StoreResult<Withdrawal> {
        let min = self.settings.min_withdraw;
        if data.amount < min {
            return Err(StoreError::validation(
                "amount",
                format!("Minimum withdraw is {}", min),
            ));
        }
        require("number", &data.number, "Account number is required")?;
        if self.user(user_id)?.balance(data.wallet) < data.amount {
            return Err(StoreError::validation("amount", "Insufficient balance"));
        }

        let withdrawal = Withdrawal {
            id: Uuid::new_v4(),
            user_id,
            amount: data.amount,
            method: data.method,
            number: data.number.trim().to_string(),
            wallet: data.wallet,
            status: ReviewStatus::Pending,
            date: today(),
        };

        self.debit(
            user_id,
            data.wallet,
            data.amount,
            LedgerReason::WithdrawalHold,
            withdrawal.id,
        )?;

        info!(
            withdrawal_id = %withdrawal.id,
            user_id = %user_id,
            amount = data.amount,
            wallet = data.wallet.as_str(),
            "Withdrawal requested"
        );
        self.withdrawals.insert(0, withdrawal.clone());
        Ok(withdrawal)
    }

    fn withdrawal_index(&self, id: Uuid) -> StoreResult<usize> {
        self.withdrawals
            .iter()
            .position(|w| w.id == id)
            .ok_or_else(|| StoreError::not_found("Withdrawal not found"))
    }

    /// Marks a withdrawal paid
    pub fn approve_withdrawal(&mut self, id: Uuid) -> StoreResult<Withdrawal> {
        let index = self.withdrawal_index(id)?;
        let withdrawal = &mut self.withdrawals[index];
        withdrawal.status.approve("Withdrawal")?;
        info!(withdrawal_id = %id, amount = withdrawal.amount, "Withdrawal approved");
        Ok(withdrawal.clone())
    }

    /// Rejects a withdrawal and returns the held amount
    pub fn reject_withdrawal(&mut self, id: Uuid) -> StoreResult<Withdrawal> {
        let index = self.withdrawal_index(id)?;
        let withdrawal = &self.withdrawals[index];
        if !withdrawal.status.is_pending() {
            return Err(StoreError::conflict(format!(
                "Withdrawal is already {}",
                withdrawal.status.as_str()
            )));
        }

        let (user_id, wallet, amount) = (withdrawal.user_id, withdrawal.wallet, withdrawal.amount);
        self.credit(user_id, wallet, amount, LedgerReason::WithdrawalRefund, id)?;

        let withdrawal = &mut self.withdrawals[index];
        withdrawal.status.reject("Withdrawal")?;
        info!(withdrawal_id = %id, user_id = %user_id, amount, "Withdrawal rejected and refunded");
        Ok(withdrawal.clone())
    }

    pub fn withdrawals_for(&self, user_id: Uuid) -> Vec<Withdrawal> {
        self.withdrawals
            .iter()
            .filter(|w| w.user_id == user_id)
            .cloned()
            .collect()
    }

    /// Converts job points to a payout request at the current point rate
    pub fn request_job_withdrawal(
        &mut self,
        user_id: Uuid,
        data: RequestJobWithdrawal,
    ) -> StoreResult<JobWithdrawal> {
        self.user(user_id)?;
        if data.points == 0 {
            return Err(StoreError::validation("points", "Invalid points"));
        }
        require("job_type", &data.job_type, "Job type is required")?;
        require("wallet_number", &data.wallet_number, "Wallet number is required")?;

        let amount = data
            .points
            .checked_mul(self.settings.job_point_rate)
            .ok_or_else(|| StoreError::validation("points", "Invalid points"))?;

        let job = JobWithdrawal {
            id: Uuid::new_v4(),
            user_id,
            job_type: data.job_type.trim().to_string(),
            points: data.points,
            amount,
            wallet_number: data.wallet_number.trim().to_string(),
            proof_image: data.proof_image.trim().to_string(),
            status: ReviewStatus::Pending,
            date: today(),
        };

        info!(job_withdrawal_id = %job.id, user_id = %user_id, points = job.points, amount, "Job withdrawal requested");
        self.job_withdrawals.insert(0, job.clone());
        Ok(job)
    }

    fn job_withdrawal_mut(&mut self, id: Uuid) -> StoreResult<&mut JobWithdrawal> {
        self.job_withdrawals
            .iter_mut()
            .find(|j| j.id == id)
            .ok_or_else(|| StoreError::not_found("Job withdrawal not found"))
    }

    pub fn approve_job_withdrawal(&mut self, id: Uuid) -> StoreResult<JobWithdrawal> {
        let job = self.job_withdrawal_mut(id)?;
        job.status.approve("Job withdrawal")?;
        info!(job_withdrawal_id = %id, "Job withdrawal approved");
        Ok(job.clone())
    }

    pub fn reject_job_withdrawal(&mut self, id: Uuid) -> StoreResult<JobWithdrawal> {
        let job = self.job_withdrawal_mut(id)?;
        job.status.reject("Job withdrawal")?;
        info!(job_withdrawal_id = %id, "Job withdrawal rejected");
        Ok(job.clone())
    }

    pub fn job_withdrawals_for(&self, user_id: Uuid) -> Vec<JobWithdrawal> {
        self.job_withdrawals
            .iter()
            .filter(|j| j.user_id == user_id)
            .cloned()
            .collect()
    }
}
