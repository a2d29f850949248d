//! Task catalogue and submission review

use tracing::info;
use uuid::Uuid;

use super::state::{require, today, State};
use crate::error::{StoreError, StoreResult};
use crate::models::{
    ledger::LedgerReason,
    review::ReviewStatus,
    submission::TaskSubmission,
    task::{NewTask, Task},
};

/// Input for a task submission
#[derive(Debug, Clone)]
pub struct SubmitTask {
    pub task_id: Uuid,
    pub proof_link: String,
    pub details: Option<String>,
}

impl State {
    /// Tasks a member may see: free members get FREE tasks, premium members
    /// get everything
    pub fn tasks_for(&self, user_id: Uuid) -> StoreResult<Vec<Task>> {
        let premium = self.user(user_id)?.is_premium();
        Ok(self
            .tasks
            .iter()
            .filter(|t| premium || !t.is_premium())
            .cloned()
            .collect())
    }

    pub fn add_task(&mut self, data: NewTask) -> StoreResult<Task> {
        require("title", &data.title, "Title is required")?;
        if data.amount == 0 {
            return Err(StoreError::validation("amount", "Reward must be positive"));
        }
        if data.limit_per_day == Some(0) {
            return Err(StoreError::validation(
                "limit_per_day",
                "Daily limit must be positive",
            ));
        }

        let task = Task::from_new(data);
        info!(task_id = %task.id, title = %task.title, amount = task.amount, "Task added");
        self.tasks.push(task.clone());
        Ok(task)
    }

    /// Removes a task; existing submissions keep their copied reward
    pub fn delete_task(&mut self, task_id: Uuid) -> StoreResult<()> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.id == task_id)
            .ok_or_else(|| StoreError::not_found("Task not found"))?;
        self.tasks.remove(index);
        info!(task_id = %task_id, "Task deleted");
        Ok(())
    }

    pub fn submit_task(&mut self, user_id: Uuid, data: SubmitTask) -> StoreResult<TaskSubmission> {
        require("proof_link", &data.proof_link, "Proof link required")?;

        let user = self.user(user_id)?;
        let task = self.task(data.task_id)?;

        if task.is_premium() && !user.is_premium() {
            return Err(StoreError::forbidden("Premium task requires premium membership"));
        }

        let date = today();
        if let Some(limit) = task.limit_per_day {
            let used = self
                .submissions
                .iter()
                .filter(|s| {
                    s.user_id == user_id
                        && s.task_id == task.id
                        && s.date == date
                        && s.status != ReviewStatus::Rejected
                })
                .count();
            if used >= limit as usize {
                return Err(StoreError::conflict("Daily limit reached for this task"));
            }
        }

        let submission = TaskSubmission {
            id: Uuid::new_v4(),
            user_id,
            task_id: task.id,
            task_title: task.title.clone(),
            proof_link: data.proof_link.trim().to_string(),
            details: data
                .details
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| "User Submitted".to_string()),
            status: ReviewStatus::Pending,
            date,
            amount: task.amount,
            wallet: task.task_type.wallet(),
        };

        info!(submission_id = %submission.id, user_id = %user_id, task_id = %task.id, "Task submitted");
        self.submissions.insert(0, submission.clone());
        Ok(submission)
    }

    fn submission_index(&self, id: Uuid) -> StoreResult<usize> {
        self.submissions
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| StoreError::not_found("Submission not found"))
    }

    /// PENDING -> APPROVED, crediting the submitter's wallet
    pub fn approve_submission(&mut self, id: Uuid) -> StoreResult<TaskSubmission> {
        let index = self.submission_index(id)?;
        let submission = &self.submissions[index];
        if !submission.status.is_pending() {
            return Err(StoreError::conflict(format!(
                "Submission is already {}",
                submission.status.as_str()
            )));
        }

        let (user_id, wallet, amount) = (submission.user_id, submission.wallet, submission.amount);
        self.credit(user_id, wallet, amount, LedgerReason::TaskReward, id)?;

        let submission = &mut self.submissions[index];
        submission.status.approve("Submission")?;
        info!(submission_id = %id, user_id = %user_id, amount, wallet = wallet.as_str(), "Submission approved");
        Ok(submission.clone())
    }

    /// PENDING -> REJECTED
    pub fn reject_submission(&mut self, id: Uuid) -> StoreResult<TaskSubmission> {
        let index = self.submission_index(id)?;
        let submission = &mut self.submissions[index];
        submission.status.reject("Submission")?;
        info!(submission_id = %id, "Submission rejected");
        Ok(submission.clone())
    }

    pub fn submissions_for(&self, user_id: Uuid) -> Vec<TaskSubmission> {
        self.submissions
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect()
    }

    pub fn submissions_with_status(&self, status: Option<ReviewStatus>) -> Vec<TaskSubmission> {
        self.submissions
            .iter()
            .filter(|s| status.map_or(true, |wanted| s.status == wanted))
            .cloned()
            .collect()
    }
}
