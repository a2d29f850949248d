//! Dashboard counters and settings updates

use serde::Serialize;
use tracing::info;

use super::state::State;
use crate::error::StoreResult;
use crate::models::{
    settings::Settings,
    ticket::TicketStatus,
    user::{UserProfile, UserStatus},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AdminStats {
    pub total_users: usize,
    pub premium_users: usize,
    pub pending_submissions: usize,
    pub pending_withdrawals: usize,
    pub pending_job_withdrawals: usize,
    pub pending_premium_requests: usize,
    pub open_tickets: usize,
}

impl State {
    pub fn stats(&self) -> AdminStats {
        AdminStats {
            total_users: self.users.len(),
            premium_users: self
                .users
                .iter()
                .filter(|u| u.status == UserStatus::Premium)
                .count(),
            pending_submissions: self
                .submissions
                .iter()
                .filter(|s| s.status.is_pending())
                .count(),
            pending_withdrawals: self
                .withdrawals
                .iter()
                .filter(|w| w.status.is_pending())
                .count(),
            pending_job_withdrawals: self
                .job_withdrawals
                .iter()
                .filter(|j| j.status.is_pending())
                .count(),
            pending_premium_requests: self
                .premium_requests
                .iter()
                .filter(|r| r.status.is_pending())
                .count(),
            open_tickets: self
                .tickets
                .iter()
                .filter(|t| t.status == TicketStatus::Open)
                .count(),
        }
    }

    pub fn user_profiles(&self) -> Vec<UserProfile> {
        self.users.iter().map(|u| u.profile()).collect()
    }

    /// Replaces the settings after validating them
    pub fn update_settings(&mut self, settings: Settings) -> StoreResult<Settings> {
        settings.validate()?;
        self.settings = settings;
        info!(
            min_withdraw = self.settings.min_withdraw,
            ref_bonus = self.settings.ref_bonus,
            "Settings updated"
        );
        Ok(self.settings.clone())
    }
}
