//! Premium membership payment claims

use tracing::info;
use uuid::Uuid;

use super::state::{require, today, State};
use crate::error::{StoreError, StoreResult};
use crate::models::{premium::PremiumRequest, review::ReviewStatus, withdrawal::PayoutMethod};

/// Input for a premium payment claim
#[derive(Debug, Clone)]
pub struct RequestPremium {
    pub method: PayoutMethod,
    pub sender_number: String,
    pub trx_id: String,
}

impl State {
    pub fn request_premium(
        &mut self,
        user_id: Uuid,
        data: RequestPremium,
    ) -> StoreResult<PremiumRequest> {
        if self.user(user_id)?.is_premium() {
            return Err(StoreError::conflict("Already a premium member"));
        }
        require("sender_number", &data.sender_number, "Sender number is required")?;
        require("trx_id", &data.trx_id, "Transaction ID is required")?;

        if self
            .premium_requests
            .iter()
            .any(|r| r.user_id == user_id && r.status.is_pending())
        {
            return Err(StoreError::conflict("A premium request is already pending"));
        }

        let request = PremiumRequest {
            id: Uuid::new_v4(),
            user_id,
            method: data.method,
            sender_number: data.sender_number.trim().to_string(),
            trx_id: data.trx_id.trim().to_string(),
            amount: self.settings.premium_cost,
            status: ReviewStatus::Pending,
            date: today(),
        };

        info!(premium_request_id = %request.id, user_id = %user_id, trx_id = %request.trx_id, "Premium requested");
        self.premium_requests.insert(0, request.clone());
        Ok(request)
    }

    fn premium_request_index(&self, id: Uuid) -> StoreResult<usize> {
        self.premium_requests
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| StoreError::not_found("Premium request not found"))
    }

    /// Approves a claim and upgrades the member
    ///
    /// A member who was upgraded directly in the meantime keeps their status;
    /// the request is still approved but no second bonus is paid.
    pub fn approve_premium(&mut self, id: Uuid) -> StoreResult<PremiumRequest> {
        let index = self.premium_request_index(id)?;
        let request = &self.premium_requests[index];
        if !request.status.is_pending() {
            return Err(StoreError::conflict(format!(
                "Premium request is already {}",
                request.status.as_str()
            )));
        }

        let user_id = request.user_id;
        if !self.user(user_id)?.is_premium() {
            self.activate_premium(user_id)?;
        }

        let request = &mut self.premium_requests[index];
        request.status.approve("Premium request")?;
        info!(premium_request_id = %id, user_id = %user_id, "Premium request approved");
        Ok(request.clone())
    }

    pub fn reject_premium(&mut self, id: Uuid) -> StoreResult<PremiumRequest> {
        let index = self.premium_request_index(id)?;
        let request = &mut self.premium_requests[index];
        request.status.reject("Premium request")?;
        info!(premium_request_id = %id, "Premium request rejected");
        Ok(request.clone())
    }
}
