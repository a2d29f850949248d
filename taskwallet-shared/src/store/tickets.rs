//! Support tickets

use tracing::info;
use uuid::Uuid;

use super::state::{require, today, State};
use crate::error::{StoreError, StoreResult};
use crate::models::ticket::{Ticket, TicketStatus};

impl State {
    pub fn submit_ticket(
        &mut self,
        user_id: Uuid,
        subject: &str,
        message: &str,
    ) -> StoreResult<Ticket> {
        self.user(user_id)?;
        require("subject", subject, "Subject is required")?;
        require("message", message, "Message is required")?;

        let ticket = Ticket {
            id: Uuid::new_v4(),
            user_id,
            subject: subject.trim().to_string(),
            message: message.trim().to_string(),
            status: TicketStatus::Open,
            date: today(),
        };

        info!(ticket_id = %ticket.id, user_id = %user_id, "Ticket opened");
        self.tickets.insert(0, ticket.clone());
        Ok(ticket)
    }

    pub fn close_ticket(&mut self, id: Uuid) -> StoreResult<Ticket> {
        let ticket = self
            .tickets
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::not_found("Ticket not found"))?;
        if ticket.status == TicketStatus::Closed {
            return Err(StoreError::conflict("Ticket is already CLOSED"));
        }

        ticket.status = TicketStatus::Closed;
        info!(ticket_id = %id, "Ticket closed");
        Ok(ticket.clone())
    }

    pub fn tickets_for(&self, user_id: Uuid) -> Vec<Ticket> {
        self.tickets
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect()
    }
}
