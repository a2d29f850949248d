//! API route handlers
//!
//! Handlers are organized by resource:
//!
//! - `health`: Health check endpoint
//! - `auth`: Registration, login, admin login, token refresh
//! - `settings`: Public platform settings
//! - `account`: Profile, password, team, ledger, premium claim, quiz
//! - `tasks`: Task list and submissions
//! - `withdrawals`: Wallet and job-point payouts
//! - `tickets`: Support tickets
//! - `admin`: Review queues, task catalogue, members and settings

pub mod account;
pub mod admin;
pub mod auth;
pub mod health;
pub mod settings;
pub mod tasks;
pub mod tickets;
pub mod withdrawals;
