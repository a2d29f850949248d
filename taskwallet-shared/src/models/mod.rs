//! Domain models
//!
//! Plain data held by the [`crate::store`]. Models know their own invariants
//! (review transitions, balance lookup, settings validation); everything that
//! touches more than one entity lives in the store.
//!
//! # Models
//!
//! - `user`: member accounts, wallets and referral codes
//! - `task`: earning tasks
//! - `submission`: proof-of-completion records
//! - `withdrawal`: wallet withdrawals and job-point payouts
//! - `premium`: premium membership purchase claims
//! - `ticket`: support tickets
//! - `settings`: platform text and economics
//! - `ledger`: hash-chained balance history
//! - `review`: PENDING/APPROVED/REJECTED lifecycle shared by requests
//! - `wallet`: FREE/PREMIUM wallet identifier

pub mod ledger;
pub mod premium;
pub mod review;
pub mod settings;
pub mod submission;
pub mod task;
pub mod ticket;
pub mod user;
pub mod wallet;
pub mod withdrawal;
