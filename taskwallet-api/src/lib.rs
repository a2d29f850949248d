//! # TaskWallet API Server Library
//!
//! HTTP front end for the TaskWallet store: members register with a
//! referral code, complete tasks for wallet credit and request payouts; the
//! administrator reviews everything.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
