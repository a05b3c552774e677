//! Maintenance Crons - scheduled maintenance triggers for a remote store
//!
//! This library exposes authenticated HTTP endpoints that run the
//! penalty and challenge-expiry stored procedures of a remote data store
//! and report their results as fixed-shape JSON.

pub mod config;
pub mod constants;
pub mod core;
pub mod error;
pub mod handlers;
pub mod security;
pub mod storage;

// Re-export main components
pub use config::*;
pub use constants::*;
