// src/lib.rs
// Tally - work logging for AI agents over MCP

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod codes;
pub mod config;
pub mod db;
pub mod error;
pub mod mcp;
pub mod service;
pub mod store;
pub mod timesheet;
pub mod types;
pub use error::{Result, TallyError};
