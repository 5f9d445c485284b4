//! saintluc-cli library root.
//!
//! Re-exports the command, session and config modules so that integration
//! tests can exercise them directly without spawning the binary.

pub mod commands;
pub mod config;
pub mod session;
