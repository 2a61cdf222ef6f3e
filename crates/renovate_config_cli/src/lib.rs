//! renovate-config CLI library exports.
//!
//! The binary in `main.rs` only parses arguments and dispatches to these
//! command implementations.

pub mod commands;
pub mod config;
pub mod errors;
