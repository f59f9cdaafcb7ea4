//! Worker configuration and constants.
//!
//! This module provides:
//! - Configuration constants (resolver address, timeouts, worker identity)
//! - The library `Config` struct and the CLI option types

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Config, LogFormat, LogLevel, Opt};
