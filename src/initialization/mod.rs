//! Shared resource setup.
//!
//! This module provides functions to initialize:
//! - The logger
//! - The DNS resolver used for CAA queries

mod logger;
mod resolver;

// Re-export public API
pub use logger::init_logger_with;
pub use resolver::init_resolver;
