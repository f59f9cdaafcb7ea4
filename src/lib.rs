//! caa_worker library: CAA policy lookup for certificate inspection
//!
//! This library finds the Certification Authority Authorization (CAA) policy
//! that governs a hostname. It climbs from the hostname towards its
//! registrable domain, stops at the first domain publishing CAA records, and
//! reports which CAs may issue regular and wildcard certificates.
//!
//! # Example
//!
//! ```no_run
//! use caa_worker::{default_registry, Config, WORKER_NAME};
//! use tokio_util::sync::CancellationToken;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = default_registry(&Config::default());
//! let result = registry
//!     .run(WORKER_NAME, "www.example.com", CancellationToken::new())
//!     .await?;
//! for line in registry.format(&result)? {
//!     println!("{line}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

mod caa;
pub mod config;
mod dns;
mod domain;
mod error_handling;
pub mod initialization;
mod report;
mod worker;

use std::sync::Arc;

// Re-export public API
pub use caa::{CaaResult, CaaWalk, CaaWalker};
pub use config::{Config, LogFormat, LogLevel, WORKER_DESCRIPTION, WORKER_NAME};
pub use dns::{CaaClient, CaaLookup, CaaRecord, CaaTag};
pub use domain::Hostname;
pub use error_handling::{
    DomainError, FormatError, InitializationError, QueryError, RegistryError, WalkError,
};
pub use report::{format_report, report_lines};
pub use worker::{Analyzer, CaaAnalyzer, Registry, WorkerResult};

/// Builds a registry containing the CAA analyzer, querying the resolver named
/// in `config`.
pub fn default_registry(config: &Config) -> Registry {
    let mut registry = Registry::new();
    registry.register(Arc::new(CaaAnalyzer::from_config(config)));
    registry
}
