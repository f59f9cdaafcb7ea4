//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::net::SocketAddr;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{DEFAULT_RESOLVER_ADDR, DNS_TIMEOUT_SECS};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```
/// use caa_worker::Config;
/// use std::time::Duration;
///
/// let config = Config {
///     query_timeout: Duration::from_secs(1),
///     ..Default::default()
/// };
/// assert_eq!(config.resolver_addr.port(), 53);
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Upstream resolver every CAA query is sent to
    pub resolver_addr: SocketAddr,

    /// Upper bound on a single CAA query
    pub query_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resolver_addr: DEFAULT_RESOLVER_ADDR,
            query_timeout: Duration::from_secs(DNS_TIMEOUT_SECS),
        }
    }
}

/// Command-line options for the `caa_check` binary.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "caa_check",
    version,
    about = "Reports which certificate authorities a domain's CAA policy authorizes"
)]
pub struct Opt {
    /// Hostnames to check
    #[arg(required = true)]
    pub targets: Vec<String>,

    /// Upstream DNS resolver (host:port)
    #[arg(long, default_value_t = DEFAULT_RESOLVER_ADDR)]
    pub resolver: SocketAddr,

    /// Per-query timeout in seconds
    #[arg(long, default_value_t = DNS_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain")]
    pub log_format: LogFormat,

    /// Print the raw worker result as JSON instead of report lines
    #[arg(long)]
    pub json: bool,
}

impl From<&Opt> for Config {
    fn from(opt: &Opt) -> Self {
        Self {
            resolver_addr: opt.resolver,
            query_timeout: Duration::from_secs(opt.timeout_secs),
        }
    }
}
