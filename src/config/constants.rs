//! Configuration constants.
//!
//! This module defines the defaults used when no explicit configuration is
//! supplied to the CAA worker.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Upstream resolver queried for CAA records (Google Public DNS).
pub const DEFAULT_RESOLVER_ADDR: SocketAddr =
    SocketAddr::new(IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8)), 53);

// Network operation timeouts
/// DNS query timeout in seconds
/// Most CAA queries complete in well under a second; 3s fails fast on an
/// unresponsive upstream while still tolerating a slow one.
pub const DNS_TIMEOUT_SECS: u64 = 3;
/// Per-query timeout derived from `DNS_TIMEOUT_SECS`.
pub const DNS_TIMEOUT: Duration = Duration::from_secs(DNS_TIMEOUT_SECS);

/// Name under which the CAA analysis is registered.
pub const WORKER_NAME: &str = "caaWorker";
/// One-line description of the CAA analysis.
pub const WORKER_DESCRIPTION: &str =
    "Checks domains DNS records for a CAA record and reports it.";
