//! DNS client initialization.
//!
//! This module builds the client used for CAA queries: one fixed upstream,
//! one attempt per query, no cache.

use std::sync::Arc;

use crate::config::Config;
use crate::dns::CaaClient;

/// Initializes the DNS client for CAA lookups.
///
/// Creates a client that talks only to `config.resolver_addr` (UDP, falling
/// back to TCP for truncated answers). Queries are bounded by
/// `config.query_timeout`, are attempted once, and are never cached, so two
/// checks of the same hostname always hit the network.
///
/// # Returns
///
/// A configured `CaaClient` wrapped in `Arc` for sharing across tasks.
pub fn init_resolver(config: &Config) -> Arc<CaaClient> {
    log::debug!(
        "CAA resolver using {} (timeout {:?})",
        config.resolver_addr,
        config.query_timeout
    );

    Arc::new(CaaClient::new(config.resolver_addr, config.query_timeout))
}
