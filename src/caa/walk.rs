//! The domain walk.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use super::CaaResult;
use crate::config::DNS_TIMEOUT;
use crate::dns::CaaLookup;
use crate::domain::Hostname;
use crate::error_handling::{QueryError, WalkError};

/// A finished walk: the result plus what went wrong along the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaaWalk {
    pub result: CaaResult,
    /// One message per suffix whose query failed, in walk order
    pub errors: Vec<String>,
    /// Number of queries issued
    pub queries: usize,
}

/// Runs CAA walks against a [`CaaLookup`].
///
/// The walker holds no per-walk state; one instance can serve any number of
/// concurrent walks.
#[derive(Debug, Clone)]
pub struct CaaWalker<L> {
    lookup: L,
    query_timeout: Duration,
}

impl<L: CaaLookup> CaaWalker<L> {
    /// Creates a walker with the default per-query timeout.
    pub fn new(lookup: L) -> Self {
        Self::with_timeout(lookup, DNS_TIMEOUT)
    }

    /// Creates a walker whose queries are each bounded by `query_timeout`.
    pub fn with_timeout(lookup: L, query_timeout: Duration) -> Self {
        Self {
            lookup,
            query_timeout,
        }
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Finds the CAA policy governing `hostname`.
    ///
    /// Queries `hostname` and then each parent domain down to the two-label
    /// suffix, one at a time. The first domain that returns any CAA record
    /// ends the walk. Failed queries are recorded in [`CaaWalk::errors`] and
    /// the walk moves on to the next suffix.
    ///
    /// The walk cannot be cancelled; it never returns `WalkError::Cancelled`.
    /// Use [`CaaWalker::resolve_with_cancel`] to abort it from outside.
    pub async fn resolve(&self, hostname: &Hostname) -> Result<CaaWalk, WalkError> {
        self.resolve_with_cancel(hostname, &CancellationToken::new())
            .await
    }

    /// Like [`CaaWalker::resolve`], but stops as soon as `cancel` fires.
    ///
    /// # Errors
    ///
    /// Returns `WalkError::Cancelled` if `cancel` fires before the walk
    /// finishes, including a token cancelled before the call. No query is
    /// issued after cancellation, the in-flight query is dropped, and no
    /// partial result is returned.
    pub async fn resolve_with_cancel(
        &self,
        hostname: &Hostname,
        cancel: &CancellationToken,
    ) -> Result<CaaWalk, WalkError> {
        if cancel.is_cancelled() {
            log::debug!("CAA walk for {hostname} cancelled before it started");
            return Err(WalkError::Cancelled(hostname.to_string()));
        }

        let mut walk = CaaWalk::default();

        for suffix in hostname.suffixes() {
            if cancel.is_cancelled() {
                log::debug!("CAA walk for {hostname} cancelled before {suffix}");
                return Err(WalkError::Cancelled(hostname.to_string()));
            }

            walk.queries += 1;
            log::debug!("Querying CAA records for {suffix}");

            let query = tokio::time::timeout(self.query_timeout, self.lookup.query_caa(&suffix));
            let outcome = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    log::debug!("CAA walk for {hostname} cancelled at {suffix}");
                    return Err(WalkError::Cancelled(hostname.to_string()));
                }
                outcome = query => outcome,
            };

            let records = match outcome {
                Ok(Ok(records)) => records,
                Ok(Err(e)) => {
                    log::warn!("{e}");
                    walk.errors.push(e.to_string());
                    continue;
                }
                Err(_) => {
                    let e = QueryError::Timeout {
                        domain: suffix.clone(),
                        timeout_ms: self.query_timeout.as_millis() as u64,
                    };
                    log::warn!("{e}");
                    walk.errors.push(e.to_string());
                    continue;
                }
            };

            if records.is_empty() {
                continue;
            }

            walk.result.record(&suffix, &records);
            log::info!(
                "CAA policy for {hostname} found at {suffix}: {} issue, {} issuewild",
                walk.result.issue_cas.len(),
                walk.result.issuewild_cas.len()
            );
            break;
        }

        if !walk.result.has_caa {
            log::info!(
                "No CAA records found for {hostname} ({} queries, {} failed)",
                walk.queries,
                walk.errors.len()
            );
        }

        Ok(walk)
    }
}
