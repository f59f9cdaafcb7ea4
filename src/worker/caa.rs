//! The CAA analysis unit.

use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;
use tokio_util::sync::CancellationToken;

use super::types::{Analyzer, WorkerResult};
use crate::caa::CaaWalker;
use crate::config::{Config, WORKER_DESCRIPTION, WORKER_NAME};
use crate::dns::{CaaClient, CaaLookup};
use crate::domain::Hostname;
use crate::error_handling::{FormatError, WalkError};
use crate::report::format_report;

/// Checks a target's CAA policy.
///
/// Query failures along the walk end up in [`WorkerResult::errors`] but do not
/// fail the unit: `success` is false only for an unparsable target, a
/// cancelled walk, or a result that cannot be serialized.
pub struct CaaAnalyzer<L> {
    walker: CaaWalker<L>,
}

impl CaaAnalyzer<Arc<CaaClient>> {
    /// Builds the analyzer on a client for `config.resolver_addr`.
    pub fn from_config(config: &Config) -> Self {
        let client = crate::initialization::init_resolver(config);
        Self::new(client, config.query_timeout)
    }
}

impl<L: CaaLookup> CaaAnalyzer<L> {
    pub fn new(lookup: L, query_timeout: Duration) -> Self {
        Self {
            walker: CaaWalker::with_timeout(lookup, query_timeout),
        }
    }

    pub fn walker(&self) -> &CaaWalker<L> {
        &self.walker
    }

    async fn analyze(&self, target: &str, cancel: CancellationToken) -> WorkerResult {
        let hostname = match Hostname::parse(target) {
            Ok(hostname) => hostname,
            Err(e) => {
                log::warn!("Skipping CAA check for invalid target '{target}': {e}");
                return WorkerResult::failed(
                    WORKER_NAME,
                    vec![format!("invalid target '{target}': {e}")],
                );
            }
        };

        let walk = match self.walker.resolve_with_cancel(&hostname, &cancel).await {
            Ok(walk) => walk,
            Err(e) => return WorkerResult::failed(WORKER_NAME, vec![e.to_string()]),
        };

        match walk.result.to_json() {
            Ok(bytes) => WorkerResult::succeeded(WORKER_NAME, bytes, walk.errors),
            Err(e) => {
                let e = WalkError::from(e);
                log::error!("{e}");
                let mut errors = walk.errors;
                errors.push(e.to_string());
                WorkerResult::failed(WORKER_NAME, errors)
            }
        }
    }
}

impl<L: CaaLookup> Analyzer for CaaAnalyzer<L> {
    fn name(&self) -> &'static str {
        WORKER_NAME
    }

    fn description(&self) -> &'static str {
        WORKER_DESCRIPTION
    }

    fn run<'a>(&'a self, target: &'a str, cancel: CancellationToken) -> BoxFuture<'a, WorkerResult> {
        self.analyze(target, cancel).boxed()
    }

    fn format(&self, result: &[u8]) -> Result<Vec<String>, FormatError> {
        format_report(result)
    }
}
