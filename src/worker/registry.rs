//! Caller-owned analyzer registry.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;

use super::types::{Analyzer, WorkerResult};
use crate::error_handling::RegistryError;

/// Analyzers keyed by name.
///
/// Nothing registers itself: the caller builds the registry and decides which
/// units it contains.
#[derive(Default, Clone)]
pub struct Registry {
    analyzers: BTreeMap<&'static str, Arc<dyn Analyzer>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an analyzer, returning the one previously registered under the
    /// same name, if any.
    pub fn register(&mut self, analyzer: Arc<dyn Analyzer>) -> Option<Arc<dyn Analyzer>> {
        log::debug!(
            "Registering analyzer {}: {}",
            analyzer.name(),
            analyzer.description()
        );
        self.analyzers.insert(analyzer.name(), analyzer)
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Analyzer>> {
        self.analyzers.get(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.analyzers.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.analyzers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.analyzers.is_empty()
    }

    /// Runs the named analyzer on `target` and waits for its result.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::UnknownAnalyzer` if nothing is registered
    /// under `name`.
    pub async fn run(
        &self,
        name: &str,
        target: &str,
        cancel: CancellationToken,
    ) -> Result<WorkerResult, RegistryError> {
        let analyzer = self.lookup(name)?;
        Ok(analyzer.run(target, cancel).await)
    }

    /// Runs the named analyzer on a background task.
    ///
    /// The returned receiver yields the analyzer's result exactly once. If
    /// the receiver is dropped first, the result is discarded.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::UnknownAnalyzer` if nothing is registered
    /// under `name`.
    pub fn spawn(
        &self,
        name: &str,
        target: String,
        cancel: CancellationToken,
    ) -> Result<oneshot::Receiver<WorkerResult>, RegistryError> {
        let analyzer = Arc::clone(self.lookup(name)?);
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let result = analyzer.run(&target, cancel).await;
            if tx.send(result).is_err() {
                log::debug!(
                    "Result of {} for {target} dropped: receiver gone",
                    analyzer.name()
                );
            }
        });

        Ok(rx)
    }

    /// Runs every registered analyzer on `target`, one after another, in name
    /// order.
    pub async fn run_all(&self, target: &str, cancel: &CancellationToken) -> Vec<WorkerResult> {
        let mut results = Vec::with_capacity(self.analyzers.len());
        for analyzer in self.analyzers.values() {
            results.push(analyzer.run(target, cancel.clone()).await);
        }
        results
    }

    /// Formats a result with the analyzer that produced it.
    ///
    /// A failed result (no payload) formats to no lines.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::UnknownAnalyzer` if the producing analyzer is
    /// not registered, or `RegistryError::Format` if it cannot decode the
    /// payload.
    pub fn format(&self, result: &WorkerResult) -> Result<Vec<String>, RegistryError> {
        let analyzer = self.lookup(&result.worker_name)?;
        match &result.result {
            Some(bytes) => Ok(analyzer.format(bytes)?),
            None => Ok(Vec::new()),
        }
    }

    fn lookup(&self, name: &str) -> Result<&Arc<dyn Analyzer>, RegistryError> {
        self.analyzers
            .get(name)
            .ok_or_else(|| RegistryError::UnknownAnalyzer(name.to_string()))
    }
}
