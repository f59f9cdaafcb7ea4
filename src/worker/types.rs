//! The analysis-unit interface.

use futures::future::BoxFuture;
use tokio_util::sync::CancellationToken;

use crate::error_handling::FormatError;

/// What one analysis unit reports for one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerResult {
    pub worker_name: String,
    /// False only when the unit could not produce a result at all
    pub success: bool,
    /// The unit's serialized (JSON) result; `None` when `success` is false
    pub result: Option<Vec<u8>>,
    /// Diagnostics, in the order they occurred
    pub errors: Vec<String>,
}

impl WorkerResult {
    pub fn succeeded(worker_name: &str, result: Vec<u8>, errors: Vec<String>) -> Self {
        Self {
            worker_name: worker_name.to_string(),
            success: true,
            result: Some(result),
            errors,
        }
    }

    pub fn failed(worker_name: &str, errors: Vec<String>) -> Self {
        Self {
            worker_name: worker_name.to_string(),
            success: false,
            result: None,
            errors,
        }
    }

    /// JSON view for machine consumers, with the payload embedded as JSON
    /// rather than bytes.
    pub fn to_json_value(&self) -> serde_json::Value {
        let result = self
            .result
            .as_deref()
            .and_then(|bytes| serde_json::from_slice(bytes).ok())
            .unwrap_or(serde_json::Value::Null);
        serde_json::json!({
            "worker": self.worker_name,
            "success": self.success,
            "result": result,
            "errors": self.errors,
        })
    }
}

/// An analysis unit that can be registered in a [`Registry`](super::Registry).
pub trait Analyzer: Send + Sync {
    /// Name the unit is registered and reported under.
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Analyzes `target`. Must resolve promptly once `cancel` fires.
    fn run<'a>(&'a self, target: &'a str, cancel: CancellationToken) -> BoxFuture<'a, WorkerResult>;

    /// Turns a result produced by `run` into report lines.
    fn format(&self, result: &[u8]) -> Result<Vec<String>, FormatError>;
}
