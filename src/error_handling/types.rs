//! Error type definitions.

use log::SetLoggerError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// A hostname that cannot be turned into a sequence of DNS labels.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("hostname is empty")]
    Empty,

    #[error("hostname '{0}' contains an empty label")]
    EmptyLabel(String),

    #[error("hostname '{host}' has a label longer than 63 octets: '{label}'")]
    LabelTooLong { host: String, label: String },

    #[error("hostname '{0}' is longer than 253 octets")]
    TooLong(String),

    #[error("hostname '{host}' is not a valid domain name: {reason}")]
    Invalid { host: String, reason: String },
}

/// A single CAA query that did not produce an answer.
///
/// Every variant names the queried domain so the message can be surfaced to
/// the caller as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Network or protocol level failure (unreachable, malformed reply, ...).
    #[error("CAA lookup failed for {domain}: {cause}")]
    Transport { domain: String, cause: String },

    /// The resolver did not answer within the configured timeout.
    #[error("CAA lookup failed for {domain}: timed out after {timeout_ms}ms")]
    Timeout { domain: String, timeout_ms: u64 },

    /// The resolver answered with a non-success response code.
    #[error("CAA lookup failed for {domain} with {rcode}")]
    Status { domain: String, rcode: String },
}

impl QueryError {
    /// The domain whose query failed.
    pub fn domain(&self) -> &str {
        match self {
            QueryError::Transport { domain, .. }
            | QueryError::Timeout { domain, .. }
            | QueryError::Status { domain, .. } => domain,
        }
    }
}

/// A domain walk that could not run to completion.
#[derive(Error, Debug)]
pub enum WalkError {
    /// The caller cancelled the walk before it finished.
    #[error("CAA lookup cancelled for {0}")]
    Cancelled(String),

    /// The finished result could not be encoded.
    #[error("failed to serialize CAA result: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A serialized result handed to a report formatter could not be decoded.
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("CAA worker: failed to parse results: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors from running or formatting through the analyzer registry.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("no analyzer registered as '{0}'")]
    UnknownAnalyzer(String),

    #[error(transparent)]
    Format(#[from] FormatError),
}
