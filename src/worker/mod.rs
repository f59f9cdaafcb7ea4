//! Analysis units and their registry.
//!
//! An analysis unit ([`Analyzer`]) inspects one target and produces a
//! [`WorkerResult`]; it can also turn its own serialized result back into
//! report lines. Units are collected in a caller-owned [`Registry`], which
//! runs them by name and hands each result over exactly once.

mod caa;
mod registry;
mod types;

// Re-export public API
pub use caa::CaaAnalyzer;
pub use registry::Registry;
pub use types::{Analyzer, WorkerResult};
