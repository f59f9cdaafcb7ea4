//! Error types.
//!
//! Errors are split by how far they reach:
//! - **Query failures** (`QueryError`): one suffix could not be queried; recorded
//!   as a diagnostic and the walk continues
//! - **Walk failures** (`WalkError`): the whole resolution was abandoned
//! - **Malformed input** (`DomainError`, `FormatError`): the caller handed us
//!   something we cannot interpret
//! - **Registry misses** (`RegistryError`): an analyzer name nobody registered
//! - **Initialization failures** (`InitializationError`): logger setup

mod types;

// Re-export public API
pub use types::{
    DomainError, FormatError, InitializationError, QueryError, RegistryError, WalkError,
};
