//! CAA policy resolution.
//!
//! Implements the CAA tree-climbing lookup (RFC 8659 §3): starting at the
//! target hostname, query each parent domain in turn and stop at the first one
//! that publishes any CAA record. The records found there are split into
//! `issue` and `issuewild` authorizations.
//!
//! Individual query failures never abort a walk. They are collected as
//! diagnostics next to the result so a caller can tell "no CAA anywhere" from
//! "no CAA found, but some suffixes could not be checked".

mod result;
mod walk;

// Re-export public API
pub use result::CaaResult;
pub use walk::{CaaWalk, CaaWalker};
