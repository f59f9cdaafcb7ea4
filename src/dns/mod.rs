//! CAA record querying.
//!
//! This module provides the single-query resolver client used by the CAA walk:
//! - The `CaaLookup` trait, the seam between the walk and the network
//! - The CAA record model (`CaaRecord`, `CaaTag`)
//! - `CaaClient`, which talks DNS to one recursive resolver over UDP and TCP
//!
//! Queries are always absolute (a trailing root dot is appended) so no search
//! domain is ever applied.

mod client;
mod lookup;
mod records;

// Re-export public API
pub use client::CaaClient;
pub use lookup::{CaaLookup, CaaRecord, CaaTag};
