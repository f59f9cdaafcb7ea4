//! The CAA lookup seam and record model.

use std::sync::Arc;

use futures::future::BoxFuture;
use strum_macros::EnumString;

use crate::error_handling::QueryError;

/// Property tag of a CAA record.
///
/// Only `issue` and `issuewild` carry meaning for the walk; everything else is
/// kept verbatim so it can be logged and then ignored.
#[derive(Debug, Clone, PartialEq, Eq, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum CaaTag {
    #[strum(serialize = "issue")]
    Issue,
    #[strum(serialize = "issuewild")]
    IssueWild,
    #[strum(serialize = "iodef")]
    Iodef,
    #[strum(default)]
    Other(String),
}

impl CaaTag {
    /// Parses a tag as found on the wire. Never fails: unknown tags become
    /// `CaaTag::Other`.
    pub fn parse(tag: &str) -> Self {
        tag.parse()
            .unwrap_or_else(|_| CaaTag::Other(tag.to_string()))
    }

    pub fn as_str(&self) -> &str {
        match self {
            CaaTag::Issue => "issue",
            CaaTag::IssueWild => "issuewild",
            CaaTag::Iodef => "iodef",
            CaaTag::Other(tag) => tag,
        }
    }
}

/// One CAA resource record from an answer section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaaRecord {
    /// Whether the issuer-critical flag (bit 0 of the flags octet) is set.
    pub issuer_critical: bool,
    pub tag: CaaTag,
    /// Property value exactly as published, e.g. `letsencrypt.org` or
    /// `ca.example; account=1234`. Not validated against any grammar.
    pub value: String,
}

impl CaaRecord {
    pub fn new(tag: CaaTag, value: impl Into<String>) -> Self {
        Self {
            issuer_critical: false,
            tag,
            value: value.into(),
        }
    }

    /// Shorthand for an `issue` record.
    pub fn issue(value: impl Into<String>) -> Self {
        Self::new(CaaTag::Issue, value)
    }

    /// Shorthand for an `issuewild` record.
    pub fn issuewild(value: impl Into<String>) -> Self {
        Self::new(CaaTag::IssueWild, value)
    }
}

/// Looks up the CAA records of a single domain.
///
/// Implementations issue exactly one query per call and do not retry. The
/// returned records keep the order of the answer section. An empty vector
/// means the domain answered successfully without CAA records; anything the
/// resolver could not answer is a `QueryError`.
///
/// The domain is passed in A-label form without a trailing dot
/// (eg `www.example.com`).
pub trait CaaLookup: Send + Sync {
    fn query_caa<'a>(&'a self, domain: &'a str) -> BoxFuture<'a, Result<Vec<CaaRecord>, QueryError>>;
}

impl<T: CaaLookup + ?Sized> CaaLookup for Arc<T> {
    fn query_caa<'a>(&'a self, domain: &'a str) -> BoxFuture<'a, Result<Vec<CaaRecord>, QueryError>> {
        (**self).query_caa(domain)
    }
}

impl<T: CaaLookup + ?Sized> CaaLookup for &T {
    fn query_caa<'a>(&'a self, domain: &'a str) -> BoxFuture<'a, Result<Vec<CaaRecord>, QueryError>> {
        (**self).query_caa(domain)
    }
}
