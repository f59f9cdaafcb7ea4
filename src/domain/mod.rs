//! Hostname parsing and CAA suffix derivation.
//!
//! This module turns a target string into a validated [`Hostname`] and derives
//! the sequence of domains a CAA check has to climb through.
//!
//! Key functions:
//! - `Hostname::parse()` - Validates and normalizes a hostname
//! - `Hostname::suffixes()` - The ordered candidate domains for CAA lookups

use std::fmt;
use std::str::FromStr;

use hickory_resolver::Name;

use crate::error_handling::DomainError;

const MAX_LABEL_LEN: usize = 63;
const MAX_NAME_LEN: usize = 253;

/// A fully qualified hostname split into its labels.
///
/// Labels are stored lower-cased in A-label (ASCII) form, without the root
/// label, e.g. `a.b.example.com` → `["a", "b", "example", "com"]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Hostname {
    labels: Vec<String>,
}

impl Hostname {
    /// Parses and normalizes a hostname.
    ///
    /// Surrounding whitespace and a single trailing root dot are ignored.
    /// Internationalized names are converted to their punycode form.
    ///
    /// # Errors
    ///
    /// Returns a `DomainError` if the input is empty, has an empty label, or
    /// exceeds the DNS length limits.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let trimmed = input.trim();
        let trimmed = trimmed.strip_suffix('.').unwrap_or(trimmed);
        if trimmed.is_empty() {
            return Err(DomainError::Empty);
        }
        if trimmed.split('.').any(str::is_empty) {
            return Err(DomainError::EmptyLabel(input.trim().to_string()));
        }

        let ascii = if trimmed.is_ascii() {
            trimmed.to_ascii_lowercase()
        } else {
            let name = Name::from_utf8(trimmed).map_err(|e| DomainError::Invalid {
                host: trimmed.to_string(),
                reason: e.to_string(),
            })?;
            name.to_ascii()
                .trim_end_matches('.')
                .to_ascii_lowercase()
        };

        if ascii.len() > MAX_NAME_LEN {
            return Err(DomainError::TooLong(ascii));
        }

        let mut labels = Vec::new();
        for label in ascii.split('.') {
            if label.len() > MAX_LABEL_LEN {
                return Err(DomainError::LabelTooLong {
                    host: ascii.clone(),
                    label: label.to_string(),
                });
            }
            if label
                .chars()
                .any(|c| c.is_ascii_whitespace() || c.is_ascii_control())
            {
                return Err(DomainError::Invalid {
                    host: ascii.clone(),
                    reason: format!("label '{label}' contains whitespace or control characters"),
                });
            }
            labels.push(label.to_string());
        }

        Ok(Self { labels })
    }

    /// The labels of this hostname, most specific first.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of labels (excluding the root).
    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    /// Returns the domains to query for CAA records, most specific first.
    ///
    /// Each entry drops one more leading label than the previous one. The
    /// sequence stops at the two-label suffix: a bare top-level domain is
    /// never queried, so a single-label hostname yields no suffixes at all.
    ///
    /// ```
    /// use caa_worker::Hostname;
    ///
    /// let host = Hostname::parse("a.b.example.com").unwrap();
    /// assert_eq!(
    ///     host.suffixes(),
    ///     vec!["a.b.example.com", "b.example.com", "example.com"]
    /// );
    /// ```
    pub fn suffixes(&self) -> Vec<String> {
        let count = self.labels.len();
        (0..count.saturating_sub(1))
            .map(|skip| self.labels[skip..].join("."))
            .collect()
    }
}

impl FromStr for Hostname {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Hostname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.labels.join("."))
    }
}
