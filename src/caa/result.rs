//! The CAA result record and its JSON form.

use serde::{Deserialize, Deserializer, Serialize};

use crate::dns::{CaaRecord, CaaTag};

/// Outcome of a CAA walk.
///
/// `host` is set exactly when `has_caa` is true. Both authorization lists may
/// be empty while `has_caa` is true, when the matching domain only publishes
/// tags other than `issue`/`issuewild` (e.g. `iodef`).
///
/// Serialized as `{"has_caa":true,"host":"example.com","issue":[..],"issuewild":[..]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaaResult {
    pub has_caa: bool,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "empty_as_none"
    )]
    pub host: Option<String>,

    /// CAs allowed to issue certificates, in answer order
    #[serde(rename = "issue", default, deserialize_with = "null_as_empty")]
    pub issue_cas: Vec<String>,

    /// CAs allowed to issue wildcard certificates, in answer order
    #[serde(rename = "issuewild", default, deserialize_with = "null_as_empty")]
    pub issuewild_cas: Vec<String>,
}

impl CaaResult {
    /// Records the CAA records published at `host`.
    ///
    /// Does nothing for an empty record set. Otherwise marks the result as
    /// found at `host` and appends each `issue`/`issuewild` value to its list;
    /// other tags are skipped.
    pub fn record(&mut self, host: &str, records: &[CaaRecord]) {
        if records.is_empty() {
            return;
        }

        for record in records {
            match &record.tag {
                CaaTag::Issue => self.issue_cas.push(record.value.clone()),
                CaaTag::IssueWild => self.issuewild_cas.push(record.value.clone()),
                other => log::debug!(
                    "Ignoring CAA property '{}' at {host}: {}",
                    other.as_str(),
                    record.value
                ),
            }
        }

        self.has_caa = true;
        self.host = Some(host.to_string());
    }

    /// Encodes the result as JSON.
    pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Decodes a result produced by [`CaaResult::to_json`] (or an equivalent
    /// encoder that writes `null` for empty lists and `""` for an unset host).
    pub fn from_json(input: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(input)
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|host| !host.is_empty()))
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
