//! Human-readable CAA report lines.
//!
//! The formatter is pure: it decodes a serialized [`CaaResult`] and turns it
//! into display lines. Nothing here touches the network.

use crate::caa::CaaResult;
use crate::error_handling::FormatError;

/// Formats a serialized CAA result.
///
/// # Errors
///
/// Returns `FormatError::Parse` if `input` is not a serialized `CaaResult`;
/// no lines are produced in that case.
pub fn format_report(input: &[u8]) -> Result<Vec<String>, FormatError> {
    let result = CaaResult::from_json(input)?;
    Ok(report_lines(&result))
}

/// Formats an already decoded CAA result.
pub fn report_lines(result: &CaaResult) -> Vec<String> {
    let mut lines = vec!["* CAA Analyzer:".to_string()];

    if !result.has_caa {
        lines.push("  * CAA records: Not found".to_string());
        return lines;
    }

    let host = result.host.as_deref().unwrap_or_default();
    lines.push("  * CAA records: Found".to_string());
    for ca in &result.issue_cas {
        lines.push(format!("    - CA '{ca}' permitted to issue certs for '{host}'"));
    }
    for ca in &result.issuewild_cas {
        lines.push(format!(
            "    - CA '{ca}' permitted to issue wildcard certs for '{host}'"
        ));
    }

    lines
}
