//! # Generated Statement Sanitization
//!
//! Generators commonly wrap statements in markdown code fences. This module
//! strips that wrapping so the statement can be submitted to the warehouse.
//! No SQL validation happens here: prose or multi-statement output passes
//! through unchanged and surfaces as an execution error downstream.

/// Strips markdown code-fence wrapping from generated text.
///
/// A leading ```` ```sql ```` or ```` ``` ```` marker and a trailing
/// ```` ``` ```` marker are removed, along with surrounding whitespace.
/// Idempotent: sanitizing already-clean text is a no-op.
pub fn sanitize(raw: &str) -> String {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix("```sql") {
        text = rest;
    } else if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }

    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }

    text.trim().to_string()
}
