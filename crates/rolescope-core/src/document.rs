//! Policy document text helpers.

/// Pretty-print a JSON policy document with two-space indentation.
///
/// Content that does not parse as JSON is returned unchanged: a malformed
/// document degrades to its raw text instead of failing.
#[must_use]
pub fn format_json(raw: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(value) => serde_json::to_string_pretty(&value).unwrap_or_else(|_| raw.to_string()),
        Err(_) => raw.to_string(),
    }
}

/// Number of lines a document renders as.
#[must_use]
pub fn line_count(text: &str) -> usize {
    text.lines().count()
}
