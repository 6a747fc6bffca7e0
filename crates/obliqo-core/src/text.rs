//! Comma-separated list helpers shared by the job normalizer and the
//! profile form's free-text buffers.

/// Splits `raw` on commas, trims each token, and drops empty tokens.
///
/// Order is preserved: `"Go, Python ,  React"` yields `["Go", "Python", "React"]`.
#[must_use]
pub fn split_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Renders a list the way the form buffers display it: `", "`-joined.
#[must_use]
pub fn join_csv(items: &[String]) -> String {
    items.join(", ")
}
