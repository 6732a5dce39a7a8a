//! Anchor id generation for in-document links
//!
//! Anchors are emitted as link targets and independently recomputed as link
//! sources elsewhere in the document, so the mapping must be pure and
//! deterministic.

/// Normalize a display label into a GitHub-Pages-compatible fragment id
///
/// Lowercases, maps every character outside `[a-z0-9]` to a hyphen,
/// collapses hyphen runs and strips leading/trailing hyphens.
pub fn anchor(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut last_hyphen = true; // suppress a leading hyphen

    for c in label.chars().flat_map(|c| c.to_lowercase()) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            out.push(c);
            last_hyphen = false;
        } else if !last_hyphen {
            out.push('-');
            last_hyphen = true;
        }
    }

    if out.ends_with('-') {
        out.pop();
    }
    out
}
