//! First-match-wins field lookup — the primitive every printed-report field
//! chain is built on.
//!
//! Each field supplies an ordered pattern list, most-specific first; layout
//! variants are encoded as pattern order, not scoring. For a fixed text and
//! pattern list the result is fully deterministic (slice order only).

use regex::Regex;

/// Compile a pattern list, forcing case-insensitive matching on each.
/// Patterns are source literals; a failure to compile is a programming error.
pub fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(&format!("(?i){p}")).expect("valid field pattern"))
        .collect()
}

/// Return the first pattern's capture group 1, trimmed, or None when the
/// whole chain is exhausted. Absence is a normal outcome, not an error.
pub fn find_first(patterns: &[Regex], text: &str) -> Option<String> {
    for re in patterns {
        if let Some(caps) = re.captures(text) {
            if let Some(m) = caps.get(1) {
                return Some(m.as_str().trim().to_string());
            }
        }
    }
    None
}
