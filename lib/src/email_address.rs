use regex::Regex;
use std::sync::LazyLock;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Failed to compile email pattern"));

/// Syntactic check only: `local@domain.tld` with no whitespace and a single `@`.
/// Surrounding whitespace is trimmed before matching.
pub fn is_valid_email(candidate: &str) -> bool {
    let trimmed = candidate.trim();
    !trimmed.is_empty() && EMAIL_PATTERN.is_match(trimmed)
}
