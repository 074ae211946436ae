use regex::Regex;

/// Basic email shape: localpart@domain.tld, no whitespace or extra '@'.
pub fn email(value: &str) -> bool {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
        .map(|re| re.is_match(value))
        .unwrap_or(false)
}

/// URL-friendly slug: lowercase letters, digits, hyphens.
pub fn slug(value: &str) -> bool {
    Regex::new(r"^[a-z0-9-]+$")
        .map(|re| re.is_match(value))
        .unwrap_or(false)
}

/// Resume dates are stored as `YYYY-MM`.
pub fn year_month(value: &str) -> bool {
    Regex::new(r"^\d{4}-\d{2}$")
        .map(|re| re.is_match(value))
        .unwrap_or(false)
}

/// Trim a required field, treating an empty result as missing.
pub fn required(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Trim an optional field down to None when blank.
pub fn optional(value: Option<&str>) -> Option<String> {
    value.and_then(required)
}
