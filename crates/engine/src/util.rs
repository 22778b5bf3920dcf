//! Internal helpers for input validation and label normalization.

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

/// Trim a required text field, rejecting blank values.
pub(crate) fn normalize_required(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidField(format!(
            "{label} must not be empty"
        )));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn normalize_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

/// Collapse inner whitespace of a display label (`"  Dining   out "` → `"Dining out"`).
pub(crate) fn normalize_label(value: &str, label: &str) -> ResultEngine<String> {
    let collapsed = value.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return Err(EngineError::InvalidField(format!(
            "{label} must not be empty"
        )));
    }
    Ok(collapsed)
}

/// Lower-cased, accent-folded key used to compare labels.
///
/// Punctuation and whitespace runs become a single space, so `Dining-Out`
/// and `dining out` share the key `dining out`.
pub fn label_key(input: &str) -> String {
    let mut out = String::new();
    let mut prev_space = false;
    for ch in input.trim().nfkd() {
        if is_combining_mark(ch) {
            continue;
        }
        if ch.is_alphanumeric() {
            out.extend(ch.to_lowercase());
            prev_space = false;
        } else if !out.is_empty() && !prev_space {
            out.push(' ');
            prev_space = true;
        }
    }
    out.trim_end().to_string()
}

pub(crate) fn normalize_email(value: &str) -> ResultEngine<String> {
    let email = value.trim().to_lowercase();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    };
    if !valid || email.chars().any(char::is_whitespace) {
        return Err(EngineError::InvalidField(format!("invalid email: {value}")));
    }
    Ok(email)
}

/// Parse a UUID from storage and return a labeled error on failure.
pub(crate) fn parse_uuid(value: &str, label: &str) -> ResultEngine<Uuid> {
    Uuid::parse_str(value).map_err(|_| EngineError::InvalidId(format!("invalid {label} id")))
}

pub(crate) fn require_positive(amount_minor: i64, label: &str) -> ResultEngine<()> {
    if amount_minor <= 0 {
        return Err(EngineError::InvalidAmount(format!("{label} must be > 0")));
    }
    Ok(())
}

pub(crate) fn require_non_negative(amount_minor: i64, label: &str) -> ResultEngine<()> {
    if amount_minor < 0 {
        return Err(EngineError::InvalidAmount(format!("{label} must be >= 0")));
    }
    Ok(())
}
