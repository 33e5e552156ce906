//! Request field validation helpers.

use crate::shared::error::SharedError;

/// Trim a required text field, rejecting missing or blank values
pub fn required(value: Option<&str>, field: &str, message: &str) -> Result<String, SharedError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(SharedError::validation(field, message)),
    }
}

/// Require a non-blank secret, returned exactly as sent (never trimmed)
pub fn required_secret(value: Option<&str>, field: &str, message: &str) -> Result<String, SharedError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.to_string()),
        _ => Err(SharedError::validation(field, message)),
    }
}

/// Longest password bcrypt hashes without truncation (72 bytes including the
/// terminating NUL)
pub const MAX_PASSWORD_BYTES: usize = 71;

/// Require a password: non-blank, untrimmed, and short enough to be hashed
/// in full
pub fn password(value: Option<&str>, field: &str, message: &str) -> Result<String, SharedError> {
    let password = required_secret(value, field, message)?;
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(SharedError::validation(
            field,
            format!("Password must be at most {MAX_PASSWORD_BYTES} bytes"),
        ));
    }
    Ok(password)
}

/// Trim an optional text field; blank counts as absent
pub fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Basic email shape check: one `@` with text on both sides and a dot in the domain
pub fn is_valid_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}
