//! Common validation utilities.

use validator::ValidationError;

/// Validates that a value is a non-empty, even-length hexadecimal string.
pub fn validate_hex(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        let mut err = ValidationError::new("hex_empty");
        err.message = Some("Value must not be empty".into());
        return Err(err);
    }

    if value.len() % 2 != 0 || !value.chars().all(|c| c.is_ascii_hexdigit()) {
        let mut err = ValidationError::new("hex_format");
        err.message = Some("Value must be an even-length hexadecimal string".into());
        return Err(err);
    }

    Ok(())
}
