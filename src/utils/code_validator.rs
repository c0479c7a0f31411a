//! Validation of caller-supplied custom short codes.
//!
//! Generated codes never pass through here; the generator only emits
//! alphanumeric characters.

use crate::error::AppError;

/// Minimum custom code length (inclusive).
pub const MIN_CUSTOM_CODE_LENGTH: usize = 3;

/// Maximum custom code length (inclusive).
pub const MAX_CUSTOM_CODE_LENGTH: usize = 20;

fn is_allowed_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Returns true if `code` is an acceptable custom short code.
///
/// # Rules
///
/// - Length: 3-20 characters
/// - Allowed characters: ASCII letters, digits, `-` and `_`
pub fn is_valid_custom_code(code: &str) -> bool {
    validate_custom_code(code).is_ok()
}

/// Validates a custom short code, reporting the first rule it breaks.
///
/// # Errors
///
/// Returns [`AppError::InvalidCode`] if any rule is violated.
///
/// # Examples
///
/// ```ignore
/// assert!(validate_custom_code("my-link_2024").is_ok());
/// assert!(validate_custom_code("ab").is_err());        // Too short
/// assert!(validate_custom_code("my link").is_err());   // Space
/// ```
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if code.is_empty() {
        return Err(AppError::InvalidCode("code must not be empty".to_string()));
    }

    // All allowed characters are ASCII, so a non-ASCII code fails the
    // character check below regardless of how its length is counted.
    let length = code.chars().count();
    if !(MIN_CUSTOM_CODE_LENGTH..=MAX_CUSTOM_CODE_LENGTH).contains(&length) {
        return Err(AppError::InvalidCode(format!(
            "use {}-{} characters, got {}",
            MIN_CUSTOM_CODE_LENGTH, MAX_CUSTOM_CODE_LENGTH, length
        )));
    }

    if let Some(bad) = code.chars().find(|c| !is_allowed_char(*c)) {
        return Err(AppError::InvalidCode(format!(
            "only letters, numbers, '-' and '_' are allowed, found {:?}",
            bad
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimum_length_accepted() {
        assert!(is_valid_custom_code("abc"));
    }

    #[test]
    fn test_maximum_length_accepted() {
        assert!(is_valid_custom_code("abcdefghij0123456789"));
    }

    #[test]
    fn test_too_short_rejected() {
        let result = validate_custom_code("ab");
        assert!(matches!(result, Err(AppError::InvalidCode(_))));
        assert!(result.unwrap_err().to_string().contains("3-20"));
    }

    #[test]
    fn test_too_long_rejected() {
        assert!(!is_valid_custom_code("abcdefghij0123456789x"));
    }

    #[test]
    fn test_empty_rejected() {
        let err = validate_custom_code("").unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_space_rejected() {
        assert!(!is_valid_custom_code("my code"));
    }

    #[test]
    fn test_at_sign_rejected() {
        let err = validate_custom_code("me@home").unwrap_err();
        assert!(err.to_string().contains('@'));
    }

    #[test]
    fn test_mixed_case_and_separators_accepted() {
        assert!(is_valid_custom_code("My-Link_2024"));
        assert!(is_valid_custom_code("---"));
        assert!(is_valid_custom_code("___"));
    }

    #[test]
    fn test_non_ascii_rejected() {
        assert!(!is_valid_custom_code("café"));
        assert!(!is_valid_custom_code("ссылка"));
    }

    #[test]
    fn test_boundary_lengths_with_all_allowed_classes() {
        assert!(is_valid_custom_code("A1-"));
        assert!(is_valid_custom_code("Aa0-_Aa0-_Aa0-_Aa0-_"));
        assert!(!is_valid_custom_code("A1"));
        assert!(!is_valid_custom_code("Aa0-_Aa0-_Aa0-_Aa0-_A"));
    }
}
