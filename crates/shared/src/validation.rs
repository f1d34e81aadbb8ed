//! Common validation utilities.

use validator::ValidationError;

/// Validates that a website URL uses http or https.
pub fn validate_website(url: &str) -> Result<(), ValidationError> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        let mut err = ValidationError::new("website_scheme");
        err.message = Some("Website must start with http:// or https://".into());
        Err(err)
    }
}

/// Validates that a password meets minimum strength requirements:
/// at least 8 characters with one uppercase, one lowercase and one digit.
pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let long_enough = password.len() >= 8;
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if long_enough && has_upper && has_lower && has_digit {
        Ok(())
    } else {
        let mut err = ValidationError::new("password_strength");
        err.message = Some(
            "Password must be at least 8 characters with one uppercase letter, one lowercase letter and one digit"
                .into(),
        );
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_website_http() {
        assert!(validate_website("http://example.com").is_ok());
        assert!(validate_website("https://example.com/page").is_ok());
    }

    #[test]
    fn test_validate_website_invalid_scheme() {
        assert!(validate_website("ftp://example.com").is_err());
        assert!(validate_website("example.com").is_err());
        assert!(validate_website("").is_err());
    }

    #[test]
    fn test_validate_password_strength_ok() {
        assert!(validate_password_strength("SecureP4ss").is_ok());
    }

    #[test]
    fn test_validate_password_strength_too_short() {
        assert!(validate_password_strength("Ab1").is_err());
    }

    #[test]
    fn test_validate_password_strength_missing_classes() {
        assert!(validate_password_strength("alllowercase1").is_err());
        assert!(validate_password_strength("ALLUPPERCASE1").is_err());
        assert!(validate_password_strength("NoDigitsHere").is_err());
    }
}
