//! Validation error types

use std::fmt;

/// Maximum length for names and emails (matches the VARCHAR(255) columns)
pub const MAX_TEXT_LEN: usize = 255;

/// Validation error for request input
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// String doesn't match required format (e.g., numeric id)
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Number must be strictly positive
    NotPositive { field: &'static str, value: f64 },

    /// NaN or infinite number
    NotFinite { field: &'static str },

    /// Request body could not be decoded
    MalformedBody { reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::InvalidFormat { field, reason } => {
                write!(f, "{}: {}", field, reason)
            }
            Self::NotPositive { field, value } => {
                write!(f, "{} must be greater than zero (got {})", field, value)
            }
            Self::NotFinite { field } => write!(f, "{} must be a finite number", field),
            Self::MalformedBody { reason } => write!(f, "invalid request body: {}", reason),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Trim a required name and enforce length limits.
pub(crate) fn required_name(name: String) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field: "name" });
    }
    if trimmed.chars().count() > MAX_TEXT_LEN {
        return Err(ValidationError::TooLong {
            field: "name",
            max: MAX_TEXT_LEN,
        });
    }
    Ok(trimmed.to_owned())
}

/// Money amounts (pay, budget) must be finite and strictly positive.
pub(crate) fn positive_amount(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite { field });
    }
    if value <= 0.0 {
        return Err(ValidationError::NotPositive { field, value });
    }
    Ok(value)
}

/// Blank optional text collapses to `None`.
pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
}

/// Optional email: blank becomes `None`, otherwise length-checked.
/// Case is preserved; lookups are exact-match.
pub(crate) fn optional_email(value: Option<String>) -> Result<Option<String>, ValidationError> {
    match optional_text(value) {
        Some(email) if email.chars().count() > MAX_TEXT_LEN => Err(ValidationError::TooLong {
            field: "email",
            max: MAX_TEXT_LEN,
        }),
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::TooLong {
            field: "name",
            max: 255,
        };
        assert_eq!(
            err.to_string(),
            "name exceeds maximum length of 255 characters"
        );
    }

    #[test]
    fn name_is_trimmed() {
        assert_eq!(required_name("  Ann ".into()).unwrap(), "Ann");
    }

    #[test]
    fn rejects_blank_name() {
        let err = required_name("   ".into()).unwrap_err();
        assert!(matches!(err, ValidationError::Empty { field: "name" }));
    }

    #[test]
    fn rejects_long_name() {
        let err = required_name("a".repeat(256)).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 255, .. }));
        assert!(required_name("a".repeat(255)).is_ok());
    }

    #[test]
    fn amounts_must_be_positive() {
        assert_eq!(positive_amount("pay", 40.0).unwrap(), 40.0);
        assert!(matches!(
            positive_amount("pay", 0.0),
            Err(ValidationError::NotPositive { field: "pay", .. })
        ));
        assert!(matches!(
            positive_amount("budget", -5.0),
            Err(ValidationError::NotPositive { field: "budget", .. })
        ));
        assert!(matches!(
            positive_amount("pay", f64::NAN),
            Err(ValidationError::NotFinite { .. })
        ));
    }

    #[test]
    fn blank_optional_text_is_none() {
        assert_eq!(optional_text(Some("  ".into())), None);
        assert_eq!(optional_text(None), None);
        assert_eq!(optional_text(Some(" Paris ".into())), Some("Paris".into()));
    }

    #[test]
    fn email_keeps_case() {
        assert_eq!(
            optional_email(Some("Ann@Example.com".into())).unwrap(),
            Some("Ann@Example.com".into())
        );
        assert!(optional_email(Some(format!("{}@x.com", "a".repeat(255)))).is_err());
    }
}
