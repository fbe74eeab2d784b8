//! Registration input validation for Quill.
//!
//! Field rules are declared on [`RegisterInput`] and evaluated
//! independently, so a submission reports every violation at once. The
//! password confirmation check is a separate second stage: it only runs
//! when both password fields already satisfy their own length rule, so a
//! short password never also reports a confusing mismatch.

use serde::Deserialize;
use validator::{Validate, ValidationError, ValidationErrors};

/// Minimum display name length.
pub const MIN_NAME_LENGTH: usize = 3;

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Registration form input.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterInput {
    /// Display name.
    #[validate(length(min = 3, message = "Name must be at least 3 characters"))]
    pub name: String,
    /// Email address.
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    /// Password confirmation; must equal `password`.
    #[validate(length(min = 6, message = "Confirm password must be at least 6 characters"))]
    pub confirm_password: String,
}

impl RegisterInput {
    /// Create a registration input.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            confirm_password: confirm_password.into(),
        }
    }

    /// Whether both password fields satisfy their own length rule.
    ///
    /// Gate for the mismatch check below; lengths are counted in characters,
    /// matching the per-field rules.
    fn password_lengths_ok(&self) -> bool {
        self.password.chars().count() >= MIN_PASSWORD_LENGTH
            && self.confirm_password.chars().count() >= MIN_PASSWORD_LENGTH
    }
}

/// Validate a registration input.
///
/// Stage one evaluates each field rule independently and collects every
/// violation. Stage two compares the two password fields, but only when
/// both passed stage one on their own; a mismatch is reported against
/// `confirm_password`. Comparison is exact and case-sensitive.
///
/// # Examples
///
/// ```
/// use quill::{validate_registration, RegisterInput};
///
/// let input = RegisterInput::new("John Doe", "john@example.com", "secret1", "secret1");
/// assert!(validate_registration(&input).is_ok());
///
/// let input = RegisterInput::new("John Doe", "john@example.com", "secret1", "secret2");
/// assert!(validate_registration(&input).is_err());
/// ```
pub fn validate_registration(input: &RegisterInput) -> Result<(), ValidationErrors> {
    let mut errors = match input.validate() {
        Ok(()) => ValidationErrors::new(),
        Err(errors) => errors,
    };

    if input.password_lengths_ok() && input.password != input.confirm_password {
        errors.add(
            "confirm_password",
            ValidationError::new("must_match").with_message("Passwords do not match".into()),
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
