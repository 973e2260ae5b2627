use crate::validation::Validator;

/// Validation errors for theme parameter names
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ThemeValidationError {
    #[error("parameter name cannot be empty")]
    EmptyKey,
    #[error("parameter name '{key}' contains whitespace")]
    Whitespace { key: String },
    #[error("parameter name '{key}' has an empty segment")]
    EmptySegment { key: String },
}

/// Validator for dotted parameter names such as `axes.spines.top`.
///
/// Only the shape is checked. Whether the plotting backend knows the name is
/// decided when the theme is applied.
pub struct ParamKeyValidator;

impl Validator<str> for ParamKeyValidator {
    type Error = ThemeValidationError;

    fn validate(&self, input: &str) -> Result<(), Self::Error> {
        if input.is_empty() {
            return Err(ThemeValidationError::EmptyKey);
        }

        if input.chars().any(char::is_whitespace) {
            return Err(ThemeValidationError::Whitespace {
                key: input.to_string(),
            });
        }

        if input.split('.').any(str::is_empty) {
            return Err(ThemeValidationError::EmptySegment {
                key: input.to_string(),
            });
        }

        Ok(())
    }
}
