//! Error types for hull name templates.

use thiserror::Error;

/// Result type for naming operations.
pub type NamingResult<T> = Result<T, NamingError>;

/// Errors that can occur while deriving match patterns from a template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NamingError {
    /// The template has no `?` token, so no pattern can be anchored to a base name.
    #[error("Can only match hulls to a name template containing a '?' character (got '{template}')")]
    InvalidTemplate { template: String },

    /// The derived pattern failed to compile.
    #[error("Failed to compile match pattern '{pattern}': {message}")]
    PatternCompile { pattern: String, message: String },
}

impl NamingError {
    /// Creates a new invalid template error.
    pub fn invalid_template(template: impl Into<String>) -> Self {
        Self::InvalidTemplate {
            template: template.into(),
        }
    }

    /// Returns the stable error code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            NamingError::InvalidTemplate { .. } => "NAMING_001",
            NamingError::PatternCompile { .. } => "NAMING_002",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NamingError::invalid_template("hull_#");
        assert!(err.to_string().contains("'?' character"));
        assert!(err.to_string().contains("hull_#"));
        assert_eq!(err.code(), "NAMING_001");
    }
}
