//! Validation result

use std::fmt;

use serde::Serialize;

/// Advisory findings for one schema pair
///
/// Errors make the pair invalid; warnings never do.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    /// Create a result from collected errors and warnings
    #[must_use]
    pub const fn new(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self { errors, warnings }
    }

    /// `true` when there are no errors
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// `true` when at least one warning was produced
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Errors in the order they were found
    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Warnings in the order they were found
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub(crate) fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub(crate) fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.errors.is_empty() {
            writeln!(f, "ERRORS:")?;
            for error in &self.errors {
                writeln!(f, "  - {error}")?;
            }
        }

        if !self.warnings.is_empty() {
            writeln!(f, "WARNINGS:")?;
            for warning in &self.warnings {
                writeln!(f, "  - {warning}")?;
            }
        }

        if self.errors.is_empty() && self.warnings.is_empty() {
            write!(f, "Validation passed successfully")?;
        }

        Ok(())
    }
}
