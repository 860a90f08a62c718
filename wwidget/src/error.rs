//! Validation and linter errors.
//!
//! ```rust
//! use wwidget::{ValidationError, Violation};
//!
//! let error = ValidationError::from_violations(vec![
//!     Violation::new("bashCommand", "Bash command cannot be empty"),
//!     Violation::new("refreshFrequency", "Refresh frequency must be greater than 0"),
//! ])
//! .expect("two violations");
//!
//! assert_eq!(error.first().field, "bashCommand");
//! assert_eq!(
//!     error.to_string(),
//!     "Bash command cannot be empty; Refresh frequency must be greater than 0"
//! );
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};

/// One broken constraint on one argument field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Wire name of the field, e.g. `refreshFrequency`.
    pub field: String,
    pub reason: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Every violation found in an argument payload, in field order.
///
/// Never empty: a payload with no violations validates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    violations: Vec<Violation>,
}

impl ValidationError {
    /// Returns `None` when there is nothing to report.
    pub fn from_violations(violations: Vec<Violation>) -> Option<Self> {
        if violations.is_empty() {
            None
        } else {
            Some(Self { violations })
        }
    }

    pub fn single(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            violations: vec![Violation::new(field, reason)],
        }
    }

    /// The violation a fail-fast validator would have reported.
    pub fn first(&self) -> &Violation {
        &self.violations[0]
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn mentions(&self, field: &str) -> bool {
        self.violations.iter().any(|violation| violation.field == field)
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (index, violation) in self.violations.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            f.write_str(&violation.reason)?;
        }
        Ok(())
    }
}

impl Error for ValidationError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintErrorKind {
    /// The linter process could not be started or talked to.
    Unavailable,
    Timeout,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintError {
    pub kind: LintErrorKind,
    pub message: String,
}

impl LintError {
    pub fn new(kind: LintErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(LintErrorKind::Unavailable, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(LintErrorKind::Timeout, message)
    }
}

impl Display for LintError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for LintError {}
