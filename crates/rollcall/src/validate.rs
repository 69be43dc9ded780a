//! Client-side input validation.
//!
//! [`Subject`] and [`RollNo`] can only be built from input that passed validation, and
//! every request that carries user input takes one of them.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

pub const SUBJECT_MAX_CHARS: usize = 25;
pub const ROLL_NO_MAX_CHARS: usize = 20;

static ROLL_NO_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9-]+$").expect("roll number pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter a subject")]
    EmptySubject,
    #[error("Subject cannot exceed 25 characters")]
    SubjectTooLong,
    #[error("Please enter a roll number")]
    EmptyRollNo,
    #[error("Roll number cannot exceed 20 characters")]
    RollNoTooLong,
    #[error("Roll number can only contain letters, numbers, and hyphens")]
    RollNoCharacters,
}

/// A trimmed, non-empty subject name of at most 25 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject(String);

impl Subject {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptySubject);
        }
        // Counted in Unicode scalar values, not UTF-16 units.
        if trimmed.chars().count() > SUBJECT_MAX_CHARS {
            return Err(ValidationError::SubjectTooLong);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A trimmed roll number: 1 to 20 letters, digits or hyphens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollNo(String);

impl RollNo {
    /// Checks run in order and stop at the first failure.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyRollNo);
        }
        if trimmed.chars().count() > ROLL_NO_MAX_CHARS {
            return Err(ValidationError::RollNoTooLong);
        }
        if !ROLL_NO_PATTERN.is_match(trimmed) {
            return Err(ValidationError::RollNoCharacters);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RollNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
