//! Typed identifiers for the rollcall application.
//!
//! The client treats session identifiers as opaque strings handed out by the backend;
//! the reference backend mints them with the `tiny_id` crate.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{LazyLock, Mutex, PoisonError};
use tiny_id::ShortCodeGenerator;

/// Session codes avoid characters that are easy to misread when read aloud in class.
static SESSION_ID_GENERATOR: LazyLock<Mutex<ShortCodeGenerator<char>>> = LazyLock::new(|| {
    let alphabet: Vec<char> = "123456789ABCDEFGHJKMNPQRSTUVWXYZabcdefghkmnpqrstuvwxyz"
        .chars()
        .collect();
    Mutex::new(ShortCodeGenerator::with_alphabet(alphabet, 8))
});

/// A type-safe wrapper around string IDs.
///
/// The marker type keeps identifiers of different entities from being mixed up while
/// the wire format stays a bare string.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Id<T> {
    value: String,
    _phantom: std::marker::PhantomData<T>,
}

// Serialize as just the string
impl<T> Serialize for Id<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.value.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from_string(value))
    }
}

impl<T> Id<T> {
    /// Wraps an existing identifier.
    ///
    /// # Example
    /// ```
    /// use rollcall::id::SessionId;
    ///
    /// let session_id = SessionId::from_string("abc123".to_string());
    /// assert_eq!(session_id.as_str(), "abc123");
    /// ```
    pub fn from_string(value: String) -> Self {
        Self {
            value,
            _phantom: std::marker::PhantomData,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> From<String> for Id<T> {
    fn from(value: String) -> Self {
        Self::from_string(value)
    }
}

impl<T> From<&str> for Id<T> {
    fn from(value: &str) -> Self {
        Self::from_string(value.to_string())
    }
}

impl<T> AsRef<str> for Id<T> {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionMarker;

/// Identifier of one attendance session.
pub type SessionId = Id<SessionMarker>;

impl SessionId {
    /// Generates a new session code (8 characters, no confusable glyphs).
    ///
    /// # Example
    /// ```
    /// use rollcall::id::SessionId;
    ///
    /// let session_id = SessionId::generate();
    /// assert_eq!(session_id.as_str().len(), 8);
    /// assert!(!session_id.as_str().chars().any(|c| "0OIl".contains(c)));
    /// ```
    pub fn generate() -> Self {
        let mut generator = SESSION_ID_GENERATOR
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Self::from_string(generator.next_string())
    }
}
