use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Name of a tokenizer configuration: a Hub repo id or a local path.
///
/// Always non-empty and trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModelId(String);

impl ModelId {
    /// Trims `raw` and returns `None` when nothing is left.
    pub fn new(raw: impl AsRef<str>) -> Option<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_owned()))
        }
    }

    /// For compile-time identifiers known to be non-empty and trimmed.
    pub fn from_static(id: &'static str) -> Self {
        debug_assert!(!id.is_empty() && id.trim() == id);
        Self(id.to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ModelId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CountResult {
    /// Unicode scalar values in the input.
    pub chars: usize,
    /// Length of the encoded id sequence.
    pub tokens: usize,
}

#[derive(Debug, Error)]
pub enum ModelListError {
    #[error("model list file '{}' not found", .path.display())]
    Missing { path: PathBuf },
    #[error("failed to read model list '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Why a tokenizer could not be constructed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("invalid model identifier '{id}': {reason}")]
    InvalidIdentifier { id: String, reason: &'static str },
    #[error("'{id}' is not an accessible hub repository (HTTP {status})")]
    NotFound { id: String, status: u16 },
    #[error("tokenizer for '{id}' is unavailable: {message}")]
    Unavailable { id: String, message: String },
    #[error("tokenizer for '{id}' is malformed: {message}")]
    Malformed { id: String, message: String },
}

impl LoadError {
    /// Transient failures may succeed on a later attempt (network, hub, IO).
    pub fn is_transient(&self) -> bool {
        matches!(self, LoadError::Unavailable { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("encoding failed: {message}")]
pub struct EncodeError {
    pub message: String,
}

impl EncodeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CountError {
    #[error("input text is empty")]
    EmptyInput,
    #[error(transparent)]
    Encode(#[from] EncodeError),
}
