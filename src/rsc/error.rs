//! Error types for section handling

use std::fmt;

/// Error raised by a section handler while tokenizing or typing a command.
///
/// The parse driver catches these at the section boundary and converts them
/// into [`ParseError`](crate::rsc::model::ParseError) entries; they never
/// escape `parse()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerError {
    pub message: String,
}

impl HandlerError {
    pub fn new(message: impl Into<String>) -> Self {
        HandlerError {
            message: message.into(),
        }
    }
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "section handler error: {}", self.message)
    }
}

impl std::error::Error for HandlerError {}

/// Result alias used by every section handler.
pub type HandlerResult<T> = Result<T, HandlerError>;
