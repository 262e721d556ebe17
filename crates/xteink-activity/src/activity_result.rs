//! Outcome handed from a finishing child activity to its parent.

extern crate alloc;

use alloc::string::String;

/// Text confirmed on the keyboard entry screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardResult {
    pub text: String,
}

/// Payload of a completed child, one variant per kind of child activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultPayload {
    Keyboard(KeyboardResult),
}

/// Result envelope delivered to a completion continuation.
///
/// A child that is popped without setting a result yields `Cancelled`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ActivityResult {
    #[default]
    Cancelled,
    Completed(ResultPayload),
}

impl ActivityResult {
    /// Shorthand for a completed keyboard entry
    pub fn keyboard(text: impl Into<String>) -> Self {
        Self::Completed(ResultPayload::Keyboard(KeyboardResult { text: text.into() }))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    pub fn payload(&self) -> Option<&ResultPayload> {
        match self {
            Self::Cancelled => None,
            Self::Completed(payload) => Some(payload),
        }
    }

    pub fn into_payload(self) -> Option<ResultPayload> {
        match self {
            Self::Cancelled => None,
            Self::Completed(payload) => Some(payload),
        }
    }
}
