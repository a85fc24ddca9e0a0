//! Validation rejections
//!
//! A [`Rejection`] is returned before anything is enqueued or mutated. It is
//! meant for the status line, which clears it again after a short delay.

use super::Operation;
use crate::list::ListVariant;
use std::fmt;

/// Reasons an operation request is refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// A required input field was left empty
    MissingValue { field: &'static str },

    /// Input could not be read as a whole number
    InvalidNumber { input: String },

    /// Position outside the valid range `0..=max`
    PositionOutOfRange { position: i64, max: usize },

    /// The operation needs at least one node
    EmptyList,

    /// Reverse needs at least two nodes
    TooSmallToReverse,

    /// The operation is disabled for this list type
    Unsupported {
        operation: Operation,
        variant: ListVariant,
    },

    /// Another operation is still being played
    Busy,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::MissingValue { field } => write!(f, "Enter a {}", field),
            Rejection::InvalidNumber { input } => {
                write!(f, "'{}' is not a valid number", input)
            }
            Rejection::PositionOutOfRange { position, max } => {
                write!(f, "Invalid index {} (0-{})", position, max)
            }
            Rejection::EmptyList => write!(f, "List is empty"),
            Rejection::TooSmallToReverse => write!(f, "List too small to reverse"),
            Rejection::Unsupported { operation, variant } => {
                write!(f, "{} is not supported for {} lists", operation, variant)
            }
            Rejection::Busy => write!(f, "Another operation is still running"),
        }
    }
}

impl std::error::Error for Rejection {}
