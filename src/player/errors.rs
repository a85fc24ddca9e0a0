//! Playback error types
//!
//! [`StepError`] is raised from inside a step's action; [`PlaybackError`] is
//! what the controller reports to its caller. Neither is fatal: a failed step
//! pauses playback and leaves the visual state as it was.

use crate::list::NodeId;
use std::fmt;

/// Failure inside a step action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepError {
    /// The action referenced a node the registry does not hold
    MissingNode(NodeId),

    /// Any other failure raised by an action
    Failed(String),
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepError::MissingNode(id) => write!(f, "node {} is not on screen", id),
            StepError::Failed(message) => f.write_str(message),
        }
    }
}

impl std::error::Error for StepError {}

/// Errors reported by the step controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    /// Already before the first step
    AtStart,

    /// Already at the last step
    AtEnd,

    /// The requested transition is not allowed while playing
    Busy,

    /// Nothing has been enqueued
    EmptyQueue,

    /// No snapshot was captured for the step being undone
    MissingSnapshot { index: usize },

    /// Snapshot history limit exceeded
    SnapshotLimitExceeded { current: usize, limit: usize },

    /// A step's action failed; playback is paused at that step
    StepFailed {
        index: usize,
        description: String,
        source: StepError,
    },
}

impl fmt::Display for PlaybackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackError::AtStart => write!(f, "Already at the first step"),
            PlaybackError::AtEnd => write!(f, "No more steps"),
            PlaybackError::Busy => write!(f, "Playback is running"),
            PlaybackError::EmptyQueue => write!(f, "Nothing to play"),
            PlaybackError::MissingSnapshot { index } => {
                write!(f, "No snapshot recorded before step {}", index + 1)
            }
            PlaybackError::SnapshotLimitExceeded { current, limit } => {
                write!(
                    f,
                    "Snapshot memory limit exceeded: {} bytes used, limit is {}",
                    current, limit
                )
            }
            PlaybackError::StepFailed {
                index,
                description,
                source,
            } => {
                write!(
                    f,
                    "Step {} ({}) failed: {}",
                    index + 1,
                    description,
                    source
                )
            }
        }
    }
}

impl std::error::Error for PlaybackError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlaybackError::StepFailed { source, .. } => Some(source),
            _ => None,
        }
    }
}
