//! Step queue and history controller
//!
//! A [`Player`] owns the ordered [`Step`]s of the current operation and a
//! cursor into them. Forward execution captures a registry snapshot before
//! each step runs; backward navigation restores one. Autoplay is driven by
//! the host loop calling [`Player::tick`].
//!
//! # Modules
//!
//! - [`step`]: replayable step units
//! - [`engine`]: the controller and its state machine
//! - [`errors`]: step and playback errors

pub mod engine;
pub mod errors;
pub mod step;

pub use engine::{Player, PlayerState};
pub use errors::{PlaybackError, StepError};
pub use step::{DisplayText, Step};
