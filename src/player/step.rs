// A single replayable unit of visual change

use super::errors::StepError;
use crate::visual::VisualRegistry;
use std::fmt;
use std::time::Duration;

/// Action run against the registry each time the step executes forward
pub type StepAction = Box<dyn Fn(&mut VisualRegistry) -> Result<(), StepError>>;

/// Code shown alongside a step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayText {
    Code(String),
    /// Keep whatever code the previous step displayed
    Preserve,
}

impl DisplayText {
    pub fn code(text: impl Into<String>) -> Self {
        DisplayText::Code(text.into())
    }
}

pub struct Step {
    action: StepAction,
    description: String,
    display: DisplayText,
    /// Minimum dwell before autoplay moves on
    settle: Duration,
}

impl Step {
    pub fn new<F>(description: impl Into<String>, display: DisplayText, action: F) -> Self
    where
        F: Fn(&mut VisualRegistry) -> Result<(), StepError> + 'static,
    {
        Step {
            action: Box::new(action),
            description: description.into(),
            display,
            settle: Duration::ZERO,
        }
    }

    /// A step that only changes the description and code display
    pub fn narration(description: impl Into<String>, display: DisplayText) -> Self {
        Self::new(description, display, |_| Ok(()))
    }

    pub fn with_settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }

    pub fn run(&self, registry: &mut VisualRegistry) -> Result<(), StepError> {
        (self.action)(registry)
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn display(&self) -> &DisplayText {
        &self.display
    }

    pub fn settle(&self) -> Duration {
        self.settle
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step")
            .field("description", &self.description)
            .field("display", &self.display)
            .field("settle", &self.settle)
            .finish_non_exhaustive()
    }
}
