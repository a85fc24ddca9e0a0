// Step queue and history controller

use super::errors::PlaybackError;
use super::step::{DisplayText, Step};
use crate::config::PlaybackSpeed;
use crate::snapshot::SnapshotHistory;
use crate::visual::VisualRegistry;
use std::time::Instant;
use tracing::{debug, error, info};

/// Description shown before the first step
pub const IDLE_DESCRIPTION: &str = "Ready.";

/// Code shown before the first step
pub const IDLE_CODE: &str = "// Start";

/// Code shown for a step with an empty code line
const PROCESSING_CODE: &str = "// Processing...";

/// Lifecycle of the step controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    /// Empty queue
    Idle,
    /// Steps enqueued, nothing executed yet
    Populated,
    /// Autoplay timer active
    Playing,
    Paused,
    /// Cursor on the last step
    Finished,
}

/// Plays an ordered list of steps, one at a time, with snapshot-based rewind
pub struct Player {
    steps: Vec<Step>,

    /// Index of the last executed step (`None` = before the first step)
    cursor: Option<usize>,

    /// Registry state captured before each step ran forward
    history: SnapshotHistory,

    state: PlayerState,
    speed: PlaybackSpeed,

    /// When the autoplay loop may run the next step
    next_due: Option<Instant>,

    /// Set while an operation is being played; cleared when it finishes,
    /// fails or is reset
    locked: bool,

    description: String,
    code: String,
}

impl Player {
    pub fn new(speed: PlaybackSpeed, snapshot_limit: usize) -> Self {
        Player {
            steps: Vec::new(),
            cursor: None,
            history: SnapshotHistory::new(snapshot_limit),
            state: PlayerState::Idle,
            speed,
            next_due: None,
            locked: false,
            description: IDLE_DESCRIPTION.to_string(),
            code: IDLE_CODE.to_string(),
        }
    }

    /// Append a step. Not allowed while playing.
    pub fn enqueue(&mut self, step: Step) -> Result<(), PlaybackError> {
        if self.state == PlayerState::Playing {
            return Err(PlaybackError::Busy);
        }

        self.steps.push(step);
        self.state = match self.state {
            PlayerState::Idle => PlayerState::Populated,
            PlayerState::Finished => PlayerState::Paused,
            other => other,
        };
        Ok(())
    }

    pub fn enqueue_all(&mut self, steps: Vec<Step>) -> Result<(), PlaybackError> {
        steps.into_iter().try_for_each(|step| self.enqueue(step))
    }

    /// Execute the next step, capturing the registry state beforehand.
    /// Returns the index of the executed step.
    pub fn step_forward(&mut self, registry: &mut VisualRegistry) -> Result<usize, PlaybackError> {
        if self.steps.is_empty() {
            return Err(PlaybackError::EmptyQueue);
        }
        let index = self.cursor.map_or(0, |c| c + 1);
        if index >= self.steps.len() {
            return Err(PlaybackError::AtEnd);
        }

        if self.history.record(index, registry.snapshot()).is_err() {
            self.halt();
            return Err(PlaybackError::SnapshotLimitExceeded {
                current: self.history.memory_usage(),
                limit: self.history.memory_limit(),
            });
        }

        self.cursor = Some(index);
        self.show(index);

        let step = &self.steps[index];
        debug!(index, description = step.description(), "running step");
        if let Err(source) = step.run(registry) {
            let description = step.description().to_string();
            error!(index, %source, "step action failed");
            self.halt();
            return Err(PlaybackError::StepFailed {
                index,
                description,
                source,
            });
        }

        if index + 1 == self.steps.len() {
            self.finish();
        } else if self.state != PlayerState::Playing {
            self.state = PlayerState::Paused;
        }
        Ok(index)
    }

    /// Undo the current step by restoring the snapshot taken before it ran
    pub fn step_backward(&mut self, registry: &mut VisualRegistry) -> Result<(), PlaybackError> {
        let index = self.cursor.ok_or(PlaybackError::AtStart)?;
        self.pause();

        let snapshot = self
            .history
            .get(index)
            .ok_or(PlaybackError::MissingSnapshot { index })?;
        registry.restore(snapshot);

        self.cursor = index.checked_sub(1);
        match self.cursor {
            Some(current) => {
                self.redisplay(current);
                self.state = PlayerState::Paused;
            }
            None => {
                self.description = IDLE_DESCRIPTION.to_string();
                self.code = IDLE_CODE.to_string();
                self.state = PlayerState::Populated;
            }
        }
        debug!(cursor = ?self.cursor, "stepped backward");
        Ok(())
    }

    /// Start autoplay; the first step runs on the next tick
    pub fn play(&mut self, now: Instant) -> Result<(), PlaybackError> {
        match self.state {
            PlayerState::Idle => Err(PlaybackError::EmptyQueue),
            PlayerState::Finished => Err(PlaybackError::AtEnd),
            PlayerState::Playing => Ok(()),
            PlayerState::Populated | PlayerState::Paused => {
                self.state = PlayerState::Playing;
                self.next_due = Some(now);
                Ok(())
            }
        }
    }

    /// Stop scheduling further steps. A running step is never interrupted.
    pub fn pause(&mut self) {
        if self.state == PlayerState::Playing {
            self.state = PlayerState::Paused;
            self.next_due = None;
        }
    }

    pub fn toggle(&mut self, now: Instant) -> Result<(), PlaybackError> {
        if self.state == PlayerState::Playing {
            self.pause();
            Ok(())
        } else {
            self.play(now)
        }
    }

    /// Drive autoplay. Runs at most one step and returns its index.
    pub fn tick(
        &mut self,
        now: Instant,
        registry: &mut VisualRegistry,
    ) -> Result<Option<usize>, PlaybackError> {
        if self.state != PlayerState::Playing {
            return Ok(None);
        }
        if self.next_due.is_some_and(|due| now < due) {
            return Ok(None);
        }

        let index = self.step_forward(registry)?;
        if self.state == PlayerState::Playing {
            let dwell = self.speed.interval().max(self.steps[index].settle());
            self.next_due = Some(now + dwell);
        }
        Ok(Some(index))
    }

    /// Execute every remaining step immediately
    pub fn run_to_end(&mut self, registry: &mut VisualRegistry) -> Result<(), PlaybackError> {
        self.pause();
        while !self.at_end() {
            self.step_forward(registry)?;
        }
        Ok(())
    }

    /// Drop all steps and snapshots. Not allowed while playing.
    pub fn reset(&mut self) -> Result<(), PlaybackError> {
        if self.state == PlayerState::Playing {
            return Err(PlaybackError::Busy);
        }

        self.steps.clear();
        self.history.clear();
        self.cursor = None;
        self.state = PlayerState::Idle;
        self.next_due = None;
        self.locked = false;
        self.description = IDLE_DESCRIPTION.to_string();
        self.code = IDLE_CODE.to_string();
        Ok(())
    }

    /// Mark an operation as in progress until it finishes, fails or is reset
    pub fn lock(&mut self) {
        self.locked = true;
    }

    /// Override the displayed texts (used while an operation is being prepared)
    pub fn announce(&mut self, description: impl Into<String>, code: impl Into<String>) {
        self.description = description.into();
        self.code = code.into();
    }

    fn finish(&mut self) {
        self.state = PlayerState::Finished;
        self.next_due = None;
        if self.locked {
            info!(steps = self.steps.len(), "playback finished");
        }
        self.locked = false;
    }

    fn halt(&mut self) {
        self.state = PlayerState::Paused;
        self.next_due = None;
        self.locked = false;
    }

    fn show(&mut self, index: usize) {
        let step = &self.steps[index];
        self.description = step.description().to_string();
        if let DisplayText::Code(text) = step.display() {
            self.code = if text.is_empty() {
                PROCESSING_CODE.to_string()
            } else {
                text.clone()
            };
        }
    }

    /// Re-derive description and code for `index` without running anything
    fn redisplay(&mut self, index: usize) {
        self.description = self.steps[index].description().to_string();
        self.code = self.steps[..=index]
            .iter()
            .rev()
            .find_map(|step| match step.display() {
                DisplayText::Code(text) if text.is_empty() => Some(PROCESSING_CODE.to_string()),
                DisplayText::Code(text) => Some(text.clone()),
                DisplayText::Preserve => None,
            })
            .unwrap_or_else(|| IDLE_CODE.to_string());
    }

    // ========== Getter methods for UI ==========

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlayerState::Playing
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// True when no step remains to be executed
    pub fn at_end(&self) -> bool {
        self.cursor.map_or(0, |c| c + 1) >= self.steps.len()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn speed(&self) -> PlaybackSpeed {
        self.speed
    }

    pub fn set_speed(&mut self, speed: PlaybackSpeed) {
        self.speed = speed;
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn history(&self) -> &SnapshotHistory {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::NodeId;
    use crate::player::errors::StepError;
    use crate::visual::layout::slot;
    use std::time::Duration;

    fn add_step(value: i32) -> Step {
        Step::new(
            format!("add {}", value),
            DisplayText::code(format!("add({});", value)),
            move |registry: &mut VisualRegistry| {
                let index = registry.node_count();
                registry.add_node(value, slot(index), None);
                Ok(())
            },
        )
    }

    fn player_with(steps: Vec<Step>) -> Player {
        let mut player = Player::new(PlaybackSpeed::Fastest, 1 << 20);
        player.enqueue_all(steps).unwrap();
        player
    }

    #[test]
    fn test_states_through_a_run() {
        let mut registry = VisualRegistry::new();
        let mut player = Player::new(PlaybackSpeed::Fastest, 1 << 20);
        assert_eq!(player.state(), PlayerState::Idle);

        player.enqueue(add_step(1)).unwrap();
        player.enqueue(add_step(2)).unwrap();
        assert_eq!(player.state(), PlayerState::Populated);

        player.step_forward(&mut registry).unwrap();
        assert_eq!(player.state(), PlayerState::Paused);
        player.step_forward(&mut registry).unwrap();
        assert_eq!(player.state(), PlayerState::Finished);
        assert_eq!(player.step_forward(&mut registry), Err(PlaybackError::AtEnd));
        assert_eq!(registry.node_count(), 2);
    }

    #[test]
    fn test_backward_restores_previous_state() {
        let mut registry = VisualRegistry::new();
        let mut player = player_with(vec![add_step(1), add_step(2)]);

        player.step_forward(&mut registry).unwrap();
        let before = registry.snapshot();
        player.step_forward(&mut registry).unwrap();
        player.step_backward(&mut registry).unwrap();

        assert_eq!(registry.snapshot(), before);
        assert_eq!(player.cursor(), Some(0));
        assert_eq!(player.description(), "add 1");
        assert_eq!(player.code(), "add(1);");

        player.step_backward(&mut registry).unwrap();
        assert_eq!(player.cursor(), None);
        assert_eq!(registry.node_count(), 0);
        assert_eq!(player.description(), IDLE_DESCRIPTION);
        assert_eq!(player.step_backward(&mut registry), Err(PlaybackError::AtStart));
    }

    #[test]
    fn test_snapshots_only_for_executed_steps() {
        let mut registry = VisualRegistry::new();
        let mut player = player_with(vec![add_step(1), add_step(2), add_step(3)]);

        player.step_forward(&mut registry).unwrap();
        player.step_backward(&mut registry).unwrap();
        assert!(player.history().get(0).is_some());
        assert!(player.history().get(1).is_none());
        assert!(player.history().get(2).is_none());
    }

    #[test]
    fn test_replay_after_rewind_reuses_ids() {
        let mut registry = VisualRegistry::new();
        let mut player = player_with(vec![add_step(1), add_step(2)]);

        player.run_to_end(&mut registry).unwrap();
        let end = registry.snapshot();
        player.step_backward(&mut registry).unwrap();
        player.step_forward(&mut registry).unwrap();

        let replayed = registry.snapshot();
        let ids: Vec<NodeId> = replayed.nodes.iter().map(|n| n.id).collect();
        assert_eq!(ids, end.nodes.iter().map(|n| n.id).collect::<Vec<_>>());
        assert_eq!(replayed.next_id, end.next_id);
    }

    #[test]
    fn test_preserve_keeps_previous_code() {
        let mut registry = VisualRegistry::new();
        let mut player = player_with(vec![
            add_step(1),
            Step::narration("thinking", DisplayText::Preserve),
            Step::narration("blank", DisplayText::code("")),
        ]);

        player.step_forward(&mut registry).unwrap();
        player.step_forward(&mut registry).unwrap();
        assert_eq!(player.code(), "add(1);");
        player.step_forward(&mut registry).unwrap();
        assert_eq!(player.code(), PROCESSING_CODE);

        player.step_backward(&mut registry).unwrap();
        assert_eq!(player.description(), "thinking");
        assert_eq!(player.code(), "add(1);");
    }

    #[test]
    fn test_failed_step_pauses_and_unlocks() {
        let mut registry = VisualRegistry::new();
        let mut player = player_with(vec![
            add_step(1),
            Step::new("boom", DisplayText::Preserve, |_: &mut VisualRegistry| {
                Err(StepError::Failed("broken".to_string()))
            }),
            add_step(3),
        ]);
        player.lock();

        let now = Instant::now();
        player.play(now).unwrap();
        assert_eq!(player.tick(now, &mut registry), Ok(Some(0)));

        let later = now + Duration::from_secs(1);
        let err = player.tick(later, &mut registry).unwrap_err();
        assert!(matches!(err, PlaybackError::StepFailed { index: 1, .. }));
        assert_eq!(player.state(), PlayerState::Paused);
        assert!(!player.is_locked());
        assert_eq!(player.cursor(), Some(1));
        assert_eq!(registry.node_count(), 1);
    }

    #[test]
    fn test_autoplay_waits_for_interval() {
        let mut registry = VisualRegistry::new();
        let mut player = player_with(vec![add_step(1), add_step(2)]);
        player.lock();

        let now = Instant::now();
        player.play(now).unwrap();
        assert_eq!(player.tick(now, &mut registry), Ok(Some(0)));
        assert_eq!(
            player.tick(now + Duration::from_millis(100), &mut registry),
            Ok(None)
        );
        assert_eq!(
            player.tick(now + Duration::from_millis(500), &mut registry),
            Ok(Some(1))
        );
        assert_eq!(player.state(), PlayerState::Finished);
        assert!(!player.is_locked());
    }

    #[test]
    fn test_settle_extends_dwell() {
        let mut registry = VisualRegistry::new();
        let mut player = player_with(vec![
            add_step(1).with_settle(Duration::from_millis(800)),
            add_step(2),
        ]);

        let now = Instant::now();
        player.play(now).unwrap();
        player.tick(now, &mut registry).unwrap();
        assert_eq!(
            player.tick(now + Duration::from_millis(600), &mut registry),
            Ok(None)
        );
        assert_eq!(
            player.tick(now + Duration::from_millis(800), &mut registry),
            Ok(Some(1))
        );
    }

    #[test]
    fn test_enqueue_and_reset_rejected_while_playing() {
        let mut player = player_with(vec![add_step(1)]);
        player.play(Instant::now()).unwrap();
        assert_eq!(player.enqueue(add_step(2)), Err(PlaybackError::Busy));
        assert_eq!(player.reset(), Err(PlaybackError::Busy));

        player.pause();
        assert_eq!(player.state(), PlayerState::Paused);
        player.reset().unwrap();
        assert_eq!(player.state(), PlayerState::Idle);
        assert!(player.is_empty());
    }

    #[test]
    fn test_backward_pauses_autoplay() {
        let mut registry = VisualRegistry::new();
        let mut player = player_with(vec![add_step(1), add_step(2)]);
        let now = Instant::now();
        player.play(now).unwrap();
        player.tick(now, &mut registry).unwrap();
        assert!(player.is_playing());

        player.step_backward(&mut registry).unwrap();
        assert!(!player.is_playing());
        assert_eq!(player.state(), PlayerState::Populated);
    }
}
