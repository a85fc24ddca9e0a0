//! Session: the single context object the UI talks to
//!
//! A [`Session`] owns the logical list (through the [`OperationDriver`]), the
//! [`VisualRegistry`] and the [`Player`]. Operation entry points take raw text
//! as typed by the user, validate it, build the operation's steps and start
//! playing them. Playback controls forward to the player.
//!
//! Only one operation is in flight at a time: while the player holds the
//! input lock a new operation is rejected with [`Rejection::Busy`].

use crate::config::{
    Config, PlaybackSpeed, RANDOM_LIST_MAX, RANDOM_LIST_MIN, RANDOM_VALUE_BOUND,
};
use crate::driver::{OperationDriver, OperationScript, Outcome, Rejection};
use crate::list::{ListVariant, LogicalList};
use crate::player::{PlaybackError, Player};
use crate::visual::VisualRegistry;
use std::time::Instant;
use tracing::{info, warn};

pub struct Session {
    config: Config,
    driver: OperationDriver,
    registry: VisualRegistry,
    player: Player,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Session {
            driver: OperationDriver::new(config.variant, config.circular_reverse),
            registry: VisualRegistry::new(),
            player: Player::new(config.speed, config.snapshot_limit),
            config,
        }
    }

    // ========== Operations ==========

    pub fn insert_head(&mut self, value: &str) -> Result<Outcome, Rejection> {
        let value = parse_value(value)?;
        self.run(|driver, registry| Ok(driver.insert_at_head(registry, value)))
    }

    pub fn insert_tail(&mut self, value: &str) -> Result<Outcome, Rejection> {
        let value = parse_value(value)?;
        self.run(|driver, registry| Ok(driver.insert_at_tail(registry, value)))
    }

    pub fn insert_at(&mut self, value: &str, position: &str) -> Result<Outcome, Rejection> {
        let value = parse_value(value)?;
        let position = parse_position(position)?;
        self.run(|driver, registry| driver.insert_at(registry, value, position))
    }

    pub fn delete_head(&mut self) -> Result<Outcome, Rejection> {
        self.run(|driver, _| driver.delete_at_head())
    }

    pub fn delete_tail(&mut self) -> Result<Outcome, Rejection> {
        self.run(|driver, _| driver.delete_at_tail())
    }

    pub fn delete_at(&mut self, position: &str) -> Result<Outcome, Rejection> {
        let position = parse_position(position)?;
        self.run(|driver, _| driver.delete_at(position))
    }

    pub fn search(&mut self, value: &str) -> Result<Outcome, Rejection> {
        let value = parse_required(value, "value")?;
        self.run(|driver, _| driver.search(value))
    }

    pub fn traverse(&mut self) -> Result<Outcome, Rejection> {
        self.run(|driver, _| driver.traverse())
    }

    pub fn reverse(&mut self) -> Result<Outcome, Rejection> {
        self.run(|driver, _| driver.reverse())
    }

    pub fn clear(&mut self) -> Result<Outcome, Rejection> {
        self.run(|driver, registry| driver.clear(registry))
    }

    /// Replace the list with 5 to 9 random values
    pub fn generate_random(&mut self) -> Result<Outcome, Rejection> {
        if self.player.is_locked() {
            return Err(Rejection::Busy);
        }
        let count = RANDOM_LIST_MIN + random_below(RANDOM_LIST_MAX - RANDOM_LIST_MIN + 1);
        let values: Vec<i32> = (0..count).map(|_| random_value()).collect();

        self.start_over(self.driver.variant());
        self.run(|driver, registry| Ok(driver.random_fill(registry, &values)))
    }

    /// Switch list type; the current list and its history are discarded
    pub fn set_list_type(&mut self, variant: ListVariant) {
        info!(%variant, "switching list type");
        self.config.variant = variant;
        self.start_over(variant);
    }

    // ========== Playback controls ==========

    pub fn play(&mut self) -> Result<(), PlaybackError> {
        self.player.play(Instant::now())
    }

    pub fn pause(&mut self) {
        self.player.pause();
    }

    pub fn toggle_play(&mut self) -> Result<(), PlaybackError> {
        self.player.toggle(Instant::now())
    }

    /// Run the next step manually, pausing autoplay
    pub fn step_forward(&mut self) -> Result<usize, PlaybackError> {
        self.player.pause();
        self.player.step_forward(&mut self.registry)
    }

    pub fn step_backward(&mut self) -> Result<(), PlaybackError> {
        self.player.step_backward(&mut self.registry)
    }

    /// Execute every remaining step at once
    pub fn run_to_end(&mut self) -> Result<(), PlaybackError> {
        self.player.run_to_end(&mut self.registry)
    }

    /// Drop the current operation's steps and redraw the list as it logically is
    pub fn abort(&mut self) {
        self.player.pause();
        if let Err(err) = self.player.reset() {
            warn!(%err, "failed to reset player");
        }
        self.driver.materialize(&mut self.registry);
        info!(nodes = self.driver.list().len(), "operation aborted");
    }

    pub fn set_speed(&mut self, speed: PlaybackSpeed) {
        self.config.speed = speed;
        self.player.set_speed(speed);
    }

    /// Advance autoplay and expire finished exit transitions
    pub fn tick(&mut self, now: Instant) -> Result<Option<usize>, PlaybackError> {
        self.registry.sweep_exits(now);
        self.player.tick(now, &mut self.registry)
    }

    // ========== Getters ==========

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn list(&self) -> &LogicalList {
        self.driver.list()
    }

    pub fn variant(&self) -> ListVariant {
        self.driver.variant()
    }

    pub fn registry(&self) -> &VisualRegistry {
        &self.registry
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn is_busy(&self) -> bool {
        self.player.is_locked()
    }

    // ========== Internals ==========

    /// Build an operation against an up-to-date registry and start playing it
    fn run<F>(&mut self, build: F) -> Result<Outcome, Rejection>
    where
        F: FnOnce(
            &mut OperationDriver,
            &mut VisualRegistry,
        ) -> Result<OperationScript, Rejection>,
    {
        if self.player.is_locked() {
            return Err(Rejection::Busy);
        }
        self.catch_up();

        let script = build(&mut self.driver, &mut self.registry)?;
        self.launch(script)
    }

    /// Bring the registry back to the end of the current history so node ids
    /// keep counting from where the last operation left them
    fn catch_up(&mut self) {
        if self.player.is_empty() || self.player.at_end() {
            return;
        }
        if let Err(err) = self.player.run_to_end(&mut self.registry) {
            warn!(%err, "could not replay remaining steps, redrawing from the list");
            self.driver.materialize(&mut self.registry);
        }
    }

    fn launch(&mut self, script: OperationScript) -> Result<Outcome, Rejection> {
        let outcome = script.outcome;
        info!(
            operation = %script.operation,
            steps = script.steps.len(),
            ?outcome,
            "operation built"
        );

        self.player.pause();
        self.player.reset().map_err(|_| Rejection::Busy)?;
        self.player.lock();
        self.player
            .announce("Preparing...", "// Starting operation...");
        self.player
            .enqueue_all(script.steps)
            .map_err(|_| Rejection::Busy)?;
        if let Err(err) = self.player.play(Instant::now()) {
            warn!(%err, "could not start playback");
        }
        Ok(outcome)
    }

    fn start_over(&mut self, variant: ListVariant) {
        self.player.pause();
        if let Err(err) = self.player.reset() {
            warn!(%err, "failed to reset player");
        }
        self.registry.clear();
        self.driver.reset(variant);
    }
}

/// Parse an insert value. An empty field picks a random value.
fn parse_value(raw: &str) -> Result<i32, Rejection> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(random_value());
    }
    raw.parse().map_err(|_| Rejection::InvalidNumber {
        input: raw.to_string(),
    })
}

fn parse_required(raw: &str, field: &'static str) -> Result<i32, Rejection> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(Rejection::MissingValue { field });
    }
    raw.parse().map_err(|_| Rejection::InvalidNumber {
        input: raw.to_string(),
    })
}

fn parse_position(raw: &str) -> Result<i64, Rejection> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(Rejection::MissingValue { field: "position" });
    }
    raw.parse().map_err(|_| Rejection::InvalidNumber {
        input: raw.to_string(),
    })
}

fn random_value() -> i32 {
    random_below(RANDOM_VALUE_BOUND) as i32
}

fn random_below(bound: u32) -> u32 {
    match getrandom::u32() {
        Ok(bits) => bits % bound,
        Err(err) => {
            warn!(%err, "no randomness available, using 0");
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::PlayerState;

    fn session(variant: ListVariant) -> Session {
        Session::new(Config {
            variant,
            ..Config::default()
        })
    }

    #[test]
    fn test_parse_value_rules() {
        assert_eq!(parse_value(" 42 "), Ok(42));
        assert!(matches!(
            parse_value("4x"),
            Err(Rejection::InvalidNumber { .. })
        ));
        let random = parse_value("").unwrap();
        assert!((0..100).contains(&random));
        assert_eq!(
            parse_position(""),
            Err(Rejection::MissingValue { field: "position" })
        );
        assert_eq!(
            parse_required("", "value"),
            Err(Rejection::MissingValue { field: "value" })
        );
    }

    #[test]
    fn test_second_operation_while_playing_is_busy() {
        let mut session = session(ListVariant::Singly);
        session.insert_tail("1").unwrap();
        assert!(session.is_busy());
        assert_eq!(session.player().state(), PlayerState::Playing);

        assert_eq!(session.insert_tail("2"), Err(Rejection::Busy));
        assert_eq!(session.list().values(), vec![1]);

        session.run_to_end().unwrap();
        assert!(!session.is_busy());
        assert!(session.insert_tail("2").is_ok());
    }

    #[test]
    fn test_rejection_leaves_everything_untouched() {
        let mut session = session(ListVariant::Doubly);
        assert_eq!(session.delete_head(), Err(Rejection::EmptyList));
        assert_eq!(session.player().state(), PlayerState::Idle);
        assert!(!session.is_busy());
    }

    #[test]
    fn test_abort_resyncs_visuals() {
        let mut session = session(ListVariant::Circular);
        session.insert_tail("1").unwrap();
        session.run_to_end().unwrap();
        session.insert_tail("2").unwrap();

        session.abort();
        assert!(!session.is_busy());
        assert_eq!(session.player().state(), PlayerState::Idle);
        assert_eq!(session.registry().node_count(), 2);
        assert_eq!(session.registry().connectors().len(), 2);
    }

    #[test]
    fn test_new_operation_after_rewind_catches_up() {
        let mut session = session(ListVariant::Singly);
        session.insert_tail("1").unwrap();
        session.run_to_end().unwrap();
        while session.step_backward().is_ok() {}
        assert_eq!(session.registry().node_count(), 0);

        session.insert_tail("2").unwrap();
        session.run_to_end().unwrap();
        assert_eq!(session.list().values(), vec![1, 2]);
        assert_eq!(session.registry().node_count(), 2);
        let ids: Vec<_> = session.registry().nodes().iter().map(|n| n.id).collect();
        assert_eq!(ids, session.list().ids());
    }

    #[test]
    fn test_set_list_type_discards_everything() {
        let mut session = session(ListVariant::Singly);
        session.insert_tail("1").unwrap();
        session.set_list_type(ListVariant::Doubly);

        assert_eq!(session.variant(), ListVariant::Doubly);
        assert!(session.list().is_empty());
        assert_eq!(session.registry().node_count(), 0);
        assert_eq!(session.player().state(), PlayerState::Idle);
    }

    #[test]
    fn test_generate_random_fills_five_to_nine() {
        let mut session = session(ListVariant::Circular);
        session.generate_random().unwrap();
        session.run_to_end().unwrap();

        let len = session.list().len();
        assert!((5..=9).contains(&len));
        assert_eq!(session.registry().node_count(), len);
        session.list().validate().unwrap();
    }
}
