// Runtime configuration and timing constants

use crate::list::ListVariant;
use std::fmt;
use std::time::Duration;

/// Default snapshot history budget (64 MB)
pub const DEFAULT_SNAPSHOT_LIMIT: usize = 64 * 1024 * 1024;

/// How long a validation message stays in the status bar
pub const STATUS_CLEAR_DELAY: Duration = Duration::from_secs(2);

/// Minimum time a node creation or removal step stays on screen during autoplay
pub const ENTRY_TRANSITION: Duration = Duration::from_millis(500);

/// Number of nodes in a randomly generated list
pub const RANDOM_LIST_MIN: u32 = 5;
pub const RANDOM_LIST_MAX: u32 = 9;

/// Values are drawn from `0..RANDOM_VALUE_BOUND` when the user leaves the value empty
pub const RANDOM_VALUE_BOUND: u32 = 100;

/// Autoplay interval, one of a small fixed set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackSpeed {
    Fastest,
    Fast,
    #[default]
    Normal,
    Slow,
    Slowest,
}

impl PlaybackSpeed {
    pub const ALL: [PlaybackSpeed; 5] = [
        PlaybackSpeed::Fastest,
        PlaybackSpeed::Fast,
        PlaybackSpeed::Normal,
        PlaybackSpeed::Slow,
        PlaybackSpeed::Slowest,
    ];

    pub fn interval(self) -> Duration {
        Duration::from_millis(match self {
            PlaybackSpeed::Fastest => 500,
            PlaybackSpeed::Fast => 1000,
            PlaybackSpeed::Normal => 2000,
            PlaybackSpeed::Slow => 2500,
            PlaybackSpeed::Slowest => 3000,
        })
    }

    /// Slider level 1 (fastest) through 5 (slowest)
    pub fn from_level(level: u8) -> Option<Self> {
        Self::ALL.get(usize::from(level).checked_sub(1)?).copied()
    }

    pub fn level(self) -> u8 {
        Self::ALL.iter().position(|s| *s == self).map_or(3, |i| i as u8 + 1)
    }

    pub fn faster(self) -> Self {
        Self::from_level(self.level().saturating_sub(1)).unwrap_or(self)
    }

    pub fn slower(self) -> Self {
        Self::from_level(self.level() + 1).unwrap_or(self)
    }
}

impl fmt::Display for PlaybackSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.interval().as_millis())
    }
}

/// Session configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub variant: ListVariant,
    pub speed: PlaybackSpeed,
    /// Byte budget of the per-step snapshot history
    pub snapshot_limit: usize,
    /// Whether reverse is offered for circular lists
    pub circular_reverse: bool,
    pub status_clear_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            variant: ListVariant::Singly,
            speed: PlaybackSpeed::default(),
            snapshot_limit: DEFAULT_SNAPSHOT_LIMIT,
            circular_reverse: true,
            status_clear_delay: STATUS_CLEAR_DELAY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_levels() {
        assert_eq!(PlaybackSpeed::from_level(1), Some(PlaybackSpeed::Fastest));
        assert_eq!(PlaybackSpeed::from_level(0), None);
        assert_eq!(PlaybackSpeed::from_level(6), None);
        assert_eq!(PlaybackSpeed::default().interval(), Duration::from_millis(2000));
        assert_eq!(PlaybackSpeed::Fastest.faster(), PlaybackSpeed::Fastest);
        assert_eq!(PlaybackSpeed::Slow.slower(), PlaybackSpeed::Slowest);
        assert_eq!(PlaybackSpeed::Slowest.slower(), PlaybackSpeed::Slowest);
    }
}
