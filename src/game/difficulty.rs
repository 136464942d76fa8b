use crate::consts;
use std::time::Duration;

/// Maps a score to the interval between ticks.  The interval starts at
/// `start` milliseconds and shrinks by `decay` milliseconds per point until it
/// bottoms out at `floor` milliseconds.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Difficulty {
    start: u64,
    floor: u64,
    decay: u64,
}

impl Difficulty {
    /// The caller is responsible for ensuring `floor <= start`;
    /// [`Rules`][crate::config::Rules] validates this.
    pub fn new(start: u64, floor: u64, decay: u64) -> Difficulty {
        Difficulty {
            start,
            floor,
            decay,
        }
    }

    pub fn start_interval(self) -> Duration {
        Duration::from_millis(self.start)
    }

    pub fn min_interval(self) -> Duration {
        Duration::from_millis(self.floor)
    }

    /// `max(floor, start - score * decay)`
    pub fn interval_for(self, score: u32) -> Duration {
        let ms = self
            .start
            .saturating_sub(u64::from(score).saturating_mul(self.decay))
            .max(self.floor);
        Duration::from_millis(ms)
    }
}

impl Default for Difficulty {
    fn default() -> Difficulty {
        Difficulty::new(
            consts::STEP_MS_START,
            consts::STEP_MS_MIN,
            consts::STEP_DECAY,
        )
    }
}
