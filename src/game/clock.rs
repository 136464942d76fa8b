use crate::consts;
use std::num::NonZeroU32;
use std::time::Duration;

/// Fixed-timestep accumulator.  Elapsed time is fed in with
/// [`GameClock::accumulate()`] and drawn back out one tick interval at a time
/// with [`GameClock::consume()`]; whatever is left over carries into the next
/// call.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct GameClock {
    accumulator: Duration,
}

impl GameClock {
    pub fn new() -> GameClock {
        GameClock::default()
    }

    /// Time accumulated but not yet consumed by a tick
    pub fn accumulated(&self) -> Duration {
        self.accumulator
    }

    pub fn reset(&mut self) {
        self.accumulator = Duration::ZERO;
    }

    pub fn accumulate(&mut self, delta: Duration) {
        self.accumulator = self.accumulator.saturating_add(delta);
    }

    /// If at least `interval` has accumulated, subtract it and return `true`.
    /// A zero `interval` is never consumed.
    pub fn consume(&mut self, interval: Duration) -> bool {
        if interval.is_zero() {
            return false;
        }
        match self.accumulator.checked_sub(interval) {
            Some(rest) => {
                self.accumulator = rest;
                true
            }
            None => false,
        }
    }

    /// Throw away the accumulated time if it would pay for at least one more
    /// tick of `interval`.  A partial tick is kept.  Returns the amount
    /// discarded.
    pub fn drop_backlog(&mut self, interval: Duration) -> Duration {
        if self.accumulator >= interval {
            std::mem::take(&mut self.accumulator)
        } else {
            Duration::ZERO
        }
    }
}

/// Bound on the number of ticks a single advance may run
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum CatchUp {
    #[default]
    Unbounded,
    /// Run at most this many ticks per advance and discard any backlog of
    /// whole ticks beyond that
    Capped(NonZeroU32),
}

impl CatchUp {
    pub fn allows(self, ticks: u32) -> bool {
        match self {
            CatchUp::Unbounded => true,
            CatchUp::Capped(max) => ticks < max.get(),
        }
    }
}

impl From<Option<NonZeroU32>> for CatchUp {
    fn from(value: Option<NonZeroU32>) -> CatchUp {
        value.map_or(CatchUp::Unbounded, CatchUp::Capped)
    }
}

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Split `total` into `max(1, round(total * FRAMES_PER_SECOND))` frames of
/// (nearly) equal length.  Any nanoseconds that don't divide evenly go to the
/// last frame, so the frames always sum to exactly `total`.
pub fn frame_slices(total: Duration) -> impl Iterator<Item = Duration> {
    let scaled = total
        .as_nanos()
        .saturating_mul(u128::from(consts::FRAMES_PER_SECOND));
    let rounded = scaled.saturating_add(NANOS_PER_SEC / 2) / NANOS_PER_SEC;
    let frames = u32::try_from(rounded).unwrap_or(u32::MAX).max(1);
    let each = total / frames;
    let remainder = total.saturating_sub(each * frames);
    (0..frames).map(move |i| {
        if i + 1 == frames {
            each + remainder
        } else {
            each
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn consume_in_steps() {
        let mut clock = GameClock::new();
        clock.accumulate(Duration::from_millis(400));
        assert!(clock.consume(Duration::from_millis(190)));
        assert!(clock.consume(Duration::from_millis(190)));
        assert!(!clock.consume(Duration::from_millis(190)));
        assert_eq!(clock.accumulated(), Duration::from_millis(20));
        clock.accumulate(Duration::from_millis(170));
        assert!(clock.consume(Duration::from_millis(190)));
        assert_eq!(clock.accumulated(), Duration::ZERO);
    }

    #[test]
    fn zero_interval_never_consumed() {
        let mut clock = GameClock::new();
        clock.accumulate(Duration::from_millis(10));
        assert!(!clock.consume(Duration::ZERO));
        assert_eq!(clock.accumulated(), Duration::from_millis(10));
    }

    #[test]
    fn reset() {
        let mut clock = GameClock::new();
        clock.accumulate(Duration::from_millis(99));
        clock.reset();
        assert_eq!(clock.accumulated(), Duration::ZERO);
    }

    #[test]
    fn drop_backlog_keeps_partial_tick() {
        let mut clock = GameClock::new();
        clock.accumulate(Duration::from_millis(180));
        assert_eq!(
            clock.drop_backlog(Duration::from_millis(190)),
            Duration::ZERO
        );
        assert_eq!(clock.accumulated(), Duration::from_millis(180));
        clock.accumulate(Duration::from_millis(20));
        assert_eq!(
            clock.drop_backlog(Duration::from_millis(190)),
            Duration::from_millis(200)
        );
        assert_eq!(clock.accumulated(), Duration::ZERO);
    }

    #[rstest]
    #[case(None, 1_000_000, true)]
    #[case(NonZeroU32::new(3), 2, true)]
    #[case(NonZeroU32::new(3), 3, false)]
    fn test_catch_up(#[case] cap: Option<NonZeroU32>, #[case] ticks: u32, #[case] r: bool) {
        assert_eq!(CatchUp::from(cap).allows(ticks), r);
    }

    #[rstest]
    #[case(Duration::ZERO, 1)]
    #[case(Duration::from_millis(5), 1)]
    #[case(Duration::from_millis(190), 11)]
    #[case(Duration::from_millis(1000), 60)]
    #[case(Duration::from_millis(25), 2)]
    fn test_frame_slices(#[case] total: Duration, #[case] frames: usize) {
        let slices = frame_slices(total).collect::<Vec<_>>();
        assert_eq!(slices.len(), frames);
        assert_eq!(slices.iter().sum::<Duration>(), total);
    }
}
