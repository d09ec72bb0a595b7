//! Normalized zoom progress advanced once per fixed tick.

use std::time::Duration;

/// Reference tick period of the driver loop.
pub const TICK_PERIOD: Duration = Duration::from_millis(16);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Idle,
    In,
    Out,
}

impl Direction {
    fn sign(self) -> f64 {
        match self {
            Direction::Idle => 0.0,
            Direction::In => 1.0,
            Direction::Out => -1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationTimings {
    pub zoom_in_ms: u32,
    pub zoom_out_ms: u32,
}

impl Default for AnimationTimings {
    fn default() -> Self {
        Self {
            zoom_in_ms: 180,
            zoom_out_ms: 180,
        }
    }
}

impl AnimationTimings {
    fn duration_ms(self, direction: Direction) -> f64 {
        let ms = match direction {
            Direction::Out => self.zoom_out_ms,
            Direction::In | Direction::Idle => self.zoom_in_ms,
        };
        ms.max(1) as f64
    }
}

/// Result of advancing one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Still moving toward 0 or 1.
    Animating,
    /// At rest with zoom applied; follow tracking keeps running.
    Holding,
    /// Back at 0: the original transform must be restored and ticking stops.
    Deactivated,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnimationState {
    progress: f64,
    direction: Direction,
}

impl AnimationState {
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Flips or sets the direction. Reversal mid-animation continues from the
    /// current progress.
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn advance(&mut self, tick: Duration, timings: AnimationTimings) -> Phase {
        let step = tick.as_secs_f64() * 1000.0 / timings.duration_ms(self.direction);
        self.progress += self.direction.sign() * step;

        if self.progress >= 1.0 {
            self.progress = 1.0;
            self.direction = Direction::Idle;
        }
        if self.progress <= 0.0 {
            self.progress = 0.0;
            self.direction = Direction::Idle;
        }

        match self.direction {
            Direction::Idle if self.progress == 0.0 => Phase::Deactivated,
            Direction::Idle => Phase::Holding,
            Direction::In | Direction::Out => Phase::Animating,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_until_rest(state: &mut AnimationState, timings: AnimationTimings) -> (usize, Phase) {
        for ticks in 1..10_000 {
            let phase = state.advance(TICK_PERIOD, timings);
            if phase != Phase::Animating {
                return (ticks, phase);
            }
        }
        panic!("animation never settled");
    }

    #[test]
    fn zoom_in_reaches_one_and_holds() {
        let mut state = AnimationState::default();
        state.set_direction(Direction::In);
        let (ticks, phase) = run_until_rest(&mut state, AnimationTimings::default());
        assert_eq!(phase, Phase::Holding);
        assert_eq!(state.progress(), 1.0);
        assert_eq!(state.direction(), Direction::Idle);
        // 180ms at 16ms per tick.
        assert_eq!(ticks, 12);

        // Further ticks leave progress untouched.
        assert_eq!(state.advance(TICK_PERIOD, AnimationTimings::default()), Phase::Holding);
        assert_eq!(state.progress(), 1.0);
    }

    #[test]
    fn zoom_out_reaches_zero_and_deactivates() {
        let mut state = AnimationState::default();
        state.set_direction(Direction::In);
        run_until_rest(&mut state, AnimationTimings::default());

        state.set_direction(Direction::Out);
        let timings = AnimationTimings {
            zoom_in_ms: 180,
            zoom_out_ms: 64,
        };
        let (ticks, phase) = run_until_rest(&mut state, timings);
        assert_eq!(phase, Phase::Deactivated);
        assert_eq!(ticks, 4);
        assert_eq!(state.progress(), 0.0);
        assert_eq!(state.direction(), Direction::Idle);
    }

    #[test]
    fn reversal_continues_from_current_progress() {
        let mut state = AnimationState::default();
        state.set_direction(Direction::In);
        for _ in 0..3 {
            state.advance(TICK_PERIOD, AnimationTimings::default());
        }
        let mid = state.progress();
        assert!(mid > 0.0 && mid < 1.0);

        state.set_direction(Direction::Out);
        state.advance(TICK_PERIOD, AnimationTimings::default());
        assert!(state.progress() < mid);
        assert!(state.progress() > 0.0);
    }

    #[test]
    fn zero_duration_is_floored_to_one_millisecond() {
        let mut state = AnimationState::default();
        state.set_direction(Direction::In);
        let timings = AnimationTimings {
            zoom_in_ms: 0,
            zoom_out_ms: 0,
        };
        assert_eq!(state.advance(TICK_PERIOD, timings), Phase::Holding);
        assert_eq!(state.progress(), 1.0);
        assert!(state.progress().is_finite());
    }

    #[test]
    fn progress_stays_in_unit_range() {
        let mut state = AnimationState::default();
        let timings = AnimationTimings {
            zoom_in_ms: 50,
            zoom_out_ms: 30,
        };
        for round in 0..40 {
            let direction = if round % 3 == 0 {
                Direction::Out
            } else {
                Direction::In
            };
            state.set_direction(direction);
            state.advance(TICK_PERIOD, timings);
            assert!((0.0..=1.0).contains(&state.progress()));
        }
    }
}
