//! Point-of-interest tracking in content space.
//!
//! With follow enabled the point chases the mapped cursor with exponential
//! smoothing. With follow disabled the first successful mapping of a cycle is
//! latched and held. In both modes a failed mapping keeps the last point so
//! the view never snaps back to center mid-cycle.

use std::time::Duration;

use crate::models::geometry::ContentPoint;

pub const DEFAULT_FOLLOW_SPEED: f64 = 8.0;
pub const MIN_FOLLOW_SPEED: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FollowTracker {
    position: Option<ContentPoint>,
}

impl FollowTracker {
    pub fn position(&self) -> Option<ContentPoint> {
        self.position
    }

    pub fn has_position(&self) -> bool {
        self.position.is_some()
    }

    pub fn reset(&mut self) {
        self.position = None;
    }

    /// Feeds one tick's mapping result and returns the point to center on,
    /// `None` meaning "no point yet, use content center".
    pub fn update(
        &mut self,
        mapped: Option<ContentPoint>,
        follow: bool,
        speed: f64,
        dt: Duration,
    ) -> Option<ContentPoint> {
        let Some(target) = mapped else {
            return self.position;
        };

        let next = match self.position {
            None => target,
            Some(_) if !follow => return self.position,
            Some(current) => {
                let alpha = smoothing_alpha(speed, dt);
                ContentPoint::new(
                    current.x + (target.x - current.x) * alpha,
                    current.y + (target.y - current.y) * alpha,
                )
            }
        };
        self.position = Some(next);
        self.position
    }
}

/// Fraction of the remaining distance covered in one step of `dt`.
pub fn smoothing_alpha(speed: f64, dt: Duration) -> f64 {
    let speed = if speed.is_finite() {
        speed.max(MIN_FOLLOW_SPEED)
    } else {
        DEFAULT_FOLLOW_SPEED
    };
    1.0 - (-speed * dt.as_secs_f64()).exp()
}
