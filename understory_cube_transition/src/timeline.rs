// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The settle animation that runs after the finger lifts.
//!
//! A [`Settle`] is a linear ramp of the horizontal offset: from the release
//! point to a full page width when the release commits, or back to zero when it
//! does not. It is a pure function of time; the engine feeds it frame
//! timestamps and renders whatever offset it returns.

use core::time::Duration;

use crate::Direction;

/// Post-release animation record.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Settle {
    /// Direction of the drag that was released.
    pub direction: Direction,
    /// The page the animation lands on, or `None` when springing back.
    pub target_index: Option<usize>,
    /// Frame-clock time of the release.
    pub started_at: Duration,
    /// Horizontal offset at the moment of release.
    pub release_translation_x: f64,
    /// Offset still to travel: to `±width` when committing, to `0` otherwise.
    pub target_distance: f64,
    /// Length of the animation.
    pub duration: Duration,
}

impl Settle {
    /// Starts a settle from a release at `release_translation_x`.
    ///
    /// Committing releases use `flip_duration`, others `reset_duration`.
    #[must_use]
    pub fn new(
        direction: Direction,
        target_index: Option<usize>,
        release_translation_x: f64,
        page_width: f64,
        started_at: Duration,
        flip_duration: Duration,
        reset_duration: Duration,
    ) -> Self {
        let (target_distance, duration) = if target_index.is_some() {
            let remaining = if release_translation_x > 0.0 {
                page_width - release_translation_x
            } else {
                -page_width - release_translation_x
            };
            (remaining, flip_duration)
        } else {
            (-release_translation_x, reset_duration)
        };
        Self {
            direction,
            target_index,
            started_at,
            release_translation_x,
            target_distance,
            duration,
        }
    }

    /// Whether the animation completes a page change.
    #[must_use]
    pub const fn will_commit(&self) -> bool {
        self.target_index.is_some()
    }

    /// Time since the release; zero if `now` is earlier.
    #[must_use]
    pub fn elapsed(&self, now: Duration) -> Duration {
        now.saturating_sub(self.started_at)
    }

    /// Returns `true` once strictly more than `duration` has elapsed.
    #[must_use]
    pub fn is_finished(&self, now: Duration) -> bool {
        self.elapsed(now) > self.duration
    }

    /// Fraction of the animation done at `now`, clamped to `[0, 1]`.
    #[must_use]
    pub fn progress(&self, now: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed(now).as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Horizontal offset to render at `now`.
    #[must_use]
    pub fn translation_at(&self, now: Duration) -> f64 {
        let f = self.progress(now);
        if self.will_commit() {
            self.target_distance * f + self.release_translation_x
        } else {
            self.release_translation_x * (1.0 - f)
        }
    }

    /// Offset at which the animation comes to rest.
    #[must_use]
    pub fn final_translation(&self) -> f64 {
        if self.will_commit() {
            self.release_translation_x + self.target_distance
        } else {
            0.0
        }
    }
}

/// What a frame tick did.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FrameOutcome {
    /// No settle animation was running.
    Idle,
    /// The cube was rendered at this horizontal offset.
    Animating {
        /// Interpolated offset.
        translation_x: f64,
    },
    /// The animation finished and the engine returned to idle.
    Settled {
        /// The new current page, if the page changed.
        committed: Option<usize>,
    },
}

#[cfg(test)]
mod tests {
    use super::Settle;
    use crate::Direction;
    use core::time::Duration;

    const QUARTER: Duration = Duration::from_millis(250);

    fn ms(ms: u64) -> Duration {
        Duration::from_millis(ms)
    }

    #[test]
    fn committing_release_ramps_to_a_full_page() {
        let s = Settle::new(Direction::Left, Some(1), 200.0, 300.0, ms(1000), QUARTER, QUARTER);
        assert!(s.will_commit());
        assert_eq!(s.target_distance, 100.0);
        assert_eq!(s.translation_at(ms(1000)), 200.0);
        assert!((s.translation_at(ms(1125)) - 250.0).abs() < 1e-9);
        assert_eq!(s.translation_at(ms(1250)), 300.0);
        assert_eq!(s.final_translation(), 300.0);
    }

    #[test]
    fn leftward_commit_ramps_to_minus_one_page() {
        let s = Settle::new(Direction::Right, Some(3), -50.0, 300.0, ms(0), QUARTER, QUARTER);
        assert_eq!(s.target_distance, -250.0);
        assert_eq!(s.final_translation(), -300.0);
        assert_eq!(s.translation_at(ms(250)), -300.0);
    }

    #[test]
    fn spring_back_decays_to_zero() {
        let s = Settle::new(Direction::Left, None, 50.0, 300.0, ms(0), ms(400), QUARTER);
        // Springing back uses the reset duration, not the flip duration.
        assert_eq!(s.duration, QUARTER);
        assert_eq!(s.target_distance, -50.0);
        assert_eq!(s.translation_at(ms(0)), 50.0);
        assert!((s.translation_at(ms(125)) - 25.0).abs() < 1e-9);
        assert_eq!(s.translation_at(ms(250)), 0.0);
        assert_eq!(s.final_translation(), 0.0);
    }

    #[test]
    fn finishing_is_strictly_after_the_duration() {
        let s = Settle::new(Direction::Left, None, 50.0, 300.0, ms(100), QUARTER, QUARTER);
        assert!(!s.is_finished(ms(350)));
        assert!(s.is_finished(ms(351)));
        // Past the end the offset stays clamped at rest.
        assert_eq!(s.translation_at(ms(900)), 0.0);
    }

    #[test]
    fn clock_running_backwards_is_treated_as_no_progress() {
        let s = Settle::new(Direction::Left, None, 50.0, 300.0, ms(100), QUARTER, QUARTER);
        assert_eq!(s.progress(ms(0)), 0.0);
        assert!(!s.is_finished(ms(0)));
    }

    #[test]
    fn zero_duration_jumps_to_the_end() {
        let s = Settle::new(Direction::Right, Some(1), -10.0, 300.0, ms(0), Duration::ZERO, QUARTER);
        assert_eq!(s.progress(ms(0)), 1.0);
        assert_eq!(s.translation_at(ms(0)), -300.0);
        assert!(!s.is_finished(ms(0)));
        assert!(s.is_finished(ms(1)));
    }
}
