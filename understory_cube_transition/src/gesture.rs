// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pan samples, per-sample outcomes, and the release commit heuristic.

use kurbo::Vec2;

use crate::{CubeTransitionConfig, Direction};

/// Phase of a pan gesture as reported by the host's recognizer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GesturePhase {
    /// First sample of a gesture.
    Began,
    /// The finger moved.
    Changed,
    /// The finger lifted.
    Ended,
    /// The recognizer gave up on the gesture (for example, the system took it over).
    Cancelled,
}

/// One recognizer sample.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GestureSample {
    /// Cumulative translation since the gesture began.
    pub translation: Vec2,
    /// Current velocity, in units per second.
    pub velocity: Vec2,
    /// Gesture phase.
    pub phase: GesturePhase,
}

impl GestureSample {
    /// A sample with an explicit phase.
    #[must_use]
    pub const fn new(translation: Vec2, velocity: Vec2, phase: GesturePhase) -> Self {
        Self {
            translation,
            velocity,
            phase,
        }
    }

    /// A [`GesturePhase::Began`] sample with no velocity.
    #[must_use]
    pub const fn began(translation: Vec2) -> Self {
        Self::new(translation, Vec2::ZERO, GesturePhase::Began)
    }

    /// A [`GesturePhase::Changed`] sample.
    #[must_use]
    pub const fn changed(translation: Vec2, velocity: Vec2) -> Self {
        Self::new(translation, velocity, GesturePhase::Changed)
    }

    /// A [`GesturePhase::Ended`] sample.
    #[must_use]
    pub const fn ended(translation: Vec2, velocity: Vec2) -> Self {
        Self::new(translation, velocity, GesturePhase::Ended)
    }

    /// Returns `true` for the last sample of a gesture.
    #[must_use]
    pub const fn is_final(&self) -> bool {
        matches!(self.phase, GesturePhase::Ended | GesturePhase::Cancelled)
    }
}

/// What the engine did with a pan sample.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PanOutcome {
    /// A settle animation is running; the sample was dropped.
    Ignored,
    /// The direction flipped: faces were reset and nothing was rendered.
    DirectionChanged(Direction),
    /// The drag is not horizontal and does not move the cube.
    Inert(Direction),
    /// The cube follows the finger at this horizontal offset.
    Tracking {
        /// Offset fed to the transform generator.
        translation_x: f64,
    },
    /// The finger lifted (or the gesture was cancelled) and the settle animation started.
    Released {
        /// Whether the animation completes a page change.
        will_commit: bool,
    },
}

/// The distance/velocity heuristic deciding whether a release commits.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CommitPolicy {
    /// Commit when `|tx|` exceeds this.
    pub distance_threshold: f64,
    /// Commit when `|vx|` exceeds this.
    pub speed_threshold: f64,
}

impl CommitPolicy {
    /// The policy described by `config`.
    #[must_use]
    pub fn from_config(config: &CubeTransitionConfig) -> Self {
        Self {
            distance_threshold: config.distance_threshold(),
            speed_threshold: config.speed_threshold(),
        }
    }

    /// The heuristic alone, ignoring page boundaries.
    #[must_use]
    pub fn wants_commit(&self, translation_x: f64, velocity_x: f64) -> bool {
        translation_x.abs() > self.distance_threshold || velocity_x.abs() > self.speed_threshold
    }

    /// The page a release at `translation_x` moving at `velocity_x` lands on,
    /// or `None` if the cube springs back.
    ///
    /// Dragging towards the previous page on the first page, or towards the
    /// next page on the last one, never commits. Nothing commits while there
    /// are no pages.
    ///
    /// ```
    /// use understory_cube_transition::CommitPolicy;
    ///
    /// let policy = CommitPolicy { distance_threshold: 150.0, speed_threshold: 300.0 };
    /// assert_eq!(policy.target_index(2, 5, -200.0, 0.0), Some(3));
    /// assert_eq!(policy.target_index(2, 5, 50.0, 400.0), Some(1));
    /// assert_eq!(policy.target_index(2, 5, 50.0, 0.0), None);
    /// // The first page has nothing before it.
    /// assert_eq!(policy.target_index(0, 5, 500.0, 0.0), None);
    /// ```
    #[must_use]
    pub fn target_index(
        &self,
        current: usize,
        page_count: usize,
        translation_x: f64,
        velocity_x: f64,
    ) -> Option<usize> {
        let last = page_count.checked_sub(1)?;
        let backward = if translation_x > 0.0 {
            true
        } else if translation_x < 0.0 {
            false
        } else {
            return None;
        };
        if (backward && current == 0) || (!backward && current == last) {
            return None;
        }
        if !self.wants_commit(translation_x, velocity_x) {
            return None;
        }
        let target = if backward {
            current.saturating_sub(1)
        } else {
            current.saturating_add(1)
        }
        .min(last);
        (target != current).then_some(target)
    }
}
