// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capabilities the host supplies to the engine.
//!
//! The engine never creates, draws, or schedules anything itself. It asks a
//! [`PageProvider`] for page content, tells a [`Compositor`] where views go and
//! how they are transformed, and drives its settle animation from a
//! [`FrameClock`] the host ticks once per display refresh.

use core::time::Duration;

use kurbo::{Point, Rect};

use crate::{Direction, FaceTransform, Transform3D};

/// Source of page content and receiver of page-change notifications.
pub trait PageProvider {
    /// The host's view type. The engine's cache owns every instance it receives.
    type View;

    /// Materializes the view for page `index`.
    ///
    /// Called at most once per index between evictions, and only with
    /// `index < self.number_of_pages()`.
    fn page_view(&mut self, index: usize) -> Self::View;

    /// Current number of pages. Re-read at every paging decision.
    fn number_of_pages(&self) -> usize;

    /// A page change committed. Called once per change, after the engine's
    /// index, origin, and cache are up to date.
    fn page_did_change(&mut self, index: usize, direction: Direction);
}

/// Rendering capability: places page views and applies their transforms.
pub trait Compositor<V> {
    /// A freshly materialized view should be shown at `frame`, in content coordinates.
    fn attach(&mut self, index: usize, view: &V, frame: Rect);

    /// A view left the cache (evicted, truncated, or replaced) and should leave the rendering tree.
    fn detach(&mut self, index: usize, view: V);

    /// Applies a cube-face transform to a cached view.
    ///
    /// [`FaceTransform::to_matrix`] gives the equivalent 4×4 matrix.
    fn set_face_transform(&mut self, index: usize, view: &V, transform: &FaceTransform);

    /// Moves the visible region so that its top-left corner is at `origin`.
    fn set_origin(&mut self, origin: Point);

    /// Sets the perspective applied to all faces. Called once, at construction.
    fn set_perspective(&mut self, perspective: &Transform3D) {
        let _ = perspective;
    }
}

/// Display-refresh clock.
///
/// While resumed, the host calls [`CubeTransition::on_frame`](crate::CubeTransition::on_frame)
/// once per refresh with the refresh timestamp. The engine keeps the clock
/// paused whenever no settle animation is running.
pub trait FrameClock {
    /// Current time on the same timeline as frame timestamps.
    fn now(&self) -> Duration;

    /// Starts delivering frames.
    fn resume(&mut self);

    /// Stops delivering frames.
    fn pause(&mut self);
}

/// A [`FrameClock`] that only moves when told to.
///
/// Useful for tests and for hosts that already own a frame loop and just
/// need to know whether to call the engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ManualClock {
    now: Duration,
    running: bool,
}

impl ManualClock {
    /// A paused clock at time zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
            running: false,
        }
    }

    /// Returns `true` while frames should be delivered.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Moves time forward by `delta` and returns the new time.
    pub fn advance(&mut self, delta: Duration) -> Duration {
        self.now = self.now.saturating_add(delta);
        self.now
    }

    /// Jumps to an absolute time.
    pub fn set_now(&mut self, now: Duration) {
        self.now = now;
    }
}

impl FrameClock for ManualClock {
    fn now(&self) -> Duration {
        self.now
    }

    fn resume(&mut self) {
        self.running = true;
    }

    fn pause(&mut self) {
        self.running = false;
    }
}
