// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The cube transition engine: gesture state machine plus settle timeline.

use core::fmt;
use core::time::Duration;

use kurbo::{Point, Rect, Size};
use smallvec::SmallVec;
use understory_page_cache::PageCache;

use crate::{
    CommitPolicy, Compositor, ConfigError, CubeFaces, CubeTransitionConfig, Direction, FrameClock,
    FrameOutcome, GesturePhase, GestureSample, PageProvider, PanOutcome, Settle, Transform3D,
    cube_faces,
};

/// Coarse engine state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TransitionState {
    /// No gesture and no animation.
    Idle,
    /// A finger is down and the cube follows it.
    Tracking,
    /// The finger lifted and the settle animation is running.
    Settling,
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum State {
    Idle,
    Tracking,
    Settling(Settle),
}

/// Gesture-driven cube page-flip engine.
///
/// One instance owns everything that lives across recognizer callbacks and
/// frame ticks: the current page, the page cache, the two face slots, and the
/// running settle animation. All methods take `&mut self`; hosts on a
/// multi-threaded runtime keep the engine on their UI thread.
///
/// Face slots refer to cached pages by index. A slot whose page is not cached
/// (no provider yet, or a neighbor past either end of the range) is an empty
/// placeholder that is simply not rendered.
pub struct CubeTransition<P: PageProvider, C, F> {
    config: CubeTransitionConfig,
    provider: Option<P>,
    compositor: C,
    clock: F,
    cache: PageCache<P::View>,

    current_index: usize,
    origin: Point,

    direction: Direction,
    previous_direction: Direction,
    left_face: Option<usize>,
    right_face: Option<usize>,
    faces: CubeFaces,
    /// Pages first materialized by the gesture in progress.
    fresh_pages: SmallVec<[usize; 4]>,

    state: State,
}

impl<P: PageProvider, C, F> fmt::Debug for CubeTransition<P, C, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CubeTransition")
            .field("config", &self.config)
            .field("has_provider", &self.provider.is_some())
            .field("cached_pages", &self.cache.indices())
            .field("current_index", &self.current_index)
            .field("origin", &self.origin)
            .field("direction", &self.direction)
            .field("left_face", &self.left_face)
            .field("right_face", &self.right_face)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<P, C, F> CubeTransition<P, C, F>
where
    P: PageProvider,
    C: Compositor<P::View>,
    F: FrameClock,
{
    /// Creates an engine without a page provider.
    ///
    /// The clock is paused and the compositor receives the perspective and the
    /// initial origin. Fails if `config` violates a precondition, most commonly
    /// a zero page width.
    pub fn new(config: CubeTransitionConfig, compositor: C, clock: F) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut engine = Self {
            config,
            provider: None,
            compositor,
            clock,
            cache: PageCache::new(config.offset_cached_pages),
            current_index: 0,
            origin: Point::ZERO,
            direction: Direction::Undetermined,
            previous_direction: Direction::Undetermined,
            left_face: None,
            right_face: None,
            faces: CubeFaces::IDENTITY,
            fresh_pages: SmallVec::new(),
            state: State::Idle,
        };
        engine.clock.pause();
        engine
            .compositor
            .set_perspective(&Transform3D::perspective(config.perspective_distance()));
        engine.compositor.set_origin(engine.origin);
        Ok(engine)
    }

    /// Builder-style [`set_provider`](Self::set_provider).
    #[must_use]
    pub fn with_provider(mut self, provider: P) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Installs the page provider, returning the previous one.
    ///
    /// Views built by the previous provider are detached and dropped from the
    /// cache. Call [`reload_data`](Self::reload_data) afterwards to show the
    /// first page of the new one.
    pub fn set_provider(&mut self, provider: P) -> Option<P> {
        self.clear_pages();
        self.provider.replace(provider)
    }

    /// Removes the page provider and detaches its views. Until a new one is set
    /// the engine sees no pages.
    pub fn take_provider(&mut self) -> Option<P> {
        self.clear_pages();
        self.provider.take()
    }

    /// The page provider, if any.
    pub fn provider(&self) -> Option<&P> {
        self.provider.as_ref()
    }

    /// Mutable access to the page provider, if any.
    pub fn provider_mut(&mut self) -> Option<&mut P> {
        self.provider.as_mut()
    }

    /// The compositor.
    pub fn compositor(&self) -> &C {
        &self.compositor
    }

    /// Mutable access to the compositor.
    pub fn compositor_mut(&mut self) -> &mut C {
        &mut self.compositor
    }

    /// The frame clock.
    pub fn clock(&self) -> &F {
        &self.clock
    }

    /// Mutable access to the frame clock.
    pub fn clock_mut(&mut self) -> &mut F {
        &mut self.clock
    }

    /// The active configuration.
    pub fn config(&self) -> &CubeTransitionConfig {
        &self.config
    }

    /// Sets how many pages are kept cached on each side of the current page.
    pub fn set_offset_cached_pages(&mut self, pages: usize) {
        self.config.offset_cached_pages = pages;
        self.cache.set_radius(pages);
    }

    /// Sets the duration of committing animations. Applies from the next release.
    pub fn set_flip_duration(&mut self, duration: Duration) {
        self.config.flip_duration = duration;
    }

    /// Sets the duration of spring-back animations. Applies from the next release.
    pub fn set_reset_duration(&mut self, duration: Duration) {
        self.config.reset_duration = duration;
    }

    /// Sets the commit distance threshold.
    pub fn set_distance_threshold(&mut self, threshold: f64) -> Result<(), ConfigError> {
        crate::config::check_threshold("distance threshold", threshold)?;
        self.config.distance_threshold = Some(threshold);
        Ok(())
    }

    /// Sets the commit speed threshold.
    pub fn set_speed_threshold(&mut self, threshold: f64) -> Result<(), ConfigError> {
        crate::config::check_threshold("speed threshold", threshold)?;
        self.config.speed_threshold = Some(threshold);
        Ok(())
    }

    /// The committed current page.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Number of pages reported by the provider; zero without one.
    pub fn page_count(&self) -> usize {
        self.provider.as_ref().map_or(0, P::number_of_pages)
    }

    /// Direction of the latest accepted sample.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Coarse state.
    pub fn state(&self) -> TransitionState {
        match self.state {
            State::Idle => TransitionState::Idle,
            State::Tracking => TransitionState::Tracking,
            State::Settling(_) => TransitionState::Settling,
        }
    }

    /// Returns `true` while a settle animation runs. New gestures are ignored meanwhile.
    pub fn is_animating(&self) -> bool {
        matches!(self.state, State::Settling(_))
    }

    /// The running settle animation, if any.
    pub fn settle(&self) -> Option<&Settle> {
        match &self.state {
            State::Settling(settle) => Some(settle),
            State::Idle | State::Tracking => None,
        }
    }

    /// Page indices currently animated as the (left, right) cube faces.
    pub fn face_indices(&self) -> (Option<usize>, Option<usize>) {
        (self.left_face, self.right_face)
    }

    /// The transforms last applied to the two faces.
    pub fn faces(&self) -> CubeFaces {
        self.faces
    }

    /// The page cache.
    pub fn cache(&self) -> &PageCache<P::View> {
        &self.cache
    }

    /// Frame of page `index` in content coordinates; pages sit side by side.
    pub fn page_frame(&self, index: usize) -> Rect {
        page_frame(index, self.config.page_size)
    }

    /// The visible region in content coordinates.
    pub fn visible_bounds(&self) -> Rect {
        Rect::from_origin_size(self.origin, self.config.page_size)
    }

    /// Materializes page 0 so the host has something to show before the first gesture.
    ///
    /// Cached pages that no longer exist are detached first, and the current
    /// page is pulled back into range if the page count shrank.
    pub fn reload_data(&mut self) {
        let page_count = self.page_count();
        for (index, view) in self.cache.truncate(page_count) {
            self.compositor.detach(index, view);
        }
        if page_count > 0 && self.current_index >= page_count {
            self.move_to(page_count - 1);
        }
        self.load_page(0);
    }

    /// Feeds one recognizer sample.
    pub fn handle_pan(&mut self, sample: GestureSample) -> PanOutcome {
        if self.is_animating() {
            return PanOutcome::Ignored;
        }
        self.state = State::Tracking;

        let direction = Direction::classify(sample.translation);
        self.direction = direction;
        let changed =
            self.previous_direction != Direction::Undetermined && self.previous_direction != direction;
        if changed {
            self.reset_faces();
        }

        let fast = sample.phase == GesturePhase::Changed
            && sample.velocity.x.abs() > self.config.fast_swipe_speed;
        if sample.phase == GesturePhase::Began || self.previous_direction != direction || fast {
            self.resolve_faces(direction);
        }
        self.previous_direction = direction;

        if changed {
            self.end_tracking_if(sample.is_final());
            return PanOutcome::DirectionChanged(direction);
        }
        if !direction.is_horizontal() {
            self.end_tracking_if(sample.is_final());
            return PanOutcome::Inert(direction);
        }

        let translation_x = sample.translation.x;
        match sample.phase {
            GesturePhase::Ended => self.release(translation_x, sample.velocity.x, true),
            GesturePhase::Cancelled => self.release(translation_x, 0.0, false),
            GesturePhase::Began | GesturePhase::Changed => {
                self.render(translation_x);
                PanOutcome::Tracking { translation_x }
            }
        }
    }

    /// Advances the settle animation to the frame at `timestamp`.
    pub fn on_frame(&mut self, timestamp: Duration) -> FrameOutcome {
        let State::Settling(settle) = self.state else {
            return FrameOutcome::Idle;
        };
        if settle.is_finished(timestamp) {
            return self.finish(settle);
        }
        let translation_x = settle.translation_at(timestamp);
        self.render(translation_x);
        FrameOutcome::Animating { translation_x }
    }

    fn clear_pages(&mut self) {
        self.fresh_pages.clear();
        self.left_face = None;
        self.right_face = None;
        self.faces = CubeFaces::IDENTITY;
        for (index, view) in self.cache.drain() {
            self.compositor.detach(index, view);
        }
    }

    fn end_tracking_if(&mut self, is_final: bool) {
        if is_final {
            self.evict_stray_pages();
            self.state = State::Idle;
        }
    }

    fn release(&mut self, translation_x: f64, velocity_x: f64, may_commit: bool) -> PanOutcome {
        let page_count = self.page_count();
        let target_index = if may_commit {
            CommitPolicy::from_config(&self.config).target_index(
                self.current_index,
                page_count,
                translation_x,
                velocity_x,
            )
        } else {
            None
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(
            current = self.current_index,
            page_count,
            translation_x,
            velocity_x,
            target_index = ?target_index,
            "pan released"
        );
        let settle = Settle::new(
            self.direction,
            target_index,
            translation_x,
            self.config.page_width(),
            self.clock.now(),
            self.config.flip_duration,
            self.config.reset_duration,
        );
        self.state = State::Settling(settle);
        self.clock.resume();
        PanOutcome::Released {
            will_commit: settle.will_commit(),
        }
    }

    fn finish(&mut self, settle: Settle) -> FrameOutcome {
        self.clock.pause();
        // The page count may have shrunk while the animation ran.
        let page_count = self.page_count();
        let committed = settle
            .target_index
            .filter(|&target| target < page_count && target != self.current_index);
        if let Some(target) = committed {
            self.move_to(target);
        } else if let Some(last) = page_count.checked_sub(1)
            && self.current_index > last
        {
            self.move_to(last);
        }
        if let Some(travel) = settle.direction.travel()
            && let Some((index, view)) =
                self.cache
                    .maintain_window(self.current_index, travel, page_count)
        {
            #[cfg(feature = "tracing")]
            tracing::trace!(index, current = self.current_index, "evicted cached page");
            self.compositor.detach(index, view);
        }
        self.evict_stray_pages();
        self.reset_faces();
        self.state = State::Idle;
        #[cfg(feature = "tracing")]
        tracing::debug!(
            current = self.current_index,
            committed = ?committed,
            dropped = settle.will_commit() && committed.is_none(),
            "settled"
        );
        if let Some(target) = committed
            && let Some(provider) = self.provider.as_mut()
        {
            provider.page_did_change(target, settle.direction);
        }
        FrameOutcome::Settled { committed }
    }

    /// Drops pages the last gesture materialized that ended up outside the
    /// retained window, such as the neighbor of a swipe that sprang back.
    fn evict_stray_pages(&mut self) {
        let window = self.cache.window(self.current_index, self.page_count());
        for index in core::mem::take(&mut self.fresh_pages) {
            if window.contains(&index) {
                continue;
            }
            if let Some(view) = self.cache.remove(index) {
                #[cfg(feature = "tracing")]
                tracing::trace!(index, current = self.current_index, "evicted stray page");
                self.compositor.detach(index, view);
            }
        }
    }

    /// Makes `index` current and moves the visible origin onto its frame.
    fn move_to(&mut self, index: usize) {
        self.current_index = index;
        self.origin = self.page_frame(index).origin();
        self.compositor.set_origin(self.origin);
    }

    fn resolve_faces(&mut self, direction: Direction) {
        let Some((left, right)) = direction.face_indices(self.current_index) else {
            return;
        };
        let left = left.and_then(|index| self.materialize(index));
        let right = right.and_then(|index| self.materialize(index));
        self.left_face = left;
        self.right_face = right;
        #[cfg(feature = "tracing")]
        tracing::trace!(
            ?direction,
            left = ?self.left_face,
            right = ?self.right_face,
            "resolved cube faces"
        );
    }

    /// Ensures page `index` is cached for a face slot, returning it if it is a real page.
    ///
    /// Indices past the end and a missing provider yield `None`; the provider
    /// is never asked for a page it does not have.
    fn materialize(&mut self, index: usize) -> Option<usize> {
        if index >= self.page_count() || self.provider.is_none() {
            return None;
        }
        if !self.cache.contains(index) {
            self.fresh_pages.push(index);
        }
        self.load_page(index);
        Some(index)
    }

    fn load_page(&mut self, index: usize) {
        if index >= self.page_count() {
            return;
        }
        let frame = self.page_frame(index);
        let Some(provider) = self.provider.as_mut() else {
            return;
        };
        let compositor = &mut self.compositor;
        self.cache.get_or_insert_with(index, |index| {
            let view = provider.page_view(index);
            compositor.attach(index, &view, frame);
            view
        });
    }

    fn render(&mut self, translation_x: f64) {
        match cube_faces(
            translation_x,
            self.config.page_width(),
            self.config.max_angle,
        ) {
            Some(faces) => {
                self.faces = faces;
                self.apply_faces();
            }
            None => self.reset_faces(),
        }
    }

    /// Returns both faces to the identity transform. Calling it again changes nothing.
    pub fn reset_faces(&mut self) {
        self.faces = CubeFaces::IDENTITY;
        self.apply_faces();
    }

    fn apply_faces(&mut self) {
        let slots = [
            (self.left_face, self.faces.left),
            (self.right_face, self.faces.right),
        ];
        for (slot, transform) in slots {
            let Some(index) = slot else { continue };
            if let Some(view) = self.cache.get(index) {
                self.compositor.set_face_transform(index, view, &transform);
            }
        }
    }
}

fn page_frame(index: usize, size: Size) -> Rect {
    Rect::from_origin_size(Point::new(index as f64 * size.width, 0.0), size)
}
