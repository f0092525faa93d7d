// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_cube_transition --heading-base-level=0

//! Understory Cube Transition: a gesture-driven cube page-flip engine.
//!
//! Adjacent pages are shown as two faces of a rotating cube. While the finger
//! is down the cube follows it exactly; when the finger lifts, a short linear
//! animation either completes the page change or springs back.
//!
//! ## Overview
//!
//! - [`Direction::classify`] turns a cumulative drag vector into a discrete
//!   [`Direction`]. Only drags within 45° of horizontal move the cube.
//! - [`cube_faces`] maps a horizontal offset to a [`FaceTransform`] for each
//!   of the two faces, keeping their dihedral angle fixed.
//! - [`CubeTransition`] is the state machine (idle → tracking → settling). Feed
//!   it recognizer samples with [`CubeTransition::handle_pan`] and frame
//!   timestamps with [`CubeTransition::on_frame`].
//! - [`CommitPolicy`] decides whether a release commits: past half a page, or
//!   faster than a page per second, unless there is no page in that direction.
//! - [`Settle`] is the post-release linear ramp.
//! - Page views live in an [`understory_page_cache::PageCache`] that keeps a
//!   small window of neighbors around the current page.
//!
//! ## Host capabilities
//!
//! The engine does not recognize gestures, draw, or schedule frames. The host
//! supplies:
//!
//! - a [`PageProvider`] for page views and page-change notifications,
//! - a [`Compositor`] that places views and applies face transforms,
//! - a [`FrameClock`] the engine resumes while settling and pauses otherwise.
//!
//! ## Minimal example
//!
//! ```rust
//! use core::time::Duration;
//! use kurbo::{Point, Rect, Size, Vec2};
//! use understory_cube_transition::{
//!     Compositor, CubeTransition, CubeTransitionConfig, Direction, FaceTransform, FrameOutcome,
//!     GestureSample, ManualClock, PageProvider,
//! };
//!
//! struct Book {
//!     pages: usize,
//!     turned_to: Option<usize>,
//! }
//!
//! impl PageProvider for Book {
//!     type View = String;
//!     fn page_view(&mut self, index: usize) -> String {
//!         format!("page {index}")
//!     }
//!     fn number_of_pages(&self) -> usize {
//!         self.pages
//!     }
//!     fn page_did_change(&mut self, index: usize, _direction: Direction) {
//!         self.turned_to = Some(index);
//!     }
//! }
//!
//! struct Headless;
//!
//! impl Compositor<String> for Headless {
//!     fn attach(&mut self, _index: usize, _view: &String, _frame: Rect) {}
//!     fn detach(&mut self, _index: usize, _view: String) {}
//!     fn set_face_transform(&mut self, _index: usize, _view: &String, _t: &FaceTransform) {}
//!     fn set_origin(&mut self, _origin: Point) {}
//! }
//!
//! let config = CubeTransitionConfig::with_page_size(Size::new(300.0, 500.0));
//! let mut cube = CubeTransition::new(config, Headless, ManualClock::new())
//!     .unwrap()
//!     .with_provider(Book { pages: 3, turned_to: None });
//! cube.reload_data();
//!
//! // Drag two thirds of a page towards the left and let go.
//! cube.handle_pan(GestureSample::began(Vec2::ZERO));
//! cube.handle_pan(GestureSample::changed(Vec2::new(-200.0, 0.0), Vec2::ZERO));
//! cube.handle_pan(GestureSample::ended(Vec2::new(-200.0, 0.0), Vec2::ZERO));
//! assert!(cube.clock().is_running());
//!
//! // Tick until the animation settles.
//! let mut outcome = FrameOutcome::Idle;
//! while cube.clock().is_running() {
//!     let now = cube.clock_mut().advance(Duration::from_millis(16));
//!     outcome = cube.on_frame(now);
//! }
//! assert_eq!(outcome, FrameOutcome::Settled { committed: Some(1) });
//! assert_eq!(cube.current_index(), 1);
//! assert_eq!(cube.provider().unwrap().turned_to, Some(1));
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: `no_std` floating-point math through `kurbo`'s `libm` support.
//! - `tracing` (default): emits `tracing` events for release decisions,
//!   settling, face resolution, and cache eviction.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod direction;
mod engine;
mod gesture;
mod host;
mod timeline;
mod transform;

pub use config::{
    ConfigError, CubeTransitionConfig, DEFAULT_SETTLE_DURATION, FAST_SWIPE_SPEED,
    MAX_ROTATION_ANGLE,
};
pub use direction::Direction;
pub use engine::{CubeTransition, TransitionState};
pub use gesture::{CommitPolicy, GesturePhase, GestureSample, PanOutcome};
pub use host::{Compositor, FrameClock, ManualClock, PageProvider};
pub use timeline::{FrameOutcome, Settle};
pub use transform::{CubeFaces, FaceTransform, Transform3D, cube_faces};
