// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording host fakes shared by the integration tests.

#![allow(
    dead_code,
    unreachable_pub,
    reason = "Shared by several test binaries that each use a subset."
)]

use std::collections::HashMap;
use std::time::Duration;

use kurbo::{Point, Rect, Size, Vec2};
use understory_cube_transition::{
    Compositor, CubeTransition, CubeTransitionConfig, Direction, FaceTransform, FrameOutcome,
    GestureSample, ManualClock, PageProvider, PanOutcome, Transform3D,
};

pub const WIDTH: f64 = 300.0;
pub const HEIGHT: f64 = 400.0;
pub const FRAME: Duration = Duration::from_millis(16);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageView {
    pub index: usize,
}

#[derive(Debug, Default)]
pub struct RecordingPages {
    pub count: usize,
    pub made: Vec<usize>,
    pub changes: Vec<(usize, Direction)>,
}

impl PageProvider for RecordingPages {
    type View = PageView;

    fn page_view(&mut self, index: usize) -> PageView {
        assert!(index < self.count, "asked for page {index} of {}", self.count);
        self.made.push(index);
        PageView { index }
    }

    fn number_of_pages(&self) -> usize {
        self.count
    }

    fn page_did_change(&mut self, index: usize, direction: Direction) {
        self.changes.push((index, direction));
    }
}

#[derive(Debug, Default)]
pub struct RecordingCompositor {
    pub attached: Vec<(usize, Rect)>,
    pub detached: Vec<usize>,
    /// Latest transform applied per page.
    pub transforms: HashMap<usize, FaceTransform>,
    pub transform_calls: usize,
    pub origin: Point,
    pub perspective: Option<Transform3D>,
}

impl Compositor<PageView> for RecordingCompositor {
    fn attach(&mut self, index: usize, view: &PageView, frame: Rect) {
        assert_eq!(view.index, index, "view attached under the wrong index");
        self.attached.push((index, frame));
    }

    fn detach(&mut self, index: usize, view: PageView) {
        assert_eq!(view.index, index, "view detached under the wrong index");
        self.detached.push(index);
    }

    fn set_face_transform(&mut self, index: usize, view: &PageView, transform: &FaceTransform) {
        assert_eq!(view.index, index, "transform applied to the wrong view");
        self.transforms.insert(index, *transform);
        self.transform_calls += 1;
    }

    fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    fn set_perspective(&mut self, perspective: &Transform3D) {
        self.perspective = Some(*perspective);
    }
}

pub type Engine = CubeTransition<RecordingPages, RecordingCompositor, ManualClock>;

pub fn config() -> CubeTransitionConfig {
    CubeTransitionConfig::with_page_size(Size::new(WIDTH, HEIGHT))
}

/// An engine over `count` pages with page 0 loaded.
pub fn engine(count: usize) -> Engine {
    engine_with(config(), count)
}

pub fn engine_with(config: CubeTransitionConfig, count: usize) -> Engine {
    let mut engine = CubeTransition::new(config, RecordingCompositor::default(), ManualClock::new())
        .expect("test config is valid")
        .with_provider(RecordingPages {
            count,
            ..RecordingPages::default()
        });
    engine.reload_data();
    engine
}

/// A full horizontal drag: begin at rest, move halfway, move to `dx`, release at `vx`.
pub fn swipe(engine: &mut Engine, dx: f64, vx: f64) -> PanOutcome {
    engine.handle_pan(GestureSample::began(Vec2::ZERO));
    engine.handle_pan(GestureSample::changed(Vec2::new(dx / 2.0, 0.0), Vec2::ZERO));
    engine.handle_pan(GestureSample::changed(Vec2::new(dx, 0.0), Vec2::ZERO));
    engine.handle_pan(GestureSample::ended(Vec2::new(dx, 0.0), Vec2::new(vx, 0.0)))
}

/// Ticks the clock one frame at a time until the settle animation ends.
pub fn run_to_rest(engine: &mut Engine) -> FrameOutcome {
    let mut outcome = FrameOutcome::Idle;
    for _ in 0..1000 {
        if !engine.clock().is_running() {
            break;
        }
        let now = engine.clock_mut().advance(FRAME);
        outcome = engine.on_frame(now);
    }
    assert!(!engine.clock().is_running(), "settle animation never ended");
    outcome
}

/// Swipes and settles; returns the committed page, if any.
pub fn flip(engine: &mut Engine, dx: f64) -> Option<usize> {
    swipe(engine, dx, 0.0);
    match run_to_rest(engine) {
        FrameOutcome::Settled { committed } => committed,
        other => panic!("expected a settled outcome, got {other:?}"),
    }
}
