// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless cube page flipping: scripted drags against a printing compositor.
//!
//! This example shows how a host wires up `understory_cube_transition`:
//! - a `PageProvider` that builds page views on demand,
//! - a `Compositor` that here just prints what it would place on screen,
//! - a `ManualClock` standing in for the display link.
//!
//! Engine events go through `tracing`; raise the filter to see release
//! decisions and evictions.
//!
//! Run:
//! - `cargo run -p understory_demos --example cube_swipe`
//! - `RUST_LOG=understory_cube_transition=trace cargo run -p understory_demos --example cube_swipe`

use std::time::Duration;

use kurbo::{Point, Rect, Size, Vec2};
use tracing::Level;
use tracing_subscriber::EnvFilter;
use understory_cube_transition::{
    Compositor, CubeTransition, CubeTransitionConfig, Direction, FaceTransform, FrameOutcome,
    GestureSample, ManualClock, PageProvider,
};

/// Pages are just titled cards.
#[derive(Debug)]
struct Card {
    title: String,
}

struct Deck {
    titles: Vec<&'static str>,
}

impl PageProvider for Deck {
    type View = Card;

    fn page_view(&mut self, index: usize) -> Card {
        Card {
            title: self.titles[index].to_string(),
        }
    }

    fn number_of_pages(&self) -> usize {
        self.titles.len()
    }

    fn page_did_change(&mut self, index: usize, direction: Direction) {
        tracing::info!(index, ?direction, title = self.titles[index], "page changed");
    }
}

/// Prints placement changes and counts per-frame transform updates.
#[derive(Default)]
struct Printer {
    transform_updates: usize,
}

impl Compositor<Card> for Printer {
    fn attach(&mut self, index: usize, view: &Card, frame: Rect) {
        println!("  attach  #{index} {:?} at x={}", view.title, frame.x0);
    }

    fn detach(&mut self, index: usize, view: Card) {
        println!("  detach  #{index} {:?}", view.title);
    }

    fn set_face_transform(&mut self, _index: usize, _view: &Card, _transform: &FaceTransform) {
        self.transform_updates += 1;
    }

    fn set_origin(&mut self, origin: Point) {
        println!("  origin  -> x={}", origin.x);
    }
}

type Engine = CubeTransition<Deck, Printer, ManualClock>;

/// Drags horizontally to `dx` in a few steps, releases at `vx`, and runs the settle at 60 Hz.
fn drag(cube: &mut Engine, label: &str, dx: f64, vx: f64) {
    println!("{label}: drag to {dx}, release at {vx}/s");
    cube.handle_pan(GestureSample::began(Vec2::ZERO));
    for step in 1..=4 {
        let x = dx * f64::from(step) / 4.0;
        cube.handle_pan(GestureSample::changed(Vec2::new(x, 0.0), Vec2::ZERO));
    }
    let released = cube.handle_pan(GestureSample::ended(Vec2::new(dx, 0.0), Vec2::new(vx, 0.0)));
    println!("  {released:?}");

    let mut frames = 0;
    while cube.clock().is_running() {
        let now = cube.clock_mut().advance(Duration::from_micros(16_667));
        frames += 1;
        if let FrameOutcome::Settled { committed } = cube.on_frame(now) {
            println!(
                "  settled after {frames} frames on page {} (committed: {committed:?})",
                cube.current_index()
            );
        }
    }
    let window = cube.cache().window(cube.current_index(), cube.page_count());
    println!(
        "  cached pages: {:?} (window {window:?}), transform updates so far: {}",
        cube.cache().indices(),
        cube.compositor().transform_updates
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(Level::INFO.into()),
        )
        .init();

    let config = CubeTransitionConfig::with_page_size(Size::new(320.0, 480.0));
    let deck = Deck {
        titles: vec!["Cover", "Contents", "Chapter 1", "Chapter 2", "Chapter 3", "Index"],
    };
    let mut cube = CubeTransition::new(config, Printer::default(), ManualClock::new())?
        .with_provider(deck);
    cube.reload_data();

    // Forward three pages, past half a page each time.
    for _ in 0..3 {
        drag(&mut cube, "flip forward", -200.0, 0.0);
    }
    // Too short and too slow: springs back.
    drag(&mut cube, "nudge", -60.0, -100.0);
    // Short but fast: still commits.
    drag(&mut cube, "flick back", 40.0, 900.0);
    // A vertical drag never moves the cube.
    cube.handle_pan(GestureSample::began(Vec2::ZERO));
    let inert = cube.handle_pan(GestureSample::ended(Vec2::new(5.0, 120.0), Vec2::ZERO));
    println!("vertical drag: {inert:?}");

    println!("final page: {}", cube.current_index());
    Ok(())
}
