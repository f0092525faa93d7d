// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Classification of drag vectors into discrete directions.

use kurbo::Vec2;
use understory_page_cache::Travel;

/// Discrete direction of a drag, classified from its cumulative translation.
///
/// Only [`Direction::Left`] and [`Direction::Right`] drive the cube. The
/// vertical variants exist so that vertical drags are recognized and rejected
/// instead of being mistaken for weak horizontal ones.
///
/// The horizontal names follow the neighbor being revealed, not the finger:
/// a finger moving right (`dx > 0`) is [`Direction::Left`] because it brings in
/// the page to the left of the current one.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// No movement yet, or the drag returned exactly to its origin.
    #[default]
    Undetermined,
    /// Horizontal drag with `dx > 0`; reveals the previous page.
    Left,
    /// Horizontal drag with `dx < 0`; reveals the next page.
    Right,
    /// Vertical drag with `dy <= 0`.
    Up,
    /// Vertical drag with `dy > 0`.
    Down,
}

impl Direction {
    /// Classifies a cumulative drag translation.
    ///
    /// A drag is horizontal when its slope `dy / dx` lies strictly between
    /// `-1` and `1`, i.e. within 45° of the horizontal axis. A drag with
    /// `dx == 0` and `dy != 0` is vertical.
    ///
    /// ```
    /// use kurbo::Vec2;
    /// use understory_cube_transition::Direction;
    ///
    /// assert_eq!(Direction::classify(Vec2::ZERO), Direction::Undetermined);
    /// assert_eq!(Direction::classify(Vec2::new(30.0, 10.0)), Direction::Left);
    /// assert_eq!(Direction::classify(Vec2::new(-30.0, 10.0)), Direction::Right);
    /// // Exactly 45° is not horizontal.
    /// assert_eq!(Direction::classify(Vec2::new(10.0, 10.0)), Direction::Down);
    /// ```
    #[must_use]
    pub fn classify(translation: Vec2) -> Self {
        let Vec2 { x: dx, y: dy } = translation;
        if dx == 0.0 && dy == 0.0 {
            return Self::Undetermined;
        }
        let slope = if dx != 0.0 { dy / dx } else { f64::MAX };
        if slope > -1.0 && slope < 1.0 {
            if dx > 0.0 { Self::Left } else { Self::Right }
        } else if dy > 0.0 {
            Self::Down
        } else {
            Self::Up
        }
    }

    /// Returns `true` for the navigable directions, [`Left`](Self::Left) and [`Right`](Self::Right).
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// Which way the current page index moves when a drag in this direction commits.
    #[must_use]
    pub const fn travel(self) -> Option<Travel> {
        match self {
            Self::Left => Some(Travel::Backward),
            Self::Right => Some(Travel::Forward),
            Self::Undetermined | Self::Up | Self::Down => None,
        }
    }

    /// Page indices of the (left, right) cube faces for a drag from `current`.
    ///
    /// Either side is `None` when it would fall before page `0`. Non-horizontal
    /// directions have no faces.
    #[must_use]
    pub const fn face_indices(self, current: usize) -> Option<(Option<usize>, Option<usize>)> {
        match self {
            Self::Left => Some((current.checked_sub(1), Some(current))),
            Self::Right => Some((Some(current), current.checked_add(1))),
            Self::Undetermined | Self::Up | Self::Down => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Direction;
    use kurbo::Vec2;
    use understory_page_cache::Travel;

    #[test]
    fn shallow_drags_are_horizontal() {
        assert_eq!(Direction::classify(Vec2::new(10.0, 9.99)), Direction::Left);
        assert_eq!(Direction::classify(Vec2::new(10.0, -9.99)), Direction::Left);
        assert_eq!(Direction::classify(Vec2::new(-10.0, 9.99)), Direction::Right);
        assert_eq!(Direction::classify(Vec2::new(-0.5, 0.0)), Direction::Right);
    }

    #[test]
    fn steep_and_diagonal_drags_are_vertical() {
        // Slope of exactly +/-1 is the tie-break and belongs to vertical.
        assert_eq!(Direction::classify(Vec2::new(10.0, 10.0)), Direction::Down);
        assert_eq!(Direction::classify(Vec2::new(10.0, -10.0)), Direction::Up);
        assert_eq!(Direction::classify(Vec2::new(-10.0, 10.0)), Direction::Down);
        // Pure vertical movement has an infinite slope.
        assert_eq!(Direction::classify(Vec2::new(0.0, 3.0)), Direction::Down);
        assert_eq!(Direction::classify(Vec2::new(0.0, -3.0)), Direction::Up);
    }

    #[test]
    fn zero_translation_is_undetermined() {
        assert_eq!(Direction::classify(Vec2::ZERO), Direction::Undetermined);
        assert!(!Direction::Undetermined.is_horizontal());
        assert_eq!(Direction::Undetermined.travel(), None);
    }

    #[test]
    fn faces_and_travel_follow_the_revealed_neighbor() {
        assert_eq!(Direction::Left.travel(), Some(Travel::Backward));
        assert_eq!(Direction::Right.travel(), Some(Travel::Forward));
        assert_eq!(Direction::Left.face_indices(3), Some((Some(2), Some(3))));
        assert_eq!(Direction::Right.face_indices(3), Some((Some(3), Some(4))));
        assert_eq!(Direction::Left.face_indices(0), Some((None, Some(0))));
        assert_eq!(Direction::Up.face_indices(3), None);
    }
}
