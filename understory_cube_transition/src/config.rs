// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engine configuration and its validation.

use core::f64::consts::{FRAC_PI_2, FRAC_PI_3};
use core::time::Duration;

use kurbo::Size;

/// Default duration of both the page-flip and the spring-back animations.
pub const DEFAULT_SETTLE_DURATION: Duration = Duration::from_millis(250);

/// Horizontal speed (units per second) above which a `Changed` sample
/// re-resolves the cube faces.
///
/// A rapid re-swipe that starts while the previous settle is still running
/// loses its `Began` sample; fast samples stand in for it.
pub const FAST_SWIPE_SPEED: f64 = 500.0;

/// Default dihedral angle between the two faces.
pub const MAX_ROTATION_ANGLE: f64 = FRAC_PI_3;

/// Configuration for a [`CubeTransition`](crate::CubeTransition).
///
/// Every field has a default except `page_size`, which must be set to the
/// size of one page: the default of zero fails [`validate`](Self::validate).
///
/// ```
/// use kurbo::Size;
/// use understory_cube_transition::CubeTransitionConfig;
///
/// let config = CubeTransitionConfig::with_page_size(Size::new(300.0, 500.0));
/// assert!(config.validate().is_ok());
/// assert_eq!(config.distance_threshold(), 150.0);
/// assert_eq!(config.speed_threshold(), 300.0);
///
/// assert!(CubeTransitionConfig::default().validate().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubeTransitionConfig {
    /// Size of a single page. The width is the cube's edge length.
    pub page_size: Size,
    /// Number of pages retained in the cache on each side of the current page.
    pub offset_cached_pages: usize,
    /// Duration of the animation that completes a committed page change.
    pub flip_duration: Duration,
    /// Duration of the animation that springs back after a cancelled drag.
    pub reset_duration: Duration,
    /// Horizontal distance past which a release commits. `None` means half the page width.
    pub distance_threshold: Option<f64>,
    /// Horizontal release speed past which a release commits. `None` means one page width per second.
    pub speed_threshold: Option<f64>,
    /// See [`FAST_SWIPE_SPEED`].
    pub fast_swipe_speed: f64,
    /// Dihedral angle between the two faces, in radians.
    pub max_angle: f64,
    /// Eye distance of the perspective projection. `None` means twice the page width.
    pub perspective_distance: Option<f64>,
}

impl Default for CubeTransitionConfig {
    fn default() -> Self {
        Self {
            page_size: Size::ZERO,
            offset_cached_pages: 1,
            flip_duration: DEFAULT_SETTLE_DURATION,
            reset_duration: DEFAULT_SETTLE_DURATION,
            distance_threshold: None,
            speed_threshold: None,
            fast_swipe_speed: FAST_SWIPE_SPEED,
            max_angle: MAX_ROTATION_ANGLE,
            perspective_distance: None,
        }
    }
}

impl CubeTransitionConfig {
    /// Default configuration for pages of the given size.
    #[must_use]
    pub fn with_page_size(page_size: Size) -> Self {
        Self {
            page_size,
            ..Self::default()
        }
    }

    /// Page width; the cube's edge length.
    #[must_use]
    pub fn page_width(&self) -> f64 {
        self.page_size.width
    }

    /// Effective commit distance threshold.
    #[must_use]
    pub fn distance_threshold(&self) -> f64 {
        self.distance_threshold.unwrap_or(self.page_size.width / 2.0)
    }

    /// Effective commit speed threshold.
    #[must_use]
    pub fn speed_threshold(&self) -> f64 {
        self.speed_threshold.unwrap_or(self.page_size.width)
    }

    /// Effective perspective eye distance.
    #[must_use]
    pub fn perspective_distance(&self) -> f64 {
        self.perspective_distance.unwrap_or(self.page_size.width * 2.0)
    }

    /// Checks the preconditions the engine relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Size { width, height } = self.page_size;
        if !width.is_finite() || width <= 0.0 {
            return Err(ConfigError::InvalidPageWidth(width));
        }
        if !height.is_finite() || height < 0.0 {
            return Err(ConfigError::InvalidPageHeight(height));
        }
        check_threshold("distance threshold", self.distance_threshold())?;
        check_threshold("speed threshold", self.speed_threshold())?;
        check_threshold("fast swipe speed", self.fast_swipe_speed)?;
        if !(self.max_angle > 0.0 && self.max_angle <= FRAC_PI_2) {
            return Err(ConfigError::InvalidMaxAngle(self.max_angle));
        }
        let distance = self.perspective_distance();
        if !distance.is_finite() || distance <= 0.0 {
            return Err(ConfigError::InvalidPerspectiveDistance(distance));
        }
        Ok(())
    }
}

pub(crate) fn check_threshold(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidThreshold { name, value })
    }
}

/// A configuration that violates an engine precondition.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The page width is zero, negative, or not finite.
    #[error("page width must be finite and greater than zero, got {0}")]
    InvalidPageWidth(f64),
    /// The page height is negative or not finite.
    #[error("page height must be finite and non-negative, got {0}")]
    InvalidPageHeight(f64),
    /// A distance or speed threshold is negative or not finite.
    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidThreshold {
        /// Which threshold was rejected.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// The face angle is outside `(0, π/2]`.
    #[error("maximum face angle must lie in (0, pi/2], got {0}")]
    InvalidMaxAngle(f64),
    /// The perspective eye distance is zero, negative, or not finite.
    #[error("perspective distance must be finite and greater than zero, got {0}")]
    InvalidPerspectiveDistance(f64),
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, CubeTransitionConfig};
    use kurbo::Size;

    #[test]
    fn defaults_derive_from_page_width() {
        let config = CubeTransitionConfig::with_page_size(Size::new(320.0, 480.0));
        assert_eq!(config.offset_cached_pages, 1);
        assert_eq!(config.distance_threshold(), 160.0);
        assert_eq!(config.speed_threshold(), 320.0);
        assert_eq!(config.perspective_distance(), 640.0);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn explicit_thresholds_override_defaults() {
        let config = CubeTransitionConfig {
            distance_threshold: Some(40.0),
            speed_threshold: Some(1000.0),
            ..CubeTransitionConfig::with_page_size(Size::new(320.0, 480.0))
        };
        assert_eq!(config.distance_threshold(), 40.0);
        assert_eq!(config.speed_threshold(), 1000.0);
    }

    #[test]
    fn zero_width_is_rejected() {
        assert_eq!(
            CubeTransitionConfig::default().validate(),
            Err(ConfigError::InvalidPageWidth(0.0))
        );
        let nan = CubeTransitionConfig::with_page_size(Size::new(f64::NAN, 10.0));
        assert!(matches!(
            nan.validate(),
            Err(ConfigError::InvalidPageWidth(_))
        ));
    }

    #[test]
    fn bad_thresholds_and_angles_are_rejected() {
        let base = CubeTransitionConfig::with_page_size(Size::new(300.0, 300.0));
        let negative = CubeTransitionConfig {
            distance_threshold: Some(-1.0),
            ..base
        };
        assert_eq!(
            negative.validate(),
            Err(ConfigError::InvalidThreshold {
                name: "distance threshold",
                value: -1.0
            })
        );
        let flat = CubeTransitionConfig {
            max_angle: 0.0,
            ..base
        };
        assert_eq!(flat.validate(), Err(ConfigError::InvalidMaxAngle(0.0)));
        let squashed = CubeTransitionConfig {
            page_size: Size::new(300.0, -1.0),
            ..base
        };
        assert_eq!(
            squashed.validate(),
            Err(ConfigError::InvalidPageHeight(-1.0))
        );
        let eye = CubeTransitionConfig {
            perspective_distance: Some(0.0),
            ..base
        };
        assert_eq!(
            eye.validate(),
            Err(ConfigError::InvalidPerspectiveDistance(0.0))
        );
    }
}
