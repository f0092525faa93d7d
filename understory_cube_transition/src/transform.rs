// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! 3D transforms for the two cube faces.
//!
//! [`cube_faces`] maps a horizontal drag offset to a [`FaceTransform`] for each
//! of the two pages adjacent to the hinge. The two faces always meet at a fixed
//! dihedral angle (`max_angle`, π/3 by default), so the cube stays rigid no
//! matter where the finger is.
//!
//! [`Transform3D`] is a plain 4×4 matrix in the row-vector convention used by
//! Core Animation and CSS (`p' = p · M`, translation in the last row), which is
//! what most compositors accept directly.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

/// A 4×4 homogeneous transform, row-vector convention.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transform3D {
    m: [[f64; 4]; 4],
}

impl Transform3D {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        m: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Builds a transform from its rows.
    #[must_use]
    pub const fn from_rows(m: [[f64; 4]; 4]) -> Self {
        Self { m }
    }

    /// Returns the rows of the matrix.
    #[must_use]
    pub const fn rows(&self) -> [[f64; 4]; 4] {
        self.m
    }

    /// A translation by `(x, y, z)`.
    #[must_use]
    pub const fn translation(x: f64, y: f64, z: f64) -> Self {
        let mut t = Self::IDENTITY;
        t.m[3][0] = x;
        t.m[3][1] = y;
        t.m[3][2] = z;
        t
    }

    /// A rotation by `angle` radians about the vertical (y) axis.
    #[must_use]
    pub fn rotation_y(angle: f64) -> Self {
        let (s, c) = (angle.sin(), angle.cos());
        Self::from_rows([
            [c, 0.0, -s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// A perspective projection with the eye at `distance` in front of the `z = 0` plane.
    ///
    /// Intended as the sublayer transform of the container holding the faces.
    #[must_use]
    pub fn perspective(distance: f64) -> Self {
        let mut t = Self::IDENTITY;
        t.m[2][3] = -1.0 / distance;
        t
    }

    /// Composes two transforms: `self` is applied first, then `next`.
    #[must_use]
    pub fn then(&self, next: &Self) -> Self {
        let mut out = [[0.0; 4]; 4];
        for (row, out_row) in out.iter_mut().enumerate() {
            for (col, cell) in out_row.iter_mut().enumerate() {
                *cell = (0..4).map(|k| self.m[row][k] * next.m[k][col]).sum();
            }
        }
        Self { m: out }
    }

    /// Maps a point, including the perspective divide.
    #[must_use]
    pub fn transform_point(&self, p: [f64; 3]) -> [f64; 3] {
        let v = [p[0], p[1], p[2], 1.0];
        let mut out = [0.0; 4];
        for (col, cell) in out.iter_mut().enumerate() {
            *cell = (0..4).map(|k| v[k] * self.m[k][col]).sum();
        }
        let w = if out[3] == 0.0 { 1.0 } else { out[3] };
        [out[0] / w, out[1] / w, out[2] / w]
    }

    /// Returns `true` if this is exactly the identity.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Transform of a single cube face: a rotation by `angle` about the face's
/// vertical center line, followed by a translation of `(translate_x, 0, translate_z)`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FaceTransform {
    /// Horizontal translation.
    pub translate_x: f64,
    /// Depth translation (towards the viewer is positive).
    pub translate_z: f64,
    /// Rotation about the vertical axis, in radians.
    pub angle: f64,
}

impl FaceTransform {
    /// The resting transform.
    pub const IDENTITY: Self = Self {
        translate_x: 0.0,
        translate_z: 0.0,
        angle: 0.0,
    };

    /// Returns `true` for the resting transform.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// The 4×4 matrix for this face, in the face's center-anchored coordinates.
    ///
    /// With row vectors the rotation is applied first and the translation
    /// second. The face turns about its center line; the translation then
    /// carries its hinge-side edge back onto the edge shared with the other
    /// face.
    #[must_use]
    pub fn to_matrix(&self) -> Transform3D {
        Transform3D::rotation_y(self.angle).then(&Transform3D::translation(
            self.translate_x,
            0.0,
            self.translate_z,
        ))
    }
}

/// Transforms for the two faces adjacent to the cube's hinge.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct CubeFaces {
    /// The face on the lower-index side.
    pub left: FaceTransform,
    /// The face on the higher-index side.
    pub right: FaceTransform,
}

impl CubeFaces {
    /// Both faces at rest.
    pub const IDENTITY: Self = Self {
        left: FaceTransform::IDENTITY,
        right: FaceTransform::IDENTITY,
    };

    /// Returns `true` when both faces are at rest.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.left.is_identity() && self.right.is_identity()
    }
}

/// Computes the face transforms for a horizontal offset `tx` on pages `width` wide.
///
/// With `k = tx / width`:
/// - `tx > 0` reveals the left neighbor: the right face turns by `k·max_angle`
///   and the left face by that minus `max_angle`.
/// - `tx < 0` reveals the right neighbor: the left face turns by `k·max_angle`
///   and the right face by that plus `max_angle`.
///
/// The right angle always exceeds the left one by exactly `max_angle`. Each face
/// is pulled in by `width / 2 · (1 − cos θ)` towards the hinge and pushed in
/// depth by `width / 2 · sin θ`, keeping the shared edge attached.
///
/// Returns `None` when `tx` is zero (or NaN): both faces are at rest and the
/// caller resets them.
///
/// ```
/// use core::f64::consts::FRAC_PI_3;
/// use understory_cube_transition::cube_faces;
///
/// let faces = cube_faces(150.0, 300.0, FRAC_PI_3).unwrap();
/// assert!((faces.right.angle - faces.left.angle - FRAC_PI_3).abs() < 1e-12);
/// assert!(cube_faces(0.0, 300.0, FRAC_PI_3).is_none());
/// ```
#[must_use]
pub fn cube_faces(tx: f64, width: f64, max_angle: f64) -> Option<CubeFaces> {
    let k = tx / width;
    let (left_angle, right_angle) = if tx > 0.0 {
        let r2 = k * max_angle;
        (r2 - max_angle, r2)
    } else if tx < 0.0 {
        let r = k * max_angle;
        (r, max_angle + r)
    } else {
        return None;
    };
    let half = width / 2.0;
    Some(CubeFaces {
        left: FaceTransform {
            translate_x: tx + half * (1.0 - left_angle.cos()),
            translate_z: half * left_angle.sin(),
            angle: left_angle,
        },
        right: FaceTransform {
            translate_x: tx - half * (1.0 - right_angle.cos()),
            translate_z: -half * right_angle.sin(),
            angle: right_angle,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::{CubeFaces, FaceTransform, Transform3D, cube_faces};
    use core::f64::consts::{FRAC_PI_2, FRAC_PI_3};

    const EPS: f64 = 1e-9;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn half_page_drag_to_the_right() {
        // tx = W/2: right face at max/2, left face at -max/2.
        let faces = cube_faces(150.0, 300.0, FRAC_PI_3).unwrap();
        assert!(close(faces.right.angle, FRAC_PI_3 / 2.0));
        assert!(close(faces.left.angle, -FRAC_PI_3 / 2.0));
        let gap = 150.0 * (1.0 - (FRAC_PI_3 / 2.0).cos());
        assert!(close(faces.left.translate_x, 150.0 + gap));
        assert!(close(faces.right.translate_x, 150.0 - gap));
        // Left face swings away from the viewer, right face too (mirror image).
        assert!(faces.left.translate_z < 0.0);
        assert!(faces.right.translate_z < 0.0);
    }

    #[test]
    fn leftward_drag_mirrors_the_formulas() {
        let faces = cube_faces(-75.0, 300.0, FRAC_PI_3).unwrap();
        let r = -0.25 * FRAC_PI_3;
        assert!(close(faces.left.angle, r));
        assert!(close(faces.right.angle, FRAC_PI_3 + r));
        assert!(close(faces.left.translate_z, 150.0 * r.sin()));
        assert!(close(faces.right.translate_z, -150.0 * (FRAC_PI_3 + r).sin()));
    }

    #[test]
    fn full_page_drag_lands_flat() {
        // At tx = W the right face has turned fully away and the left face is flat.
        let faces = cube_faces(300.0, 300.0, FRAC_PI_3).unwrap();
        assert!(close(faces.left.angle, 0.0));
        assert!(close(faces.left.translate_x, 300.0));
        assert!(close(faces.left.translate_z, 0.0));
        assert!(close(faces.right.angle, FRAC_PI_3));
    }

    #[test]
    fn zero_and_nan_offsets_have_no_faces() {
        assert_eq!(cube_faces(0.0, 300.0, FRAC_PI_3), None);
        assert_eq!(cube_faces(-0.0, 300.0, FRAC_PI_3), None);
        assert_eq!(cube_faces(f64::NAN, 300.0, FRAC_PI_3), None);
        assert!(CubeFaces::IDENTITY.is_identity());
        assert!(CubeFaces::default().is_identity());
    }

    #[test]
    fn face_matrix_translates_after_rotating() {
        let face = FaceTransform {
            translate_x: 10.0,
            translate_z: -5.0,
            angle: FRAC_PI_2,
        };
        // A point on the face's x axis swings onto the z axis, then moves.
        let p = face.to_matrix().transform_point([1.0, 0.0, 0.0]);
        assert!(close(p[0], 10.0), "x was {}", p[0]);
        assert!(close(p[1], 0.0));
        assert!(close(p[2], -6.0), "z was {}", p[2]);
        assert!(FaceTransform::IDENTITY.to_matrix().is_identity());
    }

    #[test]
    fn hinge_edge_stays_joined() {
        // Faces are anchored at their centers; the right face's center sits one
        // page to the right of the left face's.
        let width = 300.0;
        for tx in [-250.0, -100.0, -1.0, 1.0, 100.0, 250.0] {
            let faces = cube_faces(tx, width, FRAC_PI_3).unwrap();
            let left_edge = faces.left.to_matrix().transform_point([width / 2.0, 0.0, 0.0]);
            let right_edge = faces.right.to_matrix().transform_point([-width / 2.0, 0.0, 0.0]);
            assert!(close(left_edge[0], right_edge[0] + width), "tx {tx}: x apart");
            assert!(close(left_edge[2], right_edge[2]), "tx {tx}: z apart");
            // The hinge follows the finger and stays in the page plane.
            assert!(close(left_edge[0], width / 2.0 + tx));
            assert!(close(left_edge[2], 0.0));
        }
    }

    #[test]
    fn perspective_shrinks_receding_points() {
        let persp = Transform3D::perspective(600.0);
        assert!(close(persp.rows()[2][3], -1.0 / 600.0));
        let near = persp.transform_point([100.0, 0.0, 0.0]);
        let far = persp.transform_point([100.0, 0.0, -300.0]);
        assert!(close(near[0], 100.0));
        assert!(far[0] < near[0]);
        assert_eq!(Transform3D::default(), Transform3D::IDENTITY);
        assert_eq!(
            Transform3D::translation(1.0, 2.0, 3.0).then(&Transform3D::IDENTITY),
            Transform3D::translation(1.0, 2.0, 3.0)
        );
    }
}
