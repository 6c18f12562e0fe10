// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use core::fmt;
use core::ops::Mul;

use crate::error::MathError;
use crate::math::mat3::rodrigues_rows;
use crate::math::{DFix128, Mat3, Quat, Tolerance, Vec3, Vec4};

/// Row-major 4×4 matrix of Q64.64 scalars.
///
/// - Vectors are rows and transform as `v * M`; the translation lives in the
///   fourth row (`M41 M42 M43`).
/// - Projection and view factories are right-handed: the camera looks down
///   negative Z.
/// - Nothing requires the matrix to be affine; [`Mat4::invert_rigid`] is
///   only valid for rotation plus translation.
///
/// # Examples
/// ```
/// use detmath_core::math::{Mat4, Vec3, Vec4};
/// let t = Mat4::create_translation(&Vec3::from_ints(5, -3, 2));
/// let p = t.transform_point(&Vec3::from_ints(2, 4, -1));
/// assert_eq!(p, Vec4::from_ints(7, 1, 1, 1));
/// ```
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mat4 {
    rows: [Vec4; 4],
}

impl Mat4 {
    /// The identity matrix.
    pub const IDENTITY: Self =
        Self::from_rows(Vec4::UNIT_X, Vec4::UNIT_Y, Vec4::UNIT_Z, Vec4::UNIT_W);

    /// The all-zero matrix.
    pub const ZERO: Self = Self::from_rows(Vec4::ZERO, Vec4::ZERO, Vec4::ZERO, Vec4::ZERO);

    /// Builds a matrix from its four rows.
    pub const fn from_rows(r1: Vec4, r2: Vec4, r3: Vec4, r4: Vec4) -> Self {
        Self {
            rows: [r1, r2, r3, r4],
        }
    }

    /// Row `index` (zero-based). Panics when `index > 3`.
    pub const fn row(&self, index: usize) -> Vec4 {
        self.rows[index]
    }

    /// Rows as nested arrays, `[row][column]`.
    pub const fn to_array(self) -> [[DFix128; 4]; 4] {
        [
            self.rows[0].to_array(),
            self.rows[1].to_array(),
            self.rows[2].to_array(),
            self.rows[3].to_array(),
        ]
    }

    /// Element at `(row, column)`, zero-based. Panics when out of range.
    pub fn at(&self, row: usize, column: usize) -> DFix128 {
        self.rows[row].component(column)
    }

    fn map_rows(&self, f: impl Fn(&Vec4) -> Vec4) -> Self {
        Self::from_rows(
            f(&self.rows[0]),
            f(&self.rows[1]),
            f(&self.rows[2]),
            f(&self.rows[3]),
        )
    }

    /// Embeds a 3×3 block with translation `translation` and `M44 = 1`.
    fn from_block(block: &Mat3, translation: &Vec3) -> Self {
        let zero = DFix128::ZERO;
        Self::from_rows(
            block.row_x().extend(zero),
            block.row_y().extend(zero),
            block.row_z().extend(zero),
            translation.extend(DFix128::ONE),
        )
    }

    /// Scales every element.
    pub fn scale(&self, scalar: DFix128) -> Self {
        self.map_rows(|r| r.scale(scalar))
    }

    /// Row-vector product `self * other`.
    ///
    /// Row `i` of the result is `Σ_k self[i][k] * other.row[k]`, so
    /// `v * (A * B) == (v * A) * B`.
    pub fn multiply(&self, other: &Self) -> Self {
        self.map_rows(|r| other.transform(r))
    }

    /// Swaps the off-diagonal pairs.
    pub fn transpose(&self) -> Self {
        let [a, b, c, d] = self.to_array();
        let column = |i: usize| Vec4::new(a[i], b[i], c[i], d[i]);
        Self::from_rows(column(0), column(1), column(2), column(3))
    }

    /// Determinant by cofactor expansion along the first row.
    ///
    /// The six 2×2 minors of the bottom two rows are shared between the
    /// four 3×3 cofactors.
    pub fn determinant(&self) -> DFix128 {
        let [[m11, m12, m13, m14], [m21, m22, m23, m24], [m31, m32, m33, m34], [m41, m42, m43, m44]] =
            self.to_array();
        let det1 = m33 * m44 - m34 * m43;
        let det2 = m32 * m44 - m34 * m42;
        let det3 = m32 * m43 - m33 * m42;
        let det4 = m31 * m44 - m34 * m41;
        let det5 = m31 * m43 - m33 * m41;
        let det6 = m31 * m42 - m32 * m41;
        m11 * ((m22 * det1 - m23 * det2) + m24 * det3)
            - m12 * ((m21 * det1 - m23 * det4) + m24 * det5)
            + m13 * ((m21 * det2 - m22 * det4) + m24 * det6)
            - m14 * ((m21 * det3 - m22 * det5) + m23 * det6)
    }

    /// General inverse: every adjugate entry divided by the determinant.
    ///
    /// Expensive; prefer [`Mat4::invert_rigid`] for rotation plus translation.
    /// Fails with [`MathError::InvalidOperation`] when the determinant is
    /// exactly zero. Near-singular input is not detected.
    pub fn invert(&self) -> Result<Self, MathError> {
        let [[m11, m12, m13, m14], [m21, m22, m23, m24], [m31, m32, m33, m34], [m41, m42, m43, m44]] =
            self.to_array();

        // 2×2 minors of the top two rows (s) and bottom two rows (c).
        let s0 = m11 * m22 - m21 * m12;
        let s1 = m11 * m23 - m21 * m13;
        let s2 = m11 * m24 - m21 * m14;
        let s3 = m12 * m23 - m22 * m13;
        let s4 = m12 * m24 - m22 * m14;
        let s5 = m13 * m24 - m23 * m14;

        let c5 = m33 * m44 - m43 * m34;
        let c4 = m32 * m44 - m42 * m34;
        let c3 = m32 * m43 - m42 * m33;
        let c2 = m31 * m44 - m41 * m34;
        let c1 = m31 * m43 - m41 * m33;
        let c0 = m31 * m42 - m41 * m32;

        let det = s0 * c5 - s1 * c4 + s2 * c3 + s3 * c2 - s4 * c1 + s5 * c0;
        if det.is_zero() {
            return Err(MathError::invalid_operation(
                "Mat4::invert",
                "singular matrix",
            ));
        }
        let adjugate = Self::from_rows(
            Vec4::new(
                m22 * c5 - m23 * c4 + m24 * c3,
                -m12 * c5 + m13 * c4 - m14 * c3,
                m42 * s5 - m43 * s4 + m44 * s3,
                -m32 * s5 + m33 * s4 - m34 * s3,
            ),
            Vec4::new(
                -m21 * c5 + m23 * c2 - m24 * c1,
                m11 * c5 - m13 * c2 + m14 * c1,
                -m41 * s5 + m43 * s2 - m44 * s1,
                m31 * s5 - m33 * s2 + m34 * s1,
            ),
            Vec4::new(
                m21 * c4 - m22 * c2 + m24 * c0,
                -m11 * c4 + m12 * c2 - m14 * c0,
                m41 * s4 - m42 * s2 + m44 * s0,
                -m31 * s4 + m32 * s2 - m34 * s0,
            ),
            Vec4::new(
                -m21 * c3 + m22 * c1 - m23 * c0,
                m11 * c3 - m12 * c1 + m13 * c0,
                -m41 * s3 + m42 * s1 - m43 * s0,
                m31 * s3 - m32 * s1 + m33 * s0,
            ),
        );
        let [r1, r2, r3, r4] = adjugate.rows;
        Ok(Self::from_rows(
            r1.div_scalar(det)?,
            r2.div_scalar(det)?,
            r3.div_scalar(det)?,
            r4.div_scalar(det)?,
        ))
    }

    /// Inverse of a rotation plus translation.
    ///
    /// Transposes the upper 3×3 block and rotates the negated translation
    /// into it. Wrong for matrices carrying scale, shear or projection.
    pub fn invert_rigid(&self) -> Self {
        let rotation = Mat3::from_mat4(self).transpose();
        let translation = rotation.transform(&self.translation()).negate();
        Self::from_block(&rotation, &translation)
    }

    /// Rotation of `angle` radians about a unit `axis` (Rodrigues).
    ///
    /// The axis is not normalized here.
    pub fn create_from_axis_angle(axis: &Vec3, angle: DFix128) -> Self {
        let [x, y, z] = rodrigues_rows(axis, angle);
        Self::from_block(&Mat3::from_rows(x, y, z), &Vec3::ZERO)
    }

    /// Rotation matrix for a (unit) quaternion.
    pub fn create_from_quaternion(q: &Quat) -> Self {
        q.to_mat4()
    }

    /// Rotation from yaw (about Y), pitch (about X) and roll (about Z).
    pub fn create_from_yaw_pitch_roll(yaw: DFix128, pitch: DFix128, roll: DFix128) -> Self {
        Quat::from_yaw_pitch_roll(yaw, pitch, roll).to_mat4()
    }

    /// Translation by `translation`.
    pub fn create_translation(translation: &Vec3) -> Self {
        Self::from_block(&Mat3::IDENTITY, translation)
    }

    /// Non-uniform scale along the axes.
    pub fn create_scale(scale: &Vec3) -> Self {
        Self::from_block(&Mat3::from_scale(scale), &Vec3::ZERO)
    }

    /// Right-handed orthographic projection of the given view volume.
    ///
    /// Fails with [`MathError::DivideByZero`] for a degenerate volume.
    pub fn create_orthographic_rh(
        left: DFix128,
        right: DFix128,
        bottom: DFix128,
        top: DFix128,
        z_near: DFix128,
        z_far: DFix128,
    ) -> Result<Self, MathError> {
        let zero = DFix128::ZERO;
        let width = right - left;
        let height = top - bottom;
        let depth = z_far - z_near;
        Ok(Self::from_rows(
            Vec4::new(DFix128::TWO.try_div(width)?, zero, zero, zero),
            Vec4::new(zero, DFix128::TWO.try_div(height)?, zero, zero),
            Vec4::new(zero, zero, DFix128::NEG_ONE.try_div(depth)?, zero),
            Vec4::new(
                (left + right).try_div(-width)?,
                (top + bottom).try_div(-height)?,
                z_near.try_div(-depth)?,
                DFix128::ONE,
            ),
        ))
    }

    /// Right-handed perspective projection from a vertical field of view.
    ///
    /// Points on the near plane map to depth 0 with `w` equal to their view
    /// distance. Fails when `tan(fov / 2)` is undefined or zero, or when
    /// `aspect_ratio` is zero or `near == far`.
    pub fn create_perspective_fov_rh(
        field_of_view: DFix128,
        aspect_ratio: DFix128,
        near_clip: DFix128,
        far_clip: DFix128,
    ) -> Result<Self, MathError> {
        let zero = DFix128::ZERO;
        let h = (field_of_view / DFix128::TWO).tan()?.recip()?;
        let w = h.try_div(aspect_ratio)?;
        let m33 = far_clip.try_div(near_clip - far_clip)?;
        Ok(Self::from_rows(
            Vec4::new(w, zero, zero, zero),
            Vec4::new(zero, h, zero, zero),
            Vec4::new(zero, zero, m33, DFix128::NEG_ONE),
            Vec4::new(zero, zero, near_clip * m33, zero),
        ))
    }

    /// Right-handed view matrix for a camera at `position` looking along
    /// `forward`.
    ///
    /// Fails when `forward` is zero or parallel to `up`.
    pub fn create_view_rh(position: &Vec3, forward: &Vec3, up: &Vec3) -> Result<Self, MathError> {
        let (x, y, z) = camera_basis(forward, up)?;
        let zero = DFix128::ZERO;
        Ok(Self::from_rows(
            Vec4::new(x.x(), y.x(), z.x(), zero),
            Vec4::new(x.y(), y.y(), z.y(), zero),
            Vec4::new(x.z(), y.z(), z.z(), zero),
            Vec4::new(
                -x.dot(position),
                -y.dot(position),
                -z.dot(position),
                DFix128::ONE,
            ),
        ))
    }

    /// Right-handed view matrix for a camera at `position` looking at
    /// `target`.
    pub fn create_look_at_rh(position: &Vec3, target: &Vec3, up: &Vec3) -> Result<Self, MathError> {
        Self::create_view_rh(position, &target.sub(position), up)
    }

    /// Right-handed world matrix placing an object at `position` facing
    /// `forward`. The inverse of the matching view matrix.
    pub fn create_world_rh(position: &Vec3, forward: &Vec3, up: &Vec3) -> Result<Self, MathError> {
        let (x, y, z) = camera_basis(forward, up)?;
        Ok(Self::from_block(&Mat3::from_rows(x, y, z), position))
    }

    /// Full homogeneous transform `v * M`.
    pub fn transform(&self, v: &Vec4) -> Vec4 {
        self.rows[0]
            .scale(v.x())
            .add(&self.rows[1].scale(v.y()))
            .add(&self.rows[2].scale(v.z()))
            .add(&self.rows[3].scale(v.w()))
    }

    /// Transform by the transpose, `v * Mᵀ`.
    pub fn transform_transpose(&self, v: &Vec4) -> Vec4 {
        Vec4::new(
            v.dot(&self.rows[0]),
            v.dot(&self.rows[1]),
            v.dot(&self.rows[2]),
            v.dot(&self.rows[3]),
        )
    }

    /// Transforms a point with implicit `w = 1`; translation applies.
    ///
    /// The homogeneous result is returned as-is, with no perspective divide.
    pub fn transform_point(&self, v: &Vec3) -> Vec4 {
        self.rows[0]
            .scale(v.x())
            .add(&self.rows[1].scale(v.y()))
            .add(&self.rows[2].scale(v.z()))
            .add(&self.rows[3])
    }

    /// [`Mat4::transform_point`] against the transpose.
    pub fn transform_point_transpose(&self, v: &Vec3) -> Vec4 {
        self.transform_transpose(&v.extend(DFix128::ONE))
    }

    /// Transforms a direction by the upper 3×3 block; translation is ignored.
    ///
    /// Uses the plain block, not its inverse transpose, so the result is only
    /// a correct normal for matrices without non-uniform scale or shear.
    pub fn transform_normal(&self, v: &Vec3) -> Vec3 {
        Mat3::from_mat4(self).transform(v)
    }

    /// [`Mat4::transform_normal`] against the transpose of the 3×3 block.
    pub fn transform_normal_transpose(&self, v: &Vec3) -> Vec3 {
        Mat3::from_mat4(self).transform_transpose(v)
    }

    /// Translation row (`M41 M42 M43`).
    pub fn translation(&self) -> Vec3 {
        self.rows[3].xyz()
    }

    /// First basis row (`M11 M12 M13`).
    pub fn right(&self) -> Vec3 {
        self.rows[0].xyz()
    }

    /// Negated first basis row.
    pub fn left(&self) -> Vec3 {
        self.right().negate()
    }

    /// Second basis row (`M21 M22 M23`).
    pub fn up(&self) -> Vec3 {
        self.rows[1].xyz()
    }

    /// Negated second basis row.
    pub fn down(&self) -> Vec3 {
        self.up().negate()
    }

    /// Third basis row (`M31 M32 M33`).
    pub fn backward(&self) -> Vec3 {
        self.rows[2].xyz()
    }

    /// Negated third basis row; right-handed forward.
    pub fn forward(&self) -> Vec3 {
        self.backward().negate()
    }

    fn with_row_xyz(&self, index: usize, v: &Vec3) -> Self {
        let mut rows = self.rows;
        rows[index] = v.extend(rows[index].w());
        Self { rows }
    }

    /// Copy with the translation row replaced; `M44` is kept.
    pub fn with_translation(&self, translation: &Vec3) -> Self {
        self.with_row_xyz(3, translation)
    }

    /// Copy with the first basis row set to `right`.
    pub fn with_right(&self, right: &Vec3) -> Self {
        self.with_row_xyz(0, right)
    }

    /// Copy with the first basis row set to `-left`.
    pub fn with_left(&self, left: &Vec3) -> Self {
        self.with_row_xyz(0, &left.negate())
    }

    /// Copy with the second basis row set to `up`.
    pub fn with_up(&self, up: &Vec3) -> Self {
        self.with_row_xyz(1, up)
    }

    /// Copy with the second basis row set to `-down`.
    pub fn with_down(&self, down: &Vec3) -> Self {
        self.with_row_xyz(1, &down.negate())
    }

    /// Copy with the third basis row set to `backward`.
    pub fn with_backward(&self, backward: &Vec3) -> Self {
        self.with_row_xyz(2, backward)
    }

    /// Copy with the third basis row set to `-forward`.
    pub fn with_forward(&self, forward: &Vec3) -> Self {
        self.with_row_xyz(2, &forward.negate())
    }

    /// Returns `true` when every element is within `tolerance`.
    pub fn approx_eq(&self, other: &Self, tolerance: Tolerance) -> bool {
        self.rows
            .iter()
            .zip(other.rows.iter())
            .all(|(a, b)| a.approx_eq(b, tolerance))
    }
}

/// Orthonormal `(x, y, z)` basis with `z` pointing away from `forward`.
fn camera_basis(forward: &Vec3, up: &Vec3) -> Result<(Vec3, Vec3, Vec3), MathError> {
    let length = forward.length()?;
    let z = forward.div_scalar(-length)?;
    let x = up.cross(&z).normalize()?;
    let y = z.cross(&x);
    Ok((x, y, z))
}

impl From<[[DFix128; 4]; 4]> for Mat4 {
    fn from(value: [[DFix128; 4]; 4]) -> Self {
        Self::from_rows(
            value[0].into(),
            value[1].into(),
            value[2].into(),
            value[3].into(),
        )
    }
}

impl Mul for Mat4 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl Mul<DFix128> for Mat4 {
    type Output = Self;
    fn mul(self, rhs: DFix128) -> Self {
        self.scale(rhs)
    }
}

impl Mul<Mat4> for Vec4 {
    type Output = Vec4;
    fn mul(self, rhs: Mat4) -> Vec4 {
        rhs.transform(&self)
    }
}

impl fmt::Display for Mat4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{}, {}, {}, {}}}",
            self.rows[0], self.rows[1], self.rows[2], self.rows[3]
        )
    }
}
