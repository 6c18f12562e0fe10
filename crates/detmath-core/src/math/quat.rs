// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use core::fmt;
use core::ops::{Mul, Neg};

use crate::error::MathError;
use crate::math::{constants, length_of, normalized, DFix128, Mat3, Mat4, Tolerance, Vec3};

/// Quaternion stored as `(x, y, z, w)` with `w` the scalar part.
///
/// * All angles are expressed in radians.
/// * Only unit quaternions represent rotations. Normalization is the
///   caller's job except where a factory promises unit output for unit
///   input ([`Quat::from_axis_angle`], [`Quat::from_yaw_pitch_roll`]).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quat {
    data: [DFix128; 4],
}

impl Quat {
    /// The identity rotation `(0, 0, 0, 1)`.
    pub const IDENTITY: Self = Self::new(DFix128::ZERO, DFix128::ZERO, DFix128::ZERO, DFix128::ONE);

    /// Creates a quaternion from components.
    pub const fn new(x: DFix128, y: DFix128, z: DFix128, w: DFix128) -> Self {
        Self { data: [x, y, z, w] }
    }

    /// Returns the quaternion as `[x, y, z, w]`.
    pub const fn to_array(self) -> [DFix128; 4] {
        self.data
    }

    /// X component.
    pub const fn x(&self) -> DFix128 {
        self.data[0]
    }

    /// Y component.
    pub const fn y(&self) -> DFix128 {
        self.data[1]
    }

    /// Z component.
    pub const fn z(&self) -> DFix128 {
        self.data[2]
    }

    /// W (scalar) component.
    pub const fn w(&self) -> DFix128 {
        self.data[3]
    }

    /// Rotation of `angle` radians about `axis`.
    ///
    /// The axis must already be unit length; it is not normalized here.
    pub fn from_axis_angle(axis: &Vec3, angle: DFix128) -> Self {
        let (sin_half, cos_half) = (angle * DFix128::HALF).sin_cos();
        Self::new(
            axis.x() * sin_half,
            axis.y() * sin_half,
            axis.z() * sin_half,
            cos_half,
        )
    }

    /// Rotation from yaw (about Y), pitch (about X) and roll (about Z).
    pub fn from_yaw_pitch_roll(yaw: DFix128, pitch: DFix128, roll: DFix128) -> Self {
        let (sin_roll, cos_roll) = (roll * DFix128::HALF).sin_cos();
        let (sin_pitch, cos_pitch) = (pitch * DFix128::HALF).sin_cos();
        let (sin_yaw, cos_yaw) = (yaw * DFix128::HALF).sin_cos();

        let cos_yaw_cos_pitch = cos_yaw * cos_pitch;
        let cos_yaw_sin_pitch = cos_yaw * sin_pitch;
        let sin_yaw_cos_pitch = sin_yaw * cos_pitch;
        let sin_yaw_sin_pitch = sin_yaw * sin_pitch;

        Self::new(
            cos_yaw_sin_pitch * cos_roll + sin_yaw_cos_pitch * sin_roll,
            sin_yaw_cos_pitch * cos_roll - cos_yaw_sin_pitch * sin_roll,
            cos_yaw_cos_pitch * sin_roll - sin_yaw_sin_pitch * cos_roll,
            cos_yaw_cos_pitch * cos_roll + sin_yaw_sin_pitch * sin_roll,
        )
    }

    /// Rotation encoded by the rotation matrix `m`.
    ///
    /// Picks the numerically safest of four branches by trace and largest
    /// diagonal element. Fails with [`MathError::DomainError`] when `m` is
    /// far enough from a rotation that the branch radicand goes negative.
    pub fn from_rotation_matrix(m: &Mat3) -> Result<Self, MathError> {
        let [[m11, m12, m13], [m21, m22, m23], [m31, m32, m33]] = m.to_array();
        let one = DFix128::ONE;
        let four = DFix128::from_int(4);
        let trace = m11 + m22 + m33;

        if !trace.is_negative() {
            let s = (trace + one).sqrt()? * DFix128::TWO;
            Ok(Self::new(
                (m23 - m32).try_div(s)?,
                (m31 - m13).try_div(s)?,
                (m12 - m21).try_div(s)?,
                s / four,
            ))
        } else if m11 >= m22 && m11 >= m33 {
            let s = (one + m11 - m22 - m33).sqrt()? * DFix128::TWO;
            Ok(Self::new(
                s / four,
                (m12 + m21).try_div(s)?,
                (m13 + m31).try_div(s)?,
                (m23 - m32).try_div(s)?,
            ))
        } else if m22 > m33 {
            let s = (one + m22 - m11 - m33).sqrt()? * DFix128::TWO;
            Ok(Self::new(
                (m21 + m12).try_div(s)?,
                s / four,
                (m32 + m23).try_div(s)?,
                (m31 - m13).try_div(s)?,
            ))
        } else {
            let s = (one + m33 - m11 - m22).sqrt()? * DFix128::TWO;
            Ok(Self::new(
                (m31 + m13).try_div(s)?,
                (m32 + m23).try_div(s)?,
                s / four,
                (m12 - m21).try_div(s)?,
            ))
        }
    }

    /// Rotation encoded by the upper 3×3 block of `m`.
    pub fn from_mat4(m: &Mat4) -> Result<Self, MathError> {
        Self::from_rotation_matrix(&Mat3::from_mat4(m))
    }

    /// Component-wise sum.
    pub fn add(&self, other: &Self) -> Self {
        Self::new(
            self.x() + other.x(),
            self.y() + other.y(),
            self.z() + other.z(),
            self.w() + other.w(),
        )
    }

    /// Scales every component.
    pub fn scale(&self, scalar: DFix128) -> Self {
        Self {
            data: self.data.map(|c| c * scalar),
        }
    }

    /// Negates every component; the same orientation on the other hemisphere.
    pub fn negate(&self) -> Self {
        Self {
            data: self.data.map(|c| -c),
        }
    }

    /// Hamilton product (`self * other`).
    ///
    /// Non-commutative. See [`Quat::concatenate`] for the "apply `self`,
    /// then `other`" ordering.
    pub fn multiply(&self, other: &Self) -> Self {
        let [x, y, z, w] = self.data;
        let [bx, by, bz, bw] = other.data;
        Self::new(
            x * bw + bx * w + y * bz - z * by,
            y * bw + by * w + z * bx - x * bz,
            z * bw + bz * w + x * by - y * bx,
            w * bw - x * bx - y * by - z * bz,
        )
    }

    /// Rotation `self` followed by `other`; equals `other.multiply(self)`.
    ///
    /// `start.concatenate(&relative) == end` for
    /// `relative = Quat::relative_rotation(&start, &end)` (up to rounding).
    pub fn concatenate(&self, other: &Self) -> Self {
        other.multiply(self)
    }

    /// Negates the vector part.
    pub fn conjugate(&self) -> Self {
        Self::new(-self.x(), -self.y(), -self.z(), self.w())
    }

    /// Conjugate divided by the squared norm.
    ///
    /// Always divides, so non-unit input inverts correctly. Fails with
    /// [`MathError::DivideByZero`] for the zero quaternion.
    pub fn inverse(&self) -> Result<Self, MathError> {
        let norm_sq = self.length_squared();
        let c = self.conjugate();
        Ok(Self::new(
            c.x().try_div(norm_sq)?,
            c.y().try_div(norm_sq)?,
            c.z().try_div(norm_sq)?,
            c.w().try_div(norm_sq)?,
        ))
    }

    /// Four-component dot product.
    pub fn dot(&self, other: &Self) -> DFix128 {
        self.w() * other.w() + self.x() * other.x() + self.y() * other.y() + self.z() * other.z()
    }

    /// Squared norm.
    pub fn length_squared(&self) -> DFix128 {
        self.x() * self.x() + self.y() * self.y() + self.z() * self.z() + self.w() * self.w()
    }

    /// Norm.
    pub fn length(&self) -> Result<DFix128, MathError> {
        length_of("Quat::length", self.to_array())
    }

    /// Scales to unit length.
    ///
    /// Fails with [`MathError::DomainError`] for the zero quaternion.
    pub fn normalize(&self) -> Result<Self, MathError> {
        let c = normalized("Quat::normalize", "zero-length quaternion", self.to_array())?;
        Ok(Self::new(c[0], c[1], c[2], c[3]))
    }

    /// Rotation angle in `[0, π]`, `2·acos(min(|w|, 1))`.
    ///
    /// The clamp absorbs normalization drift that would otherwise push `|w|`
    /// past one.
    pub fn angle(&self) -> Result<DFix128, MathError> {
        let w = self.w().abs().min(DFix128::ONE);
        Ok(w.acos()? * DFix128::TWO)
    }

    /// Spherical interpolation along the shorter arc.
    ///
    /// Returns `start` exactly at `t == 0` and `end` exactly at `t == 1`.
    /// When the inputs are within `1 - 1e-12` of each other (by dot product)
    /// `start` is returned rather than dividing by a vanishing sine.
    pub fn slerp(start: &Self, end: &Self, t: DFix128) -> Result<Self, MathError> {
        if t.is_zero() {
            return Ok(*start);
        }
        if t == DFix128::ONE {
            return Ok(*end);
        }
        let one = DFix128::ONE;
        let mut end = *end;
        let mut cos_half_theta = start.dot(&end);
        if cos_half_theta.is_negative() {
            end = end.negate();
            cos_half_theta = -cos_half_theta;
        }
        if cos_half_theta > constants().one_minus_e_neg12 {
            return Ok(*start);
        }
        let half_theta = cos_half_theta.acos()?;
        let sin_half_theta = (one - cos_half_theta * cos_half_theta).sqrt()?;
        let a = ((one - t) * half_theta).sin().try_div(sin_half_theta)?;
        let b = (t * half_theta).sin().try_div(sin_half_theta)?;
        Ok(start.scale(a).add(&end.scale(b)))
    }

    /// Rotation taking `start` to `end`: `conj(start)` followed by `end`.
    pub fn relative_rotation(start: &Self, end: &Self) -> Self {
        start.conjugate().concatenate(end)
    }

    /// `rotation` expressed relative to `basis`: `rotation` followed by
    /// `conj(basis)`.
    pub fn local_rotation(rotation: &Self, basis: &Self) -> Self {
        rotation.concatenate(&basis.conjugate())
    }

    /// Rotates `v` (assumes unit `self`).
    ///
    /// Expanded form of `q v q*`; agrees with `v * self.to_mat3()`.
    pub fn transform(&self, v: &Vec3) -> Vec3 {
        let [x, y, z, w] = self.data;
        let one = DFix128::ONE;
        let (x2, y2, z2) = (x + x, y + y, z + z);
        let (xx2, xy2, xz2) = (x * x2, x * y2, x * z2);
        let (yy2, yz2, zz2) = (y * y2, y * z2, z * z2);
        let (wx2, wy2, wz2) = (w * x2, w * y2, w * z2);
        Vec3::new(
            v.x() * (one - yy2 - zz2) + v.y() * (xy2 - wz2) + v.z() * (xz2 + wy2),
            v.x() * (xy2 + wz2) + v.y() * (one - xx2 - zz2) + v.z() * (yz2 - wx2),
            v.x() * (xz2 - wy2) + v.y() * (yz2 + wx2) + v.z() * (one - xx2 - yy2),
        )
    }

    /// Rotates `(x, 0, 0)`.
    pub fn transform_x(&self, x: DFix128) -> Vec3 {
        let [qx, qy, qz, qw] = self.data;
        let (y2, z2) = (qy + qy, qz + qz);
        Vec3::new(
            x * (DFix128::ONE - qy * y2 - qz * z2),
            x * (qx * y2 + qw * z2),
            x * (qx * z2 - qw * y2),
        )
    }

    /// Rotates `(0, y, 0)`.
    pub fn transform_y(&self, y: DFix128) -> Vec3 {
        let [qx, qy, qz, qw] = self.data;
        let (x2, y2, z2) = (qx + qx, qy + qy, qz + qz);
        Vec3::new(
            y * (qx * y2 - qw * z2),
            y * (DFix128::ONE - qx * x2 - qz * z2),
            y * (qy * z2 + qw * x2),
        )
    }

    /// Rotates `(0, 0, z)`.
    pub fn transform_z(&self, z: DFix128) -> Vec3 {
        let [qx, qy, qz, qw] = self.data;
        let (x2, y2, z2) = (qx + qx, qy + qy, qz + qz);
        Vec3::new(
            z * (qx * z2 + qw * y2),
            z * (qy * z2 - qw * x2),
            z * (DFix128::ONE - qx * x2 - qy * y2),
        )
    }

    /// Rotation matrix for `self` (row-vector convention).
    pub fn to_mat3(&self) -> Mat3 {
        let [x, y, z, w] = self.data;
        let one = DFix128::ONE;
        let (x2, y2, z2) = (x + x, y + y, z + z);
        let (xx, yy, zz) = (x2 * x, y2 * y, z2 * z);
        let (xy, xz, xw) = (x2 * y, x2 * z, x2 * w);
        let (yz, yw, zw) = (y2 * z, y2 * w, z2 * w);
        Mat3::from_rows(
            Vec3::new(one - yy - zz, xy + zw, xz - yw),
            Vec3::new(xy - zw, one - xx - zz, yz + xw),
            Vec3::new(xz + yw, yz - xw, one - xx - yy),
        )
    }

    /// [`Quat::to_mat3`] embedded in a 4×4 with no translation.
    pub fn to_mat4(&self) -> Mat4 {
        let m = self.to_mat3();
        let zero = DFix128::ZERO;
        Mat4::from_rows(
            m.row_x().extend(zero),
            m.row_y().extend(zero),
            m.row_z().extend(zero),
            Vec3::ZERO.extend(DFix128::ONE),
        )
    }

    /// Returns `true` when every component is within `tolerance`.
    pub fn approx_eq(&self, other: &Self, tolerance: Tolerance) -> bool {
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(a, b)| a.approx_eq(*b, tolerance))
    }
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<[DFix128; 4]> for Quat {
    fn from(value: [DFix128; 4]) -> Self {
        Self { data: value }
    }
}

impl Mul for Quat {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl Neg for Quat {
    type Output = Self;
    fn neg(self) -> Self {
        self.negate()
    }
}

impl fmt::Display for Quat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{X: {}, Y: {}, Z: {}, W: {}}}",
            self.x(),
            self.y(),
            self.z(),
            self.w()
        )
    }
}
