// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use core::fmt;
use core::ops::{Mul, Neg};

use crate::error::MathError;
use crate::math::{
    hermite_weights, length_of, normalized, pick_greater, pick_lesser, DFix128, Tolerance,
};

/// Deterministic 3D vector of Q64.64 components.
///
/// * Components may represent points or directions depending on the calling
///   context; the type does not distinguish them.
/// * Use [`crate::math::Mat4::transform_point`] for points (homogeneous
///   `w = 1`) and [`crate::math::Mat4::transform_normal`] for directions.
/// * The handedness is right-handed: `UNIT_X × UNIT_Y == UNIT_Z`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3 {
    data: [DFix128; 3],
}

impl Vec3 {
    /// The zero vector.
    pub const ZERO: Self = Self::new(DFix128::ZERO, DFix128::ZERO, DFix128::ZERO);

    /// All components one.
    pub const ONE: Self = Self::new(DFix128::ONE, DFix128::ONE, DFix128::ONE);

    /// Unit vector pointing along the positive X axis.
    pub const UNIT_X: Self = Self::new(DFix128::ONE, DFix128::ZERO, DFix128::ZERO);

    /// Unit vector pointing along the positive Y axis.
    pub const UNIT_Y: Self = Self::new(DFix128::ZERO, DFix128::ONE, DFix128::ZERO);

    /// Unit vector pointing along the positive Z axis.
    pub const UNIT_Z: Self = Self::new(DFix128::ZERO, DFix128::ZERO, DFix128::ONE);

    /// `(0, 1, 0)`
    pub const UP: Self = Self::UNIT_Y;

    /// `(0, -1, 0)`
    pub const DOWN: Self = Self::new(DFix128::ZERO, DFix128::NEG_ONE, DFix128::ZERO);

    /// `(1, 0, 0)`
    pub const RIGHT: Self = Self::UNIT_X;

    /// `(-1, 0, 0)`
    pub const LEFT: Self = Self::new(DFix128::NEG_ONE, DFix128::ZERO, DFix128::ZERO);

    /// `(0, 0, -1)`: forward looks down negative Z.
    pub const FORWARD: Self = Self::new(DFix128::ZERO, DFix128::ZERO, DFix128::NEG_ONE);

    /// `(0, 0, 1)`
    pub const BACKWARD: Self = Self::UNIT_Z;

    /// Creates a vector from components.
    pub const fn new(x: DFix128, y: DFix128, z: DFix128) -> Self {
        Self { data: [x, y, z] }
    }

    /// Creates a vector from integer components (exact).
    pub const fn from_ints(x: i64, y: i64, z: i64) -> Self {
        Self::new(DFix128::from_int(x), DFix128::from_int(y), DFix128::from_int(z))
    }

    /// Creates a vector with every component equal to `value`.
    pub const fn splat(value: DFix128) -> Self {
        Self::new(value, value, value)
    }

    /// Returns the components as an array.
    pub const fn to_array(self) -> [DFix128; 3] {
        self.data
    }

    pub(crate) fn component(&self, idx: usize) -> DFix128 {
        self.data[idx]
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

    /// Extends to a [`crate::math::Vec4`] with the given `w`.
    pub const fn extend(&self, w: DFix128) -> super::Vec4 {
        super::Vec4::new(self.data[0], self.data[1], self.data[2], w)
    }

    /// Drops `z`.
    pub const fn truncate(&self) -> super::Vec2 {
        super::Vec2::new(self.data[0], self.data[1])
    }

    /// Adds two vectors.
    pub fn add(&self, other: &Self) -> Self {
        Self::new(
            self.component(0) + other.component(0),
            self.component(1) + other.component(1),
            self.component(2) + other.component(2),
        )
    }

    /// Subtracts another vector.
    pub fn sub(&self, other: &Self) -> Self {
        Self::new(
            self.component(0) - other.component(0),
            self.component(1) - other.component(1),
            self.component(2) - other.component(2),
        )
    }

    /// Scales the vector by a scalar.
    pub fn scale(&self, scalar: DFix128) -> Self {
        Self::new(
            self.component(0) * scalar,
            self.component(1) * scalar,
            self.component(2) * scalar,
        )
    }

    /// Component-wise product.
    pub fn mul_elements(&self, other: &Self) -> Self {
        Self::new(
            self.component(0) * other.component(0),
            self.component(1) * other.component(1),
            self.component(2) * other.component(2),
        )
    }

    /// Divides every component by `divisor`.
    pub fn div_scalar(&self, divisor: DFix128) -> Result<Self, MathError> {
        Ok(Self::new(
            self.component(0).try_div(divisor)?,
            self.component(1).try_div(divisor)?,
            self.component(2).try_div(divisor)?,
        ))
    }

    /// Negates every component.
    pub fn negate(&self) -> Self {
        Self::new(-self.component(0), -self.component(1), -self.component(2))
    }

    /// Dot product with another vector.
    pub fn dot(&self, other: &Self) -> DFix128 {
        self.component(0) * other.component(0)
            + self.component(1) * other.component(1)
            + self.component(2) * other.component(2)
    }

    /// Right-handed cross product with another vector.
    pub fn cross(&self, other: &Self) -> Self {
        let ax = self.component(0);
        let ay = self.component(1);
        let az = self.component(2);
        let bx = other.component(0);
        let by = other.component(1);
        let bz = other.component(2);
        Self::new(ay * bz - az * by, az * bx - ax * bz, ax * by - ay * bx)
    }

    /// Squared magnitude of the vector (exact up to multiply rounding).
    ///
    /// Wraps once the sum passes [`DFix128::MAX`]; [`Vec3::length`] does not.
    pub fn length_squared(&self) -> DFix128 {
        self.dot(self)
    }

    /// Vector length (magnitude).
    ///
    /// Large components are rescaled before squaring, so this only fails,
    /// with [`MathError::DomainError`], when the length itself exceeds
    /// [`DFix128::MAX`].
    pub fn length(&self) -> Result<DFix128, MathError> {
        length_of("Vec3::length", self.to_array())
    }

    /// Distance to another point.
    pub fn distance(&self, other: &Self) -> Result<DFix128, MathError> {
        self.sub(other).length()
    }

    /// Squared distance to another point.
    pub fn distance_squared(&self, other: &Self) -> DFix128 {
        self.sub(other).length_squared()
    }

    /// Scales by `1 / length`.
    ///
    /// Fails with [`MathError::DomainError`] for a zero-length vector.
    pub fn normalize(&self) -> Result<Self, MathError> {
        let c = normalized("Vec3::normalize", "zero-length vector", self.to_array())?;
        Ok(Self::new(c[0], c[1], c[2]))
    }

    /// `self * (1 - t) + end * t`; `t` outside `[0, 1]` extrapolates.
    pub fn lerp(&self, end: &Self, t: DFix128) -> Self {
        self.scale(DFix128::ONE - t).add(&end.scale(t))
    }

    /// Cubic Hermite spline between `value1` and `value2` with tangents.
    pub fn hermite(
        value1: &Self,
        tangent1: &Self,
        value2: &Self,
        tangent2: &Self,
        t: DFix128,
    ) -> Self {
        let (h00, h10, h01, h11) = hermite_weights(t);
        value1
            .scale(h00)
            .add(&tangent1.scale(h10))
            .add(&value2.scale(h01))
            .add(&tangent2.scale(h11))
    }

    /// Component-wise minimum.
    pub fn min(&self, other: &Self) -> Self {
        Self::new(
            pick_lesser(self.component(0), other.component(0)),
            pick_lesser(self.component(1), other.component(1)),
            pick_lesser(self.component(2), other.component(2)),
        )
    }

    /// Component-wise maximum.
    pub fn max(&self, other: &Self) -> Self {
        Self::new(
            pick_greater(self.component(0), other.component(0)),
            pick_greater(self.component(1), other.component(1)),
            pick_greater(self.component(2), other.component(2)),
        )
    }

    /// Component-wise absolute value.
    pub fn abs(&self) -> Self {
        Self::new(
            self.component(0).abs(),
            self.component(1).abs(),
            self.component(2).abs(),
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

/// Converts a `[DFix128; 3]` array into a `Vec3` interpreted as `(x, y, z)`.
///
/// # Examples
/// ```
/// use detmath_core::math::{DFix128, Vec3};
/// let one = DFix128::ONE;
/// let v = Vec3::from([one, one + one, -one]);
/// assert_eq!(v, Vec3::from_ints(1, 2, -1));
/// ```
impl From<[DFix128; 3]> for Vec3 {
    fn from(value: [DFix128; 3]) -> Self {
        Self { data: value }
    }
}

impl Mul<DFix128> for Vec3 {
    type Output = Self;
    fn mul(self, rhs: DFix128) -> Self {
        self.scale(rhs)
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self {
        self.negate()
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{X: {}, Y: {}, Z: {}}}", self.x(), self.y(), self.z())
    }
}
