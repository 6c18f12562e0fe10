// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use core::fmt;
use core::ops::{Mul, Neg};

use crate::error::MathError;
use crate::math::{
    hermite_weights, length_of, normalized, pick_greater, pick_lesser, DFix128, Tolerance, Vec3,
};

/// Deterministic 4D vector of Q64.64 components.
///
/// Used for homogeneous coordinates and as the row type of
/// [`crate::math::Mat4`].
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec4 {
    data: [DFix128; 4],
}

impl Vec4 {
    /// The zero vector.
    pub const ZERO: Self = Self::splat(DFix128::ZERO);

    /// All components one.
    pub const ONE: Self = Self::splat(DFix128::ONE);

    /// Unit vector along X.
    pub const UNIT_X: Self = Self::new(DFix128::ONE, DFix128::ZERO, DFix128::ZERO, DFix128::ZERO);

    /// Unit vector along Y.
    pub const UNIT_Y: Self = Self::new(DFix128::ZERO, DFix128::ONE, DFix128::ZERO, DFix128::ZERO);

    /// Unit vector along Z.
    pub const UNIT_Z: Self = Self::new(DFix128::ZERO, DFix128::ZERO, DFix128::ONE, DFix128::ZERO);

    /// Unit vector along W.
    pub const UNIT_W: Self = Self::new(DFix128::ZERO, DFix128::ZERO, DFix128::ZERO, DFix128::ONE);

    /// Creates a vector from components.
    pub const fn new(x: DFix128, y: DFix128, z: DFix128, w: DFix128) -> Self {
        Self { data: [x, y, z, w] }
    }

    /// Creates a vector from integer components (exact).
    pub const fn from_ints(x: i64, y: i64, z: i64, w: i64) -> Self {
        Self::new(
            DFix128::from_int(x),
            DFix128::from_int(y),
            DFix128::from_int(z),
            DFix128::from_int(w),
        )
    }

    /// Creates a vector with every component equal to `value`.
    pub const fn splat(value: DFix128) -> Self {
        Self::new(value, value, value, value)
    }

    /// Returns the components as an array.
    pub const fn to_array(self) -> [DFix128; 4] {
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

    /// W component.
    pub const fn w(&self) -> DFix128 {
        self.data[3]
    }

    /// Drops `w`.
    pub const fn xyz(&self) -> Vec3 {
        Vec3::new(self.data[0], self.data[1], self.data[2])
    }

    fn map(&self, f: impl Fn(DFix128) -> DFix128) -> Self {
        Self {
            data: self.data.map(f),
        }
    }

    fn zip_with(&self, other: &Self, f: impl Fn(DFix128, DFix128) -> DFix128) -> Self {
        Self::new(
            f(self.component(0), other.component(0)),
            f(self.component(1), other.component(1)),
            f(self.component(2), other.component(2)),
            f(self.component(3), other.component(3)),
        )
    }

    /// Adds two vectors.
    pub fn add(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| a + b)
    }

    /// Subtracts another vector.
    pub fn sub(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| a - b)
    }

    /// Scales the vector by a scalar.
    pub fn scale(&self, scalar: DFix128) -> Self {
        self.map(|c| c * scalar)
    }

    /// Component-wise product.
    pub fn mul_elements(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| a * b)
    }

    /// Divides every component by `divisor`.
    pub fn div_scalar(&self, divisor: DFix128) -> Result<Self, MathError> {
        Ok(Self::new(
            self.component(0).try_div(divisor)?,
            self.component(1).try_div(divisor)?,
            self.component(2).try_div(divisor)?,
            self.component(3).try_div(divisor)?,
        ))
    }

    /// Negates every component.
    pub fn negate(&self) -> Self {
        self.map(|c| -c)
    }

    /// Four-component dot product.
    pub fn dot(&self, other: &Self) -> DFix128 {
        self.component(0) * other.component(0)
            + self.component(1) * other.component(1)
            + self.component(2) * other.component(2)
            + self.component(3) * other.component(3)
    }

    /// Squared magnitude.
    pub fn length_squared(&self) -> DFix128 {
        self.dot(self)
    }

    /// Magnitude.
    pub fn length(&self) -> Result<DFix128, MathError> {
        length_of("Vec4::length", self.to_array())
    }

    /// Distance to another vector.
    pub fn distance(&self, other: &Self) -> Result<DFix128, MathError> {
        self.sub(other).length()
    }

    /// Squared distance to another vector.
    pub fn distance_squared(&self, other: &Self) -> DFix128 {
        self.sub(other).length_squared()
    }

    /// Scales by `1 / length`.
    ///
    /// Fails with [`MathError::DomainError`] for a zero-length vector.
    pub fn normalize(&self) -> Result<Self, MathError> {
        let c = normalized("Vec4::normalize", "zero-length vector", self.to_array())?;
        Ok(Self::new(c[0], c[1], c[2], c[3]))
    }

    /// `self * (1 - t) + end * t`; no clamping of `t`.
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
        self.zip_with(other, pick_lesser)
    }

    /// Component-wise maximum.
    pub fn max(&self, other: &Self) -> Self {
        self.zip_with(other, pick_greater)
    }

    /// Component-wise absolute value.
    pub fn abs(&self) -> Self {
        self.map(DFix128::abs)
    }

    /// Returns `true` when every component is within `tolerance`.
    pub fn approx_eq(&self, other: &Self, tolerance: Tolerance) -> bool {
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(a, b)| a.approx_eq(*b, tolerance))
    }
}

impl From<[DFix128; 4]> for Vec4 {
    fn from(value: [DFix128; 4]) -> Self {
        Self { data: value }
    }
}

impl Mul<DFix128> for Vec4 {
    type Output = Self;
    fn mul(self, rhs: DFix128) -> Self {
        self.scale(rhs)
    }
}

impl Neg for Vec4 {
    type Output = Self;
    fn neg(self) -> Self {
        self.negate()
    }
}

impl fmt::Display for Vec4 {
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
