// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use core::fmt;
use core::ops::{Mul, Neg};

use crate::error::MathError;
use crate::math::{
    hermite_weights, length_of, normalized, pick_greater, pick_lesser, DFix128, Tolerance, Vec3,
};

/// Deterministic 2D vector of Q64.64 components.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    data: [DFix128; 2],
}

impl Vec2 {
    /// The zero vector.
    pub const ZERO: Self = Self::new(DFix128::ZERO, DFix128::ZERO);

    /// All components one.
    pub const ONE: Self = Self::new(DFix128::ONE, DFix128::ONE);

    /// Unit vector along X.
    pub const UNIT_X: Self = Self::new(DFix128::ONE, DFix128::ZERO);

    /// Unit vector along Y.
    pub const UNIT_Y: Self = Self::new(DFix128::ZERO, DFix128::ONE);

    /// Creates a vector from components.
    pub const fn new(x: DFix128, y: DFix128) -> Self {
        Self { data: [x, y] }
    }

    /// Creates a vector from integer components (exact).
    pub const fn from_ints(x: i64, y: i64) -> Self {
        Self::new(DFix128::from_int(x), DFix128::from_int(y))
    }

    /// Returns the components as an array.
    pub const fn to_array(self) -> [DFix128; 2] {
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

    /// Extends to a [`Vec3`] with the given `z`.
    pub const fn extend(&self, z: DFix128) -> Vec3 {
        Vec3::new(self.data[0], self.data[1], z)
    }

    /// Adds two vectors.
    pub fn add(&self, other: &Self) -> Self {
        Self::new(self.x() + other.x(), self.y() + other.y())
    }

    /// Subtracts another vector.
    pub fn sub(&self, other: &Self) -> Self {
        Self::new(self.x() - other.x(), self.y() - other.y())
    }

    /// Scales the vector by a scalar.
    pub fn scale(&self, scalar: DFix128) -> Self {
        Self::new(self.x() * scalar, self.y() * scalar)
    }

    /// Component-wise product.
    pub fn mul_elements(&self, other: &Self) -> Self {
        Self::new(self.x() * other.x(), self.y() * other.y())
    }

    /// Divides both components by `divisor`.
    pub fn div_scalar(&self, divisor: DFix128) -> Result<Self, MathError> {
        Ok(Self::new(
            self.x().try_div(divisor)?,
            self.y().try_div(divisor)?,
        ))
    }

    /// Negates both components.
    pub fn negate(&self) -> Self {
        Self::new(-self.x(), -self.y())
    }

    /// Dot product.
    pub fn dot(&self, other: &Self) -> DFix128 {
        self.x() * other.x() + self.y() * other.y()
    }

    /// Squared magnitude.
    pub fn length_squared(&self) -> DFix128 {
        self.dot(self)
    }

    /// Magnitude.
    pub fn length(&self) -> Result<DFix128, MathError> {
        length_of("Vec2::length", self.to_array())
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
        let c = normalized("Vec2::normalize", "zero-length vector", self.to_array())?;
        Ok(Self::new(c[0], c[1]))
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
        Self::new(pick_lesser(self.x(), other.x()), pick_lesser(self.y(), other.y()))
    }

    /// Component-wise maximum.
    pub fn max(&self, other: &Self) -> Self {
        Self::new(pick_greater(self.x(), other.x()), pick_greater(self.y(), other.y()))
    }

    /// Component-wise absolute value.
    pub fn abs(&self) -> Self {
        Self::new(self.x().abs(), self.y().abs())
    }

    /// Returns `true` when both components are within `tolerance`.
    pub fn approx_eq(&self, other: &Self, tolerance: Tolerance) -> bool {
        self.x().approx_eq(other.x(), tolerance) && self.y().approx_eq(other.y(), tolerance)
    }
}

impl From<[DFix128; 2]> for Vec2 {
    fn from(value: [DFix128; 2]) -> Self {
        Self { data: value }
    }
}

impl Mul<DFix128> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: DFix128) -> Self {
        self.scale(rhs)
    }
}

impl Neg for Vec2 {
    type Output = Self;
    fn neg(self) -> Self {
        self.negate()
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{X: {}, Y: {}}}", self.x(), self.y())
    }
}
