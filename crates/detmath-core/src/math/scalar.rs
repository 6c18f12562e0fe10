// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Deterministic Q64.64 fixed-point scalar.
//!
//! Determinism contract:
//! - The raw `i128` is the single source of truth. Every operator, conversion
//!   and transcendental is computed from raw integers; no intermediate ever
//!   passes through `f32`/`f64`.
//! - `+`, `-` and unary `-` wrap on overflow (two's complement), as do the
//!   final narrowing steps of `*` and `/`.
//! - `*`, `/` and `f64` conversion round to nearest, ties-to-even. Rounding is
//!   applied to magnitudes, so results are symmetric under negation.
//! - `sqrt` rounds to nearest.
//!
//! Float conversion is the only place platform behavior can leak in. Use it
//! at authoring/load time, never inside a per-tick hot path.

use core::fmt;
use core::ops::{
    Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Div, DivAssign,
    Mul, MulAssign, Neg, Not, Rem, RemAssign, Shl, ShlAssign, Shr, ShrAssign, Sub, SubAssign,
};

use crate::error::MathError;
use crate::math::fixed_q64_64::{
    self, DEG_TO_RAD_RAW, FRAC_BITS, FRAC_MASK, HALF_PI_RAW, ONE_RAW, PI_RAW, QUARTER_PI_RAW,
    RAD_TO_DEG_RAW, TAU_RAW,
};
use crate::math::trig;
use crate::math::Tolerance;

/// Deterministic fixed-point scalar with Q64.64 encoding stored in an `i128`.
///
/// The underlying integer stores the value scaled by `2^64`:
///
/// ```text
/// real_value = raw / 2^64
/// ```
///
/// Ordering and equality compare raw integers, giving a total order with no
/// NaN-like states.
///
/// The `/` operator panics on a zero divisor, like primitive integer
/// division. Code that can see a zero divisor calls [`DFix128::try_div`] or
/// [`DFix128::recip`], which return [`MathError::DivideByZero`].
///
/// The bitwise operators (`&`, `|`, `^`, `!`, `<<`, `>>`) act on the raw
/// encoding, not on the real value.
///
/// # Examples
/// ```
/// use detmath_core::math::DFix128;
/// let a = DFix128::from_int(3);
/// let b = DFix128::from_int(4);
/// assert_eq!((a * a + b * b).sqrt(), Ok(DFix128::from_int(5)));
/// ```
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DFix128 {
    raw: i128,
}

impl DFix128 {
    /// Number of fractional bits.
    pub const FRAC_BITS: u32 = FRAC_BITS;

    /// The fixed-point zero value.
    pub const ZERO: Self = Self { raw: 0 };

    /// The fixed-point one value.
    pub const ONE: Self = Self { raw: ONE_RAW };

    /// Minus one.
    pub const NEG_ONE: Self = Self { raw: -ONE_RAW };

    /// One half.
    pub const HALF: Self = Self { raw: ONE_RAW / 2 };

    /// Two.
    pub const TWO: Self = Self { raw: 2 * ONE_RAW };

    /// `π`.
    pub const PI: Self = Self { raw: PI_RAW };

    /// `2π`.
    pub const TWO_PI: Self = Self { raw: TAU_RAW };

    /// `π/2`.
    pub const HALF_PI: Self = Self { raw: HALF_PI_RAW };

    /// `π/4`.
    pub const QUARTER_PI: Self = Self { raw: QUARTER_PI_RAW };

    /// Smallest positive value, `2^-64`.
    pub const EPSILON: Self = Self { raw: 1 };

    /// Most negative representable value, `-2^63`.
    pub const MIN: Self = Self { raw: i128::MIN };

    /// Largest representable value, just below `2^63`.
    pub const MAX: Self = Self { raw: i128::MAX };

    /// Constructs a value from a raw Q64.64 integer.
    ///
    /// This is an exact conversion (no scaling or rounding).
    pub const fn from_raw(raw: i128) -> Self {
        Self { raw }
    }

    /// Returns the underlying Q64.64 raw storage value.
    pub const fn raw(self) -> i128 {
        self.raw
    }

    /// Exact conversion from an integer.
    #[allow(clippy::cast_lossless)]
    pub const fn from_int(value: i64) -> Self {
        Self {
            raw: (value as i128) << FRAC_BITS,
        }
    }

    /// `numerator / denominator`, rounded to nearest (ties-to-even).
    pub fn from_ratio(numerator: i64, denominator: i64) -> Result<Self, MathError> {
        Self::from_int(numerator).try_div(Self::from_int(denominator))
    }

    /// Converts an `f64` to the nearest representable value (ties-to-even).
    ///
    /// Fails with [`MathError::DomainError`] for NaN, infinities and values
    /// whose magnitude does not fit in 64 integer bits.
    pub fn try_from_f64(value: f64) -> Result<Self, MathError> {
        fixed_q64_64::from_f64(value)
            .map(Self::from_raw)
            .ok_or_else(|| MathError::domain("DFix128::try_from_f64", "not finite or out of range", 0))
    }

    /// Converts to the nearest `f64` (ties-to-even). Lossy; display and
    /// diagnostics only.
    pub fn to_f64(self) -> f64 {
        fixed_q64_64::to_f64(self.raw)
    }

    /// Integer part, truncated toward zero.
    pub fn to_i64(self) -> i64 {
        // |raw / 2^64| <= 2^63 and the only value reaching 2^63 is negative.
        #[allow(clippy::cast_possible_truncation)]
        let int = (self.raw / ONE_RAW) as i64;
        int
    }

    /// Returns `true` when the value is exactly zero.
    pub const fn is_zero(self) -> bool {
        self.raw == 0
    }

    /// Returns `true` when the value is strictly negative.
    pub const fn is_negative(self) -> bool {
        self.raw < 0
    }

    /// Absolute value. `MIN.abs()` wraps to `MIN`.
    pub const fn abs(self) -> Self {
        Self {
            raw: self.raw.wrapping_abs(),
        }
    }

    /// `-1`, `0` or `1` according to the sign.
    pub const fn signum(self) -> Self {
        Self {
            raw: self.raw.signum() << FRAC_BITS,
        }
    }

    /// Largest integer value not greater than `self`.
    pub const fn floor(self) -> Self {
        Self {
            raw: self.raw & !FRAC_MASK,
        }
    }

    /// Smallest integer value not less than `self`. Wraps above `MAX.floor()`.
    pub const fn ceil(self) -> Self {
        let floor = self.raw & !FRAC_MASK;
        if floor == self.raw {
            self
        } else {
            Self {
                raw: floor.wrapping_add(ONE_RAW),
            }
        }
    }

    /// Fractional part `self - self.floor()`, always in `[0, 1)`.
    pub const fn frac(self) -> Self {
        Self {
            raw: self.raw & FRAC_MASK,
        }
    }

    /// Division that reports a zero divisor instead of panicking.
    pub fn try_div(self, rhs: Self) -> Result<Self, MathError> {
        fixed_q64_64::div_raw(self.raw, rhs.raw)
            .map(Self::from_raw)
            .ok_or_else(|| MathError::divide_by_zero("DFix128::try_div", self.raw))
    }

    /// Reciprocal `1 / self`.
    pub fn recip(self) -> Result<Self, MathError> {
        Self::ONE.try_div(self)
    }

    /// Square root, rounded to nearest.
    ///
    /// Fails with [`MathError::DomainError`] for negative input.
    pub fn sqrt(self) -> Result<Self, MathError> {
        fixed_q64_64::sqrt_raw(self.raw)
            .map(Self::from_raw)
            .ok_or_else(|| MathError::domain("DFix128::sqrt", "negative input", self.raw))
    }

    /// Sine of `self` (radians).
    pub fn sin(self) -> Self {
        Self::from_raw(trig::sin_cos_raw(self.raw).0)
    }

    /// Cosine of `self` (radians).
    pub fn cos(self) -> Self {
        Self::from_raw(trig::sin_cos_raw(self.raw).1)
    }

    /// Sine and cosine of `self` (radians) from one range reduction.
    pub fn sin_cos(self) -> (Self, Self) {
        let (s, c) = trig::sin_cos_raw(self.raw);
        (Self::from_raw(s), Self::from_raw(c))
    }

    /// Tangent of `self` (radians). Fails where the cosine is exactly zero.
    pub fn tan(self) -> Result<Self, MathError> {
        let (s, c) = self.sin_cos();
        s.try_div(c)
    }

    /// Arctangent, in `[-π/2, π/2]`.
    pub fn atan(self) -> Self {
        Self::from_raw(trig::atan_raw(self.raw))
    }

    /// Four-quadrant arctangent of `self / x`, in `(-π, π]`.
    ///
    /// `atan2(0, 0)` is `0`.
    pub fn atan2(self, x: Self) -> Self {
        Self::from_raw(trig::atan2_raw(self.raw, x.raw))
    }

    /// Arcsine, in `[-π/2, π/2]`.
    ///
    /// Fails with [`MathError::DomainError`] outside `[-1, 1]`.
    pub fn asin(self) -> Result<Self, MathError> {
        let cos = self.unit_complement("DFix128::asin")?;
        Ok(self.atan2(cos))
    }

    /// Arccosine, in `[0, π]`.
    ///
    /// Fails with [`MathError::DomainError`] outside `[-1, 1]`; callers
    /// carrying normalization drift should clamp first.
    pub fn acos(self) -> Result<Self, MathError> {
        let sin = self.unit_complement("DFix128::acos")?;
        Ok(sin.atan2(self))
    }

    /// `√(1 - self²)` for `self` in `[-1, 1]`.
    fn unit_complement(self, op: &'static str) -> Result<Self, MathError> {
        if self.raw > ONE_RAW || self.raw < -ONE_RAW {
            return Err(MathError::domain(op, "input outside [-1, 1]", self.raw));
        }
        let rem = (Self::ONE - self * self).max(Self::ZERO);
        rem.sqrt()
    }

    /// Converts degrees to radians.
    pub fn to_radians(self) -> Self {
        self * Self::from_raw(DEG_TO_RAD_RAW)
    }

    /// Converts radians to degrees.
    pub fn to_degrees(self) -> Self {
        self * Self::from_raw(RAD_TO_DEG_RAW)
    }

    /// Returns `true` when `|self - other|` is within `tolerance`.
    pub fn approx_eq(self, other: Self, tolerance: Tolerance) -> bool {
        tolerance.accepts(self.raw, other.raw)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for DFix128 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.raw.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for DFix128 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        i128::deserialize(deserializer).map(Self::from_raw)
    }
}

impl fmt::Display for DFix128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_f64())
    }
}

impl From<i64> for DFix128 {
    fn from(value: i64) -> Self {
        Self::from_int(value)
    }
}

impl From<i32> for DFix128 {
    fn from(value: i32) -> Self {
        Self::from_int(i64::from(value))
    }
}

impl TryFrom<f64> for DFix128 {
    type Error = MathError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::try_from_f64(value)
    }
}

impl Add for DFix128 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::from_raw(self.raw.wrapping_add(rhs.raw))
    }
}

impl Sub for DFix128 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::from_raw(self.raw.wrapping_sub(rhs.raw))
    }
}

impl Mul for DFix128 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self::from_raw(fixed_q64_64::mul_raw(self.raw, rhs.raw))
    }
}

/// # Panics
/// Panics when `rhs` is zero, like primitive integer division. Use
/// [`DFix128::try_div`] to get a [`MathError::DivideByZero`] instead.
impl Div for DFix128 {
    type Output = Self;
    fn div(self, rhs: Self) -> Self {
        Self::from_raw(fixed_q64_64::div_raw_nonzero(self.raw, rhs.raw))
    }
}

/// Remainder with the sign of the dividend, computed on raw integers.
///
/// # Panics
/// Panics when `rhs` is zero, like primitive integer remainder.
impl Rem for DFix128 {
    type Output = Self;
    fn rem(self, rhs: Self) -> Self {
        Self::from_raw(self.raw.wrapping_rem(rhs.raw))
    }
}

impl Neg for DFix128 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::from_raw(self.raw.wrapping_neg())
    }
}

impl AddAssign for DFix128 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for DFix128 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign for DFix128 {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl DivAssign for DFix128 {
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

impl RemAssign for DFix128 {
    fn rem_assign(&mut self, rhs: Self) {
        *self = *self % rhs;
    }
}

impl BitAnd for DFix128 {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self::from_raw(self.raw & rhs.raw)
    }
}

impl BitOr for DFix128 {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self::from_raw(self.raw | rhs.raw)
    }
}

impl BitXor for DFix128 {
    type Output = Self;
    fn bitxor(self, rhs: Self) -> Self {
        Self::from_raw(self.raw ^ rhs.raw)
    }
}

/// Complements every raw bit: `!x == -x - EPSILON`.
impl Not for DFix128 {
    type Output = Self;
    fn not(self) -> Self {
        Self::from_raw(!self.raw)
    }
}

/// Raw left shift; the amount is taken modulo 128.
impl Shl<u32> for DFix128 {
    type Output = Self;
    fn shl(self, amount: u32) -> Self {
        Self::from_raw(self.raw.wrapping_shl(amount))
    }
}

/// Arithmetic raw right shift; the amount is taken modulo 128.
impl Shr<u32> for DFix128 {
    type Output = Self;
    fn shr(self, amount: u32) -> Self {
        Self::from_raw(self.raw.wrapping_shr(amount))
    }
}

impl BitAndAssign for DFix128 {
    fn bitand_assign(&mut self, rhs: Self) {
        *self = *self & rhs;
    }
}

impl BitOrAssign for DFix128 {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}

impl BitXorAssign for DFix128 {
    fn bitxor_assign(&mut self, rhs: Self) {
        *self = *self ^ rhs;
    }
}

impl ShlAssign<u32> for DFix128 {
    fn shl_assign(&mut self, amount: u32) {
        *self = *self << amount;
    }
}

impl ShrAssign<u32> for DFix128 {
    fn shr_assign(&mut self, amount: u32) {
        *self = *self >> amount;
    }
}
