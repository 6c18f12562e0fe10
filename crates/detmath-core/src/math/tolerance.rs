// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Comparison tolerance for approximate equality checks.

use crate::math::DFix128;

/// Absolute tolerance, in raw Q64.64 units, used by `approx_eq` methods.
///
/// Exact comparisons should use `==`; this type exists for results that pass
/// through rounding (`sqrt`, trigonometry, normalization) where a bound in
/// units of the last place is the meaningful contract.
///
/// Under the `serde` feature the tolerance deserializes from
/// `{ "absolute": <raw> }`, so callers can load it from their own config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Tolerance {
    absolute: u128,
}

impl Tolerance {
    /// Default tolerance: `2^-32`.
    pub const DEFAULT: Self = Self { absolute: 1 << 32 };

    /// Zero tolerance; only bit-identical values compare equal.
    pub const fn exact() -> Self {
        Self { absolute: 0 }
    }

    /// Tolerance of `absolute` raw units (`absolute * 2^-64`).
    pub const fn from_raw(absolute: u128) -> Self {
        Self { absolute }
    }

    /// Tolerance equal to the magnitude of `value`.
    pub const fn from_scalar(value: DFix128) -> Self {
        Self {
            absolute: value.raw().unsigned_abs(),
        }
    }

    /// Tolerance in raw units.
    pub const fn absolute(self) -> u128 {
        self.absolute
    }

    /// Returns `true` when raw values `a` and `b` differ by at most the
    /// tolerance.
    pub const fn accepts(self, a: i128, b: i128) -> bool {
        a.abs_diff(b) <= self.absolute
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}
