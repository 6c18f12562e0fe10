// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Deterministic math covering the Q64.64 scalar, linear algebra primitives
//! and quaternions.
//!
//! All arithmetic is integer arithmetic on the scalar's raw representation,
//! so results are bit-identical across compilers, CPUs and optimization
//! levels. Matrices use the row-vector convention: a point transforms as
//! `v * M`.

mod consts;
pub(crate) mod fixed_q64_64;
mod mat3;
mod mat4;
mod quat;
mod scalar;
mod tolerance;
mod trig;
mod vec2;
mod vec3;
mod vec4;

pub use consts::{constants, Constants};
pub use mat3::Mat3;
pub use mat4::Mat4;
pub use quat::Quat;
pub use scalar::DFix128;
pub use tolerance::Tolerance;
pub use vec2::Vec2;
pub use vec3::Vec3;
pub use vec4::Vec4;

use crate::error::MathError;

/// Cubic Hermite basis weights `(h00, h10, h01, h11)` at `t`.
///
/// `h00 = 2t³ - 3t² + 1`, `h10 = t³ - 2t² + t`, `h01 = -2t³ + 3t²`,
/// `h11 = t³ - t²`.
pub(crate) fn hermite_weights(t: DFix128) -> (DFix128, DFix128, DFix128, DFix128) {
    let two = DFix128::TWO;
    let three = DFix128::from_int(3);
    let t2 = t * t;
    let t3 = t2 * t;
    let h00 = two * t3 - three * t2 + DFix128::ONE;
    let h10 = t3 - two * t2 + t;
    let h01 = three * t2 - two * t3;
    let h11 = t3 - t2;
    (h00, h10, h01, h11)
}

/// `a < b ? a : b`
pub(crate) fn pick_lesser(a: DFix128, b: DFix128) -> DFix128 {
    if a < b {
        a
    } else {
        b
    }
}

/// `a > b ? a : b`
pub(crate) fn pick_greater(a: DFix128, b: DFix128) -> DFix128 {
    if a > b {
        a
    } else {
        b
    }
}

/// Largest component magnitude as an unsigned raw value.
fn max_magnitude(components: &[DFix128]) -> u128 {
    components
        .iter()
        .map(|c| c.raw().unsigned_abs())
        .max()
        .unwrap_or(0)
}

/// Components divided by `max`, so the largest lands on exactly `±1`.
fn scaled_by<const N: usize>(components: [DFix128; N], max: u128) -> [DFix128; N] {
    components.map(|c| DFix128::from_raw(fixed_q64_64::div_by_magnitude(c.raw(), max)))
}

fn sum_of_squares(components: &[DFix128]) -> DFix128 {
    components
        .iter()
        .fold(DFix128::ZERO, |acc, &c| acc + c * c)
}

/// Sum of squares, or `None` when it leaves the representable range.
fn checked_sum_of_squares(components: &[DFix128]) -> Option<DFix128> {
    let mut sum: u128 = 0;
    for c in components {
        let m = c.raw().unsigned_abs();
        sum = sum.checked_add(fixed_q64_64::checked_mul_magnitude(m, m)?)?;
    }
    i128::try_from(sum).ok().map(DFix128::from_raw)
}

/// Euclidean length that never wraps in the squared sum.
///
/// Lengths whose square fits are `sqrt(Σ c²)`. Larger vectors are scaled
/// by their largest magnitude first. Fails with [`MathError::DomainError`]
/// when the length itself is not representable.
pub(crate) fn length_of<const N: usize>(
    op: &'static str,
    components: [DFix128; N],
) -> Result<DFix128, MathError> {
    if let Some(sum) = checked_sum_of_squares(&components) {
        return sum.sqrt();
    }
    let max = max_magnitude(&components);
    let root = sum_of_squares(&scaled_by(components, max)).sqrt()?;
    fixed_q64_64::checked_mul_magnitude(max, root.raw().unsigned_abs())
        .and_then(|raw| i128::try_from(raw).ok())
        .map(DFix128::from_raw)
        .ok_or_else(|| {
            MathError::domain(op, "length exceeds the representable range", root.raw())
        })
}

/// Unit vector along `components`, scaled by `1 / length`.
///
/// The components are first divided by their largest magnitude, which
/// keeps the squared sum in `[1, N]` at any input scale. Fails with
/// [`MathError::DomainError`] when every component is zero.
pub(crate) fn normalized<const N: usize>(
    op: &'static str,
    reason: &'static str,
    components: [DFix128; N],
) -> Result<[DFix128; N], MathError> {
    let max = max_magnitude(&components);
    if max == 0 {
        return Err(MathError::domain(op, reason, 0));
    }
    let scaled = scaled_by(components, max);
    let inv_len = sum_of_squares(&scaled).sqrt()?.recip()?;
    Ok(scaled.map(|c| c * inv_len))
}
