// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Raw-integer helpers for the Q64.64 fixed-point encoding.
//!
//! The representation is an `i128` storing an integer scaled by `2^64`:
//! `real_value = raw / 2^64`.
//!
//! Every helper here is pure integer code. Narrowing back to `i128` wraps
//! (two's complement) rather than saturating, so overflow behaves like the
//! primitive integer types do in release builds.

/// Number of fractional bits in the Q64.64 encoding.
pub(crate) const FRAC_BITS: u32 = 64;

/// The raw integer value corresponding to `1.0`.
pub(crate) const ONE_RAW: i128 = 1_i128 << FRAC_BITS;

/// Mask selecting the fractional bits of a raw value.
pub(crate) const FRAC_MASK: i128 = ONE_RAW - 1;

const LOW_MASK: u128 = (1_u128 << 64) - 1;

/// `π` rounded to nearest Q64.64.
pub(crate) const PI_RAW: i128 = 57_952_155_664_616_982_739;
/// `2π` rounded to nearest Q64.64.
pub(crate) const TAU_RAW: i128 = 115_904_311_329_233_965_478;
/// `π/2` rounded to nearest Q64.64.
pub(crate) const HALF_PI_RAW: i128 = 28_976_077_832_308_491_370;
/// `π/4` rounded to nearest Q64.64.
pub(crate) const QUARTER_PI_RAW: i128 = 14_488_038_916_154_245_685;
/// `3π/2` rounded to nearest Q64.64.
pub(crate) const THREE_HALF_PI_RAW: i128 = 86_928_233_496_925_474_109;
/// `π/180` rounded to nearest Q64.64.
pub(crate) const DEG_TO_RAD_RAW: i128 = 321_956_420_358_983_237;
/// `180/π` rounded to nearest Q64.64.
pub(crate) const RAD_TO_DEG_RAW: i128 = 1_056_920_581_181_520_441_539;

fn round_shift_right_u64(value: u64, shift: u32) -> u64 {
    if shift == 0 {
        return value;
    }
    if shift >= 64 {
        return 0;
    }

    let q = value >> shift;
    let mask = (1_u64 << shift) - 1;
    let r = value & mask;
    let half = 1_u64 << (shift - 1);

    if r > half || (r == half && (q & 1) == 1) {
        q + 1
    } else {
        q
    }
}

fn round_shift_right_u128(value: u128, shift: u32) -> u128 {
    if shift == 0 {
        return value;
    }
    if shift >= 128 {
        return 0;
    }

    let q = value >> shift;
    let mask = (1_u128 << shift) - 1;
    let r = value & mask;
    let half = 1_u128 << (shift - 1);

    if r > half || (r == half && (q & 1) == 1) {
        q + 1
    } else {
        q
    }
}

/// Reinterprets a magnitude as two's complement and applies the sign.
#[allow(clippy::cast_possible_wrap)]
fn apply_sign(magnitude: u128, negative: bool) -> i128 {
    let signed = magnitude as i128;
    if negative {
        signed.wrapping_neg()
    } else {
        signed
    }
}

/// Full 256-bit product of two `u128` values as `(high, low)` halves.
fn widening_mul_u128(a: u128, b: u128) -> (u128, u128) {
    let (a_lo, a_hi) = (a & LOW_MASK, a >> 64);
    let (b_lo, b_hi) = (b & LOW_MASK, b >> 64);

    let ll = a_lo * b_lo;
    let lh = a_lo * b_hi;
    let hl = a_hi * b_lo;
    let hh = a_hi * b_hi;

    // At most 3 * (2^64 - 1): no overflow.
    let mid = (ll >> 64) + (lh & LOW_MASK) + (hl & LOW_MASK);
    let lo = (ll & LOW_MASK) | (mid << 64);
    let hi = hh + (lh >> 64) + (hl >> 64) + (mid >> 64);
    (hi, lo)
}

/// Q64.64 multiply: 256-bit product, shifted right by 64 with ties-to-even.
///
/// Rounding is applied to the magnitude so `(-a) * b == -(a * b)` exactly.
pub(crate) fn mul_raw(a: i128, b: i128) -> i128 {
    let negative = (a < 0) != (b < 0);
    let (hi, lo) = widening_mul_u128(a.unsigned_abs(), b.unsigned_abs());

    let q = (hi << 64) | (lo >> 64);
    let r = lo & LOW_MASK;
    let half = 1_u128 << 63;
    let rounded = if r > half || (r == half && (q & 1) == 1) {
        q.wrapping_add(1)
    } else {
        q
    };

    apply_sign(rounded, negative)
}

/// Q64.64 product of two magnitudes, or `None` when it needs more than
/// 128 bits. Rounds ties-to-even like [`mul_raw`].
pub(crate) fn checked_mul_magnitude(a: u128, b: u128) -> Option<u128> {
    let (hi, lo) = widening_mul_u128(a, b);
    if hi >> 64 != 0 {
        return None;
    }
    let q = (hi << 64) | (lo >> 64);
    let r = lo & LOW_MASK;
    let half = 1_u128 << 63;
    if r > half || (r == half && (q & 1) == 1) {
        q.checked_add(1)
    } else {
        Some(q)
    }
}

/// Divides `a` by a non-zero magnitude `d`, rounding ties-to-even.
///
/// Callers pass `d >= |a|`, which keeps the quotient within `[-1, 1]`.
pub(crate) fn div_by_magnitude(a: i128, d: u128) -> i128 {
    apply_sign(div_magnitude(a.unsigned_abs(), d), a < 0)
}

/// Divides magnitudes, producing a Q64.64 magnitude rounded ties-to-even.
///
/// Integer division by zero panics, matching primitive `/`.
fn div_magnitude(n: u128, d: u128) -> u128 {
    let mut q = n / d;
    let mut r = n % d;
    // r < d <= 2^127, so doubling r never overflows.
    for _ in 0..FRAC_BITS {
        r <<= 1;
        q <<= 1;
        if r >= d {
            r -= d;
            q |= 1;
        }
    }
    let gap = d - r;
    if r > gap || (r == gap && (q & 1) == 1) {
        q.wrapping_add(1)
    } else {
        q
    }
}

/// Q64.64 divide, or `None` when `b == 0`.
pub(crate) fn div_raw(a: i128, b: i128) -> Option<i128> {
    if b == 0 {
        return None;
    }
    Some(div_raw_nonzero(a, b))
}

/// Q64.64 divide for a divisor already known to be non-zero.
///
/// Panics on a zero divisor exactly as primitive integer division does.
pub(crate) fn div_raw_nonzero(a: i128, b: i128) -> i128 {
    let negative = (a < 0) != (b < 0);
    let q = div_magnitude(a.unsigned_abs(), b.unsigned_abs());
    apply_sign(q, negative)
}

/// Q64.64 square root rounded to nearest, or `None` for negative input.
pub(crate) fn sqrt_raw(a: i128) -> Option<i128> {
    (a >= 0).then(|| sqrt_nonneg(a))
}

/// Square root of a raw value the caller knows is non-negative.
///
/// A negative input is treated as its magnitude.
pub(crate) fn sqrt_nonneg(a: i128) -> i128 {
    // The root of a value below 2^128 is below 2^96.
    #[allow(clippy::cast_possible_wrap)]
    let root = sqrt_magnitude(a.unsigned_abs()) as i128;
    root
}

/// Digit-by-digit square root over the 192-bit radicand `a << 64`.
fn sqrt_magnitude(a: u128) -> u128 {
    let mut root: u128 = 0;
    let mut rem: u128 = 0;
    for i in (0..96_u32).rev() {
        let bit = 2 * i;
        let pair = if bit >= FRAC_BITS {
            (a >> (bit - FRAC_BITS)) & 3
        } else {
            0
        };
        rem = (rem << 2) | pair;
        let trial = (root << 2) | 1;
        root <<= 1;
        if rem >= trial {
            rem -= trial;
            root |= 1;
        }
    }
    // root^2 + root < (root + 1/2)^2, so this rounds to nearest.
    if rem > root {
        root += 1;
    }
    root
}

/// Ratio `n / d` of two magnitudes with `n <= d` and `d != 0`.
///
/// The result lies in `[0, 1]` and therefore always fits the raw range.
pub(crate) fn unit_ratio(n: u128, d: u128) -> i128 {
    #[allow(clippy::cast_possible_wrap)]
    let q = div_magnitude(n, d) as i128;
    q
}

/// Deterministically converts an `f64` to a Q64.64 raw `i128`.
///
/// Returns `None` for NaN, infinities, and magnitudes outside the Q64.64
/// range. Rounds to nearest with ties-to-even at the 2^-64 boundary.
pub(crate) fn from_f64(value: f64) -> Option<i128> {
    if !value.is_finite() {
        return None;
    }

    let bits = value.to_bits();
    let sign = (bits >> 63) != 0;
    // Masking yields a value in 0..=2047.
    #[allow(clippy::cast_possible_truncation)]
    let exp = ((bits >> 52) & 0x7ff) as i32;
    let mant = bits & ((1_u64 << 52) - 1);

    if exp == 0 && mant == 0 {
        return Some(0);
    }

    let mantissa: u64 = if exp == 0 { mant } else { (1_u64 << 52) | mant };
    let unbiased = if exp == 0 { -1022 } else { exp - 1023 };
    #[allow(clippy::cast_possible_wrap)]
    let shift = unbiased + (FRAC_BITS as i32 - 52);

    let abs: u128 = if shift >= 0 {
        let shift_u = shift.unsigned_abs();
        // mantissa >= 2^52 here, so larger shifts exceed 2^127.
        if shift_u > 75 {
            return None;
        }
        u128::from(mantissa) << shift_u
    } else {
        u128::from(round_shift_right_u64(mantissa, shift.unsigned_abs()))
    };

    let limit = i128::MAX.unsigned_abs() + u128::from(sign);
    if abs > limit {
        return None;
    }
    Some(apply_sign(abs, sign))
}

/// Converts a Q64.64 raw `i128` to the nearest `f64` (ties-to-even).
pub(crate) fn to_f64(raw: i128) -> f64 {
    if raw == 0 {
        return 0.0;
    }

    let sign = raw.is_negative();
    let abs = raw.unsigned_abs();

    let k = 127_u32 - abs.leading_zeros();
    #[allow(clippy::cast_possible_wrap)]
    let mut exp = k as i32 - FRAC_BITS as i32;

    let mut sig: u128 = if k > 52 {
        round_shift_right_u128(abs, k - 52)
    } else {
        abs << (52 - k)
    };

    if sig >= (1_u128 << 53) {
        sig >>= 1;
        exp += 1;
    }

    #[allow(clippy::cast_sign_loss)]
    let exp_field = (exp + 1023) as u64;
    #[allow(clippy::cast_possible_truncation)]
    let mantissa = (sig & ((1_u128 << 52) - 1)) as u64;
    let bits = (u64::from(sign) << 63) | (exp_field << 52) | mantissa;
    f64::from_bits(bits)
}
