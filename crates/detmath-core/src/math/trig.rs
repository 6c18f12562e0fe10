// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Deterministic trigonometry on raw Q64.64 integers.
//!
//! Nothing here calls a platform transcendental; every step is integer
//! arithmetic, so results are bit-identical on every target.
//!
//! Strategy for `sin`/`cos`:
//! - range-reduce `|angle|` to `[0, TAU)` with an integer remainder
//! - split into quadrants using comparisons
//! - evaluate Taylor series on `[0, π/4]`, using the complementary angle
//!   above `π/4`
//! - apply quadrant symmetries, then restore the sign of `sin`
//!
//! Strategy for `atan`/`atan2`:
//! - fold the ratio into `[0, 1]` using `atan(z) = π/2 - atan(1/z)`
//! - halve the angle twice with `atan(z) = 2·atan(z / (1 + √(1 + z²)))`
//! - sum the alternating series on the reduced argument

use super::fixed_q64_64::{
    div_raw_nonzero, mul_raw, sqrt_nonneg, unit_ratio, HALF_PI_RAW, ONE_RAW, PI_RAW,
    QUARTER_PI_RAW, TAU_RAW, THREE_HALF_PI_RAW,
};

/// `sin(x)` for `x` in `[0, π/4]`.
fn sin_series(x: i128) -> i128 {
    let x2 = mul_raw(x, x);
    let mut term = x;
    let mut sum = x;
    let mut n: i128 = 1;
    while term != 0 {
        term = -mul_raw(term, x2) / ((2 * n) * (2 * n + 1));
        sum += term;
        n += 1;
    }
    sum
}

/// `cos(x)` for `x` in `[0, π/4]`.
fn cos_series(x: i128) -> i128 {
    let x2 = mul_raw(x, x);
    let mut term = ONE_RAW;
    let mut sum = ONE_RAW;
    let mut n: i128 = 1;
    while term != 0 {
        term = -mul_raw(term, x2) / ((2 * n - 1) * (2 * n));
        sum += term;
        n += 1;
    }
    sum
}

fn sin_cos_quarter_wave(a: i128) -> (i128, i128) {
    if a <= QUARTER_PI_RAW {
        (sin_series(a), cos_series(a))
    } else {
        let b = HALF_PI_RAW - a;
        (cos_series(b), sin_series(b))
    }
}

/// Deterministic `sin` and `cos` of a raw angle in radians.
///
/// `sin(-x)` is the exact negation of `sin(x)` and `cos(-x) == cos(x)`
/// bit-for-bit, because the sign is stripped before reduction.
pub(crate) fn sin_cos_raw(angle: i128) -> (i128, i128) {
    let negative = angle < 0;
    // TAU_RAW is positive and the remainder is below it.
    #[allow(clippy::cast_possible_wrap)]
    let r = (angle.unsigned_abs() % TAU_RAW.unsigned_abs()) as i128;

    let (quadrant, a) = if r < HALF_PI_RAW {
        (0_u8, r)
    } else if r < PI_RAW {
        (1_u8, r - HALF_PI_RAW)
    } else if r < THREE_HALF_PI_RAW {
        (2_u8, r - PI_RAW)
    } else {
        (3_u8, r - THREE_HALF_PI_RAW)
    };

    let (s, c) = sin_cos_quarter_wave(a);
    let (s, c) = match quadrant {
        0 => (s, c),
        1 => (c, -s),
        2 => (-s, -c),
        // 3
        _ => (-c, s),
    };

    if negative {
        (-s, c)
    } else {
        (s, c)
    }
}

/// `atan(z)` for `z` in `[0, 1]`.
fn atan_unit(z: i128) -> i128 {
    let mut z = z;
    for _ in 0..2 {
        let root = sqrt_nonneg(ONE_RAW + mul_raw(z, z));
        z = div_raw_nonzero(z, ONE_RAW + root);
    }

    // z <= tan(π/16) now; the series converges quickly.
    let z2 = mul_raw(z, z);
    let mut power = z;
    let mut sum = z;
    let mut k: i128 = 1;
    loop {
        power = mul_raw(power, z2);
        let term = power / (2 * k + 1);
        if term == 0 {
            break;
        }
        if k % 2 == 1 {
            sum -= term;
        } else {
            sum += term;
        }
        k += 1;
    }
    sum << 2
}

/// Four-quadrant arctangent of raw `y` and `x`, in `(-π, π]`.
///
/// `atan2(0, 0)` is defined as `0`.
pub(crate) fn atan2_raw(y: i128, x: i128) -> i128 {
    if x == 0 && y == 0 {
        return 0;
    }
    let ax = x.unsigned_abs();
    let ay = y.unsigned_abs();
    let base = if ay <= ax {
        atan_unit(unit_ratio(ay, ax))
    } else {
        HALF_PI_RAW - atan_unit(unit_ratio(ax, ay))
    };
    let angle = if x < 0 { PI_RAW - base } else { base };
    if y < 0 {
        -angle
    } else {
        angle
    }
}

/// Arctangent of a raw value, in `[-π/2, π/2]`.
pub(crate) fn atan_raw(z: i128) -> i128 {
    atan2_raw(z, ONE_RAW)
}
