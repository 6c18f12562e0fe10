// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
//! Scalar arithmetic, conversion and error contract of `DFix128`.

use detmath_core::math::{constants, DFix128, Tolerance};
use detmath_core::MathError;

fn fx(value: f64) -> DFix128 {
    DFix128::try_from_f64(value).expect("finite authoring literal")
}

/// Raw value from the (low word, high word) pair used by legacy golden data.
#[allow(clippy::cast_possible_wrap)]
fn words(lo: u64, hi: u64) -> DFix128 {
    DFix128::from_raw(((u128::from(hi) << 64) | u128::from(lo)) as i128)
}

#[test]
fn add_matches_literal_sum() {
    assert_eq!(fx(10.2) + fx(21.67), fx(31.87));
}

#[test]
fn sub_golden() {
    assert_eq!(fx(10.2) - fx(21.67), words(9776774359066017792, 18446744073709551604));
}

#[test]
fn mul_golden() {
    assert_eq!(fx(123.1234) * fx(89.9867), words(8641539223746175909, 11079));
}

#[test]
fn div_golden() {
    assert_eq!(fx(53.123) / fx(21.67), words(8327849435768362771, 2));
    assert_eq!(
        fx(12.56).try_div(DFix128::from_int(3)).map(DFix128::raw),
        Ok(77_230_368_521_930_659_157)
    );
}

#[test]
fn sqrt_golden() {
    assert_eq!(DFix128::from_int(256).sqrt(), Ok(DFix128::from_int(16)));
    assert_eq!(
        DFix128::TWO.sqrt().map(DFix128::raw),
        Ok(26_087_635_650_665_564_425)
    );
    assert_eq!(DFix128::ZERO.sqrt(), Ok(DFix128::ZERO));
}

#[test]
fn mul_rounds_half_to_even() {
    let half_ulp = DFix128::from_raw(1);
    // 1 ulp * 0.5 = 0.5 ulp, ties to even (0).
    assert_eq!(half_ulp * DFix128::HALF, DFix128::ZERO);
    // 3 ulp * 0.5 = 1.5 ulp, ties to even (2).
    assert_eq!(DFix128::from_raw(3) * DFix128::HALF, DFix128::from_raw(2));
    // Rounding is symmetric under negation.
    assert_eq!(DFix128::from_raw(-3) * DFix128::HALF, DFix128::from_raw(-2));
}

#[test]
fn div_by_zero_is_an_error() {
    assert_eq!(DFix128::ONE.try_div(DFix128::ZERO), Err(MathError::DivideByZero));
    assert_eq!(DFix128::ZERO.recip(), Err(MathError::DivideByZero));
    assert!(matches!(
        DFix128::from_ratio(1, 0),
        Err(MathError::DivideByZero)
    ));
}

#[test]
#[should_panic]
fn div_operator_panics_on_zero() {
    let _ = DFix128::ONE / DFix128::ZERO;
}

#[test]
fn sqrt_of_negative_is_domain_error() {
    assert!(matches!(
        DFix128::NEG_ONE.sqrt(),
        Err(MathError::DomainError { op: "DFix128::sqrt", .. })
    ));
    assert!(DFix128::from_raw(-1).sqrt().is_err());
}

#[test]
fn add_and_sub_wrap() {
    assert_eq!(DFix128::MAX + DFix128::EPSILON, DFix128::MIN);
    assert_eq!(DFix128::MIN - DFix128::EPSILON, DFix128::MAX);
    assert_eq!(-DFix128::MIN, DFix128::MIN);
}

#[test]
fn comparisons_are_raw_integer_order() {
    let mut values = vec![
        DFix128::ONE,
        DFix128::MIN,
        DFix128::ZERO,
        DFix128::NEG_ONE,
        DFix128::EPSILON,
        DFix128::MAX,
    ];
    values.sort();
    assert_eq!(
        values,
        vec![
            DFix128::MIN,
            DFix128::NEG_ONE,
            DFix128::ZERO,
            DFix128::EPSILON,
            DFix128::ONE,
            DFix128::MAX,
        ]
    );
    assert!(fx(-0.5) < fx(-0.25));
    assert_eq!(fx(2.5).max(fx(-3.0)), fx(2.5));
    assert_eq!(fx(7.0).clamp(DFix128::ZERO, DFix128::ONE), DFix128::ONE);
}

#[test]
fn float_conversion_edges() {
    assert!(DFix128::try_from_f64(f64::NAN).is_err());
    assert!(DFix128::try_from_f64(f64::INFINITY).is_err());
    assert!(DFix128::try_from_f64(9.3e18).is_err());
    assert_eq!(DFix128::try_from_f64(-9_223_372_036_854_775_808.0), Ok(DFix128::MIN));
    assert_eq!(fx(0.5), DFix128::HALF);
    assert_eq!(fx(-0.0), DFix128::ZERO);
    assert_eq!(DFix128::try_from(1.0_f64), Ok(DFix128::ONE));
    assert!((fx(3.25).to_f64() - 3.25).abs() < f64::EPSILON);
}

#[test]
fn integer_views_truncate_toward_zero() {
    assert_eq!(fx(3.75).to_i64(), 3);
    assert_eq!(fx(-3.75).to_i64(), -3);
    assert_eq!(DFix128::from(7_i32), DFix128::from_int(7));
    assert_eq!(DFix128::from(-7_i64).to_i64(), -7);
}

#[test]
fn floor_ceil_frac() {
    assert_eq!(fx(2.25).floor(), DFix128::TWO);
    assert_eq!(fx(2.25).ceil(), DFix128::from_int(3));
    assert_eq!(fx(2.25).frac(), fx(0.25));
    assert_eq!(fx(-2.25).floor(), DFix128::from_int(-3));
    assert_eq!(fx(-2.25).ceil(), DFix128::from_int(-2));
    assert_eq!(fx(-2.25).frac(), fx(0.75));
    assert_eq!(DFix128::TWO.ceil(), DFix128::TWO);
}

#[test]
fn sign_helpers() {
    assert_eq!(fx(-4.5).abs(), fx(4.5));
    assert_eq!(fx(-4.5).signum(), DFix128::NEG_ONE);
    assert_eq!(DFix128::ZERO.signum(), DFix128::ZERO);
    assert_eq!(fx(0.001).signum(), DFix128::ONE);
    assert!(fx(-0.001).is_negative());
}

#[test]
fn compound_assignment_replaces_value() {
    let mut v = DFix128::from_int(10);
    v += DFix128::from_int(5);
    v -= DFix128::from_int(3);
    v *= DFix128::HALF;
    v /= DFix128::from_int(3);
    assert_eq!(v, DFix128::TWO);
}

#[test]
fn remainder_keeps_dividend_sign() {
    assert_eq!(fx(7.5) % DFix128::TWO, fx(1.5));
    assert_eq!(fx(-7.5) % DFix128::TWO, fx(-1.5));
}

#[test]
fn bitwise_operators_act_on_raw_bits() {
    let one_and_half = fx(1.5);
    assert_eq!(one_and_half & DFix128::ONE, DFix128::ONE);
    assert_eq!(DFix128::ONE | DFix128::HALF, one_and_half);
    assert_eq!(one_and_half ^ DFix128::HALF, DFix128::ONE);
    assert_eq!(!DFix128::ZERO, -DFix128::EPSILON);
    assert_eq!(!fx(2.25), -fx(2.25) - DFix128::EPSILON);
}

#[test]
fn shifts_scale_by_powers_of_two() {
    assert_eq!(DFix128::ONE << 3, DFix128::from_int(8));
    // Arithmetic shift keeps the sign.
    assert_eq!(DFix128::from_int(-8) >> 2, DFix128::from_int(-2));
    assert_eq!(DFix128::EPSILON >> 1, DFix128::ZERO);
    assert_eq!(-DFix128::EPSILON >> 5, -DFix128::EPSILON);
}

#[test]
fn bitwise_compound_assignment() {
    let mut v = DFix128::ONE;
    v |= DFix128::HALF;
    v <<= 1;
    assert_eq!(v, DFix128::from_int(3));
    v >>= 1;
    v ^= DFix128::HALF;
    assert_eq!(v, DFix128::ONE);
    v &= DFix128::HALF;
    assert!(v.is_zero());
    let mut r = fx(7.5);
    r %= DFix128::TWO;
    assert_eq!(r, fx(1.5));
}

#[test]
fn ratio_construction_matches_division() {
    assert_eq!(DFix128::from_ratio(1, 3), Ok(constants().one_third));
    assert_eq!(DFix128::from_ratio(-1, 4), Ok(constants().neg_quarter));
}

#[test]
fn constant_table_values() {
    let c = constants();
    assert_eq!(c.two, DFix128::TWO);
    assert_eq!(c.one_eighth * DFix128::from_int(8), DFix128::ONE);
    assert_eq!(c.pi, DFix128::PI);
    assert!(c.one_minus_e_neg12 < DFix128::ONE);
    assert!(c.e_neg14 > DFix128::ZERO);
    assert!(c.golden_ratio.approx_eq(fx(1.618_033_988_749_895), Tolerance::default()));
}

#[test]
fn display_is_decimal() {
    assert_eq!(fx(1.5).to_string(), "1.5");
    assert_eq!(DFix128::from_int(-3).to_string(), "-3");
}

#[test]
fn tolerance_bounds_are_inclusive() {
    let a = DFix128::ONE;
    let b = DFix128::ONE + DFix128::from_raw(10);
    assert!(a.approx_eq(b, Tolerance::from_raw(10)));
    assert!(!a.approx_eq(b, Tolerance::from_raw(9)));
    assert!(!a.approx_eq(b, Tolerance::exact()));
    assert_eq!(Tolerance::default().absolute(), 1 << 32);
}
