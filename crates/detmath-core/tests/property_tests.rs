// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
//! Algebraic properties over generated inputs.

use proptest::prelude::*;
use proptest::test_runner::{Config as PropConfig, RngAlgorithm, TestRng, TestRunner};

use detmath_core::math::{DFix128, Mat3, Quat, Tolerance, Vec3};

const ONE_RAW: i128 = 1 << 64;

/// Scalars within roughly ±65536.
fn moderate() -> impl Strategy<Value = DFix128> {
    (-(ONE_RAW << 16)..(ONE_RAW << 16)).prop_map(DFix128::from_raw)
}

/// Divisors with magnitude in `[2^-16, 1]`.
fn unit_divisor() -> impl Strategy<Value = DFix128> {
    ((ONE_RAW >> 16)..=ONE_RAW, any::<bool>())
        .prop_map(|(raw, negative)| DFix128::from_raw(if negative { -raw } else { raw }))
}

fn vec3() -> impl Strategy<Value = Vec3> {
    (moderate(), moderate(), moderate()).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

#[test]
fn pinned_seed_division_round_trip() {
    const SEED_BYTES: [u8; 32] = [
        0x42, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0,
    ];
    let rng = TestRng::from_seed(RngAlgorithm::ChaCha, &SEED_BYTES);
    let mut runner = TestRunner::new_with_rng(PropConfig::default(), rng);

    runner
        .run(&(moderate(), unit_divisor()), |(a, b)| {
            let q = a.try_div(b).expect("non-zero divisor");
            // One rounding in the quotient, one in the product; |b| <= 1
            // keeps the quotient error from growing.
            prop_assert!(
                (q * b).approx_eq(a, Tolerance::from_raw(1)),
                "({a} / {b}) * {b} = {}",
                q * b
            );
            Ok(())
        })
        .expect("division round trip");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn add_then_sub_is_identity(a in any::<i128>(), b in any::<i128>()) {
        let (a, b) = (DFix128::from_raw(a), DFix128::from_raw(b));
        prop_assert_eq!((a + b) - b, a);
    }

    #[test]
    fn ordering_matches_raw(a in any::<i128>(), b in any::<i128>()) {
        prop_assert_eq!(DFix128::from_raw(a).cmp(&DFix128::from_raw(b)), a.cmp(&b));
    }

    #[test]
    fn multiplication_commutes(a in moderate(), b in moderate()) {
        prop_assert_eq!(a * b, b * a);
        prop_assert_eq!((-a) * b, -(a * b));
    }

    #[test]
    fn pythagorean_identity(raw in -(ONE_RAW << 8)..(ONE_RAW << 8)) {
        let (s, c) = DFix128::from_raw(raw).sin_cos();
        prop_assert!((s * s + c * c).approx_eq(DFix128::ONE, Tolerance::from_raw(64)));
    }

    #[test]
    fn sqrt_squares_back(raw in 0..(ONE_RAW << 32)) {
        let x = DFix128::from_raw(raw);
        let r = x.sqrt().expect("non-negative");
        // Nearest root: (r - ulp)² <= x <= (r + ulp)².
        let prev = r - DFix128::EPSILON;
        let next = r + DFix128::EPSILON;
        prop_assert!(prev * prev <= x);
        prop_assert!(next * next >= x);
    }

    #[test]
    fn normalize_yields_unit_length(v in vec3()) {
        prop_assume!(v.length_squared() > DFix128::from_raw(ONE_RAW >> 16));
        let n = v.normalize().expect("non-zero vector");
        let len = n.length().expect("non-negative");
        prop_assert!(len.approx_eq(DFix128::ONE, Tolerance::default()), "{v} -> {n} (len {len})");
    }

    #[test]
    fn normalize_is_unit_at_any_scale(x in any::<i128>(), y in any::<i128>(), z in any::<i128>()) {
        let v = Vec3::new(DFix128::from_raw(x), DFix128::from_raw(y), DFix128::from_raw(z));
        prop_assume!(v != Vec3::ZERO);
        let n = v.normalize().expect("non-zero vector");
        let len = n.length().expect("unit length");
        prop_assert!(len.approx_eq(DFix128::ONE, Tolerance::from_raw(16)), "{v} -> {n} (len {len})");
    }

    #[test]
    fn cross_is_orthogonal_for_axis_aligned_inputs(x in -1000_i64..1000, y in -1000_i64..1000, z in -1000_i64..1000) {
        let a = Vec3::from_ints(x, y, z);
        let b = Vec3::from_ints(z, x, y);
        let c = a.cross(&b);
        prop_assert_eq!(c.dot(&a), DFix128::ZERO);
        prop_assert_eq!(c.dot(&b), DFix128::ZERO);
        prop_assert_eq!(b.cross(&a), c.negate());
    }

    #[test]
    fn quaternion_times_conjugate_is_real(x in moderate(), y in moderate(), z in moderate(), w in moderate()) {
        let q = Quat::new(x, y, z, w);
        let p = q.multiply(&q.conjugate());
        prop_assert_eq!(p, Quat::new(DFix128::ZERO, DFix128::ZERO, DFix128::ZERO, q.length_squared()));
    }

    #[test]
    fn rotations_preserve_length(
        angle in -(ONE_RAW * 4)..(ONE_RAW * 4),
        v in vec3(),
    ) {
        let axis = Vec3::new(DFix128::from_int(2), DFix128::from_int(-1), DFix128::from_int(2))
            .div_scalar(DFix128::from_int(3))
            .expect("non-zero");
        let q = Quat::from_axis_angle(&axis, DFix128::from_raw(angle));
        let before = v.length_squared();
        let after = q.transform(&v).length_squared();
        // Relative tolerance: components reach 2^16 so squares reach 2^34.
        prop_assert!(after.approx_eq(before, Tolerance::from_raw(1 << 50)), "{before} vs {after}");
    }

    #[test]
    fn well_conditioned_inverse_round_trip(
        angle in -(ONE_RAW * 3)..(ONE_RAW * 3),
        sx in (ONE_RAW / 2)..(ONE_RAW * 4),
        sy in (ONE_RAW / 2)..(ONE_RAW * 4),
        sz in (ONE_RAW / 2)..(ONE_RAW * 4),
    ) {
        let scale = Mat3::from_scale(&Vec3::new(
            DFix128::from_raw(sx),
            DFix128::from_raw(sy),
            DFix128::from_raw(sz),
        ));
        let m = scale.multiply(&Mat3::from_axis_angle(&Vec3::UNIT_Y, DFix128::from_raw(angle)));
        let inv = m.invert().expect("non-singular");
        prop_assert!(m.multiply(&inv).approx_eq(&Mat3::IDENTITY, Tolerance::default()));
    }
}
