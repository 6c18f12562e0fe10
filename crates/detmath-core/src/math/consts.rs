// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Process-wide table of named fixed-point constants.
//!
//! The table is built once, on first access, from exact integer ratios and is
//! read-only afterwards. No entry is derived from a float literal.

use once_cell::sync::Lazy;
use tracing::debug;

use crate::math::fixed_q64_64::{sqrt_nonneg, ONE_RAW};
use crate::math::DFix128;

/// Named constants shared by physics and geometry code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constants {
    /// 0
    pub zero: DFix128,
    /// 1
    pub one: DFix128,
    /// 2
    pub two: DFix128,
    /// 3
    pub three: DFix128,
    /// 5
    pub five: DFix128,
    /// 6
    pub six: DFix128,
    /// 16
    pub sixteen: DFix128,
    /// 24
    pub twenty_four: DFix128,
    /// 50
    pub fifty: DFix128,
    /// 60
    pub sixty: DFix128,
    /// 120
    pub one_hundred_twenty: DFix128,
    /// 180
    pub one_hundred_eighty: DFix128,
    /// 90 000
    pub ninety_thousand: DFix128,
    /// 600 000
    pub six_hundred_thousand: DFix128,
    /// 0.5
    pub half: DFix128,
    /// 0.25
    pub quarter: DFix128,
    /// -0.25
    pub neg_quarter: DFix128,
    /// 0.75
    pub three_quarters: DFix128,
    /// 0.125
    pub one_eighth: DFix128,
    /// 0.0625
    pub one_sixteenth: DFix128,
    /// 1/3
    pub one_third: DFix128,
    /// 4/3
    pub four_thirds: DFix128,
    /// 0.4
    pub two_fifths: DFix128,
    /// 1/12
    pub one_twelfth: DFix128,
    /// 0.1
    pub tenth: DFix128,
    /// 0.2
    pub fifth: DFix128,
    /// 0.3
    pub three_tenths: DFix128,
    /// 0.15
    pub fifteen_hundredths: DFix128,
    /// 0.8
    pub four_fifths: DFix128,
    /// 0.9
    pub nine_tenths: DFix128,
    /// 0.99
    pub ninety_nine_hundredths: DFix128,
    /// 1.1
    pub eleven_tenths: DFix128,
    /// 1.5
    pub three_halves: DFix128,
    /// 0.01
    pub hundredth: DFix128,
    /// 0.001
    pub thousandth: DFix128,
    /// 1e-4
    pub e_neg4: DFix128,
    /// 1e-5
    pub e_neg5: DFix128,
    /// 1e-7
    pub e_neg7: DFix128,
    /// 1e-9
    pub e_neg9: DFix128,
    /// -1e-9
    pub neg_e_neg9: DFix128,
    /// 1e-10
    pub e_neg10: DFix128,
    /// 1e-14
    pub e_neg14: DFix128,
    /// -0.9999
    pub neg_0_9999: DFix128,
    /// 1 - 1e-12, the slerp "nearly identical" threshold.
    pub one_minus_e_neg12: DFix128,
    /// Golden ratio `(1 + √5) / 2`.
    pub golden_ratio: DFix128,
    /// `π`
    pub pi: DFix128,
    /// `2π`
    pub two_pi: DFix128,
    /// `π/2`
    pub half_pi: DFix128,
    /// `π/4`
    pub quarter_pi: DFix128,
}

fn int(value: i64) -> DFix128 {
    DFix128::from_int(value)
}

/// `numerator / denominator` with a literal, non-zero denominator.
fn ratio(numerator: i64, denominator: i64) -> DFix128 {
    int(numerator) / int(denominator)
}

fn build() -> Constants {
    debug!("initializing fixed-point constant table");
    let root5 = DFix128::from_raw(sqrt_nonneg(5 * ONE_RAW));
    Constants {
        zero: DFix128::ZERO,
        one: DFix128::ONE,
        two: int(2),
        three: int(3),
        five: int(5),
        six: int(6),
        sixteen: int(16),
        twenty_four: int(24),
        fifty: int(50),
        sixty: int(60),
        one_hundred_twenty: int(120),
        one_hundred_eighty: int(180),
        ninety_thousand: int(90_000),
        six_hundred_thousand: int(600_000),
        half: ratio(1, 2),
        quarter: ratio(1, 4),
        neg_quarter: ratio(-1, 4),
        three_quarters: ratio(3, 4),
        one_eighth: ratio(1, 8),
        one_sixteenth: ratio(1, 16),
        one_third: ratio(1, 3),
        four_thirds: ratio(4, 3),
        two_fifths: ratio(2, 5),
        one_twelfth: ratio(1, 12),
        tenth: ratio(1, 10),
        fifth: ratio(1, 5),
        three_tenths: ratio(3, 10),
        fifteen_hundredths: ratio(15, 100),
        four_fifths: ratio(4, 5),
        nine_tenths: ratio(9, 10),
        ninety_nine_hundredths: ratio(99, 100),
        eleven_tenths: ratio(11, 10),
        three_halves: ratio(3, 2),
        hundredth: ratio(1, 100),
        thousandth: ratio(1, 1_000),
        e_neg4: ratio(1, 10_000),
        e_neg5: ratio(1, 100_000),
        e_neg7: ratio(1, 10_000_000),
        e_neg9: ratio(1, 1_000_000_000),
        neg_e_neg9: ratio(-1, 1_000_000_000),
        e_neg10: ratio(1, 10_000_000_000),
        e_neg14: ratio(1, 100_000_000_000_000),
        neg_0_9999: ratio(-9_999, 10_000),
        one_minus_e_neg12: DFix128::ONE - ratio(1, 1_000_000_000_000),
        golden_ratio: (DFix128::ONE + root5) / DFix128::TWO,
        pi: DFix128::PI,
        two_pi: DFix128::TWO_PI,
        half_pi: DFix128::HALF_PI,
        quarter_pi: DFix128::QUARTER_PI,
    }
}

static CONSTANTS: Lazy<Constants> = Lazy::new(build);

/// Returns the shared constant table, building it on first use.
pub fn constants() -> &'static Constants {
    &CONSTANTS
}
