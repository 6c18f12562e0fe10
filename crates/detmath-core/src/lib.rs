// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! detmath-core: deterministic Q64.64 fixed-point math for physics.
//!
//! The scalar, vector, matrix and quaternion types here produce bit-identical
//! results across compilers, CPUs and optimization levels. Every value is a
//! plain `Copy` type with no shared state; the only process-wide data is the
//! read-only constant table behind [`math::constants`].
#![forbid(unsafe_code)]
#![deny(missing_docs, rust_2018_idioms, unused_must_use)]
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
#![allow(
    clippy::must_use_candidate,
    clippy::return_self_not_must_use,
    clippy::unreadable_literal,
    clippy::missing_const_for_fn,
    clippy::suboptimal_flops,
    clippy::redundant_pub_crate,
    clippy::many_single_char_names,
    clippy::module_name_repetitions,
    clippy::use_self
)]

/// Deterministic math subsystem (DFix128, Vec2/3/4, Mat3/4, Quat).
pub mod math;

mod encoding;
mod error;

/// Canonical raw-byte encoding and BLAKE3 fingerprints.
pub use encoding::{canonical_digest, CanonicalBytes, Digest};
/// Error taxonomy for fallible math operations.
pub use error::MathError;
