// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Canonical byte encoding of fixed-point values.
//!
//! The raw `i128` is the only persistence format other systems should rely
//! on for exact round-tripping. Each scalar is written as 16 little-endian
//! bytes; composite values write their scalars in component order (matrices
//! row by row). The float-converted and `Display` forms are never canonical.

use crate::math::{DFix128, Mat3, Mat4, Quat, Vec2, Vec3, Vec4};

/// BLAKE3 digest bytes.
pub type Digest = [u8; 32];

/// Domain separation prefix for [`canonical_digest`].
const DIGEST_DOMAIN: &[u8] = b"detmath:q64.64:v1";

/// Values with a canonical, platform-independent byte encoding.
pub trait CanonicalBytes {
    /// Appends the canonical encoding of `self` to `out`.
    fn write_canonical(&self, out: &mut Vec<u8>);

    /// Returns the canonical encoding of `self`.
    fn canonical_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.write_canonical(&mut out);
        out
    }
}

/// BLAKE3 fingerprint of a value's canonical encoding.
///
/// Two machines that computed the same value produce the same digest, which
/// makes this the cheap way to compare simulation state across platforms.
pub fn canonical_digest<T: CanonicalBytes + ?Sized>(value: &T) -> Digest {
    let mut hasher = blake3::Hasher::new();
    hasher.update(DIGEST_DOMAIN);
    hasher.update(&value.canonical_bytes());
    hasher.finalize().into()
}

impl DFix128 {
    /// Raw value as 16 little-endian bytes.
    pub const fn to_raw_le_bytes(self) -> [u8; 16] {
        self.raw().to_le_bytes()
    }

    /// Inverse of [`DFix128::to_raw_le_bytes`]; exact.
    pub const fn from_raw_le_bytes(bytes: [u8; 16]) -> Self {
        Self::from_raw(i128::from_le_bytes(bytes))
    }
}

impl CanonicalBytes for DFix128 {
    fn write_canonical(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_raw_le_bytes());
    }
}

impl<T: CanonicalBytes> CanonicalBytes for [T] {
    fn write_canonical(&self, out: &mut Vec<u8>) {
        for item in self {
            item.write_canonical(out);
        }
    }
}

impl<T: CanonicalBytes, const N: usize> CanonicalBytes for [T; N] {
    fn write_canonical(&self, out: &mut Vec<u8>) {
        self.as_slice().write_canonical(out);
    }
}

impl CanonicalBytes for Vec2 {
    fn write_canonical(&self, out: &mut Vec<u8>) {
        self.to_array().write_canonical(out);
    }
}

impl CanonicalBytes for Vec3 {
    fn write_canonical(&self, out: &mut Vec<u8>) {
        self.to_array().write_canonical(out);
    }
}

impl CanonicalBytes for Vec4 {
    fn write_canonical(&self, out: &mut Vec<u8>) {
        self.to_array().write_canonical(out);
    }
}

impl CanonicalBytes for Quat {
    fn write_canonical(&self, out: &mut Vec<u8>) {
        self.to_array().write_canonical(out);
    }
}

impl CanonicalBytes for Mat3 {
    fn write_canonical(&self, out: &mut Vec<u8>) {
        self.to_array().write_canonical(out);
    }
}

impl CanonicalBytes for Mat4 {
    fn write_canonical(&self, out: &mut Vec<u8>) {
        self.to_array().write_canonical(out);
    }
}
