// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![forbid(unsafe_code)]
#![deny(
    warnings,
    clippy::all,
    clippy::pedantic,
    rust_2018_idioms,
    missing_docs,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic
)]
#![allow(clippy::must_use_candidate, clippy::module_name_repetitions)]
#![doc = r"Bounding volumes for deterministic broad-phase collision.

This crate provides:
- Axis-aligned bounding boxes (`BoundingBox`).
- Bounding spheres (`BoundingSphere`).
- The three-way `ContainmentType` answer of box containment queries.

Design notes:
- Built on `detmath-core` Q64.64 vectors; every query is exact integer
  comparison, so two machines always agree on which pairs overlap.
- Overlap is inclusive on faces: touching boxes intersect.
- Sphere tests compare squared distances and never take a square root.
"]

/// Foundational bounding-volume types.
pub mod types;

pub use types::bounding_box::BoundingBox;
pub use types::bounding_sphere::BoundingSphere;
pub use types::containment::ContainmentType;
