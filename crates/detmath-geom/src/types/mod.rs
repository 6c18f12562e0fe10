// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Bounding volumes used by the collision broad phase.
//!
//! Determinism notes:
//! - Boxes are not validated on construction; a box with `min > max` on some
//!   axis is accepted and simply never intersects anything on that axis.
//! - Every predicate is a fixed sequence of raw-integer comparisons.

#[doc = "Axis-aligned bounding boxes."]
pub mod bounding_box;
#[doc = "Bounding spheres."]
pub mod bounding_sphere;
#[doc = "Result of a box containment query."]
pub mod containment;
