// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use core::fmt;

use detmath_core::math::{DFix128, Vec3};
use detmath_core::CanonicalBytes;

use crate::types::bounding_box::BoundingBox;

/// Sphere given by center and radius.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingSphere {
    center: Vec3,
    radius: DFix128,
}

impl BoundingSphere {
    /// Constructs a sphere. The radius is not validated.
    pub const fn new(center: Vec3, radius: DFix128) -> Self {
        Self { center, radius }
    }

    /// Returns the center.
    pub const fn center(&self) -> Vec3 {
        self.center
    }

    /// Returns the radius.
    pub const fn radius(&self) -> DFix128 {
        self.radius
    }

    /// Returns `true` if the spheres touch or overlap.
    pub fn intersects(&self, other: &Self) -> bool {
        let reach = self.radius + other.radius;
        self.center.distance_squared(&other.center) <= reach * reach
    }

    /// Returns `true` if the sphere touches or overlaps `bounding_box`.
    pub fn intersects_box(&self, bounding_box: &BoundingBox) -> bool {
        bounding_box.intersects_sphere(self)
    }
}

impl CanonicalBytes for BoundingSphere {
    fn write_canonical(&self, out: &mut Vec<u8>) {
        self.center.write_canonical(out);
        self.radius.write_canonical(out);
    }
}

impl fmt::Display for BoundingSphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{Center: {}, Radius: {}}}", self.center, self.radius)
    }
}
