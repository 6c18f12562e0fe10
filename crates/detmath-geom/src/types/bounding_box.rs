// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use core::fmt;

use detmath_core::math::{DFix128, Vec3};
use detmath_core::{CanonicalBytes, MathError};

use crate::types::bounding_sphere::BoundingSphere;
use crate::types::containment::ContainmentType;

/// Axis-aligned bounding box.
///
/// `min <= max` per axis is expected but not enforced.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    min: Vec3,
    max: Vec3,
}

impl BoundingBox {
    /// Constructs a box from its minimum and maximum corners.
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Returns the minimum corner.
    pub const fn min(&self) -> Vec3 {
        self.min
    }

    /// Returns the maximum corner.
    pub const fn max(&self) -> Vec3 {
        self.max
    }

    /// Smallest box containing every point.
    ///
    /// # Errors
    /// [`MathError::InvalidOperation`] when `points` is empty.
    pub fn from_points(points: &[Vec3]) -> Result<Self, MathError> {
        let Some((first, rest)) = points.split_first() else {
            return Err(MathError::invalid_operation(
                "BoundingBox::from_points",
                "empty point list",
            ));
        };
        Ok(rest.iter().fold(Self::new(*first, *first), |acc, p| Self {
            min: p.min(&acc.min),
            max: p.max(&acc.max),
        }))
    }

    /// Smallest box containing `sphere`.
    pub fn from_sphere(sphere: &BoundingSphere) -> Self {
        let radius = Vec3::splat(sphere.radius());
        Self {
            min: sphere.center().sub(&radius),
            max: sphere.center().add(&radius),
        }
    }

    /// Returns `true` if the boxes overlap; touching faces count.
    ///
    /// Symmetric: `a.intersects(&b) == b.intersects(&a)`.
    pub fn intersects(&self, other: &Self) -> bool {
        let (a_min, a_max) = (self.min, self.max);
        let (b_min, b_max) = (other.min, other.max);
        a_max.x() >= b_min.x()
            && a_max.y() >= b_min.y()
            && a_max.z() >= b_min.z()
            && b_max.x() >= a_min.x()
            && b_max.y() >= a_min.y()
            && b_max.z() >= a_min.z()
    }

    /// Returns `true` if `sphere` touches or overlaps the box.
    ///
    /// Clamps the center into the box and compares squared distances.
    pub fn intersects_sphere(&self, sphere: &BoundingSphere) -> bool {
        let center = sphere.center();
        let closest = center.max(&self.min).min(&self.max);
        let offset = center.sub(&closest);
        offset.dot(&offset) <= sphere.radius() * sphere.radius()
    }

    /// Classifies `other` relative to this box.
    ///
    /// Disjointness is decided first, then full containment of `other`;
    /// anything else is a partial intersection.
    pub fn contains(&self, other: &Self) -> ContainmentType {
        let (a_min, a_max) = (self.min, self.max);
        let (b_min, b_max) = (other.min, other.max);
        if a_max.x() < b_min.x()
            || a_min.x() > b_max.x()
            || a_max.y() < b_min.y()
            || a_min.y() > b_max.y()
            || a_max.z() < b_min.z()
            || a_min.z() > b_max.z()
        {
            return ContainmentType::Disjoint;
        }
        if a_min.x() <= b_min.x()
            && a_max.x() >= b_max.x()
            && a_min.y() <= b_min.y()
            && a_max.y() >= b_max.y()
            && a_min.z() <= b_min.z()
            && a_max.z() >= b_max.z()
        {
            return ContainmentType::Contains;
        }
        ContainmentType::Intersects
    }

    /// Tightest box containing both inputs.
    pub fn merged(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(&other.min),
            max: self.max.max(&other.max),
        }
    }

    /// Product of the extents. Negative when exactly one or three axes are
    /// inverted.
    pub fn volume(&self) -> DFix128 {
        let diagonal = self.max.sub(&self.min);
        diagonal.x() * diagonal.y() * diagonal.z()
    }
}

impl CanonicalBytes for BoundingBox {
    fn write_canonical(&self, out: &mut Vec<u8>) {
        self.min.write_canonical(out);
        self.max.write_canonical(out);
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}, {{{}}}", self.min, self.max)
    }
}
