// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use core::fmt;

/// How one bounding volume relates to another.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContainmentType {
    /// The volumes are separate.
    Disjoint,
    /// The queried volume lies entirely inside the other.
    Contains,
    /// The volumes overlap but neither contains the other.
    Intersects,
}

impl fmt::Display for ContainmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Disjoint => "Disjoint",
            Self::Contains => "Contains",
            Self::Intersects => "Intersects",
        })
    }
}
