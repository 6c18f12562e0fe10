// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use core::fmt;
use core::ops::Mul;

use crate::error::MathError;
use crate::math::{DFix128, Mat4, Quat, Tolerance, Vec3};

/// Row-major 3×3 matrix of Q64.64 scalars.
///
/// Rows are [`Vec3`]s and vectors are rows: `v * M` combines the rows of `M`
/// weighted by the components of `v`. Nothing requires the matrix to be
/// orthonormal; only the rotation factories promise it (for unit input).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mat3 {
    rows: [Vec3; 3],
}

impl Mat3 {
    /// The identity matrix.
    pub const IDENTITY: Self = Self::from_rows(Vec3::UNIT_X, Vec3::UNIT_Y, Vec3::UNIT_Z);

    /// The all-zero matrix.
    pub const ZERO: Self = Self::from_rows(Vec3::ZERO, Vec3::ZERO, Vec3::ZERO);

    /// Builds a matrix from its three rows.
    pub const fn from_rows(x: Vec3, y: Vec3, z: Vec3) -> Self {
        Self { rows: [x, y, z] }
    }

    /// First row (`M11 M12 M13`).
    pub const fn row_x(&self) -> Vec3 {
        self.rows[0]
    }

    /// Second row (`M21 M22 M23`).
    pub const fn row_y(&self) -> Vec3 {
        self.rows[1]
    }

    /// Third row (`M31 M32 M33`).
    pub const fn row_z(&self) -> Vec3 {
        self.rows[2]
    }

    /// Rows as nested arrays, `[row][column]`.
    pub const fn to_array(self) -> [[DFix128; 3]; 3] {
        [
            self.rows[0].to_array(),
            self.rows[1].to_array(),
            self.rows[2].to_array(),
        ]
    }

    /// Element at `(row, column)`, zero-based. Panics when out of range.
    pub fn at(&self, row: usize, column: usize) -> DFix128 {
        self.rows[row].component(column)
    }

    fn map_rows(&self, f: impl Fn(&Vec3) -> Vec3) -> Self {
        Self::from_rows(f(&self.rows[0]), f(&self.rows[1]), f(&self.rows[2]))
    }

    /// Element-wise sum.
    pub fn add(&self, other: &Self) -> Self {
        Self::from_rows(
            self.rows[0].add(&other.rows[0]),
            self.rows[1].add(&other.rows[1]),
            self.rows[2].add(&other.rows[2]),
        )
    }

    /// Element-wise difference.
    pub fn sub(&self, other: &Self) -> Self {
        Self::from_rows(
            self.rows[0].sub(&other.rows[0]),
            self.rows[1].sub(&other.rows[1]),
            self.rows[2].sub(&other.rows[2]),
        )
    }

    /// Scales every element.
    pub fn scale(&self, scalar: DFix128) -> Self {
        self.map_rows(|r| r.scale(scalar))
    }

    /// Row-vector product `self * other`.
    ///
    /// Row `i` of the result is `Σ_k self[i][k] * other.row[k]`.
    pub fn multiply(&self, other: &Self) -> Self {
        self.map_rows(|r| other.transform(r))
    }

    /// `selfᵀ * other` without materializing the transpose.
    pub fn multiply_transposed(&self, other: &Self) -> Self {
        self.transpose().multiply(other)
    }

    /// Swaps the off-diagonal pairs.
    pub fn transpose(&self) -> Self {
        let [a, b, c] = self.to_array();
        Self::from_rows(
            Vec3::new(a[0], b[0], c[0]),
            Vec3::new(a[1], b[1], c[1]),
            Vec3::new(a[2], b[2], c[2]),
        )
    }

    /// Scalar triple product `X · (Y × Z)`.
    pub fn determinant(&self) -> DFix128 {
        self.rows[0].dot(&self.rows[1].cross(&self.rows[2]))
    }

    /// Inverse via the adjugate built from row cross products, each entry
    /// divided by the determinant.
    ///
    /// Fails with [`MathError::InvalidOperation`] when the determinant is
    /// exactly zero. Near-singular input is not detected.
    pub fn invert(&self) -> Result<Self, MathError> {
        let [x, y, z] = self.rows;
        let yz = y.cross(&z);
        let zx = z.cross(&x);
        let xy = x.cross(&y);
        let det = x.dot(&yz);
        if det.is_zero() {
            return Err(MathError::invalid_operation(
                "Mat3::invert",
                "singular matrix",
            ));
        }
        Ok(Self::from_rows(
            yz.div_scalar(det)?,
            zx.div_scalar(det)?,
            xy.div_scalar(det)?,
        )
        .transpose())
    }

    /// Row-vector transform `v * M`.
    pub fn transform(&self, v: &Vec3) -> Vec3 {
        self.rows[0]
            .scale(v.x())
            .add(&self.rows[1].scale(v.y()))
            .add(&self.rows[2].scale(v.z()))
    }

    /// Transform by the transpose, `v * Mᵀ`.
    pub fn transform_transpose(&self, v: &Vec3) -> Vec3 {
        Vec3::new(
            v.dot(&self.rows[0]),
            v.dot(&self.rows[1]),
            v.dot(&self.rows[2]),
        )
    }

    /// Upper-left 3×3 block of a 4×4 matrix.
    pub fn from_mat4(m: &Mat4) -> Self {
        Self::from_rows(m.row(0).xyz(), m.row(1).xyz(), m.row(2).xyz())
    }

    /// Rotation matrix for a (unit) quaternion.
    pub fn from_quaternion(q: &Quat) -> Self {
        q.to_mat3()
    }

    /// Non-uniform scale along the axes.
    pub fn from_scale(scale: &Vec3) -> Self {
        let z = DFix128::ZERO;
        Self::from_rows(
            Vec3::new(scale.x(), z, z),
            Vec3::new(z, scale.y(), z),
            Vec3::new(z, z, scale.z()),
        )
    }

    /// Rotation of `angle` radians about a unit `axis` (Rodrigues).
    ///
    /// The axis is not normalized here.
    pub fn from_axis_angle(axis: &Vec3, angle: DFix128) -> Self {
        let rows = rodrigues_rows(axis, angle);
        Self::from_rows(rows[0], rows[1], rows[2])
    }

    /// Skew-symmetric matrix `[v]×`.
    ///
    /// `transform_transpose(w) == v × w` and `transform(w) == w × v`.
    pub fn cross_product(v: &Vec3) -> Self {
        let zero = DFix128::ZERO;
        Self::from_rows(
            Vec3::new(zero, -v.z(), v.y()),
            Vec3::new(v.z(), zero, -v.x()),
            Vec3::new(-v.y(), v.x(), zero),
        )
    }

    /// Returns `true` when every element is within `tolerance`.
    pub fn approx_eq(&self, other: &Self, tolerance: Tolerance) -> bool {
        self.rows
            .iter()
            .zip(other.rows.iter())
            .all(|(a, b)| a.approx_eq(b, tolerance))
    }
}

/// The three rotation rows shared by the 3×3 and 4×4 axis-angle factories.
pub(crate) fn rodrigues_rows(axis: &Vec3, angle: DFix128) -> [Vec3; 3] {
    let one = DFix128::ONE;
    let (x, y, z) = (axis.x(), axis.y(), axis.z());
    let (xx, yy, zz) = (x * x, y * y, z * z);
    let (xy, xz, yz) = (x * y, x * z, y * z);
    let (s, c) = angle.sin_cos();
    let omc = one - c;
    [
        Vec3::new(one + omc * (xx - one), z * s + omc * xy, -y * s + omc * xz),
        Vec3::new(-z * s + omc * xy, one + omc * (yy - one), x * s + omc * yz),
        Vec3::new(y * s + omc * xz, -x * s + omc * yz, one + omc * (zz - one)),
    ]
}

impl From<[[DFix128; 3]; 3]> for Mat3 {
    fn from(value: [[DFix128; 3]; 3]) -> Self {
        Self::from_rows(value[0].into(), value[1].into(), value[2].into())
    }
}

impl Mul for Mat3 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl Mul<DFix128> for Mat3 {
    type Output = Self;
    fn mul(self, rhs: DFix128) -> Self {
        self.scale(rhs)
    }
}

impl Mul<Mat3> for Vec3 {
    type Output = Vec3;
    fn mul(self, rhs: Mat3) -> Vec3 {
        rhs.transform(&self)
    }
}

impl fmt::Display for Mat3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}, {}, {}}}", self.rows[0], self.rows[1], self.rows[2])
    }
}
