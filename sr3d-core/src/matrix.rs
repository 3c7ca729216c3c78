//! 4x4 float matrix with column-major storage
use crate::{
    error::{Error, Result},
    vector::Vector4,
};
use approx::{AbsDiffEq, RelativeEq};
use std::ops::{Add, Index, IndexMut, Mul, Sub};

const DIM: usize = 4;
const LEN: usize = DIM * DIM;

/// A 4x4 matrix of `f32`.
///
/// Element `(row, col)` lives at offset `row + col * 4` of the backing array,
/// which is the same layout `nalgebra` uses. All arithmetic returns a new
/// matrix and leaves the operands untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Matrix4x4 {
    data: [f32; LEN],
}

impl Matrix4x4 {
    pub const ZERO: Self = Self { data: [0.0; LEN] };

    #[rustfmt::skip]
    pub const IDENTITY: Self = Self {
        data: [
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    /// Creates a matrix with all 16 cells set to `value`.
    #[inline]
    pub const fn splat(value: f32) -> Self {
        Self { data: [value; LEN] }
    }

    #[inline]
    pub const fn from_column_major(data: [f32; LEN]) -> Self {
        Self { data }
    }

    /// Creates a matrix from up to 16 column-major values. Cells without a
    /// corresponding value are zero and values past the 16th are ignored.
    pub fn from_slice(values: &[f32]) -> Self {
        let mut data = [0.0; LEN];
        let count = values.len().min(LEN);
        data[..count].copy_from_slice(&values[..count]);
        Self { data }
    }

    /// Creates a matrix from its rows, which reads naturally in source code.
    pub fn from_rows(rows: [[f32; DIM]; DIM]) -> Self {
        let mut matrix = Self::ZERO;
        for (row, values) in rows.iter().enumerate() {
            for (col, &value) in values.iter().enumerate() {
                matrix[(row, col)] = value;
            }
        }
        matrix
    }

    #[inline]
    pub fn as_column_major_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn row(&self, row: usize) -> Vector4 {
        Vector4::new(
            self[(row, 0)],
            self[(row, 1)],
            self[(row, 2)],
            self[(row, 3)],
        )
    }

    pub fn column(&self, col: usize) -> Vector4 {
        Vector4::new(
            self[(0, col)],
            self[(1, col)],
            self[(2, col)],
            self[(3, col)],
        )
    }

    pub fn transpose(&self) -> Self {
        let mut transposed = Self::ZERO;
        for row in 0..DIM {
            for col in 0..DIM {
                transposed[(col, row)] = self[(row, col)];
            }
        }
        transposed
    }

    pub fn determinant(&self) -> f32 {
        let adjugate = self.adjugate();
        self.first_row_dot_cofactors(&adjugate)
    }

    /// Computes `scalar * inverse(self)`, i.e. the `scalar / matrix`
    /// operation.
    ///
    /// # Errors
    /// Returns [`Error::SingularMatrix`] if the determinant is exactly zero.
    pub fn scaled_inverse(&self, scalar: f32) -> Result<Self> {
        let adjugate = self.adjugate();
        let determinant = self.first_row_dot_cofactors(&adjugate);

        if determinant == 0.0 {
            log::debug!("Cannot invert matrix with zero determinant: {self:?}");
            return Err(Error::SingularMatrix);
        }

        Ok(adjugate * (scalar / determinant))
    }

    /// Computes the inverse of the matrix.
    ///
    /// # Errors
    /// Returns [`Error::SingularMatrix`] if the determinant is exactly zero.
    #[inline]
    pub fn try_inverse(&self) -> Result<Self> {
        self.scaled_inverse(1.0)
    }

    /// Computes `self * inverse(rhs)`.
    ///
    /// # Errors
    /// Returns [`Error::SingularMatrix`] if `rhs` is singular.
    pub fn try_div(&self, rhs: &Self) -> Result<Self> {
        Ok(self * &rhs.try_inverse()?)
    }

    /// The transpose of the cofactor matrix. Every cofactor is expanded along
    /// three 2x2 minors of either the top two or the bottom two rows.
    fn adjugate(&self) -> Self {
        let a = |row: usize, col: usize| self[(row, col)];

        // Minors of the top two rows
        let s0 = a(0, 0) * a(1, 1) - a(1, 0) * a(0, 1);
        let s1 = a(0, 0) * a(1, 2) - a(1, 0) * a(0, 2);
        let s2 = a(0, 0) * a(1, 3) - a(1, 0) * a(0, 3);
        let s3 = a(0, 1) * a(1, 2) - a(1, 1) * a(0, 2);
        let s4 = a(0, 1) * a(1, 3) - a(1, 1) * a(0, 3);
        let s5 = a(0, 2) * a(1, 3) - a(1, 2) * a(0, 3);

        // Minors of the bottom two rows
        let c0 = a(2, 0) * a(3, 1) - a(3, 0) * a(2, 1);
        let c1 = a(2, 0) * a(3, 2) - a(3, 0) * a(2, 2);
        let c2 = a(2, 0) * a(3, 3) - a(3, 0) * a(2, 3);
        let c3 = a(2, 1) * a(3, 2) - a(3, 1) * a(2, 2);
        let c4 = a(2, 1) * a(3, 3) - a(3, 1) * a(2, 3);
        let c5 = a(2, 2) * a(3, 3) - a(3, 2) * a(2, 3);

        Self::from_rows([
            [
                a(1, 1) * c5 - a(1, 2) * c4 + a(1, 3) * c3,
                -a(0, 1) * c5 + a(0, 2) * c4 - a(0, 3) * c3,
                a(3, 1) * s5 - a(3, 2) * s4 + a(3, 3) * s3,
                -a(2, 1) * s5 + a(2, 2) * s4 - a(2, 3) * s3,
            ],
            [
                -a(1, 0) * c5 + a(1, 2) * c2 - a(1, 3) * c1,
                a(0, 0) * c5 - a(0, 2) * c2 + a(0, 3) * c1,
                -a(3, 0) * s5 + a(3, 2) * s2 - a(3, 3) * s1,
                a(2, 0) * s5 - a(2, 2) * s2 + a(2, 3) * s1,
            ],
            [
                a(1, 0) * c4 - a(1, 1) * c2 + a(1, 3) * c0,
                -a(0, 0) * c4 + a(0, 1) * c2 - a(0, 3) * c0,
                a(3, 0) * s4 - a(3, 1) * s2 + a(3, 3) * s0,
                -a(2, 0) * s4 + a(2, 1) * s2 - a(2, 3) * s0,
            ],
            [
                -a(1, 0) * c3 + a(1, 1) * c1 - a(1, 2) * c0,
                a(0, 0) * c3 - a(0, 1) * c1 + a(0, 2) * c0,
                -a(3, 0) * s3 + a(3, 1) * s1 - a(3, 2) * s0,
                a(2, 0) * s3 - a(2, 1) * s1 + a(2, 2) * s0,
            ],
        ])
    }

    /// Laplace expansion along the first row. The first row of the cofactor
    /// matrix is the first column of the adjugate.
    fn first_row_dot_cofactors(&self, adjugate: &Self) -> f32 {
        self.row(0).dot(&adjugate.column(0))
    }
}

impl Default for Matrix4x4 {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Index<(usize, usize)> for Matrix4x4 {
    type Output = f32;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &f32 {
        &self.data[linear_index(row, col)]
    }
}

impl IndexMut<(usize, usize)> for Matrix4x4 {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f32 {
        &mut self.data[linear_index(row, col)]
    }
}

/// Both coordinates are checked separately since e.g. `(5, 0)` would map to
/// a valid offset.
#[inline]
fn linear_index(row: usize, col: usize) -> usize {
    assert!(
        row < DIM && col < DIM,
        "matrix index ({row}, {col}) out of range for a {DIM}x{DIM} matrix"
    );
    row + col * DIM
}

impl Add for &Matrix4x4 {
    type Output = Matrix4x4;

    fn add(self, rhs: Self) -> Matrix4x4 {
        Matrix4x4 {
            data: std::array::from_fn(|i| self.data[i] + rhs.data[i]),
        }
    }
}

impl Add for Matrix4x4 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        &self + &rhs
    }
}

impl Sub for &Matrix4x4 {
    type Output = Matrix4x4;

    fn sub(self, rhs: Self) -> Matrix4x4 {
        Matrix4x4 {
            data: std::array::from_fn(|i| self.data[i] - rhs.data[i]),
        }
    }
}

impl Sub for Matrix4x4 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        &self - &rhs
    }
}

impl Mul<f32> for Matrix4x4 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self {
            data: self.data.map(|value| value * rhs),
        }
    }
}

impl Mul<Matrix4x4> for f32 {
    type Output = Matrix4x4;

    #[inline]
    fn mul(self, rhs: Matrix4x4) -> Matrix4x4 {
        rhs * self
    }
}

impl Mul for &Matrix4x4 {
    type Output = Matrix4x4;

    fn mul(self, rhs: Self) -> Matrix4x4 {
        let mut product = Matrix4x4::ZERO;
        for row in 0..DIM {
            for col in 0..DIM {
                product[(row, col)] = (0..DIM)
                    .map(|k| self[(row, k)] * rhs[(k, col)])
                    .sum::<f32>();
            }
        }
        product
    }
}

impl Mul for Matrix4x4 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        &self * &rhs
    }
}

impl Mul<&Vector4> for &Matrix4x4 {
    type Output = Vector4;

    fn mul(self, rhs: &Vector4) -> Vector4 {
        Vector4::new(
            self.row(0).dot(rhs),
            self.row(1).dot(rhs),
            self.row(2).dot(rhs),
            self.row(3).dot(rhs),
        )
    }
}

impl Mul<Vector4> for Matrix4x4 {
    type Output = Vector4;

    #[inline]
    fn mul(self, rhs: Vector4) -> Vector4 {
        &self * &rhs
    }
}

impl From<nalgebra::Matrix4<f32>> for Matrix4x4 {
    fn from(matrix: nalgebra::Matrix4<f32>) -> Self {
        Self::from_slice(matrix.as_slice())
    }
}

impl From<Matrix4x4> for nalgebra::Matrix4<f32> {
    fn from(matrix: Matrix4x4) -> Self {
        nalgebra::Matrix4::from_column_slice(&matrix.data)
    }
}

impl AbsDiffEq for Matrix4x4 {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.data
            .iter()
            .zip(&other.data)
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl RelativeEq for Matrix4x4 {
    fn default_max_relative() -> f32 {
        f32::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.data
            .iter()
            .zip(&other.data)
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}
