//! 3x3 and 4x4 row-major matrices.
//!
//! Determinants and inverses are closed-form cofactor expansions. Inversion
//! fails with [`MathError::Singular`] when the determinant is zero (or not a
//! normal float), so callers never receive a matrix full of NaN/Infinity.

use std::ops::{Add, Mul};

use crate::{MathError, MathResult, Vec3, Vec4};

/// Row-major 3x3 matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat3 {
    m: [[f64; 3]; 3],
}

impl Mat3 {
    pub const ZERO: Mat3 = Mat3 { m: [[0.0; 3]; 3] };
    pub const IDENTITY: Mat3 = Mat3 {
        m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
    };

    #[inline]
    pub const fn from_rows(m: [[f64; 3]; 3]) -> Self {
        Self { m }
    }

    /// Build a matrix whose columns are `c0`, `c1`, `c2`.
    pub fn from_cols(c0: Vec3, c1: Vec3, c2: Vec3) -> Self {
        Self::from_rows([
            [c0.x, c1.x, c2.x],
            [c0.y, c1.y, c2.y],
            [c0.z, c1.z, c2.z],
        ])
    }

    #[inline]
    pub const fn to_rows(self) -> [[f64; 3]; 3] {
        self.m
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.m[row][col]
    }

    #[inline]
    pub fn row(&self, i: usize) -> Vec3 {
        Vec3::from_array(self.m[i])
    }

    #[inline]
    pub fn col(&self, j: usize) -> Vec3 {
        Vec3::new(self.m[0][j], self.m[1][j], self.m[2][j])
    }

    pub fn scale(&self, s: f64) -> Self {
        Self::from_rows(self.m.map(|r| r.map(|e| e * s)))
    }

    pub fn transpose(&self) -> Self {
        let m = &self.m;
        Self::from_rows([
            [m[0][0], m[1][0], m[2][0]],
            [m[0][1], m[1][1], m[2][1]],
            [m[0][2], m[1][2], m[2][2]],
        ])
    }

    pub fn determinant(&self) -> f64 {
        let m = &self.m;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// Adjugate divided by determinant.
    pub fn inverse(&self) -> MathResult<Self> {
        let det = self.determinant();
        if !det.is_normal() {
            return Err(MathError::Singular { determinant: det });
        }
        let m = &self.m;
        let inv = 1.0 / det;

        // Entry (r, c) of the adjugate is the cofactor of (c, r)
        Ok(Self::from_rows([
            [
                (m[1][1] * m[2][2] - m[1][2] * m[2][1]) * inv,
                (m[0][2] * m[2][1] - m[0][1] * m[2][2]) * inv,
                (m[0][1] * m[1][2] - m[0][2] * m[1][1]) * inv,
            ],
            [
                (m[1][2] * m[2][0] - m[1][0] * m[2][2]) * inv,
                (m[0][0] * m[2][2] - m[0][2] * m[2][0]) * inv,
                (m[0][2] * m[1][0] - m[0][0] * m[1][2]) * inv,
            ],
            [
                (m[1][0] * m[2][1] - m[1][1] * m[2][0]) * inv,
                (m[0][1] * m[2][0] - m[0][0] * m[2][1]) * inv,
                (m[0][0] * m[1][1] - m[0][1] * m[1][0]) * inv,
            ],
        ]))
    }

    /// Matrix times column vector: `M * v`.
    pub fn mul_vec3(&self, v: Vec3) -> Vec3 {
        Vec3::new(self.row(0).dot(v), self.row(1).dot(v), self.row(2).dot(v))
    }
}

impl Vec3 {
    /// Row vector times matrix: `v^T * M`.
    pub fn mul_mat3(self, m: &Mat3) -> Vec3 {
        Vec3::new(self.dot(m.col(0)), self.dot(m.col(1)), self.dot(m.col(2)))
    }
}

impl Add for Mat3 {
    type Output = Mat3;

    fn add(self, rhs: Mat3) -> Mat3 {
        let mut out = self.m;
        for (r, row) in out.iter_mut().enumerate() {
            for (c, e) in row.iter_mut().enumerate() {
                *e += rhs.m[r][c];
            }
        }
        Mat3::from_rows(out)
    }
}

impl Mul for Mat3 {
    type Output = Mat3;

    fn mul(self, rhs: Mat3) -> Mat3 {
        let mut out = [[0.0; 3]; 3];
        for (r, row) in out.iter_mut().enumerate() {
            for (c, e) in row.iter_mut().enumerate() {
                *e = self.row(r).dot(rhs.col(c));
            }
        }
        Mat3::from_rows(out)
    }
}

impl Mul<Vec3> for Mat3 {
    type Output = Vec3;

    fn mul(self, rhs: Vec3) -> Vec3 {
        self.mul_vec3(rhs)
    }
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Row-major 4x4 matrix. Affine transforms keep their translation in the
/// last column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    m: [[f64; 4]; 4],
}

impl Mat4 {
    pub const ZERO: Mat4 = Mat4 { m: [[0.0; 4]; 4] };
    pub const IDENTITY: Mat4 = Mat4 {
        m: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    #[inline]
    pub const fn from_rows(m: [[f64; 4]; 4]) -> Self {
        Self { m }
    }

    pub fn from_cols(c0: Vec4, c1: Vec4, c2: Vec4, c3: Vec4) -> Self {
        Self::from_rows([
            [c0.x, c1.x, c2.x, c3.x],
            [c0.y, c1.y, c2.y, c3.y],
            [c0.z, c1.z, c2.z, c3.z],
            [c0.w, c1.w, c2.w, c3.w],
        ])
    }

    #[inline]
    pub const fn to_rows(self) -> [[f64; 4]; 4] {
        self.m
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.m[row][col]
    }

    #[inline]
    pub fn row(&self, i: usize) -> Vec4 {
        Vec4::from_array(self.m[i])
    }

    #[inline]
    pub fn col(&self, j: usize) -> Vec4 {
        Vec4::new(self.m[0][j], self.m[1][j], self.m[2][j], self.m[3][j])
    }

    pub fn scale(&self, s: f64) -> Self {
        Self::from_rows(self.m.map(|r| r.map(|e| e * s)))
    }

    pub fn transpose(&self) -> Self {
        let mut out = [[0.0; 4]; 4];
        for (r, row) in out.iter_mut().enumerate() {
            for (c, e) in row.iter_mut().enumerate() {
                *e = self.m[c][r];
            }
        }
        Self::from_rows(out)
    }

    /// 2x2 minors of the top two rows (`s`) and bottom two rows (`c`).
    /// Both the determinant and the adjugate are built from these twelve.
    fn minors(&self) -> ([f64; 6], [f64; 6]) {
        let a = &self.m;
        let s = [
            a[0][0] * a[1][1] - a[1][0] * a[0][1],
            a[0][0] * a[1][2] - a[1][0] * a[0][2],
            a[0][0] * a[1][3] - a[1][0] * a[0][3],
            a[0][1] * a[1][2] - a[1][1] * a[0][2],
            a[0][1] * a[1][3] - a[1][1] * a[0][3],
            a[0][2] * a[1][3] - a[1][2] * a[0][3],
        ];
        let c = [
            a[2][0] * a[3][1] - a[3][0] * a[2][1],
            a[2][0] * a[3][2] - a[3][0] * a[2][2],
            a[2][0] * a[3][3] - a[3][0] * a[2][3],
            a[2][1] * a[3][2] - a[3][1] * a[2][2],
            a[2][1] * a[3][3] - a[3][1] * a[2][3],
            a[2][2] * a[3][3] - a[3][2] * a[2][3],
        ];
        (s, c)
    }

    fn determinant_from(s: &[f64; 6], c: &[f64; 6]) -> f64 {
        s[0] * c[5] - s[1] * c[4] + s[2] * c[3] + s[3] * c[2] - s[4] * c[1] + s[5] * c[0]
    }

    pub fn determinant(&self) -> f64 {
        let (s, c) = self.minors();
        Self::determinant_from(&s, &c)
    }

    pub fn inverse(&self) -> MathResult<Self> {
        let (s, c) = self.minors();
        let det = Self::determinant_from(&s, &c);
        if !det.is_normal() {
            return Err(MathError::Singular { determinant: det });
        }
        let a = &self.m;
        let inv = 1.0 / det;

        Ok(Self::from_rows([
            [
                (a[1][1] * c[5] - a[1][2] * c[4] + a[1][3] * c[3]) * inv,
                (-a[0][1] * c[5] + a[0][2] * c[4] - a[0][3] * c[3]) * inv,
                (a[3][1] * s[5] - a[3][2] * s[4] + a[3][3] * s[3]) * inv,
                (-a[2][1] * s[5] + a[2][2] * s[4] - a[2][3] * s[3]) * inv,
            ],
            [
                (-a[1][0] * c[5] + a[1][2] * c[2] - a[1][3] * c[1]) * inv,
                (a[0][0] * c[5] - a[0][2] * c[2] + a[0][3] * c[1]) * inv,
                (-a[3][0] * s[5] + a[3][2] * s[2] - a[3][3] * s[1]) * inv,
                (a[2][0] * s[5] - a[2][2] * s[2] + a[2][3] * s[1]) * inv,
            ],
            [
                (a[1][0] * c[4] - a[1][1] * c[2] + a[1][3] * c[0]) * inv,
                (-a[0][0] * c[4] + a[0][1] * c[2] - a[0][3] * c[0]) * inv,
                (a[3][0] * s[4] - a[3][1] * s[2] + a[3][3] * s[0]) * inv,
                (-a[2][0] * s[4] + a[2][1] * s[2] - a[2][3] * s[0]) * inv,
            ],
            [
                (-a[1][0] * c[3] + a[1][1] * c[1] - a[1][2] * c[0]) * inv,
                (a[0][0] * c[3] - a[0][1] * c[1] + a[0][2] * c[0]) * inv,
                (-a[3][0] * s[3] + a[3][1] * s[1] - a[3][2] * s[0]) * inv,
                (a[2][0] * s[3] - a[2][1] * s[1] + a[2][2] * s[0]) * inv,
            ],
        ]))
    }

    /// Matrix times column vector: `M * v`.
    pub fn mul_vec4(&self, v: Vec4) -> Vec4 {
        Vec4::new(
            self.row(0).dot(v),
            self.row(1).dot(v),
            self.row(2).dot(v),
            self.row(3).dot(v),
        )
    }
}

impl Vec4 {
    /// Row vector times matrix: `v^T * M`.
    pub fn mul_mat4(self, m: &Mat4) -> Vec4 {
        Vec4::new(
            self.dot(m.col(0)),
            self.dot(m.col(1)),
            self.dot(m.col(2)),
            self.dot(m.col(3)),
        )
    }
}

impl Add for Mat4 {
    type Output = Mat4;

    fn add(self, rhs: Mat4) -> Mat4 {
        let mut out = self.m;
        for (r, row) in out.iter_mut().enumerate() {
            for (c, e) in row.iter_mut().enumerate() {
                *e += rhs.m[r][c];
            }
        }
        Mat4::from_rows(out)
    }
}

impl Mul for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Mat4 {
        let mut out = [[0.0; 4]; 4];
        for (r, row) in out.iter_mut().enumerate() {
            for (c, e) in row.iter_mut().enumerate() {
                *e = self.row(r).dot(rhs.col(c));
            }
        }
        Mat4::from_rows(out)
    }
}

impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    fn mul(self, rhs: Vec4) -> Vec4 {
        self.mul_vec4(rhs)
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}
