//! Row-major 3x3 / 4x4 matrices and the transforms the orbit camera is built from.
//!
//! Matrices are flat arrays with each row stored contiguously. Products follow
//! the column-vector convention: `multiply4(a, b)` transforms by `b` first and
//! then by `a`, so `a * b * v` reads right to left.

use std::ops::{Index, Mul};

use nalgebra::{Matrix3, Matrix4};

/// 3x3 matrix, row-major.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat3(pub [f32; 9]);

/// 4x4 matrix, row-major.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4(pub [f32; 16]);

impl Mat3 {
    pub const IDENTITY: Self = Self([
        1.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, //
        0.0, 0.0, 1.0,
    ]);

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn transpose(&self) -> Self {
        let mut out = [0.0; 9];
        for row in 0..3 {
            for col in 0..3 {
                out[col * 3 + row] = self.0[row * 3 + col];
            }
        }
        Self(out)
    }
}

impl Mat4 {
    pub const IDENTITY: Self = Self([
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ]);

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn transpose(&self) -> Self {
        let mut out = [0.0; 16];
        for row in 0..4 {
            for col in 0..4 {
                out[col * 4 + row] = self.0[row * 4 + col];
            }
        }
        Self(out)
    }

    /// Element order expected by GL-style uploads with `transpose = false`.
    pub fn to_column_major(&self) -> [f32; 16] {
        self.transpose().0
    }

    /// Multiplies the homogeneous column vector `v` by this matrix.
    pub fn transform_point(&self, v: [f32; 4]) -> [f32; 4] {
        let m = &self.0;
        let mut out = [0.0; 4];
        for (row, value) in out.iter_mut().enumerate() {
            *value = m[row * 4] * v[0]
                + m[row * 4 + 1] * v[1]
                + m[row * 4 + 2] * v[2]
                + m[row * 4 + 3] * v[3];
        }
        out
    }
}

impl Index<(usize, usize)> for Mat3 {
    type Output = f32;

    fn index(&self, (row, col): (usize, usize)) -> &f32 {
        &self.0[row * 3 + col]
    }
}

impl Index<(usize, usize)> for Mat4 {
    type Output = f32;

    fn index(&self, (row, col): (usize, usize)) -> &f32 {
        &self.0[row * 4 + col]
    }
}

impl Mul for Mat3 {
    type Output = Mat3;

    fn mul(self, rhs: Mat3) -> Mat3 {
        multiply3(&self, &rhs)
    }
}

impl Mul for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Mat4 {
        multiply4(&self, &rhs)
    }
}

impl From<Mat4> for Matrix4<f32> {
    fn from(m: Mat4) -> Self {
        Matrix4::from_row_slice(&m.0)
    }
}

impl From<Matrix4<f32>> for Mat4 {
    fn from(m: Matrix4<f32>) -> Self {
        // nalgebra stores columns; transposing first yields rows in memory order.
        let mut out = [0.0; 16];
        out.copy_from_slice(m.transpose().as_slice());
        Mat4(out)
    }
}

impl From<Mat3> for Matrix3<f32> {
    fn from(m: Mat3) -> Self {
        Matrix3::from_row_slice(&m.0)
    }
}

impl From<Matrix3<f32>> for Mat3 {
    fn from(m: Matrix3<f32>) -> Self {
        let mut out = [0.0; 9];
        out.copy_from_slice(m.transpose().as_slice());
        Mat3(out)
    }
}

/// Right-handed rotation about the X axis.
pub fn rotation_x(angle_radians: f32) -> Mat4 {
    let (sin, cos) = angle_radians.sin_cos();
    Mat4([
        1.0, 0.0, 0.0, 0.0, //
        0.0, cos, -sin, 0.0, //
        0.0, sin, cos, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ])
}

/// Right-handed rotation about the Y axis.
pub fn rotation_y(angle_radians: f32) -> Mat4 {
    let (sin, cos) = angle_radians.sin_cos();
    Mat4([
        cos, 0.0, sin, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        -sin, 0.0, cos, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ])
}

/// Right-handed rotation about the Z axis.
pub fn rotation_z(angle_radians: f32) -> Mat4 {
    let (sin, cos) = angle_radians.sin_cos();
    Mat4([
        cos, -sin, 0.0, 0.0, //
        sin, cos, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ])
}

pub fn translation(tx: f32, ty: f32, tz: f32) -> Mat4 {
    Mat4([
        1.0, 0.0, 0.0, tx, //
        0.0, 1.0, 0.0, ty, //
        0.0, 0.0, 1.0, tz, //
        0.0, 0.0, 0.0, 1.0,
    ])
}

/// Row-major product `a * b`: transforms by `b` first, then `a`. Not commutative.
pub fn multiply3(a: &Mat3, b: &Mat3) -> Mat3 {
    let (a, b) = (&a.0, &b.0);
    let mut out = [0.0; 9];
    for row in 0..3 {
        for col in 0..3 {
            out[row * 3 + col] = a[row * 3] * b[col]
                + a[row * 3 + 1] * b[3 + col]
                + a[row * 3 + 2] * b[6 + col];
        }
    }
    Mat3(out)
}

/// Row-major product `a * b`: transforms by `b` first, then `a`. Not commutative.
pub fn multiply4(a: &Mat4, b: &Mat4) -> Mat4 {
    let (a, b) = (&a.0, &b.0);
    let mut out = [0.0; 16];
    for row in 0..4 {
        for col in 0..4 {
            out[row * 4 + col] = a[row * 4] * b[col]
                + a[row * 4 + 1] * b[4 + col]
                + a[row * 4 + 2] * b[8 + col]
                + a[row * 4 + 3] * b[12 + col];
        }
    }
    Mat4(out)
}

/// Symmetric OpenGL-style frustum from a vertical field of view.
///
/// Eye-space `z` in `[-near, -far]` maps to clip-space `[-1, 1]` after the
/// divide, and `w = -z_eye`. Degenerate input (`far == near`, `aspect <= 0`,
/// `fov` outside `(0, 180)`) produces non-finite values; validate with
/// [`ProjectionOptions::validate`](crate::options::ProjectionOptions::validate)
/// first.
pub fn perspective(fov_y_degrees: f32, aspect_ratio: f32, near: f32, far: f32) -> Mat4 {
    let top = (fov_y_degrees * 0.5).to_radians().tan() * near;
    let bottom = -top;
    let right = aspect_ratio * top;
    let left = -right;

    let m00 = (2.0 * near) / (right - left);
    let m02 = (right + left) / (right - left);
    let m11 = (2.0 * near) / (top - bottom);
    let m12 = (top + bottom) / (top - bottom);
    let m22 = -(far + near) / (far - near);
    let m23 = -(2.0 * far * near) / (far - near);

    Mat4([
        m00, 0.0, m02, 0.0, //
        0.0, m11, m12, 0.0, //
        0.0, 0.0, m22, m23, //
        0.0, 0.0, -1.0, 0.0,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    fn assert_mat4_eq(a: &Mat4, b: &Mat4) {
        for (x, y) in a.0.iter().zip(b.0.iter()) {
            assert_relative_eq!(*x, *y, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_zero_angle_is_identity() {
        assert_eq!(rotation_x(0.0), Mat4::IDENTITY);
        assert_eq!(rotation_y(0.0), Mat4::IDENTITY);
        assert_eq!(rotation_z(0.0), Mat4::IDENTITY);
    }

    #[test]
    fn test_rotation_matches_nalgebra() {
        let angle = 0.7;
        let expected_x: Mat4 = Matrix4::new_rotation(Vector3::new(angle, 0.0, 0.0)).into();
        let expected_y: Mat4 = Matrix4::new_rotation(Vector3::new(0.0, angle, 0.0)).into();
        let expected_z: Mat4 = Matrix4::new_rotation(Vector3::new(0.0, 0.0, angle)).into();
        assert_mat4_eq(&rotation_x(angle), &expected_x);
        assert_mat4_eq(&rotation_y(angle), &expected_y);
        assert_mat4_eq(&rotation_z(angle), &expected_z);
    }

    #[test]
    fn test_translation_moves_point() {
        let p = translation(1.0, -2.0, 3.0).transform_point([1.0, 1.0, 1.0, 1.0]);
        assert_eq!(p, [2.0, -1.0, 4.0, 1.0]);
        // Directions (w = 0) are unaffected.
        let d = translation(1.0, -2.0, 3.0).transform_point([1.0, 1.0, 1.0, 0.0]);
        assert_eq!(d, [1.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_multiply_order_applies_right_operand_first() {
        // Rotate 90 degrees about Y, then translate along X.
        let m = multiply4(
            &translation(10.0, 0.0, 0.0),
            &rotation_y(std::f32::consts::FRAC_PI_2),
        );
        let p = m.transform_point([1.0, 0.0, 0.0, 1.0]);
        assert_relative_eq!(p[0], 10.0, epsilon = 1e-5);
        assert_relative_eq!(p[2], -1.0, epsilon = 1e-5);

        let reversed = multiply4(
            &rotation_y(std::f32::consts::FRAC_PI_2),
            &translation(10.0, 0.0, 0.0),
        );
        assert_ne!(m, reversed);
    }

    #[test]
    fn test_multiply3_matches_nalgebra() {
        let a = Mat3([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        let b = Mat3([-1.0, 0.5, 2.0, 0.0, 3.0, -2.0, 1.0, 1.0, 1.0]);
        let expected: Mat3 = (Matrix3::from(a) * Matrix3::from(b)).into();
        assert_eq!(multiply3(&a, &b), expected);
        assert_eq!(a * Mat3::IDENTITY, a);
    }

    #[test]
    fn test_column_major_is_transpose() {
        let m = translation(1.0, 2.0, 3.0);
        let cols = m.to_column_major();
        assert_eq!(&cols[12..15], &[1.0, 2.0, 3.0]);
        assert_eq!(m[(0, 3)], 1.0);
        assert_eq!(m.transpose().transpose(), m);
    }

    #[test]
    fn test_perspective_layout() {
        let p = perspective(90.0, 2.0, 1.0, 3.0);
        assert_relative_eq!(p[(0, 0)], 0.5, epsilon = 1e-6);
        assert_relative_eq!(p[(1, 1)], 1.0, epsilon = 1e-6);
        assert_relative_eq!(p[(2, 2)], -2.0, epsilon = 1e-6);
        assert_relative_eq!(p[(2, 3)], -3.0, epsilon = 1e-6);
        assert_eq!(p[(3, 2)], -1.0);
        assert_eq!(p[(3, 3)], 0.0);
    }
}
