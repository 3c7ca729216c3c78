//! 3D transformation matrices and rotation state
use crate::{matrix::Matrix4x4, vector::Vector3};

/// Rotation state around three axes (in radians)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RotationState {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RotationState {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

/// Transform builder for 3D transformations.
///
/// Matrices act on column vectors, so in `a * b` the transform `b` is
/// applied first.
#[derive(Debug)]
pub struct Transform;

impl Transform {
    /// Create a translation matrix
    pub fn translation(x: f32, y: f32, z: f32) -> Matrix4x4 {
        Matrix4x4::from_rows([
            [1.0, 0.0, 0.0, x],
            [0.0, 1.0, 0.0, y],
            [0.0, 0.0, 1.0, z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn translation_from(offset: &Vector3) -> Matrix4x4 {
        Self::translation(offset.x(), offset.y(), offset.z())
    }

    /// Create a scale matrix
    pub fn scaling(sx: f32, sy: f32, sz: f32) -> Matrix4x4 {
        Matrix4x4::from_rows([
            [sx, 0.0, 0.0, 0.0],
            [0.0, sy, 0.0, 0.0],
            [0.0, 0.0, sz, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn scaling_from(factors: &Vector3) -> Matrix4x4 {
        Self::scaling(factors.x(), factors.y(), factors.z())
    }

    /// Counter-clockwise rotation about the x-axis
    pub fn rotation_x(angle: f32) -> Matrix4x4 {
        let (s, c) = angle.sin_cos();
        Matrix4x4::from_rows([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, -s, 0.0],
            [0.0, s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Counter-clockwise rotation about the y-axis
    pub fn rotation_y(angle: f32) -> Matrix4x4 {
        let (s, c) = angle.sin_cos();
        Matrix4x4::from_rows([
            [c, 0.0, s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [-s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Counter-clockwise rotation about the z-axis
    pub fn rotation_z(angle: f32) -> Matrix4x4 {
        let (s, c) = angle.sin_cos();
        Matrix4x4::from_rows([
            [c, -s, 0.0, 0.0],
            [s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Create a rotation matrix from a rotation state
    pub fn rotation_matrix(rotation: &RotationState) -> Matrix4x4 {
        let rx = Self::rotation_x(rotation.x);
        let ry = Self::rotation_y(rotation.y);
        let rz = Self::rotation_z(rotation.z);

        // Apply rotations in order: X, Y, Z
        rz * ry * rx
    }

    /// Create a model-view-projection matrix
    pub fn mvp_matrix(
        model: &Matrix4x4,
        view: &Matrix4x4,
        projection: &Matrix4x4,
    ) -> Matrix4x4 {
        &(projection * view) * model
    }
}
