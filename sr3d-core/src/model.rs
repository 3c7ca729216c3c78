//! Indexed triangle models placed in the world by position, rotation and scale
use crate::{
    error::{Error, Result},
    matrix::Matrix4x4,
    transform::{RotationState, Transform},
    vector::{Vector3, Vector4},
};

/// Indices of the three corners of a triangle in a model's vertex list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriangleIndices(pub [usize; 3]);

impl TriangleIndices {
    pub fn new(a: usize, b: usize, c: usize) -> Self {
        Self([a, b, c])
    }
}

/// A triangle face defined by three corner positions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [Vector3; 3],
}

impl Triangle {
    pub fn new(v0: Vector3, v1: Vector3, v2: Vector3) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Calculate the face normal from the triangle's vertices.
    ///
    /// Counter-clockwise corners give a normal pointing towards the viewer.
    pub fn calculate_normal(&self) -> Vector3 {
        let [v0, v1, v2] = self.vertices;

        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        edge1.cross(&edge2).normalize()
    }
}

/// A 3D model composed of shared vertices and indexed triangles
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    vertices: Vec<Vector3>,
    indices: Vec<TriangleIndices>,
    pub position: Vector3,
    pub rotation: RotationState,
    pub scale: Vector3,
}

impl Model {
    /// Creates a model at the origin with no rotation and unit scale.
    ///
    /// # Errors
    /// Returns [`Error::VertexIndexOutOfRange`] if a triangle refers to a
    /// vertex that is not in `vertices`.
    pub fn new(vertices: Vec<Vector3>, indices: Vec<TriangleIndices>) -> Result<Self> {
        let vertex_count = vertices.len();
        if let Some(&index) = indices
            .iter()
            .flat_map(|triangle| &triangle.0)
            .find(|&&index| index >= vertex_count)
        {
            return Err(Error::VertexIndexOutOfRange {
                index,
                vertex_count,
            });
        }

        log::trace!(
            "Created model with {} vertices and {} triangles",
            vertex_count,
            indices.len()
        );

        Ok(Self {
            vertices,
            indices,
            position: Vector3::zeros(),
            rotation: RotationState::zero(),
            scale: Vector3::splat(1.0),
        })
    }

    pub fn vertices(&self) -> &[Vector3] {
        &self.vertices
    }

    pub fn indices(&self) -> &[TriangleIndices] {
        &self.indices
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// Model-to-world matrix: scale, then rotate, then translate.
    pub fn model_matrix(&self) -> Matrix4x4 {
        let translation = Transform::translation_from(&self.position);
        let rotation = Transform::rotation_matrix(&self.rotation);
        let scaling = Transform::scaling_from(&self.scale);

        translation * rotation * scaling
    }

    /// Every vertex as a homogeneous point transformed into world space.
    pub fn transformed_vertices(&self) -> Vec<Vector4> {
        let model_matrix = self.model_matrix();
        self.vertices
            .iter()
            .map(|vertex| &model_matrix * &vertex.extend(1.0))
            .collect()
    }

    /// Resolves the index list into triangles in model space.
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.indices.iter().map(|&TriangleIndices([a, b, c])| {
            Triangle::new(self.vertices[a], self.vertices[b], self.vertices[c])
        })
    }

    /// Create a simple cube mesh for testing, with outward-facing triangles
    pub fn cube(size: f32) -> Self {
        let half = size / 2.0;

        let vertices = vec![
            Vector3::new(-half, -half, half),
            Vector3::new(half, -half, half),
            Vector3::new(half, half, half),
            Vector3::new(-half, half, half),
            Vector3::new(-half, -half, -half),
            Vector3::new(half, -half, -half),
            Vector3::new(half, half, -half),
            Vector3::new(-half, half, -half),
        ];

        let indices = vec![
            // Front face
            TriangleIndices::new(0, 1, 2),
            TriangleIndices::new(0, 2, 3),
            // Back face
            TriangleIndices::new(5, 4, 7),
            TriangleIndices::new(5, 7, 6),
            // Left face
            TriangleIndices::new(4, 0, 3),
            TriangleIndices::new(4, 3, 7),
            // Right face
            TriangleIndices::new(1, 5, 6),
            TriangleIndices::new(1, 6, 2),
            // Top face
            TriangleIndices::new(3, 2, 6),
            TriangleIndices::new(3, 6, 7),
            // Bottom face
            TriangleIndices::new(4, 5, 1),
            TriangleIndices::new(4, 1, 0),
        ];

        Self::from_valid_parts(vertices, indices)
    }

    /// The open-bottomed house shape used as the demo scene: a box with a
    /// slanted roof edge, without top and bottom faces.
    pub fn house() -> Self {
        let vertices = vec![
            Vector3::new(-0.5, -0.5, 0.5),
            Vector3::new(0.5, -0.5, 0.5),
            Vector3::new(0.5, 0.5, 0.5),
            Vector3::new(0.0, 0.5, 0.5),
            Vector3::new(-0.5, -0.5, -0.5),
            Vector3::new(0.5, -0.5, -0.5),
            Vector3::new(0.5, 0.5, -0.5),
            Vector3::new(0.0, 0.5, -0.5),
        ];

        let indices = vec![
            // Front
            TriangleIndices::new(0, 1, 2),
            TriangleIndices::new(0, 2, 3),
            // Left
            TriangleIndices::new(4, 0, 3),
            TriangleIndices::new(4, 3, 7),
            // Back
            TriangleIndices::new(5, 4, 7),
            TriangleIndices::new(5, 7, 6),
            // Right
            TriangleIndices::new(1, 5, 6),
            TriangleIndices::new(1, 6, 2),
        ];

        Self::from_valid_parts(vertices, indices)
    }

    fn from_valid_parts(vertices: Vec<Vector3>, indices: Vec<TriangleIndices>) -> Self {
        Self {
            vertices,
            indices,
            position: Vector3::zeros(),
            rotation: RotationState::zero(),
            scale: Vector3::splat(1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_triangle_normal() {
        let triangle = Triangle::new(
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(2.0, 0.0, 0.0),
            Vector3::new(0.0, 3.0, 0.0),
        );
        assert_abs_diff_eq!(
            triangle.calculate_normal(),
            Vector3::new(0.0, 0.0, 1.0),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_new_rejects_dangling_index() {
        let vertices = vec![Vector3::zeros(), Vector3::splat(1.0), Vector3::splat(2.0)];
        let result = Model::new(vertices, vec![TriangleIndices::new(0, 1, 3)]);
        assert_eq!(
            result,
            Err(Error::VertexIndexOutOfRange {
                index: 3,
                vertex_count: 3
            })
        );
    }

    #[test]
    fn test_new_uses_neutral_placement() {
        let model = Model::new(vec![Vector3::new(1.0, 2.0, 3.0)], Vec::new()).unwrap();
        assert_eq!(model.model_matrix(), Matrix4x4::IDENTITY);
        assert_eq!(
            model.transformed_vertices(),
            vec![Vector4::new(1.0, 2.0, 3.0, 1.0)]
        );
    }

    #[test]
    fn test_model_matrix_scales_then_rotates_then_translates() {
        let mut model = Model::new(vec![Vector3::new(1.0, 0.0, 0.0)], Vec::new()).unwrap();
        model.scale = Vector3::splat(2.0);
        model.rotation = RotationState::new(0.0, 0.0, FRAC_PI_2);
        model.position = Vector3::new(0.0, 0.0, 5.0);

        let transformed = model.transformed_vertices();
        assert_abs_diff_eq!(
            transformed[0],
            Vector4::new(0.0, 2.0, 5.0, 1.0),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_model_matrix_is_invertible() {
        let mut model = Model::cube(1.0);
        model.scale = Vector3::new(1.0, 2.0, 3.0);
        model.rotation = RotationState::new(0.4, 0.1, -0.9);
        model.position = Vector3::new(-1.0, 4.0, 2.0);

        let matrix = model.model_matrix();
        let inverse = matrix.try_inverse().unwrap();
        let world = model.transformed_vertices();
        for (original, transformed) in model.vertices().iter().zip(&world) {
            assert_abs_diff_eq!(
                (inverse * *transformed).xyz(),
                *original,
                epsilon = 1e-4
            );
        }
    }

    #[test]
    fn test_zero_scale_model_matrix_is_singular() {
        let mut model = Model::cube(1.0);
        model.scale = Vector3::zeros();
        assert_eq!(
            model.model_matrix().try_inverse(),
            Err(Error::SingularMatrix)
        );
    }

    #[test]
    fn test_cube_faces_point_outwards() {
        let cube = Model::cube(2.0);
        assert_eq!(cube.vertices().len(), 8);
        assert_eq!(cube.triangle_count(), 12);

        for triangle in cube.triangles() {
            let [v0, v1, v2] = triangle.vertices;
            let centroid = (v0 + v1 + v2) / 3.0;
            assert!(triangle.calculate_normal().dot(&centroid) > 0.0);
        }
    }

    #[test]
    fn test_house_indices_are_valid() {
        let house = Model::house();
        let rebuilt = Model::new(house.vertices().to_vec(), house.indices().to_vec()).unwrap();
        assert_eq!(rebuilt, house);
        assert_eq!(house.triangles().count(), 8);
    }
}
