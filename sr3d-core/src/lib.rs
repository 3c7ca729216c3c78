//! SR3D Core Library - Geometric math for a CPU software rasterizer
//!
//! This library provides the value types a rasterization pipeline is built
//! on: 2/3/4-component vectors, a column-major 4x4 matrix with inversion,
//! transform and camera matrix builders, and indexed triangle models.
//! Every operation is a pure function of its inputs.

pub mod error;
pub mod matrix;
pub mod model;
pub mod projection;
pub mod transform;
pub mod vector;

// Re-export commonly used types
pub use error::{Error, Result};
pub use matrix::Matrix4x4;
pub use model::{Model, Triangle, TriangleIndices};
pub use projection::{Camera, ProjectionMode};
pub use transform::{RotationState, Transform};
pub use vector::{Vector2, Vector3, Vector4};
