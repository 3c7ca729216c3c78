//! Camera and projection utilities
use crate::{matrix::Matrix4x4, transform::Transform, vector::Vector3};

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProjectionMode {
    Orthographic,
    Perspective,
}

/// Camera configuration for 3D rendering
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Camera {
    pub position: Vector3,
    pub target: Vector3,
    pub up: Vector3,
    /// Vertical field of view in radians
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub mode: ProjectionMode,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 5.0),
            target: Vector3::zeros(),
            up: Vector3::new(0.0, 1.0, 0.0),
            fov: std::f32::consts::FRAC_PI_4, // 45 degrees
            aspect: width as f32 / height as f32,
            near: 0.1,
            far: 100.0,
            mode: ProjectionMode::Perspective,
        }
    }

    /// Create the view matrix (camera transformation).
    ///
    /// Right-handed: the camera looks down its local negative z-axis.
    pub fn view_matrix(&self) -> Matrix4x4 {
        let forward = (self.target - self.position).normalize();
        let side = forward.cross(&self.up).normalize();
        let up = side.cross(&forward);
        let eye = self.position;

        Matrix4x4::from_rows([
            [side.x(), side.y(), side.z(), -side.dot(&eye)],
            [up.x(), up.y(), up.z(), -up.dot(&eye)],
            [-forward.x(), -forward.y(), -forward.z(), forward.dot(&eye)],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Create the projection matrix.
    ///
    /// Maps the view volume to clip space with depth in `[-1, 1]` after the
    /// homogeneous divide.
    pub fn projection_matrix(&self) -> Matrix4x4 {
        match self.mode {
            ProjectionMode::Perspective => perspective(self.aspect, self.fov, self.near, self.far),
            ProjectionMode::Orthographic => {
                let height = (self.position - self.target).norm();
                let width = height * self.aspect;
                orthographic(
                    -width / 2.0,
                    width / 2.0,
                    -height / 2.0,
                    height / 2.0,
                    self.near,
                    self.far,
                )
            }
        }
    }

    /// Project a 3D point to 2D screen space.
    ///
    /// Returns `(x, y, depth)` with the origin in the top-left corner, or
    /// `None` if the point is behind the camera or outside the view volume.
    pub fn project_to_screen(
        &self,
        point: &Vector3,
        model_matrix: &Matrix4x4,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let view = self.view_matrix();
        let projection = self.projection_matrix();
        let mvp = Transform::mvp_matrix(model_matrix, &view, &projection);

        // Transform to clip space
        let clip = mvp * point.extend(1.0);

        // Prevent division by near-zero or negative w
        if clip.w() < 1e-6 {
            log::trace!("Rejected {point:?}: clip-space w = {}", clip.w());
            return None;
        }

        let ndc = clip.to_point();

        // Clip test
        let inside = |value: f32| (-1.0..=1.0).contains(&value);
        if !(inside(ndc.x()) && inside(ndc.y()) && inside(ndc.z())) {
            log::trace!("Rejected {point:?}: outside view volume at {ndc:?}");
            return None;
        }

        // Convert to screen space
        let screen_x = (ndc.x() + 1.0) * 0.5 * width as f32;
        let screen_y = (1.0 - ndc.y()) * 0.5 * height as f32;

        Some((screen_x, screen_y, ndc.z()))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

fn perspective(aspect: f32, fov: f32, near: f32, far: f32) -> Matrix4x4 {
    let focal_length = 1.0 / (fov / 2.0).tan();
    let depth = far - near;

    Matrix4x4::from_rows([
        [focal_length / aspect, 0.0, 0.0, 0.0],
        [0.0, focal_length, 0.0, 0.0],
        [0.0, 0.0, -(far + near) / depth, -2.0 * far * near / depth],
        [0.0, 0.0, -1.0, 0.0],
    ])
}

fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Matrix4x4 {
    let width = right - left;
    let height = top - bottom;
    let depth = far - near;

    Matrix4x4::from_rows([
        [2.0 / width, 0.0, 0.0, -(right + left) / width],
        [0.0, 2.0 / height, 0.0, -(top + bottom) / height],
        [0.0, 0.0, -2.0 / depth, -(far + near) / depth],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn to_point(v: Vector3) -> nalgebra::Point3<f32> {
        nalgebra::Point3::from(nalgebra::Vector3::<f32>::from(v))
    }

    #[test]
    fn test_camera_creation() {
        let camera = Camera::new(800, 600);
        assert_eq!(camera.mode, ProjectionMode::Perspective);
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);
        assert_eq!(Camera::default(), camera);
    }

    #[test]
    fn test_view_matrix() {
        let camera = Camera::new(800, 600);
        let view = camera.view_matrix();
        // The camera position ends up at the origin
        assert_abs_diff_eq!(
            (view * camera.position.extend(1.0)).xyz(),
            Vector3::zeros(),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_view_matrix_matches_nalgebra() {
        let mut camera = Camera::new(640, 480);
        camera.position = Vector3::new(3.0, -2.0, 7.0);
        camera.target = Vector3::new(0.5, 1.0, -1.0);

        let expected = nalgebra::Matrix4::<f32>::look_at_rh(
            &to_point(camera.position),
            &to_point(camera.target),
            &nalgebra::Vector3::<f32>::from(camera.up),
        );
        assert_abs_diff_eq!(
            camera.view_matrix(),
            Matrix4x4::from(expected),
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_perspective_matches_nalgebra() {
        let camera = Camera::new(800, 600);
        let expected = nalgebra::Matrix4::<f32>::new_perspective(
            camera.aspect,
            camera.fov,
            camera.near,
            camera.far,
        );
        assert_abs_diff_eq!(
            camera.projection_matrix(),
            Matrix4x4::from(expected),
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_orthographic_matches_nalgebra() {
        let mut camera = Camera::new(800, 400);
        camera.mode = ProjectionMode::Orthographic;

        let expected = nalgebra::Matrix4::<f32>::new_orthographic(-5.0, 5.0, -2.5, 2.5, 0.1, 100.0);
        assert_abs_diff_eq!(
            camera.projection_matrix(),
            Matrix4x4::from(expected),
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_target_projects_to_screen_center() {
        let camera = Camera::new(800, 600);
        let (x, y, depth) = camera
            .project_to_screen(&Vector3::zeros(), &Matrix4x4::IDENTITY, 800, 600)
            .unwrap();
        assert_abs_diff_eq!(x, 400.0, epsilon = 1e-3);
        assert_abs_diff_eq!(y, 300.0, epsilon = 1e-3);
        assert!((-1.0..=1.0).contains(&depth));
    }

    #[test]
    fn test_screen_y_points_down() {
        let camera = Camera::new(800, 600);
        let (_, y, _) = camera
            .project_to_screen(&Vector3::new(0.0, 1.0, 0.0), &Matrix4x4::IDENTITY, 800, 600)
            .unwrap();
        assert!(y < 300.0);
    }

    #[test]
    fn test_model_matrix_is_applied() {
        let camera = Camera::new(800, 600);
        let model = Transform::translation(0.0, 0.0, 10.0);
        // Moved behind the camera
        assert_eq!(
            camera.project_to_screen(&Vector3::zeros(), &model, 800, 600),
            None
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_camera_serde_round_trip() {
        let mut camera = Camera::new(640, 480);
        camera.position = Vector3::new(1.5, -2.0, 8.25);
        camera.mode = ProjectionMode::Orthographic;

        let json = serde_json::to_string(&camera).unwrap();
        let restored: Camera = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, camera);
    }

    #[test]
    fn test_points_outside_view_are_rejected() {
        let camera = Camera::new(800, 600);
        let identity = Matrix4x4::IDENTITY;
        // Far off to the side
        assert!(camera
            .project_to_screen(&Vector3::new(100.0, 0.0, 0.0), &identity, 800, 600)
            .is_none());
        // On the camera plane, w = 0
        assert!(camera
            .project_to_screen(&Vector3::new(0.0, 0.0, 5.0), &identity, 800, 600)
            .is_none());
        // Beyond the far plane
        assert!(camera
            .project_to_screen(&Vector3::new(0.0, 0.0, -200.0), &identity, 800, 600)
            .is_none());
    }
}
