/// Camera and projection utilities
use nalgebra::{Matrix4, Point3, Vector3};

/// Distance moved by a single raise, dolly or tilt request
pub const CAMERA_STEP: f32 = 0.2;

/// Perspective camera looking at a point on the vertical axis
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Point3<f32>,
    /// Height of the look-at point on the Y axis
    pub tilt: f32,
    pub up: Vector3<f32>,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        Self {
            position: Point3::new(0.0, 0.0, 3.5),
            tilt: 0.0,
            up: Vector3::new(0.0, 1.0, 0.0),
            fov: std::f32::consts::PI / 4.0, // 45 degrees
            aspect,
            near: 0.1,
            far: 100.0,
        }
    }

    pub fn target(&self) -> Point3<f32> {
        Point3::new(0.0, self.tilt, 0.0)
    }

    /// Move the camera up (positive) or down (negative)
    pub fn raise(&mut self, amount: f32) {
        self.position.y += amount;
    }

    /// Move the camera towards the scene (positive) or away from it
    pub fn dolly(&mut self, amount: f32) {
        self.position.z -= amount;
    }

    /// Shift the look-at point up or down
    pub fn tilt_by(&mut self, amount: f32) {
        self.tilt += amount;
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target(), &self.up)
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
    }

    /// Project a model-space point to screen space.
    ///
    /// Returns `(x, y, depth)` with depth in normalized device units, or
    /// `None` when the point falls outside the view volume.
    pub fn project_to_screen(
        &self,
        point: &Point3<f32>,
        model_matrix: &Matrix4<f32>,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let mvp = self.projection_matrix() * self.view_matrix() * model_matrix;
        let ndc = mvp.transform_point(point);

        if !ndc.coords.iter().all(|c| c.is_finite()) {
            return None;
        }
        if ndc.x < -1.0 || ndc.x > 1.0 || ndc.y < -1.0 || ndc.y > 1.0 {
            return None;
        }
        if ndc.z < -1.0 || ndc.z > 1.0 {
            return None;
        }

        let screen_x = (ndc.x + 1.0) * 0.5 * width as f32;
        let screen_y = (1.0 - ndc.y) * 0.5 * height as f32;
        Some((screen_x, screen_y, ndc.z))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_camera_creation() {
        let camera = Camera::new(2.0);
        assert_relative_eq!(camera.position, Point3::new(0.0, 0.0, 3.5));
        assert_eq!(camera.target(), Point3::origin());
        assert!((camera.aspect - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_target_projects_to_center() {
        let camera = Camera::new(1.0);
        let (x, y, depth) = camera
            .project_to_screen(&Point3::origin(), &Matrix4::identity(), 80, 40)
            .unwrap();
        assert_relative_eq!(x, 40.0, epsilon = 1e-3);
        assert_relative_eq!(y, 20.0, epsilon = 1e-3);
        assert!((-1.0..=1.0).contains(&depth));
    }

    #[test]
    fn test_nearer_points_have_smaller_depth() {
        let camera = Camera::new(1.0);
        let model = Matrix4::identity();
        let (_, _, near) = camera
            .project_to_screen(&Point3::new(0.0, 0.0, 0.5), &model, 80, 40)
            .unwrap();
        let (_, _, far) = camera
            .project_to_screen(&Point3::new(0.0, 0.0, -0.5), &model, 80, 40)
            .unwrap();
        assert!(near < far);
    }

    #[test]
    fn test_points_behind_camera_are_clipped() {
        let camera = Camera::new(1.0);
        let behind = Point3::new(0.0, 0.0, 10.0);
        assert!(camera
            .project_to_screen(&behind, &Matrix4::identity(), 80, 40)
            .is_none());
    }

    #[test]
    fn test_controls_move_camera() {
        let mut camera = Camera::default();
        camera.raise(CAMERA_STEP);
        camera.dolly(CAMERA_STEP);
        camera.tilt_by(-CAMERA_STEP);
        assert_relative_eq!(camera.position, Point3::new(0.0, 0.2, 3.3), epsilon = 1e-6);
        assert_relative_eq!(camera.target(), Point3::new(0.0, -0.2, 0.0), epsilon = 1e-6);
    }
}
