/// Model transform for the slowly spinning turntable
use nalgebra::{Matrix4, Vector3};

/// Rotation about the vertical axis, advanced once per frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Turntable {
    /// Current angle in degrees, kept within `[0, 360)`
    pub angle: f32,
    /// Degrees added per frame
    pub speed: f32,
}

impl Turntable {
    pub fn new(speed: f32) -> Self {
        Self { angle: 0.0, speed }
    }

    pub fn advance(&mut self) {
        self.angle = (self.angle + self.speed).rem_euclid(360.0);
    }

    /// Model matrix rotating about +Y by the current angle
    pub fn model_matrix(&self) -> Matrix4<f32> {
        Matrix4::new_rotation(Vector3::new(0.0, self.angle.to_radians(), 0.0))
    }
}

impl Default for Turntable {
    fn default() -> Self {
        Self::new(0.15)
    }
}
