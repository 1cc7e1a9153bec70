/// Accumulated mesh rotation for animated scenes
use nalgebra::{Matrix4, Vector3};

/// Rotation around the X (pitch), Y (yaw) and Z (roll) axes, in radians
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Spin {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

impl Spin {
    pub fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }

    pub fn advance(&mut self, d_pitch: f32, d_yaw: f32, d_roll: f32) {
        self.pitch += d_pitch;
        self.yaw += d_yaw;
        self.roll += d_roll;
    }

    /// Rotation applied roll first, then yaw, then pitch
    pub fn matrix(&self) -> Matrix4<f32> {
        let rx = Matrix4::new_rotation(Vector3::new(self.pitch, 0.0, 0.0));
        let ry = Matrix4::new_rotation(Vector3::new(0.0, self.yaw, 0.0));
        let rz = Matrix4::new_rotation(Vector3::new(0.0, 0.0, self.roll));
        rx * ry * rz
    }

    /// Rotation about `pivot` instead of the origin
    pub fn matrix_about(&self, pivot: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new_translation(pivot) * self.matrix() * Matrix4::new_translation(&-pivot)
    }
}
