/// FaceCamera - fixed left-handed camera for the face render.
///
/// The camera sits on the -Z axis looking at the origin and never moves;
/// animation comes from spinning the face itself around Y. View and
/// projection are computed once at creation, the world matrix is a
/// function of the animation clock.

use glam::{Mat4, Vec3};

/// Camera eye position
const EYE: Vec3 = Vec3::new(0.0, 0.0, -400.0);

/// Vertical field of view in radians
const FOV_Y: f32 = std::f32::consts::FRAC_PI_4;

/// Near and far clip planes
const Z_NEAR: f32 = 1.0;
const Z_FAR: f32 = 1000.0;

/// Rotation speed of the face, radians per animation second
const SPIN_RATE: f32 = 0.5;

/// Fixed left-handed camera for the face render
#[derive(Debug, Clone)]
pub struct FaceCamera {
    view_matrix: Mat4,
    projection_matrix: Mat4,
}

impl FaceCamera {
    /// Create a camera for a render target of the given extent.
    pub fn new(width: u32, height: u32) -> Self {
        let aspect = width as f32 / height as f32;
        Self {
            view_matrix: Mat4::look_at_lh(EYE, Vec3::ZERO, Vec3::Y),
            projection_matrix: Mat4::perspective_lh(FOV_Y, aspect, Z_NEAR, Z_FAR),
        }
    }

    // ===== GETTERS =====

    /// View matrix (inverse of the camera's world transform).
    pub fn view_matrix(&self) -> &Mat4 {
        &self.view_matrix
    }

    /// Projection matrix (left-handed perspective).
    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    /// World matrix at the given animation time: a slow turn around Y.
    pub fn world_matrix(&self, time: f32) -> Mat4 {
        Mat4::from_rotation_y(time * SPIN_RATE)
    }

    /// Combined world-view-projection matrix at the given animation time.
    pub fn world_view_projection(&self, time: f32) -> Mat4 {
        self.projection_matrix * self.view_matrix * self.world_matrix(time)
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
