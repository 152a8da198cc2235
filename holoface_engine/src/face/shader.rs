//! Face vertex program.
//!
//! Runs once per lattice point each frame: applies the blink, mouth,
//! spike and shimmer displacements in model space, transforms to clip
//! space, and tints the point by the current mood color. The program
//! reads its inputs from raw vertex and constant bytes so the device
//! layer stays ignorant of face types.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3, Vec4};

use crate::face::mesh::{PointVertex, Region};
use crate::graphics_device::{ClipVertex, VertexShader};

/// Model-space height of the mouth hinge line
const MOUTH_HINGE_Y: f32 = -25.0;
/// Fraction of eye height removed by a full blink
const BLINK_COLLAPSE: f32 = 0.9;
/// Peak radial growth at full spike intensity
const SPIKE_AMPLITUDE: f32 = 0.35;
/// Spike pulse speed in radians per second of animation time
const SPIKE_RATE: f32 = 8.0;
/// How many pulse crests wrap around the head
const SPIKE_WINDING: f32 = 5.0;
/// Peak lateral shimmer in model units at full confusion
const SHIMMER_AMPLITUDE: f32 = 6.0;
/// Shimmer speed in radians per second of animation time
const SHIMMER_RATE: f32 = 11.0;
/// Vertical variation of the shimmer phase
const SHIMMER_PITCH: f32 = 0.13;

// ============================================================================
// FACE CONSTANTS
// ============================================================================

/// Per-frame constants uploaded to the uniform buffer
///
/// Layout is shared with the vertex program byte-for-byte; the trailing
/// padding keeps the size a multiple of 16 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct FaceConstants {
    /// Combined world-view-projection matrix
    pub wvp: Mat4,
    /// Animation clock in seconds
    pub time: f32,
    /// Blink factor, 0 open to 1 closed
    pub blink: f32,
    /// Mouth opening in model units
    pub mouth: f32,
    /// Smoothed spike intensity
    pub spike: f32,
    /// Smoothed mood color (RGBA)
    pub mood_color: Vec4,
    /// Confusion shimmer intensity
    pub confusion: f32,
    pub _padding: [f32; 3],
}

impl FaceConstants {
    /// Byte size of the constants block
    pub const SIZE: u64 = std::mem::size_of::<FaceConstants>() as u64;
}

// ============================================================================
// FACE SHADER
// ============================================================================

/// The face vertex program
pub struct FaceShader;

impl VertexShader for FaceShader {
    fn shade(&self, vertex: &[u8], constants: &[u8]) -> ClipVertex {
        if vertex.len() != std::mem::size_of::<PointVertex>()
            || constants.len() != std::mem::size_of::<FaceConstants>()
        {
            return ClipVertex::REJECTED;
        }
        let vertex: PointVertex = bytemuck::pod_read_unaligned(vertex);
        let constants: FaceConstants = bytemuck::pod_read_unaligned(constants);

        let mut pos = Vec3::from_array(vertex.position);
        let is_eye = vertex.region == Region::Eye.tag();
        let is_mouth = vertex.region == Region::Mouth.tag();

        if is_eye {
            // Eyelids squash toward the eye center line
            pos.y *= 1.0 - constants.blink * BLINK_COLLAPSE;
        } else if is_mouth {
            // Mouth points swing away from the hinge line, points exactly
            // on the hinge stay put
            let dist = pos.y - MOUTH_HINGE_Y;
            let direction = if dist > 0.0 {
                1.0
            } else if dist < 0.0 {
                -1.0
            } else {
                0.0
            };
            pos.y += direction * constants.mouth;
        }

        if !is_eye {
            // Spike pulse travels around the head, pushing points outward
            // on the crests only
            let phase = pos.z.atan2(pos.x);
            let crest = (constants.time * SPIKE_RATE + phase * SPIKE_WINDING)
                .sin()
                .max(0.0);
            pos *= 1.0 + constants.spike * SPIKE_AMPLITUDE * crest;

            // Confusion jitters points sideways
            pos.x += constants.confusion
                * SHIMMER_AMPLITUDE
                * (constants.time * SHIMMER_RATE + pos.y * SHIMMER_PITCH).sin();
        }

        let position = constants.wvp * pos.extend(1.0);

        // Eyes keep their own color in every mood
        let base = Vec4::from_array(vertex.color);
        let color = if is_eye {
            base
        } else {
            (base.truncate() * constants.mood_color.truncate()).extend(base.w)
        };

        ClipVertex { position, color }
    }
}

#[cfg(test)]
#[path = "shader_tests.rs"]
mod tests;
