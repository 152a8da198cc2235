use crate::engine_bail;
use crate::error::Result;

/// Configuration for a face renderer
#[derive(Debug, Clone, PartialEq)]
pub struct FaceConfig {
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Number of points on the head lattice
    pub point_count: u32,
    /// Head radius in world units
    pub head_radius: f32,
    /// Vertical stretch applied to the head sphere
    pub height_scale: f32,
    /// Per-frame blend factor toward the mood targets, in (0, 1]
    pub mood_smoothing: f32,
    /// Render target clear color (RGBA)
    pub clear_color: [f32; 4],
}

impl Default for FaceConfig {
    fn default() -> Self {
        Self {
            width: 300,
            height: 300,
            point_count: 850,
            head_radius: 90.0,
            height_scale: 1.25,
            mood_smoothing: 0.08,
            clear_color: [0.0, 0.0, 0.0, 0.0],
        }
    }
}

impl FaceConfig {
    /// Byte size of one output frame (tightly packed BGRA)
    pub fn output_len(&self) -> usize {
        self.width as usize * self.height as usize * 4
    }

    /// Checks the configuration for values the renderer cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            engine_bail!(
                "holoface::FaceConfig",
                "Output extent must be non-zero, got {}x{}",
                self.width,
                self.height
            );
        }
        if self.point_count < 2 {
            engine_bail!(
                "holoface::FaceConfig",
                "Point count must be at least 2, got {}",
                self.point_count
            );
        }
        if self.head_radius <= 0.0 {
            engine_bail!(
                "holoface::FaceConfig",
                "Head radius must be positive, got {}",
                self.head_radius
            );
        }
        if self.height_scale <= 0.0 {
            engine_bail!(
                "holoface::FaceConfig",
                "Height scale must be positive, got {}",
                self.height_scale
            );
        }
        if self.mood_smoothing <= 0.0 || self.mood_smoothing > 1.0 {
            engine_bail!(
                "holoface::FaceConfig",
                "Mood smoothing must be in (0, 1], got {}",
                self.mood_smoothing
            );
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
