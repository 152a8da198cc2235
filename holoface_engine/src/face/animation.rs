//! Animation state: per-frame parameters, mood presets, and the
//! smoothed channels that glide between moods.

use glam::{Vec3, Vec4};

// ============================================================================
// FRAME PARAMS
// ============================================================================

/// Per-frame animation parameters, used exactly as given
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameParams {
    /// Animation clock in seconds
    pub time: f32,
    /// Blink factor, 0 open to 1 closed
    pub blink: f32,
    /// Mouth opening in model units, typically 0 to 20
    pub mouth: f32,
}

// ============================================================================
// MOOD
// ============================================================================

/// Mood preset driving color and movement of the whole face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mood {
    #[default]
    Neutral,
    Calculating,
    Amused,
    Concerned,
    Hostile,
}

/// Values a mood drives the smoothed state toward
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoodTarget {
    /// Tint color (RGB)
    pub color: Vec3,
    /// Spike pulse intensity
    pub spike: f32,
    /// Confusion shimmer intensity
    pub confusion: f32,
}

impl Mood {
    /// Target channel values for this mood
    pub fn target(&self) -> MoodTarget {
        match self {
            Mood::Neutral => MoodTarget {
                color: Vec3::new(0.0, 1.0, 1.0),
                spike: 0.0,
                confusion: 0.0,
            },
            Mood::Calculating => MoodTarget {
                color: Vec3::new(0.29, 0.0, 0.51),
                spike: 0.1,
                confusion: 0.0,
            },
            Mood::Amused => MoodTarget {
                color: Vec3::new(1.0, 0.84, 0.0),
                spike: 0.0,
                confusion: 0.2,
            },
            Mood::Concerned => MoodTarget {
                color: Vec3::new(1.0, 0.27, 0.0),
                spike: 0.5,
                confusion: 0.1,
            },
            Mood::Hostile => MoodTarget {
                color: Vec3::new(1.0, 0.0, 0.0),
                spike: 1.0,
                confusion: 0.5,
            },
        }
    }

    /// Animation-clock multiplier, hosts advance their clock by dt * scale
    pub fn time_scale(&self) -> f32 {
        match self {
            Mood::Calculating => 5.0,
            Mood::Hostile => 2.0,
            _ => 1.0,
        }
    }
}

// ============================================================================
// MOOD STATE
// ============================================================================

/// Smoothed mood channels
///
/// Color, spike and confusion move toward their targets one step per
/// rendered frame; a step covers a fixed fraction of the remaining
/// distance, so mood changes glide over roughly a second at 60 fps
/// instead of snapping.
#[derive(Debug, Clone)]
pub struct MoodState {
    color: Vec3,
    spike: f32,
    confusion: f32,
    target: MoodTarget,
    smoothing: f32,
}

impl MoodState {
    /// Create a state resting at a mood's targets
    pub fn new(mood: Mood, smoothing: f32) -> Self {
        let target = mood.target();
        Self {
            color: target.color,
            spike: target.spike,
            confusion: target.confusion,
            target,
            smoothing,
        }
    }

    /// Set the mood to glide toward
    pub fn set_mood(&mut self, mood: Mood) {
        self.target = mood.target();
    }

    /// Set raw target values directly
    pub fn set_target(&mut self, target: MoodTarget) {
        self.target = target;
    }

    /// One smoothing step, called once per rendered frame
    pub fn advance(&mut self) {
        self.color += (self.target.color - self.color) * self.smoothing;
        self.spike += (self.target.spike - self.spike) * self.smoothing;
        self.confusion += (self.target.confusion - self.confusion) * self.smoothing;
    }

    /// Current color as RGBA with full alpha
    pub fn color(&self) -> Vec4 {
        self.color.extend(1.0)
    }

    /// Current spike intensity
    pub fn spike(&self) -> f32 {
        self.spike
    }

    /// Current confusion intensity
    pub fn confusion(&self) -> f32 {
        self.confusion
    }

    /// Get the target values
    pub fn target(&self) -> &MoodTarget {
        &self.target
    }

    /// True when every channel is within epsilon of its target
    pub fn is_settled(&self, epsilon: f32) -> bool {
        (self.target.color - self.color).abs().max_element() < epsilon
            && (self.target.spike - self.spike).abs() < epsilon
            && (self.target.confusion - self.confusion).abs() < epsilon
    }
}

#[cfg(test)]
#[path = "animation_tests.rs"]
mod tests;
