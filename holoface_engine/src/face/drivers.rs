//! Autonomous face drivers.
//!
//! Hosts that do not track blinking or speech themselves can run these
//! small state machines, feed them wall-clock deltas (and loudness
//! samples), and pass the outputs straight into `FrameParams`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Blink ramp speed, 0.15 per 16 ms frame
const BLINK_RATE: f32 = 9.375;
/// How long the lids stay shut
const HOLD_SECONDS: f32 = 0.1;
/// Bounds of the random pause between blinks
const IDLE_MIN_SECONDS: f32 = 2.0;
const IDLE_MAX_SECONDS: f32 = 6.0;

/// Mouth gain applied to loudness samples
const RMS_GAIN: f32 = 80.0;
/// Widest the mouth ever opens, in model units
const MAX_OPEN: f32 = 20.0;

// ============================================================================
// BLINK DRIVER
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlinkPhase {
    Idle,
    Closing,
    Hold,
    Opening,
}

/// Periodic blink state machine
///
/// Waits a random 2 to 6 seconds, closes the lids, holds them shut
/// briefly, opens them again and reschedules.
pub struct BlinkDriver {
    phase: BlinkPhase,
    value: f32,
    timer: f32,
    rng: StdRng,
}

impl BlinkDriver {
    /// Create a driver with an entropy-seeded schedule
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Create a driver with a fixed schedule for reproducible runs
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(mut rng: StdRng) -> Self {
        let timer = rng.gen_range(IDLE_MIN_SECONDS..IDLE_MAX_SECONDS);
        Self {
            phase: BlinkPhase::Idle,
            value: 0.0,
            timer,
            rng,
        }
    }

    /// Advance by `dt` seconds and return the blink factor in [0, 1]
    pub fn tick(&mut self, dt: f32) -> f32 {
        match self.phase {
            BlinkPhase::Idle => {
                self.timer -= dt;
                if self.timer <= 0.0 {
                    self.phase = BlinkPhase::Closing;
                }
            }
            BlinkPhase::Closing => {
                self.value += BLINK_RATE * dt;
                if self.value >= 1.0 {
                    self.value = 1.0;
                    self.timer = HOLD_SECONDS;
                    self.phase = BlinkPhase::Hold;
                }
            }
            BlinkPhase::Hold => {
                self.timer -= dt;
                if self.timer <= 0.0 {
                    self.phase = BlinkPhase::Opening;
                }
            }
            BlinkPhase::Opening => {
                self.value -= BLINK_RATE * dt;
                if self.value <= 0.0 {
                    self.value = 0.0;
                    self.timer = self.rng.gen_range(IDLE_MIN_SECONDS..IDLE_MAX_SECONDS);
                    self.phase = BlinkPhase::Idle;
                }
            }
        }
        self.value
    }

    /// Current blink factor without advancing
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Start a blink immediately if the lids are at rest
    pub fn trigger(&mut self) {
        if self.phase == BlinkPhase::Idle {
            self.phase = BlinkPhase::Closing;
        }
    }
}

impl Default for BlinkDriver {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// MOUTH DRIVER
// ============================================================================

/// Smoothed mouth opening driven by loudness samples
#[derive(Debug, Clone, Default)]
pub struct MouthDriver {
    value: f32,
}

impl MouthDriver {
    pub fn new() -> Self {
        Self { value: 0.0 }
    }

    /// Feed one loudness sample (RMS of the current audio window)
    pub fn feed_rms(&mut self, rms: f32) {
        let target = (rms * RMS_GAIN).min(MAX_OPEN);
        self.value = self.value * 0.7 + target * 0.3;
    }

    /// Blend toward an opening the caller computed itself
    pub fn set_open(&mut self, opening: f32) {
        self.value = self.value * 0.6 + opening * 0.4;
    }

    /// Current mouth opening in model units, never negative
    pub fn value(&self) -> f32 {
        self.value.max(0.0)
    }
}

#[cfg(test)]
#[path = "drivers_tests.rs"]
mod tests;
