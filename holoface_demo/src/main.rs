//! Holoface demo - animated face in a desktop window.
//!
//! Renders the point-cloud face with the soft rasterizer backend and
//! presents each frame through a minifb window.
//!
//! Controls:
//! - 1 to 5 select the mood (neutral, calculating, amused, concerned, hostile)
//! - Space held makes the face talk
//! - B triggers a blink
//! - Esc quits

use holoface_engine::holoface::{Engine, Error, Result};
use holoface_engine::holoface::face::{BlinkDriver, FaceConfig, FrameParams, Mood, MouthDriver};
use holoface_engine::holoface::render::Config;
use holoface_engine_renderer_soft::SoftGraphicsDevice;
use minifb::{Key, KeyRepeat, Window, WindowOptions};
use std::time::Instant;

const MOOD_KEYS: [(Key, Mood); 5] = [
    (Key::Key1, Mood::Neutral),
    (Key::Key2, Mood::Calculating),
    (Key::Key3, Mood::Amused),
    (Key::Key4, Mood::Concerned),
    (Key::Key5, Mood::Hostile),
];

/// Loudness fed to the mouth driver while Space is held
const TALK_RMS: f32 = 0.15;

fn main() -> Result<()> {
    Engine::initialize()?;
    Engine::create_device(SoftGraphicsDevice::new(Config {
        enable_validation: false,
        app_name: "Holoface Demo".to_string(),
        app_version: (0, 1, 0),
    }))?;

    let config = FaceConfig::default();
    let width = config.width as usize;
    let height = config.height as usize;
    let mut pixels = vec![0u8; config.output_len()];
    Engine::create_face(config)?;

    let mut window = Window::new("Holoface Demo", width, height, WindowOptions::default())
        .map_err(|e| Error::InitializationFailed(format!("Window creation failed: {}", e)))?;

    println!("Holoface demo");
    println!("  1-5    select mood");
    println!("  Space  talk");
    println!("  B      blink");
    println!("  Esc    quit");

    let mut display = vec![0u32; width * height];
    let mut blink = BlinkDriver::new();
    let mut mouth = MouthDriver::new();
    let mut mood = Mood::Neutral;
    let mut clock = 0.0f32;
    let mut last_frame = Instant::now();

    while window.is_open() && !window.is_key_down(Key::Escape) {
        let now = Instant::now();
        let dt = (now - last_frame).as_secs_f32();
        last_frame = now;

        for (key, selected) in MOOD_KEYS {
            if window.is_key_pressed(key, KeyRepeat::No) && mood != selected {
                mood = selected;
                set_mood(selected)?;
            }
        }

        if window.is_key_pressed(Key::B, KeyRepeat::No) {
            blink.trigger();
        }

        // Holding Space talks, releasing it lets the mouth settle shut
        let rms = if window.is_key_down(Key::Space) { TALK_RMS } else { 0.0 };
        mouth.feed_rms(rms);

        // The animation clock runs faster in agitated moods
        clock += dt * mood.time_scale();

        let params = FrameParams {
            time: clock,
            blink: blink.tick(dt),
            mouth: mouth.value(),
        };
        Engine::render_face(&params, &mut pixels)?;

        // BGRA bytes to the window's 0RGB words
        for (word, bgra) in display.iter_mut().zip(pixels.chunks_exact(4)) {
            *word = u32::from(bgra[2]) << 16 | u32::from(bgra[1]) << 8 | u32::from(bgra[0]);
        }

        window
            .update_with_buffer(&display, width, height)
            .map_err(|e| Error::BackendError(format!("Window update failed: {}", e)))?;
    }

    Engine::shutdown();
    Ok(())
}

fn set_mood(mood: Mood) -> Result<()> {
    let face = Engine::face()?;
    let mut renderer = face
        .lock()
        .map_err(|_| Error::BackendError("Face renderer lock poisoned".to_string()))?;
    renderer.set_mood(mood);
    Ok(())
}
