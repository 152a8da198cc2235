/// Holoface Engine - Singleton manager for engine subsystems
///
/// This module provides global singleton management for the graphics device
/// and the face renderer. It uses thread-safe static storage with RwLock for
/// safe concurrent access.

use std::sync::{OnceLock, RwLock, Arc, Mutex};
use std::time::SystemTime;
use crate::graphics_device::GraphicsDevice;
use crate::face::{FaceConfig, FaceRenderer, FrameParams};
use crate::error::{Result, Error};
use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};

// ===== INTERNAL STATE =====

/// Global engine state storage
static ENGINE_STATE: OnceLock<EngineState> = OnceLock::new();

/// Global logger (initialized with DefaultLogger)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

/// Internal state structure holding all engine singletons
struct EngineState {
    /// Graphics device singleton (wrapped in Mutex for thread-safe mutable access)
    device: RwLock<Option<Arc<Mutex<dyn GraphicsDevice>>>>,
    /// Face renderer singleton
    face: RwLock<Option<Arc<Mutex<FaceRenderer>>>>,
}

impl EngineState {
    /// Create a new empty engine state
    fn new() -> Self {
        Self {
            device: RwLock::new(None),
            face: RwLock::new(None),
        }
    }
}

// ===== PUBLIC API =====

/// Main engine singleton manager
///
/// Manages the lifecycle of the engine subsystems (graphics device, face
/// renderer) using a singleton pattern with thread-safe access.
///
/// # Example
///
/// ```no_run
/// use holoface_engine::holoface::Engine;
/// use holoface_engine::holoface::face::{FaceConfig, FrameParams};
/// use holoface_engine::holoface::render::Config;
/// use holoface_engine_renderer_soft::SoftGraphicsDevice;
///
/// // Initialize engine and the rendering stack
/// Engine::initialize()?;
/// Engine::create_device(SoftGraphicsDevice::new(Config::default()))?;
/// Engine::create_face(FaceConfig::default())?;
///
/// // Render one frame into a caller-owned buffer
/// let mut frame = vec![0u8; 300 * 300 * 4];
/// Engine::render_face(&FrameParams::default(), &mut frame)?;
///
/// // Cleanup
/// Engine::shutdown();
/// # Ok::<(), holoface_engine::holoface::Error>(())
/// ```
pub struct Engine;

impl Engine {
    /// Helper to log errors before returning them (internal use)
    ///
    /// This ensures all Engine errors are automatically logged with proper
    /// severity and source information.
    fn log_and_return_error(error: Error) -> Error {
        match &error {
            Error::InitializationFailed(msg) => {
                crate::engine_error!("holoface::Engine", "Initialization failed: {}", msg);
            }
            Error::BackendError(msg) => {
                crate::engine_error!("holoface::Engine", "Backend error: {}", msg);
            }
            _ => {
                crate::engine_error!("holoface::Engine", "Engine error: {}", error);
            }
        }
        error
    }

    /// Initialize the engine
    ///
    /// This must be called once at application startup before creating any
    /// subsystems. Calling it again is harmless.
    ///
    /// # Errors
    ///
    /// Currently always succeeds, but returns Result for future extensibility.
    pub fn initialize() -> Result<()> {
        ENGINE_STATE.get_or_init(EngineState::new);
        Ok(())
    }

    /// Shutdown the entire engine and destroy all singletons
    ///
    /// This should be called at application shutdown to properly cleanup all
    /// subsystems. After calling this, subsystems must be created again before
    /// use.
    pub fn shutdown() {
        if let Some(state) = ENGINE_STATE.get() {
            // Clear face BEFORE device (face resources reference device objects)
            if let Ok(mut face) = state.face.write() {
                *face = None;
            }
            // Clear device
            if let Ok(mut device) = state.device.write() {
                *device = None;
            }
        }
    }

    // ===== DEVICE API =====

    /// Create and register the graphics device singleton
    ///
    /// This is a simplified API that automatically wraps the device in Arc
    /// and registers it as a global singleton.
    ///
    /// # Arguments
    ///
    /// * `device` - Any type implementing the GraphicsDevice trait
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The engine is not initialized
    /// - A device already exists
    /// - The device lock is poisoned
    ///
    /// # Example
    ///
    /// ```no_run
    /// use holoface_engine::holoface::Engine;
    /// use holoface_engine::holoface::render::Config;
    /// use holoface_engine_renderer_soft::SoftGraphicsDevice;
    ///
    /// Engine::initialize()?;
    /// Engine::create_device(SoftGraphicsDevice::new(Config::default()))?;
    /// # Ok::<(), holoface_engine::holoface::Error>(())
    /// ```
    pub fn create_device<D: GraphicsDevice + 'static>(device: D) -> Result<()> {
        // Wrap in Arc<Mutex<dyn GraphicsDevice>>
        let arc_device: Arc<Mutex<dyn GraphicsDevice>> = Arc::new(Mutex::new(device));

        // Register as singleton
        Self::register_device(arc_device)?;

        crate::engine_info!("holoface::Engine", "Graphics device singleton created successfully");

        Ok(())
    }

    /// Register a graphics device singleton (internal use)
    ///
    /// This is called internally by create_device(). Marked pub(crate) to
    /// allow access from other modules if needed.
    pub(crate) fn register_device(device: Arc<Mutex<dyn GraphicsDevice>>) -> Result<()> {
        let state = ENGINE_STATE.get()
            .ok_or_else(|| Self::log_and_return_error(
                Error::InitializationFailed("Engine not initialized. Call Engine::initialize() first.".to_string())
            ))?;

        let mut lock = state.device.write()
            .map_err(|_| Self::log_and_return_error(
                Error::BackendError("Device lock poisoned".to_string())
            ))?;

        if lock.is_some() {
            return Err(Self::log_and_return_error(
                Error::InitializationFailed("Graphics device already exists. Call Engine::destroy_device() first.".to_string())
            ));
        }

        *lock = Some(device);
        Ok(())
    }

    /// Get the graphics device singleton
    ///
    /// This provides global access to the device after it has been created.
    ///
    /// # Returns
    ///
    /// A shared pointer to the device wrapped in a Mutex for thread-safe access
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The engine is not initialized
    /// - The device has not been created
    pub fn device() -> Result<Arc<Mutex<dyn GraphicsDevice>>> {
        let state = ENGINE_STATE.get()
            .ok_or_else(|| Self::log_and_return_error(
                Error::InitializationFailed("Engine not initialized. Call Engine::initialize() first.".to_string())
            ))?;

        let lock = state.device.read()
            .map_err(|_| Self::log_and_return_error(
                Error::BackendError("Device lock poisoned".to_string())
            ))?;

        lock.clone()
            .ok_or_else(|| Self::log_and_return_error(
                Error::InitializationFailed("Graphics device not created. Call Engine::create_device() first.".to_string())
            ))
    }

    /// Destroy the graphics device singleton
    ///
    /// Removes the device singleton, allowing a new one to be created.
    /// All existing device references will remain valid until dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine is not initialized
    pub fn destroy_device() -> Result<()> {
        let state = ENGINE_STATE.get()
            .ok_or_else(|| Self::log_and_return_error(
                Error::InitializationFailed("Engine not initialized".to_string())
            ))?;

        let mut lock = state.device.write()
            .map_err(|_| Self::log_and_return_error(
                Error::BackendError("Device lock poisoned".to_string())
            ))?;

        *lock = None;

        crate::engine_info!("holoface::Engine", "Graphics device singleton destroyed");

        Ok(())
    }

    // ===== FACE API =====

    /// Create and register the face renderer singleton
    ///
    /// Builds a FaceRenderer on the registered graphics device and stores it
    /// as a global singleton.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The engine is not initialized
    /// - The graphics device has not been created
    /// - A face renderer already exists
    /// - The configuration is invalid
    ///
    /// # Example
    ///
    /// ```no_run
    /// use holoface_engine::holoface::Engine;
    /// use holoface_engine::holoface::face::FaceConfig;
    ///
    /// Engine::create_face(FaceConfig::default())?;
    /// # Ok::<(), holoface_engine::holoface::Error>(())
    /// ```
    pub fn create_face(config: FaceConfig) -> Result<()> {
        let device = Self::device()?;

        let state = ENGINE_STATE.get()
            .ok_or_else(|| Self::log_and_return_error(
                Error::InitializationFailed("Engine not initialized. Call Engine::initialize() first.".to_string())
            ))?;

        let mut lock = state.face.write()
            .map_err(|_| Self::log_and_return_error(
                Error::BackendError("Face lock poisoned".to_string())
            ))?;

        if lock.is_some() {
            return Err(Self::log_and_return_error(
                Error::InitializationFailed("Face renderer already exists. Call Engine::destroy_face() first.".to_string())
            ));
        }

        let renderer = FaceRenderer::new(device, config)?;
        *lock = Some(Arc::new(Mutex::new(renderer)));

        crate::engine_info!("holoface::Engine", "Face renderer singleton created successfully");

        Ok(())
    }

    /// Get the face renderer singleton
    ///
    /// Provides global access to the face renderer after it has been created.
    ///
    /// # Returns
    ///
    /// A shared pointer to the FaceRenderer wrapped in a Mutex for
    /// thread-safe access
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The engine is not initialized
    /// - The face renderer has not been created
    ///
    /// # Example
    ///
    /// ```no_run
    /// use holoface_engine::holoface::Engine;
    /// use holoface_engine::holoface::face::Mood;
    ///
    /// let face = Engine::face()?;
    /// face.lock().unwrap().set_mood(Mood::Amused);
    /// # Ok::<(), holoface_engine::holoface::Error>(())
    /// ```
    pub fn face() -> Result<Arc<Mutex<FaceRenderer>>> {
        let state = ENGINE_STATE.get()
            .ok_or_else(|| Self::log_and_return_error(
                Error::InitializationFailed("Engine not initialized. Call Engine::initialize() first.".to_string())
            ))?;

        let lock = state.face.read()
            .map_err(|_| Self::log_and_return_error(
                Error::BackendError("Face lock poisoned".to_string())
            ))?;

        lock.clone()
            .ok_or_else(|| Self::log_and_return_error(
                Error::InitializationFailed("Face renderer not created. Call Engine::create_face() first.".to_string())
            ))
    }

    /// Render one frame of the face singleton into `out`
    ///
    /// Convenience wrapper over `Engine::face()` for hosts that only ever
    /// render. `out` must be exactly `width * height * 4` bytes; on success
    /// it holds the frame as tightly packed BGRA rows. Blocks until the
    /// read-back completes.
    ///
    /// # Errors
    ///
    /// Returns an error if the face renderer does not exist, the output
    /// buffer has the wrong size, or the backend fails.
    pub fn render_face(params: &FrameParams, out: &mut [u8]) -> Result<()> {
        let face = Self::face()?;

        let mut renderer = face.lock()
            .map_err(|_| Self::log_and_return_error(
                Error::BackendError("Face renderer lock poisoned".to_string())
            ))?;

        renderer.render(params, out)
    }

    /// Destroy the face renderer singleton
    ///
    /// Removes the face renderer singleton, allowing a new one to be created.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine is not initialized
    pub fn destroy_face() -> Result<()> {
        let state = ENGINE_STATE.get()
            .ok_or_else(|| Self::log_and_return_error(
                Error::InitializationFailed("Engine not initialized".to_string())
            ))?;

        let mut lock = state.face.write()
            .map_err(|_| Self::log_and_return_error(
                Error::BackendError("Face lock poisoned".to_string())
            ))?;

        *lock = None;

        crate::engine_info!("holoface::Engine", "Face renderer singleton destroyed");

        Ok(())
    }

    /// Reset all singletons for testing (only available in test builds)
    #[cfg(test)]
    pub fn reset_for_testing() {
        if let Some(state) = ENGINE_STATE.get() {
            if let Ok(mut face) = state.face.write() {
                *face = None;
            }
            if let Ok(mut device) = state.device.write() {
                *device = None;
            }
        }
    }

    // ===== LOGGING API =====

    /// Set a custom logger
    ///
    /// Replace the default logger with a custom implementation (file logger,
    /// network logger, etc.)
    ///
    /// # Arguments
    ///
    /// * `logger` - Any type implementing the Logger trait
    ///
    /// # Example
    ///
    /// ```no_run
    /// use holoface_engine::holoface::{Engine, log::{Logger, LogEntry}};
    ///
    /// struct FileLogger;
    /// impl Logger for FileLogger {
    ///     fn log(&self, entry: &LogEntry) {
    ///         // Write to file...
    ///     }
    /// }
    ///
    /// Engine::set_logger(FileLogger);
    /// ```
    pub fn set_logger<L: Logger + 'static>(logger: L) {
        let logger_lock = LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)));
        if let Ok(mut lock) = logger_lock.write() {
            *lock = Box::new(logger);
        }
    }

    /// Reset logger to default (DefaultLogger)
    pub fn reset_logger() {
        let logger_lock = LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)));
        if let Ok(mut lock) = logger_lock.write() {
            *lock = Box::new(DefaultLogger);
        }
    }

    /// Internal logging method (for simple logs without file:line)
    ///
    /// Used by macros like engine_info!, engine_warn!, etc.
    ///
    /// # Arguments
    ///
    /// * `severity` - Log severity level
    /// * `source` - Source module (e.g., "holoface::Engine")
    /// * `message` - Log message
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        let logger_lock = LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)));
        if let Ok(lock) = logger_lock.read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: None,
                line: None,
            });
        }
    }

    /// Internal logging method with file:line information (for ERROR logs)
    ///
    /// Used by engine_error! macro to include source location.
    ///
    /// # Arguments
    ///
    /// * `severity` - Log severity level (typically Error)
    /// * `source` - Source module (e.g., "holoface::Engine")
    /// * `message` - Log message
    /// * `file` - Source file path
    /// * `line` - Source line number
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        let logger_lock = LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)));
        if let Ok(lock) = logger_lock.read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: Some(file),
                line: Some(line),
            });
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
