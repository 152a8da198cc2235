/// Buffer - soft implementation of the engine Buffer trait

use std::any::Any;
use std::sync::{Arc, Mutex};
use holoface_engine::holoface::{
    Result,
    Error,
    render::Buffer as RendererBuffer,
};
use holoface_engine::{engine_error, engine_bail};

use crate::soft::AllocationRegistry;

/// CPU buffer implementation
pub struct Buffer {
    /// Buffer contents (behind a Mutex because updates come through &self)
    data: Mutex<Vec<u8>>,
    /// Buffer size
    size: u64,
    /// Allocation registry (shared with the device, for cleanup)
    registry: Arc<Mutex<AllocationRegistry>>,
    /// Registry id of this allocation
    allocation_id: u64,
}

impl Buffer {
    /// Create a new soft buffer
    pub(crate) fn new(
        size: u64,
        registry: Arc<Mutex<AllocationRegistry>>,
        allocation_id: u64,
    ) -> Self {
        Self {
            data: Mutex::new(vec![0u8; size as usize]),
            size,
            registry,
            allocation_id,
        }
    }

    /// Snapshot of the full buffer contents
    pub(crate) fn contents(&self) -> Result<Vec<u8>> {
        let data = self.data.lock().map_err(|_| {
            engine_error!("holoface::soft", "Buffer data lock poisoned");
            Error::BackendError("Buffer data lock poisoned".to_string())
        })?;
        Ok(data.clone())
    }
}

impl RendererBuffer for Buffer {
    fn update(&self, offset: u64, data: &[u8]) -> Result<()> {
        let end = offset as usize + data.len();
        if end > self.size as usize {
            engine_bail!("holoface::soft",
                "Buffer update out of range: offset {} + len {} > size {}",
                offset, data.len(), self.size);
        }

        let mut store = self.data.lock().map_err(|_| {
            engine_error!("holoface::soft", "Buffer data lock poisoned");
            Error::BackendError("Buffer data lock poisoned".to_string())
        })?;
        store[offset as usize..end].copy_from_slice(data);

        Ok(())
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Drop for Buffer {
    fn drop(&mut self) {
        // Don't panic if the lock fails - the contents drop either way
        if let Ok(mut registry) = self.registry.lock() {
            registry.free(self.allocation_id);
        }
    }
}
