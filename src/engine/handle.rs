use std::{
    path::Path,
    sync::{Arc, RwLock},
};

use crate::{engine::Engine, error::Result};

/// Shared, swappable reference to the serving engine.
///
/// Readers clone the current `Arc` and keep using it for the whole query, so a
/// swap never disturbs queries in flight. A replacement is always built fully
/// before it is swapped in.
#[derive(Debug)]
pub struct EngineHandle {
    current: RwLock<Arc<Engine>>,
}

impl EngineHandle {
    pub fn new(engine: Engine) -> Self {
        Self {
            current: RwLock::new(Arc::new(engine)),
        }
    }

    /// The engine serving queries right now
    pub fn current(&self) -> Arc<Engine> {
        let guard = self.current.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(&guard)
    }

    /// Swap in a new engine, returning the previous one
    pub fn replace(&self, engine: Engine) -> Arc<Engine> {
        let next = Arc::new(engine);
        let mut guard = self.current.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        std::mem::replace(&mut *guard, next)
    }

    /// Rebuild from a CSV file with the current configuration.
    /// On failure the current engine keeps serving.
    pub fn reload_from_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let config = self.current().config().clone();
        match Engine::from_path(path, config) {
            Ok(engine) => {
                self.replace(engine);
                tracing::info!("engine reloaded");
                Ok(())
            }
            Err(e) => {
                tracing::warn!("engine reload failed, keeping current engine: {}", e);
                Err(e)
            }
        }
    }
}

impl From<Engine> for EngineHandle {
    fn from(engine: Engine) -> Self {
        Self::new(engine)
    }
}
