//! Handler registry - Owns the ordered, active set of handlers
//!
//! Dispatch order is builtins in registration order followed by file-backed
//! handlers in sorted file-name order. The active set is only ever replaced
//! wholesale: readers take an `Arc` snapshot and never observe a partial
//! update, so a reload cannot race an in-flight dispatch.

use crate::application::errors::RegistryError;
use crate::handlers::handler::Handler;
use crate::handlers::loader::{HandlerLoader, HandlerSource, HandlerUnit};
use std::sync::{Arc, RwLock};

/// Registry for the active handler set
pub struct HandlerRegistry {
    loader: HandlerLoader,
    builtins: RwLock<Vec<Arc<HandlerUnit>>>,
    dynamic: RwLock<Vec<Arc<HandlerUnit>>>,
    active: RwLock<Arc<Vec<Arc<HandlerUnit>>>>,
}

impl HandlerRegistry {
    pub fn new(loader: HandlerLoader) -> Self {
        Self {
            loader,
            builtins: RwLock::new(Vec::new()),
            dynamic: RwLock::new(Vec::new()),
            active: RwLock::new(Arc::new(Vec::new())),
        }
    }

    /// Register a compiled-in handler
    ///
    /// Builtins keep their registration order and always dispatch before
    /// file-backed handlers.
    pub fn register(&self, handler: Arc<dyn Handler>) -> Result<(), RegistryError> {
        let name = handler.name().to_string();

        {
            let mut builtins = self
                .builtins
                .write()
                .map_err(|_| RegistryError::Internal("lock poisoned".to_string()))?;

            if builtins.iter().any(|u| u.name() == name) {
                return Err(RegistryError::Duplicate(name));
            }

            tracing::info!("Registered handler: {}", name);
            builtins.push(Arc::new(HandlerUnit::builtin(handler)));
        }

        self.rebuild()
    }

    /// Scan the handler directory and (re)load the file-backed handler set
    ///
    /// The previous dynamic set is replaced atomically; a file that fails to
    /// load is skipped, others still load. Returns the number of file-backed
    /// handlers now active.
    pub fn load(&self) -> Result<usize, RegistryError> {
        let units: Vec<Arc<HandlerUnit>> =
            self.loader.load_all()?.into_iter().map(Arc::new).collect();
        let count = units.len();

        {
            let mut dynamic = self
                .dynamic
                .write()
                .map_err(|_| RegistryError::Internal("lock poisoned".to_string()))?;
            *dynamic = units;
        }

        self.rebuild()?;
        Ok(count)
    }

    /// Check whether the handler directory has diverged from the loaded set
    ///
    /// Compares scanned candidate names against the identities of the active
    /// file-backed handlers; scan errors are logged and reported as "no".
    pub fn needs_reload(&self) -> bool {
        let candidates = match self.loader.scan() {
            Ok(paths) => paths,
            Err(e) => {
                tracing::warn!("Failed to check handler directory: {}", e);
                return false;
            }
        };

        let loaded: Vec<String> = self
            .snapshot()
            .iter()
            .filter_map(|u| match u.source() {
                HandlerSource::File(path) => Some(path.display().to_string()),
                HandlerSource::Builtin => None,
            })
            .collect();

        let scanned: Vec<String> = candidates.iter().map(|p| p.display().to_string()).collect();
        scanned != loaded
    }

    /// Take a snapshot of the active set for iteration
    pub fn snapshot(&self) -> Arc<Vec<Arc<HandlerUnit>>> {
        self.active
            .read()
            .map(|active| active.clone())
            .unwrap_or_default()
    }

    /// Names of the active handlers, in dispatch order
    pub fn names(&self) -> Vec<String> {
        self.snapshot()
            .iter()
            .map(|u| u.name().to_string())
            .collect()
    }

    /// Number of active handlers
    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn rebuild(&self) -> Result<(), RegistryError> {
        let builtins = self
            .builtins
            .read()
            .map_err(|_| RegistryError::Internal("lock poisoned".to_string()))?;
        let dynamic = self
            .dynamic
            .read()
            .map_err(|_| RegistryError::Internal("lock poisoned".to_string()))?;

        let merged: Vec<Arc<HandlerUnit>> =
            builtins.iter().chain(dynamic.iter()).cloned().collect();

        let mut active = self
            .active
            .write()
            .map_err(|_| RegistryError::Internal("lock poisoned".to_string()))?;
        *active = Arc::new(merged);
        Ok(())
    }
}
