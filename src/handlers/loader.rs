//! Handler loader - Discovers and dynamically loads handler files
//!
//! A loadable handler is a shared library in the handler directory whose file
//! name ends in `.so`. Renaming a file off that extension (e.g. appending
//! `.disabled`) removes it from the active set on the next reload without
//! being treated as an error. The reserved `init.so` name is never loaded.
//!
//! Each library must export:
//!
//! ```ignore
//! #[no_mangle]
//! pub extern "C" fn reflex_handler_init() -> *mut dyn Handler {
//!     Box::into_raw(Box::new(MyHandler))
//! }
//! ```

use crate::application::errors::RegistryError;
use crate::handlers::handler::Handler;
use chrono::{DateTime, Utc};
use libloading::{Library, Symbol};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Recognized extension for loadable handler files
pub const HANDLER_EXTENSION: &str = ".so";

/// Reserved bootstrap file name, never loaded as a handler
pub const RESERVED_INIT: &str = "init.so";

/// Exported entry-point symbol every handler library must provide
pub const ENTRY_SYMBOL: &[u8] = b"reflex_handler_init";

/// Function signature of the entry-point symbol
pub type HandlerInitFn = unsafe extern "C" fn() -> *mut dyn Handler;

/// Where a handler unit came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerSource {
    /// Registered in code at startup
    Builtin,
    /// Dynamically loaded from a file in the handler directory
    File(PathBuf),
}

/// One loaded handler together with its identity and load metadata
pub struct HandlerUnit {
    name: String,
    source: HandlerSource,
    loaded_at: DateTime<Utc>,
    handler: Arc<dyn Handler>,
    // Must outlive `handler` for file-backed units; declared last so the
    // trait object drops before the library is unmapped.
    _library: Option<Library>,
}

impl HandlerUnit {
    pub fn builtin(handler: Arc<dyn Handler>) -> Self {
        Self {
            name: handler.name().to_string(),
            source: HandlerSource::Builtin,
            loaded_at: Utc::now(),
            handler,
            _library: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &HandlerSource {
        &self.source
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn handler(&self) -> &dyn Handler {
        self.handler.as_ref()
    }
}

/// Discovers handler files and loads them as libraries
pub struct HandlerLoader {
    directory: PathBuf,
}

impl HandlerLoader {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Enumerate loadable candidates in the handler directory, sorted by
    /// file name so load order is deterministic.
    ///
    /// A missing directory yields an empty set (the drop-in convention makes
    /// that normal); an unreadable one is an error.
    pub fn scan(&self) -> Result<Vec<PathBuf>, RegistryError> {
        if !self.directory.exists() {
            tracing::warn!(
                "Handler directory does not exist: {}",
                self.directory.display()
            );
            return Ok(Vec::new());
        }

        let entries = std::fs::read_dir(&self.directory).map_err(|e| RegistryError::Scan {
            path: self.directory.clone(),
            source: e,
        })?;

        let mut candidates = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::warn!("Failed to read directory entry: {}", e);
                    continue;
                }
            };

            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if file_name == RESERVED_INIT || !file_name.ends_with(HANDLER_EXTENSION) {
                continue;
            }

            candidates.push(path);
        }

        candidates.sort();
        Ok(candidates)
    }

    /// Load a single handler library and extract its entry point
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<HandlerUnit, RegistryError> {
        let path = path.as_ref();

        let library = unsafe {
            Library::new(path).map_err(|e| RegistryError::Load {
                path: path.to_path_buf(),
                reason: format!("failed to open library: {}", e),
            })?
        };

        let raw = unsafe {
            let init: Symbol<HandlerInitFn> =
                library.get(ENTRY_SYMBOL).map_err(|e| RegistryError::Load {
                    path: path.to_path_buf(),
                    reason: format!("missing entry point: {}", e),
                })?;
            init()
        };

        if raw.is_null() {
            return Err(RegistryError::Load {
                path: path.to_path_buf(),
                reason: "entry point returned null".to_string(),
            });
        }

        let handler: Arc<dyn Handler> = unsafe { Arc::from(Box::from_raw(raw)) };

        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unnamed")
            .to_string();

        tracing::info!("Loaded handler '{}' from {}", name, path.display());

        Ok(HandlerUnit {
            name,
            source: HandlerSource::File(path.to_path_buf()),
            loaded_at: Utc::now(),
            handler,
            _library: Some(library),
        })
    }

    /// Scan the directory and load every candidate, skipping files that fail
    ///
    /// A file whose load fails (unreadable, not a library, entry point
    /// missing) is logged and excluded; the rest of the set still loads.
    pub fn load_all(&self) -> Result<Vec<HandlerUnit>, RegistryError> {
        let mut units = Vec::new();

        for path in self.scan()? {
            match self.load_file(&path) {
                Ok(unit) => units.push(unit),
                Err(e) => {
                    tracing::warn!("Skipping handler {}: {}", path.display(), e);
                }
            }
        }

        Ok(units)
    }
}
