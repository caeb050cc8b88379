//! Dynamic renderer backend loading and hot-swap
//!
//! Exactly one backend is active at a time. A loaded backend pairs the
//! opaque renderer handle with the destructor resolved from the same module,
//! and the module handle itself; teardown destroys the renderer first and
//! releases the module after, since the destructor's code lives inside it.

use std::ffi::c_void;
use std::path::{Path, PathBuf};

use libloading::Library;
use thiserror::Error;
use tracing::info;

use crate::render::plugin::{handle_as_renderer, CreateFn, DestroyFn, CREATE_SYMBOL, DESTROY_SYMBOL};
use crate::render::Renderer;

/// Failure to load a backend module. Fatal for the initial backend,
/// recoverable during a runtime hot-swap.
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("failed to open backend module {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },
    #[error("backend module {path} is missing symbol {symbol}: {source}")]
    MissingSymbol {
        path: PathBuf,
        symbol: &'static str,
        #[source]
        source: libloading::Error,
    },
    #[error("backend module {path} factory returned a null renderer")]
    NullRenderer { path: PathBuf },
}

struct ActiveBackend {
    path: PathBuf,
    handle: *mut c_void,
    destroy: DestroyFn,
    // Declared after `handle`/`destroy` so the module outlives the
    // destructor call made in Drop
    _lib: Library,
}

impl Drop for ActiveBackend {
    fn drop(&mut self) {
        // Destroy the renderer through its own module, then let the
        // Library field release the module itself
        unsafe { (self.destroy)(self.handle) };
    }
}

/// Owner of the single active renderer backend
#[derive(Default)]
pub struct BackendLoader {
    active: Option<ActiveBackend>,
}

impl BackendLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the backend module at `path`, replacing any active one.
    ///
    /// Both required symbols are resolved before anything is constructed; on
    /// any failure the module is closed again and no renderer instance
    /// exists. A failure therefore leaves the loader empty but otherwise
    /// side-effect free.
    pub fn load(&mut self, path: &Path) -> Result<(), LoaderError> {
        self.unload();

        let lib = unsafe { Library::new(path) }.map_err(|source| LoaderError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let create: CreateFn = unsafe {
            *lib.get::<CreateFn>(CREATE_SYMBOL)
                .map_err(|source| LoaderError::MissingSymbol {
                    path: path.to_path_buf(),
                    symbol: "renderer_create",
                    source,
                })?
        };
        let destroy: DestroyFn = unsafe {
            *lib.get::<DestroyFn>(DESTROY_SYMBOL)
                .map_err(|source| LoaderError::MissingSymbol {
                    path: path.to_path_buf(),
                    symbol: "renderer_destroy",
                    source,
                })?
        };

        let handle = unsafe { create() };
        if handle.is_null() {
            return Err(LoaderError::NullRenderer {
                path: path.to_path_buf(),
            });
        }

        info!(path = %path.display(), "loaded renderer backend");
        self.active = Some(ActiveBackend {
            path: path.to_path_buf(),
            handle,
            destroy,
            _lib: lib,
        });
        Ok(())
    }

    /// Destroy the active renderer and release its module, if any
    pub fn unload(&mut self) {
        if let Some(backend) = self.active.take() {
            info!(path = %backend.path.display(), "unloading renderer backend");
            drop(backend);
        }
    }

    /// The active renderer, if a backend is loaded
    pub fn renderer(&mut self) -> Option<&mut dyn Renderer> {
        self.active
            .as_mut()
            // Unique access to the handle follows from &mut self
            .map(|backend| unsafe { handle_as_renderer(backend.handle) })
    }

    /// Path the active backend was loaded from
    pub fn path(&self) -> Option<&Path> {
        self.active.as_ref().map(|backend| backend.path.as_path())
    }

    pub fn is_loaded(&self) -> bool {
        self.active.is_some()
    }
}
