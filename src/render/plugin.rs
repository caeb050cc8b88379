//! C-linkage plugin surface shared by the loader and every backend
//!
//! A backend exports exactly two symbols: a zero-argument factory returning
//! an opaque renderer handle and a destructor taking that handle back. The
//! handle is a leaked `Box<Box<dyn Renderer>>` so it stays a thin pointer
//! across the C ABI; only the module that created a handle may destroy it.

use std::ffi::c_void;

use super::Renderer;

/// Name of the exported factory symbol
pub const CREATE_SYMBOL: &[u8] = b"renderer_create";
/// Name of the exported destructor symbol
pub const DESTROY_SYMBOL: &[u8] = b"renderer_destroy";

/// Factory: returns an opaque handle, or null on construction failure
pub type CreateFn = unsafe extern "C" fn() -> *mut c_void;
/// Destructor for a handle produced by the same module's factory
pub type DestroyFn = unsafe extern "C" fn(*mut c_void);

/// Box a renderer into an opaque handle for the C ABI
pub fn into_handle(renderer: Box<dyn Renderer>) -> *mut c_void {
    Box::into_raw(Box::new(renderer)) as *mut c_void
}

/// Borrow the renderer behind a handle.
///
/// # Safety
/// `handle` must have come from [`into_handle`] in this process and must not
/// have been passed to [`destroy_handle`] yet. No other borrow of the same
/// handle may be live.
pub unsafe fn handle_as_renderer<'a>(handle: *mut c_void) -> &'a mut dyn Renderer {
    &mut **(handle as *mut Box<dyn Renderer>)
}

/// Drop the renderer behind a handle.
///
/// # Safety
/// Same provenance requirements as [`handle_as_renderer`]; the handle is
/// dead afterwards.
pub unsafe fn destroy_handle(handle: *mut c_void) {
    drop(Box::from_raw(handle as *mut Box<dyn Renderer>));
}

/// Generate the two C-linkage exports for a backend crate.
///
/// The expression must evaluate to a type implementing
/// [`Renderer`](crate::render::Renderer). A panicking constructor surfaces as
/// a null handle instead of unwinding across the boundary.
#[macro_export]
macro_rules! export_renderer {
    ($ctor:expr) => {
        #[no_mangle]
        pub extern "C" fn renderer_create() -> *mut ::std::ffi::c_void {
            match ::std::panic::catch_unwind(|| {
                let renderer: ::std::boxed::Box<dyn $crate::render::Renderer> =
                    ::std::boxed::Box::new($ctor);
                $crate::render::plugin::into_handle(renderer)
            }) {
                Ok(handle) => handle,
                Err(_) => ::std::ptr::null_mut(),
            }
        }

        /// # Safety
        /// `handle` must be a live handle returned by this module's
        /// `renderer_create`.
        #[no_mangle]
        pub unsafe extern "C" fn renderer_destroy(handle: *mut ::std::ffi::c_void) {
            if !handle.is_null() {
                $crate::render::plugin::destroy_handle(handle);
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameState;
    use crate::render::Input;

    struct CountingRenderer {
        inits: u32,
    }

    impl Renderer for CountingRenderer {
        fn init(&mut self, _width: usize, _height: usize) {
            self.inits += 1;
        }
        fn render(&mut self, _state: &GameState, _delta: f32) {}
        fn render_menu(&mut self, _state: &GameState, _delta: f32) {}
        fn render_game_over(&mut self, _state: &GameState, _delta: f32) {}
        fn poll_input(&mut self) -> Input {
            Input::None
        }
    }

    #[test]
    fn test_handle_round_trip() {
        let handle = into_handle(Box::new(CountingRenderer { inits: 0 }));
        assert!(!handle.is_null());

        unsafe {
            let renderer = handle_as_renderer(handle);
            renderer.init(20, 20);
            assert_eq!(renderer.poll_input(), Input::None);
            destroy_handle(handle);
        }
    }
}
