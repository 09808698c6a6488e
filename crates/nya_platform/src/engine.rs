//! Native engine boundary
//!
//! The engine owns rendering, application logic and asset access. The shim
//! only ever talks to it through [`Engine`], one method per native entry
//! point. Handles passed across are opaque: the shim stores and forwards
//! them but never dereferences them.

use std::ffi::c_void;
use std::ptr::NonNull;

/// Opaque rendering surface handle (an `ANativeWindow*` on Android)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SurfaceHandle(NonNull<c_void>);

impl SurfaceHandle {
    /// Wrap a raw surface pointer, returning `None` for null
    pub fn from_raw(ptr: *mut c_void) -> Option<Self> {
        NonNull::new(ptr).map(Self)
    }

    /// Raw pointer to hand to the engine
    pub fn as_ptr(&self) -> *mut c_void {
        self.0.as_ptr()
    }
}

/// Opaque asset access handle (an `AAssetManager*` on Android)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AssetSource(NonNull<c_void>);

impl AssetSource {
    /// Wrap a raw asset manager pointer, returning `None` for null
    pub fn from_raw(ptr: *mut c_void) -> Option<Self> {
        NonNull::new(ptr).map(Self)
    }

    /// Raw pointer to hand to the engine
    pub fn as_ptr(&self) -> *mut c_void {
        self.0.as_ptr()
    }
}

/// Entry points exposed by the native engine
///
/// Every method is a notification with no acknowledgment except [`Engine::key`],
/// which reports whether the engine consumed the key.
pub trait Engine {
    /// Start the engine's main routine
    fn spawn_main(&self);

    /// Activity resumed
    fn resume(&self);

    /// Activity paused
    fn pause(&self);

    /// Activity destroyed
    fn exit(&self);

    /// Touch contact update in surface pixels
    fn touch(&self, x: i32, y: i32, pointer_id: i32, pressed: bool, is_primary: bool);

    /// Key transition; returns `true` when the engine consumed it
    fn key(&self, code: i32, pressed: bool, unicode_char: u32, autorepeat: bool) -> bool;

    /// New rendering surface, or `None` when the surface went away
    fn set_surface(&self, surface: Option<SurfaceHandle>);

    /// Asset access handle for the engine's resource loading
    fn set_asset_source(&self, source: AssetSource);

    /// Writable per-user storage directory, with a trailing separator
    fn set_user_path(&self, path: &str);
}

impl<E: Engine + ?Sized> Engine for &E {
    fn spawn_main(&self) {
        (**self).spawn_main()
    }

    fn resume(&self) {
        (**self).resume()
    }

    fn pause(&self) {
        (**self).pause()
    }

    fn exit(&self) {
        (**self).exit()
    }

    fn touch(&self, x: i32, y: i32, pointer_id: i32, pressed: bool, is_primary: bool) {
        (**self).touch(x, y, pointer_id, pressed, is_primary)
    }

    fn key(&self, code: i32, pressed: bool, unicode_char: u32, autorepeat: bool) -> bool {
        (**self).key(code, pressed, unicode_char, autorepeat)
    }

    fn set_surface(&self, surface: Option<SurfaceHandle>) {
        (**self).set_surface(surface)
    }

    fn set_asset_source(&self, source: AssetSource) {
        (**self).set_asset_source(source)
    }

    fn set_user_path(&self, path: &str) {
        (**self).set_user_path(path)
    }
}
