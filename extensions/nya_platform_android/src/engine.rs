//! Dynamic binding to the native engine library
//!
//! The engine ships as its own shared library (`libnya_native.so` by
//! default). It is opened at runtime and its C entry points are resolved
//! once; a missing library or entry point fails the load instead of the
//! first call.

use std::ffi::{c_char, c_int, c_void, CString, OsStr};

use libloading::Library;

use nya_platform::config::LibraryConfig;
use nya_platform::{AssetSource, Engine, PlatformError, Result, SurfaceHandle};

type VoidFn = unsafe extern "C" fn();
type TouchFn = unsafe extern "C" fn(x: c_int, y: c_int, id: c_int, pressed: bool, btn: bool);
type KeyFn = unsafe extern "C" fn(code: c_int, pressed: bool, unicode: c_int, repeat: bool) -> bool;
type PointerFn = unsafe extern "C" fn(ptr: *mut c_void);
type PathFn = unsafe extern "C" fn(path: *const c_char);

/// Resolved entry points; only valid while the owning [`Library`] is loaded
#[derive(Clone, Copy)]
struct EntryPoints {
    spawn_main: VoidFn,
    resume: VoidFn,
    pause: VoidFn,
    exit: VoidFn,
    touch: TouchFn,
    key: KeyFn,
    set_surface: PointerFn,
    set_asset_mgr: PointerFn,
    set_user_path: PathFn,
}

unsafe fn symbol<T: Copy>(library: &Library, name: &'static str) -> Result<T> {
    library
        .get::<T>(name.as_bytes())
        .map(|sym| *sym)
        .map_err(|e| PlatformError::SymbolMissing(format!("{}: {}", name, e)))
}

impl EntryPoints {
    unsafe fn resolve(library: &Library) -> Result<Self> {
        Ok(Self {
            spawn_main: symbol(library, "native_spawn_main")?,
            resume: symbol(library, "native_resume")?,
            pause: symbol(library, "native_pause")?,
            exit: symbol(library, "native_exit")?,
            touch: symbol(library, "native_touch")?,
            key: symbol(library, "native_key")?,
            set_surface: symbol(library, "native_set_surface")?,
            set_asset_mgr: symbol(library, "native_set_asset_mgr")?,
            set_user_path: symbol(library, "native_set_user_path")?,
        })
    }
}

/// Engine backed by a dynamically loaded native library
///
/// Dropping it closes the library. The runner keeps it in a process-wide
/// cell (see [`nya_platform::load_once`]) since engine threads outlive any
/// single activity.
pub struct NativeEngine {
    entry_points: EntryPoints,
    // Must outlive every call through `entry_points`
    _library: Library,
}

impl NativeEngine {
    /// Load the library named by the shim configuration
    pub fn load(config: &LibraryConfig) -> Result<Self> {
        Self::load_from(config.file_name())
    }

    /// Load a library by file name or path
    pub fn load_from(path: impl AsRef<OsStr>) -> Result<Self> {
        let path = path.as_ref();

        // SAFETY: loading runs the library's initializers; the engine library
        // is trusted code shipped with the application.
        let library = unsafe { Library::new(path) }.map_err(|e| {
            PlatformError::LibraryLoad(format!("{}: {}", path.to_string_lossy(), e))
        })?;

        // SAFETY: the function types match the engine's exported C ABI.
        let entry_points = unsafe { EntryPoints::resolve(&library)? };

        tracing::info!("Engine library loaded: {}", path.to_string_lossy());
        Ok(Self {
            entry_points,
            _library: library,
        })
    }
}

// SAFETY (all calls below): entry points were resolved from `_library`,
// which lives as long as `self`.
impl Engine for NativeEngine {
    fn spawn_main(&self) {
        unsafe { (self.entry_points.spawn_main)() }
    }

    fn resume(&self) {
        unsafe { (self.entry_points.resume)() }
    }

    fn pause(&self) {
        unsafe { (self.entry_points.pause)() }
    }

    fn exit(&self) {
        unsafe { (self.entry_points.exit)() }
    }

    fn touch(&self, x: i32, y: i32, pointer_id: i32, pressed: bool, is_primary: bool) {
        unsafe { (self.entry_points.touch)(x, y, pointer_id, pressed, is_primary) }
    }

    fn key(&self, code: i32, pressed: bool, unicode_char: u32, autorepeat: bool) -> bool {
        unsafe { (self.entry_points.key)(code, pressed, unicode_char as c_int, autorepeat) }
    }

    fn set_surface(&self, surface: Option<SurfaceHandle>) {
        let ptr = surface.map_or(std::ptr::null_mut(), |s| s.as_ptr());
        unsafe { (self.entry_points.set_surface)(ptr) }
    }

    fn set_asset_source(&self, source: AssetSource) {
        unsafe { (self.entry_points.set_asset_mgr)(source.as_ptr()) }
    }

    fn set_user_path(&self, path: &str) {
        match CString::new(path) {
            Ok(c_path) => unsafe { (self.entry_points.set_user_path)(c_path.as_ptr()) },
            Err(e) => tracing::warn!("User path not forwarded: {}", e),
        }
    }
}

impl std::fmt::Debug for NativeEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeEngine").finish_non_exhaustive()
    }
}
