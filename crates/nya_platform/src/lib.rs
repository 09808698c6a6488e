//! nya Platform Shim
//!
//! Forwards Android activity callbacks to an external native engine.
//!
//! The engine owns everything real: rendering, application logic, asset
//! access. This crate only translates platform events into engine calls and
//! drives the soft keyboard on the engine's behalf:
//!
//! - **Lifecycle** ([`ActivityShim`]): create/resume/pause/destroy and surface
//!   changes, forwarded synchronously in OS order
//! - **Input** ([`input`]): touch, key and multi-character IME input
//! - **Keyboard** ([`keyboard`]): mode codes to Android input types, applied
//!   on the event thread through a single-slot request queue
//!
//! Platform backends (see `nya_platform_android`) implement [`Engine`] for
//! the real native library and [`SoftInputView`] for the real view.
//!
//! # Example
//!
//! ```ignore
//! let hooks = ShimHooks::new(|config| NativeEngine::load(&config.library));
//! let mut shim = ActivityShim::new(ShimConfig::default(), hooks);
//! shim.on_create(CreateParams { asset_source, files_dir, view })?;
//! shim.on_resume();
//! ```

pub mod activity;
pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod keyboard;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use activity::{load_once, ActivityShim, CreateParams, ShimHooks};
pub use config::ShimConfig;
pub use engine::{AssetSource, Engine, SurfaceHandle};
pub use error::{PlatformError, Result};
pub use input::{KeyBatch, KeyEvent, MotionAction, MotionEvent, TouchPointer, KEYCODE_UNKNOWN};
pub use keyboard::{
    EditorInfo, ImeAction, InputType, KeyboardMode, KeyboardRequest, KeyboardRequests,
    KeyboardState, SoftInputView,
};
