//! nya Android Platform
//!
//! Native activity runner, engine binding and soft keyboard bridge.
//!
//! The engine library is opened at runtime ([`NativeEngine`]) and driven by
//! [`ActivityShim`](nya_platform::ActivityShim) from the `android_main`
//! thread. The engine asks for keyboard changes through the C ABI in
//! [`bridge`].
//!
//! # Usage
//!
//! With the `entry` feature this crate exports `android_main` and loads the
//! engine named in `assets/nya_shim.toml` (default `libnya_native.so`). To
//! customize startup, export your own entry point instead:
//!
//! ```ignore
//! static ENGINE: OnceLock<NativeEngine> = OnceLock::new();
//!
//! #[no_mangle]
//! fn android_main(app: android_activity::AndroidApp) {
//!     let hooks = ShimHooks::new(load_once(&ENGINE, |config| NativeEngine::load(&config.library)))
//!         .with_spawn_main(|engine| engine.spawn_main());
//!     nya_platform_android::run(app, hooks).unwrap();
//! }
//! ```
//!
//! `android_main` runs again each time the activity is re-created; keep the
//! engine in a process-wide cell so its library is never closed and reopened.

pub mod bridge;
pub mod engine;
pub mod logging;

#[cfg(target_os = "android")]
pub mod assets;
pub mod input;
pub mod lifecycle;
#[cfg(target_os = "android")]
pub mod runner;
pub mod view;

pub use engine::NativeEngine;
pub use logging::init_logging;

#[cfg(target_os = "android")]
pub use runner::run;

/// Default entry point: load the configured engine library and run
#[cfg(all(target_os = "android", feature = "entry"))]
#[no_mangle]
fn android_main(app: android_activity::AndroidApp) {
    use std::sync::OnceLock;

    use nya_platform::{load_once, ShimConfig, ShimHooks};

    static ENGINE: OnceLock<NativeEngine> = OnceLock::new();

    let hooks = ShimHooks::new(load_once(&ENGINE, |config: &ShimConfig| {
        NativeEngine::load(&config.library)
    }));
    if let Err(e) = run(app, hooks) {
        tracing::error!("nya shim failed: {}", e);
    }
}
