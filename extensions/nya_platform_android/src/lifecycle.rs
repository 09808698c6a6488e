//! Activity lifecycle events as the runner sees them
//!
//! The runner reduces android-activity's `MainEvent`s to [`LifecycleEvent`]
//! and hands them to [`apply_lifecycle`], which calls the shim handlers in
//! the order the OS expects.

use nya_platform::{ActivityShim, Engine, SoftInputView, SurfaceHandle};

/// Lifecycle event the shim reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    Resume,
    Pause,
    Destroy,
    /// Window initialized; the handle is `None` if no native window came with it
    WindowCreated(Option<SurfaceHandle>),
    WindowResized(Option<SurfaceHandle>),
    WindowDestroyed,
    LowMemory,
}

/// Forward one lifecycle event; returns `false` once the activity is gone
pub fn apply_lifecycle<E: Engine, V: SoftInputView>(
    shim: &mut ActivityShim<E, V>,
    event: LifecycleEvent,
) -> bool {
    match event {
        LifecycleEvent::Resume => shim.on_resume(),
        LifecycleEvent::Pause => shim.on_pause(),
        LifecycleEvent::Destroy => {
            shim.on_destroy();
            return false;
        }
        LifecycleEvent::WindowCreated(surface) => {
            shim.on_surface_created();
            match surface {
                Some(handle) => shim.on_surface_changed(handle),
                None => tracing::warn!("Window initialized without a native window"),
            }
        }
        LifecycleEvent::WindowResized(surface) => {
            if let Some(handle) = surface {
                shim.on_surface_changed(handle);
            }
        }
        LifecycleEvent::WindowDestroyed => shim.on_surface_destroyed(),
        LifecycleEvent::LowMemory => tracing::warn!("Low memory warning"),
    }
    true
}
