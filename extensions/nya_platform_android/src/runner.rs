//! Native activity main loop
//!
//! Owns the [`ActivityShim`] and turns android-activity poll events into
//! shim callbacks, in the order the OS delivers them. The loop thread also
//! owns the view, so posted keyboard requests are drained here.

use android_activity::{AndroidApp, MainEvent, PollEvent};
use ndk::native_window::NativeWindow;

use nya_platform::{
    ActivityShim, CreateParams, Engine, KeyboardRequests, PlatformError, Result, ShimConfig,
    ShimHooks, SurfaceHandle,
};

use crate::assets::AssetReader;
use crate::bridge;
use crate::input::dispatch_input;
use crate::lifecycle::{apply_lifecycle, LifecycleEvent};
use crate::logging::init_logging;
use crate::view::ActivityView;

fn surface_handle(window: &NativeWindow) -> Option<SurfaceHandle> {
    SurfaceHandle::from_raw(window.ptr().as_ptr().cast())
}

/// Run the shim until the activity is destroyed
pub fn run<E: Engine + 'static>(app: AndroidApp, hooks: ShimHooks<E>) -> Result<()> {
    let assets = AssetReader::new(app.clone());
    let (config, config_error) = match assets.load_config() {
        Ok(config) => (config, None),
        Err(e) => (ShimConfig::default(), Some(e)),
    };

    // Initialize logging first
    init_logging(&config.logging);
    if let Some(e) = config_error {
        tracing::warn!("Ignoring bundled config: {}", e);
    }
    tracing::info!("nya shim starting");

    let waker = app.create_waker();
    let requests = KeyboardRequests::new().with_waker(move || waker.wake());
    bridge::register_keyboard_requests(requests.clone());

    let mut shim = ActivityShim::new(config, hooks).with_keyboard_requests(requests);

    let asset_source = assets
        .source()
        .ok_or_else(|| PlatformError::AssetLoad("No asset manager".to_string()))?;
    let files_dir = app
        .internal_data_path()
        .ok_or_else(|| PlatformError::InvalidPath("No internal data path".to_string()))?;
    let view = ActivityView::new(app.clone())?;

    let created = shim.on_create(CreateParams {
        asset_source,
        files_dir,
        view,
    });
    if let Err(e) = created {
        bridge::unregister_keyboard_requests();
        return Err(e);
    }

    // Held so the surface stays valid while the engine renders to it
    let mut native_window: Option<NativeWindow> = None;
    let mut running = true;

    tracing::info!("Entering Android event loop");

    while running {
        // Blocks until a lifecycle event, input or a keyboard post wakes us
        app.poll_events(None, |event| match event {
            PollEvent::Main(main_event) => {
                let lifecycle = match main_event {
                    MainEvent::Resume { .. } => Some(LifecycleEvent::Resume),
                    MainEvent::Pause => Some(LifecycleEvent::Pause),
                    MainEvent::Destroy => Some(LifecycleEvent::Destroy),
                    MainEvent::InitWindow { .. } => {
                        native_window = app.native_window();
                        Some(LifecycleEvent::WindowCreated(
                            native_window.as_ref().and_then(surface_handle),
                        ))
                    }
                    MainEvent::WindowResized { .. } => Some(LifecycleEvent::WindowResized(
                        native_window.as_ref().and_then(surface_handle),
                    )),
                    MainEvent::TerminateWindow { .. } => Some(LifecycleEvent::WindowDestroyed),
                    MainEvent::LowMemory => Some(LifecycleEvent::LowMemory),
                    _ => None,
                };

                if let Some(lifecycle) = lifecycle {
                    if !apply_lifecycle(&mut shim, lifecycle) {
                        running = false;
                    }
                    if lifecycle == LifecycleEvent::WindowDestroyed {
                        native_window = None;
                    }
                }
            }

            PollEvent::Wake => {
                tracing::trace!("Woken for keyboard request");
            }

            _ => {}
        });

        shim.drain_keyboard_requests();

        match app.input_events_iter() {
            Ok(mut input_iter) => while input_iter.next(|event| dispatch_input(&app, &mut shim, event)) {},
            Err(e) => {
                tracing::warn!("Failed to get input events iterator: {:?}", e);
            }
        }
    }

    bridge::unregister_keyboard_requests();
    tracing::info!("nya shim exiting");
    Ok(())
}
