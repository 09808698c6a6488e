//! Activity lifecycle forwarding
//!
//! [`ActivityShim`] is the context object behind every platform callback.
//! The runner owns it and calls one handler per OS event, always from its
//! event thread; each handler forwards synchronously to the engine.

use std::path::PathBuf;
use std::sync::OnceLock;

use crate::config::ShimConfig;
use crate::engine::{AssetSource, Engine, SurfaceHandle};
use crate::error::{PlatformError, Result};
use crate::input::{self, KeyBatch, KeyEvent, MotionEvent};
use crate::keyboard::{
    apply_keyboard_request, EditorInfo, KeyboardRequest, KeyboardRequests, KeyboardState,
    SoftInputView,
};

/// Loads the engine on first create
pub type LoadEngineHook<E> = Box<dyn FnMut(&ShimConfig) -> Result<E>>;

/// Starts the engine once it is loaded and configured
pub type SpawnMainHook<E> = Box<dyn FnMut(&E)>;

/// Customization points for application startup
pub struct ShimHooks<E> {
    pub load_engine: LoadEngineHook<E>,
    pub spawn_main: SpawnMainHook<E>,
}

impl<E: Engine + 'static> ShimHooks<E> {
    /// Hooks with the default spawn, calling [`Engine::spawn_main`]
    pub fn new(load_engine: impl FnMut(&ShimConfig) -> Result<E> + 'static) -> Self {
        Self {
            load_engine: Box::new(load_engine),
            spawn_main: Box::new(|engine: &E| engine.spawn_main()),
        }
    }

    /// Replace the spawn step, e.g. to start the engine on a custom thread
    pub fn with_spawn_main(mut self, spawn_main: impl FnMut(&E) + 'static) -> Self {
        self.spawn_main = Box::new(spawn_main);
        self
    }
}

/// Load hook that keeps the engine for the rest of the process
///
/// An activity can be destroyed and re-created within one process, and each
/// `android_main` builds a fresh [`ActivityShim`]. The engine lives in
/// `cell` instead of the shim, so `load` runs at most once per process and
/// later shims borrow the same engine.
pub fn load_once<E>(
    cell: &'static OnceLock<E>,
    mut load: impl FnMut(&ShimConfig) -> Result<E> + 'static,
) -> impl FnMut(&ShimConfig) -> Result<&'static E> + 'static
where
    E: Engine + Send + Sync + 'static,
{
    move |config: &ShimConfig| {
        if let Some(engine) = cell.get() {
            tracing::debug!("Engine already loaded in this process");
            return Ok(engine);
        }
        let engine = load(config)?;
        Ok(cell.get_or_init(|| engine))
    }
}

/// What the platform hands over when the activity is created
pub struct CreateParams<V> {
    pub asset_source: AssetSource,
    /// App-private files directory
    pub files_dir: PathBuf,
    pub view: V,
}

/// Platform callback context
pub struct ActivityShim<E, V> {
    config: ShimConfig,
    hooks: ShimHooks<E>,
    /// Loaded on first create, kept across activity re-creation
    engine: Option<E>,
    view: Option<V>,
    keyboard: KeyboardState,
    requests: KeyboardRequests,
}

impl<E: Engine, V: SoftInputView> ActivityShim<E, V> {
    pub fn new(config: ShimConfig, hooks: ShimHooks<E>) -> Self {
        let keyboard = KeyboardState::new(config.keyboard.ime_action);
        Self {
            config,
            hooks,
            engine: None,
            view: None,
            keyboard,
            requests: KeyboardRequests::new(),
        }
    }

    /// Use `requests` as the pending keyboard slot, e.g. one with a waker
    pub fn with_keyboard_requests(mut self, requests: KeyboardRequests) -> Self {
        self.requests = requests;
        self
    }

    pub fn config(&self) -> &ShimConfig {
        &self.config
    }

    pub fn engine(&self) -> Option<&E> {
        self.engine.as_ref()
    }

    pub fn view(&self) -> Option<&V> {
        self.view.as_ref()
    }

    pub fn keyboard_state(&self) -> &KeyboardState {
        &self.keyboard
    }

    pub fn is_keyboard_visible(&self) -> bool {
        self.keyboard.visible
    }

    /// Handle for posting keyboard requests from other threads
    pub fn keyboard_requests(&self) -> KeyboardRequests {
        self.requests.clone()
    }

    fn engine_or_warn(&self, callback: &str) -> Option<&E> {
        if self.engine.is_none() {
            tracing::warn!("{} before engine was loaded, dropped", callback);
        }
        self.engine.as_ref()
    }

    /// Activity created
    ///
    /// Loads the engine the first time only, then hands it the asset source
    /// and user storage path, attaches the view and spawns the engine's main.
    pub fn on_create(&mut self, params: CreateParams<V>) -> Result<()> {
        let CreateParams {
            asset_source,
            files_dir,
            view,
        } = params;

        let user_path = files_dir
            .to_str()
            .map(|dir| format!("{}/", dir.trim_end_matches('/')))
            .ok_or_else(|| {
                PlatformError::InvalidPath(format!(
                    "Files dir is not UTF-8: {}",
                    files_dir.display()
                ))
            })?;

        if self.engine.is_none() {
            tracing::info!("Loading engine library {}", self.config.library.file_name());
            let engine = (self.hooks.load_engine)(&self.config)?;
            self.engine = Some(engine);
        }

        let Some(engine) = self.engine.as_ref() else {
            return Err(PlatformError::Other("Engine missing after load".to_string()));
        };

        engine.set_asset_source(asset_source);
        engine.set_user_path(&user_path);
        self.view = Some(view);

        tracing::info!("Activity created, user path {}", user_path);
        (self.hooks.spawn_main)(engine);
        Ok(())
    }

    pub fn on_resume(&mut self) {
        tracing::info!("Activity resumed");
        if let Some(engine) = self.engine_or_warn("resume") {
            engine.resume();
        }
    }

    /// Activity paused; a visible keyboard is hidden before the engine hears
    /// about the pause
    pub fn on_pause(&mut self) {
        tracing::info!("Activity paused");
        if self.keyboard.visible {
            self.apply_keyboard(KeyboardRequest::Hide);
        }
        if let Some(engine) = self.engine_or_warn("pause") {
            engine.pause();
        }
    }

    /// Activity destroyed; the view is released, the engine stays loaded
    pub fn on_destroy(&mut self) {
        tracing::info!("Activity destroyed");
        if let Some(engine) = self.engine_or_warn("destroy") {
            engine.exit();
        }
        self.view = None;
    }

    pub fn on_surface_created(&mut self) {
        tracing::debug!("Surface created");
    }

    /// Surface size or format changed
    pub fn on_surface_changed(&mut self, surface: SurfaceHandle) {
        tracing::debug!("Surface changed: {:?}", surface);
        if let Some(engine) = self.engine_or_warn("surface change") {
            engine.set_surface(Some(surface));
        }
    }

    pub fn on_surface_destroyed(&mut self) {
        tracing::debug!("Surface destroyed");
        if let Some(engine) = self.engine_or_warn("surface destroy") {
            engine.set_surface(None);
        }
    }

    /// Touch input; always consumed
    pub fn on_touch(&mut self, event: &MotionEvent) -> bool {
        match self.engine_or_warn("touch") {
            Some(engine) => input::forward_motion(engine, event),
            None => true,
        }
    }

    pub fn on_key_down(&mut self, event: &KeyEvent) -> bool {
        self.engine_or_warn("key down")
            .is_some_and(|engine| input::forward_key_down(engine, event))
    }

    pub fn on_key_up(&mut self, event: &KeyEvent) -> bool {
        self.engine_or_warn("key up")
            .is_some_and(|engine| input::forward_key_up(engine, event))
    }

    /// Multi-character input; `false` lets the platform handle it
    pub fn on_key_multiple(&mut self, batch: &KeyBatch) -> bool {
        self.engine_or_warn("key batch")
            .is_some_and(|engine| input::forward_key_batch(engine, batch))
    }

    /// Descriptor for the IME; there is no text-editing connection behind it
    pub fn on_create_input_connection(&self) -> EditorInfo {
        self.keyboard.editor_info()
    }

    /// Apply a keyboard mode code right away; call only on the event thread
    pub fn set_virtual_keyboard(&mut self, code: u32) {
        self.apply_keyboard(KeyboardRequest::from_code(code));
    }

    /// Apply the pending posted keyboard request, if any
    ///
    /// Returns `true` when a request was applied.
    pub fn drain_keyboard_requests(&mut self) -> bool {
        match self.requests.take() {
            Some(request) => {
                self.apply_keyboard(request);
                true
            }
            None => false,
        }
    }

    fn apply_keyboard(&mut self, request: KeyboardRequest) {
        match self.view.as_mut() {
            Some(view) => apply_keyboard_request(&mut self.keyboard, view, request),
            None => tracing::warn!("Keyboard request {:?} without a view, dropped", request),
        }
    }
}
