//! Recording doubles for the engine and the view
//!
//! Both record every call in order so tests can assert on exactly what
//! crossed the boundary. Clones share the same log.

use std::sync::{Arc, Mutex, PoisonError};

use crate::engine::{AssetSource, Engine, SurfaceHandle};
use crate::keyboard::SoftInputView;

/// One call made into the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    SpawnMain,
    Resume,
    Pause,
    Exit,
    Touch {
        x: i32,
        y: i32,
        pointer_id: i32,
        pressed: bool,
        is_primary: bool,
    },
    Key {
        code: i32,
        pressed: bool,
        unicode_char: u32,
        autorepeat: bool,
    },
    /// Raw surface pointer as an address, 0 for none
    SetSurface(usize),
    SetAssetSource(usize),
    SetUserPath(String),
}

/// Engine double that records calls
#[derive(Debug, Clone, Default)]
pub struct RecordingEngine {
    calls: Arc<Mutex<Vec<EngineCall>>>,
    key_result: bool,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value returned from every [`Engine::key`] call
    pub fn with_key_result(mut self, consumed: bool) -> Self {
        self.key_result = consumed;
        self
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn touches(&self) -> Vec<EngineCall> {
        self.calls()
            .into_iter()
            .filter(|call| matches!(call, EngineCall::Touch { .. }))
            .collect()
    }

    pub fn keys(&self) -> Vec<EngineCall> {
        self.calls()
            .into_iter()
            .filter(|call| matches!(call, EngineCall::Key { .. }))
            .collect()
    }

    pub fn clear(&self) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn record(&self, call: EngineCall) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }
}

impl Engine for RecordingEngine {
    fn spawn_main(&self) {
        self.record(EngineCall::SpawnMain);
    }

    fn resume(&self) {
        self.record(EngineCall::Resume);
    }

    fn pause(&self) {
        self.record(EngineCall::Pause);
    }

    fn exit(&self) {
        self.record(EngineCall::Exit);
    }

    fn touch(&self, x: i32, y: i32, pointer_id: i32, pressed: bool, is_primary: bool) {
        self.record(EngineCall::Touch {
            x,
            y,
            pointer_id,
            pressed,
            is_primary,
        });
    }

    fn key(&self, code: i32, pressed: bool, unicode_char: u32, autorepeat: bool) -> bool {
        self.record(EngineCall::Key {
            code,
            pressed,
            unicode_char,
            autorepeat,
        });
        self.key_result
    }

    fn set_surface(&self, surface: Option<SurfaceHandle>) {
        let addr = surface.map_or(0, |s| s.as_ptr() as usize);
        self.record(EngineCall::SetSurface(addr));
    }

    fn set_asset_source(&self, source: AssetSource) {
        self.record(EngineCall::SetAssetSource(source.as_ptr() as usize));
    }

    fn set_user_path(&self, path: &str) {
        self.record(EngineCall::SetUserPath(path.to_string()));
    }
}

/// One call made on the view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewCall {
    SetFocusable(bool),
    RequestFocus,
    ClearFocus,
    ShowSoftInput,
    HideSoftInput,
    RestartInput,
}

/// View double that records calls
#[derive(Debug, Clone, Default)]
pub struct RecordingView {
    calls: Arc<Mutex<Vec<ViewCall>>>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<ViewCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn clear(&self) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn record(&self, call: ViewCall) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }
}

impl SoftInputView for RecordingView {
    fn set_focusable(&mut self, focusable: bool) {
        self.record(ViewCall::SetFocusable(focusable));
    }

    fn request_focus(&mut self) {
        self.record(ViewCall::RequestFocus);
    }

    fn clear_focus(&mut self) {
        self.record(ViewCall::ClearFocus);
    }

    fn show_soft_input(&mut self) {
        self.record(ViewCall::ShowSoftInput);
    }

    fn hide_soft_input(&mut self) {
        self.record(ViewCall::HideSoftInput);
    }

    fn restart_input(&mut self) {
        self.record(ViewCall::RestartInput);
    }
}
