use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use nya_platform::testing::{EngineCall, RecordingEngine, RecordingView, ViewCall};
use nya_platform::{
    load_once, ActivityShim, AssetSource, CreateParams, KeyBatch, KeyEvent, KeyboardMode,
    MotionAction, MotionEvent, ShimConfig, ShimHooks, SurfaceHandle, TouchPointer,
    KEYCODE_UNKNOWN,
};

struct Harness {
    shim: ActivityShim<RecordingEngine, RecordingView>,
    engine: RecordingEngine,
    view: RecordingView,
}

fn created() -> Harness {
    let engine = RecordingEngine::new();
    let view = RecordingView::new();
    let loaded = engine.clone();
    let mut shim = ActivityShim::new(
        ShimConfig::default(),
        ShimHooks::new(move |_| Ok(loaded.clone())),
    );

    shim.on_create(CreateParams {
        asset_source: AssetSource::from_raw(0x10 as *mut _).unwrap(),
        files_dir: PathBuf::from("/data/data/nya.test/files"),
        view: view.clone(),
    })
    .unwrap();
    engine.clear();
    view.clear();

    Harness { shim, engine, view }
}

#[test]
fn recognized_keyboard_codes_show_with_mapped_input_type() {
    for mode in KeyboardMode::ALL {
        let mut h = created();

        h.shim.set_virtual_keyboard(mode.code() as u32);

        assert!(h.shim.is_keyboard_visible(), "{:?} should show", mode);
        assert_eq!(
            h.shim.on_create_input_connection().input_type,
            mode.input_type()
        );
        assert_eq!(
            h.view.calls(),
            vec![
                ViewCall::SetFocusable(true),
                ViewCall::RequestFocus,
                ViewCall::ShowSoftInput,
                ViewCall::RestartInput,
            ]
        );
    }
}

#[test]
fn unrecognized_keyboard_code_hides_and_clears_focus() {
    let mut h = created();
    h.shim.set_virtual_keyboard('n' as u32);
    h.view.clear();

    h.shim.set_virtual_keyboard('x' as u32);

    assert!(!h.shim.is_keyboard_visible());
    assert_eq!(
        h.view.calls(),
        vec![
            ViewCall::SetFocusable(false),
            ViewCall::ClearFocus,
            ViewCall::HideSoftInput,
        ]
    );
    assert!(h.engine.calls().is_empty());
}

#[test]
fn touch_move_forwards_one_call_per_pointer() {
    let mut h = created();
    let pointers: Vec<TouchPointer> = (0..4)
        .map(|i| TouchPointer::new(i, i as f32 * 10.0, 5.0))
        .collect();

    let consumed = h
        .shim
        .on_touch(&MotionEvent::new(MotionAction::Move, 0, pointers));

    assert!(consumed);
    let touches = h.engine.touches();
    assert_eq!(touches.len(), 4);
    for call in touches {
        assert!(matches!(
            call,
            EngineCall::Touch {
                pressed: true,
                is_primary: false,
                ..
            }
        ));
    }
}

#[test]
fn primary_down_then_up() {
    let mut h = created();
    let pointer = vec![TouchPointer::new(2, 120.7, 48.2)];

    assert!(h
        .shim
        .on_touch(&MotionEvent::new(MotionAction::Down, 0, pointer.clone())));
    assert!(h
        .shim
        .on_touch(&MotionEvent::new(MotionAction::Up, 0, pointer)));

    assert_eq!(
        h.engine.calls(),
        vec![
            EngineCall::Touch {
                x: 120,
                y: 48,
                pointer_id: 2,
                pressed: true,
                is_primary: true,
            },
            EngineCall::Touch {
                x: 120,
                y: 48,
                pointer_id: 2,
                pressed: false,
                is_primary: true,
            },
        ]
    );
}

#[test]
fn secondary_pointer_edges_mirror_down_up() {
    let mut h = created();
    let pointers = vec![
        TouchPointer::new(0, 0.0, 0.0),
        TouchPointer::new(1, 10.0, 20.0),
    ];

    h.shim.on_touch(&MotionEvent::new(
        MotionAction::PointerDown,
        1,
        pointers.clone(),
    ));
    h.shim
        .on_touch(&MotionEvent::new(MotionAction::PointerUp, 1, pointers));

    assert_eq!(
        h.engine.calls(),
        vec![
            EngineCall::Touch {
                x: 10,
                y: 20,
                pointer_id: 1,
                pressed: true,
                is_primary: true,
            },
            EngineCall::Touch {
                x: 10,
                y: 20,
                pointer_id: 1,
                pressed: false,
                is_primary: true,
            },
        ]
    );
}

#[test]
fn unknown_key_batch_forwards_down_up_per_character() {
    let mut h = created();

    assert!(h
        .shim
        .on_key_multiple(&KeyBatch::new(KEYCODE_UNKNOWN, "héllo", 2)));

    let keys = h.engine.keys();
    assert_eq!(keys.len(), 10);
    for (i, pair) in keys.chunks(2).enumerate() {
        let expected = "héllo".chars().nth(i).unwrap() as u32;
        assert_eq!(
            pair,
            [
                EngineCall::Key {
                    code: KEYCODE_UNKNOWN,
                    pressed: true,
                    unicode_char: expected,
                    autorepeat: true,
                },
                EngineCall::Key {
                    code: KEYCODE_UNKNOWN,
                    pressed: false,
                    unicode_char: expected,
                    autorepeat: true,
                },
            ]
        );
    }
}

#[test]
fn known_key_batch_is_declined() {
    let mut h = created();

    assert!(!h.shim.on_key_multiple(&KeyBatch::new(62, "   ", 0)));
    assert!(h.engine.calls().is_empty());
}

#[test]
fn key_down_reports_engine_result() {
    let engine = RecordingEngine::new().with_key_result(true);
    let loaded = engine.clone();
    let mut shim: ActivityShim<_, RecordingView> = ActivityShim::new(
        ShimConfig::default(),
        ShimHooks::new(move |_| Ok(loaded.clone())),
    );
    shim.on_create(CreateParams {
        asset_source: AssetSource::from_raw(0x10 as *mut _).unwrap(),
        files_dir: PathBuf::from("/files"),
        view: RecordingView::new(),
    })
    .unwrap();

    assert!(shim.on_key_down(&KeyEvent::new(66, '\n' as u32, 0)));
    assert!(shim.on_key_up(&KeyEvent::new(66, '\n' as u32, 0)));
}

#[test]
fn pause_while_visible_hides_before_engine_pause() {
    let mut h = created();
    h.shim.set_virtual_keyboard('e' as u32);
    h.view.clear();

    h.shim.on_pause();

    assert!(!h.shim.is_keyboard_visible());
    assert_eq!(
        h.view.calls(),
        vec![
            ViewCall::SetFocusable(false),
            ViewCall::ClearFocus,
            ViewCall::HideSoftInput,
        ]
    );
    assert_eq!(h.engine.calls(), vec![EngineCall::Pause]);
}

#[test]
fn pause_while_hidden_leaves_view_alone() {
    let mut h = created();

    h.shim.on_pause();

    assert!(h.view.calls().is_empty());
    assert_eq!(h.engine.calls(), vec![EngineCall::Pause]);
}

#[test]
fn lifecycle_forwards_in_order() {
    let mut h = created();
    let surface = SurfaceHandle::from_raw(0x2000 as *mut _).unwrap();

    h.shim.on_resume();
    h.shim.on_surface_created();
    h.shim.on_surface_changed(surface);
    h.shim.on_surface_destroyed();
    h.shim.on_pause();
    h.shim.on_destroy();

    assert_eq!(
        h.engine.calls(),
        vec![
            EngineCall::Resume,
            EngineCall::SetSurface(0x2000),
            EngineCall::SetSurface(0),
            EngineCall::Pause,
            EngineCall::Exit,
        ]
    );
    assert!(h.shim.view().is_none());
}

#[test]
fn engine_loads_once_across_recreation() {
    let loads = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&loads);
    let engine = RecordingEngine::new();
    let loaded = engine.clone();
    let mut shim: ActivityShim<_, RecordingView> = ActivityShim::new(
        ShimConfig::default(),
        ShimHooks::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(loaded.clone())
        }),
    );

    for _ in 0..2 {
        shim.on_create(CreateParams {
            asset_source: AssetSource::from_raw(0x10 as *mut _).unwrap(),
            files_dir: PathBuf::from("/files/"),
            view: RecordingView::new(),
        })
        .unwrap();
        shim.on_destroy();
    }

    assert_eq!(loads.load(Ordering::SeqCst), 1);
    let spawns = engine
        .calls()
        .into_iter()
        .filter(|call| *call == EngineCall::SpawnMain)
        .count();
    assert_eq!(spawns, 2);
    assert!(engine
        .calls()
        .contains(&EngineCall::SetUserPath("/files/".to_string())));
}

#[test]
fn engine_outlives_each_activity_run() {
    static ENGINE: OnceLock<RecordingEngine> = OnceLock::new();
    let loads = Arc::new(AtomicUsize::new(0));

    // One shim per android_main, dropped when the activity is destroyed
    for _ in 0..2 {
        let counter = Arc::clone(&loads);
        let mut shim: ActivityShim<_, RecordingView> = ActivityShim::new(
            ShimConfig::default(),
            ShimHooks::new(load_once(&ENGINE, move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(RecordingEngine::new())
            })),
        );
        shim.on_create(CreateParams {
            asset_source: AssetSource::from_raw(0x10 as *mut _).unwrap(),
            files_dir: PathBuf::from("/files"),
            view: RecordingView::new(),
        })
        .unwrap();
        shim.on_resume();
        shim.on_destroy();
        drop(shim);
    }

    assert_eq!(loads.load(Ordering::SeqCst), 1);
    let one_run = vec![
        EngineCall::SetAssetSource(0x10),
        EngineCall::SetUserPath("/files/".to_string()),
        EngineCall::SpawnMain,
        EngineCall::Resume,
        EngineCall::Exit,
    ];
    assert_eq!(
        ENGINE.get().unwrap().calls(),
        [one_run.clone(), one_run].concat()
    );
}

#[test]
fn custom_spawn_hook_replaces_default() {
    let spawned = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&spawned);
    let engine = RecordingEngine::new();
    let loaded = engine.clone();
    let hooks = ShimHooks::new(move |_| Ok(loaded.clone())).with_spawn_main(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    let mut shim: ActivityShim<_, RecordingView> = ActivityShim::new(ShimConfig::default(), hooks);

    shim.on_create(CreateParams {
        asset_source: AssetSource::from_raw(0x10 as *mut _).unwrap(),
        files_dir: PathBuf::from("/files"),
        view: RecordingView::new(),
    })
    .unwrap();

    assert_eq!(spawned.load(Ordering::SeqCst), 1);
    assert!(!engine.calls().contains(&EngineCall::SpawnMain));
}

#[test]
fn posted_requests_apply_last_write_on_drain() {
    let mut h = created();
    let requests = h.shim.keyboard_requests();

    requests.post_code('n' as u32);
    requests.post_code('w' as u32);
    assert!(!h.shim.is_keyboard_visible());

    assert!(h.shim.drain_keyboard_requests());
    assert!(!h.shim.drain_keyboard_requests());

    assert!(h.shim.is_keyboard_visible());
    assert_eq!(
        h.shim.on_create_input_connection().input_type,
        KeyboardMode::Password.input_type()
    );
    assert_eq!(
        h.view
            .calls()
            .iter()
            .filter(|call| **call == ViewCall::ShowSoftInput)
            .count(),
        1
    );
}

#[test]
fn configured_ime_action_is_reported() {
    let config = ShimConfig::from_toml_str("[keyboard]\nime_action = \"go\"").unwrap();
    let shim: ActivityShim<RecordingEngine, RecordingView> =
        ActivityShim::new(config, ShimHooks::new(|_| Ok(RecordingEngine::new())));

    assert_eq!(shim.on_create_input_connection().ime_action.as_raw(), 2);
}
