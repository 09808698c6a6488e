use nya_platform::config::LibraryConfig;
use nya_platform::testing::RecordingView;
use nya_platform::{ActivityShim, PlatformError, ShimConfig, ShimHooks};
use nya_platform_android::NativeEngine;

#[test]
fn missing_library_is_a_load_error() {
    let config = LibraryConfig {
        name: "nya_engine_that_does_not_exist".to_string(),
        path: None,
    };

    let err = NativeEngine::load(&config).unwrap_err();

    match err {
        PlatformError::LibraryLoad(message) => {
            assert!(message.contains("libnya_engine_that_does_not_exist.so"));
        }
        other => panic!("expected LibraryLoad, got {:?}", other),
    }
}

#[cfg(all(target_os = "linux", target_env = "gnu"))]
#[test]
fn library_without_entry_points_is_rejected() {
    let err = NativeEngine::load_from("libc.so.6").unwrap_err();

    match err {
        PlatformError::SymbolMissing(message) => {
            assert!(message.starts_with("native_spawn_main"));
        }
        other => panic!("expected SymbolMissing, got {:?}", other),
    }
}

#[test]
fn shim_reports_engine_load_failure() {
    let config = ShimConfig::from_toml_str("[library]\npath = \"/nonexistent/libgame.so\"").unwrap();
    let mut shim: ActivityShim<NativeEngine, RecordingView> = ActivityShim::new(
        config,
        ShimHooks::new(|config: &ShimConfig| NativeEngine::load(&config.library)),
    );

    let result = shim.on_create(nya_platform::CreateParams {
        asset_source: nya_platform::AssetSource::from_raw(0x10 as *mut _).unwrap(),
        files_dir: "/files".into(),
        view: RecordingView::new(),
    });

    assert!(matches!(result, Err(PlatformError::LibraryLoad(_))));
    assert!(shim.engine().is_none());
}
