//! APK asset access via NDK AssetManager
//!
//! The engine reads its own assets through the asset manager handle it is
//! given on create. The shim itself only reads its configuration file.

use std::ffi::CString;
use std::io::Read;

use android_activity::AndroidApp;

use nya_platform::config::CONFIG_ASSET;
use nya_platform::{AssetSource, PlatformError, Result, ShimConfig};

/// Reads files from the APK's assets/ folder
pub struct AssetReader {
    app: AndroidApp,
}

impl AssetReader {
    pub fn new(app: AndroidApp) -> Self {
        Self { app }
    }

    /// Opaque asset manager handle for the engine
    pub fn source(&self) -> Option<AssetSource> {
        AssetSource::from_raw(self.app.asset_manager().ptr().as_ptr().cast())
    }

    /// Load an asset by path (relative to assets/ folder in APK)
    pub fn read(&self, path: &str) -> Result<Vec<u8>> {
        let c_path = CString::new(path.trim_start_matches('/'))
            .map_err(|e| PlatformError::AssetLoad(format!("Invalid path: {}", e)))?;

        let mut asset = self
            .app
            .asset_manager()
            .open(&c_path)
            .ok_or_else(|| PlatformError::AssetLoad(format!("Asset not found: {}", path)))?;

        let mut buffer = Vec::new();
        asset.read_to_end(&mut buffer).map_err(|e| {
            PlatformError::AssetLoad(format!("Failed to read asset '{}': {}", path, e))
        })?;

        Ok(buffer)
    }

    pub fn exists(&self, path: &str) -> bool {
        let Ok(c_path) = CString::new(path.trim_start_matches('/')) else {
            return false;
        };
        self.app.asset_manager().open(&c_path).is_some()
    }

    /// Shim configuration from the bundled config asset, defaults if absent
    pub fn load_config(&self) -> Result<ShimConfig> {
        if !self.exists(CONFIG_ASSET) {
            return Ok(ShimConfig::default());
        }
        ShimConfig::from_bytes(&self.read(CONFIG_ASSET)?)
    }
}
