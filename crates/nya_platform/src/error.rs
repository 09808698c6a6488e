//! Platform error types

use thiserror::Error;

/// Platform-related errors
///
/// Forwarding paths never produce these; they only cover the setup steps
/// a shim has to report (engine loading, config, paths, assets).
#[derive(Error, Debug)]
pub enum PlatformError {
    /// The engine library could not be loaded
    #[error("Engine library load failed: {0}")]
    LibraryLoad(String),

    /// The engine library is missing a required entry point
    #[error("Engine entry point missing: {0}")]
    SymbolMissing(String),

    /// A path could not be handed across the native boundary
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Shim configuration could not be parsed or serialized
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Failed to load asset
    #[error("Asset load failed: {0}")]
    AssetLoad(String),

    /// A JNI call into the Java side failed
    #[error("JNI call failed: {0}")]
    Jni(String),

    /// Generic platform error
    #[error("Platform error: {0}")]
    Other(String),
}

/// Result type for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;
