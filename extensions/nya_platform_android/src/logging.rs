//! Log output setup
//!
//! On Android, `log` records go to logcat through `android_logger` and
//! `tracing` events through a `tracing-android` layer, both under the
//! configured tag. Elsewhere a plain `fmt` subscriber is installed.

use nya_platform::config::LoggingConfig;

/// Initialize Android logging
#[cfg(target_os = "android")]
pub fn init_logging(config: &LoggingConfig) {
    use tracing_subscriber::filter::LevelFilter;
    use tracing_subscriber::layer::SubscriberExt;

    let log_level = config
        .level
        .parse::<log::LevelFilter>()
        .unwrap_or(log::LevelFilter::Debug);

    // Initialize android_logger for log crate
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(log_level)
            .with_tag(config.tag.clone()),
    );

    // Initialize tracing-android for tracing crate
    match tracing_android::layer(&config.tag) {
        Ok(layer) => {
            let subscriber = tracing_subscriber::registry()
                .with(LevelFilter::from_level(config.level_filter()))
                .with(layer);
            let _ = tracing::subscriber::set_global_default(subscriber);
        }
        Err(e) => log::warn!("tracing-android layer unavailable: {}", e),
    }
}

/// Initialize host logging, honoring `RUST_LOG` over the configured level
#[cfg(not(target_os = "android"))]
pub fn init_logging(config: &LoggingConfig) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level_filter().as_str()));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
