pub mod charting;
pub mod config;
pub mod db;
pub mod models;
mod phi_audit; // Static PHI-in-logs scan (tests only)

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over `config::default_log_filter()`. A subscriber already
/// installed by the host application is left in place.
pub fn init_tracing() {
    let result = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init();

    if result.is_ok() {
        tracing::info!("{} charting core v{}", config::APP_NAME, config::APP_VERSION);
    }
}
