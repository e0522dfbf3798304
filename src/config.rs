use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Vantage";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Page size for note lists when an offset is given without a limit.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Database file name inside the data directory.
pub const DATABASE_FILE: &str = "vantage.db";

/// Get the application data directory
/// ~/Vantage/ when the home directory is known, ./Vantage otherwise.
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Path of the charting database.
pub fn database_path() -> PathBuf {
    app_data_dir().join(DATABASE_FILE)
}

/// Filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> String {
    if cfg!(debug_assertions) {
        "vantage_ehr=debug".to_string()
    } else {
        "vantage_ehr=info".to_string()
    }
}
