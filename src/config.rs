use std::path::PathBuf;
use std::time::Duration;

/// Application-level constants
pub const APP_NAME: &str = "Velix Health";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Storage key of the dark-mode flag.
pub const THEME_PREFERENCE_KEY: &str = "velix-theme";

/// Default local API port when `VELIX_API_PORT` is unset or invalid.
pub const DEFAULT_API_PORT: u16 = 4319;

/// Default simulated analysis latency.
pub const DEFAULT_ANALYSIS_LATENCY_MS: u64 = 1500;

/// Get the application data directory
/// ~/VelixHealth/ on all platforms. Falls back to the working
/// directory when no home directory can be determined.
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("VelixHealth")
}

/// Path of the app-level SQLite database (preferences).
pub fn app_db_path() -> PathBuf {
    app_data_dir().join("app.db")
}

/// Default `EnvFilter` directive when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "velix_lib=info,velix_health=info"
}

/// Port for the local API server (`VELIX_API_PORT`).
pub fn api_port() -> u16 {
    std::env::var("VELIX_API_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_API_PORT)
}

/// Simulated analyzer latency (`VELIX_ANALYSIS_LATENCY_MS`).
/// Zero falls back to the default.
pub fn analysis_latency() -> Duration {
    let ms = std::env::var("VELIX_ANALYSIS_LATENCY_MS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|ms| *ms > 0)
        .unwrap_or(DEFAULT_ANALYSIS_LATENCY_MS);
    Duration::from_millis(ms)
}

/// Remote analysis backend URL (`VELIX_ANALYZER_URL`). `None` selects
/// the simulated analyzer.
pub fn analyzer_url() -> Option<String> {
    std::env::var("VELIX_ANALYZER_URL")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// External hospital directory file (`VELIX_DIRECTORY_PATH`).
pub fn directory_path() -> Option<PathBuf> {
    std::env::var_os("VELIX_DIRECTORY_PATH").map(PathBuf::from)
}
