//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
///
/// Every section has defaults, so an empty environment yields a runnable
/// configuration backed by the standard calendar and local fixtures.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Financial calendar tables. Absent means the standard calendar.
    #[serde(default)]
    pub calendar: Option<Vec<CalendarYearConfig>>,
    /// The reporting period considered live.
    #[serde(default)]
    pub live: LiveConfig,
    /// Where department rows come from.
    #[serde(default)]
    pub row_store: RowStoreConfig,
    /// Row cache configuration.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Selection session limits.
    #[serde(default)]
    pub sessions: SessionConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// One financial year of the calendar, with labels as written in the file.
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarYearConfig {
    /// Financial year label, e.g. `FY2026`.
    pub year: String,
    /// Quarters in canonical order.
    pub quarters: Vec<QuarterConfig>,
}

/// One quarter of a configured year.
#[derive(Debug, Clone, Deserialize)]
pub struct QuarterConfig {
    /// Quarter label, e.g. `Q4`.
    pub quarter: String,
    /// Exactly three month names.
    pub months: Vec<String>,
}

/// Live reporting period.
#[derive(Debug, Clone, Deserialize)]
pub struct LiveConfig {
    /// Live month name.
    #[serde(default = "default_live_month")]
    pub month: String,
    /// Quarter containing the live month.
    #[serde(default = "default_live_quarter")]
    pub quarter: String,
    /// Live financial year label.
    #[serde(default = "default_live_year")]
    pub year: String,
}

impl Default for LiveConfig {
    fn default() -> Self {
        Self {
            month: default_live_month(),
            quarter: default_live_quarter(),
            year: default_live_year(),
        }
    }
}

fn default_live_month() -> String {
    "February".to_string()
}

fn default_live_quarter() -> String {
    "Q4".to_string()
}

fn default_live_year() -> String {
    "FY2026".to_string()
}

/// Row store backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowStoreKind {
    /// Hosted REST tables.
    Rest,
    /// JSON files on disk.
    #[default]
    Fixture,
}

/// Row store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RowStoreConfig {
    /// Backend to use.
    #[serde(default)]
    pub kind: RowStoreKind,
    /// Base URL of the REST backend.
    #[serde(default)]
    pub base_url: Option<String>,
    /// API key sent as `apikey` and bearer token.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Directory holding `<table>.json` fixtures.
    #[serde(default = "default_fixture_dir")]
    pub fixture_dir: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RowStoreConfig {
    fn default() -> Self {
        Self {
            kind: RowStoreKind::default(),
            base_url: None,
            api_key: None,
            fixture_dir: default_fixture_dir(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_fixture_dir() -> String {
    "fixtures".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

/// Row cache configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of cached departments.
    #[serde(default = "default_max_capacity")]
    pub max_capacity: u64,
    /// Time-to-live of cached rows in seconds.
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: default_max_capacity(),
            ttl_secs: default_ttl_secs(),
        }
    }
}

fn default_max_capacity() -> u64 {
    16
}

fn default_ttl_secs() -> u64 {
    300 // 5 minutes
}

/// Selection session limits.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Maximum number of live sessions.
    #[serde(default = "default_max_sessions")]
    pub max_sessions: u64,
    /// Seconds without access before a session is dropped.
    #[serde(default = "default_idle_secs")]
    pub idle_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_sessions: default_max_sessions(),
            idle_secs: default_idle_secs(),
        }
    }
}

fn default_max_sessions() -> u64 {
    10_000
}

fn default_idle_secs() -> u64 {
    1800 // 30 minutes
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("PULSE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
