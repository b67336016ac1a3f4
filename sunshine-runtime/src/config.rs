//! Simulator configuration
//!
//! Loaded from a TOML file named on the command line. Without one, the
//! embedded `sunshine.toml` is used so the simulator always has a scenario
//! to play.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use sunshine_core::config::{ConfigError as FaceConfigError, FaceConfig};
use sunshine_display::{DisplayMetrics, TapType};

/// Embedded default scenario
const EMBEDDED_CONFIG: &str = include_str!("../sunshine.toml");

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid face settings: {0:?}")]
    Face(FaceConfigError),
    #[error("time_tick_ms must be at least 1")]
    InvalidTimeTick,
}

/// Simulated display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub is_round: bool,
    pub width: u16,
    pub height: u16,
    pub low_bit_ambient: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            is_round: false,
            width: 320,
            height: 320,
            low_bit_ambient: false,
        }
    }
}

impl DisplayConfig {
    pub fn metrics(&self) -> DisplayMetrics {
        DisplayMetrics {
            is_round: self.is_round,
            width: self.width,
            height: self.height,
        }
    }
}

/// One refresh of the handheld weather service
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WeatherReading {
    /// Delay after the previous reading
    pub after_ms: u64,
    pub high: i16,
    pub low: i16,
    pub icon: String,
}

/// Tap phase as written in the scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TapKind {
    Touch,
    TouchCancel,
    Tap,
}

impl From<TapKind> for TapType {
    fn from(kind: TapKind) -> Self {
        match kind {
            TapKind::Touch => TapType::Touch,
            TapKind::TouchCancel => TapType::TouchCancel,
            TapKind::Tap => TapType::Tap,
        }
    }
}

/// Something the scripted host does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum HostAction {
    Visible { visible: bool },
    Ambient { ambient: bool },
    Tap { kind: TapKind, x: i32, y: i32 },
    TimeZone { utc_offset_minutes: i32 },
    /// Radio coverage between the devices
    Radio { up: bool },
    Destroy,
}

/// One step of the host scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct HostStep {
    /// Delay after the previous step
    pub after_ms: u64,
    #[serde(flatten)]
    pub action: HostAction,
}

/// Complete simulator configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Sync cache file; volatile cache when absent
    pub store_path: Option<PathBuf>,
    pub face: FaceConfig,
    pub display: DisplayConfig,
    /// Period of the host's ambient wake
    pub time_tick_ms: u64,
    /// How long to keep running after the host scenario ends
    pub linger_ms: u64,
    pub weather: Vec<WeatherReading>,
    pub host: Vec<HostStep>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            store_path: None,
            face: FaceConfig::default(),
            display: DisplayConfig::default(),
            time_tick_ms: 60_000,
            linger_ms: 1_000,
            weather: Vec::new(),
            host: Vec::new(),
        }
    }
}

/// Parse and validate a configuration
pub fn parse(text: &str) -> Result<RuntimeConfig, ConfigError> {
    let config: RuntimeConfig = toml::from_str(text)?;
    config.face.validate().map_err(ConfigError::Face)?;
    if config.time_tick_ms == 0 {
        return Err(ConfigError::InvalidTimeTick);
    }
    Ok(config)
}

/// The embedded scenario
pub fn embedded() -> RuntimeConfig {
    parse(EMBEDDED_CONFIG).unwrap_or_else(|e| {
        warn!("Embedded config invalid, using defaults: {}", e);
        RuntimeConfig::default()
    })
}

/// Load configuration from `path`, or the embedded scenario
///
/// A path that does not exist falls back to the embedded scenario.
pub fn load(path: Option<&Path>) -> Result<RuntimeConfig, ConfigError> {
    let Some(path) = path else {
        debug!("No config file given, using embedded scenario");
        return Ok(embedded());
    };

    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!("Config {} not found, using embedded scenario", path.display());
            return Ok(embedded());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_owned(),
                source,
            })
        }
    };

    let config = parse(&text)?;
    log_config_summary(&config);
    Ok(config)
}

/// Log a summary of the loaded configuration
fn log_config_summary(config: &RuntimeConfig) {
    info!("Configuration loaded");
    debug!(
        "  display {}x{} round={}",
        config.display.width, config.display.height, config.display.is_round
    );
    debug!("  {} weather readings", config.weather.len());
    debug!("  {} host steps", config.host.len());
}
