//! Configuration management for pricechart.
//!
//! Loads server, chart and color settings from TOML. Every field has a
//! default, so a partial file only overrides what it names.

use pricechart_layout::{LabelZone, LayoutConfig, Margins};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub chart: ChartConfig,
    pub colors: ColorConfig,
}

impl Config {
    /// Load configuration from a file path.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from default locations.
    ///
    /// Searches in order:
    /// 1. `./config.toml`
    /// 2. `~/.config/pricechart/config.toml`
    ///
    /// Returns default config if no usable file is found.
    pub fn load_default() -> Self {
        for path in Self::search_paths() {
            if !path.exists() {
                continue;
            }
            match Self::load(&path) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    return config;
                }
                Err(e) => log::warn!("Ignoring {}: {}", path.display(), e),
            }
        }

        log::debug!("No config file found, using defaults");
        Self::default()
    }

    /// Candidate config file locations, in search order.
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![Self::default_path()];
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("pricechart").join("config.toml"));
        }
        paths
    }

    /// Save configuration to a file path.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the default config file path.
    pub fn default_path() -> PathBuf {
        PathBuf::from("config.toml")
    }
}

/// Price server connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    /// History (query) server port.
    pub port: u16,
    /// Stream server port.
    pub stream_port: u16,
    /// History request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 8080,
            stream_port: 8081,
            timeout_secs: 10,
        }
    }
}

impl ServerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Chart dimensions and axis settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub margin_left: u32,
    pub margin_right: u32,
    pub margin_top: u32,
    pub margin_bottom: u32,
    pub volume_height: u32,
    pub volume_margin_top: u32,
    pub volume_margin_bottom: u32,
    pub price_gridlines: usize,
    pub volume_gridlines: usize,
    pub max_time_ticks: usize,
    /// Label the time axis in UTC instead of local time.
    pub utc_labels: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self::from_layout(&LayoutConfig::default())
    }
}

impl ChartConfig {
    fn from_layout(layout: &LayoutConfig) -> Self {
        Self {
            canvas_width: layout.canvas_width,
            canvas_height: layout.canvas_height,
            margin_left: layout.margins.left,
            margin_right: layout.margins.right,
            margin_top: layout.margins.top,
            margin_bottom: layout.margins.bottom,
            volume_height: layout.volume_height,
            volume_margin_top: layout.volume_margins.top,
            volume_margin_bottom: layout.volume_margins.bottom,
            price_gridlines: layout.price_gridlines,
            volume_gridlines: layout.volume_gridlines,
            max_time_ticks: layout.max_time_ticks,
            utc_labels: layout.label_zone == LabelZone::Utc,
        }
    }

    /// Layout parameters for the chart engine.
    pub fn to_layout(&self) -> LayoutConfig {
        LayoutConfig {
            canvas_width: self.canvas_width,
            canvas_height: self.canvas_height,
            margins: Margins::new(
                self.margin_left,
                self.margin_right,
                self.margin_top,
                self.margin_bottom,
            ),
            volume_height: self.volume_height,
            volume_margins: Margins::new(
                self.margin_left,
                self.margin_right,
                self.volume_margin_top,
                self.volume_margin_bottom,
            ),
            price_gridlines: self.price_gridlines,
            volume_gridlines: self.volume_gridlines,
            max_time_ticks: self.max_time_ticks,
            label_zone: if self.utc_labels {
                LabelZone::Utc
            } else {
                LabelZone::Local
            },
        }
    }
}

/// Chart colors as `#rrggbb` strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    /// Rising candles and their volume bars.
    pub up: String,
    /// Falling candles and their volume bars.
    pub down: String,
    pub grid: String,
    pub wick: String,
    pub background: String,
    pub text: String,
    pub stats_background: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            up: "#26a69a".to_string(),
            down: "#ef5350".to_string(),
            grid: "#e0e0e0".to_string(),
            wick: "#000000".to_string(),
            background: "#ffffff".to_string(),
            text: "#000000".to_string(),
            stats_background: "#f5f5f5".to_string(),
        }
    }
}
