use std::time::Duration;

use anyhow::{Context, Result};
use glam::DVec2;
use serde::Deserialize;

use crate::directions::TransportType;
use crate::map::GeoCoordinate;
use crate::telemetry::LogFormat;

/// Runtime settings for the route display, read from the environment.
///
/// Every field has a default so an empty environment yields the demo route
/// from Vienna to Berlin.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_source_lat")]
    pub route_source_lat: f64,
    #[serde(default = "default_source_lon")]
    pub route_source_lon: f64,
    #[serde(default = "default_destination_lat")]
    pub route_destination_lat: f64,
    #[serde(default = "default_destination_lon")]
    pub route_destination_lon: f64,
    /// `automobile` or `walking`
    #[serde(default = "default_route_transport")]
    pub route_transport: String,
    /// Samples along the route returned by the directions provider
    #[serde(default = "default_route_samples")]
    pub route_samples: usize,
    /// Duration of each pulse phase
    #[serde(default = "default_phase_duration_ms")]
    pub phase_duration_ms: u64,
    /// Display refresh period
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,
    #[serde(default = "default_view_width")]
    pub view_width: f64,
    #[serde(default = "default_view_height")]
    pub view_height: f64,
    /// Simulate user pan/zoom gestures
    #[serde(default = "default_camera_drift")]
    pub camera_drift: bool,
    /// Stop after this many seconds; 0 runs until Ctrl+C
    #[serde(default)]
    pub run_seconds: u64,
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

fn default_source_lat() -> f64 {
    48.187651
}

fn default_source_lon() -> f64 {
    16.359166
}

fn default_destination_lat() -> f64 {
    52.522107
}

fn default_destination_lon() -> f64 {
    13.413230
}

fn default_route_transport() -> String {
    "automobile".to_string()
}

fn default_route_samples() -> usize {
    64
}

fn default_phase_duration_ms() -> u64 {
    3000
}

fn default_frame_interval_ms() -> u64 {
    16
}

fn default_view_width() -> f64 {
    390.0
}

fn default_view_height() -> f64 {
    844.0
}

fn default_camera_drift() -> bool {
    true
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            route_source_lat: default_source_lat(),
            route_source_lon: default_source_lon(),
            route_destination_lat: default_destination_lat(),
            route_destination_lon: default_destination_lon(),
            route_transport: default_route_transport(),
            route_samples: default_route_samples(),
            phase_duration_ms: default_phase_duration_ms(),
            frame_interval_ms: default_frame_interval_ms(),
            view_width: default_view_width(),
            view_height: default_view_height(),
            camera_drift: default_camera_drift(),
            run_seconds: 0,
            log_format: default_log_format(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();
        // Parse environment variables into the Config struct
        let config: Config = envy::from_env().context("Failed to load config from environment")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        anyhow::ensure!(self.frame_interval_ms > 0, "FRAME_INTERVAL_MS must be positive");
        anyhow::ensure!(self.phase_duration_ms > 0, "PHASE_DURATION_MS must be positive");
        anyhow::ensure!(
            self.view_width > 0.0 && self.view_height > 0.0,
            "VIEW_WIDTH and VIEW_HEIGHT must be positive"
        );
        self.log_format().context("Invalid LOG_FORMAT")?;
        self.transport().context("Invalid ROUTE_TRANSPORT")?;
        Ok(())
    }

    pub fn source(&self) -> GeoCoordinate {
        GeoCoordinate::new(self.route_source_lat, self.route_source_lon)
    }

    pub fn destination(&self) -> GeoCoordinate {
        GeoCoordinate::new(self.route_destination_lat, self.route_destination_lon)
    }

    pub fn transport(&self) -> crate::Result<TransportType> {
        self.route_transport.parse()
    }

    pub fn phase_duration(&self) -> Duration {
        Duration::from_millis(self.phase_duration_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    pub fn view_size(&self) -> DVec2 {
        DVec2::new(self.view_width, self.view_height)
    }

    pub fn log_format(&self) -> crate::Result<LogFormat> {
        self.log_format.parse()
    }
}
