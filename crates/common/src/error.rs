use thiserror::Error;

// Custom Result type alias for convenient use across the project
pub type Result<T> = std::result::Result<T, PulseError>;

#[derive(Error, Debug)]
pub enum PulseError {
    #[error("No route found between source and destination")]
    NoRoute,

    #[error("Invalid coordinate: lat {latitude}, lon {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("Directions error: {0}")]
    Directions(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
