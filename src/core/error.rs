use thiserror::Error;

#[derive(Error, Debug)]
pub enum AubreyError {
    #[error("Marker position out of range: {position} (circle has {num_holes} holes)")]
    OutOfRange { position: u16, num_holes: u16 },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Ephemeris unavailable: {0}")]
    EphemerisUnavailable(String),

    #[error("Invalid prediction target: {0}")]
    InvalidTarget(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ParseError(String),
}

pub type Result<T> = std::result::Result<T, AubreyError>;
