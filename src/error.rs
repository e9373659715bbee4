use std::fmt;

/// Error types for NMEA track conversion
#[derive(Debug)]
pub enum TrackError {
    /// I/O errors
    Io(std::io::Error),
    /// Parse errors with context
    Parse(String),
    /// Missing or invalid run configuration (origin, stride, outputs)
    Config(String),
    /// Export format error
    Export(String),
}

impl fmt::Display for TrackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackError::Io(err) => write!(f, "I/O error: {}", err),
            TrackError::Parse(msg) => write!(f, "Parse error: {}", msg),
            TrackError::Config(msg) => write!(f, "Configuration error: {}", msg),
            TrackError::Export(msg) => write!(f, "Export error: {}", msg),
        }
    }
}

impl std::error::Error for TrackError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TrackError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl TrackError {
    /// True for errors raised before any input line was processed
    pub fn is_config(&self) -> bool {
        matches!(self, TrackError::Config(_))
    }
}

impl From<std::io::Error> for TrackError {
    fn from(err: std::io::Error) -> Self {
        TrackError::Io(err)
    }
}

impl From<regex::Error> for TrackError {
    fn from(err: regex::Error) -> Self {
        TrackError::Parse(format!("invalid sentence pattern: {}", err))
    }
}

#[cfg(feature = "csv")]
impl From<csv::Error> for TrackError {
    fn from(err: csv::Error) -> Self {
        TrackError::Export(format!("CSV: {}", err))
    }
}

#[cfg(feature = "json")]
impl From<serde_json::Error> for TrackError {
    fn from(err: serde_json::Error) -> Self {
        TrackError::Export(format!("JSON: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, TrackError>;
