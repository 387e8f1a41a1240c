// src/error.rs
//! Error types for the GPS path tools

use std::fmt;

pub type Result<T> = std::result::Result<T, TrackError>;

#[derive(Debug)]
pub enum TrackError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Parse(String),
    EmptyTrack,
    Other(String),
}

impl fmt::Display for TrackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackError::Io(e) => write!(f, "IO error: {}", e),
            TrackError::Json(e) => write!(f, "JSON error: {}", e),
            TrackError::Parse(msg) => write!(f, "Parse error: {}", msg),
            TrackError::EmptyTrack => write!(f, "Track has no points"),
            TrackError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for TrackError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TrackError::Io(e) => Some(e),
            TrackError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TrackError {
    fn from(error: std::io::Error) -> Self {
        TrackError::Io(error)
    }
}

impl From<serde_json::Error> for TrackError {
    fn from(error: serde_json::Error) -> Self {
        TrackError::Json(error)
    }
}

impl From<anyhow::Error> for TrackError {
    fn from(error: anyhow::Error) -> Self {
        TrackError::Other(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(TrackError::EmptyTrack.to_string(), "Track has no points");
        assert_eq!(
            TrackError::Parse("bad time".to_string()).to_string(),
            "Parse error: bad time"
        );
    }

    #[test]
    fn test_io_conversion_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: TrackError = io.into();
        assert!(matches!(err, TrackError::Io(_)));
        assert!(std::error::Error::source(&err).is_some());
    }
}
