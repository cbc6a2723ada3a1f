//! Error types for the frame loop

use serde::{Deserialize, Serialize};

/// Comprehensive error type for pacing and lifecycle operations
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum FrameLoopError {
    /// Invalid time value
    #[error("Invalid time value: {time}")]
    InvalidTime { time: f64 },

    /// Time out of range
    #[error("Time {time} is out of range [{start}, {end}]")]
    TimeOutOfRange { time: f64, start: f64, end: f64 },

    /// Invalid frame rate
    #[error("Invalid frame rate: {fps}")]
    InvalidFrameRate { fps: f64 },

    /// Invalid configuration
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Invalid lifecycle phase transition
    #[error("Invalid phase transition: {current} -> {requested}")]
    InvalidTransition { current: String, requested: String },

    /// Frame listener not found
    #[error("Listener not found: {id}")]
    ListenerNotFound { id: String },

    /// Frame listener failed
    #[error("Listener failed: {reason}")]
    ListenerFailed { reason: String },

    /// Serialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Generic frame loop error
    #[error("Frame loop error: {message}")]
    Generic { message: String },
}

impl FrameLoopError {
    /// Create a new generic error
    pub fn new(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    /// Check if this is a recoverable error
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::TimeOutOfRange { .. }
                | Self::InvalidTransition { .. }
                | Self::ListenerFailed { .. }
        )
    }

    /// Get error category for logging/metrics
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidTime { .. }
            | Self::TimeOutOfRange { .. }
            | Self::InvalidFrameRate { .. }
            | Self::InvalidConfig { .. } => "validation",
            Self::InvalidTransition { .. } => "lifecycle",
            Self::ListenerNotFound { .. } | Self::ListenerFailed { .. } => "listener",
            Self::SerializationError { .. } => "serialization",
            Self::Generic { .. } => "generic",
        }
    }
}

impl From<serde_json::Error> for FrameLoopError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let error = FrameLoopError::new("test error");
        assert!(matches!(error, FrameLoopError::Generic { .. }));
    }

    #[test]
    fn test_error_recoverability() {
        let recoverable = FrameLoopError::InvalidTransition {
            current: "paused".to_string(),
            requested: "pause".to_string(),
        };
        assert!(recoverable.is_recoverable());

        let non_recoverable = FrameLoopError::InvalidFrameRate { fps: -1.0 };
        assert!(!non_recoverable.is_recoverable());
    }

    #[test]
    fn test_error_categories() {
        let validation_error = FrameLoopError::InvalidTime { time: -1.0 };
        assert_eq!(validation_error.category(), "validation");

        let listener_error = FrameLoopError::ListenerNotFound {
            id: "test".to_string(),
        };
        assert_eq!(listener_error.category(), "listener");
    }

    #[test]
    fn test_serialization() {
        let error = FrameLoopError::new("test");
        let serialized = serde_json::to_string(&error).unwrap();
        let deserialized: FrameLoopError = serde_json::from_str(&serialized).unwrap();
        assert_eq!(error, deserialized);
    }
}
