//! Core error types for TRAJECT.

use std::fmt;

/// Core result type
pub type CoreResult<T> = Result<T, CoreError>;

/// Core error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Checkpoint resource could not be read
    ResourceAccess { path: String, reason: String },

    /// Required checkpoint field is absent
    MissingField { name: String },

    /// Checkpoint field present but of the wrong shape or type
    MalformedField { name: String, reason: String },

    /// Run-mode tag outside the two recognized values
    InvalidRunMode { mode: String },

    /// Particle type code outside the known enumeration
    InvalidParticleKind { code: i64 },

    /// Energy group index outside the group structure
    GroupOutOfRange { group: i64, n_groups: usize },

    /// Error raised by the transport stepping loop
    Transport { message: String },

    /// Internal error (for unexpected errors)
    Internal {
        /// Error message
        message: String,
    },
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResourceAccess { path, reason } => {
                write!(f, "Cannot read checkpoint {}: {}", path, reason)
            }
            Self::MissingField { name } => write!(f, "Missing checkpoint field: {}", name),
            Self::MalformedField { name, reason } => {
                write!(f, "Malformed checkpoint field {}: {}", name, reason)
            }
            Self::InvalidRunMode { mode } => write!(f, "Unexpected run mode: {}", mode),
            Self::InvalidParticleKind { code } => {
                write!(f, "Unknown particle type code: {}", code)
            }
            Self::GroupOutOfRange { group, n_groups } => {
                write!(f, "Energy group {} outside structure of {} groups", group, n_groups)
            }
            Self::Transport { message } => write!(f, "Transport failed: {}", message),
            Self::Internal { message } => write!(f, "Internal error: {}", message),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal {
            message: format!("JSON encoding failed: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::MissingField {
            name: "weight".to_string(),
        };
        assert_eq!(format!("{}", err), "Missing checkpoint field: weight");

        let err = CoreError::InvalidRunMode {
            mode: "unknown".to_string(),
        };
        assert_eq!(format!("{}", err), "Unexpected run mode: unknown");
    }

    #[test]
    fn test_resource_access_error() {
        let err = CoreError::ResourceAccess {
            path: "particle_7_1234.h5".to_string(),
            reason: "permission denied".to_string(),
        };
        let s = format!("{}", err);
        assert!(s.contains("particle_7_1234.h5"));
        assert!(s.contains("permission denied"));
    }

    #[test]
    fn test_group_out_of_range_error() {
        let err = CoreError::GroupOutOfRange {
            group: 12,
            n_groups: 7,
        };
        let s = format!("{}", err);
        assert!(s.contains("12"));
        assert!(s.contains("7"));
    }

    #[test]
    fn test_error_equality() {
        let err1 = CoreError::InvalidParticleKind { code: 9 };
        let err2 = CoreError::InvalidParticleKind { code: 9 };
        assert_eq!(err1, err2);

        let err3 = CoreError::InvalidParticleKind { code: 4 };
        assert_ne!(err1, err3);
    }
}
