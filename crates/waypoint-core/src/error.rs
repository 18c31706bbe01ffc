//! Error types for Waypoint core operations.
//!
//! This module defines well-structured error types using `thiserror` for
//! library-level errors, while higher-level code can use `anyhow` for
//! convenient error handling.

use thiserror::Error;

/// Result type alias using WaypointError
pub type Result<T> = std::result::Result<T, WaypointError>;

/// Core error types for Waypoint operations.
///
/// These errors represent specific failure modes that callers may want to
/// handle differently (e.g., reporting a failed pane refresh while leaving
/// the previous pane contents on screen).
///
/// Note that shortcut-resolution misses are deliberately *not* represented
/// here: resolution falls back to the unresolved path instead of erroring,
/// so that a broken shortcut can still be operated on (e.g., deleted).
#[derive(Error, Debug)]
pub enum WaypointError {
    // === Bridge Errors ===
    /// The helper process could not be spawned or exited unsuccessfully,
    /// even after the one automatic retry from the home directory
    #[error("enumeration helper unavailable: {reason}")]
    BridgeUnavailable { reason: String },

    /// The helper process ran but produced output that does not conform
    /// to the protocol
    #[error("enumeration helper produced unparsable output: {output}")]
    BridgeProtocol { output: String },

    // === Configuration Errors ===
    /// Configuration file parsing failed
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    // === I/O Errors ===
    /// Generic I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl WaypointError {
    /// Returns true if this error came from the enumeration helper.
    ///
    /// Bridge errors surface as a failed pane open/refresh; everything
    /// else is an ambient failure.
    pub fn is_bridge_error(&self) -> bool {
        matches!(
            self,
            WaypointError::BridgeUnavailable { .. } | WaypointError::BridgeProtocol { .. }
        )
    }

    /// Create a bridge-unavailable error
    pub fn bridge_unavailable(reason: impl Into<String>) -> Self {
        WaypointError::BridgeUnavailable {
            reason: reason.into(),
        }
    }

    /// Create a protocol error, keeping the offending output for diagnostics
    pub fn bridge_protocol(output: impl Into<String>) -> Self {
        WaypointError::BridgeProtocol {
            output: output.into(),
        }
    }

    /// Create a configuration error
    pub fn config(reason: impl Into<String>) -> Self {
        WaypointError::ConfigError {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_bridge_error() {
        let err = WaypointError::bridge_unavailable("helper not found");
        assert!(err.is_bridge_error());

        let err = WaypointError::bridge_protocol("not json");
        assert!(err.is_bridge_error());

        let err = WaypointError::config("bad toml");
        assert!(!err.is_bridge_error());
    }

    #[test]
    fn test_display() {
        let err = WaypointError::bridge_unavailable("exit status 1");
        assert_eq!(
            err.to_string(),
            "enumeration helper unavailable: exit status 1"
        );
    }
}
