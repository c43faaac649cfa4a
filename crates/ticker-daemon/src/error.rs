//! Error types for the daemon timer service.

use thiserror::Error;

/// Errors that can occur while starting or stopping the daemon.
#[derive(Debug, Error)]
pub enum DaemonError {
    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The daemon thread could not be spawned.
    #[error("Failed to spawn timer daemon thread: {0}")]
    Spawn(#[source] std::io::Error),

    /// The daemon thread terminated by panicking.
    #[error("Timer daemon thread panicked")]
    DaemonPanicked,
}

impl DaemonError {
    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_configuration(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration(reason.into())
    }
}

/// A specialized `Result` type for daemon operations.
pub type DaemonResult<T> = std::result::Result<T, DaemonError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DaemonError::invalid_configuration("capacity must be greater than 0");
        assert!(err.to_string().contains("capacity"));

        let err = DaemonError::Spawn(std::io::Error::other("no threads left"));
        assert!(err.to_string().contains("no threads left"));
    }
}
