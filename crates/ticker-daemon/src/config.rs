//! Daemon configuration.

use serde::{Deserialize, Serialize};

use crate::error::{DaemonError, DaemonResult};

/// Largest registration table the daemon accepts.
pub const MAX_CAPACITY: usize = 4096;

/// Smallest stack the daemon thread may be given, in bytes.
pub const MIN_STACK_SIZE: usize = 16 * 1024;

/// Configuration for [`DaemonTimerService`](crate::DaemonTimerService).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DaemonConfig {
    /// Number of registrations the service can hold at once.
    pub capacity: usize,
    /// Name of the daemon thread.
    pub thread_name: String,
    /// Stack size of the daemon thread in bytes; platform default when `None`.
    pub stack_size: Option<usize>,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            capacity: 32,
            thread_name: "ticker-daemon".to_owned(),
            stack_size: None,
        }
    }
}

impl DaemonConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> DaemonResult<()> {
        if self.capacity == 0 {
            return Err(DaemonError::invalid_configuration(
                "capacity must be greater than 0",
            ));
        }
        if self.capacity > MAX_CAPACITY {
            return Err(DaemonError::invalid_configuration(format!(
                "capacity must not exceed {MAX_CAPACITY}"
            )));
        }
        if self.thread_name.is_empty() {
            return Err(DaemonError::invalid_configuration(
                "thread_name must not be empty",
            ));
        }
        if self.thread_name.contains('\0') {
            return Err(DaemonError::invalid_configuration(
                "thread_name must not contain NUL bytes",
            ));
        }
        if let Some(stack_size) = self.stack_size
            && stack_size < MIN_STACK_SIZE
        {
            return Err(DaemonError::invalid_configuration(format!(
                "stack_size must be at least {MIN_STACK_SIZE} bytes"
            )));
        }
        Ok(())
    }

    /// Create a configuration builder.
    #[must_use]
    pub fn builder() -> DaemonConfigBuilder {
        DaemonConfigBuilder::default()
    }
}

/// Builder for `DaemonConfig`.
#[derive(Debug, Default)]
pub struct DaemonConfigBuilder {
    config: DaemonConfig,
}

impl DaemonConfigBuilder {
    /// Set the registration capacity.
    #[must_use]
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.config.capacity = capacity;
        self
    }

    /// Set the daemon thread name.
    #[must_use]
    pub fn thread_name(mut self, name: impl Into<String>) -> Self {
        self.config.thread_name = name.into();
        self
    }

    /// Set the daemon thread stack size in bytes.
    #[must_use]
    pub fn stack_size(mut self, bytes: usize) -> Self {
        self.config.stack_size = Some(bytes);
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> DaemonResult<DaemonConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
