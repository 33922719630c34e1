//! Error types for waveplus-core.
//!
//! None of these errors are retried inside the pipeline: each reading
//! cycle either fully succeeds or fails once, and the caller decides
//! whether to wait for the next interval. [`Error::UnsupportedVersion`]
//! stands apart as non-recoverable; a firmware/protocol mismatch will not
//! fix itself, so callers should treat it as terminal for the process.

use std::time::Duration;

use thiserror::Error;

use waveplus_types::SENSOR_VERSION;

/// Errors from the discovery/connect/decode pipeline.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error
/// variants in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Bluetooth Low Energy error.
    #[error("Bluetooth error: {0}")]
    Bluetooth(#[from] btleplug::Error),

    /// No Bluetooth adapter available.
    #[error("no Bluetooth adapter available")]
    NoAdapter,

    /// Discovery exhausted its scan attempts without a match.
    #[error("device with serial {serial} not found after {attempts} scan attempts")]
    DeviceNotFound {
        /// The serial number that was searched for.
        serial: u32,
        /// Number of scan rounds performed.
        attempts: u32,
    },

    /// The peripheral rejected or dropped the connection.
    #[error("connection to {address} failed: {reason}")]
    ConnectionFailed {
        /// Address of the peripheral.
        address: String,
        /// Description of the failure.
        reason: String,
    },

    /// Required BLE characteristic not found on the device.
    ///
    /// Usually means the resolved peripheral is not a Wave Plus, or runs
    /// firmware with a different layout.
    #[error("characteristic not found: {uuid} (searched {service_count} services)")]
    CharacteristicNotFound {
        /// The UUID that was not found.
        uuid: String,
        /// Number of services that were searched.
        service_count: usize,
    },

    /// The telemetry frame could not be decoded.
    #[error(transparent)]
    Parse(#[from] waveplus_types::ParseError),

    /// The device reports a payload layout this library does not understand.
    #[error("unsupported sensor version {0} (expected {SENSOR_VERSION})")]
    UnsupportedVersion(u8),

    /// Operation timed out.
    #[error("operation '{operation}' timed out after {duration:?}")]
    Timeout {
        /// The operation that timed out.
        operation: String,
        /// The timeout duration.
        duration: Duration,
    },
}

impl Error {
    /// Create a connection failure for `address`.
    pub fn connection_failed(address: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ConnectionFailed {
            address: address.into(),
            reason: reason.into(),
        }
    }

    /// Create a characteristic not found error.
    pub fn characteristic_not_found(uuid: impl Into<String>, service_count: usize) -> Self {
        Self::CharacteristicNotFound {
            uuid: uuid.into(),
            service_count,
        }
    }

    /// Create a timeout error with operation context.
    pub fn timeout(operation: impl Into<String>, duration: Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }

    /// Whether this error is terminal for the process rather than worth
    /// retrying on a later cycle.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::UnsupportedVersion(_))
    }
}

/// Result type alias using waveplus-core's Error type.
pub type Result<T> = std::result::Result<T, Error>;
