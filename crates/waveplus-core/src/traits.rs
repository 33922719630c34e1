//! Transport abstraction over the BLE stack.
//!
//! The pipeline only needs four wireless operations: scan for advertising
//! peripherals, connect to an address, read a characteristic, disconnect.
//! Putting them behind traits lets the same pipeline run against
//! [`crate::ble::BleTransport`] on real hardware and
//! [`crate::mock::MockTransport`] in tests.

use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;

/// A peripheral observed during a scan window.
#[derive(Debug, Clone)]
pub struct Advertisement {
    /// Broadcast address (MAC address on Linux/Windows, a CoreBluetooth
    /// UUID on macOS).
    pub address: String,
    /// Raw manufacturer-specific payload, company identifier included.
    /// `None` when the peripheral advertises no manufacturer data.
    pub manufacturer_data: Option<Vec<u8>>,
}

/// Scan-and-connect capability of the underlying wireless stack.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Take a snapshot of currently advertising peripherals.
    ///
    /// Blocks for the duration of `window` and returns whatever was seen
    /// advertising during it.
    async fn scan(&self, window: Duration) -> Result<Vec<Advertisement>>;

    /// Open a session to the peripheral at `address`.
    async fn connect(&self, address: &str) -> Result<Box<dyn Session>>;
}

/// An open peripheral session.
///
/// A session lives for one reading cycle: it is consumed by a single
/// characteristic read and must be released with [`Session::disconnect`]
/// on every exit path, including failures.
#[async_trait]
pub trait Session: Send + Sync {
    /// Read the current value of the characteristic identified by `uuid`.
    async fn read_characteristic(&self, uuid: Uuid) -> Result<Vec<u8>>;

    /// Release the session. Safe to call when the link already dropped.
    async fn disconnect(&self) -> Result<()>;
}
