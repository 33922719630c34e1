//! Bluetooth identifiers for the Airthings Wave Plus.

use uuid::{Uuid, uuid};

/// Current sensor values characteristic.
///
/// A single read of this characteristic returns the 20-byte telemetry
/// frame decoded by [`crate::RawFrame`].
pub const CURRENT_VALUES: Uuid = uuid!("b42e2a68-ade7-11e4-89d3-123b93f75cba");

/// Airthings company identifier used in BLE manufacturer advertisements.
///
/// Stored little-endian as the first two bytes of the manufacturer payload.
pub const MANUFACTURER_ID: u16 = 0x0334;
