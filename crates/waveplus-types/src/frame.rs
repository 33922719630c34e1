//! Raw telemetry frame decoding.

use bytes::Buf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Exact size of the current-values frame in bytes.
pub const FRAME_LEN: usize = 20;

/// Payload layout version this library understands.
pub const SENSOR_VERSION: u8 = 1;

/// Raw register values decoded from the 20-byte current-values frame.
///
/// The wire layout is little-endian: one version byte, the raw humidity
/// byte, two reserved bytes, then eight unsigned 16-bit words. The first
/// six words carry the radon short-term average, radon long-term average,
/// temperature, pressure, CO2 and VOC registers; the trailing two words
/// are reserved.
///
/// Decoding performs no semantic validation. The version byte is checked
/// during interpretation, so a frame with an unknown version still decodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawFrame {
    /// Payload layout version reported by the device.
    pub version: u8,
    /// Humidity register (half-percent steps).
    pub humidity: u8,
    /// Radon short-term average register.
    pub radon_short: u16,
    /// Radon long-term average register.
    pub radon_long: u16,
    /// Temperature register (centidegrees Celsius).
    pub temperature: u16,
    /// Pressure register (fiftieths of hPa).
    pub pressure: u16,
    /// CO2 register (ppm).
    pub co2: u16,
    /// VOC register (ppb).
    pub voc: u16,
}

impl RawFrame {
    /// Decode a frame from the raw characteristic value.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidLength`] unless `data` is exactly
    /// [`FRAME_LEN`] (20) bytes.
    #[must_use = "parsing returns a Result that should be handled"]
    pub fn from_bytes(data: &[u8]) -> Result<Self, ParseError> {
        if data.len() != FRAME_LEN {
            return Err(ParseError::InvalidLength {
                expected: FRAME_LEN,
                actual: data.len(),
            });
        }

        let mut buf = data;
        let version = buf.get_u8();
        let humidity = buf.get_u8();
        let _reserved = buf.get_u16_le();
        let radon_short = buf.get_u16_le();
        let radon_long = buf.get_u16_le();
        let temperature = buf.get_u16_le();
        let pressure = buf.get_u16_le();
        let co2 = buf.get_u16_le();
        let voc = buf.get_u16_le();
        // Two trailing reserved words are ignored.

        Ok(RawFrame {
            version,
            humidity,
            radon_short,
            radon_long,
            temperature,
            pressure,
            co2,
            voc,
        })
    }
}
