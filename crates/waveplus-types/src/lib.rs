//! Platform-agnostic types for the Airthings Wave Plus air quality monitor.
//!
//! This crate provides the data model shared by the BLE pipeline
//! (waveplus-core) and the CLI renderers:
//!
//! - Raw telemetry frame decoding ([`RawFrame`])
//! - Sensor identity, converted values and severity bands
//! - BLE UUID and manufacturer-ID constants
//! - Error types for frame parsing
//!
//! # Example
//!
//! ```
//! use waveplus_types::{RawFrame, Sensor, FRAME_LEN};
//!
//! let mut bytes = [0u8; FRAME_LEN];
//! bytes[0] = 1; // version
//! bytes[1] = 50; // humidity register
//! let frame = RawFrame::from_bytes(&bytes).unwrap();
//! assert_eq!(frame.humidity, 50);
//! assert_eq!(Sensor::Humidity.unit(), "%rH");
//! ```

pub mod error;
pub mod frame;
pub mod types;
pub mod uuid;

pub use error::{ParseError, ParseResult};
pub use frame::{RawFrame, FRAME_LEN, SENSOR_VERSION};
pub use types::{Measurement, Sensor, Severity, Value};
pub use uuid as uuids;
