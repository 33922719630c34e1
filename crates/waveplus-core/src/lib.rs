//! BLE pipeline for the Airthings Wave Plus air quality monitor.
//!
//! The crate covers the full reading cycle: discover the device by the
//! serial number it advertises, connect, read the current-values
//! characteristic, decode the telemetry frame and classify each sensor
//! into its severity band.
//!
//! # Example
//!
//! ```no_run
//! use waveplus_core::{BleTransport, WavePlus};
//!
//! # async fn run() -> waveplus_core::Result<()> {
//! let transport = BleTransport::new().await?;
//! let mut device = WavePlus::new(transport, 2930012345);
//!
//! let measurements = device.take_reading().await?;
//! for m in &measurements {
//!     println!("{}: {} [{}]", m.sensor, m, m.severity);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The [`Transport`] trait is the seam between the pipeline and the
//! wireless stack; [`mock::MockTransport`] runs the same pipeline
//! without hardware.

pub mod advertisement;
pub mod ble;
pub mod device;
pub mod error;
pub mod mock;
pub mod readings;
pub mod scan;
pub mod thresholds;
pub mod traits;

pub use advertisement::parse_serial_number;
pub use ble::BleTransport;
pub use device::WavePlus;
pub use error::{Error, Result};
pub use readings::{interpret, RADON_MAX_VALID};
pub use scan::{find_device, ScanOptions};
pub use thresholds::{classify, overall};
pub use traits::{Advertisement, Session, Transport};

// The shared data model, re-exported for convenience.
pub use waveplus_types::{
    Measurement, ParseError, RawFrame, Sensor, Severity, Value, FRAME_LEN, SENSOR_VERSION,
};
