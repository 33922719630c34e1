//! Register interpretation: raw frame to typed measurements.

use waveplus_types::{Measurement, RawFrame, Sensor, Value, SENSOR_VERSION};

use crate::error::{Error, Result};
use crate::thresholds;

/// Largest register value the radon sensors report as a valid reading.
/// Values above it flag an invalid or not-yet-available measurement.
pub const RADON_MAX_VALID: u16 = 16383;

/// Convert a decoded frame into the seven measurements, in the fixed
/// [`Sensor::ALL`] order.
///
/// The version byte is checked before any register is touched; registers
/// must not be interpreted under an unrecognized layout.
///
/// # Errors
///
/// Returns [`Error::UnsupportedVersion`] when the frame does not carry
/// the [`SENSOR_VERSION`] layout. This is a firmware/protocol mismatch,
/// not a transient condition, and should not be retried.
pub fn interpret(frame: &RawFrame) -> Result<Vec<Measurement>> {
    if frame.version != SENSOR_VERSION {
        return Err(Error::UnsupportedVersion(frame.version));
    }

    Ok(Sensor::ALL
        .iter()
        .map(|&sensor| {
            let value = convert(sensor, frame);
            Measurement {
                sensor,
                value,
                severity: thresholds::classify(sensor, value),
            }
        })
        .collect())
}

/// Register-to-physical-value conversion for one sensor.
fn convert(sensor: Sensor, frame: &RawFrame) -> Value {
    match sensor {
        Sensor::Humidity => Value::Reading(f64::from(frame.humidity) / 2.0),
        Sensor::RadonShortTermAvg => radon(frame.radon_short),
        Sensor::RadonLongTermAvg => radon(frame.radon_long),
        Sensor::Temperature => Value::Reading(f64::from(frame.temperature) / 100.0),
        Sensor::Pressure => Value::Reading(f64::from(frame.pressure) / 50.0),
        Sensor::Co2 => Value::Reading(f64::from(frame.co2)),
        Sensor::Voc => Value::Reading(f64::from(frame.voc)),
    }
}

fn radon(raw: u16) -> Value {
    if raw <= RADON_MAX_VALID {
        Value::Reading(f64::from(raw))
    } else {
        Value::NotAvailable
    }
}
