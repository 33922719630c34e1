//! Core measurement types for the Wave Plus.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One of the seven quantities the Wave Plus measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Sensor {
    /// Relative humidity.
    Humidity,
    /// Radon concentration, short-term (24h) average.
    RadonShortTermAvg,
    /// Radon concentration, long-term average.
    RadonLongTermAvg,
    /// Air temperature.
    Temperature,
    /// Relative atmospheric pressure.
    Pressure,
    /// CO2 concentration.
    Co2,
    /// Total volatile organic compounds.
    Voc,
}

impl Sensor {
    /// All sensors, in the fixed order used for rendering.
    ///
    /// Consumers rely on this order for tabular and delimited output;
    /// [`crate::Measurement`] collections are always produced in it.
    pub const ALL: [Sensor; 7] = [
        Sensor::Humidity,
        Sensor::RadonShortTermAvg,
        Sensor::RadonLongTermAvg,
        Sensor::Temperature,
        Sensor::Pressure,
        Sensor::Co2,
        Sensor::Voc,
    ];

    /// Unit string reported alongside the converted value.
    #[must_use]
    pub const fn unit(&self) -> &'static str {
        match self {
            Sensor::Humidity => "%rH",
            Sensor::RadonShortTermAvg | Sensor::RadonLongTermAvg => "Bq/m3",
            Sensor::Temperature => "degC",
            Sensor::Pressure => "hPa",
            Sensor::Co2 => "ppm",
            Sensor::Voc => "ppb",
        }
    }

    /// Human-readable column label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Sensor::Humidity => "Humidity",
            Sensor::RadonShortTermAvg => "Radon ST avg",
            Sensor::RadonLongTermAvg => "Radon LT avg",
            Sensor::Temperature => "Temperature",
            Sensor::Pressure => "Pressure",
            Sensor::Co2 => "CO2 level",
            Sensor::Voc => "VOC level",
        }
    }
}

impl fmt::Display for Sensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A converted reading, or the explicit "not available" sentinel.
///
/// Radon registers outside their valid window are reported as
/// [`Value::NotAvailable`], never coerced to zero or dropped. Numeric
/// comparisons belong on the inner value, not on the wrapper.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Value {
    /// A valid converted reading.
    Reading(f64),
    /// No valid value; rendered as the literal text `N/A`.
    NotAvailable,
}

impl Value {
    /// The inner reading, if one is available.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Reading(v) => Some(*v),
            Value::NotAvailable => None,
        }
    }

    /// Whether a valid reading is present.
    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self, Value::Reading(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Reading(v) => write!(f, "{v}"),
            Value::NotAvailable => write!(f, "N/A"),
        }
    }
}

/// Health/comfort band for a measurement.
///
/// # Ordering
///
/// Bands are ordered by concern, so `max` over a set of bands yields the
/// worst one. [`Severity::BelowComfort`] is informational (temperature
/// only, "too cold") rather than a step toward critical, and
/// [`Severity::NotApplicable`] covers pressure and unavailable radon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Severity {
    /// Not classified.
    NotApplicable,
    /// Below the comfort range (temperature only).
    BelowComfort,
    /// Within the healthy/comfortable range.
    Normal,
    /// Elevated; worth attention.
    Elevated,
    /// Outside the healthy range. For temperature this means "too hot",
    /// not a safety emergency.
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::NotApplicable => write!(f, "n/a"),
            Severity::BelowComfort => write!(f, "Below comfort"),
            Severity::Normal => write!(f, "Normal"),
            Severity::Elevated => write!(f, "Elevated"),
            Severity::Critical => write!(f, "Critical"),
        }
    }
}

/// One converted measurement from a reading cycle.
///
/// Created fresh per cycle and never mutated afterwards. Display renders
/// `"<value> <unit>"`, with `N/A` standing in for the sentinel.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Measurement {
    /// Which quantity this is.
    pub sensor: Sensor,
    /// Converted value or the "not available" sentinel.
    pub value: Value,
    /// Band the value falls in.
    pub severity: Severity,
}

impl Measurement {
    /// Unit string for this measurement's sensor.
    #[must_use]
    pub const fn unit(&self) -> &'static str {
        self.sensor.unit()
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.sensor.unit())
    }
}
