//! Severity classification against fixed health/comfort bands.
//!
//! Thresholds are per-sensor constants evaluated on the *converted*
//! value, so a humidity register of 50 is classified as 25.0 %rH.

use waveplus_types::{Measurement, Sensor, Severity, Value};

// Humidity bands in %rH. Critical below this or at/above the high bound;
// elevated in the fringes next to both.
const HUMIDITY_CRITICAL_LOW: f64 = 25.0;
const HUMIDITY_ELEVATED_LOW_END: f64 = 30.0;
const HUMIDITY_ELEVATED_HIGH: f64 = 60.0;
const HUMIDITY_CRITICAL_HIGH: f64 = 70.0;

// Radon bands in Bq/m3, shared by both averages.
const RADON_ELEVATED: f64 = 100.0;
const RADON_CRITICAL: f64 = 150.0;

// Temperature bands in degC. "Critical" means too hot; below the comfort
// bound is informational only.
const TEMPERATURE_HOT: f64 = 25.0;
const TEMPERATURE_COMFORT_LOW: f64 = 18.0;

// CO2 bands in ppm.
const CO2_ELEVATED: f64 = 800.0;
const CO2_CRITICAL: f64 = 1000.0;

// VOC bands in ppb.
const VOC_ELEVATED: f64 = 250.0;
const VOC_CRITICAL: f64 = 2000.0;

/// Sensors counted in the overall roll-up. Pressure carries no band and
/// a too-cold room is informational, so neither can raise the overall.
const ALERT_SENSORS: [Sensor; 5] = [
    Sensor::Humidity,
    Sensor::RadonShortTermAvg,
    Sensor::RadonLongTermAvg,
    Sensor::Co2,
    Sensor::Voc,
];

/// Classify a converted value into its severity band.
///
/// Pressure is never classified, and the "not available" sentinel stays
/// unclassified regardless of sensor.
#[must_use]
pub fn classify(sensor: Sensor, value: Value) -> Severity {
    let v = match value {
        Value::Reading(v) => v,
        Value::NotAvailable => return Severity::NotApplicable,
    };

    match sensor {
        Sensor::Humidity => {
            if !(HUMIDITY_CRITICAL_LOW..HUMIDITY_CRITICAL_HIGH).contains(&v) {
                Severity::Critical
            } else if (HUMIDITY_ELEVATED_HIGH..HUMIDITY_CRITICAL_HIGH).contains(&v)
                || (HUMIDITY_CRITICAL_LOW..HUMIDITY_ELEVATED_LOW_END).contains(&v)
            {
                Severity::Elevated
            } else {
                Severity::Normal
            }
        }
        Sensor::RadonShortTermAvg | Sensor::RadonLongTermAvg => {
            if v >= RADON_CRITICAL {
                Severity::Critical
            } else if v >= RADON_ELEVATED {
                Severity::Elevated
            } else {
                Severity::Normal
            }
        }
        Sensor::Temperature => {
            if v >= TEMPERATURE_HOT {
                Severity::Critical
            } else if v < TEMPERATURE_COMFORT_LOW {
                Severity::BelowComfort
            } else {
                Severity::Normal
            }
        }
        Sensor::Pressure => Severity::NotApplicable,
        Sensor::Co2 => {
            if v >= CO2_CRITICAL {
                Severity::Critical
            } else if v >= CO2_ELEVATED {
                Severity::Elevated
            } else {
                Severity::Normal
            }
        }
        Sensor::Voc => {
            if v >= VOC_CRITICAL {
                Severity::Critical
            } else if v >= VOC_ELEVATED {
                Severity::Elevated
            } else {
                Severity::Normal
            }
        }
    }
}

/// Worst band among the alerting sensors, for the statusbar roll-up.
#[must_use]
pub fn overall(measurements: &[Measurement]) -> Severity {
    measurements
        .iter()
        .filter(|m| ALERT_SENSORS.contains(&m.sensor))
        .map(|m| m.severity)
        .max()
        .unwrap_or(Severity::NotApplicable)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn humidity(v: f64) -> Severity {
        classify(Sensor::Humidity, Value::Reading(v))
    }

    #[test]
    fn test_humidity_bands_are_boundary_exact() {
        assert_eq!(humidity(24.9), Severity::Critical);
        assert_eq!(humidity(25.0), Severity::Elevated);
        assert_eq!(humidity(29.9), Severity::Elevated);
        assert_eq!(humidity(30.0), Severity::Normal);
        assert_eq!(humidity(59.9), Severity::Normal);
        assert_eq!(humidity(60.0), Severity::Elevated);
        assert_eq!(humidity(69.9), Severity::Elevated);
        assert_eq!(humidity(70.0), Severity::Critical);
    }

    #[test]
    fn test_radon_bands() {
        for sensor in [Sensor::RadonShortTermAvg, Sensor::RadonLongTermAvg] {
            assert_eq!(classify(sensor, Value::Reading(99.0)), Severity::Normal);
            assert_eq!(classify(sensor, Value::Reading(100.0)), Severity::Elevated);
            assert_eq!(classify(sensor, Value::Reading(149.0)), Severity::Elevated);
            assert_eq!(classify(sensor, Value::Reading(150.0)), Severity::Critical);
            assert_eq!(
                classify(sensor, Value::NotAvailable),
                Severity::NotApplicable
            );
        }
    }

    #[test]
    fn test_temperature_bands() {
        let temp = |v| classify(Sensor::Temperature, Value::Reading(v));
        assert_eq!(temp(17.9), Severity::BelowComfort);
        assert_eq!(temp(18.0), Severity::Normal);
        assert_eq!(temp(24.9), Severity::Normal);
        assert_eq!(temp(25.0), Severity::Critical);
    }

    #[test]
    fn test_co2_bands() {
        let co2 = |v| classify(Sensor::Co2, Value::Reading(v));
        assert_eq!(co2(799.0), Severity::Normal);
        assert_eq!(co2(800.0), Severity::Elevated);
        assert_eq!(co2(999.0), Severity::Elevated);
        assert_eq!(co2(1000.0), Severity::Critical);
    }

    #[test]
    fn test_voc_bands() {
        let voc = |v| classify(Sensor::Voc, Value::Reading(v));
        assert_eq!(voc(249.0), Severity::Normal);
        assert_eq!(voc(250.0), Severity::Elevated);
        assert_eq!(voc(1999.0), Severity::Elevated);
        assert_eq!(voc(2000.0), Severity::Critical);
    }

    #[test]
    fn test_pressure_is_never_classified() {
        assert_eq!(
            classify(Sensor::Pressure, Value::Reading(1013.0)),
            Severity::NotApplicable
        );
    }

    fn measurement(sensor: Sensor, severity: Severity) -> Measurement {
        Measurement {
            sensor,
            value: Value::Reading(0.0),
            severity,
        }
    }

    #[test]
    fn test_overall_picks_worst_alerting_band() {
        let measurements = [
            measurement(Sensor::Humidity, Severity::Normal),
            measurement(Sensor::Co2, Severity::Elevated),
            measurement(Sensor::Voc, Severity::Normal),
        ];
        assert_eq!(overall(&measurements), Severity::Elevated);
    }

    #[test]
    fn test_overall_ignores_temperature_and_pressure() {
        // A hot room and an unclassified pressure must not raise the
        // roll-up above the alerting sensors.
        let measurements = [
            measurement(Sensor::Humidity, Severity::Normal),
            measurement(Sensor::Temperature, Severity::Critical),
            measurement(Sensor::Pressure, Severity::NotApplicable),
            measurement(Sensor::Co2, Severity::Normal),
        ];
        assert_eq!(overall(&measurements), Severity::Normal);
    }

    #[test]
    fn test_overall_on_empty_input() {
        assert_eq!(overall(&[]), Severity::NotApplicable);
    }
}
