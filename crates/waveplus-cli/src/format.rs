//! Output renderers for reading cycles: table, CSV and statusbar.

use owo_colors::OwoColorize;
use tabled::builder::Builder;
use tabled::settings::Style;

use waveplus_core::thresholds;
use waveplus_types::{Measurement, Sensor, Severity};

/// Render one cycle as a table, one row per sensor.
pub fn render_table(measurements: &[Measurement]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Sensor", "Reading", "Severity"]);
    for m in measurements {
        builder.push_record([m.sensor.label().to_string(), m.to_string(), severity_cell(m)]);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}

/// Severity column text, colored by band.
fn severity_cell(m: &Measurement) -> String {
    let text = m.severity.to_string();
    match m.severity {
        Severity::Critical => text.red().to_string(),
        Severity::Elevated => text.yellow().to_string(),
        Severity::Normal => text.green().to_string(),
        Severity::BelowComfort => text.blue().to_string(),
        Severity::NotApplicable => text.dimmed().to_string(),
    }
}

/// CSV header line, printed once before the row stream.
pub fn csv_header() -> String {
    Sensor::ALL
        .iter()
        .map(|s| s.label())
        .collect::<Vec<_>>()
        .join(",")
}

/// One cycle as a CSV row of `"<value> <unit>"` cells.
pub fn render_csv(measurements: &[Measurement]) -> String {
    measurements
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Single compact line for a desktop statusbar: worst-band indicator
/// followed by every reading. Plain text, no colors.
pub fn render_statusbar(measurements: &[Measurement]) -> String {
    let indicator = match thresholds::overall(measurements) {
        Severity::Critical => "\u{1F534}",           // red circle
        Severity::Elevated => "\u{1F7E1}",           // yellow circle
        _ => "\u{1F7E2}",                            // green circle
    };

    let readings = measurements
        .iter()
        .map(|m| format!("{}: {}", m.sensor.label(), m))
        .collect::<Vec<_>>()
        .join(" | ");

    format!("{indicator} {readings}")
}

#[cfg(test)]
mod tests {
    use super::*;

    use waveplus_core::interpret;
    use waveplus_core::mock::MockTransport;
    use waveplus_types::RawFrame;

    fn measurements(humidity: u8, words: [u16; 6]) -> Vec<Measurement> {
        let bytes = MockTransport::frame_bytes(humidity, words);
        let frame = RawFrame::from_bytes(&bytes).unwrap();
        interpret(&frame).unwrap()
    }

    #[test]
    fn test_table_lists_every_sensor() {
        let table = render_table(&measurements(50, [96, 113, 2250, 49377, 854, 120]));

        for label in ["Humidity", "Radon ST avg", "Radon LT avg", "Temperature", "Pressure", "CO2 level", "VOC level"] {
            assert!(table.contains(label), "missing {label} in:\n{table}");
        }
        assert!(table.contains("25 %rH"));
        assert!(table.contains("987.54 hPa"));
    }

    #[test]
    fn test_csv_header_matches_row_arity() {
        let row = render_csv(&measurements(50, [96, 113, 2250, 49377, 854, 120]));

        assert_eq!(
            csv_header().split(',').count(),
            row.split(',').count()
        );
        assert!(row.starts_with("25 %rH,96 Bq/m3,"));
    }

    #[test]
    fn test_csv_renders_radon_sentinel() {
        let row = render_csv(&measurements(50, [65535, 113, 2250, 49377, 854, 120]));
        assert!(row.contains("N/A Bq/m3"));
    }

    #[test]
    fn test_statusbar_reflects_overall_band() {
        // CO2 854 ppm puts the overall at elevated.
        let line = render_statusbar(&measurements(80, [96, 113, 2250, 49377, 854, 120]));
        assert!(line.starts_with('\u{1F7E1}'));
        assert!(line.contains("CO2 level: 854 ppm"));

        // Everything in the normal bands.
        let line = render_statusbar(&measurements(80, [50, 50, 2250, 49377, 500, 100]));
        assert!(line.starts_with('\u{1F7E2}'));

        // Critical radon dominates.
        let line = render_statusbar(&measurements(80, [200, 50, 2250, 49377, 500, 100]));
        assert!(line.starts_with('\u{1F534}'));
    }
}
