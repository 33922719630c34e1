//! `waveplus` binary: poll an Airthings Wave Plus on a fixed cadence.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use waveplus_core::{BleTransport, Error, ScanOptions, WavePlus};

mod format;

#[derive(Parser)]
#[command(name = "waveplus")]
#[command(author, version, about = "Poll an Airthings Wave Plus air quality monitor", long_about = None)]
struct Cli {
    /// 10-digit serial number printed under the device
    #[arg(value_parser = parse_serial)]
    serial_number: u32,

    /// Device address; skips discovery by serial number
    #[arg(short, long, env = "WAVEPLUS_ADDRESS")]
    address: Option<String>,

    /// Seconds between readings
    #[arg(short = 'p', long, default_value_t = 300, value_parser = clap::value_parser!(u64).range(1..))]
    sample_period: u64,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Table)]
    format: Format,

    /// Maximum scan rounds when discovering the device
    #[arg(long, default_value_t = 50)]
    max_scan_attempts: u32,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// One table per reading
    Table,
    /// Header line, then one CSV row per reading
    Csv,
    /// Single compact line for a desktop statusbar, then exit
    Statusbar,
}

/// The serial number is exactly 10 decimal digits, as printed on the
/// device label.
fn parse_serial(s: &str) -> std::result::Result<u32, String> {
    if s.len() != 10 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err("serial number must be exactly 10 decimal digits".to_string());
    }
    s.parse::<u32>()
        .map_err(|_| "serial number out of range".to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // When quiet mode is enabled, suppress info-level logging
    let filter = if cli.quiet {
        EnvFilter::new("warn")
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let transport = BleTransport::new()
        .await
        .context("failed to access the Bluetooth stack")?;

    let mut device = WavePlus::new(transport, cli.serial_number)
        .with_scan_options(ScanOptions::default().max_attempts(cli.max_scan_attempts));
    if let Some(address) = cli.address {
        device = device.with_address(address);
    }

    // Statusbar callers (i3status, polybar) want one line and a prompt
    // exit; the periodic loop is for the other formats.
    if cli.format == Format::Statusbar {
        let measurements = device.take_reading().await?;
        println!("{}", format::render_statusbar(&measurements));
        return Ok(());
    }

    if cli.format == Format::Csv {
        println!("{}", format::csv_header());
    }

    let period = Duration::from_secs(cli.sample_period);
    loop {
        match device.take_reading().await {
            Ok(measurements) => {
                let rendered = match cli.format {
                    Format::Table => format::render_table(&measurements),
                    Format::Csv => format::render_csv(&measurements),
                    Format::Statusbar => unreachable!("handled before the loop"),
                };
                println!("{rendered}");
            }
            // A firmware the decoder does not understand will not fix
            // itself; neither will a device that never advertised.
            Err(err @ Error::UnsupportedVersion(_)) => {
                return Err(err).context("device firmware is not supported");
            }
            Err(err @ Error::DeviceNotFound { .. }) => {
                return Err(err).context("device not found; check the serial number and range");
            }
            Err(err) => {
                tracing::error!("reading cycle failed: {err}");
            }
        }

        tokio::time::sleep(period).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_serial_accepts_ten_digits() {
        assert_eq!(parse_serial("1234567890"), Ok(1234567890));
        assert_eq!(parse_serial("0000000001"), Ok(1));
    }

    #[test]
    fn test_parse_serial_rejects_bad_input() {
        assert!(parse_serial("123456789").is_err());
        assert!(parse_serial("12345678901").is_err());
        assert!(parse_serial("12345abcde").is_err());
        // Ten digits but past the 32-bit range of real serials.
        assert!(parse_serial("9999999999").is_err());
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["waveplus", "1234567890"]);
        assert_eq!(cli.sample_period, 300);
        assert_eq!(cli.format, Format::Table);
        assert_eq!(cli.max_scan_attempts, 50);
        assert!(cli.address.is_none());
    }

    #[test]
    fn test_zero_sample_period_rejected() {
        let result = Cli::try_parse_from(["waveplus", "1234567890", "--sample-period", "0"]);
        assert!(result.is_err());
    }
}
