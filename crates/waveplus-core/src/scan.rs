//! Bounded-attempt discovery of a Wave Plus by serial number.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::advertisement::parse_serial_number;
use crate::error::{Error, Result};
use crate::traits::Transport;

/// Options for the discovery search.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Maximum number of full scan rounds before giving up.
    pub max_attempts: u32,
    /// Length of each scan window.
    pub attempt_window: Duration,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            max_attempts: 50,
            attempt_window: Duration::from_millis(100),
        }
    }
}

impl ScanOptions {
    /// Create new scan options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of scan rounds.
    #[must_use]
    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Set the per-attempt scan window.
    #[must_use]
    pub fn attempt_window(mut self, window: Duration) -> Self {
        self.attempt_window = window;
        self
    }
}

/// Find the advertising peripheral whose serial number matches `serial`.
///
/// Runs up to `max_attempts` scan rounds and returns the address of the
/// first peripheral whose manufacturer payload decodes to the requested
/// serial. Peripherals without a parseable Airthings payload never match.
///
/// # Errors
///
/// Returns [`Error::DeviceNotFound`] once the attempts are exhausted.
/// That is terminal for the current cycle; whether a later cycle searches
/// again is the caller's decision.
pub async fn find_device(
    transport: &dyn Transport,
    serial: u32,
    options: &ScanOptions,
) -> Result<String> {
    info!("searching for Wave Plus {serial}");

    for attempt in 1..=options.max_attempts {
        debug!("scan attempt {attempt}/{}", options.max_attempts);

        for advertisement in transport.scan(options.attempt_window).await? {
            if parse_serial_number(advertisement.manufacturer_data.as_deref()) == Some(serial) {
                info!(
                    "found {serial} at {} on attempt {attempt}",
                    advertisement.address
                );
                return Ok(advertisement.address);
            }
        }
    }

    warn!(
        "device {serial} not found after {} attempts",
        options.max_attempts
    );
    Err(Error::DeviceNotFound {
        serial,
        attempts: options.max_attempts,
    })
}
