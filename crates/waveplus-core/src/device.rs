//! High-level Wave Plus client: discovery, one-shot reading cycles and
//! address caching.

use tracing::{debug, warn};

use waveplus_types::{uuids, Measurement, RawFrame};

use crate::error::Result;
use crate::readings;
use crate::scan::{self, ScanOptions};
use crate::traits::{Session, Transport};

/// A Wave Plus monitor identified by its 10-digit serial number.
///
/// The struct owns a [`Transport`] and remembers the address resolved by
/// the first successful discovery; later cycles connect straight to that
/// address. The cache is never invalidated, so a device that physically
/// moves out of range keeps failing at the connect step until the process
/// is restarted.
pub struct WavePlus<T: Transport> {
    serial: u32,
    address: Option<String>,
    transport: T,
    scan_options: ScanOptions,
}

impl<T: Transport> WavePlus<T> {
    /// Create a client for the device with the given serial number.
    pub fn new(transport: T, serial: u32) -> Self {
        Self {
            serial,
            address: None,
            transport,
            scan_options: ScanOptions::default(),
        }
    }

    /// Seed the address cache, skipping discovery entirely.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Replace the default discovery options.
    #[must_use]
    pub fn with_scan_options(mut self, options: ScanOptions) -> Self {
        self.scan_options = options;
        self
    }

    /// Serial number this client searches for.
    #[must_use]
    pub fn serial(&self) -> u32 {
        self.serial
    }

    /// Cached address, if discovery has succeeded (or one was supplied).
    #[must_use]
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// Run one full reading cycle: resolve, connect, read, interpret.
    ///
    /// The session opened by a successful connect is disconnected on
    /// every exit path before the result is returned, so at most one
    /// link is held at any time and never across cycles.
    ///
    /// # Errors
    ///
    /// Any stage can fail; see [`crate::Error`]. A failed cycle leaves
    /// the client ready for the next attempt, except that
    /// [`crate::Error::UnsupportedVersion`] and a discovery exhaustion
    /// should be treated as terminal by the caller.
    #[tracing::instrument(level = "debug", skip(self), fields(serial = self.serial))]
    pub async fn take_reading(&mut self) -> Result<Vec<Measurement>> {
        let address = self.resolve_address().await?.to_owned();

        let session = self.transport.connect(&address).await?;
        let result = read_measurements(session.as_ref()).await;

        // The link is released whether the read succeeded or not. A
        // failed disconnect is logged rather than masking the reading
        // outcome.
        if let Err(err) = session.disconnect().await {
            warn!("disconnect from {address} failed: {err}");
        }

        result
    }

    /// Return the cached address, running discovery to fill it first if
    /// this is the first cycle.
    async fn resolve_address(&mut self) -> Result<&str> {
        match &mut self.address {
            Some(address) => {
                debug!("reusing cached address");
                Ok(address)
            }
            slot @ None => {
                let address =
                    scan::find_device(&self.transport, self.serial, &self.scan_options).await?;
                Ok(slot.insert(address))
            }
        }
    }
}

/// Read and interpret the current-values characteristic over an open
/// session.
async fn read_measurements(session: &dyn Session) -> Result<Vec<Measurement>> {
    let data = session.read_characteristic(uuids::CURRENT_VALUES).await?;
    let frame = RawFrame::from_bytes(&data)?;
    readings::interpret(&frame)
}
