//! In-memory [`Transport`] for tests.
//!
//! Simulates one advertising Wave Plus: which serial it broadcasts, from
//! which scan attempt it becomes visible, what frame its current-values
//! characteristic returns, and whether connect/read fail. Clones share
//! the operation counters, so a pre-clone can probe a transport that was
//! moved into a [`crate::WavePlus`].

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use waveplus_types::uuids::{CURRENT_VALUES, MANUFACTURER_ID};
use waveplus_types::FRAME_LEN;

use crate::error::{Error, Result};
use crate::traits::{Advertisement, Session, Transport};

#[derive(Default)]
struct Counters {
    scans: AtomicU32,
    connects: AtomicU32,
    reads: AtomicU32,
    disconnects: AtomicU32,
}

/// Scriptable transport simulating a single advertising device.
#[derive(Clone)]
pub struct MockTransport {
    address: String,
    manufacturer_data: Option<Vec<u8>>,
    visible_from: u32,
    frame: Vec<u8>,
    fail_connect: bool,
    fail_read: bool,
    counters: Arc<Counters>,
}

impl MockTransport {
    /// A device advertising `serial` at `address`, visible immediately,
    /// answering reads with a plausible version-1 frame.
    pub fn new(serial: u32, address: &str) -> Self {
        let mut payload = MANUFACTURER_ID.to_le_bytes().to_vec();
        payload.extend_from_slice(&serial.to_le_bytes());

        Self {
            address: address.to_string(),
            manufacturer_data: Some(payload),
            visible_from: 1,
            frame: Self::frame_bytes(50, [96, 113, 2250, 49377, 854, 120]),
            fail_connect: false,
            fail_read: false,
            counters: Arc::new(Counters::default()),
        }
    }

    /// Keep the device invisible until the given scan attempt (1-based).
    #[must_use]
    pub fn visible_from_attempt(mut self, attempt: u32) -> Self {
        self.visible_from = attempt;
        self
    }

    /// Replace the advertised manufacturer payload verbatim.
    #[must_use]
    pub fn with_manufacturer_data(mut self, data: Option<Vec<u8>>) -> Self {
        self.manufacturer_data = data;
        self
    }

    /// Replace the bytes the current-values characteristic returns.
    #[must_use]
    pub fn with_frame(mut self, frame: Vec<u8>) -> Self {
        self.frame = frame;
        self
    }

    /// Make every connect attempt fail.
    #[must_use]
    pub fn fail_connect(mut self) -> Self {
        self.fail_connect = true;
        self
    }

    /// Make every characteristic read fail.
    #[must_use]
    pub fn fail_read(mut self) -> Self {
        self.fail_read = true;
        self
    }

    /// Encode a version-1 frame from a humidity register and the six
    /// meaningful words, reserved bytes zeroed.
    pub fn frame_bytes(humidity: u8, words: [u16; 6]) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(FRAME_LEN);
        bytes.extend_from_slice(&[1, humidity, 0, 0]);
        for word in words {
            bytes.extend_from_slice(&word.to_le_bytes());
        }
        bytes.extend_from_slice(&[0; 4]);
        bytes
    }

    /// Number of scan windows run so far.
    pub fn scan_count(&self) -> u32 {
        self.counters.scans.load(Ordering::SeqCst)
    }

    /// Number of connect attempts so far.
    pub fn connect_count(&self) -> u32 {
        self.counters.connects.load(Ordering::SeqCst)
    }

    /// Number of characteristic reads so far.
    pub fn read_count(&self) -> u32 {
        self.counters.reads.load(Ordering::SeqCst)
    }

    /// Number of disconnects so far.
    pub fn disconnect_count(&self) -> u32 {
        self.counters.disconnects.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn scan(&self, _window: Duration) -> Result<Vec<Advertisement>> {
        let attempt = self.counters.scans.fetch_add(1, Ordering::SeqCst) + 1;
        if attempt < self.visible_from {
            return Ok(Vec::new());
        }

        Ok(vec![Advertisement {
            address: self.address.clone(),
            manufacturer_data: self.manufacturer_data.clone(),
        }])
    }

    async fn connect(&self, address: &str) -> Result<Box<dyn Session>> {
        self.counters.connects.fetch_add(1, Ordering::SeqCst);

        if self.fail_connect {
            return Err(Error::connection_failed(address, "simulated failure"));
        }
        if address != self.address {
            return Err(Error::connection_failed(address, "unknown address"));
        }

        Ok(Box::new(MockSession {
            frame: self.frame.clone(),
            fail_read: self.fail_read,
            counters: Arc::clone(&self.counters),
        }))
    }
}

struct MockSession {
    frame: Vec<u8>,
    fail_read: bool,
    counters: Arc<Counters>,
}

#[async_trait]
impl Session for MockSession {
    async fn read_characteristic(&self, uuid: Uuid) -> Result<Vec<u8>> {
        self.counters.reads.fetch_add(1, Ordering::SeqCst);

        if self.fail_read {
            return Err(Error::timeout(
                format!("read characteristic {uuid}"),
                Duration::from_secs(10),
            ));
        }
        if uuid != CURRENT_VALUES {
            return Err(Error::characteristic_not_found(uuid.to_string(), 1));
        }

        Ok(self.frame.clone())
    }

    async fn disconnect(&self) -> Result<()> {
        self.counters.disconnects.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_bytes_layout() {
        let bytes = MockTransport::frame_bytes(50, [96, 113, 2250, 49377, 854, 120]);
        assert_eq!(bytes.len(), FRAME_LEN);
        assert_eq!(bytes[0], 1);
        assert_eq!(bytes[1], 50);
        // First word after the reserved pair, little-endian.
        assert_eq!(u16::from_le_bytes([bytes[4], bytes[5]]), 96);
    }

    #[tokio::test]
    async fn test_clones_share_counters() {
        let transport = MockTransport::new(1, "aa:bb:cc:dd:ee:ff");
        let probe = transport.clone();

        transport.scan(Duration::from_millis(1)).await.unwrap();

        assert_eq!(probe.scan_count(), 1);
    }

    #[tokio::test]
    async fn test_invisible_until_configured_attempt() {
        let transport = MockTransport::new(1, "aa:bb:cc:dd:ee:ff").visible_from_attempt(2);

        assert!(transport.scan(Duration::ZERO).await.unwrap().is_empty());
        assert_eq!(transport.scan(Duration::ZERO).await.unwrap().len(), 1);
    }
}
