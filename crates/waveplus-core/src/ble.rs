//! btleplug-backed transport.
//!
//! Implements [`Transport`] and [`Session`] over the system Bluetooth
//! adapter. Scans are bounded start/sleep/stop windows; connect and read
//! are wrapped in timeouts so a wedged BLE stack cannot hang a cycle
//! forever.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use btleplug::api::{Central, Manager as _, Peripheral as _, ScanFilter};
use btleplug::platform::{Adapter, Manager, Peripheral};
use tokio::time::{sleep, timeout};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::traits::{Advertisement, Session, Transport};
use waveplus_types::uuids::MANUFACTURER_ID;

/// Default timeout for establishing a BLE connection.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);

/// Default timeout for service discovery after connection.
const DISCOVERY_TIMEOUT: Duration = Duration::from_secs(10);

/// Default timeout for characteristic reads.
const READ_TIMEOUT: Duration = Duration::from_secs(10);

/// Scan window used when connecting to an address the adapter has not
/// seen advertise yet (e.g. an operator-supplied address).
const WARMUP_SCAN_WINDOW: Duration = Duration::from_secs(2);

/// [`Transport`] implementation over the first available system adapter.
pub struct BleTransport {
    adapter: Adapter,
}

impl BleTransport {
    /// Acquire the first available Bluetooth adapter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoAdapter`] if the host has none, or a
    /// [`Error::Bluetooth`] if the stack cannot be reached.
    pub async fn new() -> Result<Self> {
        let manager = Manager::new().await?;
        let adapters = manager.adapters().await?;
        let adapter = adapters.into_iter().next().ok_or(Error::NoAdapter)?;
        Ok(Self { adapter })
    }

    /// Find a peripheral the adapter already knows by address.
    async fn known_peripheral(&self, address: &str) -> Result<Option<Peripheral>> {
        let wanted = normalize_address(address);
        for peripheral in self.adapter.peripherals().await? {
            if let Ok(Some(props)) = peripheral.properties().await {
                if normalize_address(&props.address.to_string()) == wanted {
                    return Ok(Some(peripheral));
                }
            }
        }
        Ok(None)
    }
}

#[async_trait]
impl Transport for BleTransport {
    async fn scan(&self, window: Duration) -> Result<Vec<Advertisement>> {
        self.adapter.start_scan(ScanFilter::default()).await?;
        sleep(window).await;
        self.adapter.stop_scan().await?;

        let mut seen = Vec::new();
        for peripheral in self.adapter.peripherals().await? {
            let props = match peripheral.properties().await {
                Ok(Some(props)) => props,
                _ => continue,
            };
            seen.push(Advertisement {
                address: props.address.to_string(),
                manufacturer_data: manufacturer_payload(&props.manufacturer_data),
            });
        }
        debug!("scan window done, {} peripheral(s) visible", seen.len());
        Ok(seen)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn connect(&self, address: &str) -> Result<Box<dyn Session>> {
        // An operator-supplied address may not be in the adapter cache
        // yet; one short scan warms it up.
        let peripheral = match self.known_peripheral(address).await? {
            Some(peripheral) => peripheral,
            None => {
                debug!("address not in adapter cache, scanning before connect");
                self.adapter.start_scan(ScanFilter::default()).await?;
                sleep(WARMUP_SCAN_WINDOW).await;
                self.adapter.stop_scan().await?;
                self.known_peripheral(address).await?.ok_or_else(|| {
                    Error::connection_failed(address, "peripheral not advertising")
                })?
            }
        };

        timeout(CONNECT_TIMEOUT, peripheral.connect())
            .await
            .map_err(|_| Error::timeout("connect to device", CONNECT_TIMEOUT))??;

        timeout(DISCOVERY_TIMEOUT, peripheral.discover_services())
            .await
            .map_err(|_| Error::timeout("discover services", DISCOVERY_TIMEOUT))??;

        info!("connected to {address}");
        Ok(Box::new(BleSession { peripheral }))
    }
}

/// [`Session`] over a connected btleplug peripheral.
struct BleSession {
    peripheral: Peripheral,
}

#[async_trait]
impl Session for BleSession {
    async fn read_characteristic(&self, uuid: Uuid) -> Result<Vec<u8>> {
        let services = self.peripheral.services();
        let characteristic = services
            .iter()
            .flat_map(|service| service.characteristics.iter())
            .find(|c| c.uuid == uuid)
            .cloned()
            .ok_or_else(|| Error::characteristic_not_found(uuid.to_string(), services.len()))?;

        let data = timeout(READ_TIMEOUT, self.peripheral.read(&characteristic))
            .await
            .map_err(|_| Error::timeout(format!("read characteristic {uuid}"), READ_TIMEOUT))??;
        Ok(data)
    }

    async fn disconnect(&self) -> Result<()> {
        self.peripheral.disconnect().await?;
        debug!("disconnected");
        Ok(())
    }
}

/// Reassemble the raw manufacturer payload, company identifier included.
///
/// btleplug splits the payload into a map keyed by company identifier;
/// the identity-parsing rule works on the wire form, so the two id bytes
/// are prepended again. Prefers the Airthings entry when a peripheral
/// advertises under several identifiers.
fn manufacturer_payload(data: &HashMap<u16, Vec<u8>>) -> Option<Vec<u8>> {
    let (id, payload) = data
        .get_key_value(&MANUFACTURER_ID)
        .or_else(|| data.iter().next())?;

    let mut raw = Vec::with_capacity(2 + payload.len());
    raw.extend_from_slice(&id.to_le_bytes());
    raw.extend_from_slice(payload);
    Some(raw)
}

fn normalize_address(address: &str) -> String {
    address.replace(':', "").to_lowercase()
}
