//! Manufacturer advertisement parsing.
//!
//! The Wave Plus broadcasts its serial number in the manufacturer-specific
//! advertisement payload, which lets us identify a particular unit without
//! connecting to every peripheral in range.

use waveplus_types::uuids::MANUFACTURER_ID;

/// Smallest payload that can carry a company identifier and serial number.
const MIN_PAYLOAD_LEN: usize = 6;

/// Extract the serial number from a manufacturer advertisement payload.
///
/// The first two bytes are a little-endian company identifier; only when
/// it equals the Airthings code ([`MANUFACTURER_ID`]) do bytes 2..=5 hold
/// a little-endian 32-bit serial number. Any other company code, a
/// missing payload, or a truncated payload yields `None` ("unknown
/// identity") and never matches a real serial number.
#[must_use]
pub fn parse_serial_number(payload: Option<&[u8]>) -> Option<u32> {
    let payload = payload?;
    if payload.len() < MIN_PAYLOAD_LEN {
        return None;
    }

    let company = u16::from_le_bytes([payload[0], payload[1]]);
    if company != MANUFACTURER_ID {
        return None;
    }

    Some(u32::from_le_bytes([
        payload[2], payload[3], payload[4], payload[5],
    ]))
}
