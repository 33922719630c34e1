//! End-to-end reading cycles over the mock transport.

use waveplus_core::mock::MockTransport;
use waveplus_core::{Error, ScanOptions, Sensor, Severity, Value, WavePlus};

const SERIAL: u32 = 1234567890;
const ADDRESS: &str = "aa:bb:cc:dd:ee:ff";

#[tokio::test]
async fn full_cycle_discovers_reads_and_classifies() {
    let frame = MockTransport::frame_bytes(50, [96, 113, 2250, 49377, 854, 120]);
    let transport = MockTransport::new(SERIAL, ADDRESS)
        .visible_from_attempt(3)
        .with_frame(frame);
    let probe = transport.clone();
    let mut device = WavePlus::new(transport, SERIAL);

    let measurements = device.take_reading().await.unwrap();

    // Discovery took exactly the attempts the device needed to appear.
    assert_eq!(probe.scan_count(), 3);
    assert_eq!(device.address(), Some(ADDRESS));

    // Humidity register 50 converts to 25.0 %rH, an elevated reading.
    let humidity = &measurements[0];
    assert_eq!(humidity.sensor, Sensor::Humidity);
    assert_eq!(humidity.value, Value::Reading(25.0));
    assert_eq!(humidity.severity, Severity::Elevated);
    assert_eq!(humidity.to_string(), "25 %rH");

    // CO2 854 ppm sits in the elevated band, VOC 120 ppb is normal.
    assert_eq!(measurements[5].severity, Severity::Elevated);
    assert_eq!(measurements[6].severity, Severity::Normal);

    assert_eq!(probe.connect_count(), 1);
    assert_eq!(probe.disconnect_count(), 1);
}

#[tokio::test]
async fn short_frame_fails_cycle_but_releases_link() {
    let transport = MockTransport::new(SERIAL, ADDRESS).with_frame(vec![0u8; 19]);
    let probe = transport.clone();
    let mut device = WavePlus::new(transport, SERIAL);

    let err = device.take_reading().await.unwrap_err();

    assert!(matches!(err, Error::Parse(_)));
    assert!(!err.is_fatal());
    assert_eq!(probe.disconnect_count(), 1);
}

#[tokio::test]
async fn version_mismatch_is_fatal_and_releases_link() {
    let mut frame = MockTransport::frame_bytes(50, [96, 113, 2250, 49377, 854, 120]);
    frame[0] = 2;
    let transport = MockTransport::new(SERIAL, ADDRESS).with_frame(frame);
    let probe = transport.clone();
    let mut device = WavePlus::new(transport, SERIAL);

    let err = device.take_reading().await.unwrap_err();

    assert!(matches!(err, Error::UnsupportedVersion(2)));
    assert!(err.is_fatal());
    assert_eq!(probe.disconnect_count(), 1);
}

#[tokio::test]
async fn failed_connect_keeps_cached_address_and_opens_no_session() {
    let transport = MockTransport::new(SERIAL, ADDRESS).fail_connect();
    let probe = transport.clone();
    let mut device = WavePlus::new(transport, SERIAL);

    let err = device.take_reading().await.unwrap_err();

    assert!(matches!(err, Error::ConnectionFailed { .. }));
    // Nothing was opened, so there is nothing to release.
    assert_eq!(probe.read_count(), 0);
    assert_eq!(probe.disconnect_count(), 0);
    // A later cycle retries the connect without re-discovering.
    let scans = probe.scan_count();
    device.take_reading().await.unwrap_err();
    assert_eq!(probe.scan_count(), scans);
}

#[tokio::test]
async fn second_cycle_reuses_resolved_address() {
    let transport = MockTransport::new(SERIAL, ADDRESS);
    let probe = transport.clone();
    let mut device = WavePlus::new(transport, SERIAL);

    device.take_reading().await.unwrap();
    device.take_reading().await.unwrap();

    assert_eq!(probe.scan_count(), 1);
    assert_eq!(probe.connect_count(), 2);
    assert_eq!(probe.disconnect_count(), 2);
}

#[tokio::test]
async fn operator_supplied_address_never_scans() {
    let transport = MockTransport::new(SERIAL, ADDRESS);
    let probe = transport.clone();
    let mut device = WavePlus::new(transport, SERIAL).with_address(ADDRESS);

    device.take_reading().await.unwrap();

    assert_eq!(probe.scan_count(), 0);
}

#[tokio::test]
async fn absent_device_exhausts_bounded_attempts() {
    let transport = MockTransport::new(1111111111, ADDRESS);
    let probe = transport.clone();
    let mut device = WavePlus::new(transport, SERIAL)
        .with_scan_options(ScanOptions::default().max_attempts(4));

    let err = device.take_reading().await.unwrap_err();

    assert!(matches!(
        err,
        Error::DeviceNotFound {
            serial: SERIAL,
            attempts: 4
        }
    ));
    assert_eq!(probe.scan_count(), 4);
    assert_eq!(probe.connect_count(), 0);
    assert_eq!(device.address(), None);
}
