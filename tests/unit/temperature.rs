//! Unit tests for temperature reads

use crate::common::{assert_float_eq, create_mock_device, MockError, Phase};
use xv7011::{Error, TemperatureFormat};

#[test]
fn test_temperature_default_twelve_bit() {
    let (mut device, transport) = create_mock_device();

    // 12-bit code 400 is the +25 °C reference
    transport.set_temperature_bytes(&[0x19, 0x00]);
    assert_float_eq(device.read_temperature().unwrap(), 25.0, 1e-4);

    // 432 -> 25 + 32/16 = 27 °C
    transport.set_temperature_bytes(&[0x1B, 0x00]);
    assert_float_eq(device.read_temperature().unwrap(), 27.0, 1e-4);
}

#[test]
fn test_temperature_twelve_bit_negative_code() {
    let (mut device, transport) = create_mock_device();

    // 0xFF0 -> -16 -> (-16 - 400) / 16 + 25 = -1 °C
    transport.set_temperature_bytes(&[0xFF, 0x00]);
    let sample = device.read_temperature_sample().unwrap();
    assert_eq!(sample.raw, -16);
    assert_eq!(sample.format, TemperatureFormat::Bits12);
    assert_float_eq(sample.celsius, -1.0, 1e-4);
}

#[test]
fn test_temperature_ten_bit() {
    let (mut device, transport) = create_mock_device();
    transport.set_register(0x1C, 0x20);

    // 10-bit code 108 = 0b00_0110_1100 -> bytes 0x1B, 0x00
    transport.set_temperature_bytes(&[0x1B, 0x00]);
    let sample = device.read_temperature_sample().unwrap();
    assert_eq!(sample.format, TemperatureFormat::Bits10);
    assert_eq!(sample.raw, 108);
    assert_float_eq(sample.celsius, 27.0, 1e-4);
}

#[test]
fn test_temperature_eight_bit_reads_one_byte() {
    let (mut device, transport) = create_mock_device();
    transport.set_register(0x1C, 0x00);
    transport.set_temperature_bytes(&[0xF6, 0xFF]);

    let sample = device.read_temperature_sample().unwrap();
    assert_eq!(sample.format, TemperatureFormat::Bits8);
    assert_eq!(sample.raw, -10);
    assert_eq!(sample.celsius, -10.0);

    // format register read, then the data port with a single dummy phase
    let phases = transport.phases();
    let data_phases: Vec<_> = phases
        .iter()
        .skip_while(|phase| {
            !matches!(phase, Phase::Transfer { tx, .. } if tx[..] == [0x88])
        })
        .collect();
    assert_eq!(data_phases.len(), 3, "address, one dummy, deselect: {phases:?}");
}

#[test]
fn test_temperature_reserved_format_decodes_as_twelve_bit() {
    let (mut device, transport) = create_mock_device();
    transport.set_register(0x1C, 0x60);
    transport.set_temperature_bytes(&[0x19, 0x00]);

    let sample = device.read_temperature_sample().unwrap();
    assert_eq!(sample.format, TemperatureFormat::Bits12);
    assert_float_eq(sample.celsius, 25.0, 1e-4);
}

#[test]
fn test_temperature_bus_fault_is_propagated() {
    let (mut device, transport) = create_mock_device();
    transport.fail_reads_of(0x08);

    assert_eq!(device.read_temperature(), Err(Error::BusFault(MockError)));
    assert!(!transport.is_selected());
}

#[test]
fn test_temperature_read_issues_no_writes() {
    let (mut device, transport) = create_mock_device();
    device.read_temperature().unwrap();
    assert!(transport.writes().is_empty());
    assert_eq!(transport.transaction_count(), 2);
}
