//! Integration tests for a typical initialize / poll / integrate session

use crate::common::{assert_float_eq, create_mock_device, MockDelay, MockTransport};
use xv7011::{
    Config, Device, DeviceState, OutputSetup, RateFormat, TemperatureFormat,
};

#[test]
fn test_initialize_with_reset_defaults() {
    let (mut device, transport) = create_mock_device();
    assert_eq!(device.state(), DeviceState::Uninitialized);

    let mut delay = MockDelay::default();
    device.initialize(&mut delay, 3.0).unwrap();

    assert_eq!(device.state(), DeviceState::Ready);
    assert_eq!(device.integrator().angle(), 0.0);
    assert_eq!(device.integrator().bias(), 0.0);
    assert_eq!(device.integrator().last_time(), 3.0);
    assert_eq!(delay.total_ms(), 60);
    // reset defaults: nothing is written
    assert!(transport.phases().is_empty());
}

#[test]
fn test_reinitialize_resets_integrator() {
    let (mut device, transport) = create_mock_device();
    let mut delay = MockDelay::default();
    device.initialize(&mut delay, 0.0).unwrap();

    transport.set_rate_bytes(&[0x01, 0x18]);
    device.integrator_mut().set_bias(0.5);
    device.update_angle(2.0).unwrap();
    assert_float_eq(device.integrator().angle(), 1.0, 1e-5);

    device.initialize(&mut delay, 10.0).unwrap();
    assert_eq!(device.integrator().angle(), 0.0);
    assert_eq!(device.integrator().bias(), 0.0);
    assert_eq!(device.integrator().last_time(), 10.0);
}

#[test]
fn test_initialize_with_explicit_setup() {
    let transport = MockTransport::new();
    transport.set_register(0x1C, 0b1000_0011);
    let config = Config::default().with_setup(OutputSetup {
        rate_format: RateFormat::Bits24,
        temperature_format: TemperatureFormat::Bits10,
    });
    let mut device = Device::with_config(transport.clone(), config);

    device.initialize(&mut MockDelay::default(), 0.0).unwrap();

    assert_eq!(
        transport.writes(),
        vec![(0x06, 0x00), (0x0B, 0x05), (0x1C, 0b1010_0011)]
    );
    assert_eq!(device.rate_format().unwrap(), RateFormat::Bits24);
    assert_eq!(device.temperature_format().unwrap(), TemperatureFormat::Bits10);
}

#[test]
fn test_poll_and_integrate_heading() {
    let (mut device, transport) = create_mock_device();
    device.initialize(&mut MockDelay::default(), 0.0).unwrap();

    // 10 °/s for 0.5 s, then 10 °/s for another 1.5 s
    transport.set_rate_bytes(&[0x0A, 0xF0]);
    device.update_angle(0.5).unwrap();
    let angle = device.update_angle(2.0).unwrap();
    assert_float_eq(angle, 20.0, 1e-3);

    // -5 °/s for 1 s
    transport.set_rate_bytes(&[0xFA, 0x88]);
    let angle = device.update_angle(3.0).unwrap();
    assert_float_eq(angle, 15.0, 1e-3);
}

#[test]
fn test_calibrated_bias_cancels_drift() {
    let (mut device, transport) = create_mock_device();
    let mut delay = MockDelay::default();
    device.initialize(&mut delay, 0.0).unwrap();

    // stationary with a 0.5 °/s offset
    transport.set_rate_bytes(&[0x00, 0x8C]);
    let bias = device.calibrate_bias(&mut delay, 16, 5).unwrap();
    assert_float_eq(bias, 0.5, 1e-5);
    assert_float_eq(device.integrator().bias(), 0.5, 1e-5);

    let angle = device.update_angle(100.0).unwrap();
    assert_float_eq(angle, 0.0, 1e-3);
}

#[test]
fn test_switch_formats_at_runtime() {
    let (mut device, transport) = create_mock_device();
    device.initialize(&mut MockDelay::default(), 0.0).unwrap();

    device.set_rate_format(RateFormat::Bits24).unwrap();
    device.set_temperature_format(TemperatureFormat::Bits8).unwrap();
    transport.set_register(0x04, 0x04);
    transport.set_rate_bytes(&[0x02, 0x30, 0x00]);
    transport.set_temperature_bytes(&[0x1E]);

    let reading = device.read_all();
    assert_eq!(reading.rate_format, RateFormat::Bits24);
    assert_eq!(reading.temperature_format, TemperatureFormat::Bits8);
    assert_float_eq(reading.angular_rate, 2.0, 1e-5);
    assert_eq!(reading.temperature, 30.0);

    let status = device.read_status().unwrap();
    assert_eq!(status.rate_format(), RateFormat::Bits24);

    let transport = device.release();
    assert_eq!(transport.register(0x0B), 0x05);
    assert_eq!(transport.register(0x1C), 0x00);
}
