//! Unit tests for the SPI bus + chip-select transport

use std::cell::RefCell;
use std::rc::Rc;

use crate::common::mock_spi::{BusEvent, EventLog, MockBus, MockBusDelay, MockPin, MockSpiError};
use xv7011::transport::DEFAULT_SETTLE_NS;
use xv7011::{Error, RegisterInterface, SpiTransport, Transport, TransportError};

fn transport(
    log: &EventLog,
    response: &[u8],
    fail: bool,
) -> SpiTransport<MockBus, MockPin, MockBusDelay> {
    SpiTransport::new(
        MockBus {
            log: log.clone(),
            response: response.to_vec(),
            fail,
        },
        MockPin { log: log.clone() },
        MockBusDelay { log: log.clone() },
    )
}

#[test]
fn test_transceive_brackets_transfer_with_chip_select() {
    let log: EventLog = Rc::new(RefCell::new(Vec::new()));
    let mut transport = transport(&log, &[0xAB, 0xCD], false);

    let mut rx = [0u8; 2];
    transport.transceive(&[0x0B, 0x01], &mut rx).unwrap();
    assert_eq!(rx, [0xAB, 0xCD]);

    assert_eq!(
        *log.borrow(),
        vec![
            BusEvent::CsLow,
            BusEvent::Delay(DEFAULT_SETTLE_NS),
            BusEvent::Transfer(vec![0x0B, 0x01]),
            BusEvent::Flush,
            BusEvent::Delay(DEFAULT_SETTLE_NS),
            BusEvent::CsHigh,
        ]
    );
}

#[test]
fn test_empty_transceive_leaves_chip_select_alone() {
    let log: EventLog = Rc::new(RefCell::new(Vec::new()));
    let mut transport = transport(&log, &[], false);

    transport.transceive(&[], &mut []).unwrap();
    assert!(log.borrow().is_empty());
}

#[test]
#[should_panic(expected = "transceive buffers differ in length")]
fn test_transceive_rejects_unequal_buffers() {
    let log: EventLog = Rc::new(RefCell::new(Vec::new()));
    let mut transport = transport(&log, &[], false);

    let _ = transport.transceive(&[0x0B, 0x01], &mut [0u8; 1]);
}

#[test]
fn test_settle_time_is_configurable() {
    let log: EventLog = Rc::new(RefCell::new(Vec::new()));
    let mut transport = transport(&log, &[], false).with_settle_ns(250);

    transport.transceive(&[0x00], &mut [0u8; 1]).unwrap();
    let delays: Vec<_> = log
        .borrow()
        .iter()
        .filter(|event| matches!(event, BusEvent::Delay(_)))
        .cloned()
        .collect();
    assert_eq!(delays, vec![BusEvent::Delay(250), BusEvent::Delay(250)]);
}

#[test]
fn test_register_read_keeps_chip_select_low_across_phases() {
    let log: EventLog = Rc::new(RefCell::new(Vec::new()));
    let mut interface = RegisterInterface::new(transport(&log, &[0x42], false));

    assert_eq!(interface.read_register(0x1C).unwrap(), 0x42);

    let events = log.borrow();
    let lows = events.iter().filter(|e| **e == BusEvent::CsLow).count();
    let highs = events.iter().filter(|e| **e == BusEvent::CsHigh).count();
    assert_eq!((lows, highs), (1, 1));
    assert_eq!(events[2], BusEvent::Transfer(vec![0x9C]));
    assert_eq!(events[3], BusEvent::Transfer(vec![0x00]));
}

#[test]
fn test_spi_failure_still_releases_chip_select() {
    let log: EventLog = Rc::new(RefCell::new(Vec::new()));
    let mut interface = RegisterInterface::new(transport(&log, &[], true));

    let result = interface.write_register(0x0B, 0x01);
    assert_eq!(result, Err(Error::BusFault(TransportError::Spi(MockSpiError))));
    assert_eq!(log.borrow().last(), Some(&BusEvent::CsHigh));
}
