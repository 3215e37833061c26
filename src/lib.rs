#![no_std]
//! XV7011 Gyroscope Driver
//!
//! This crate provides an `embedded-hal` driver for the Epson XV7011 single-axis
//! MEMS gyroscope on an SPI bus.
//!
//! # Features
//! - Angular-rate output in 16-bit (280 LSB/(°/s)) or 24-bit
//!   (71680 LSB/(°/s)) words
//! - Temperature output in 8-bit, 10-bit or 12-bit words
//! - Best-effort combined reading of both measurements
//! - Heading integration with bias calibration
//!
//! # Architecture
//! The driver is organized into several modules, leaves first:
//!
//! - [`transport`]: chip-select framed byte exchange
//!   - [`Transport`] trait used by everything above it
//!   - [`SpiTransport`] over an `embedded-hal` SPI bus, CS pin and delay
//!
//! - [`interface`]: register access on top of a transport
//!   - Read/write framing of the address byte
//!   - Single and sequential multi-byte reads
//!
//! - [`registers`]: register map and typed control registers
//!
//! - [`decode`]: pure conversion of raw output words to °C and °/s
//!
//! - [`device`]: the [`Device`] controller (initialization and measurements)
//!
//! - [`integrator`]: heading accumulation from rate samples
//!
//! # Usage
//! 1. Build a [`SpiTransport`] from your SPI bus, chip-select pin and delay
//! 2. Create a [`Device`], optionally with a [`Config`]
//! 3. Call [`Device::initialize`]
//! 4. Poll [`Device::read_all`] or the individual reads
//!
//! # Important Notes
//! - All access is blocking; one transaction is in flight at a time
//! - [`Device::read_angular_rate`] may write `OUTCTL1` to select rate output
//! - No internal retries are performed; bus errors are returned to the caller
//!
//! # Example
//! ```no_run
//! use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiBus};
//! use xv7011::{Device, SpiTransport};
//!
//! fn run<SPI, CS, D>(spi: SPI, cs: CS, bus_delay: D, delay: &mut impl DelayNs)
//! where
//!     SPI: SpiBus,
//!     CS: OutputPin,
//!     D: DelayNs,
//! {
//!     let mut device = Device::new(SpiTransport::new(spi, cs, bus_delay));
//!     if device.initialize(delay, 0.0).is_err() {
//!         return;
//!     }
//!
//!     let reading = device.read_all();
//!     let _ = (reading.angular_rate, reading.temperature);
//! }
//! ```

pub mod config;
pub mod decode;
pub mod device;
pub mod integrator;
pub mod interface;
pub mod registers;
pub mod transport;

pub use config::{Config, OutputSetup};
pub use decode::{RateFormat, TemperatureFormat};
pub use device::{AngularRateSample, Device, DeviceReading, DeviceState, TemperatureSample};
pub use integrator::{AngleIntegrator, NonMonotonicTimestamp};
pub use interface::RegisterInterface;
pub use transport::{SpiTransport, Transport, TransportError};

/// Driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Transport-level transfer failure (including bus timeouts)
    BusFault(E),
    /// Empty destination buffer or zero sample count
    InvalidArgument,
    /// Integration step timestamp precedes the previous sample
    NonMonotonicTimestamp,
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Self::BusFault(error)
    }
}

impl<E: core::fmt::Debug> core::fmt::Display for Error<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::BusFault(e) => write!(f, "bus fault: {e:?}"),
            Self::InvalidArgument => f.write_str("invalid argument"),
            Self::NonMonotonicTimestamp => f.write_str("timestamp earlier than previous sample"),
        }
    }
}
