//! Register definitions for the XV7011
//!
//! The XV7011 exposes a small 7-bit register space over SPI. The first byte of
//! every transaction carries the register address in bits 6:0 and the access
//! direction in bit 7 (set for reads, clear for writes).
//!
//! Fixed-width control registers are modelled as typed [`regiface`] registers.
//! The two data ports ([`Address::TemperatureRead`] and
//! [`Address::AngularRateRead`]) return a format-dependent number of bytes and
//! are accessed through the raw multi-byte read instead.

mod control;
mod status;

pub use control::*;
pub use status::*;

/// Bit 7 of the address byte selects a read access
pub const READ_BIT: u8 = 0x80;

/// Valid bits of a register address
pub const ADDRESS_MASK: u8 = 0x7F;

/// Byte clocked out while the device shifts register data back
pub const DUMMY_BYTE: u8 = 0x00;

/// Named register addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Address {
    /// Status register
    Status = 0x04,
    /// Sleep-out command register
    SleepOut = 0x06,
    /// Temperature data port
    TemperatureRead = 0x08,
    /// Angular-rate data port
    AngularRateRead = 0x0A,
    /// Angular-rate output control (`OUTCTL1`)
    OutputControl1 = 0x0B,
    /// Temperature data format (`TsDataFormat`)
    TemperatureFormat = 0x1C,
}

impl From<Address> for u8 {
    fn from(address: Address) -> Self {
        address as u8
    }
}

/// First byte of a read transaction for `address`.
#[must_use]
pub const fn read_command(address: u8) -> u8 {
    (address & ADDRESS_MASK) | READ_BIT
}

/// First byte of a write transaction for `address`.
#[must_use]
pub const fn write_command(address: u8) -> u8 {
    address & ADDRESS_MASK
}
