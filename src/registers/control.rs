//! Output control registers
//!
//! These registers select what the data ports return and in which width.
//! Reserved bits are carried through unchanged so that a read-modify-write
//! never disturbs them.

use core::convert::Infallible;

use regiface::{register, FromByteArray, ReadableRegister, ToByteArray, WritableRegister};

use crate::decode::{RateFormat, TemperatureFormat};

/// `OUTCTL1` mode value selecting angular-rate output
pub const MODE_ANGULAR_RATE: u8 = 0b01;

const MODE_MASK: u8 = 0x03;
const WIDTH_SHIFT: u8 = 2;
const WIDTH_MASK: u8 = 1 << WIDTH_SHIFT;

const TEMP_FORMAT_SHIFT: u8 = 5;
const TEMP_FORMAT_MASK: u8 = 0x03 << TEMP_FORMAT_SHIFT;

/// Sleep-out register (address: 0x06)
///
/// Writing any value takes the device out of sleep mode. The reference
/// sequence writes 0x00 and then waits for the oscillator to settle before
/// reading data.
#[register(0x06u8)]
#[derive(Debug, Clone, Copy, Default, WritableRegister)]
pub struct SleepOut;

/// Angular-rate output control register `OUTCTL1` (address: 0x0B)
///
/// - Bits 1:0: output mode (`01` = angular rate)
/// - Bit 2: data width (0 = 16-bit, 1 = 24-bit)
/// - Bits 7:3: reserved, preserved on write
#[register(0x0Bu8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutputControl {
    /// Output mode bits 1:0
    pub mode: u8,
    /// Width of the angular-rate word
    pub rate_format: RateFormat,
    /// Reserved bits 7:3 as read from the device
    pub reserved: u8,
}

impl OutputControl {
    /// Angular-rate output in the given width, reserved bits clear.
    #[must_use]
    pub const fn angular_rate(rate_format: RateFormat) -> Self {
        Self {
            mode: MODE_ANGULAR_RATE,
            rate_format,
            reserved: 0,
        }
    }

    /// Decodes the raw register byte.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self {
            mode: bits & MODE_MASK,
            rate_format: RateFormat::from_bit(bits >> WIDTH_SHIFT),
            reserved: bits & !(MODE_MASK | WIDTH_MASK),
        }
    }

    /// Encodes the register byte.
    #[must_use]
    pub const fn bits(self) -> u8 {
        (self.reserved & !(MODE_MASK | WIDTH_MASK))
            | ((self.rate_format as u8) << WIDTH_SHIFT)
            | (self.mode & MODE_MASK)
    }

    /// Whether the data port currently returns angular rate.
    #[must_use]
    pub const fn is_angular_rate(self) -> bool {
        self.mode == MODE_ANGULAR_RATE
    }

    /// Same register with the mode bits switched to angular rate.
    #[must_use]
    pub const fn with_angular_rate(self) -> Self {
        Self {
            mode: MODE_ANGULAR_RATE,
            ..self
        }
    }
}

/// Temperature data format register `TsDataFormat` (address: 0x1C)
///
/// - Bits 6:5: temperature width (`00` = 8-bit, `01` = 10-bit, `10` = 12-bit)
/// - Other bits: reserved, preserved on write
#[register(0x1Cu8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TemperatureFormatControl {
    /// Raw 2-bit format code; `0b11` is reserved
    pub code: u8,
    /// Bits outside 6:5 as read from the device
    pub reserved: u8,
}

impl TemperatureFormatControl {
    /// Decodes the raw register byte.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self {
            code: (bits & TEMP_FORMAT_MASK) >> TEMP_FORMAT_SHIFT,
            reserved: bits & !TEMP_FORMAT_MASK,
        }
    }

    /// Encodes the register byte.
    #[must_use]
    pub const fn bits(self) -> u8 {
        (self.reserved & !TEMP_FORMAT_MASK) | ((self.code << TEMP_FORMAT_SHIFT) & TEMP_FORMAT_MASK)
    }

    /// Active temperature format.
    #[must_use]
    pub const fn format(self) -> TemperatureFormat {
        TemperatureFormat::from_code(self.code)
    }

    /// Same register with the format bits replaced.
    #[must_use]
    pub const fn with_format(self, format: TemperatureFormat) -> Self {
        Self {
            code: format.code(),
            ..self
        }
    }
}

impl ToByteArray for SleepOut {
    type Error = Infallible;
    type Array = [u8; 1];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([0x00])
    }
}

impl FromByteArray for OutputControl {
    type Error = Infallible;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self::from_bits(bytes[0]))
    }
}

impl ToByteArray for OutputControl {
    type Error = Infallible;
    type Array = [u8; 1];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([self.bits()])
    }
}

impl FromByteArray for TemperatureFormatControl {
    type Error = Infallible;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self::from_bits(bytes[0]))
    }
}

impl ToByteArray for TemperatureFormatControl {
    type Error = Infallible;
    type Array = [u8; 1];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([self.bits()])
    }
}
