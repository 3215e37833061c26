//! Output data formats and conversion to physical units
//!
//! The XV7011 streams its temperature and angular-rate words MSB first, in one
//! of several widths selected through the control registers. Everything in this
//! module is pure: given the active format and the bytes clocked out of the
//! device it produces the sign-extended raw value and the physical quantity.
//!
//! Angular rate is not clamped to the nominal ±100 °/s measurement range.
//! Saturation, if wanted, is left to the caller.

/// Temperature reading reported by the device when it is at +25 °C, in °C.
pub const REFERENCE_TEMPERATURE_C: f32 = 25.0;

/// Temperature output width, selected by bits 6:5 of `TsDataFormat` (0x1C)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TemperatureFormat {
    /// 8-bit output, 1 LSB/°C
    Bits8 = 0b00,
    /// 10-bit output, 4 LSB/°C
    Bits10 = 0b01,
    /// 12-bit output, 16 LSB/°C (power-on default)
    #[default]
    Bits12 = 0b10,
}

impl TemperatureFormat {
    /// Interprets a 2-bit format code.
    ///
    /// Code `0b11` is reserved; it is treated as 12-bit like the device default.
    #[must_use]
    pub const fn from_code(code: u8) -> Self {
        match code & 0x03 {
            0b00 => Self::Bits8,
            0b01 => Self::Bits10,
            _ => Self::Bits12,
        }
    }

    /// The 2-bit code written to the format register.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Number of bytes clocked out by a temperature read in this format.
    #[must_use]
    pub const fn byte_count(self) -> usize {
        match self {
            Self::Bits8 => 1,
            Self::Bits10 | Self::Bits12 => 2,
        }
    }

    /// Output code at +25 °C.
    #[must_use]
    pub const fn offset(self) -> i16 {
        match self {
            Self::Bits8 => 25,
            Self::Bits10 => 100,
            Self::Bits12 => 400,
        }
    }

    /// Sensitivity in LSB/°C.
    #[must_use]
    pub const fn coefficient(self) -> f32 {
        match self {
            Self::Bits8 => 1.0,
            Self::Bits10 => 4.0,
            Self::Bits12 => 16.0,
        }
    }
}

/// Angular-rate output width, selected by bit 2 of `OUTCTL1` (0x0B)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RateFormat {
    /// 16-bit output, 280 LSB/(°/s) (power-on default)
    #[default]
    Bits16 = 0,
    /// 24-bit output, 71680 LSB/(°/s)
    Bits24 = 1,
}

impl RateFormat {
    /// Interprets the width bit (bit 0 of `bit`).
    #[must_use]
    pub const fn from_bit(bit: u8) -> Self {
        if bit & 0x01 == 0 {
            Self::Bits16
        } else {
            Self::Bits24
        }
    }

    /// Number of bytes clocked out by an angular-rate read in this format.
    #[must_use]
    pub const fn byte_count(self) -> usize {
        match self {
            Self::Bits16 => 2,
            Self::Bits24 => 3,
        }
    }

    /// Scale factor in LSB/(°/s).
    #[must_use]
    pub const fn scale(self) -> f32 {
        match self {
            Self::Bits16 => 280.0,
            Self::Bits24 => 71680.0,
        }
    }
}

/// Extracts the signed temperature code from the bytes of a temperature read.
///
/// Only the first [`TemperatureFormat::byte_count`] bytes are used.
#[must_use]
pub const fn temperature_raw(format: TemperatureFormat, bytes: [u8; 2]) -> i16 {
    match format {
        TemperatureFormat::Bits8 => bytes[0] as i8 as i16,
        TemperatureFormat::Bits10 => {
            let mut raw = ((bytes[0] as u16) << 2) | ((bytes[1] as u16) >> 6);
            if raw & 0x0200 != 0 {
                raw |= 0xFC00;
            }
            raw as i16
        }
        TemperatureFormat::Bits12 => {
            let mut raw = ((bytes[0] as u16) << 4) | ((bytes[1] as u16) >> 4);
            if raw & 0x0800 != 0 {
                raw |= 0xF000;
            }
            raw as i16
        }
    }
}

/// Converts a signed temperature code to °C.
#[must_use]
pub fn temperature_celsius(format: TemperatureFormat, raw: i16) -> f32 {
    (f32::from(raw) - f32::from(format.offset())) / format.coefficient() + REFERENCE_TEMPERATURE_C
}

/// Extracts the signed angular-rate code from the bytes of a rate read.
///
/// Only the first [`RateFormat::byte_count`] bytes are used.
#[must_use]
pub const fn angular_rate_raw(format: RateFormat, bytes: [u8; 3]) -> i32 {
    match format {
        RateFormat::Bits16 => i16::from_be_bytes([bytes[0], bytes[1]]) as i32,
        RateFormat::Bits24 => {
            let mut raw = ((bytes[0] as u32) << 16) | ((bytes[1] as u32) << 8) | bytes[2] as u32;
            if raw & 0x0080_0000 != 0 {
                raw |= 0xFF00_0000;
            }
            raw as i32
        }
    }
}

/// Converts a signed angular-rate code to °/s.
#[must_use]
pub fn angular_rate_dps(format: RateFormat, raw: i32) -> f32 {
    raw as f32 / format.scale()
}
