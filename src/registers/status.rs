//! Status register

use core::convert::Infallible;

use bitflags::bitflags;
use regiface::{register, FromByteArray, ReadableRegister};

use crate::decode::RateFormat;

bitflags! {
    /// Status register flags
    ///
    /// Only the bits the driver interprets are named; the rest are retained
    /// as read.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StatusFlags: u8 {
        /// Angular-rate data is being output as 24-bit words
        const RATE_24BIT = 1 << 2;
    }
}

/// Status register (address: 0x04)
#[register(0x04u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister)]
pub struct Status {
    /// Raw status flags
    pub flags: StatusFlags,
}

impl Status {
    /// Angular-rate width reported by the status register.
    #[must_use]
    pub fn rate_format(&self) -> RateFormat {
        if self.flags.contains(StatusFlags::RATE_24BIT) {
            RateFormat::Bits24
        } else {
            RateFormat::Bits16
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Status {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Status {{ flags: {=u8:#x} }}", self.flags.bits())
    }
}

impl FromByteArray for Status {
    type Error = Infallible;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self {
            flags: StatusFlags::from_bits_retain(bytes[0]),
        })
    }
}
