//! Register access over a [`Transport`]
//!
//! Every access is a single chip-select framed transaction:
//!
//! - write: `[address & 0x7F, value]`
//! - read: `[(address & 0x7F) | 0x80]` followed by one dummy byte per data
//!   byte, each clocked as its own one-byte phase
//!
//! Releasing chip-select between the address phase and the data phases
//! desynchronizes the device, so the phases are never split across
//! transactions.

use core::convert::Infallible;

use regiface::{ByteArray, FromByteArray, ReadableRegister, ToByteArray, WritableRegister};

use crate::registers::{read_command, write_command, DUMMY_BYTE};
use crate::transport::Transport;
use crate::Error;

/// Register-level access to the XV7011
pub struct RegisterInterface<T> {
    transport: T,
}

impl<T> RegisterInterface<T> {
    /// Wraps a transport.
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Consumes the interface and returns the transport.
    pub fn release(self) -> T {
        self.transport
    }
}

impl<T> RegisterInterface<T>
where
    T: Transport,
{
    /// Writes one register.
    ///
    /// # Errors
    /// * `Error::BusFault` - the transport failed
    pub fn write_register(&mut self, address: u8, value: u8) -> Result<(), Error<T::Error>> {
        let mut discard = [0u8; 2];
        self.transport
            .transceive(&[write_command(address), value], &mut discard)
            .map_err(Error::BusFault)
    }

    /// Reads one register.
    ///
    /// # Errors
    /// * `Error::BusFault` - the transport failed
    pub fn read_register(&mut self, address: u8) -> Result<u8, Error<T::Error>> {
        let mut value = [0u8; 1];
        self.read_register_multi(address, &mut value)?;
        Ok(value[0])
    }

    /// Reads `buf.len()` consecutive bytes starting at `address`.
    ///
    /// One address phase is followed by one dummy-byte phase per output byte.
    /// On a transport error the remaining phases are skipped; bytes captured
    /// before the failure are left in `buf`.
    ///
    /// # Errors
    /// * `Error::InvalidArgument` - `buf` is empty; nothing is sent
    /// * `Error::BusFault` - the transport failed
    pub fn read_register_multi(
        &mut self,
        address: u8,
        buf: &mut [u8],
    ) -> Result<(), Error<T::Error>> {
        if buf.is_empty() {
            return Err(Error::InvalidArgument);
        }

        self.transport
            .transaction(|bus| {
                let mut discard = [0u8; 1];
                bus.transfer(&[read_command(address)], &mut discard)?;

                for byte in buf.iter_mut() {
                    bus.transfer(&[DUMMY_BYTE], core::slice::from_mut(byte))?;
                }
                Ok(())
            })
            .map_err(Error::BusFault)
    }

    /// Reads a typed register.
    ///
    /// # Errors
    /// * `Error::BusFault` - the transport failed
    pub fn read<R>(&mut self) -> Result<R, Error<T::Error>>
    where
        R: ReadableRegister<IdType = u8> + FromByteArray<Error = Infallible>,
    {
        let mut raw_value = R::Array::new();
        self.read_register_multi(R::id(), raw_value.as_mut())?;

        match R::from_bytes(raw_value) {
            Ok(register) => Ok(register),
            Err(never) => match never {},
        }
    }

    /// Writes a typed single-byte register.
    ///
    /// # Errors
    /// * `Error::BusFault` - the transport failed
    pub fn write<R>(&mut self, register: R) -> Result<(), Error<T::Error>>
    where
        R: WritableRegister<IdType = u8> + ToByteArray<Error = Infallible, Array = [u8; 1]>,
    {
        let [value] = match register.to_bytes() {
            Ok(raw_value) => raw_value,
            Err(never) => match never {},
        };
        self.write_register(R::id(), value)
    }
}
