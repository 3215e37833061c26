//! Chip-select framed byte transport
//!
//! The XV7011 expects every register access to happen under a single
//! chip-select assertion: the address phase and all data phases must be
//! clocked before NSS is released, otherwise the device silently drops out of
//! sync with the host.
//!
//! [`Transport`] is the seam the rest of the driver is written against. It
//! exposes the three primitive steps (select, transfer, deselect) and builds
//! the framed [`transaction`](Transport::transaction) and single-shot
//! [`transceive`](Transport::transceive) operations on top of them.
//!
//! [`SpiTransport`] implements it over an `embedded-hal` [`SpiBus`], a
//! chip-select [`OutputPin`] and a [`DelayNs`] used for setup/hold timing.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

/// Default chip-select setup and hold time in nanoseconds.
pub const DEFAULT_SETTLE_NS: u32 = 100;

/// Byte exchange with an explicit chip-select line.
pub trait Transport {
    /// Error reported by the underlying bus or pin.
    type Error;

    /// Asserts chip-select (drives it low).
    fn select(&mut self) -> Result<(), Self::Error>;

    /// Clocks out `tx` while capturing the same number of bytes into `rx`.
    ///
    /// Must only be called between [`select`](Transport::select) and
    /// [`deselect`](Transport::deselect).
    fn transfer(&mut self, tx: &[u8], rx: &mut [u8]) -> Result<(), Self::Error>;

    /// Releases chip-select (drives it high).
    fn deselect(&mut self) -> Result<(), Self::Error>;

    /// Runs `phases` under a single chip-select assertion.
    ///
    /// Chip-select is released whether or not `phases` succeeds. An error from
    /// `phases` takes precedence over an error releasing the line.
    fn transaction<R, F>(&mut self, phases: F) -> Result<R, Self::Error>
    where
        Self: Sized,
        F: FnOnce(&mut Self) -> Result<R, Self::Error>,
    {
        self.select()?;
        let result = phases(self);
        let released = self.deselect();
        let value = result?;
        released?;
        Ok(value)
    }

    /// Exchanges `tx` for `rx` as one complete transaction.
    ///
    /// Both buffers must have the same length. An empty exchange does nothing
    /// and leaves chip-select untouched.
    fn transceive(&mut self, tx: &[u8], rx: &mut [u8]) -> Result<(), Self::Error>
    where
        Self: Sized,
    {
        debug_assert_eq!(tx.len(), rx.len(), "transceive buffers differ in length");
        if tx.is_empty() {
            return Ok(());
        }
        self.transaction(|bus| bus.transfer(tx, rx))
    }
}

/// Errors raised by [`SpiTransport`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError<S, P> {
    /// The SPI peripheral reported a transfer failure
    Spi(S),
    /// Driving the chip-select pin failed
    ChipSelect(P),
}

/// [`Transport`] over an SPI bus with a dedicated chip-select pin.
///
/// The bus is owned exclusively; sharing it with other devices is left to the
/// caller (e.g. by handing in a bus wrapper that already arbitrates access).
pub struct SpiTransport<SPI, CS, D> {
    spi: SPI,
    cs: CS,
    delay: D,
    settle_ns: u32,
}

impl<SPI, CS, D> SpiTransport<SPI, CS, D> {
    /// Creates a transport with the default setup/hold time.
    pub const fn new(spi: SPI, cs: CS, delay: D) -> Self {
        Self {
            spi,
            cs,
            delay,
            settle_ns: DEFAULT_SETTLE_NS,
        }
    }

    /// Overrides the delay inserted after asserting and before releasing
    /// chip-select.
    #[must_use]
    pub const fn with_settle_ns(mut self, settle_ns: u32) -> Self {
        self.settle_ns = settle_ns;
        self
    }

    /// Consumes the transport and returns the bus, pin and delay.
    pub fn release(self) -> (SPI, CS, D) {
        (self.spi, self.cs, self.delay)
    }
}

impl<SPI, CS, D> Transport for SpiTransport<SPI, CS, D>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
    D: DelayNs,
{
    type Error = TransportError<SPI::Error, CS::Error>;

    fn select(&mut self) -> Result<(), Self::Error> {
        self.cs.set_low().map_err(TransportError::ChipSelect)?;
        self.delay.delay_ns(self.settle_ns);
        Ok(())
    }

    fn transfer(&mut self, tx: &[u8], rx: &mut [u8]) -> Result<(), Self::Error> {
        self.spi.transfer(rx, tx).map_err(TransportError::Spi)
    }

    fn deselect(&mut self) -> Result<(), Self::Error> {
        // The bus may still be shifting when transfer() returns.
        let flushed = self.spi.flush().map_err(TransportError::Spi);
        self.delay.delay_ns(self.settle_ns);
        self.cs.set_high().map_err(TransportError::ChipSelect)?;
        flushed
    }
}
