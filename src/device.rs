//! XV7011 device controller
//!
//! [`Device`] owns the register interface (and through it the transport) for
//! one gyroscope and provides the measurement API:
//!
//! - [`initialize`](Device::initialize) waits out power-up and resets the
//!   heading integrator
//! - [`read_temperature`](Device::read_temperature) and
//!   [`read_angular_rate`](Device::read_angular_rate) query the active output
//!   format, read the data port and decode it
//! - [`read_all`](Device::read_all) combines both into a [`DeviceReading`] and
//!   never fails
//!
//! # Example
//! ```no_run
//! use embedded_hal::delay::DelayNs;
//! use xv7011::{Device, Error, Transport};
//!
//! fn poll<T: Transport, D: DelayNs>(transport: T, delay: &mut D) -> Result<f32, Error<T::Error>> {
//!     let mut device = Device::new(transport);
//!     device.initialize(delay, 0.0)?;
//!
//!     let reading = device.read_all();
//!     Ok(reading.angular_rate)
//! }
//! ```

use embedded_hal::delay::DelayNs;

use crate::config::Config;
use crate::decode::{self, RateFormat, TemperatureFormat};
use crate::integrator::AngleIntegrator;
use crate::interface::RegisterInterface;
use crate::registers::{Address, OutputControl, SleepOut, Status, TemperatureFormatControl};
use crate::transport::Transport;
use crate::Error;

/// Lifecycle of a [`Device`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceState {
    /// Constructed, `initialize` not yet completed
    Uninitialized,
    /// Initialized and idle
    Ready,
    /// Inside `read_all`
    Reading,
}

/// Decoded temperature together with its raw code
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TemperatureSample {
    /// Sign-extended output code
    pub raw: i16,
    /// Format the code was read in
    pub format: TemperatureFormat,
    /// Temperature in °C
    pub celsius: f32,
}

/// Decoded angular rate together with its raw code
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AngularRateSample {
    /// Sign-extended output code
    pub raw: i32,
    /// Format the code was read in
    pub format: RateFormat,
    /// Angular rate in °/s
    pub dps: f32,
}

/// Result of [`Device::read_all`]
///
/// Fields whose read failed hold `0` / `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceReading {
    /// Angular rate in °/s
    pub angular_rate: f32,
    /// Temperature in °C
    pub temperature: f32,
    /// Raw angular-rate code
    pub raw_angular_rate: i32,
    /// Raw temperature code
    pub raw_temperature: i16,
    /// Angular-rate output width
    pub rate_format: RateFormat,
    /// Temperature output width
    pub temperature_format: TemperatureFormat,
}

/// XV7011 gyroscope
pub struct Device<T> {
    interface: RegisterInterface<T>,
    config: Config,
    state: DeviceState,
    integrator: AngleIntegrator,
}

impl<T> Device<T> {
    /// Creates a device with the default [`Config`].
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, Config::default())
    }

    /// Creates a device with the given configuration.
    pub fn with_config(transport: T, config: Config) -> Self {
        Self {
            interface: RegisterInterface::new(transport),
            config,
            state: DeviceState::Uninitialized,
            integrator: AngleIntegrator::default(),
        }
    }

    /// Releases the underlying transport.
    pub fn release(self) -> T {
        self.interface.release()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> DeviceState {
        self.state
    }

    /// Active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Heading integrator fed by [`update_angle`](Device::update_angle).
    pub fn integrator(&self) -> &AngleIntegrator {
        &self.integrator
    }

    /// Mutable access to the heading integrator, e.g. to set a known bias.
    pub fn integrator_mut(&mut self) -> &mut AngleIntegrator {
        &mut self.integrator
    }

    /// Raw register access.
    pub fn interface(&mut self) -> &mut RegisterInterface<T> {
        &mut self.interface
    }
}

impl<T> Device<T>
where
    T: Transport,
{
    /// Brings the device up and resets the heading integrator.
    ///
    /// Waits [`Config::power_up_delay_ms`] and [`Config::wake_delay_ms`]. With
    /// the default configuration no register is written and the device runs on
    /// its reset settings. When [`Config::setup`] is set, the device is taken
    /// out of sleep and both output formats are programmed.
    ///
    /// The integrator is reset to zero angle and zero bias with `now` as the
    /// baseline timestamp.
    ///
    /// # Errors
    /// * `Error::BusFault` - a configuration write failed
    pub fn initialize<D: DelayNs>(
        &mut self,
        delay: &mut D,
        now: f32,
    ) -> Result<(), Error<T::Error>> {
        delay.delay_ms(self.config.power_up_delay_ms);

        if let Some(setup) = self.config.setup {
            self.exit_sleep()?;
            delay.delay_ms(self.config.wake_delay_ms);
            self.set_rate_format(setup.rate_format)?;
            self.set_temperature_format(setup.temperature_format)?;
        } else {
            delay.delay_ms(self.config.wake_delay_ms);
        }

        self.integrator.reset(now);
        self.state = DeviceState::Ready;

        #[cfg(feature = "defmt")]
        defmt::debug!("XV7011 initialized, explicit setup: {}", self.config.setup.is_some());

        Ok(())
    }

    /// Takes the device out of sleep mode.
    ///
    /// # Errors
    /// * `Error::BusFault` - the transport failed
    pub fn exit_sleep(&mut self) -> Result<(), Error<T::Error>> {
        self.interface.write(SleepOut)
    }

    /// Reads the status register.
    ///
    /// # Errors
    /// * `Error::BusFault` - the transport failed
    pub fn read_status(&mut self) -> Result<Status, Error<T::Error>> {
        self.interface.read()
    }

    /// Reads the angular-rate width from `OUTCTL1`.
    ///
    /// # Errors
    /// * `Error::BusFault` - the transport failed
    pub fn rate_format(&mut self) -> Result<RateFormat, Error<T::Error>> {
        let control: OutputControl = self.interface.read()?;
        Ok(control.rate_format)
    }

    /// Selects angular-rate output in the given width.
    ///
    /// # Errors
    /// * `Error::BusFault` - the transport failed
    pub fn set_rate_format(&mut self, format: RateFormat) -> Result<(), Error<T::Error>> {
        self.interface.write(OutputControl::angular_rate(format))
    }

    /// Reads the temperature width from `TsDataFormat`.
    ///
    /// # Errors
    /// * `Error::BusFault` - the transport failed
    pub fn temperature_format(&mut self) -> Result<TemperatureFormat, Error<T::Error>> {
        let control: TemperatureFormatControl = self.interface.read()?;
        Ok(control.format())
    }

    /// Changes the temperature width, leaving the other bits of `TsDataFormat`
    /// untouched.
    ///
    /// # Errors
    /// * `Error::BusFault` - the transport failed
    pub fn set_temperature_format(
        &mut self,
        format: TemperatureFormat,
    ) -> Result<(), Error<T::Error>> {
        let control: TemperatureFormatControl = self.interface.read()?;
        self.interface.write(control.with_format(format))
    }

    /// Reads the temperature in °C.
    ///
    /// # Errors
    /// * `Error::BusFault` - the transport failed; nothing is decoded
    pub fn read_temperature(&mut self) -> Result<f32, Error<T::Error>> {
        self.read_temperature_sample().map(|sample| sample.celsius)
    }

    /// Reads the temperature with its raw code and format.
    ///
    /// The active format is read from `TsDataFormat` first, then the data port
    /// is clocked for the number of bytes that format produces.
    ///
    /// # Errors
    /// * `Error::BusFault` - the transport failed; nothing is decoded
    pub fn read_temperature_sample(&mut self) -> Result<TemperatureSample, Error<T::Error>> {
        let control: TemperatureFormatControl = self.interface.read()?;
        let format = control.format();

        let mut bytes = [0u8; 2];
        self.interface.read_register_multi(
            Address::TemperatureRead.into(),
            &mut bytes[..format.byte_count()],
        )?;

        let raw = decode::temperature_raw(format, bytes);
        Ok(TemperatureSample {
            raw,
            format,
            celsius: decode::temperature_celsius(format, raw),
        })
    }

    /// Reads the angular rate in °/s.
    ///
    /// **This read may write.** If `OUTCTL1` does not select angular-rate
    /// output, the mode bits are rewritten to `01` (width bit preserved) before
    /// the data port is read. See
    /// [`read_angular_rate_sample`](Device::read_angular_rate_sample).
    ///
    /// # Errors
    /// * `Error::BusFault` - the transport failed; nothing is decoded
    pub fn read_angular_rate(&mut self) -> Result<f32, Error<T::Error>> {
        self.read_angular_rate_sample().map(|sample| sample.dps)
    }

    /// Reads the angular rate with its raw code and format.
    ///
    /// Transactions issued:
    /// 1. read `OUTCTL1`
    /// 2. only if its mode bits are not `01`: write `(OUTCTL1 & 0xFC) | 0x01`
    /// 3. read 2 (16-bit) or 3 (24-bit) bytes from the angular-rate port
    ///
    /// # Errors
    /// * `Error::BusFault` - the transport failed; nothing is decoded
    pub fn read_angular_rate_sample(&mut self) -> Result<AngularRateSample, Error<T::Error>> {
        let mut control: OutputControl = self.interface.read()?;
        if !control.is_angular_rate() {
            control = control.with_angular_rate();

            #[cfg(feature = "defmt")]
            defmt::debug!("OUTCTL1 not in angular-rate mode, writing {=u8:#x}", control.bits());

            self.interface.write(control)?;
        }
        let format = control.rate_format;

        let mut bytes = [0u8; 3];
        self.interface.read_register_multi(
            Address::AngularRateRead.into(),
            &mut bytes[..format.byte_count()],
        )?;

        let raw = decode::angular_rate_raw(format, bytes);
        Ok(AngularRateSample {
            raw,
            format,
            dps: decode::angular_rate_dps(format, raw),
        })
    }

    /// Reads temperature and angular rate in one best-effort pass.
    ///
    /// Each measurement is read independently; one that fails is reported as
    /// `0.0` without affecting the other. The format fields are then refreshed
    /// from the status register (bit 2) and `TsDataFormat`; if those reads
    /// fail the formats seen by the measurement reads are kept.
    ///
    /// The state is [`DeviceState::Reading`] for the duration of the call and
    /// then returns to whatever it was before, not unconditionally to
    /// [`DeviceState::Ready`]. Calling this on an uninitialized device is
    /// allowed and leaves it [`DeviceState::Uninitialized`].
    pub fn read_all(&mut self) -> DeviceReading {
        let previous = self.state;
        self.state = DeviceState::Reading;

        let mut reading = DeviceReading::default();

        match self.read_temperature_sample() {
            Ok(sample) => {
                reading.temperature = sample.celsius;
                reading.raw_temperature = sample.raw;
                reading.temperature_format = sample.format;
            }
            Err(_) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("temperature read failed, reporting 0.0");
            }
        }

        match self.read_angular_rate_sample() {
            Ok(sample) => {
                reading.angular_rate = sample.dps;
                reading.raw_angular_rate = sample.raw;
                reading.rate_format = sample.format;
            }
            Err(_) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("angular rate read failed, reporting 0.0");
            }
        }

        if let Ok(status) = self.read_status() {
            reading.rate_format = status.rate_format();
        }
        if let Ok(format) = self.temperature_format() {
            reading.temperature_format = format;
        }

        self.state = previous;
        reading
    }

    /// Reads the angular rate and adds it to the heading integrator.
    ///
    /// Returns the accumulated angle in degrees.
    ///
    /// # Errors
    /// * `Error::BusFault` - the transport failed; the integrator is untouched
    /// * `Error::NonMonotonicTimestamp` - `timestamp` is earlier than the last
    ///   sample; the integrator is untouched
    pub fn update_angle(&mut self, timestamp: f32) -> Result<f32, Error<T::Error>> {
        let rate = self.read_angular_rate()?;
        self.integrator
            .integrate(rate, timestamp)
            .map_err(|_| Error::NonMonotonicTimestamp)
    }

    /// Estimates the zero-rate bias and stores it in the integrator.
    ///
    /// The device must be stationary. `samples` readings are taken
    /// `interval_ms` apart and averaged; there is no wait after the last one.
    ///
    /// # Errors
    /// * `Error::InvalidArgument` - `samples` is zero
    /// * `Error::BusFault` - the transport failed; the bias is not changed
    pub fn calibrate_bias<D: DelayNs>(
        &mut self,
        delay: &mut D,
        samples: u16,
        interval_ms: u32,
    ) -> Result<f32, Error<T::Error>> {
        if samples == 0 {
            return Err(Error::InvalidArgument);
        }

        let mut sum = self.read_angular_rate()?;
        for _ in 1..samples {
            delay.delay_ms(interval_ms);
            sum += self.read_angular_rate()?;
        }

        let bias = sum / f32::from(samples);
        self.integrator.set_bias(bias);

        #[cfg(feature = "defmt")]
        defmt::info!("gyro bias calibrated: {=f32} dps", bias);

        Ok(bias)
    }
}
