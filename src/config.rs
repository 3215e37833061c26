//! Driver configuration

use crate::decode::{RateFormat, TemperatureFormat};

/// Output formats written during initialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutputSetup {
    /// Angular-rate word width
    pub rate_format: RateFormat,
    /// Temperature word width
    pub temperature_format: TemperatureFormat,
}

/// Device configuration
///
/// The default runs the device on its reset configuration: initialization only
/// waits out power-up and sleep-exit timing and issues no register writes.
/// Set [`setup`](Config::setup) to have
/// [`initialize`](crate::Device::initialize) wake the device and program both
/// output formats explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Wait after power-up before the first access, in milliseconds
    pub power_up_delay_ms: u32,
    /// Wait for the device to leave sleep mode, in milliseconds
    pub wake_delay_ms: u32,
    /// Explicit output configuration applied by `initialize`
    pub setup: Option<OutputSetup>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            power_up_delay_ms: 10,
            wake_delay_ms: 50,
            setup: None,
        }
    }
}

impl Config {
    /// Requests explicit output configuration during initialization.
    #[must_use]
    pub const fn with_setup(mut self, setup: OutputSetup) -> Self {
        self.setup = Some(setup);
        self
    }
}
