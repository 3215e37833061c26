//! Heading integration from angular-rate samples
//!
//! A single-axis gyro only measures rate; the heading is recovered by summing
//! `(rate - bias) * dt` over successive samples. The accumulated angle is not
//! wrapped, so it keeps counting past ±360°.

use core::cmp::Ordering;

/// Rejected integration step whose timestamp precedes the previous sample
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NonMonotonicTimestamp {
    /// Timestamp of the last accepted sample, in seconds
    pub last_time: f32,
    /// Timestamp that was rejected, in seconds
    pub timestamp: f32,
}

/// Accumulated angle, last sample time and rate bias
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AngleIntegrator {
    angle: f32,
    last_time: f32,
    bias: f32,
}

impl AngleIntegrator {
    /// Integrator at zero angle and zero bias with `now` as baseline.
    #[must_use]
    pub const fn new(now: f32) -> Self {
        Self {
            angle: 0.0,
            last_time: now,
            bias: 0.0,
        }
    }

    /// Clears angle and bias and restarts timing at `now`.
    pub fn reset(&mut self, now: f32) {
        *self = Self::new(now);
    }

    /// Adds the rotation since the previous sample and returns the new angle.
    ///
    /// A timestamp equal to the previous one is a zero-length step. An earlier
    /// or unordered (NaN) timestamp is rejected and leaves the state unchanged.
    ///
    /// # Arguments
    /// * `rate_dps` - angular rate in °/s
    /// * `timestamp` - sample time in seconds, on the same clock as `reset`
    pub fn integrate(
        &mut self,
        rate_dps: f32,
        timestamp: f32,
    ) -> Result<f32, NonMonotonicTimestamp> {
        match timestamp.partial_cmp(&self.last_time) {
            Some(Ordering::Greater | Ordering::Equal) => {}
            _ => {
                return Err(NonMonotonicTimestamp {
                    last_time: self.last_time,
                    timestamp,
                })
            }
        }

        let dt = timestamp - self.last_time;
        self.angle += (rate_dps - self.bias) * dt;
        self.last_time = timestamp;
        Ok(self.angle)
    }

    /// Accumulated angle in degrees.
    #[must_use]
    pub const fn angle(&self) -> f32 {
        self.angle
    }

    /// Rate bias in °/s subtracted from every sample.
    #[must_use]
    pub const fn bias(&self) -> f32 {
        self.bias
    }

    /// Timestamp of the last accepted sample.
    #[must_use]
    pub const fn last_time(&self) -> f32 {
        self.last_time
    }

    /// Sets the rate bias in °/s.
    pub fn set_bias(&mut self, bias_dps: f32) {
        self.bias = bias_dps;
    }
}
