//! Sensor port - abstraction for reading calibrated acceleration
//!
//! This trait allows the sampling loop to read acceleration without knowing
//! the specific accelerometer or bus behind it.

use crate::config::{BATCH_SCALARS, SAMPLE_INTERVAL_MS};
use crate::domain::PhysicalSample;
use crate::ports::bus::BusError;

/// Configuration for the sampling loop
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SamplerConfig {
    /// Delay after every bus poll, successful or not (milliseconds)
    pub sample_interval_ms: u32,
    /// Extra delay after each batch has been reported (milliseconds)
    pub cycle_pause_ms: u32,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            sample_interval_ms: SAMPLE_INTERVAL_MS, // 5 Hz
            cycle_pause_ms: 0,
        }
    }
}

impl SamplerConfig {
    /// Create config that polls as fast as the bus allows (tests, bench runs)
    pub const fn unthrottled() -> Self {
        Self {
            sample_interval_ms: 0,
            cycle_pause_ms: 0,
        }
    }

    /// Time to fill one default-sized batch when every read succeeds
    pub const fn batch_period_ms(&self) -> u32 {
        self.sample_interval_ms * (BATCH_SCALARS / 3) as u32
    }
}

/// Port for reading acceleration samples
///
/// # Example Implementation
///
/// ```ignore
/// impl<B: BusPort> AccelerometerPort for Mma8451<B> {
///     async fn read_sample(&mut self) -> Result<PhysicalSample, BusError> {
///         let raw = self.read_raw().await?;
///         Ok(raw.to_physical(self.range))
///     }
/// }
/// ```
pub trait AccelerometerPort {
    /// Read one X/Y/Z sample in m/s²
    ///
    /// A bus failure is returned unmodified; no retry is attempted.
    fn read_sample(
        &mut self,
    ) -> impl core::future::Future<Output = Result<PhysicalSample, BusError>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_batch_takes_ten_seconds() {
        let config = SamplerConfig::default();
        assert_eq!(config.sample_interval_ms, 200);
        assert_eq!(config.batch_period_ms(), 10_000);
        assert_eq!(SamplerConfig::unthrottled().batch_period_ms(), 0);
    }
}
