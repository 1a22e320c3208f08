//! Sample-collect-report loop
//!
//! The [`Collector`] owns the batch buffer and drives one task through the
//! whole cycle: poll the accelerometer until the buffer is full, hand the
//! snapshot to the reporter, start over. Nothing is retried; a failed read
//! is skipped and a failed report is logged and dropped.

use embedded_hal_async::delay::DelayNs;

use crate::adapters::mma8451::{Mma8451, StartupError};
use crate::config::BATCH_SCALARS;
use crate::domain::{BufferError, SampleBuffer};
use crate::ports::bus::BusPort;
use crate::ports::reporter::{NetworkError, ReportPort, StatusCode};
use crate::ports::sensor::{AccelerometerPort, SamplerConfig};

/// Identify and configure the accelerometer
///
/// On an identity mismatch nothing is written to the device and the error
/// is returned; the caller must not start sampling.
pub async fn bring_up<B: BusPort>(sensor: &mut Mma8451<B>) -> Result<(), StartupError> {
    if let Err(e) = sensor.verify_identity().await {
        error!("{}. Check wiring.", e);
        return Err(e);
    }
    sensor.configure().await?;
    info!("MMA8451 configured ({:?})", sensor.config().range);
    Ok(())
}

/// Counters for one filled batch
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CollectStats {
    /// Reads that produced a sample
    pub reads_ok: u32,
    /// Reads skipped after a bus error
    pub reads_failed: u32,
}

/// What happened during one cycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleReport {
    pub stats: CollectStats,
    pub outcome: Result<StatusCode, NetworkError>,
}

/// Poll `sensor` until `buffer` is full
///
/// Every poll is followed by `interval_ms`, whether the read succeeded or
/// not. A failed read leaves the buffer untouched. `BufferError` means the
/// buffer was not triple-aligned on entry; the batch must be discarded.
pub async fn fill_buffer<S, D, const N: usize>(
    sensor: &mut S,
    delay: &mut D,
    interval_ms: u32,
    buffer: &mut SampleBuffer<N>,
) -> Result<CollectStats, BufferError>
where
    S: AccelerometerPort,
    D: DelayNs,
{
    let mut stats = CollectStats::default();

    while !buffer.is_full() {
        match sensor.read_sample().await {
            Ok(sample) => {
                buffer.push(sample)?;
                stats.reads_ok += 1;
            }
            Err(e) => {
                warn!("accelerometer read failed: {}", e);
                stats.reads_failed += 1;
            }
        }
        delay.delay_ms(interval_ms).await;
    }

    Ok(stats)
}

/// Root loop owning the sensor, the reporter and the batch buffer
pub struct Collector<S, R, D, const N: usize = BATCH_SCALARS> {
    sensor: S,
    reporter: R,
    delay: D,
    config: SamplerConfig,
    buffer: SampleBuffer<N>,
}

impl<S, R, D, const N: usize> Collector<S, R, D, N>
where
    S: AccelerometerPort,
    R: ReportPort,
    D: DelayNs,
{
    pub fn new(sensor: S, reporter: R, delay: D, config: SamplerConfig) -> Self {
        Self {
            sensor,
            reporter,
            delay,
            config,
            buffer: SampleBuffer::new(),
        }
    }

    /// Poll until the buffer is full
    pub async fn collect(&mut self) -> Result<CollectStats, BufferError> {
        fill_buffer(
            &mut self.sensor,
            &mut self.delay,
            self.config.sample_interval_ms,
            &mut self.buffer,
        )
        .await
    }

    /// Fill one batch and report it
    ///
    /// A report failure is logged and returned in the cycle report. A
    /// buffer error discards the batch without reporting it. The buffer is
    /// empty afterwards either way.
    pub async fn run_cycle(&mut self) -> Result<CycleReport, BufferError> {
        let stats = match self.collect().await {
            Ok(stats) => stats,
            Err(e) => {
                error!("batch discarded: {}", e);
                self.buffer.drain();
                return Err(e);
            }
        };
        let batch = self.buffer.drain();

        let outcome = self.reporter.report(&batch).await;
        if let Err(e) = outcome {
            error!("report of {} values failed: {}", N, e);
        }
        if stats.reads_failed > 0 {
            debug!("batch needed {} extra polls", stats.reads_failed);
        }

        Ok(CycleReport { stats, outcome })
    }

    /// Run cycles forever
    pub async fn run(&mut self) -> ! {
        info!(
            "sampling every {} ms, {} values per batch",
            self.config.sample_interval_ms,
            N
        );
        loop {
            let _ = self.run_cycle().await;
            if self.config.cycle_pause_ms > 0 {
                self.delay.delay_ms(self.config.cycle_pause_ms).await;
            }
        }
    }

    /// Values buffered for the batch in progress
    pub fn buffered(&self) -> &[f32] {
        self.buffer.as_slice()
    }

    pub fn sensor_mut(&mut self) -> &mut S {
        &mut self.sensor
    }

    pub fn reporter_mut(&mut self) -> &mut R {
        &mut self.reporter
    }

    /// Take the collector apart
    pub fn into_parts(self) -> (S, R, D) {
        (self.sensor, self.reporter, self.delay)
    }
}
