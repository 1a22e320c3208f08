//! Split sampling and reporting into two tasks
//!
//! In the single-task [`Collector`](crate::Collector) a slow POST delays the
//! next poll. Here the sampler pushes each full batch into an embassy-sync
//! channel and goes straight back to polling, while a second task drains
//! the channel and reports. When the channel is full the sampler waits for
//! room instead of dropping a batch.
//!
//! ```ignore
//! static BATCHES: Channel<CriticalSectionRawMutex, Batch<150>, 2> = Channel::new();
//!
//! #[embassy_executor::task]
//! async fn sampler_task(sensor: Mma8451<Bus>) -> ! {
//!     sample_batches(sensor, Delay, SamplerConfig::default(), BATCHES.sender()).await
//! }
//!
//! #[embassy_executor::task]
//! async fn reporter_task(mut reporter: HttpReporter<TcpConnector<'static, 1024, 2048>>) -> ! {
//!     report_batches(&mut reporter, BATCHES.receiver()).await
//! }
//! ```

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::{Receiver, Sender, TrySendError};
use embedded_hal_async::delay::DelayNs;

use crate::collector::{fill_buffer, CollectStats};
use crate::config::BATCH_SCALARS;
use crate::domain::{BufferError, SampleBuffer};
use crate::ports::reporter::{NetworkError, ReportPort, StatusCode};
use crate::ports::sensor::{AccelerometerPort, SamplerConfig};

/// One drained buffer
pub type Batch<const N: usize = BATCH_SCALARS> = [f32; N];

/// Sampling half: owns the sensor and the buffer
pub struct Sampler<S, D, const N: usize = BATCH_SCALARS> {
    sensor: S,
    delay: D,
    config: SamplerConfig,
    buffer: SampleBuffer<N>,
}

impl<S, D, const N: usize> Sampler<S, D, N>
where
    S: AccelerometerPort,
    D: DelayNs,
{
    pub fn new(sensor: S, delay: D, config: SamplerConfig) -> Self {
        Self {
            sensor,
            delay,
            config,
            buffer: SampleBuffer::new(),
        }
    }

    /// Fill one batch and hand it to the reporting task
    ///
    /// On a buffer error the batch is discarded and nothing is queued.
    pub async fn sample_one_batch<M: RawMutex, const DEPTH: usize>(
        &mut self,
        sender: &Sender<'_, M, Batch<N>, DEPTH>,
    ) -> Result<CollectStats, BufferError> {
        let filled = fill_buffer(
            &mut self.sensor,
            &mut self.delay,
            self.config.sample_interval_ms,
            &mut self.buffer,
        )
        .await;

        let batch = self.buffer.drain();
        let stats = match filled {
            Ok(stats) => stats,
            Err(e) => {
                error!("batch discarded: {}", e);
                return Err(e);
            }
        };
        if let Err(TrySendError::Full(batch)) = sender.try_send(batch) {
            warn!("reporter behind, sampler waiting for queue space");
            sender.send(batch).await;
        }

        Ok(stats)
    }

    /// Sample batches forever
    pub async fn run<M: RawMutex, const DEPTH: usize>(
        &mut self,
        sender: Sender<'_, M, Batch<N>, DEPTH>,
    ) -> ! {
        loop {
            let _ = self.sample_one_batch(&sender).await;
        }
    }

    pub fn sensor_mut(&mut self) -> &mut S {
        &mut self.sensor
    }
}

/// Sample batches forever with a fresh [`Sampler`]
pub async fn sample_batches<S, D, M, const N: usize, const DEPTH: usize>(
    sensor: S,
    delay: D,
    config: SamplerConfig,
    sender: Sender<'_, M, Batch<N>, DEPTH>,
) -> !
where
    S: AccelerometerPort,
    D: DelayNs,
    M: RawMutex,
{
    Sampler::<S, D, N>::new(sensor, delay, config).run(sender).await
}

/// Wait for one batch and report it
///
/// A failed report is logged and returned; the batch is not requeued.
pub async fn report_one_batch<R, M, const N: usize, const DEPTH: usize>(
    reporter: &mut R,
    receiver: &Receiver<'_, M, Batch<N>, DEPTH>,
) -> Result<StatusCode, NetworkError>
where
    R: ReportPort,
    M: RawMutex,
{
    let batch = receiver.receive().await;
    let outcome = reporter.report(&batch).await;
    if let Err(e) = outcome {
        error!("report of {} values failed: {}", N, e);
    }
    outcome
}

/// Report batches forever
pub async fn report_batches<R, M, const N: usize, const DEPTH: usize>(
    reporter: &mut R,
    receiver: Receiver<'_, M, Batch<N>, DEPTH>,
) -> !
where
    R: ReportPort,
    M: RawMutex,
{
    loop {
        let _ = report_one_batch(reporter, &receiver).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PhysicalSample;
    use crate::ports::bus::BusError;
    use core::task::Poll;
    use embassy_futures::block_on;
    use embassy_futures::select::select3;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use embassy_sync::channel::Channel;

    struct CountingSensor {
        next: f32,
    }

    impl AccelerometerPort for CountingSensor {
        async fn read_sample(&mut self) -> Result<PhysicalSample, BusError> {
            let v = self.next;
            self.next += 3.0;
            Ok(PhysicalSample::new(v, v + 1.0, v + 2.0))
        }
    }

    struct NoDelay;

    impl DelayNs for NoDelay {
        async fn delay_ns(&mut self, _ns: u32) {}
    }

    struct YieldingDelay;

    impl DelayNs for YieldingDelay {
        async fn delay_ns(&mut self, _ns: u32) {
            embassy_futures::yield_now().await;
        }
    }

    struct FlakyReporter {
        seen: Vec<Vec<f32>>,
        fail_first: bool,
    }

    impl ReportPort for FlakyReporter {
        async fn report(&mut self, samples: &[f32]) -> Result<StatusCode, NetworkError> {
            self.seen.push(samples.to_vec());
            if self.fail_first && self.seen.len() == 1 {
                return Err(NetworkError::Timeout);
            }
            Ok(StatusCode::OK)
        }
    }

    #[test]
    fn test_batches_flow_through_queue_in_order() {
        let channel: Channel<NoopRawMutex, Batch<6>, 2> = Channel::new();
        let mut sampler: Sampler<_, _, 6> =
            Sampler::new(CountingSensor { next: 0.0 }, NoDelay, SamplerConfig::unthrottled());

        // Two batches fit the queue before anyone reports
        block_on(sampler.sample_one_batch(&channel.sender())).unwrap();
        block_on(sampler.sample_one_batch(&channel.sender())).unwrap();

        let mut reporter = FlakyReporter {
            seen: Vec::new(),
            fail_first: true,
        };
        let receiver = channel.receiver();
        let first = block_on(report_one_batch(&mut reporter, &receiver));
        assert_eq!(first, Err(NetworkError::Timeout));
        let second = block_on(report_one_batch(&mut reporter, &receiver));
        assert_eq!(second, Ok(StatusCode::OK));

        assert_eq!(
            reporter.seen,
            vec![
                vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0],
                vec![6.0, 7.0, 8.0, 9.0, 10.0, 11.0],
            ]
        );
        assert!(channel.is_empty());
    }

    #[test]
    fn test_full_queue_waits_instead_of_dropping() {
        let channel: Channel<NoopRawMutex, Batch<3>, 1> = Channel::new();
        let mut sampler: Sampler<_, _, 3> =
            Sampler::new(CountingSensor { next: 0.0 }, NoDelay, SamplerConfig::unthrottled());
        let mut reporter = FlakyReporter {
            seen: Vec::new(),
            fail_first: false,
        };

        let sender = channel.sender();
        let receiver = channel.receiver();
        let sampling = async {
            for _ in 0..3 {
                sampler.sample_one_batch(&sender).await.unwrap();
            }
        };
        let reporting = async {
            for _ in 0..3 {
                report_one_batch(&mut reporter, &receiver).await.unwrap();
            }
        };
        block_on(embassy_futures::join::join(sampling, reporting));

        assert_eq!(
            reporter.seen,
            vec![vec![0.0, 1.0, 2.0], vec![3.0, 4.0, 5.0], vec![6.0, 7.0, 8.0]]
        );
    }

    #[test]
    fn test_misaligned_buffer_queues_nothing() {
        let channel: Channel<NoopRawMutex, Batch<6>, 2> = Channel::new();
        let mut sampler: Sampler<_, _, 6> =
            Sampler::new(CountingSensor { next: 0.0 }, NoDelay, SamplerConfig::unthrottled());
        sampler.buffer.push_scalar(-1.0).unwrap();

        let result = block_on(sampler.sample_one_batch(&channel.sender()));
        assert_eq!(result, Err(BufferError::Full));
        assert!(channel.is_empty());
        assert!(sampler.buffer.is_empty());
    }

    #[test]
    fn test_forever_loops_hand_batches_across() {
        let channel: Channel<NoopRawMutex, Batch<3>, 1> = Channel::new();
        let mut reporter = FlakyReporter {
            seen: Vec::new(),
            fail_first: true,
        };

        let sampling = sample_batches(
            CountingSensor { next: 0.0 },
            YieldingDelay,
            SamplerConfig::default(),
            channel.sender(),
        );
        let reporting = report_batches(&mut reporter, channel.receiver());
        let mut polls = 0;
        let enough = core::future::poll_fn(|_| {
            polls += 1;
            if polls > 50 {
                Poll::Ready(())
            } else {
                Poll::Pending
            }
        });
        let _ = block_on(select3(sampling, reporting, enough));

        // A failed report does not stop the reporting loop
        assert!(reporter.seen.len() >= 3);
        for (i, batch) in reporter.seen.iter().enumerate() {
            let base = (i * 3) as f32;
            assert_eq!(batch, &vec![base, base + 1.0, base + 2.0]);
        }
    }
}
