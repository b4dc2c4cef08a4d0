//! Processing throughput diagnostics.
//!
//! [`ThroughputMonitor`] accumulates processed samples and elapsed time.
//! Once at least one second of audio (one sample rate's worth of samples)
//! has gone through, it emits a single report with the average samples per
//! second and starts over. It never influences the signal.
//!
//! [`Monitored`] wraps any [`Transform`](crate::Transform) and feeds the
//! monitor with wall-clock timings around each `process` call.

use core::time::Duration;

/// One throughput measurement window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThroughputReport {
    /// Samples processed in the window.
    pub samples: u64,
    /// Time spent inside `process` during the window.
    pub elapsed: Duration,
    /// `samples / elapsed`, in samples per second.
    pub samples_per_sec: f64,
}

/// Accumulates sample counts and processing time.
#[derive(Debug, Clone, Default)]
pub struct ThroughputMonitor {
    sample_rate: u32,
    samples: u64,
    elapsed: Duration,
}

impl ThroughputMonitor {
    /// Create a monitor that reports every `sample_rate` samples.
    ///
    /// A sample rate of 0 disables reporting.
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            samples: 0,
            elapsed: Duration::ZERO,
        }
    }

    /// Change the reporting interval. Accumulated counts are kept.
    pub fn set_sample_rate(&mut self, sample_rate: u32) {
        self.sample_rate = sample_rate;
    }

    /// Samples accumulated since the last report.
    pub fn pending_samples(&self) -> u64 {
        self.samples
    }

    /// Time accumulated since the last report.
    pub fn pending_elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Account for one `process` call.
    ///
    /// Returns a report (and logs it) when the window is full.
    pub fn record(&mut self, samples: usize, elapsed: Duration) -> Option<ThroughputReport> {
        self.samples += samples as u64;
        self.elapsed += elapsed;

        if self.sample_rate == 0 || self.samples < u64::from(self.sample_rate) {
            return None;
        }

        let report = ThroughputReport {
            samples: self.samples,
            elapsed: self.elapsed,
            samples_per_sec: self.samples as f64 / self.elapsed.as_secs_f64(),
        };

        #[cfg(feature = "tracing")]
        tracing::info!(
            samples = report.samples,
            elapsed_us = report.elapsed.as_micros() as u64,
            "avg perf: {:.0} samples/sec",
            report.samples_per_sec
        );

        self.samples = 0;
        self.elapsed = Duration::ZERO;
        Some(report)
    }
}

#[cfg(feature = "std")]
pub use self::monitored::Monitored;

#[cfg(feature = "std")]
mod monitored {
    use std::time::Instant;

    use super::{ThroughputMonitor, ThroughputReport};
    use crate::transform::{StreamFormat, Transform, TransformError};

    /// A [`Transform`] wrapped with throughput accounting.
    ///
    /// Each successful `process` call is timed with [`Instant`]. Failed
    /// calls are not counted. Output is identical to the inner transform's.
    #[derive(Debug)]
    pub struct Monitored<T> {
        inner: T,
        monitor: ThroughputMonitor,
        last_report: Option<ThroughputReport>,
    }

    impl<T: Transform> Monitored<T> {
        /// Wrap `inner`. Reporting starts once `configure` provides a rate.
        pub fn new(inner: T) -> Self {
            Self {
                inner,
                monitor: ThroughputMonitor::new(0),
                last_report: None,
            }
        }

        /// The wrapped transform.
        pub fn inner(&self) -> &T {
            &self.inner
        }

        /// The wrapped transform, mutably.
        pub fn inner_mut(&mut self) -> &mut T {
            &mut self.inner
        }

        /// Unwrap.
        pub fn into_inner(self) -> T {
            self.inner
        }

        /// Accumulator state.
        pub fn monitor(&self) -> &ThroughputMonitor {
            &self.monitor
        }

        /// Most recent completed measurement window.
        pub fn last_report(&self) -> Option<ThroughputReport> {
            self.last_report
        }
    }

    impl<T: Transform> Transform for Monitored<T> {
        fn configure(&mut self, format: StreamFormat) -> Result<(), TransformError> {
            self.inner.configure(format)?;
            self.monitor.set_sample_rate(format.sample_rate);
            Ok(())
        }

        fn process(&mut self, samples: &mut [f32]) -> Result<(), TransformError> {
            let start = Instant::now();
            self.inner.process(samples)?;
            if let Some(report) = self.monitor.record(samples.len(), start.elapsed()) {
                self.last_report = Some(report);
            }
            Ok(())
        }

        fn reset(&mut self) {
            self.inner.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reports_once_window_is_full() {
        let mut monitor = ThroughputMonitor::new(1000);
        assert!(monitor.record(400, Duration::from_millis(1)).is_none());
        assert!(monitor.record(400, Duration::from_millis(1)).is_none());

        let report = monitor.record(400, Duration::from_millis(2)).unwrap();
        assert_eq!(report.samples, 1200);
        assert_eq!(report.elapsed, Duration::from_millis(4));
        assert!((report.samples_per_sec - 300_000.0).abs() < 1e-6);

        assert_eq!(monitor.pending_samples(), 0);
        assert_eq!(monitor.pending_elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_zero_rate_never_reports() {
        let mut monitor = ThroughputMonitor::new(0);
        for _ in 0..10 {
            assert!(monitor.record(48000, Duration::from_millis(1)).is_none());
        }
        assert_eq!(monitor.pending_samples(), 480_000);
    }

    #[test]
    fn test_zero_elapsed_is_infinite_rate() {
        let mut monitor = ThroughputMonitor::new(10);
        let report = monitor.record(10, Duration::ZERO).unwrap();
        assert!(report.samples_per_sec.is_infinite());
    }

    #[cfg(feature = "std")]
    mod monitored {
        use super::super::Monitored;
        use crate::transform::{StreamFormat, Transform, TransformError};

        struct Doubler;

        impl Transform for Doubler {
            fn configure(&mut self, format: StreamFormat) -> Result<(), TransformError> {
                format.require_mono()
            }

            fn process(&mut self, samples: &mut [f32]) -> Result<(), TransformError> {
                samples.iter_mut().for_each(|s| *s *= 2.0);
                Ok(())
            }

            fn reset(&mut self) {}
        }

        #[test]
        fn test_output_matches_inner() {
            let mut monitored = Monitored::new(Doubler);
            monitored.configure(StreamFormat::mono(4)).unwrap();
            let mut block = [1.0, 2.0, 3.0];
            monitored.process(&mut block).unwrap();
            assert_eq!(block, [2.0, 4.0, 6.0]);
            assert!(monitored.last_report().is_none());
            assert_eq!(monitored.monitor().pending_samples(), 3);

            monitored.process(&mut block).unwrap();
            let report = monitored.last_report().unwrap();
            assert_eq!(report.samples, 6);
            assert_eq!(monitored.monitor().pending_samples(), 0);
        }

        #[test]
        fn test_failed_configure_keeps_reporting_off() {
            let mut monitored = Monitored::new(Doubler);
            let err = monitored.configure(StreamFormat {
                sample_rate: 4,
                channels: 2,
            });
            assert_eq!(err, Err(TransformError::UnsupportedChannels(2)));
            monitored.process(&mut [0.0; 16]).unwrap();
            assert!(monitored.last_report().is_none());
        }
    }
}
