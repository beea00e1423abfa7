//! Shared performance monitor.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use tracing::{debug, error, warn};

use crate::monitor::report::REPORT_SLOWEST;
use crate::monitor::{render_report, Sample, SampleBuffer, Severity, DEFAULT_CAPACITY};

/// Mean duration above which an operation counts as slow.
pub const DEFAULT_SLOW_THRESHOLD_MS: u64 = 500;

// == Performance Monitor ==
/// Records how long named operations take.
///
/// Cloning yields a handle to the same sample buffer. The lock covers buffer
/// access only; measured work always runs unlocked.
#[derive(Debug, Clone)]
pub struct PerformanceMonitor {
    buffer: Arc<Mutex<SampleBuffer>>,
}

impl Default for PerformanceMonitor {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl PerformanceMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a monitor retaining at most `capacity` samples.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Arc::new(Mutex::new(SampleBuffer::new(capacity))),
        }
    }

    fn buffer(&self) -> MutexGuard<'_, SampleBuffer> {
        self.buffer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // == Measure ==
    /// Awaits `future`, records its wall-clock duration under `operation` and
    /// returns its output.
    pub async fn measure<T, Fut>(&self, operation: &str, future: Fut) -> T
    where
        Fut: Future<Output = T>,
    {
        let started = Instant::now();
        let output = future.await;
        self.record(operation, started.elapsed());
        output
    }

    /// Like [`measure`](Self::measure) for fallible work: only a successful
    /// outcome is recorded, an error is passed through without a sample.
    pub async fn try_measure<T, E, Fut>(&self, operation: &str, future: Fut) -> Result<T, E>
    where
        Fut: Future<Output = Result<T, E>>,
    {
        let started = Instant::now();
        let output = future.await?;
        self.record(operation, started.elapsed());
        Ok(output)
    }

    /// Synchronous form of [`measure`](Self::measure).
    pub fn measure_sync<T>(&self, operation: &str, work: impl FnOnce() -> T) -> T {
        let started = Instant::now();
        let output = work();
        self.record(operation, started.elapsed());
        output
    }

    fn record(&self, operation: &str, elapsed: Duration) {
        let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        self.add_metric(operation, duration_ms);

        let severity = Severity::classify(duration_ms);
        match severity {
            Severity::Fast => debug!(operation, duration_ms, %severity, "operation measured"),
            Severity::Warn => warn!(operation, duration_ms, %severity, "operation measured"),
            Severity::Slow => error!(operation, duration_ms, %severity, "operation measured"),
        }
    }

    // == Add Metric ==
    /// Appends a sample without timing anything.
    pub fn add_metric(&self, operation: &str, duration_ms: u64) {
        let sample = Sample::new(operation, duration_ms);
        self.buffer().push(sample);
    }

    /// Truncated mean duration of `operation`; 0 when it has no samples.
    pub fn average_duration(&self, operation: &str) -> u64 {
        self.buffer().average(operation)
    }

    /// Operations ranked by mean duration, slowest first.
    pub fn slowest_operations(&self, limit: usize) -> Vec<(String, u64)> {
        self.buffer().slowest(limit)
    }

    /// Every retained sample as `(operation, duration_ms)`, oldest first.
    pub fn all_metrics(&self) -> Vec<(String, u64)> {
        self.buffer().durations()
    }

    pub fn samples(&self) -> Vec<Sample> {
        self.buffer().samples()
    }

    pub fn clear(&self) {
        self.buffer().clear();
    }

    /// True if the mean duration of `operation` exceeds `threshold_ms`.
    pub fn is_slow(&self, operation: &str, threshold_ms: u64) -> bool {
        self.average_duration(operation) > threshold_ms
    }

    // == Generate Report ==
    /// Text summary of the retained samples.
    pub fn generate_report(&self) -> String {
        let (total, summaries, slowest) = {
            let buffer = self.buffer();
            (
                buffer.len(),
                buffer.summaries(),
                buffer.slowest(REPORT_SLOWEST),
            )
        };
        render_report(total, &summaries, &slowest)
    }

    pub fn len(&self) -> usize {
        self.buffer().len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer().is_empty()
    }
}
