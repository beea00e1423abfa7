//! Performance Monitor Module
//!
//! Keeps the most recent timing samples of named operations in a bounded FIFO
//! buffer and derives averages, slow-operation rankings and a text report.

mod buffer;
mod performance;
mod report;
mod sample;


pub use buffer::{OperationSummary, SampleBuffer};
pub use performance::{PerformanceMonitor, DEFAULT_SLOW_THRESHOLD_MS};
pub use report::{render_report, NO_METRICS_MESSAGE};
pub use sample::{Sample, Severity};

/// Number of samples retained before the oldest is evicted.
pub const DEFAULT_CAPACITY: usize = 100;
