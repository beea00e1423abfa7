//! Bounded FIFO buffer of timing samples.

use std::collections::{HashMap, VecDeque};

use serde::Serialize;

use crate::monitor::Sample;

// == Operation Summary ==
/// Aggregate of the retained samples of one operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationSummary {
    pub operation: String,
    pub calls: usize,
    pub total_ms: u128,
    pub min_ms: u64,
    pub max_ms: u64,
}

impl OperationSummary {
    fn new(sample: &Sample) -> Self {
        Self {
            operation: sample.operation.clone(),
            calls: 1,
            total_ms: u128::from(sample.duration_ms),
            min_ms: sample.duration_ms,
            max_ms: sample.duration_ms,
        }
    }

    fn add(&mut self, duration_ms: u64) {
        self.calls += 1;
        self.total_ms += u128::from(duration_ms);
        self.min_ms = self.min_ms.min(duration_ms);
        self.max_ms = self.max_ms.max(duration_ms);
    }

    /// Integer mean, truncated.
    pub fn average_ms(&self) -> u64 {
        mean_ms(self.total_ms, self.calls as u128)
    }
}

/// Truncated mean of `count` durations summing to `total`; 0 when empty.
fn mean_ms(total: u128, count: u128) -> u64 {
    if count == 0 {
        return 0;
    }
    u64::try_from(total / count).unwrap_or(u64::MAX)
}

// == Sample Buffer ==
/// Insertion-ordered samples, never more than `capacity` of them.
#[derive(Debug, Clone)]
pub struct SampleBuffer {
    samples: VecDeque<Sample>,
    capacity: usize,
}

impl SampleBuffer {
    /// Creates an empty buffer. A zero capacity is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    // == Push ==
    /// Appends a sample, evicting and returning the oldest one when full.
    pub fn push(&mut self, sample: Sample) -> Option<Sample> {
        self.samples.push_back(sample);
        if self.samples.len() > self.capacity {
            self.samples.pop_front()
        } else {
            None
        }
    }

    // == Summaries ==
    /// Per-operation aggregates, in order of each operation's oldest sample.
    pub fn summaries(&self) -> Vec<OperationSummary> {
        let mut order: Vec<OperationSummary> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();

        for sample in &self.samples {
            match index.get(sample.operation.as_str()) {
                Some(&at) => order[at].add(sample.duration_ms),
                None => {
                    index.insert(sample.operation.as_str(), order.len());
                    order.push(OperationSummary::new(sample));
                }
            }
        }
        order
    }

    /// Mean duration of `operation`, or 0 when it has no samples.
    pub fn average(&self, operation: &str) -> u64 {
        let (count, total) = self
            .samples
            .iter()
            .filter(|sample| sample.operation == operation)
            .fold((0u128, 0u128), |(count, total), sample| {
                (count + 1, total + u128::from(sample.duration_ms))
            });

        mean_ms(total, count)
    }

    // == Slowest ==
    /// Operations ranked by mean duration, slowest first, at most `limit`.
    ///
    /// Ties keep the order in which the operations first appear.
    pub fn slowest(&self, limit: usize) -> Vec<(String, u64)> {
        let mut ranked: Vec<(String, u64)> = self
            .summaries()
            .into_iter()
            .map(|summary| {
                let average = summary.average_ms();
                (summary.operation, average)
            })
            .collect();

        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(limit);
        ranked
    }

    /// Every retained sample as `(operation, duration_ms)`, oldest first.
    pub fn durations(&self) -> Vec<(String, u64)> {
        self.samples
            .iter()
            .map(|sample| (sample.operation.clone(), sample.duration_ms))
            .collect()
    }

    pub fn samples(&self) -> Vec<Sample> {
        self.samples.iter().cloned().collect()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
