//! Fixed-capacity metric histories for the graphs
//!
//! Each value is written twice, at `head` and `head + capacity`, so the most
//! recent `len` samples are always one contiguous, oldest-first slice. Reading
//! for a frame never allocates.

use crate::constants::{HISTORY_CAPACITY, MAX_CORE_HISTORIES};
use crate::system::SystemMetrics;

/// Circular buffer of recent samples for one metric
#[derive(Debug, Clone)]
pub struct MetricHistory {
    buffer: Vec<f64>,
    head: usize,
    len: usize,
    capacity: usize,
}

impl MetricHistory {
    /// Creates an empty history holding at most `capacity` samples (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            buffer: vec![0.0; capacity * 2],
            head: 0,
            len: 0,
            capacity,
        }
    }

    /// Appends a sample, overwriting the oldest one when full.
    pub fn push(&mut self, value: f64) {
        self.buffer[self.head] = value;
        self.buffer[self.head + self.capacity] = value;
        self.head = (self.head + 1) % self.capacity;
        self.len = (self.len + 1).min(self.capacity);
    }

    /// All stored samples, oldest first.
    pub fn as_chronological_slice(&self) -> &[f64] {
        let start = (self.head + self.capacity - self.len) % self.capacity;
        &self.buffer[start..start + self.len]
    }

    /// The newest `n` samples (or fewer), oldest first.
    pub fn last(&self, n: usize) -> &[f64] {
        let all = self.as_chronological_slice();
        &all[all.len().saturating_sub(n)..]
    }

    /// Most recent sample.
    #[cfg(test)]
    pub fn latest(&self) -> Option<f64> {
        self.as_chronological_slice().last().copied()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[cfg(test)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Every tracked history series
#[derive(Debug, Clone)]
pub struct HistorySet {
    pub cpu: MetricHistory,
    pub memory: MetricHistory,
    pub cores: Vec<MetricHistory>,
}

impl HistorySet {
    pub fn new() -> Self {
        Self {
            cpu: MetricHistory::new(HISTORY_CAPACITY),
            memory: MetricHistory::new(HISTORY_CAPACITY),
            cores: Vec::new(),
        }
    }

    /// Pushes one pass worth of metrics into every series.
    ///
    /// Cores beyond [`MAX_CORE_HISTORIES`] are not tracked.
    pub fn record(&mut self, metrics: &SystemMetrics) {
        self.cpu.push(metrics.cpu_percent);
        self.memory.push(metrics.mem_percent);

        let tracked = metrics.core_percents.len().min(MAX_CORE_HISTORIES);
        if self.cores.len() != tracked {
            self.cores = vec![MetricHistory::new(HISTORY_CAPACITY); tracked];
        }
        for (history, &value) in self.cores.iter_mut().zip(&metrics.core_percents) {
            history.push(value);
        }
    }
}

impl Default for HistorySet {
    fn default() -> Self {
        Self::new()
    }
}
