//! Metric sampler: turns raw counters into per-pass metrics
//!
//! One call to [`Sampler::sample`] reads the host once and returns a system
//! summary plus a fresh, immutable set of process samples. Nothing from a
//! previous pass is modified in place.

use log::debug;

use super::cpu::CpuTracker;
use super::memory::process_mem_percent;
use super::processes::ProcessRawRecord;
use super::snapshot::SnapshotProvider;

/// One process's metrics at one sampling instant
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessSample {
    pub pid: i32,
    pub parent_pid: i32,
    pub owner_name: String,
    pub cpu_percent: f64,
    pub mem_percent: f64,
    pub virtual_kb: u64,
    pub resident_kb: u64,
    pub state_code: char,
    pub command: String,
    pub priority: i64,
    pub nice_delta: i64,
    pub thread_count: i64,
}

/// Host-wide metrics for one sampling pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SystemMetrics {
    /// Aggregate CPU usage (0 on the first pass)
    pub cpu_percent: f64,
    /// Per-core CPU usage
    pub core_percents: Vec<f64>,
    pub mem_total_kb: u64,
    pub mem_used_kb: u64,
    pub mem_percent: f64,
    pub buffers_kb: u64,
    pub cached_kb: u64,
    pub swap_total_kb: u64,
    pub swap_used_kb: u64,
    pub swap_percent: f64,
    /// 1, 5 and 15 minute load averages
    pub load: [f64; 3],
    /// Number of processes enumerated this pass
    pub task_count: usize,
}

/// Samples the host through a [`SnapshotProvider`], keeping the previous
/// counters needed for CPU deltas.
pub struct Sampler {
    provider: Box<dyn SnapshotProvider>,
    cpu: CpuTracker,
}

impl Sampler {
    pub fn new(provider: Box<dyn SnapshotProvider>) -> Self {
        Self {
            provider,
            cpu: CpuTracker::new(),
        }
    }

    /// Takes one sample of the host.
    ///
    /// System totals are read before processes so both CPU deltas cover the
    /// same interval.
    pub fn sample(&mut self) -> (SystemMetrics, Vec<ProcessSample>) {
        let totals = self.provider.read_system_totals();
        let records = self.provider.list_processes();

        let have_cpu_total = totals.cpu_total.is_some();
        let usage = self.cpu.update_system(totals.cpu_total, &totals.cpu_cores);
        let mem_total_kb = totals.memory.total_kb;

        // Without a system reading the stored process ticks stay put, so the
        // next deltas on both sides span the same interval
        let samples: Vec<ProcessSample> = records
            .into_iter()
            .filter(|r| r.pid > 0)
            .map(|r| {
                let cpu_percent = if have_cpu_total {
                    self.cpu.process_usage(r.pid, r.cpu_ticks, usage.total_ticks_diff)
                } else {
                    0.0
                };
                to_sample(r, cpu_percent, mem_total_kb)
            })
            .collect();

        let active_pids: Vec<i32> = samples.iter().map(|s| s.pid).collect();
        self.cpu.cleanup_stale_processes(&active_pids);

        debug!(
            "sampled {} processes, cpu {:.1}%, tick delta {}",
            samples.len(),
            usage.total_percent,
            usage.total_ticks_diff
        );

        let metrics = SystemMetrics {
            cpu_percent: usage.total_percent,
            core_percents: usage.core_percents,
            mem_total_kb,
            mem_used_kb: totals.memory.used_kb(),
            mem_percent: totals.memory.used_percent(),
            buffers_kb: totals.memory.buffers_kb,
            cached_kb: totals.memory.cached_kb,
            swap_total_kb: totals.memory.swap_total_kb,
            swap_used_kb: totals.memory.swap_used_kb(),
            swap_percent: totals.memory.swap_percent(),
            load: totals.load,
            task_count: samples.len(),
        };

        (metrics, samples)
    }
}

fn to_sample(record: ProcessRawRecord, cpu_percent: f64, mem_total_kb: u64) -> ProcessSample {
    let command = record.display_command();
    ProcessSample {
        pid: record.pid,
        parent_pid: record.parent_pid,
        mem_percent: process_mem_percent(record.resident_kb, mem_total_kb),
        owner_name: record.owner,
        cpu_percent,
        virtual_kb: record.virtual_kb,
        resident_kb: record.resident_kb,
        state_code: record.state,
        command,
        priority: record.priority,
        nice_delta: record.nice,
        thread_count: record.thread_count,
    }
}
