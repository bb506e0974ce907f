//! CPU usage tracking from cumulative tick counters
//!
//! The kernel only exposes cumulative jiffie counts, so every percentage here
//! is the difference between two consecutive readings. The tracker keeps the
//! previous reading for the aggregate line, each core, and each process.
//!
//! The first pass after start has nothing to difference against and reports
//! 0% everywhere. Processes seen for the first time also report 0%.

use std::collections::HashMap;

/// Cumulative tick counters from one `cpu` line of `/proc/stat`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuTicks {
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
    pub iowait: u64,
    pub irq: u64,
    pub softirq: u64,
    pub steal: u64,
}

impl CpuTicks {
    /// All ticks spent in any state.
    pub fn total(&self) -> u64 {
        self.user
            + self.nice
            + self.system
            + self.idle
            + self.iowait
            + self.irq
            + self.softirq
            + self.steal
    }

    /// Ticks spent doing work (everything except idle and iowait).
    pub fn work(&self) -> u64 {
        self.total().saturating_sub(self.idle + self.iowait)
    }
}

/// Converts a pair of tick deltas into a percentage.
///
/// Returns exactly `0.0` when `total_diff` is zero and never leaves `[0, 100]`.
#[must_use]
pub fn usage_percent(work_diff: u64, total_diff: u64) -> f64 {
    if total_diff == 0 {
        return 0.0;
    }
    (100.0 * work_diff as f64 / total_diff as f64).clamp(0.0, 100.0)
}

/// Usage between two readings of the same counter line.
fn ticks_usage(prev: &CpuTicks, current: &CpuTicks) -> f64 {
    usage_percent(
        current.work().saturating_sub(prev.work()),
        current.total().saturating_sub(prev.total()),
    )
}

/// System-wide CPU usage for one sampling pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SystemCpuUsage {
    /// Aggregate usage across all cores
    pub total_percent: f64,
    /// Usage per core, in `/proc/stat` order
    pub core_percents: Vec<f64>,
    /// Aggregate tick delta since the previous pass (0 on cold start)
    pub total_ticks_diff: u64,
}

/// Holds the previous counter readings needed for delta calculation
#[derive(Debug, Clone, Default)]
pub struct CpuTracker {
    /// Previous aggregate reading
    prev_total: Option<CpuTicks>,
    /// Previous per-core readings
    prev_cores: Vec<CpuTicks>,
    /// Previous `utime + stime` per process (keyed by PID)
    prev_processes: HashMap<i32, u64>,
}

impl CpuTracker {
    /// Creates an empty tracker; the next update is a cold start.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds a new aggregate and per-core reading and returns usage.
    ///
    /// When the aggregate line could not be read this pass (`None`), usage is
    /// reported as zero and the previous reading is kept for the next pass.
    pub fn update_system(&mut self, total: Option<CpuTicks>, cores: &[CpuTicks]) -> SystemCpuUsage {
        let Some(current) = total else {
            return SystemCpuUsage {
                core_percents: vec![0.0; cores.len()],
                ..SystemCpuUsage::default()
            };
        };

        let (total_percent, total_ticks_diff) = match self.prev_total {
            Some(prev) => (
                ticks_usage(&prev, &current),
                current.total().saturating_sub(prev.total()),
            ),
            None => (0.0, 0),
        };

        let core_percents = if self.prev_cores.len() == cores.len() {
            self.prev_cores
                .iter()
                .zip(cores)
                .map(|(prev, cur)| ticks_usage(prev, cur))
                .collect()
        } else {
            // Core count changed (or cold start): nothing to compare against
            vec![0.0; cores.len()]
        };

        self.prev_total = Some(current);
        self.prev_cores = cores.to_vec();

        SystemCpuUsage {
            total_percent,
            core_percents,
            total_ticks_diff,
        }
    }

    /// Returns a process's share of the system tick delta and stores its
    /// current `utime + stime` for the next pass.
    ///
    /// The share is normalized against all cores together, so a process
    /// saturating one core of four reports 25%.
    pub fn process_usage(&mut self, pid: i32, cpu_ticks: u64, system_ticks_diff: u64) -> f64 {
        let previous = self.prev_processes.insert(pid, cpu_ticks);
        match previous {
            Some(prev) => usage_percent(cpu_ticks.saturating_sub(prev), system_ticks_diff),
            None => 0.0,
        }
    }

    /// Forgets processes that no longer exist.
    pub fn cleanup_stale_processes(&mut self, active_pids: &[i32]) {
        let active: std::collections::HashSet<i32> = active_pids.iter().copied().collect();
        self.prev_processes.retain(|pid, _| active.contains(pid));
    }

    /// Number of processes with a stored previous reading.
    #[cfg(test)]
    pub fn tracked_processes(&self) -> usize {
        self.prev_processes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticks(user: u64, system: u64, idle: u64) -> CpuTicks {
        CpuTicks {
            user,
            system,
            idle,
            ..CpuTicks::default()
        }
    }

    #[test]
    fn test_usage_percent_bounds() {
        for (work, total) in [(0, 1), (1, 1), (5, 10), (10, 3), (999, 1000), (7, 7)] {
            let usage = usage_percent(work, total);
            assert!((0.0..=100.0).contains(&usage), "{work}/{total} gave {usage}");
        }
        assert_eq!(usage_percent(50, 200), 25.0);
    }

    #[test]
    fn test_usage_percent_zero_total_is_exactly_zero() {
        assert_eq!(usage_percent(0, 0), 0.0);
        assert_eq!(usage_percent(123, 0), 0.0);
    }

    #[test]
    fn test_ticks_work_excludes_idle_and_iowait() {
        let t = CpuTicks {
            user: 10,
            nice: 1,
            system: 4,
            idle: 80,
            iowait: 5,
            irq: 0,
            softirq: 0,
            steal: 0,
        };
        assert_eq!(t.total(), 100);
        assert_eq!(t.work(), 15);
    }

    #[test]
    fn test_cold_start_reports_zero() {
        let mut tracker = CpuTracker::new();
        let usage = tracker.update_system(Some(ticks(500, 200, 300)), &[ticks(250, 100, 150)]);
        assert_eq!(usage.total_percent, 0.0);
        assert_eq!(usage.core_percents, vec![0.0]);
        assert_eq!(usage.total_ticks_diff, 0);
        assert_eq!(tracker.process_usage(42, 1_000, usage.total_ticks_diff), 0.0);
    }

    #[test]
    fn test_system_usage_from_deltas() {
        let mut tracker = CpuTracker::new();
        tracker.update_system(Some(ticks(100, 100, 800)), &[]);
        let usage = tracker.update_system(Some(ticks(160, 120, 820)), &[]);
        assert_eq!(usage.total_ticks_diff, 100);
        assert!((usage.total_percent - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_unreadable_pass_keeps_previous_reading() {
        let mut tracker = CpuTracker::new();
        tracker.update_system(Some(ticks(100, 0, 100)), &[]);
        let missing = tracker.update_system(None, &[]);
        assert_eq!(missing.total_percent, 0.0);
        assert_eq!(missing.total_ticks_diff, 0);
        let usage = tracker.update_system(Some(ticks(150, 0, 150)), &[]);
        assert_eq!(usage.total_ticks_diff, 100);
        assert!((usage.total_percent - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_per_process_share_of_system_delta() {
        let mut tracker = CpuTracker::new();
        tracker.update_system(Some(ticks(0, 0, 0)), &[]);
        for pid in [1, 2, 3] {
            tracker.process_usage(pid, 0, 0);
        }
        let usage = tracker.update_system(Some(ticks(100, 0, 900)), &[]);
        assert_eq!(usage.total_ticks_diff, 1000);

        let a = tracker.process_usage(1, 10 + 5, usage.total_ticks_diff);
        let b = tracker.process_usage(2, 2 + 1, usage.total_ticks_diff);
        let c = tracker.process_usage(3, 50, usage.total_ticks_diff);
        assert!((a - 1.5).abs() < 1e-9);
        assert!((b - 0.3).abs() < 1e-9);
        assert!((c - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_core_count_change_resets_cores() {
        let mut tracker = CpuTracker::new();
        tracker.update_system(Some(ticks(10, 0, 10)), &[ticks(5, 0, 5)]);
        let usage = tracker.update_system(
            Some(ticks(20, 0, 20)),
            &[ticks(10, 0, 10), ticks(10, 0, 10)],
        );
        assert_eq!(usage.core_percents, vec![0.0, 0.0]);
    }

    #[test]
    fn test_cleanup_stale_processes() {
        let mut tracker = CpuTracker::new();
        tracker.process_usage(1, 10, 0);
        tracker.process_usage(2, 10, 0);
        tracker.cleanup_stale_processes(&[2]);
        assert_eq!(tracker.tracked_processes(), 1);
        // PID 1 comes back as a new process: no previous reading
        assert_eq!(tracker.process_usage(1, 50, 100), 0.0);
    }
}
