//! Snapshot provider: the sampler's only view of the host
//!
//! The provider returns absolute counters and never fails. Anything it cannot
//! read comes back as a zero or `None` default.

use log::warn;
use procfs::{CpuTime, Current, CurrentSI, KernelStats, LoadAverage, Meminfo};

use super::cpu::CpuTicks;
use super::memory::MemoryCounters;
use super::processes::{enumerate_processes, ProcessRawRecord, UserCache};

/// Host-wide counters for one pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SystemRawCounters {
    /// Aggregate `cpu` line; `None` if `/proc/stat` was unreadable
    pub cpu_total: Option<CpuTicks>,
    /// One entry per `cpuN` line
    pub cpu_cores: Vec<CpuTicks>,
    pub memory: MemoryCounters,
    /// 1, 5 and 15 minute load averages
    pub load: [f64; 3],
}

/// Source of raw process and system counters.
pub trait SnapshotProvider {
    /// Lists every visible process with its absolute counters.
    fn list_processes(&mut self) -> Vec<ProcessRawRecord>;

    /// Reads CPU, memory and load counters for the whole host.
    fn read_system_totals(&mut self) -> SystemRawCounters;
}

/// Snapshot provider reading `/proc` through the `procfs` crate.
#[derive(Debug, Default)]
pub struct ProcfsProvider {
    users: UserCache,
}

impl ProcfsProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl From<&CpuTime> for CpuTicks {
    fn from(t: &CpuTime) -> Self {
        CpuTicks {
            user: t.user,
            nice: t.nice,
            system: t.system,
            idle: t.idle,
            iowait: t.iowait.unwrap_or(0),
            irq: t.irq.unwrap_or(0),
            softirq: t.softirq.unwrap_or(0),
            steal: t.steal.unwrap_or(0),
        }
    }
}

impl From<&Meminfo> for MemoryCounters {
    fn from(m: &Meminfo) -> Self {
        // procfs reports bytes
        MemoryCounters {
            total_kb: m.mem_total / 1024,
            free_kb: m.mem_free / 1024,
            available_kb: m.mem_available.map(|b| b / 1024),
            buffers_kb: m.buffers / 1024,
            cached_kb: m.cached / 1024,
            swap_total_kb: m.swap_total / 1024,
            swap_free_kb: m.swap_free / 1024,
        }
    }
}

impl SnapshotProvider for ProcfsProvider {
    fn list_processes(&mut self) -> Vec<ProcessRawRecord> {
        enumerate_processes(&mut self.users)
    }

    fn read_system_totals(&mut self) -> SystemRawCounters {
        let mut counters = SystemRawCounters::default();

        match KernelStats::current() {
            Ok(stats) => {
                counters.cpu_total = Some(CpuTicks::from(&stats.total));
                counters.cpu_cores = stats.cpu_time.iter().map(CpuTicks::from).collect();
            }
            Err(e) => warn!("cannot read /proc/stat: {}", e),
        }

        match Meminfo::current() {
            Ok(meminfo) => counters.memory = MemoryCounters::from(&meminfo),
            Err(e) => warn!("cannot read /proc/meminfo: {}", e),
        }

        match LoadAverage::current() {
            Ok(load) => {
                counters.load = [load.one as f64, load.five as f64, load.fifteen as f64];
            }
            Err(e) => warn!("cannot read /proc/loadavg: {}", e),
        }

        counters
    }
}

/// Host name from `/proc/sys/kernel/hostname`, empty if unreadable.
pub fn hostname() -> String {
    match std::fs::read_to_string("/proc/sys/kernel/hostname") {
        Ok(name) => name.trim().to_string(),
        Err(e) => {
            warn!("cannot read host name: {}", e);
            String::new()
        }
    }
}
