//! Memory counters from `/proc/meminfo`
//!
//! Values are kept in kilobytes, the unit the kernel reports them in.

/// System-wide memory counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryCounters {
    /// Total usable physical memory
    pub total_kb: u64,
    /// Completely unused memory
    pub free_kb: u64,
    /// Kernel estimate of memory available without swapping, if exposed
    pub available_kb: Option<u64>,
    /// Block device buffers
    pub buffers_kb: u64,
    /// Page cache
    pub cached_kb: u64,
    /// Total swap space (0 when swap is off)
    pub swap_total_kb: u64,
    /// Unused swap space
    pub swap_free_kb: u64,
}

impl MemoryCounters {
    /// Memory available for new allocations.
    ///
    /// Older kernels lack `MemAvailable`; free + buffers + cache stands in.
    pub fn available(&self) -> u64 {
        self.available_kb
            .unwrap_or(self.free_kb + self.buffers_kb + self.cached_kb)
    }

    /// Memory in use, calculated as `total - available`.
    pub fn used_kb(&self) -> u64 {
        self.total_kb.saturating_sub(self.available())
    }

    /// Memory in use as a percentage of total (0 if total is unknown).
    pub fn used_percent(&self) -> f64 {
        if self.total_kb == 0 {
            return 0.0;
        }
        (self.used_kb() as f64 / self.total_kb as f64 * 100.0).clamp(0.0, 100.0)
    }

    /// Swap in use, calculated as `swap total - swap free`.
    pub fn swap_used_kb(&self) -> u64 {
        self.swap_total_kb.saturating_sub(self.swap_free_kb)
    }

    /// Swap in use as a percentage of swap total (0 without swap).
    pub fn swap_percent(&self) -> f64 {
        if self.swap_total_kb == 0 {
            return 0.0;
        }
        (self.swap_used_kb() as f64 / self.swap_total_kb as f64 * 100.0).clamp(0.0, 100.0)
    }
}

/// Resident memory as a percentage of total memory.
///
/// Computed as `resident / (total / 100)`; 0 when total is unknown.
#[must_use]
pub fn process_mem_percent(resident_kb: u64, total_kb: u64) -> f64 {
    if total_kb == 0 {
        return 0.0;
    }
    resident_kb as f64 / (total_kb as f64 / 100.0)
}

/// Formats a kilobyte count into a short human-readable string.
#[must_use]
pub fn format_kb(kb: u64) -> String {
    const MB: u64 = 1024;
    const GB: u64 = MB * 1024;
    const TB: u64 = GB * 1024;

    if kb >= TB {
        format!("{:.1}T", kb as f64 / TB as f64)
    } else if kb >= GB {
        format!("{:.1}G", kb as f64 / GB as f64)
    } else if kb >= MB {
        format!("{:.1}M", kb as f64 / MB as f64)
    } else {
        format!("{}K", kb)
    }
}
