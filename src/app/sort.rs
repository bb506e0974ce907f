//! Sorting options for the process list

use std::cmp::Ordering;
use std::str::FromStr;

use crate::system::ProcessSample;

/// Sort column options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Pid,
    Owner,
    Cpu,
    Memory,
    Command,
    Priority,
}

impl SortColumn {
    /// Cycle to the next sort option
    pub fn next(self) -> Self {
        match self {
            SortColumn::Pid => SortColumn::Owner,
            SortColumn::Owner => SortColumn::Cpu,
            SortColumn::Cpu => SortColumn::Memory,
            SortColumn::Memory => SortColumn::Command,
            SortColumn::Command => SortColumn::Priority,
            SortColumn::Priority => SortColumn::Pid,
        }
    }

    /// Get display name for the sort column
    pub fn name(&self) -> &'static str {
        match self {
            SortColumn::Pid => "PID",
            SortColumn::Owner => "User",
            SortColumn::Cpu => "CPU%",
            SortColumn::Memory => "MEM%",
            SortColumn::Command => "Command",
            SortColumn::Priority => "Priority",
        }
    }

    /// Compares two samples on this column alone, ascending.
    pub fn compare(&self, a: &ProcessSample, b: &ProcessSample) -> Ordering {
        match self {
            SortColumn::Pid => a.pid.cmp(&b.pid),
            SortColumn::Owner => a.owner_name.cmp(&b.owner_name),
            SortColumn::Cpu => a.cpu_percent.total_cmp(&b.cpu_percent),
            SortColumn::Memory => a.mem_percent.total_cmp(&b.mem_percent),
            SortColumn::Command => a.command.cmp(&b.command),
            SortColumn::Priority => a.priority.cmp(&b.priority),
        }
    }
}

impl FromStr for SortColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pid" => Ok(SortColumn::Pid),
            "user" | "owner" => Ok(SortColumn::Owner),
            "cpu" => Ok(SortColumn::Cpu),
            "mem" | "memory" => Ok(SortColumn::Memory),
            "command" | "cmd" => Ok(SortColumn::Command),
            "priority" | "pri" => Ok(SortColumn::Priority),
            other => Err(format!(
                "unknown sort column '{}' (expected pid, user, cpu, mem, command or priority)",
                other
            )),
        }
    }
}
