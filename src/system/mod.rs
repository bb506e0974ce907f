//! System information module - process, memory and CPU metrics
//!
//! This module reads the Linux `/proc` filesystem and talks to the kernel
//! for process control. Everything above it sees only the
//! [`SnapshotProvider`] and [`ProcessControl`] seams.

pub mod control;
pub mod cpu;
pub mod error;
pub mod memory;
pub mod processes;
pub mod sampler;
pub mod snapshot;

pub use control::{LinuxControl, ProcessControl};
pub use memory::format_kb;
pub use sampler::{ProcessSample, Sampler, SystemMetrics};
pub use snapshot::{hostname, ProcfsProvider, SnapshotProvider};
