//! Application state and core logic

use log::info;

use crate::constants::{DEFAULT_REFRESH_MS, MAX_REFRESH_MS, MIN_REFRESH_MS};
use crate::system::{ProcessControl, Sampler, SnapshotProvider, SystemMetrics};

use super::cli::Args;
use super::{HistorySet, ProcessTable, SortColumn, ViewMode};

/// Application state
///
/// Owned by the main loop. The table, the histories and `system` are always
/// replaced together by [`App::refresh`], so one rendered frame never mixes
/// two sampling passes.
pub struct App {
    /// Sampler producing one snapshot per refresh
    sampler: Sampler,
    /// Kill and renice requests go through here
    pub(super) control: Box<dyn ProcessControl>,
    /// Filtered, sorted process list with selection state
    pub table: ProcessTable,
    /// Rolling histories for the graphs
    pub history: HistorySet,
    /// Host metrics from the latest pass
    pub system: SystemMetrics,
    /// Current view/input mode
    pub view_mode: ViewMode,
    /// Transient status message, cleared on the next key press
    pub status_message: Option<String>,
    /// Refresh interval in milliseconds
    pub refresh_interval_ms: u64,
    /// Host name shown in the header
    pub hostname: String,
}

impl App {
    /// Creates a new App instance with default settings.
    pub fn new(provider: Box<dyn SnapshotProvider>, control: Box<dyn ProcessControl>) -> Self {
        Self {
            sampler: Sampler::new(provider),
            control,
            table: ProcessTable::new(SortColumn::Cpu, true, String::new()),
            history: HistorySet::new(),
            system: SystemMetrics::default(),
            view_mode: ViewMode::default(),
            status_message: None,
            refresh_interval_ms: DEFAULT_REFRESH_MS,
            hostname: String::new(),
        }
    }

    /// Creates a new App instance configured with command-line arguments.
    pub fn with_args(
        provider: Box<dyn SnapshotProvider>,
        control: Box<dyn ProcessControl>,
        args: &Args,
    ) -> Self {
        let mut app = Self::new(provider, control);
        app.refresh_interval_ms = args.refresh_ms();
        app.table = ProcessTable::new(
            args.sort,
            !args.ascending,
            args.filter.clone().unwrap_or_default(),
        );
        app
    }

    /// Takes a new sample and replaces the model with it.
    pub fn refresh(&mut self) {
        let (metrics, samples) = self.sampler.sample();
        self.history.record(&metrics);
        self.table.update(samples);
        self.system = metrics;
    }

    /// Increases refresh interval (slower refresh).
    ///
    /// Steps: 250ms → 500ms → 1s → 2s → 5s → 10s
    pub fn increase_refresh_interval(&mut self) {
        self.refresh_interval_ms = match self.refresh_interval_ms {
            x if x >= 5000 => MAX_REFRESH_MS,
            x if x >= 2000 => 5000,
            x if x >= 1000 => 2000,
            x if x >= 500 => 1000,
            _ => 500,
        };
        self.announce_refresh_interval();
    }

    /// Decreases refresh interval (faster refresh).
    ///
    /// Steps: 10s → 5s → 2s → 1s → 500ms → 250ms
    pub fn decrease_refresh_interval(&mut self) {
        self.refresh_interval_ms = match self.refresh_interval_ms {
            x if x <= 500 => MIN_REFRESH_MS,
            x if x <= 1000 => 500,
            x if x <= 2000 => 1000,
            x if x <= 5000 => 2000,
            _ => 5000,
        };
        self.announce_refresh_interval();
    }

    fn announce_refresh_interval(&mut self) {
        info!("refresh interval set to {}ms", self.refresh_interval_ms);
        self.status_message = Some(format!("Refresh interval: {}", self.format_refresh_interval()));
    }

    /// Formats refresh interval for display.
    ///
    /// # Returns
    /// A string like "2.0s" or "500ms" depending on interval.
    pub fn format_refresh_interval(&self) -> String {
        if self.refresh_interval_ms >= 1000 {
            format!("{:.1}s", self.refresh_interval_ms as f64 / 1000.0)
        } else {
            format!("{}ms", self.refresh_interval_ms)
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::system::cpu::CpuTicks;
    use crate::system::memory::MemoryCounters;
    use crate::system::processes::ProcessRawRecord;
    use crate::system::sampler::tests::{record, FakeHost, FakeProvider};
    use crate::system::snapshot::SystemRawCounters;
    use crate::system::error::ControlResult;

    /// One request seen by [`FakeControl`]
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum ControlCall {
        Terminate(i32),
        Renice(i32, i32),
    }

    /// Process control that records requests instead of issuing them
    #[derive(Clone, Default)]
    pub struct FakeControl {
        pub calls: Rc<RefCell<Vec<ControlCall>>>,
    }

    impl ProcessControl for FakeControl {
        fn send_terminate(&mut self, pid: i32) -> ControlResult<()> {
            self.calls.borrow_mut().push(ControlCall::Terminate(pid));
            Ok(())
        }

        fn adjust_priority(&mut self, pid: i32, delta: i32) -> ControlResult<i32> {
            self.calls.borrow_mut().push(ControlCall::Renice(pid, delta));
            Ok(-delta)
        }
    }

    pub fn fake_host(processes: Vec<ProcessRawRecord>) -> Rc<RefCell<FakeHost>> {
        Rc::new(RefCell::new(FakeHost {
            processes,
            totals: SystemRawCounters {
                cpu_total: Some(CpuTicks {
                    idle: 1_000,
                    ..CpuTicks::default()
                }),
                cpu_cores: vec![CpuTicks::default(); 2],
                memory: MemoryCounters {
                    total_kb: 1_000_000,
                    available_kb: Some(500_000),
                    ..MemoryCounters::default()
                },
                load: [1.0, 0.5, 0.25],
            },
        }))
    }

    /// App over a fake host with a handful of processes, already refreshed.
    pub fn test_app() -> (App, Rc<RefCell<FakeHost>>, FakeControl) {
        let host = fake_host(
            (1..=10)
                .map(|pid| record(pid, "me", &format!("job{pid}"), 0))
                .collect(),
        );
        let control = FakeControl::default();
        let mut app = App::new(
            Box::new(FakeProvider(host.clone())),
            Box::new(control.clone()),
        );
        app.table = ProcessTable::new(SortColumn::Pid, false, String::new());
        app.table.set_visible_rows(5);
        app.refresh();
        (app, host, control)
    }

    #[test]
    fn test_refresh_updates_model_history_and_metrics_together() {
        let (mut app, _host, _control) = test_app();
        assert_eq!(app.table.total_len(), 10);
        assert_eq!(app.system.task_count, 10);
        assert_eq!(app.history.cpu.len(), 1);
        assert_eq!(app.history.cores.len(), 2);

        app.refresh();
        assert_eq!(app.history.cpu.len(), 2);
        assert_eq!(app.history.memory.latest(), Some(app.system.mem_percent));
    }

    #[test]
    fn test_with_args() {
        let host = fake_host(Vec::new());
        let args = Args {
            refresh: 50,
            sort: SortColumn::Memory,
            ascending: true,
            filter: Some("sh".to_string()),
            log_file: None,
        };
        let app = App::with_args(
            Box::new(FakeProvider(host)),
            Box::new(FakeControl::default()),
            &args,
        );
        assert_eq!(app.refresh_interval_ms, MIN_REFRESH_MS);
        assert_eq!(app.table.sort_column(), SortColumn::Memory);
        assert!(!app.table.sort_descending());
        assert_eq!(app.table.filter_text(), "sh");
    }

    #[test]
    fn test_refresh_interval_ladder() {
        let (mut app, _host, _control) = test_app();
        app.refresh_interval_ms = 1000;
        app.increase_refresh_interval();
        assert_eq!(app.refresh_interval_ms, 2000);
        app.increase_refresh_interval();
        app.increase_refresh_interval();
        app.increase_refresh_interval();
        assert_eq!(app.refresh_interval_ms, MAX_REFRESH_MS);
        for _ in 0..10 {
            app.decrease_refresh_interval();
        }
        assert_eq!(app.refresh_interval_ms, MIN_REFRESH_MS);
        assert_eq!(app.format_refresh_interval(), "250ms");
        assert!(app.status_message.is_some());
    }
}
