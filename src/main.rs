//! HiTop: an interactive process monitor for the Linux terminal
//!
//! Samples `/proc` on a fixed cadence and shows a sortable, filterable
//! process table with CPU and memory history graphs.
//!
//! Controls:
//! - q: Quit
//! - ↑/k ↓/j: Navigate process list
//! - PgUp/PgDown: Scroll by page
//! - Home/End: Jump to start/end
//! - s: Cycle sort column
//! - r: Reverse sort order
//! - f or /: Filter by command or user
//! - c: Clear filter
//! - x/Delete: Send SIGTERM to selected process (with confirmation)
//! - +/-: Raise/lower process priority
//! - [: Slow down refresh rate
//! - ]: Speed up refresh rate
//! - h/?: Help

mod app;
mod constants;
mod logging;
mod shutdown;
mod system;
mod ui;

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind},
    terminal,
};
use log::{error, info};

use app::{App, Args, KeyAction};
use constants::INPUT_POLL_SLICE_MS;
use shutdown::ShutdownFlag;
use system::{LinuxControl, ProcfsProvider};
use ui::{Layout, TerminalGuard};

fn main() -> ExitCode {
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("hitop: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    if let Some(path) = logging::init(args.log_file.as_deref())? {
        info!("logging to {}", path.display());
    }
    let shutdown = ShutdownFlag::install().context("cannot install signal handlers")?;

    let mut app = App::with_args(Box::new(ProcfsProvider::new()), Box::new(LinuxControl), args);
    app.hostname = system::hostname();
    info!(
        "starting: refresh {}ms, sort {} {}",
        app.refresh_interval_ms,
        app.table.sort_column().name(),
        if app.table.sort_descending() { "desc" } else { "asc" }
    );

    // Initial refresh
    app.refresh();

    let _terminal = TerminalGuard::enter().context("cannot initialize terminal")?;
    let mut stdout = BufWriter::new(io::stdout());
    event_loop(&mut stdout, &mut app, &shutdown)?;

    info!("exiting");
    Ok(())
}

/// Renders, waits for one key or the next refresh, and repeats until quit
/// or a stop signal.
fn event_loop<W: Write>(out: &mut W, app: &mut App, shutdown: &ShutdownFlag) -> Result<()> {
    let mut last_refresh = Instant::now();

    loop {
        if shutdown.is_requested() {
            info!("stop requested by signal");
            return Ok(());
        }

        // The terminal may have been resized since the last frame
        let (width, height) = terminal::size().context("cannot query terminal size")?;
        let layout = Layout::compute(width, height, app.history.cores.len());
        app.table.set_visible_rows(layout.table_rows);
        ui::render(out, app, &layout)?;

        let timeout = Duration::from_millis(app.refresh_interval_ms)
            .checked_sub(last_refresh.elapsed())
            .unwrap_or(Duration::ZERO);

        let mut refresh_now = false;
        if let Some(key) = next_key(timeout, shutdown)? {
            match app.handle_key(key) {
                KeyAction::Exit => return Ok(()),
                KeyAction::Refresh => refresh_now = true,
                KeyAction::Continue => {}
            }
        }

        // Recalculate interval in case it changed
        if refresh_now || last_refresh.elapsed() >= Duration::from_millis(app.refresh_interval_ms) {
            app.refresh();
            last_refresh = Instant::now();
        }
    }
}

/// Waits up to `timeout` for a key press.
///
/// Resize events and key releases come back as `None`, as does a stop
/// signal; the caller redraws and checks the stop flag either way.
fn next_key(timeout: Duration, shutdown: &ShutdownFlag) -> io::Result<Option<KeyEvent>> {
    let ready = wait_sliced(
        timeout,
        Duration::from_millis(INPUT_POLL_SLICE_MS),
        || shutdown.is_requested(),
        |slice| match event::poll(slice) {
            Err(e) if e.kind() == io::ErrorKind::Interrupted => Ok(false),
            other => other,
        },
    )?;
    if !ready {
        return Ok(None);
    }
    match event::read() {
        // Only handle key PRESS events, ignore Release and Repeat
        Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => Ok(Some(key)),
        Ok(_) => Ok(None),
        Err(e) if e.kind() == io::ErrorKind::Interrupted => Ok(None),
        Err(e) => Err(e),
    }
}

/// Calls `poll` with waits of at most `slice` until it reports readiness,
/// `timeout` runs out, or `stop` returns true.
///
/// crossterm retries interrupted polls internally, so a signal alone never
/// cuts a wait short.
fn wait_sliced(
    timeout: Duration,
    slice: Duration,
    stop: impl Fn() -> bool,
    mut poll: impl FnMut(Duration) -> io::Result<bool>,
) -> io::Result<bool> {
    let deadline = Instant::now() + timeout;
    loop {
        if stop() {
            return Ok(false);
        }
        let remaining = deadline.saturating_duration_since(Instant::now());
        if poll(remaining.min(slice))? {
            return Ok(true);
        }
        if remaining <= slice {
            return Ok(false);
        }
    }
}
