//! Process management operations (kill, priority)
//!
//! Requests are fire-and-forget. Failures are logged and shown on the status
//! line; the next sampling pass is the real confirmation.

use log::warn;

use super::state::App;
use super::view_mode::KillTarget;
use super::ViewMode;
use crate::constants::RENICE_STEP;

impl App {
    /// Opens the kill confirmation for the selected process.
    ///
    /// The pid and command are captured now, so a later re-sort or refresh
    /// cannot change which process the confirmation applies to.
    pub fn request_kill(&mut self) {
        let Some(process) = self.table.selected() else {
            return;
        };
        self.view_mode = ViewMode::ConfirmKill(KillTarget {
            pid: process.pid,
            command: process.command.clone(),
        });
    }

    /// Sends SIGTERM to the captured target and returns to the list.
    pub fn confirm_kill(&mut self) {
        let ViewMode::ConfirmKill(target) = std::mem::take(&mut self.view_mode) else {
            return;
        };

        match self.control.send_terminate(target.pid) {
            Ok(()) => {
                self.status_message = Some(format!("Sent SIGTERM to PID {}", target.pid));
            }
            Err(e) => {
                warn!("terminate {} failed: {}", target.pid, e);
                self.status_message = Some(format!("Kill failed: {}", e));
            }
        }
    }

    /// Cancels the pending kill
    pub fn cancel_kill(&mut self) {
        self.view_mode = ViewMode::Normal;
    }

    /// Raises the priority of the selected process
    pub fn raise_priority(&mut self) {
        self.renice_selected(RENICE_STEP);
    }

    /// Lowers the priority of the selected process
    pub fn lower_priority(&mut self) {
        self.renice_selected(-RENICE_STEP);
    }

    fn renice_selected(&mut self, delta: i32) {
        let Some(process) = self.table.selected() else {
            return;
        };
        let pid = process.pid;

        match self.control.adjust_priority(pid, delta) {
            Ok(nice) => {
                self.status_message = Some(format!("PID {}: nice {} → {}", pid, process.nice_delta, nice));
            }
            Err(e) => {
                warn!("renice {} by {} failed: {}", pid, delta, e);
                self.status_message = Some(format!("Renice failed: {}", e));
            }
        }
    }
}
