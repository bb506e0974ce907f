//! Process control: terminate and renice
//!
//! Both operations are fire-and-forget. The request is handed to the kernel
//! and the next sampling pass shows whether it took effect.

use log::debug;
use nix::errno::Errno;
use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;

use super::error::{ControlError, ControlResult};
use crate::constants::{NICE_MAX, NICE_MIN};

/// Operations the dispatcher may issue against a running process.
pub trait ProcessControl {
    /// Sends SIGTERM to `pid`.
    fn send_terminate(&mut self, pid: i32) -> ControlResult<()>;

    /// Changes the scheduling priority of `pid` by `delta` steps.
    ///
    /// A positive delta raises priority (lowers the nice value).
    /// Returns the nice value that was requested.
    fn adjust_priority(&mut self, pid: i32, delta: i32) -> ControlResult<i32>;
}

/// Computes the nice value to request for a priority change.
///
/// Raising priority means a lower nice value; the result is clamped to the
/// range the kernel accepts.
#[must_use]
pub fn target_nice(current_nice: i32, delta: i32) -> i32 {
    current_nice.saturating_sub(delta).clamp(NICE_MIN, NICE_MAX)
}

fn check_target(pid: i32) -> ControlResult<()> {
    if pid <= 0 {
        return Err(ControlError::InvalidTarget { pid });
    }
    Ok(())
}

/// Process control backed by `kill(2)` and `setpriority(2)`.
#[derive(Debug, Default)]
pub struct LinuxControl;

impl LinuxControl {
    fn current_nice(pid: i32) -> ControlResult<i32> {
        // getpriority can legitimately return -1, so errno is the only signal
        Errno::clear();
        // SAFETY: getpriority only reads scheduler state for the given id.
        let nice = unsafe { libc::getpriority(libc::PRIO_PROCESS, pid as libc::id_t) };
        match Errno::last() {
            Errno::UnknownErrno => Ok(nice),
            errno => Err(ControlError::from_errno("getpriority", pid, errno)),
        }
    }
}

impl ProcessControl for LinuxControl {
    fn send_terminate(&mut self, pid: i32) -> ControlResult<()> {
        check_target(pid)?;
        signal::kill(Pid::from_raw(pid), Signal::SIGTERM)
            .map_err(|errno| ControlError::from_errno("kill", pid, errno))?;
        debug!("sent SIGTERM to {}", pid);
        Ok(())
    }

    fn adjust_priority(&mut self, pid: i32, delta: i32) -> ControlResult<i32> {
        check_target(pid)?;
        let current = Self::current_nice(pid)?;
        let requested = target_nice(current, delta);

        // SAFETY: setpriority takes plain integer arguments.
        let res = unsafe { libc::setpriority(libc::PRIO_PROCESS, pid as libc::id_t, requested) };
        if res != 0 {
            return Err(ControlError::from_errno("setpriority", pid, Errno::last()));
        }
        debug!("reniced {} from {} to {}", pid, current, requested);
        Ok(requested)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_nice_direction() {
        assert_eq!(target_nice(0, 1), -1);
        assert_eq!(target_nice(0, -1), 1);
    }

    #[test]
    fn test_target_nice_clamps() {
        assert_eq!(target_nice(-20, 1), -20);
        assert_eq!(target_nice(19, -1), 19);
        assert_eq!(target_nice(5, -100), 19);
    }

    #[test]
    fn test_rejects_non_positive_pid() {
        let mut control = LinuxControl;
        assert_eq!(
            control.send_terminate(0),
            Err(ControlError::InvalidTarget { pid: 0 })
        );
        assert_eq!(
            control.adjust_priority(-1, 1),
            Err(ControlError::InvalidTarget { pid: -1 })
        );
    }

    #[test]
    fn test_renice_by_zero_keeps_current_nice() {
        let mut control = LinuxControl;
        let own = std::process::id() as i32;
        let current = LinuxControl::current_nice(own).expect("own nice readable");
        assert_eq!(control.adjust_priority(own, 0), Ok(current));
    }
}
