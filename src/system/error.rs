//! Error types for process control
//!
//! Sampling never fails outward: unreadable counters turn into defaults inside
//! the provider. Only kill and renice requests report errors, and the caller
//! turns those into a status-line message.

use nix::errno::Errno;
use thiserror::Error;

/// Errors that can occur when signalling or renicing a process.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControlError {
    /// Process does not exist or has already terminated
    #[error("process {pid} not found or has terminated")]
    NotFound { pid: i32 },

    /// Caller lacks the privilege for the operation
    #[error("permission denied for process {pid}")]
    PermissionDenied { pid: i32 },

    /// PID cannot be targeted (zero or negative would address process groups)
    #[error("invalid target pid {pid}")]
    InvalidTarget { pid: i32 },

    /// Any other OS failure
    #[error("{op} failed for process {pid}: {errno}")]
    Os {
        op: &'static str,
        pid: i32,
        errno: Errno,
    },
}

impl ControlError {
    /// Maps an errno from `kill`/`setpriority` onto the error taxonomy.
    pub fn from_errno(op: &'static str, pid: i32, errno: Errno) -> Self {
        match errno {
            Errno::ESRCH => ControlError::NotFound { pid },
            Errno::EPERM | Errno::EACCES => ControlError::PermissionDenied { pid },
            _ => ControlError::Os { op, pid, errno },
        }
    }
}

/// Result type for process control operations
pub type ControlResult<T> = Result<T, ControlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errno_mapping() {
        assert_eq!(
            ControlError::from_errno("kill", 7, Errno::ESRCH),
            ControlError::NotFound { pid: 7 }
        );
        assert_eq!(
            ControlError::from_errno("setpriority", 7, Errno::EACCES),
            ControlError::PermissionDenied { pid: 7 }
        );
        assert!(matches!(
            ControlError::from_errno("kill", 7, Errno::EINVAL),
            ControlError::Os { op: "kill", .. }
        ));
    }

    #[test]
    fn test_display_mentions_pid() {
        let msg = ControlError::PermissionDenied { pid: 1 }.to_string();
        assert!(msg.contains("permission denied"));
        assert!(msg.contains('1'));
    }
}
