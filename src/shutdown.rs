//! Cooperative shutdown on SIGINT, SIGTERM and SIGHUP
//!
//! The handler only stores into an atomic flag. The main loop checks the
//! flag at the top of every iteration and unwinds normally, so terminal
//! restoration runs on the same path as a quit key.

use std::sync::atomic::{AtomicBool, Ordering};

use nix::sys::signal::{sigaction, SaFlags, SigAction, SigHandler, SigSet, Signal};

static STOP_REQUESTED: AtomicBool = AtomicBool::new(false);

extern "C" fn request_stop(_signal: libc::c_int) {
    STOP_REQUESTED.store(true, Ordering::SeqCst);
}

/// Handle to the process-wide stop request
#[derive(Debug, Clone, Copy)]
pub struct ShutdownFlag {
    _private: (),
}

impl ShutdownFlag {
    /// Installs the signal handlers.
    ///
    /// The input wait in the main loop is sliced short enough that a
    /// request is noticed promptly.
    pub fn install() -> nix::Result<Self> {
        let action = SigAction::new(
            SigHandler::Handler(request_stop),
            SaFlags::empty(),
            SigSet::empty(),
        );
        for signal in [Signal::SIGINT, Signal::SIGTERM, Signal::SIGHUP] {
            // SAFETY: the handler only touches an atomic.
            unsafe { sigaction(signal, &action) }?;
        }
        Ok(Self { _private: () })
    }

    /// True once any of the handled signals has arrived.
    pub fn is_requested(&self) -> bool {
        STOP_REQUESTED.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_sets_flag() {
        let flag = ShutdownFlag::install().expect("install handlers");
        assert!(!flag.is_requested());
        nix::sys::signal::raise(Signal::SIGHUP).expect("raise");
        assert!(flag.is_requested());
    }
}
