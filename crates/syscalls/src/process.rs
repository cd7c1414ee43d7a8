//! Process management
//!
//! There is no process concept distinct from kernel threads: the "process
//! id" is the calling thread's id, and exiting powers the board down.

use crate::error::{SysError, SysResult};
use pico_hal::{PowerControl, ThreadIdentity};

/// POSIX `pid_t`.
pub type Pid = i32;

/// Signal delivery strategy used by `kill`.
///
/// Platforms with real signal support install their own implementation;
/// everything else gets [`NoSignals`].
pub trait SignalSender: Send + Sync {
    fn kill(&self, pid: Pid, sig: i32) -> SysResult<()>;
}

/// Default strategy: no process is ever found.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoSignals;

impl SignalSender for NoSignals {
    fn kill(&self, _pid: Pid, _sig: i32) -> SysResult<()> {
        Err(SysError::NoSuchProcess)
    }
}

/// Exit without cleaning up open files.
///
/// The code is only logged; there is nothing to hand it back to.
pub fn exit(power: &dyn PowerControl, code: i32) -> ! {
    log::info!("#! exit {}: powering off", code);
    power.power_off();
    loop {
        core::hint::spin_loop();
    }
}

/// Get the process id of the current thread.
#[inline]
pub fn getpid(threads: &dyn ThreadIdentity) -> Pid {
    Pid::from(threads.current_pid())
}
