//! Process-wide syscall state.
//!
//! The platform builds one [`Syscalls`] at startup and hands it to
//! [`install`]. From then on the C entry points, the print macros and the
//! console logger all reach the same console sink through [`installed`].

use crate::error::SysResult;
use crate::fs;
use crate::process::{self, NoSignals, Pid, SignalSender};
use crate::sink::ConsoleSink;
use crate::stream::StreamTable;
use crate::time::{self, ClockT, Tms};
use pico_hal::{PowerControl, ThreadIdentity, Transport};
use pico_utils::Once;

static INSTALLED: Once<Syscalls> = Once::new();

/// Kernel services plus the console sink, bundled for the libc layer.
pub struct Syscalls {
    console: ConsoleSink<&'static dyn Transport>,
    power: &'static dyn PowerControl,
    threads: &'static dyn ThreadIdentity,
    signals: &'static dyn SignalSender,
    errno_hook: Option<fn(i32)>,
}

impl Syscalls {
    pub const fn new(
        transport: &'static dyn Transport,
        power: &'static dyn PowerControl,
        threads: &'static dyn ThreadIdentity,
    ) -> Self {
        Self {
            console: ConsoleSink::new(transport),
            power,
            threads,
            signals: &NoSignals,
            errno_hook: None,
        }
    }

    /// Replace the default `kill` behaviour.
    #[must_use]
    pub const fn with_signals(mut self, signals: &'static dyn SignalSender) -> Self {
        self.signals = signals;
        self
    }

    /// Where failing C entry points store their errno.
    #[must_use]
    pub const fn with_errno_hook(mut self, hook: fn(i32)) -> Self {
        self.errno_hook = Some(hook);
        self
    }

    pub fn console(&self) -> &ConsoleSink<&'static dyn Transport> {
        &self.console
    }

    /// stdin, stdout and stderr, all backed by the console sink.
    pub fn streams(&self) -> StreamTable<'_> {
        StreamTable::shared(&self.console)
    }

    pub fn exit(&self, code: i32) -> ! {
        process::exit(self.power, code)
    }

    pub fn kill(&self, pid: Pid, sig: i32) -> SysResult<()> {
        self.signals.kill(pid, sig)
    }

    pub fn write(&self, fd: i32, data: &[u8]) -> usize {
        fs::write(*self.console.transport(), fd, data)
    }

    pub fn getpid(&self) -> Pid {
        process::getpid(self.threads)
    }

    pub fn close(&self, fd: i32) -> SysResult<()> {
        fs::close(fd)
    }

    pub fn times(&self, tms: &mut Tms) -> SysResult<ClockT> {
        time::times(tms)
    }

    pub fn set_errno(&self, errno: i32) {
        if let Some(hook) = self.errno_hook {
            hook(errno);
        }
    }
}

/// Install the process-wide instance.
///
/// Only the first call takes effect; later calls get the existing instance
/// back.
pub fn install(syscalls: Syscalls) -> &'static Syscalls {
    let mut fresh = false;
    let installed = INSTALLED.call_once(|| {
        fresh = true;
        syscalls
    });
    if !fresh {
        log::warn!("syscalls already installed, keeping the first instance");
    }
    installed
}

pub fn installed() -> Option<&'static Syscalls> {
    INSTALLED.get()
}
