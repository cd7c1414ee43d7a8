#![cfg_attr(not(any(test, feature = "std")), no_std)]

//! System-call hooks for picolibc on an RTOS kernel.
//!
//! picolibc needs a handful of POSIX entry points (`_exit`, `kill`, `write`,
//! `getpid`, `close`, `times`) and a `FILE` object for its standard streams.
//! This crate maps them onto the kernel services described in [`pico_hal`]:
//! console output is staged in a [`ConsoleSink`] and handed to the transport
//! a line (or a full buffer) at a time, everything else is a passthrough or
//! a stub that reports "not supported".
//!
//! The C symbols are exported by the `c-abi` feature. They are left out of
//! `std` builds so host binaries keep the system libc's `write`; unit tests
//! compile the entry points without exporting them.

pub mod console;
pub mod errno;
pub mod error;
#[cfg(any(test, all(feature = "c-abi", not(feature = "std"))))]
pub mod ffi;
pub mod fs;
pub mod logger;
pub mod process;
pub mod runtime;
pub mod sink;
pub mod stream;
pub mod time;

pub use error::{SysError, SysResult, SyscallResultExt};
pub use process::{NoSignals, Pid, SignalSender};
pub use runtime::{Syscalls, install, installed};
pub use sink::{ConsoleSink, STDOUT_BUFSIZE};
pub use stream::{StdStream, Stream, StreamFlags, StreamTable, StreamWriter};
pub use time::{ClockT, Tms};
