//! C entry points picolibc links against.
//!
//! Every function here is a thin wrapper over the installed [`Syscalls`].
//! Failing calls return -1 and hand the errno to the installed errno hook.
//! Until `install` runs, output calls fail with `ENODEV`.
//!
//! Test builds compile this module without exporting the symbols, so the
//! host libc keeps its own `write` and `close`.

use crate::error::{SysError, SysResult, SyscallResultExt};
use crate::fs;
use crate::process::{NoSignals, Pid, SignalSender};
use crate::runtime::{Syscalls, installed};
use crate::stream::StreamFlags;
use crate::time::{self, ClockT, Tms};
use core::cell::UnsafeCell;
use core::ffi::{c_char, c_int, c_void};

/// Error return of a stream callback (`_FDEV_ERR`).
const FDEV_ERR: c_int = -1;

fn report<T, R>(result: SysResult<T>, on_success: impl FnOnce(T) -> R) -> R
where
    R: From<i8>,
{
    result.to_c_return(
        |errno| {
            if let Some(sys) = installed() {
                sys.set_errno(errno);
            }
        },
        on_success,
    )
}

fn console() -> SysResult<&'static Syscalls> {
    installed().ok_or(SysError::NoSuchDevice)
}

/// Exit a program without cleaning up files.
#[cfg_attr(not(test), unsafe(no_mangle))]
pub extern "C" fn _exit(code: c_int) -> ! {
    match installed() {
        Some(sys) => sys.exit(code),
        None => loop {
            core::hint::spin_loop();
        },
    }
}

/// Send a signal to a thread.
#[cfg_attr(not(test), unsafe(no_mangle))]
pub extern "C" fn kill(pid: Pid, sig: c_int) -> c_int {
    let result = match installed() {
        Some(sys) => sys.kill(pid, sig),
        None => NoSignals.kill(pid, sig),
    };
    report(result, |()| 0)
}

/// All output is directed to the console transport, independent of `fd`.
/// Blocks until the bytes are actually written.
///
/// # Safety
/// `data` must be valid for reads of `count` bytes. A null `data` with a
/// non-zero `count` fails with `EINVAL`.
#[cfg_attr(not(test), unsafe(no_mangle))]
pub unsafe extern "C" fn write(fd: c_int, data: *const c_void, count: usize) -> isize {
    let result = console().and_then(|sys| {
        if count == 0 {
            return Ok(0);
        }
        if data.is_null() {
            return Err(SysError::InvalidArgument);
        }
        let bytes = unsafe { core::slice::from_raw_parts(data.cast::<u8>(), count) };
        Ok(sys.write(fd, bytes))
    });
    report(result, |n| isize::try_from(n).unwrap_or(isize::MAX))
}

/// Get the process id of the current thread.
#[cfg_attr(not(test), unsafe(no_mangle))]
pub extern "C" fn getpid() -> Pid {
    installed().map_or(-1, Syscalls::getpid)
}

#[cfg_attr(not(test), unsafe(no_mangle))]
pub extern "C" fn close(fd: c_int) -> c_int {
    report(fs::close(fd), |()| 0)
}

/// Current process times (not implemented).
///
/// # Safety
/// `ptms` must be null or point to a writable `struct tms`. It is never
/// written.
#[cfg_attr(not(test), unsafe(no_mangle))]
pub unsafe extern "C" fn times(ptms: *mut Tms) -> ClockT {
    let mut scratch = Tms::default();
    let tms = unsafe { ptms.as_mut() }.unwrap_or(&mut scratch);
    match time::times(tms) {
        Ok(ticks) => ticks,
        Err(e) => {
            if let Some(sys) = installed() {
                sys.set_errno(e.errno());
            }
            // (clock_t)-1
            ClockT::MAX
        }
    }
}

// ============================================================================
// Stream object
// ============================================================================

/// picolibc's `struct __file` as set up by `FDEV_SETUP_STREAM`.
#[repr(C)]
pub struct PicolibcFile {
    unget: u16,
    flags: u8,
    put: extern "C" fn(c_char, *mut PicolibcFile) -> c_int,
    get: extern "C" fn(*mut PicolibcFile) -> c_int,
    flush: extern "C" fn(*mut PicolibcFile) -> c_int,
}

/// Storage for the stream object; libc mutates `unget` and `flags` in place.
#[repr(transparent)]
pub struct FileCell(UnsafeCell<PicolibcFile>);

// SAFETY: libc serializes access to the FILE fields it touches; our callbacks
// never read the object.
unsafe impl Sync for FileCell {}

/// `FILE *const __iob[]`.
#[repr(transparent)]
pub struct IobTable([*mut PicolibcFile; 3]);

// SAFETY: the table itself is immutable; it only points at STDIO.
unsafe impl Sync for IobTable {}

extern "C" fn stdio_put(c: c_char, _file: *mut PicolibcFile) -> c_int {
    match installed() {
        Some(sys) => {
            sys.console().put(c as u8);
            1
        }
        None => FDEV_ERR,
    }
}

extern "C" fn stdio_get(_file: *mut PicolibcFile) -> c_int {
    match installed() {
        Some(sys) => c_int::from(sys.console().get()),
        None => FDEV_ERR,
    }
}

extern "C" fn stdio_flush(_file: *mut PicolibcFile) -> c_int {
    match installed() {
        Some(sys) => {
            sys.console().flush();
            0
        }
        None => FDEV_ERR,
    }
}

static STDIO: FileCell = FileCell(UnsafeCell::new(PicolibcFile {
    unget: 0,
    flags: StreamFlags::RW.bits(),
    put: stdio_put,
    get: stdio_get,
    flush: stdio_flush,
}));

/// stdin, stdout and stderr all share the one console stream.
#[allow(non_upper_case_globals)]
#[cfg_attr(not(test), unsafe(no_mangle))]
pub static __iob: IobTable = IobTable(
    [core::ptr::addr_of!(STDIO).cast_mut().cast::<PicolibcFile>(); 3],
);
