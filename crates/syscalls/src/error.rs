use crate::errno::{EINVAL, ENODEV, ENOSYS, ESRCH};
use pico_error::define_sys_error;

define_sys_error! {
    /// Failures reported by the unsupported syscalls.
    pub enum SysError(0x01) {
        /// `kill` has no process to deliver to.
        NoSuchProcess = ESRCH => "No such process",
        /// `close` (and any I/O before the console is installed).
        NoSuchDevice = ENODEV => "No such device",
        /// `times` is not backed by any clock.
        NotImplemented = ENOSYS => "Function not implemented",
        /// Null buffer handed to `write` with a non-zero length.
        InvalidArgument = EINVAL => "Invalid argument",
    }
}

pub type SysResult<T> = Result<T, SysError>;

/// Extension trait for converting a `SysResult` into the C return convention.
///
/// Failures become `-1` after `set_errno` has been handed the error's errno.
pub trait SyscallResultExt<T> {
    fn to_c_return<R, F>(self, set_errno: impl FnOnce(i32), on_success: F) -> R
    where
        R: From<i8>,
        F: FnOnce(T) -> R;
}

impl<T> SyscallResultExt<T> for SysResult<T> {
    fn to_c_return<R, F>(self, set_errno: impl FnOnce(i32), on_success: F) -> R
    where
        R: From<i8>,
        F: FnOnce(T) -> R,
    {
        match self {
            Ok(v) => on_success(v),
            Err(e) => {
                set_errno(e.errno());
                R::from(-1)
            }
        }
    }
}
