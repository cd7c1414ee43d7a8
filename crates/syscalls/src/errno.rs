/// Error numbers as defined by picolibc's `<errno.h>`.
///
/// picolibc inherits newlib's numbering, which matches Linux for the low
/// values but diverges above 34 (`ENOSYS` is 88 here, 38 on Linux).
///
/// | Constant | Value | Meaning |
/// |----------|-------|---------|
/// | `EPERM` | 1 | Operation not permitted |
/// | `ENOENT` | 2 | No such file or directory |
/// | `ESRCH` | 3 | No such process |
/// | `EIO` | 5 | I/O error |
/// | `EBADF` | 9 | Bad file number |
/// | `ENODEV` | 19 | No such device |
/// | `EINVAL` | 22 | Invalid argument |
/// | `ENOSYS` | 88 | Function not implemented |
pub const EPERM: i32 = 1;
pub const ENOENT: i32 = 2;
pub const ESRCH: i32 = 3;
pub const EIO: i32 = 5;
pub const EBADF: i32 = 9;
pub const ENODEV: i32 = 19;
pub const EINVAL: i32 = 22;
pub const ENOSYS: i32 = 88;
