//! Time operations

use crate::error::{SysError, SysResult};

/// C `clock_t`.
pub type ClockT = core::ffi::c_ulong;

/// Process times, `struct tms`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tms {
    pub tms_utime: ClockT,
    pub tms_stime: ClockT,
    pub tms_cutime: ClockT,
    pub tms_cstime: ClockT,
}

/// Current process times (not implemented).
///
/// `tms` is left untouched.
pub fn times(_tms: &mut Tms) -> SysResult<ClockT> {
    Err(SysError::NotImplemented)
}
