#![cfg_attr(not(any(test, feature = "std")), no_std)]

// HAL crate: the kernel-facing half of the syscall shim.
// Concrete drivers (UART, power management, scheduler) are supplied by the
// platform through the traits below.

pub mod traits;

#[cfg(any(test, feature = "std"))]
pub mod mock;

pub use traits::{KernelPid, PowerControl, ThreadIdentity, Transport};
