//! Platform-independent traits for the kernel services the shim consumes.
//!
//! The console driver, power management and the scheduler live outside this
//! workspace. Each is reached through one narrow trait.

/// Kernel thread identifier (RIOT's `kernel_pid_t`).
pub type KernelPid = i16;

/// Blocking byte transport behind the console (usually a UART).
pub trait Transport: Send + Sync {
    /// Send `bytes`, blocking until all of them are on the wire.
    ///
    /// Returns the number of bytes accepted.
    fn write(&self, bytes: &[u8]) -> usize;

    /// Block until `buf` has been filled from the console.
    ///
    /// Returns the number of bytes received.
    fn read(&self, buf: &mut [u8]) -> usize;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn write(&self, bytes: &[u8]) -> usize {
        (**self).write(bytes)
    }

    fn read(&self, buf: &mut [u8]) -> usize {
        (**self).read(buf)
    }
}

/// Platform power management.
pub trait PowerControl: Send + Sync {
    /// Request an irrevocable power-down.
    ///
    /// The request may complete after this returns; callers must not assume
    /// any code after it keeps running.
    fn power_off(&self);
}

/// Scheduler query for the running thread.
pub trait ThreadIdentity: Send + Sync {
    /// Identifier of the calling thread.
    fn current_pid(&self) -> KernelPid;
}
