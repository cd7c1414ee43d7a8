// Formatted console I/O on top of the installed sink.
// Output before `install` is dropped; input before `install` yields None.

use crate::runtime::installed;
use core::fmt;

pub fn _print(args: fmt::Arguments) {
    if let Some(sys) = installed() {
        let _ = sys.console().write_fmt(args);
    }
}

/// Push any buffered output to the transport.
pub fn flush() {
    if let Some(sys) = installed() {
        sys.console().flush();
    }
}

/// Blocking single-byte read, flushing pending output first.
pub fn read_byte() -> Option<u8> {
    installed().map(|sys| sys.console().get())
}

#[macro_export]
macro_rules! print {
    ($($arg:tt)*) => ($crate::console::_print(format_args!($($arg)*)));
}

#[macro_export]
macro_rules! println {
    () => ($crate::print!("\n"));
    ($($arg:tt)*) => ($crate::print!("{}\n", format_args!($($arg)*)));
}
