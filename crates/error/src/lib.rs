//! Syscall error handling infrastructure.
//!
//! Provides the `define_sys_error!` macro for error types that carry a C
//! `errno` value alongside a stable debug code.
//!
//! ## Usage
//!
//! ```ignore
//! define_sys_error! {
//!     pub enum SysError(0x01) {
//!         NoSuchProcess = ESRCH => "No such process",
//!         NoSuchDevice = ENODEV => "No such device",
//!     }
//! }
//! ```
//!
//! The right-hand side of each variant is any constant expression of type
//! `i32`, usually one of the errno constants.

#![no_std]

/// Macro to define a syscall error type with consistent handling.
///
/// Each variant maps to exactly one errno value. The debug code is
/// `(subsystem << 8) | errno`.
#[macro_export]
macro_rules! define_sys_error {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident($subsystem:literal) {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident = $errno:expr => $desc:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )*
        }

        impl $name {
            /// Subsystem identifier for this error type.
            pub const SUBSYSTEM: u8 = $subsystem;

            /// The C `errno` value reported for this error.
            pub const fn errno(&self) -> i32 {
                match self {
                    $( Self::$variant => $errno, )*
                }
            }

            /// Get numeric error code for debugging.
            pub const fn code(&self) -> u16 {
                ((Self::SUBSYSTEM as u16) << 8) | (self.errno() as u16 & 0xFF)
            }

            /// Get error name for logging.
            pub const fn name(&self) -> &'static str {
                match self {
                    $( Self::$variant => $desc, )*
                }
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "E{:04X}: {}", self.code(), self.name())
            }
        }

        impl core::error::Error for $name {}
    };
}
