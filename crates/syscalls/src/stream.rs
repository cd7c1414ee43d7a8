//! Standard stream table.
//!
//! picolibc dispatches character I/O through per-stream `put`/`get`/`flush`
//! callbacks. On this platform there is a single stream; input, output and
//! error all resolve to it.

use crate::error::SysResult;
use bitflags::bitflags;
use core::fmt;

bitflags! {
    /// Access mode of a stream (`__SRD` / `__SWR` in picolibc).
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct StreamFlags: u8 {
        const READ = 0x01;
        const WRITE = 0x02;
        const RW = Self::READ.bits() | Self::WRITE.bits();
    }
}

/// Character device behind a libc `FILE`.
pub trait Stream: Send + Sync {
    fn put(&self, byte: u8) -> SysResult<()>;

    /// Block for the next input byte.
    fn get(&self) -> SysResult<u8>;

    fn flush(&self) -> SysResult<()>;

    fn flags(&self) -> StreamFlags;
}

/// The three standard streams, by descriptor number.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum StdStream {
    Input = 0,
    Output = 1,
    Error = 2,
}

impl StdStream {
    pub const ALL: [StdStream; 3] = [StdStream::Input, StdStream::Output, StdStream::Error];

    pub const fn from_fd(fd: i32) -> Option<Self> {
        match fd {
            0 => Some(Self::Input),
            1 => Some(Self::Output),
            2 => Some(Self::Error),
            _ => None,
        }
    }

    pub const fn fd(self) -> i32 {
        self as i32
    }
}

/// Process-wide stream table (`__iob`).
#[derive(Clone, Copy)]
pub struct StreamTable<'a> {
    streams: [&'a dyn Stream; 3],
}

impl<'a> StreamTable<'a> {
    /// Route every standard stream to the same device.
    pub const fn shared(stream: &'a dyn Stream) -> Self {
        Self {
            streams: [stream, stream, stream],
        }
    }

    pub fn get(&self, which: StdStream) -> &'a dyn Stream {
        self.streams[which as usize]
    }

    pub fn stdin(&self) -> &'a dyn Stream {
        self.get(StdStream::Input)
    }

    pub fn stdout(&self) -> &'a dyn Stream {
        self.get(StdStream::Output)
    }

    pub fn stderr(&self) -> &'a dyn Stream {
        self.get(StdStream::Error)
    }
}

/// Adapts a [`Stream`] to `core::fmt::Write`, one `put` per byte.
pub struct StreamWriter<'a>(pub &'a dyn Stream);

impl fmt::Write for StreamWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for &byte in s.as_bytes() {
            self.0.put(byte).map_err(|_| fmt::Error)?;
        }
        Ok(())
    }
}
