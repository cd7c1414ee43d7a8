//! Host-side stand-ins for the platform collaborators.
//!
//! Built with the `std` feature and for this crate's own tests. Every mock
//! records what it was asked to do so tests can assert on the exact sequence
//! of transport calls.

use crate::traits::{KernelPid, PowerControl, ThreadIdentity, Transport};
use core::sync::atomic::{AtomicI16, AtomicUsize, Ordering};
use pico_utils::Mutex;
use std::collections::VecDeque;
use std::vec::Vec;

/// One call observed by [`RecordingTransport`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransportEvent {
    /// Bytes handed to `write`, one event per call.
    Write(Vec<u8>),
    /// A `read` that returned this many bytes.
    Read(usize),
}

/// Transport that logs every call and serves reads from a queue.
#[derive(Default)]
pub struct RecordingTransport {
    events: Mutex<Vec<TransportEvent>>,
    input: Mutex<VecDeque<u8>>,
}

impl RecordingTransport {
    pub const fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            input: Mutex::new(VecDeque::new()),
        }
    }

    /// Queue bytes for later `read` calls.
    pub fn feed(&self, bytes: &[u8]) {
        self.input.lock().extend(bytes.iter().copied());
    }

    pub fn events(&self) -> Vec<TransportEvent> {
        self.events.lock().clone()
    }

    /// Payloads of every `write`, in call order.
    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                TransportEvent::Write(bytes) => Some(bytes.clone()),
                TransportEvent::Read(_) => None,
            })
            .collect()
    }

    /// All written bytes concatenated.
    pub fn output(&self) -> Vec<u8> {
        self.writes().concat()
    }

    pub fn reset(&self) {
        self.events.lock().clear();
    }
}

impl Transport for RecordingTransport {
    fn write(&self, bytes: &[u8]) -> usize {
        self.events.lock().push(TransportEvent::Write(bytes.to_vec()));
        bytes.len()
    }

    /// Blocks until enough input has been fed to fill `buf`.
    fn read(&self, buf: &mut [u8]) -> usize {
        let mut filled = 0;
        while filled < buf.len() {
            if let Some(byte) = self.input.lock().pop_front() {
                buf[filled] = byte;
                filled += 1;
            } else {
                std::thread::yield_now();
            }
        }
        self.events.lock().push(TransportEvent::Read(filled));
        filled
    }
}

/// Panic payload raised by [`MockPower`] instead of halting the host.
#[derive(Debug, PartialEq, Eq)]
pub struct PoweredOff;

/// Power controller that counts requests and unwinds with [`PoweredOff`].
///
/// Unwinding stands in for the board going dark, so a caller's trailing
/// spin loop is never reached on the host.
#[derive(Default)]
pub struct MockPower {
    requests: AtomicUsize,
}

impl MockPower {
    pub const fn new() -> Self {
        Self {
            requests: AtomicUsize::new(0),
        }
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

impl PowerControl for MockPower {
    fn power_off(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
        std::panic::panic_any(PoweredOff);
    }
}

/// Thread-id source returning a settable value.
pub struct FixedThread {
    pid: AtomicI16,
}

impl FixedThread {
    pub const fn new(pid: KernelPid) -> Self {
        Self {
            pid: AtomicI16::new(pid),
        }
    }

    pub fn set(&self, pid: KernelPid) {
        self.pid.store(pid, Ordering::SeqCst);
    }
}

impl ThreadIdentity for FixedThread {
    fn current_pid(&self) -> KernelPid {
        self.pid.load(Ordering::SeqCst)
    }
}
