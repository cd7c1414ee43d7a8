#![cfg_attr(not(any(test, feature = "std")), no_std)]

// Re-export spin crate types as our lock API
// Note: spin::Mutex is re-exported as Mutex for API compatibility
pub use spin::{Barrier, Lazy, Once};
pub use spin::{Mutex, MutexGuard};
pub use spin::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Fixed-capacity staging area for outgoing bytes.
///
/// Bytes are appended at the end and drained all at once. The queued count
/// never exceeds `N`.
pub struct StageBuffer<const N: usize> {
    bytes: [u8; N],
    queued: usize,
}

impl<const N: usize> Default for StageBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> StageBuffer<N> {
    /// Capacity in bytes.
    pub const CAPACITY: usize = N;

    /// [B1] New buffer is empty
    #[must_use]
    pub const fn new() -> Self {
        const { assert!(N > 0, "StageBuffer capacity must be non-zero") };
        Self {
            bytes: [0; N],
            queued: 0,
        }
    }

    /// [B2] Push appends at the queued position, [B3] returns false when full
    pub fn push(&mut self, byte: u8) -> bool {
        if self.queued == N {
            return false; // [B3]
        }

        self.bytes[self.queued] = byte; // [B2]
        self.queued += 1;
        true
    }

    /// [B4] The queued prefix, oldest byte first
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.queued]
    }

    /// [B5] Drops every queued byte
    pub fn clear(&mut self) {
        self.queued = 0;
    }

    pub fn len(&self) -> usize {
        self.queued
    }

    pub fn is_empty(&self) -> bool {
        self.queued == 0
    }

    /// [B6] true once `N` bytes are queued
    pub fn is_full(&self) -> bool {
        self.queued == N
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
