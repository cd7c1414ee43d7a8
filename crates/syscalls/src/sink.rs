//! Buffered console sink.
//!
//! Character output from the libc stream layer is staged in a fixed buffer
//! and handed to the transport in one write when the buffer fills or a
//! newline goes through. Reads are unbuffered but always flush first, so a
//! prompt is visible before the caller blocks on input.

use crate::error::SysResult;
use crate::stream::{Stream, StreamFlags};
use core::fmt;
use pico_hal::Transport;
use pico_utils::{Mutex, MutexGuard, StageBuffer};

/// Default size of the stdout staging buffer.
pub const STDOUT_BUFSIZE: usize = 64;

pub struct ConsoleSink<T, const N: usize = STDOUT_BUFSIZE> {
    transport: T,
    pending: Mutex<StageBuffer<N>>,
}

impl<T: Transport, const N: usize> ConsoleSink<T, N> {
    pub const fn new(transport: T) -> Self {
        Self {
            transport,
            pending: Mutex::new(StageBuffer::new()),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Queue one byte, flushing on newline or when the buffer fills.
    pub fn put(&self, byte: u8) {
        let mut pending = self.pending.lock();
        self.queue(&mut pending, byte);
    }

    /// [C7] Same as `put` for every byte, under a single lock acquisition.
    pub fn put_bytes(&self, bytes: &[u8]) {
        let mut pending = self.pending.lock();
        for &byte in bytes {
            self.queue(&mut pending, byte);
        }
    }

    /// [C4] Write out whatever is queued. No-op on an empty buffer.
    pub fn flush(&self) {
        let mut pending = self.pending.lock();
        self.drain(&mut pending);
    }

    /// [C5] Flush pending output, then block for exactly one input byte.
    pub fn get(&self) -> u8 {
        self.flush();
        let mut byte = [0u8; 1];
        self.transport.read(&mut byte);
        byte[0]
    }

    /// Format a whole record into the buffer under one lock acquisition, so
    /// no other writer lands between its pieces. Backs `write!`/`writeln!`.
    pub fn write_fmt(&self, args: fmt::Arguments) -> fmt::Result {
        let mut writer = SinkWriter {
            sink: self,
            pending: self.pending.lock(),
        };
        fmt::Write::write_fmt(&mut writer, args)
    }

    /// Bytes currently waiting in the buffer.
    pub fn queued(&self) -> usize {
        self.pending.lock().len()
    }

    // [C1] nothing leaves before newline/full, [C2] full -> one write of N,
    // [C3] newline -> one write of the queued prefix
    fn queue(&self, pending: &mut StageBuffer<N>, byte: u8) {
        // The buffer is drained as soon as it fills, so there is always room.
        let pushed = pending.push(byte);
        debug_assert!(pushed);

        if pending.is_full() || byte == b'\n' {
            self.drain(pending);
        }
    }

    fn drain(&self, pending: &mut StageBuffer<N>) {
        if !pending.is_empty() {
            self.transport.write(pending.as_slice());
            pending.clear();
        }
    }
}

impl<T: Transport, const N: usize> Stream for ConsoleSink<T, N> {
    fn put(&self, byte: u8) -> SysResult<()> {
        ConsoleSink::put(self, byte);
        Ok(())
    }

    fn get(&self) -> SysResult<u8> {
        Ok(ConsoleSink::get(self))
    }

    fn flush(&self) -> SysResult<()> {
        ConsoleSink::flush(self);
        Ok(())
    }

    fn flags(&self) -> StreamFlags {
        StreamFlags::RW
    }
}

/// Formatter target that keeps the sink locked between `write_str` calls.
struct SinkWriter<'a, T, const N: usize> {
    sink: &'a ConsoleSink<T, N>,
    pending: MutexGuard<'a, StageBuffer<N>>,
}

impl<T: Transport, const N: usize> fmt::Write for SinkWriter<'_, T, N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for &byte in s.as_bytes() {
            self.sink.queue(&mut self.pending, byte);
        }
        Ok(())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use pico_hal::mock::{RecordingTransport, TransportEvent};
    use std::sync::Arc;
    use std::thread;
    use std::vec::Vec;

    fn sink() -> ConsoleSink<RecordingTransport> {
        ConsoleSink::new(RecordingTransport::new())
    }

    /// Tests: [C1] partial line stays buffered
    #[test]
    fn test_partial_line_not_written() {
        let sink = sink();
        for &b in b"hello world" {
            sink.put(b);
        }
        assert!(sink.transport().writes().is_empty()); // [C1]
        assert_eq!(sink.queued(), 11);
    }

    /// Tests: [C2] filling the buffer triggers exactly one write of CAPACITY bytes
    #[test]
    fn test_full_buffer_flushes_once() {
        let sink = sink();
        for i in 0..STDOUT_BUFSIZE {
            sink.put(b'a' + (i % 26) as u8);
        }

        let writes = sink.transport().writes();
        assert_eq!(writes.len(), 1); // [C2]
        assert_eq!(writes[0].len(), STDOUT_BUFSIZE);
        assert_eq!(sink.queued(), 0);
    }

    /// Tests: [C3] newline at every queued length k flushes k bytes
    #[test]
    fn test_newline_flushes_prefix() {
        for k in 1..=STDOUT_BUFSIZE {
            let sink = sink();
            for _ in 0..k - 1 {
                sink.put(b'x');
            }
            sink.put(b'\n');

            let writes = sink.transport().writes();
            assert_eq!(writes.len(), 1, "k = {k}"); // [C3]
            assert_eq!(writes[0].len(), k);
            assert_eq!(writes[0].last(), Some(&b'\n'));
            assert_eq!(sink.queued(), 0);
        }
    }

    /// Tests: [C2] buffer is reused after a capacity flush
    #[test]
    fn test_overflow_continues_in_fresh_buffer() {
        let sink = sink();
        for _ in 0..STDOUT_BUFSIZE + 3 {
            sink.put(b'z');
        }
        assert_eq!(sink.transport().writes().len(), 1);
        assert_eq!(sink.queued(), 3);

        sink.flush();
        let writes = sink.transport().writes();
        assert_eq!(writes.len(), 2);
        assert_eq!(writes[1], b"zzz");
    }

    /// Tests: [C4] flush on empty buffer writes nothing, flush is idempotent
    #[test]
    fn test_flush_empty_is_noop() {
        let sink = sink();
        sink.flush();
        assert!(sink.transport().events().is_empty()); // [C4]

        sink.put(b'q');
        sink.flush();
        sink.flush();
        assert_eq!(sink.transport().writes(), std::vec![b"q".to_vec()]);
    }

    /// Tests: [C5] get flushes pending output strictly before reading
    #[test]
    fn test_get_flushes_before_read() {
        let sink = sink();
        sink.transport().feed(b"y");
        for &b in b"continue? " {
            sink.put(b);
        }

        assert_eq!(sink.get(), b'y');
        assert_eq!(
            sink.transport().events(),
            std::vec![
                TransportEvent::Write(b"continue? ".to_vec()),
                TransportEvent::Read(1),
            ]
        ); // [C5]
    }

    /// Tests: [C5] get with nothing pending only reads
    #[test]
    fn test_get_without_pending_output() {
        let sink = sink();
        sink.transport().feed(b"\n");
        assert_eq!(sink.get(), b'\n');
        assert_eq!(sink.transport().events(), std::vec![TransportEvent::Read(1)]);
    }

    /// Tests: [C7] put_bytes applies the same flush rules as put
    #[test]
    fn test_put_bytes_splits_on_newline() {
        let sink = sink();
        sink.put_bytes(b"one\ntwo\nthr");
        assert_eq!(
            sink.transport().writes(),
            std::vec![b"one\n".to_vec(), b"two\n".to_vec()]
        );
        assert_eq!(sink.queued(), 3);
    }

    #[test]
    fn test_fmt_write_routes_through_buffer() {
        let sink = sink();
        write!(sink, "value={}", 42).unwrap();
        assert!(sink.transport().writes().is_empty());
        writeln!(sink).unwrap();
        assert_eq!(sink.transport().output(), b"value=42\n");
    }

    #[test]
    fn test_custom_capacity() {
        let sink: ConsoleSink<RecordingTransport, 4> = ConsoleSink::new(RecordingTransport::new());
        sink.put_bytes(b"abcdefghij");
        assert_eq!(
            sink.transport().writes(),
            std::vec![b"abcd".to_vec(), b"efgh".to_vec()]
        );
        assert_eq!(sink.queued(), 2);
    }

    #[test]
    fn test_stream_impl() {
        let sink = sink();
        let stream: &dyn Stream = &sink;
        sink.transport().feed(b"k");

        stream.put(b'>').unwrap();
        assert_eq!(stream.get(), Ok(b'k'));
        assert_eq!(stream.flush(), Ok(()));
        assert_eq!(stream.flags(), StreamFlags::RW);
        assert_eq!(sink.transport().output(), b">");
    }

    /// Transport that fails the test if two writes ever overlap.
    #[derive(Default)]
    struct OverlapDetector {
        busy: AtomicBool,
        overlaps: AtomicUsize,
        inner: RecordingTransport,
    }

    impl Transport for OverlapDetector {
        fn write(&self, bytes: &[u8]) -> usize {
            if self.busy.swap(true, Ordering::SeqCst) {
                self.overlaps.fetch_add(1, Ordering::SeqCst);
            }
            thread::yield_now();
            let n = self.inner.write(bytes);
            self.busy.store(false, Ordering::SeqCst);
            n
        }

        fn read(&self, buf: &mut [u8]) -> usize {
            self.inner.read(buf)
        }
    }

    /// Tests: [C6] concurrent writers never tear a transport write
    #[test]
    fn test_concurrent_puts_are_serialized() {
        const LINES: usize = 200;
        let sink = Arc::new(ConsoleSink::<_, STDOUT_BUFSIZE>::new(OverlapDetector::default()));

        let handles: Vec<_> = [b'A', b'B', b'C']
            .into_iter()
            .map(|tag| {
                let sink = Arc::clone(&sink);
                thread::spawn(move || {
                    let line = [tag, tag, tag, tag, tag, tag, b'\n'];
                    for _ in 0..LINES {
                        sink.put_bytes(&line);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let transport = sink.transport();
        assert_eq!(transport.overlaps.load(Ordering::SeqCst), 0); // [C6]

        let writes = transport.inner.writes();
        assert_eq!(writes.len(), 3 * LINES);
        for w in &writes {
            assert_eq!(w.len(), 7);
            assert!(w[..6].iter().all(|&b| b == w[0]), "torn line: {w:?}");
            assert_eq!(w[6], b'\n');
        }
    }

    /// Argument that gives up the CPU while being formatted.
    struct Yielding(char);

    impl fmt::Display for Yielding {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            thread::yield_now();
            write!(f, "{}", self.0)
        }
    }

    /// Tests: [C6] a formatted record is one line even when its arguments
    /// yield between pieces
    #[test]
    fn test_concurrent_formatted_records_stay_whole() {
        const RECORDS: usize = 500;
        let sink = Arc::new(sink());

        let handles: Vec<_> = ['A', 'B', 'C', 'D']
            .into_iter()
            .map(|tag| {
                let sink = Arc::clone(&sink);
                thread::spawn(move || {
                    let t = || Yielding(tag);
                    for _ in 0..RECORDS {
                        writeln!(sink, "{}{}{}{}", t(), t(), t(), t()).unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let writes = sink.transport().writes();
        assert_eq!(writes.len(), 4 * RECORDS);
        for w in &writes {
            assert_eq!(w.len(), 5, "torn record: {w:?}");
            assert!(w[..4].iter().all(|&b| b == w[0]), "torn record: {w:?}");
            assert_eq!(w[4], b'\n');
        }
    }

    /// Tests: [C6] single-byte puts from many threads lose no bytes
    #[test]
    fn test_concurrent_single_puts_preserve_bytes() {
        const PER_THREAD: usize = 500;
        let sink = Arc::new(sink());

        let handles: Vec<_> = (0..4u8)
            .map(|t| {
                let sink = Arc::clone(&sink);
                thread::spawn(move || {
                    for _ in 0..PER_THREAD {
                        sink.put(b'0' + t);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        sink.flush();

        let output = sink.transport().output();
        assert_eq!(output.len(), 4 * PER_THREAD);
        for t in 0..4u8 {
            assert_eq!(output.iter().filter(|&&b| b == b'0' + t).count(), PER_THREAD);
        }
        for w in sink.transport().writes() {
            assert!(w.len() <= STDOUT_BUFSIZE);
        }
    }
}
