//! Payload buffer for the frame currently being received.
//!
//! Uses `bytes::BytesMut` so a finished payload can be handed off as
//! `Bytes` without copying. Words arrive big-endian off the wire and are
//! stored little-endian here; [`Frame`](super::Frame) reads them back the
//! same way, so the wire order never leaks past the decoder.

use bytes::{BufMut, Bytes, BytesMut};

use super::wire_format::WORD_SIZE;

/// Default initial capacity: room for a 4096-point data frame.
const DEFAULT_CAPACITY: usize = 4098 * WORD_SIZE;

/// Append-only accumulator for one frame's payload words.
#[derive(Debug)]
pub struct FrameBuffer {
    buffer: BytesMut,
}

impl FrameBuffer {
    /// Create an empty buffer with default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create an empty buffer with the given byte capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: BytesMut::with_capacity(capacity),
        }
    }

    /// Append one payload word (stored Little Endian).
    #[inline]
    pub fn push_word(&mut self, word: u64) {
        self.buffer.put_u64_le(word);
    }

    /// Take the accumulated payload, leaving the buffer empty.
    ///
    /// The returned `Bytes` shares the allocation; capacity is reclaimed
    /// once it is dropped.
    pub fn take(&mut self) -> Bytes {
        self.buffer.split().freeze()
    }

    /// Drop any accumulated payload.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Get the number of buffered bytes.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Number of buffered words.
    pub fn word_count(&self) -> usize {
        self.buffer.len() / WORD_SIZE
    }

    /// Raw view of the buffered payload.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}
