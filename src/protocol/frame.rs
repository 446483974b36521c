//! Completed frame with typed accessors.
//!
//! A frame is the payload collected between a begin sentinel and the end
//! sentinel. Payload words are held little-endian (see
//! [`FrameBuffer`](super::FrameBuffer)), so readers decode them with
//! `u64::from_le_bytes` / `f64::from_le_bytes`.
//!
//! # Example
//!
//! ```
//! use spectrum_link::protocol::{Frame, FrameKind};
//! use bytes::Bytes;
//!
//! let payload = Bytes::copy_from_slice(&1000.0f64.to_le_bytes());
//! let frame = Frame::new(FrameKind::Setup, payload);
//!
//! assert!(frame.is_setup());
//! assert_eq!(frame.values().collect::<Vec<_>>(), vec![1000.0]);
//! ```

use bytes::Bytes;

use super::wire_format::WORD_SIZE;

/// Which begin sentinel opened the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    /// Sampling parameters.
    Setup,
    /// Spectral magnitudes.
    Data,
}

/// A complete protocol frame.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Frame type.
    pub kind: FrameKind,
    /// Payload words, little-endian (zero-copy via `bytes::Bytes`).
    pub payload: Bytes,
}

impl Frame {
    /// Create a new frame from kind and payload.
    pub fn new(kind: FrameKind, payload: Bytes) -> Self {
        Self { kind, payload }
    }

    /// Get a reference to the payload bytes.
    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Number of complete payload words.
    #[inline]
    pub fn word_count(&self) -> usize {
        self.payload.len() / WORD_SIZE
    }

    #[inline]
    pub fn is_setup(&self) -> bool {
        self.kind == FrameKind::Setup
    }

    #[inline]
    pub fn is_data(&self) -> bool {
        self.kind == FrameKind::Data
    }

    /// Iterate over payload words as raw `u64`.
    pub fn words(&self) -> impl Iterator<Item = u64> + '_ {
        self.payload.chunks_exact(WORD_SIZE).map(|chunk| {
            let mut word = [0u8; WORD_SIZE];
            word.copy_from_slice(chunk);
            u64::from_le_bytes(word)
        })
    }

    /// Iterate over payload words as `f64`.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.words().map(f64::from_bits)
    }
}
