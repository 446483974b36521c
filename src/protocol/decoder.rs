//! Frame decoder state machine.
//!
//! Consumes the link in 8-byte big-endian words and cuts it into frames:
//! - `Idle`: waiting for a begin sentinel, everything else is noise
//! - `Setup` / `Data`: collecting payload words until the end sentinel
//!
//! Two ways to feed it:
//! - [`FrameDecoder::drain`] pulls whole words from a [`ByteSource`] and
//!   leaves any trailing partial word in the source.
//! - [`FrameDecoder::push`] takes arbitrary chunks (e.g. from an async read)
//!   and holds a trailing partial word until the next push.
//!
//! # Example
//!
//! ```
//! use spectrum_link::protocol::{encode_setup_frame, FrameDecoder, FrameKind};
//!
//! let mut decoder = FrameDecoder::new();
//! let bytes = encode_setup_frame(1000.0, 8.0);
//!
//! // Data arrives in arbitrary chunks
//! assert!(decoder.push(&bytes[..13]).is_empty());
//! let frames = decoder.push(&bytes[13..]);
//!
//! assert_eq!(frames.len(), 1);
//! assert_eq!(frames[0].kind, FrameKind::Setup);
//! ```

use serde::Serialize;

use super::frame::{Frame, FrameKind};
use super::frame_buffer::FrameBuffer;
use super::wire_format::{read_word, Sentinel, FRAME_END, WORD_SIZE};
use crate::transport::ByteSource;

/// Bytes pulled from a `ByteSource` per read. Multiple of `WORD_SIZE`.
const DRAIN_CHUNK: usize = 512 * WORD_SIZE;

/// State machine for frame decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecoderState {
    /// Between frames.
    #[default]
    Idle,
    /// Inside a setup frame.
    Setup,
    /// Inside a data frame.
    Data,
}

impl DecoderState {
    /// Frame kind being collected, `None` when idle.
    pub fn frame_kind(self) -> Option<FrameKind> {
        match self {
            DecoderState::Idle => None,
            DecoderState::Setup => Some(FrameKind::Setup),
            DecoderState::Data => Some(FrameKind::Data),
        }
    }
}

/// Running counters, for diagnostics only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DecoderStats {
    /// Words handled.
    pub words: u64,
    /// Words dropped while idle (noise or desync).
    pub ignored_words: u64,
    /// Completed setup frames.
    pub setup_frames: u64,
    /// Completed data frames.
    pub data_frames: u64,
}

/// Turns a word stream into [`Frame`]s.
#[derive(Debug)]
pub struct FrameDecoder {
    state: DecoderState,
    /// Payload of the frame currently open.
    buffer: FrameBuffer,
    /// Trailing bytes of a word split across pushes.
    pending: [u8; WORD_SIZE],
    pending_len: usize,
    stats: DecoderStats,
}

impl FrameDecoder {
    /// Create a new idle decoder.
    pub fn new() -> Self {
        Self {
            state: DecoderState::Idle,
            buffer: FrameBuffer::new(),
            pending: [0; WORD_SIZE],
            pending_len: 0,
            stats: DecoderStats::default(),
        }
    }

    /// Handle a single word.
    ///
    /// Returns the completed frame when `word` is the end sentinel of an
    /// open frame.
    pub fn feed_word(&mut self, word: u64) -> Option<Frame> {
        self.stats.words += 1;

        let kind = match self.state.frame_kind() {
            Some(kind) => kind,
            None => {
                match Sentinel::classify(word) {
                    Some(Sentinel::SetupBegin) => self.begin(DecoderState::Setup),
                    Some(Sentinel::DataBegin) => self.begin(DecoderState::Data),
                    _ => {
                        self.stats.ignored_words += 1;
                        tracing::trace!("Ignoring word {:#018x} while idle", word);
                    }
                }
                return None;
            }
        };

        if word != FRAME_END {
            self.buffer.push_word(word);
            return None;
        }

        match kind {
            FrameKind::Setup => self.stats.setup_frames += 1,
            FrameKind::Data => self.stats.data_frames += 1,
        }
        self.state = DecoderState::Idle;
        let payload = self.buffer.take();
        tracing::debug!("{:?} frame complete ({} bytes)", kind, payload.len());

        Some(Frame::new(kind, payload))
    }

    fn begin(&mut self, state: DecoderState) {
        tracing::debug!("State changed to {:?}", state);
        self.buffer.clear();
        self.state = state;
    }

    /// Push raw bytes and extract all frames they complete.
    ///
    /// A partial trailing word is buffered internally and completed by the
    /// next push, so splitting a stream at any byte boundary yields the
    /// same frames as delivering it whole.
    pub fn push(&mut self, data: &[u8]) -> Vec<Frame> {
        let mut frames = Vec::new();
        self.push_into(data, &mut frames);
        frames
    }

    fn push_into(&mut self, mut data: &[u8], frames: &mut Vec<Frame>) {
        if self.pending_len > 0 {
            let take = (WORD_SIZE - self.pending_len).min(data.len());
            self.pending[self.pending_len..self.pending_len + take]
                .copy_from_slice(&data[..take]);
            self.pending_len += take;
            data = &data[take..];

            if self.pending_len < WORD_SIZE {
                return;
            }
            self.pending_len = 0;
            let word = u64::from_be_bytes(self.pending);
            frames.extend(self.feed_word(word));
        }

        let mut chunks = data.chunks_exact(WORD_SIZE);
        for word in chunks.by_ref().filter_map(read_word) {
            frames.extend(self.feed_word(word));
        }

        let rest = chunks.remainder();
        self.pending[..rest.len()].copy_from_slice(rest);
        self.pending_len = rest.len();
    }

    /// Drain every whole word currently available from `source`.
    ///
    /// Never blocks and never reads a partial word: if fewer than
    /// [`WORD_SIZE`] bytes remain they stay in the source for the next call.
    pub fn drain<S: ByteSource + ?Sized>(
        &mut self,
        source: &mut S,
    ) -> std::io::Result<Vec<Frame>> {
        let mut frames = Vec::new();
        let mut chunk = [0u8; DRAIN_CHUNK];

        loop {
            let whole = source.bytes_available() / WORD_SIZE * WORD_SIZE;
            if whole == 0 {
                break;
            }

            let mut filled = source.read_available(&mut chunk[..whole.min(DRAIN_CHUNK)])?;
            if filled == 0 {
                break;
            }

            // A short read may stop mid-word; finish that word only.
            while filled % WORD_SIZE != 0 {
                let boundary = (filled / WORD_SIZE + 1) * WORD_SIZE;
                let n = source.read_available(&mut chunk[filled..boundary])?;
                if n == 0 {
                    break;
                }
                filled += n;
            }

            self.push_into(&chunk[..filled], &mut frames);
        }

        Ok(frames)
    }

    /// Drop any open frame and partial word and return to `Idle`.
    pub fn reset(&mut self) {
        self.state = DecoderState::Idle;
        self.buffer.clear();
        self.pending_len = 0;
    }

    /// Get the current state.
    pub fn state(&self) -> DecoderState {
        self.state
    }

    /// Payload bytes collected for the open frame.
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    /// Bytes of a partial word held from the last push.
    pub fn pending_len(&self) -> usize {
        self.pending_len
    }

    pub fn stats(&self) -> &DecoderStats {
        &self.stats
    }
}

impl Default for FrameDecoder {
    fn default() -> Self {
        Self::new()
    }
}
