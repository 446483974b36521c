//! Wire format encoding and decoding.
//!
//! The link carries a flat sequence of 8-byte words, each read as a
//! big-endian `u64`. Three reserved values act as control words:
//!
//! ```text
//! ┌──────────────────┬──────────────────┐
//! │ Word (hex)       │ Meaning          │
//! ├──────────────────┼──────────────────┤
//! │ FFFFFFFFFFFFFFFF │ begin Setup      │
//! │ 000000000000FFFF │ begin Data       │
//! │ 00000000FFFFFFFF │ end frame        │
//! └──────────────────┴──────────────────┘
//! ```
//!
//! Payload words in between are IEEE-754 `f64` bit patterns, also big-endian:
//!
//! ```text
//! Setup: FFFF..FF │ sampling_frequency │ sample_count │ 0000_0000_FFFF_FFFF
//! Data:  0000..FF │ leading │ mag[0] │ mag[1] │ ... │ 0000_0000_FFFF_FFFF
//! ```

use bytes::{BufMut, Bytes, BytesMut};

/// Size of one wire word in bytes.
pub const WORD_SIZE: usize = 8;

/// Begin-of-setup-frame control word.
pub const SETUP_BEGIN: u64 = 0xFFFF_FFFF_FFFF_FFFF;

/// Begin-of-data-frame control word.
pub const DATA_BEGIN: u64 = 0x0000_0000_0000_FFFF;

/// End-of-frame control word.
pub const FRAME_END: u64 = 0x0000_0000_FFFF_FFFF;

/// Classification of a word seen while no frame is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentinel {
    /// `SETUP_BEGIN`
    SetupBegin,
    /// `DATA_BEGIN`
    DataBegin,
    /// `FRAME_END`
    FrameEnd,
}

impl Sentinel {
    /// Classify a raw word. Returns `None` for ordinary (non-control) words.
    #[inline]
    pub fn classify(word: u64) -> Option<Self> {
        match word {
            SETUP_BEGIN => Some(Sentinel::SetupBegin),
            DATA_BEGIN => Some(Sentinel::DataBegin),
            FRAME_END => Some(Sentinel::FrameEnd),
            _ => None,
        }
    }

    /// The raw word value of this sentinel.
    #[inline]
    pub fn word(self) -> u64 {
        match self {
            Sentinel::SetupBegin => SETUP_BEGIN,
            Sentinel::DataBegin => DATA_BEGIN,
            Sentinel::FrameEnd => FRAME_END,
        }
    }
}

/// Read one word from the front of `buf` (Big Endian).
///
/// Returns `None` if fewer than [`WORD_SIZE`] bytes are present.
///
/// # Example
///
/// ```
/// use spectrum_link::protocol::{read_word, DATA_BEGIN};
///
/// let bytes = [0, 0, 0, 0, 0, 0, 0xFF, 0xFF];
/// assert_eq!(read_word(&bytes), Some(DATA_BEGIN));
/// assert_eq!(read_word(&bytes[..7]), None);
/// ```
#[inline]
pub fn read_word(buf: &[u8]) -> Option<u64> {
    let word: [u8; WORD_SIZE] = buf.get(..WORD_SIZE)?.try_into().ok()?;
    Some(u64::from_be_bytes(word))
}

/// Encode a word to wire bytes (Big Endian).
#[inline]
pub fn encode_word(word: u64) -> [u8; WORD_SIZE] {
    word.to_be_bytes()
}

/// Encode a complete setup frame.
///
/// # Example
///
/// ```
/// use spectrum_link::protocol::{encode_setup_frame, WORD_SIZE};
///
/// let frame = encode_setup_frame(1000.0, 8.0);
/// assert_eq!(frame.len(), 4 * WORD_SIZE);
/// ```
pub fn encode_setup_frame(sampling_frequency: f64, sample_count: f64) -> Bytes {
    let mut buf = BytesMut::with_capacity(4 * WORD_SIZE);
    buf.put_u64(SETUP_BEGIN);
    buf.put_f64(sampling_frequency);
    buf.put_f64(sample_count);
    buf.put_u64(FRAME_END);
    buf.freeze()
}

/// Encode a complete data frame: the leading value followed by magnitudes.
pub fn encode_data_frame(leading: f64, magnitudes: &[f64]) -> Bytes {
    let mut buf = BytesMut::with_capacity((magnitudes.len() + 3) * WORD_SIZE);
    buf.put_u64(DATA_BEGIN);
    buf.put_f64(leading);
    for &magnitude in magnitudes {
        buf.put_f64(magnitude);
    }
    buf.put_u64(FRAME_END);
    buf.freeze()
}
