//! Protocol module - wire format, framing, and frame types.
//!
//! This module implements the device link protocol:
//! - 8-byte big-endian words with three sentinel control values
//! - Frame decoder state machine (`Idle` / `Setup` / `Data`)
//! - Frame buffer holding the open frame's payload
//! - Frame struct with typed accessors

mod decoder;
mod frame;
mod frame_buffer;
mod wire_format;

pub use decoder::{DecoderState, DecoderStats, FrameDecoder};
pub use frame::{Frame, FrameKind};
pub use frame_buffer::FrameBuffer;
pub use wire_format::{
    encode_data_frame, encode_setup_frame, encode_word, read_word, Sentinel, DATA_BEGIN,
    FRAME_END, SETUP_BEGIN, WORD_SIZE,
};
