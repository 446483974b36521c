//! Data record: one sweep of magnitudes.

use bytes::Buf;

use crate::protocol::WORD_SIZE;

/// Decoded data frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataRecord {
    /// First payload value. Sent by the device but carries nothing the
    /// spectrum uses. `None` for an empty payload.
    pub leading: Option<f64>,
    /// Magnitudes in point order.
    pub magnitudes: Vec<f64>,
}

impl DataRecord {
    /// Decode from a frame payload. Never fails; an incomplete trailing
    /// value is dropped.
    pub fn parse(payload: &[u8]) -> Self {
        let mut buf = payload;

        if buf.remaining() < WORD_SIZE {
            return Self::default();
        }
        let leading = Some(buf.get_f64_le());

        let mut magnitudes = Vec::with_capacity(buf.remaining() / WORD_SIZE);
        while buf.remaining() >= WORD_SIZE {
            magnitudes.push(buf.get_f64_le());
        }

        Self {
            leading,
            magnitudes,
        }
    }

    pub fn len(&self) -> usize {
        self.magnitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.magnitudes.is_empty()
    }
}
