//! Setup record: sampling frequency and FFT size.
//!
//! # Example
//!
//! ```
//! use spectrum_link::record::SetupRecord;
//!
//! let mut payload = Vec::new();
//! payload.extend_from_slice(&1000.0f64.to_le_bytes());
//! payload.extend_from_slice(&8.0f64.to_le_bytes());
//!
//! let setup = SetupRecord::parse(&payload).unwrap();
//! assert_eq!(setup.point_count(), 3);
//! assert_eq!(setup.frequencies().collect::<Vec<_>>(), vec![125.0, 250.0, 375.0]);
//! assert_eq!(setup.nyquist(), 500.0);
//! ```

use bytes::Buf;

use crate::error::{Result, SpectrumError};

/// Minimum payload length: two `f64` values.
pub const SETUP_PAYLOAD_SIZE: usize = 16;

/// Decoded setup frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SetupRecord {
    /// Device sampling frequency in Hz.
    pub sampling_frequency: f64,
    /// FFT size. Sent as a float, used as a count.
    pub sample_count: f64,
}

impl SetupRecord {
    pub fn new(sampling_frequency: f64, sample_count: f64) -> Self {
        Self {
            sampling_frequency,
            sample_count,
        }
    }

    /// Decode from a frame payload.
    ///
    /// Bytes past the second value are ignored.
    ///
    /// # Errors
    ///
    /// Returns `TruncatedSetup` if the payload holds fewer than 16 bytes.
    pub fn parse(payload: &[u8]) -> Result<Self> {
        if payload.len() < SETUP_PAYLOAD_SIZE {
            return Err(SpectrumError::TruncatedSetup { len: payload.len() });
        }

        let mut buf = payload;
        let sampling_frequency = buf.get_f64_le();
        let sample_count = buf.get_f64_le();

        Ok(Self::new(sampling_frequency, sample_count))
    }

    /// `floor(sample_count / 2) - 1` before clamping.
    ///
    /// May be negative, huge or NaN for a nonsensical setup.
    pub fn raw_point_count(&self) -> f64 {
        (self.sample_count / 2.0).floor() - 1.0
    }

    /// Number of spectrum points: the positive-frequency bins, excluding DC
    /// and Nyquist. Zero when the raw count is below one or NaN.
    pub fn point_count(&self) -> usize {
        let raw = self.raw_point_count();
        if raw >= 1.0 {
            // saturating for +inf
            raw as usize
        } else {
            0
        }
    }

    /// Bin width and frequency of the first point.
    pub fn resolution(&self) -> f64 {
        self.sampling_frequency / self.sample_count
    }

    /// Highest representable frequency.
    pub fn nyquist(&self) -> f64 {
        self.sampling_frequency / 2.0
    }

    /// Frequency of each point: point `i` sits at `(i + 1) * resolution`.
    pub fn frequencies(&self) -> impl Iterator<Item = f64> {
        let step = self.resolution();
        (1..=self.point_count()).map(move |i| i as f64 * step)
    }
}
