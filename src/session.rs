//! Session - one decoder and one spectrum for one device stream.
//!
//! The [`SpectrumSession`] is what the transport talks to. Each time bytes
//! become readable it:
//! 1. Drains whole words through the [`FrameDecoder`]
//! 2. Parses each completed frame as a setup or data record
//! 3. Applies the record to the [`Spectrum`]
//! 4. Notifies the [`Presenter`]
//!
//! Record errors never stop the drain. They are logged, collected in the
//! [`DrainReport`], and the decoder carries on with the next frame.
//!
//! # Example
//!
//! ```
//! use std::collections::VecDeque;
//! use spectrum_link::protocol::{encode_data_frame, encode_setup_frame};
//! use spectrum_link::SpectrumSession;
//!
//! let mut session = SpectrumSession::new(());
//! let mut link: VecDeque<u8> = VecDeque::new();
//! link.extend(encode_setup_frame(1000.0, 8.0).iter());
//! link.extend(encode_data_frame(0.0, &[5.0, 7.0]).iter());
//!
//! let report = session.on_bytes_available(&mut link).unwrap();
//!
//! assert_eq!(report.frames_applied, 2);
//! assert_eq!(session.spectrum().max_magnitude(), 7.0);
//! ```

use crate::config::SessionConfig;
use crate::error::{Result, SpectrumError};
use crate::protocol::{Frame, FrameDecoder, FrameKind};
use crate::record::{DataRecord, SetupRecord};
use crate::spectrum::{AxisBounds, Spectrum};
use crate::transport::ByteSource;

/// Receives change notifications from a session.
///
/// Both methods default to no-ops; `()` is a presenter that ignores
/// everything.
pub trait Presenter {
    /// The point sequence changed (resized, retargeted or new magnitudes).
    fn points_changed(&mut self, _spectrum: &Spectrum) {}

    /// The axis bounds changed.
    fn axis_changed(&mut self, _axis: &AxisBounds) {}
}

impl Presenter for () {}

impl<P: Presenter + ?Sized> Presenter for Box<P> {
    fn points_changed(&mut self, spectrum: &Spectrum) {
        (**self).points_changed(spectrum)
    }

    fn axis_changed(&mut self, axis: &AxisBounds) {
        (**self).axis_changed(axis)
    }
}

/// Outcome of one drain.
#[derive(Debug, Default)]
pub struct DrainReport {
    /// Frames applied to the spectrum.
    pub frames_applied: usize,
    /// Setup frames applied.
    pub setups: usize,
    /// Data frames applied.
    pub data: usize,
    /// Frames rejected by their record parser.
    pub errors: Vec<SpectrumError>,
}

impl DrainReport {
    /// True if no frame completed.
    pub fn is_empty(&self) -> bool {
        self.frames_applied == 0 && self.errors.is_empty()
    }
}

/// Decoder, spectrum and presenter for one device stream.
pub struct SpectrumSession<P> {
    decoder: FrameDecoder,
    spectrum: Spectrum,
    presenter: P,
    config: SessionConfig,
}

impl<P: Presenter> SpectrumSession<P> {
    /// Create a session with default configuration.
    pub fn new(presenter: P) -> Self {
        Self::with_config(presenter, SessionConfig::default())
    }

    /// Create a session with custom configuration.
    pub fn with_config(presenter: P, config: SessionConfig) -> Self {
        Self {
            decoder: FrameDecoder::new(),
            spectrum: Spectrum::new(),
            presenter,
            config,
        }
    }

    /// Drain every whole word `source` currently holds and apply the frames.
    ///
    /// Call this whenever the transport reports readable bytes. Never
    /// blocks; a trailing partial word stays in the source.
    ///
    /// # Errors
    ///
    /// Returns error only if reading from the source fails. Record errors
    /// are reported in [`DrainReport::errors`].
    pub fn on_bytes_available<S: ByteSource + ?Sized>(
        &mut self,
        source: &mut S,
    ) -> Result<DrainReport> {
        let frames = self.decoder.drain(source)?;
        Ok(self.apply_frames(frames))
    }

    /// Push bytes delivered as a chunk and apply the frames they complete.
    pub fn push(&mut self, data: &[u8]) -> DrainReport {
        let frames = self.decoder.push(data);
        self.apply_frames(frames)
    }

    fn apply_frames(&mut self, frames: Vec<Frame>) -> DrainReport {
        let mut report = DrainReport::default();

        for frame in frames {
            match self.apply_frame(&frame) {
                Ok(()) => {
                    report.frames_applied += 1;
                    match frame.kind {
                        FrameKind::Setup => report.setups += 1,
                        FrameKind::Data => report.data += 1,
                    }
                }
                Err(e) => {
                    tracing::warn!("Dropping {:?} frame: {}", frame.kind, e);
                    report.errors.push(e);
                }
            }
        }

        report
    }

    /// Parse one completed frame and apply it to the spectrum.
    ///
    /// On error the spectrum is left untouched.
    pub fn apply_frame(&mut self, frame: &Frame) -> Result<()> {
        match frame.kind {
            FrameKind::Setup => {
                let setup = SetupRecord::parse(frame.payload())?;
                self.apply_setup(&setup)
            }
            FrameKind::Data => {
                let data = DataRecord::parse(frame.payload());
                self.apply_data(&data);
                Ok(())
            }
        }
    }

    fn apply_setup(&mut self, setup: &SetupRecord) -> Result<()> {
        if setup.point_count() > self.config.max_points {
            return Err(SpectrumError::PointCountOutOfRange {
                count: setup.raw_point_count(),
                max: self.config.max_points,
            });
        }

        self.spectrum.apply_setup(setup);
        tracing::debug!(
            "Setup: fs={} Hz, n={}, {} points, axis {}..{} Hz",
            setup.sampling_frequency,
            setup.sample_count,
            self.spectrum.len(),
            setup.resolution(),
            setup.nyquist()
        );

        self.presenter.points_changed(&self.spectrum);
        self.presenter.axis_changed(&self.spectrum.axis());
        Ok(())
    }

    fn apply_data(&mut self, data: &DataRecord) {
        let assigned = self.spectrum.apply_data(data);
        if assigned < self.spectrum.len() {
            tracing::trace!(
                "Short data frame: {} of {} points updated",
                assigned,
                self.spectrum.len()
            );
        }

        self.presenter.points_changed(&self.spectrum);
        self.presenter.axis_changed(&self.spectrum.axis());
    }

    pub fn spectrum(&self) -> &Spectrum {
        &self.spectrum
    }

    pub fn decoder(&self) -> &FrameDecoder {
        &self.decoder
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Consume the session, returning the spectrum and presenter.
    pub fn into_parts(self) -> (Spectrum, P) {
        (self.spectrum, self.presenter)
    }
}
