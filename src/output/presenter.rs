//! Presenter that publishes snapshots as JSON lines.

use std::io::Write;

use serde::Serialize;

use super::stdio::write_json_line;
use crate::protocol::DecoderStats;
use crate::session::Presenter;
use crate::spectrum::{Spectrum, SpectrumSnapshot};

/// One line of monitor output.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum MonitorEvent {
    /// Spectrum after a setup or data frame was applied.
    Spectrum(SpectrumSnapshot),
    /// Link closed; final decoder counters.
    Closed(DecoderStats),
}

/// Writes a [`MonitorEvent::Spectrum`] line every time the points change.
///
/// Axis changes are not written separately; every snapshot carries the
/// current axis.
pub struct JsonLinesPresenter<W> {
    writer: W,
    lines: u64,
    failures: u64,
}

impl<W: Write> JsonLinesPresenter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            lines: 0,
            failures: 0,
        }
    }

    /// Write an arbitrary event line.
    pub fn emit(&mut self, event: &MonitorEvent) {
        match write_json_line(&mut self.writer, event) {
            Ok(()) => self.lines += 1,
            Err(e) => {
                self.failures += 1;
                tracing::error!("Failed to write snapshot: {}", e);
            }
        }
    }

    /// Lines successfully written.
    pub fn lines(&self) -> u64 {
        self.lines
    }

    /// Lines that failed to write.
    pub fn failures(&self) -> u64 {
        self.failures
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Presenter for JsonLinesPresenter<W> {
    fn points_changed(&mut self, spectrum: &Spectrum) {
        self.emit(&MonitorEvent::Spectrum(spectrum.snapshot()));
    }
}
