//! # spectrum-link
//!
//! Decoder for the FFT magnitude stream a measurement device sends over a
//! serial link.
//!
//! The device writes 8-byte big-endian words. Sentinel words open a setup
//! frame (sampling frequency, FFT size) or a data frame (one magnitude per
//! bin) and close it again. This crate turns that byte stream into a
//! [`Spectrum`]: frequency/magnitude points, plot axis bounds and a running
//! maximum.
//!
//! ## Architecture
//!
//! - **protocol**: wire format and the `Idle`/`Setup`/`Data` frame decoder
//! - **record**: setup and data record parsers
//! - **spectrum**: the point model
//! - **session**: glue, called whenever the transport has bytes
//! - **transport** / **output**: async link runner and JSON-lines publishing
//!   used by the `spectrum-monitor` binary
//!
//! ## Example
//!
//! ```
//! use spectrum_link::protocol::{encode_data_frame, encode_setup_frame};
//! use spectrum_link::SpectrumSession;
//!
//! let mut session = SpectrumSession::new(());
//! session.push(&encode_setup_frame(1000.0, 8.0));
//! session.push(&encode_data_frame(0.0, &[5.0, 7.0]));
//!
//! let points = session.spectrum().points();
//! assert_eq!(points.len(), 3);
//! assert_eq!(points[0].frequency, 125.0);
//! assert_eq!(points[1].magnitude, 7.0);
//! ```

pub mod config;
pub mod error;
pub mod output;
pub mod protocol;
pub mod record;
pub mod session;
pub mod spectrum;
pub mod transport;

pub use config::{MonitorConfig, SessionConfig};
pub use error::SpectrumError;
pub use session::{DrainReport, Presenter, SpectrumSession};
pub use spectrum::{AxisBounds, Spectrum, SpectrumPoint, SpectrumSnapshot};
