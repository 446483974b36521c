//! Output module - JSON lines on stdout for an external plotter.
//!
//! The monitor keeps stdout as a machine-readable channel:
//! - **stdout**: one JSON [`MonitorEvent`] per line
//! - **stderr**: logs (never parsed)
//!
//! # Example
//!
//! ```
//! use spectrum_link::output::{JsonLinesPresenter, MonitorEvent};
//! use spectrum_link::protocol::encode_setup_frame;
//! use spectrum_link::SpectrumSession;
//!
//! let mut session = SpectrumSession::new(JsonLinesPresenter::new(Vec::new()));
//! session.push(&encode_setup_frame(400.0, 4.0));
//!
//! let out = String::from_utf8(session.presenter().get_ref().clone()).unwrap();
//! assert!(out.starts_with(r#"{"event":"spectrum""#));
//! ```

mod presenter;
mod stdio;

pub use presenter::{JsonLinesPresenter, MonitorEvent};
pub use stdio::write_json_line;
