//! Record module - typed views of completed frames.
//!
//! - [`SetupRecord`] - sampling parameters and the frequency axis they imply
//! - [`DataRecord`] - one sweep of spectral magnitudes
//!
//! Both parse a frame payload as consecutive little-endian `f64` values,
//! the order [`FrameBuffer`](crate::protocol::FrameBuffer) stores them in.

mod data;
mod setup;

pub use data::DataRecord;
pub use setup::SetupRecord;
