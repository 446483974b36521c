//! Transport module - feeding link bytes into a session.
//!
//! Provides:
//! - [`ByteSource`] - non-blocking "read what is there" seam the decoder drains
//! - [`DeviceLink`] - serial device node, plain file, or stdin as an async stream
//! - [`run_link`] / [`run_link_until`] - async read loop pushing link bytes into a session

mod device;
mod runner;
mod source;

pub use device::DeviceLink;
pub use runner::{run_link, run_link_until, send_handshake};
pub use source::ByteSource;
