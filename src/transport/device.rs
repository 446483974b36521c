//! Device link: a serial device node, a capture file, or stdin.
//!
//! Port settings (baud rate, parity) are left to the OS/device; the link
//! only opens the node and moves bytes.
//!
//! # Example
//!
//! ```ignore
//! use spectrum_link::transport::{send_handshake, DeviceLink};
//!
//! let mut link = DeviceLink::open(Some("/dev/ttyACM0".as_ref())).await?;
//! send_handshake(&mut link, b"hoi").await?;
//! ```

use std::io;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncRead, AsyncWrite, ReadBuf, Stdin};

use crate::error::Result;

enum Inner {
    File { file: File, writable: bool },
    Stdin(Stdin),
}

/// An open link to the measurement device.
pub struct DeviceLink {
    inner: Inner,
    path: Option<PathBuf>,
}

impl DeviceLink {
    /// Open `path` for reading (and writing if permitted), or stdin when
    /// `path` is `None`.
    pub async fn open(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::stdin());
        };

        let inner = match OpenOptions::new().read(true).write(true).open(path).await {
            Ok(file) => Inner::File {
                file,
                writable: true,
            },
            Err(e) => {
                tracing::debug!(
                    "Opening {:?} read-write failed ({}), retrying read-only",
                    path,
                    e
                );
                let file = OpenOptions::new().read(true).open(path).await?;
                Inner::File {
                    file,
                    writable: false,
                }
            }
        };

        Ok(Self {
            inner,
            path: Some(path.to_path_buf()),
        })
    }

    /// Link reading from stdin.
    pub fn stdin() -> Self {
        Self {
            inner: Inner::Stdin(tokio::io::stdin()),
            path: None,
        }
    }

    /// Path of the opened device, `None` for stdin.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Whether a handshake can be written to this link.
    pub fn is_writable(&self) -> bool {
        matches!(self.inner, Inner::File { writable: true, .. })
    }
}

fn read_only() -> io::Error {
    io::Error::new(io::ErrorKind::Unsupported, "link is read-only")
}

impl AsyncRead for DeviceLink {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        match &mut self.inner {
            Inner::File { file, .. } => Pin::new(file).poll_read(cx, buf),
            Inner::Stdin(stdin) => Pin::new(stdin).poll_read(cx, buf),
        }
    }
}

impl AsyncWrite for DeviceLink {
    fn poll_write(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        match &mut self.inner {
            Inner::File {
                file,
                writable: true,
            } => Pin::new(file).poll_write(cx, buf),
            _ => Poll::Ready(Err(read_only())),
        }
    }

    fn poll_flush(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match &mut self.inner {
            Inner::File { file, .. } => Pin::new(file).poll_flush(cx),
            Inner::Stdin(_) => Poll::Ready(Ok(())),
        }
    }

    fn poll_shutdown(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match &mut self.inner {
            Inner::File { file, .. } => Pin::new(file).poll_shutdown(cx),
            Inner::Stdin(_) => Poll::Ready(Ok(())),
        }
    }
}
