//! Synchronous byte source the decoder drains.

use std::collections::VecDeque;
use std::io;

/// A link that can report and hand over already-received bytes without
/// blocking.
///
/// The decoder only calls this from inside a "bytes available"
/// notification and only asks for whole words.
pub trait ByteSource {
    /// Number of bytes that can be read right now.
    fn bytes_available(&self) -> usize;

    /// Read up to `buf.len()` of the available bytes. Must not block.
    fn read_available(&mut self, buf: &mut [u8]) -> io::Result<usize>;
}

/// In-memory link. Bytes are appended at the back and read from the front.
impl ByteSource for VecDeque<u8> {
    fn bytes_available(&self) -> usize {
        self.len()
    }

    fn read_available(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = buf.len().min(self.len());
        for (dst, src) in buf.iter_mut().zip(self.drain(..n)) {
            *dst = src;
        }
        Ok(n)
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn bytes_available(&self) -> usize {
        (**self).bytes_available()
    }

    fn read_available(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        (**self).read_available(buf)
    }
}
