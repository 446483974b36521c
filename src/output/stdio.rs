//! Line-oriented JSON writing.
//!
//! - Uses explicit `\n`, NOT `println!` (which may add `\r\n` on Windows)
//! - Flushes after every line so a reader on a pipe sees whole updates
//! - Any logging should go to stderr, not stdout

use std::io::Write;

/// Write a line to `writer`, followed by a single `\n`, and flush.
fn write_line<W: Write + ?Sized>(writer: &mut W, line: &str) -> std::io::Result<()> {
    writer.write_all(line.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()
}

/// Serialize `value` as one JSON line into `writer`.
///
/// # Errors
///
/// Returns error if serialization or write fails.
pub fn write_json_line<W, T>(writer: &mut W, value: &T) -> crate::error::Result<()>
where
    W: Write + ?Sized,
    T: serde::Serialize + ?Sized,
{
    let json = serde_json::to_string(value)?;
    write_line(writer, &json)?;
    Ok(())
}
