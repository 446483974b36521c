//! Async link runner.
//!
//! Reads whatever the link delivers and pushes it into the session. Each
//! read completing is the "bytes available" notification; decoding then
//! runs synchronously on this task before the next read is awaited.

use std::future::Future;
use std::io;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::{Result, SpectrumError};
use crate::protocol::{DecoderState, WORD_SIZE};
use crate::session::{Presenter, SpectrumSession};

/// Write the wake-up bytes the device waits for after the port opens.
///
/// Does nothing for an empty handshake.
///
/// # Errors
///
/// Returns `ConnectionClosed` if the link is gone, or the I/O error.
pub async fn send_handshake<W>(writer: &mut W, handshake: &[u8]) -> Result<()>
where
    W: AsyncWrite + Unpin + ?Sized,
{
    if handshake.is_empty() {
        return Ok(());
    }

    let written = match writer.write_all(handshake).await {
        Ok(()) => writer.flush().await,
        Err(e) => Err(e),
    };

    match written {
        Ok(()) => {
            tracing::debug!("Sent {}-byte handshake", handshake.len());
            Ok(())
        }
        Err(e) if matches!(e.kind(), io::ErrorKind::BrokenPipe | io::ErrorKind::WriteZero) => {
            Err(SpectrumError::ConnectionClosed)
        }
        Err(e) => Err(SpectrumError::Io(e)),
    }
}

/// Read `reader` until EOF, feeding every chunk into `session`.
///
/// Returns the session once the link closes so the caller can inspect the
/// final spectrum.
///
/// # Errors
///
/// Returns the I/O error if a read fails. Frame errors are logged by the
/// session and do not stop the loop.
pub async fn run_link<R, P>(
    reader: R,
    session: SpectrumSession<P>,
    read_buffer: usize,
) -> Result<SpectrumSession<P>>
where
    R: AsyncRead + Unpin,
    P: Presenter,
{
    run_link_until(reader, session, read_buffer, std::future::pending()).await
}

/// Like [`run_link`], but also stops when `shutdown` completes.
///
/// The session is returned on both paths, so the caller can still report
/// on it after an interrupt.
///
/// # Errors
///
/// Returns the I/O error if a read fails.
pub async fn run_link_until<R, P, F>(
    mut reader: R,
    mut session: SpectrumSession<P>,
    read_buffer: usize,
    shutdown: F,
) -> Result<SpectrumSession<P>>
where
    R: AsyncRead + Unpin,
    P: Presenter,
    F: Future<Output = ()>,
{
    let mut buf = vec![0u8; read_buffer.max(WORD_SIZE)];

    tokio::pin!(shutdown);

    loop {
        let read = tokio::select! {
            read = reader.read(&mut buf) => read,
            () = &mut shutdown => {
                tracing::debug!("Shutdown requested, leaving read loop");
                break;
            }
        };

        let n = match read {
            Ok(0) => break, // Link closed
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(SpectrumError::Io(e)),
        };

        let report = session.push(&buf[..n]);
        if report.frames_applied > 0 {
            tracing::trace!(
                "Applied {} frames ({} setup, {} data)",
                report.frames_applied,
                report.setups,
                report.data
            );
        }
    }

    let decoder = session.decoder();
    if decoder.state() != DecoderState::Idle || decoder.pending_len() > 0 {
        tracing::debug!(
            "Link closed mid-frame ({:?}, {} payload bytes)",
            decoder.state(),
            decoder.buffered_len()
        );
    }
    tracing::info!(
        "Link finished after {} words ({} setup, {} data frames, {} ignored)",
        decoder.stats().words,
        decoder.stats().setup_frames,
        decoder.stats().data_frames,
        decoder.stats().ignored_words
    );

    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{encode_data_frame, encode_setup_frame};
    use tokio::io::duplex;

    #[tokio::test]
    async fn test_run_link_applies_frames_until_eof() {
        let (mut device, host) = duplex(64);

        let writer = tokio::spawn(async move {
            device
                .write_all(&encode_setup_frame(1000.0, 8.0))
                .await
                .unwrap();
            device
                .write_all(&encode_data_frame(0.0, &[5.0, 7.0, 9.0]))
                .await
                .unwrap();
            // drop closes the link
        });

        let session = run_link(host, SpectrumSession::new(()), 5).await.unwrap();
        writer.await.unwrap();

        let magnitudes: Vec<f64> = session
            .spectrum()
            .points()
            .iter()
            .map(|p| p.magnitude)
            .collect();
        assert_eq!(magnitudes, vec![5.0, 7.0, 9.0]);
        assert_eq!(session.spectrum().max_magnitude(), 9.0);
    }

    #[tokio::test]
    async fn test_run_link_keeps_going_after_bad_setup() {
        let (mut device, host) = duplex(1024);

        let mut bytes = encode_setup_frame(1000.0, 8.0).to_vec();
        // Setup frame with a single value: rejected.
        bytes.extend_from_slice(&encode_setup_frame(1.0, 1.0)[..16]);
        bytes.extend_from_slice(&crate::protocol::encode_word(crate::protocol::FRAME_END));
        bytes.extend_from_slice(&encode_data_frame(0.0, &[1.0]));
        device.write_all(&bytes).await.unwrap();
        drop(device);

        let session = run_link(host, SpectrumSession::new(()), 4096).await.unwrap();

        assert_eq!(session.spectrum().len(), 3);
        assert_eq!(session.spectrum().points()[0].magnitude, 1.0);
        assert_eq!(session.decoder().stats().setup_frames, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_link_until_returns_session_on_shutdown() {
        let (mut device, host) = duplex(1024);
        device
            .write_all(&encode_setup_frame(1000.0, 8.0))
            .await
            .unwrap();
        device
            .write_all(&encode_data_frame(0.0, &[2.0, 4.0]))
            .await
            .unwrap();

        // Link stays open; only the shutdown future ends the loop.
        let shutdown = tokio::time::sleep(std::time::Duration::from_secs(1));
        let session = run_link_until(host, SpectrumSession::new(()), 64, shutdown)
            .await
            .unwrap();

        assert_eq!(session.spectrum().len(), 3);
        assert_eq!(session.spectrum().max_magnitude(), 4.0);
        assert_eq!(session.decoder().stats().data_frames, 1);
        drop(device);
    }

    #[tokio::test]
    async fn test_send_handshake() {
        let (mut host, mut device) = duplex(64);

        send_handshake(&mut host, b"hoi").await.unwrap();
        drop(host);

        let mut received = Vec::new();
        device.read_to_end(&mut received).await.unwrap();
        assert_eq!(received, b"hoi");
    }

    #[tokio::test]
    async fn test_empty_handshake_writes_nothing() {
        let (mut host, mut device) = duplex(64);

        send_handshake(&mut host, b"").await.unwrap();
        drop(host);

        let mut received = Vec::new();
        device.read_to_end(&mut received).await.unwrap();
        assert!(received.is_empty());
    }

    #[tokio::test]
    async fn test_handshake_to_closed_link() {
        let (mut host, device) = duplex(64);
        drop(device);

        let result = send_handshake(&mut host, b"hoi").await;
        assert!(matches!(result, Err(SpectrumError::ConnectionClosed)));
    }
}
