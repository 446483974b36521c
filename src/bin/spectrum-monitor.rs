//! Spectrum Monitor - decode a device link into JSON lines
//!
//! Reads the device stream from a serial node, a capture file or stdin,
//! and writes one spectrum snapshot per frame to stdout.

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use spectrum_link::output::{JsonLinesPresenter, MonitorEvent};
use spectrum_link::transport::{run_link_until, send_handshake, DeviceLink};
use spectrum_link::{MonitorConfig, SpectrumSession};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries snapshots
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = MonitorConfig::from_env();

    info!("Configuration:");
    match &config.link_path {
        Some(path) => info!("  Link: {}", path.display()),
        None => info!("  Link: stdin"),
    }
    info!("  Handshake: {:?}", String::from_utf8_lossy(&config.handshake));
    info!("  Max points: {}", config.session.max_points);
    info!("  Read buffer: {} bytes", config.read_buffer);

    let mut link = DeviceLink::open(config.link_path.as_deref())
        .await
        .with_context(|| format!("failed to open link {:?}", config.link_path))?;

    if link.is_writable() {
        send_handshake(&mut link, &config.handshake)
            .await
            .context("failed to send handshake")?;
    } else if !config.handshake.is_empty() {
        warn!("Link is read-only, skipping handshake");
    }

    let presenter = JsonLinesPresenter::new(std::io::stdout());
    let session = SpectrumSession::with_config(presenter, config.session.clone());

    info!("Reading link. Press Ctrl+C to stop.");

    let interrupted = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Interrupted"),
            Err(e) => {
                warn!("Cannot listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    let session = run_link_until(link, session, config.read_buffer, interrupted)
        .await
        .context("link read failed")?;

    let stats = *session.decoder().stats();
    let (_, mut presenter) = session.into_parts();
    presenter.emit(&MonitorEvent::Closed(stats));
    info!("{} snapshots written", presenter.lines());

    Ok(())
}
