//! Configuration for sessions and the monitor binary.
//!
//! [`SessionConfig`] is plain data passed to
//! [`SpectrumSession::with_config`](crate::SpectrumSession::with_config).
//! [`MonitorConfig`] is loaded from environment variables.

use std::path::PathBuf;

/// Default cap on points a setup frame may allocate.
pub const DEFAULT_MAX_POINTS: usize = 1 << 20;

/// Default read chunk size for the link runner.
pub const DEFAULT_READ_BUFFER: usize = 64 * 1024;

/// Wake-up string the device expects once the port is open.
pub const DEFAULT_HANDSHAKE: &[u8] = b"hoi";

/// Session limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Setup frames asking for more points than this are rejected.
    pub max_points: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_points: DEFAULT_MAX_POINTS,
        }
    }
}

/// Monitor configuration
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Device or file to read. `None` reads stdin.
    pub link_path: Option<PathBuf>,

    /// Bytes written to the link after opening. Empty disables.
    pub handshake: Vec<u8>,

    /// Read chunk size in bytes
    pub read_buffer: usize,

    pub session: SessionConfig,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            link_path: None,
            handshake: DEFAULT_HANDSHAKE.to_vec(),
            read_buffer: DEFAULT_READ_BUFFER,
            session: SessionConfig::default(),
        }
    }
}

impl MonitorConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            link_path: lookup("SPECTRUM_LINK_PATH")
                .filter(|p| !p.is_empty() && p != "-")
                .map(PathBuf::from),

            handshake: lookup("SPECTRUM_LINK_HANDSHAKE")
                .map(String::into_bytes)
                .unwrap_or(defaults.handshake),

            read_buffer: lookup("SPECTRUM_READ_BUFFER")
                .and_then(|s| s.parse().ok())
                .filter(|&n: &usize| n > 0)
                .unwrap_or(defaults.read_buffer),

            session: SessionConfig {
                max_points: lookup("SPECTRUM_MAX_POINTS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.session.max_points),
            },
        }
    }
}
