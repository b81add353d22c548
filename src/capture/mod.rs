//! Media capture port
//!
//! Wraps device acquisition and chunked recording behind start/stop
//! operations that yield a finished clip. The session owns exactly one
//! capture adapter and must release it when the session ends.

mod channel;

pub use channel::ChannelCapture;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Audio sample data (16-bit PCM, interleaved)
#[derive(Debug, Clone)]
pub struct AudioFrame {
    /// Raw audio samples (i16 PCM, interleaved)
    pub samples: Vec<i16>,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of channels
    pub channels: u16,
    /// Timestamp in milliseconds since recording started
    pub timestamp_ms: u64,
}

/// A finished recording for one answer
#[derive(Debug, Clone, Default)]
pub struct Clip {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl Clip {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }

    /// A clip with no captured data
    pub fn empty() -> Self {
        Self {
            bytes: Vec::new(),
            mime_type: String::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn byte_size(&self) -> usize {
        self.bytes.len()
    }
}

/// Capture device errors
#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    #[error("capture permission denied")]
    PermissionDenied,
    #[error("capture device busy: {0}")]
    Busy(String),
    #[error("capture device already released")]
    Released,
    #[error("clip encoding failed: {0}")]
    Encode(String),
}

/// Media capture port
///
/// One adapter instance exclusively owns the capture device for a
/// session's duration. `release` stops all tracks and must be called on
/// session end, cancellation, or failure.
#[async_trait::async_trait]
pub trait Capture: Send + Sync {
    /// Begin capturing the next clip
    async fn start(&mut self) -> std::result::Result<(), DeviceError>;

    /// Stop capturing and return the finished clip (possibly empty)
    async fn stop(&mut self) -> std::result::Result<Clip, DeviceError>;

    /// Release the underlying device; further start/stop calls fail
    async fn release(&mut self);
}

/// Export a finished clip to the recordings directory.
///
/// Filename pattern: `<session_id>-q<question_number>.wav`
pub fn export_clip(
    dir: &Path,
    session_id: &str,
    question_number: usize,
    clip: &Clip,
) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).context("Failed to create recordings directory")?;

    let path = dir.join(format!("{}-q{}.wav", session_id, question_number));
    std::fs::write(&path, &clip.bytes)
        .with_context(|| format!("Failed to write clip: {:?}", path))?;

    Ok(path)
}
