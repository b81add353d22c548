//! Transcription port
//!
//! Converts a recorded clip into text. The orchestrator calls this once
//! per stored clip, sequentially, at session end; a single clip's failure
//! is recorded as data and never aborts the loop.

mod nats;
mod offline;

pub use nats::NatsTranscription;
pub use offline::OfflineTranscription;

use crate::capture::Clip;
use std::time::Duration;

/// Per-clip transcription errors
#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("clip contains no audio data")]
    EmptyClip,
    #[error("transcription provider unreachable: {0}")]
    Provider(String),
    #[error("no transcript received within {0:?}")]
    Timeout(Duration),
}

/// Transcription port
#[async_trait::async_trait]
pub trait Transcription: Send + Sync {
    async fn transcribe(&self, clip: &Clip) -> Result<String, TranscriptionError>;
}
