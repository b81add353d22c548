//! Narration port
//!
//! Converts a question string into audio and plays it. The orchestrator
//! treats every narration failure as non-fatal: a session proceeds to the
//! thinking countdown whether or not the question was spoken aloud.

use std::time::Duration;
use tracing::info;

/// Speech synthesis errors
#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("cannot synthesize empty text")]
    EmptyText,
    #[error("speech provider unreachable: {0}")]
    ProviderUnreachable(String),
    #[error("playback failed: {0}")]
    Playback(String),
}

/// Narration port: resolves once playback of the synthesized question
/// has completed.
#[async_trait::async_trait]
pub trait Narration: Send + Sync {
    async fn speak(&self, text: &str) -> Result<(), SynthesisError>;
}

/// Local narration without an audio device.
///
/// Holds the session for roughly as long as a spoken reading of the
/// question would take, so the ask/think/record pacing matches a real
/// interviewer.
pub struct SilentNarration {
    words_per_second: f64,
}

impl SilentNarration {
    pub fn new() -> Self {
        Self {
            // Conversational reading pace, ~150 WPM
            words_per_second: 2.5,
        }
    }
}

impl Default for SilentNarration {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Narration for SilentNarration {
    async fn speak(&self, text: &str) -> Result<(), SynthesisError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SynthesisError::EmptyText);
        }

        let words = text.split_whitespace().count();
        let secs = (words as f64 / self.words_per_second).clamp(0.5, 20.0);

        info!("Narrating question ({} words, ~{:.1}s)", words, secs);
        tokio::time::sleep(Duration::from_secs_f64(secs)).await;

        Ok(())
    }
}
