use futures::stream::StreamExt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use super::{Transcription, TranscriptionError};
use crate::capture::Clip;
use crate::nats::{NatsClient, TranscriptMessage};

/// Transcription adapter backed by the NATS STT service.
///
/// Publishes the clip and waits for the matching final transcript on the
/// text subject. Partial (interim) results are ignored.
pub struct NatsTranscription {
    client: Arc<NatsClient>,
    timeout: Duration,
    /// Sequence number tying each published clip to its transcript
    sequence: AtomicUsize,
}

impl NatsTranscription {
    pub fn new(client: Arc<NatsClient>, timeout: Duration) -> Self {
        Self {
            client,
            timeout,
            sequence: AtomicUsize::new(0),
        }
    }
}

#[async_trait::async_trait]
impl Transcription for NatsTranscription {
    async fn transcribe(&self, clip: &Clip) -> Result<String, TranscriptionError> {
        if clip.is_empty() {
            return Err(TranscriptionError::EmptyClip);
        }

        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst);

        // Subscribe before publishing so the reply cannot be missed
        let mut subscriber = self
            .client
            .subscribe_transcripts()
            .await
            .map_err(|e| TranscriptionError::Provider(format!("{:#}", e)))?;

        self.client
            .publish_clip(sequence, &clip.bytes, &clip.mime_type)
            .await
            .map_err(|e| TranscriptionError::Provider(format!("{:#}", e)))?;

        let deadline = tokio::time::Instant::now() + self.timeout;

        loop {
            let message = tokio::time::timeout_at(deadline, subscriber.next())
                .await
                .map_err(|_| TranscriptionError::Timeout(self.timeout))?
                .ok_or_else(|| {
                    TranscriptionError::Provider("transcript stream closed".to_string())
                })?;

            match serde_json::from_slice::<TranscriptMessage>(&message.payload) {
                Ok(transcript) => {
                    // Filter by session and clip sequence
                    if transcript.session_id != self.client.session_id()
                        || transcript.question_index != sequence
                    {
                        continue;
                    }

                    if transcript.partial {
                        continue;
                    }

                    info!(
                        "Received transcript for clip {} ({} chars, confidence={:?})",
                        sequence,
                        transcript.text.len(),
                        transcript.confidence
                    );

                    return Ok(transcript.text);
                }
                Err(e) => {
                    warn!("Failed to parse transcript message: {}", e);
                }
            }
        }
    }
}
