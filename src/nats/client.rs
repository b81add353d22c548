use anyhow::{Context, Result};
use async_nats::Client;
use base64::Engine;
use std::time::Duration;
use tracing::info;

use super::messages::{AnalysisRequestMessage, ClipMessage};

/// Subject carrying answer clips to the transcription service
fn clip_subject(session_id: &str) -> String {
    format!("stt.clip.{}", session_id)
}

/// Subject used by the scoring service for batch analysis
const ANALYZE_SUBJECT: &str = "scoring.analyze";

pub struct NatsClient {
    client: Client,
    session_id: String,
}

impl NatsClient {
    /// Connect to NATS server
    pub async fn connect(url: &str, session_id: String) -> Result<Self> {
        info!("Connecting to NATS at {}", url);

        let client = async_nats::connect(url)
            .await
            .context("Failed to connect to NATS")?;

        info!("Connected to NATS successfully");

        Ok(Self { client, session_id })
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Publish one answer clip for transcription
    pub async fn publish_clip(
        &self,
        question_index: usize,
        clip_bytes: &[u8],
        mime_type: &str,
    ) -> Result<()> {
        let subject = clip_subject(&self.session_id);

        let message = ClipMessage {
            session_id: self.session_id.clone(),
            question_index,
            audio: base64::engine::general_purpose::STANDARD.encode(clip_bytes),
            mime_type: mime_type.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        let payload = serde_json::to_vec(&message)?;

        self.client
            .publish(subject.clone(), payload.into())
            .await
            .context("Failed to publish clip")?;

        info!(
            "Published clip to {} (question={}, bytes={})",
            subject,
            question_index,
            clip_bytes.len()
        );

        Ok(())
    }

    /// Subscribe to transcript messages
    ///
    /// The transcription service publishes to stt.text.<session_id>; we
    /// subscribe to the whole text hierarchy and filter by session_id in
    /// the message payload.
    pub async fn subscribe_transcripts(&self) -> Result<async_nats::Subscriber> {
        let subject = "stt.text.>";

        info!("Subscribing to transcripts on {}", subject);

        let subscriber = self
            .client
            .subscribe(subject)
            .await
            .context("Failed to subscribe to transcripts")?;

        Ok(subscriber)
    }

    /// Submit the full transcript for analysis and return the raw reply
    /// payload
    pub async fn request_analysis(
        &self,
        request: &AnalysisRequestMessage,
        timeout: Duration,
    ) -> Result<Vec<u8>> {
        let payload = serde_json::to_vec(request)?;

        info!(
            "Requesting analysis on {} ({} questions, {} transcript bytes)",
            ANALYZE_SUBJECT,
            request.question_count,
            request.transcript.len()
        );

        let reply = tokio::time::timeout(
            timeout,
            self.client.request(ANALYZE_SUBJECT, payload.into()),
        )
        .await
        .context("Analysis request timed out")?
        .context("Analysis request failed")?;

        Ok(reply.payload.to_vec())
    }

    /// Close NATS connection
    pub async fn close(self) -> Result<()> {
        info!("Closing NATS connection");
        // async-nats handles cleanup on drop
        Ok(())
    }
}
