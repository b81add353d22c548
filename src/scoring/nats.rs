use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use super::{AnalysisResult, Scoring, ScoringError};
use crate::nats::{AnalysisRequestMessage, NatsClient};
use crate::transcript::{render_transcript, TranscriptLine};

/// Scoring adapter backed by the NATS analysis service.
///
/// One request/reply exchange per session; the reply must deserialize
/// into the analysis schema and line up with the question count, or the
/// call fails and the orchestrator falls back to local scoring.
pub struct NatsScoring {
    client: Arc<NatsClient>,
    timeout: Duration,
}

impl NatsScoring {
    pub fn new(client: Arc<NatsClient>, timeout: Duration) -> Self {
        Self { client, timeout }
    }
}

#[async_trait::async_trait]
impl Scoring for NatsScoring {
    async fn analyze(
        &self,
        lines: &[TranscriptLine],
        company: &str,
        question_count: usize,
    ) -> Result<AnalysisResult, ScoringError> {
        let request = AnalysisRequestMessage {
            session_id: self.client.session_id().to_string(),
            company: company.to_string(),
            question_count,
            transcript: render_transcript(lines),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        let payload = self
            .client
            .request_analysis(&request, self.timeout)
            .await
            .map_err(|e| ScoringError::Provider(format!("{:#}", e)))?;

        let result: AnalysisResult = serde_json::from_slice(&payload)
            .map_err(|e| ScoringError::InvalidResponse(e.to_string()))?;

        result
            .validate(question_count)
            .map_err(ScoringError::InvalidResponse)?;

        info!(
            "Received analysis for {} questions (pass={})",
            question_count, result.decision.pass
        );

        Ok(result)
    }
}
