use super::{Transcription, TranscriptionError};
use crate::capture::Clip;

/// Stand-in used when no transcription provider is configured.
///
/// Every clip errors, so the session resolves each answer to the failure
/// marker and still completes with whatever was captured.
pub struct OfflineTranscription;

#[async_trait::async_trait]
impl Transcription for OfflineTranscription {
    async fn transcribe(&self, _clip: &Clip) -> Result<String, TranscriptionError> {
        Err(TranscriptionError::Provider(
            "no transcription provider configured".to_string(),
        ))
    }
}
