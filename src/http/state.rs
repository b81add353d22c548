use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, RwLock};

use crate::capture::{AudioFrame, ChannelCapture};
use crate::config::Config;
use crate::narration::SilentNarration;
use crate::nats::NatsClient;
use crate::scoring::{LocalScoring, NatsScoring, Scoring};
use crate::session::{Adapters, InterviewSession};
use crate::transcription::{NatsTranscription, OfflineTranscription, Transcription};

/// One live session plus the sender feeding its capture channel
#[derive(Clone)]
pub struct SessionEntry {
    pub session: Arc<InterviewSession>,
    pub frames: mpsc::Sender<AudioFrame>,
}

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,

    /// Sessions by id; terminal sessions stay queryable
    pub sessions: Arc<RwLock<HashMap<String, SessionEntry>>>,
}

impl AppState {
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            config,
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Build the adapter set for a new session.
    ///
    /// With NATS enabled, transcription and scoring go through the
    /// provider services; otherwise the session runs offline with the
    /// local fallback scorer.
    pub async fn build_adapters(
        &self,
        session_id: &str,
    ) -> Result<(Adapters, mpsc::Sender<AudioFrame>)> {
        let (capture, frames) = ChannelCapture::with_channel(256);

        let (transcription, scoring): (Box<dyn Transcription>, Box<dyn Scoring>) =
            if self.config.providers.nats_enabled {
                let client = Arc::new(
                    NatsClient::connect(
                        &self.config.providers.nats_url,
                        session_id.to_string(),
                    )
                    .await?,
                );

                (
                    Box::new(NatsTranscription::new(
                        Arc::clone(&client),
                        Duration::from_secs(self.config.providers.transcription_timeout_secs),
                    )),
                    Box::new(NatsScoring::new(
                        client,
                        Duration::from_secs(self.config.session.scoring_timeout_secs),
                    )),
                )
            } else {
                (
                    Box::new(OfflineTranscription),
                    Box::new(LocalScoring::new(self.config.session.thresholds.clone())),
                )
            };

        let adapters = Adapters {
            narration: Box::new(SilentNarration::new()),
            capture: Box::new(capture),
            transcription,
            scoring,
        };

        Ok((adapters, frames))
    }
}
