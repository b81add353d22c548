use anyhow::Result;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::scoring::Thresholds;
use crate::session::SessionConfig;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub session: SessionSettings,
    pub providers: ProviderConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct SessionSettings {
    /// Thinking countdown before each recording, in seconds
    pub thinking_secs: u64,

    /// Upper bound on the batch scoring call, in seconds
    pub scoring_timeout_secs: u64,

    /// Directory for exported answer clips; omit to disable export
    pub recordings_path: Option<String>,

    /// Pass thresholds for the fallback scorer
    #[serde(default)]
    pub thresholds: Thresholds,
}

#[derive(Debug, Deserialize)]
pub struct ProviderConfig {
    /// Use the NATS transcription/scoring services; when false the
    /// session runs fully offline with the local fallback scorer
    pub nats_enabled: bool,
    pub nats_url: String,

    /// Per-clip transcription timeout, in seconds
    pub transcription_timeout_secs: u64,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Session configuration derived from the file-backed settings
    pub fn session_config(&self, session_id: String) -> SessionConfig {
        SessionConfig {
            session_id,
            thinking_secs: self.session.thinking_secs,
            scoring_timeout: Duration::from_secs(self.session.scoring_timeout_secs),
            recordings_dir: self.session.recordings_path.as_ref().map(PathBuf::from),
            thresholds: self.session.thresholds.clone(),
        }
    }
}
