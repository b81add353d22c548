use std::path::PathBuf;
use std::time::Duration;

use crate::scoring::Thresholds;

/// Configuration for one interview session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Unique session identifier (e.g. "interview-<uuid>")
    pub session_id: String,

    /// Thinking countdown length before recording starts
    /// Default: 5 seconds
    pub thinking_secs: u64,

    /// Upper bound on the batch scoring call
    pub scoring_timeout: Duration,

    /// Directory for exported answer clips; None disables export
    pub recordings_dir: Option<PathBuf>,

    /// Pass thresholds for the fallback scorer
    pub thresholds: Thresholds,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            session_id: format!("interview-{}", uuid::Uuid::new_v4()),
            thinking_secs: 5,
            scoring_timeout: Duration::from_secs(45),
            recordings_dir: None,
            thresholds: Thresholds::default(),
        }
    }
}
