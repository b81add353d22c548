use std::io::Cursor;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::{AudioFrame, Capture, Clip, DeviceError};

/// Capture adapter fed by a channel of audio frames.
///
/// The frame source (a platform backend, or the HTTP frame-ingest route)
/// pushes `AudioFrame`s continuously; frames are only buffered while a
/// recording is armed. `stop` encodes the buffered frames as an in-memory
/// WAV clip.
pub struct ChannelCapture {
    frames: Option<mpsc::Receiver<AudioFrame>>,
    armed: Arc<AtomicBool>,
    buffer: Arc<Mutex<Vec<AudioFrame>>>,
    drain_task: Option<JoinHandle<()>>,
    released: bool,
}

impl ChannelCapture {
    /// Wrap an existing frame stream
    pub fn new(frames: mpsc::Receiver<AudioFrame>) -> Self {
        Self {
            frames: Some(frames),
            armed: Arc::new(AtomicBool::new(false)),
            buffer: Arc::new(Mutex::new(Vec::new())),
            drain_task: None,
            released: false,
        }
    }

    /// Create a capture adapter together with the sender side of its
    /// frame stream
    pub fn with_channel(capacity: usize) -> (Self, mpsc::Sender<AudioFrame>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self::new(rx), tx)
    }

    fn ensure_draining(&mut self) {
        if self.drain_task.is_some() {
            return;
        }

        let Some(mut rx) = self.frames.take() else {
            return;
        };

        let armed = Arc::clone(&self.armed);
        let buffer = Arc::clone(&self.buffer);

        self.drain_task = Some(tokio::spawn(async move {
            while let Some(frame) = rx.recv().await {
                if armed.load(Ordering::SeqCst) {
                    buffer.lock().await.push(frame);
                }
                // Frames arriving while disarmed are discarded
            }
            info!("Capture frame stream closed");
        }));
    }

    fn encode_wav(frames: &[AudioFrame]) -> std::result::Result<Vec<u8>, DeviceError> {
        let first = &frames[0];
        let spec = hound::WavSpec {
            channels: first.channels,
            sample_rate: first.sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec)
                .map_err(|e| DeviceError::Encode(e.to_string()))?;

            for frame in frames {
                for &sample in &frame.samples {
                    writer
                        .write_sample(sample)
                        .map_err(|e| DeviceError::Encode(e.to_string()))?;
                }
            }

            writer
                .finalize()
                .map_err(|e| DeviceError::Encode(e.to_string()))?;
        }

        Ok(cursor.into_inner())
    }
}

#[async_trait::async_trait]
impl Capture for ChannelCapture {
    async fn start(&mut self) -> std::result::Result<(), DeviceError> {
        if self.released {
            return Err(DeviceError::Released);
        }

        self.ensure_draining();
        self.buffer.lock().await.clear();
        self.armed.store(true, Ordering::SeqCst);

        Ok(())
    }

    async fn stop(&mut self) -> std::result::Result<Clip, DeviceError> {
        if self.released {
            return Err(DeviceError::Released);
        }

        self.armed.store(false, Ordering::SeqCst);

        let frames = std::mem::take(&mut *self.buffer.lock().await);
        if frames.is_empty() {
            return Ok(Clip::empty());
        }

        let sample_count: usize = frames.iter().map(|f| f.samples.len()).sum();
        let bytes = Self::encode_wav(&frames)?;

        info!(
            "Captured clip: {} frames, {} samples, {} bytes",
            frames.len(),
            sample_count,
            bytes.len()
        );

        Ok(Clip::new(bytes, "audio/wav"))
    }

    async fn release(&mut self) {
        self.armed.store(false, Ordering::SeqCst);
        self.released = true;
        self.frames = None;

        if let Some(task) = self.drain_task.take() {
            task.abort();
            if let Err(e) = task.await {
                if !e.is_cancelled() {
                    warn!("Capture drain task failed: {}", e);
                }
            }
        }
    }
}
