use anyhow::Result;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicU8, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{broadcast, mpsc, watch, Mutex};
use tracing::{error, info, warn};

use super::answer::{build_transcript_lines, Answer};
use super::config::SessionConfig;
use super::outcome::{SessionOutcome, SessionStatus, SessionSummary, StopOutcome};
use super::phase::{Phase, SessionEvent, SessionStateError};
use crate::capture::{self, Capture, Clip};
use crate::narration::Narration;
use crate::questions::QuestionSet;
use crate::scoring::{fallback, Score, Scoring};
use crate::transcript::{NO_SPEECH_MARKER, TRANSCRIPTION_FAILED_MARKER};
use crate::transcription::Transcription;

/// The external collaborators one session drives
pub struct Adapters {
    pub narration: Box<dyn Narration>,
    pub capture: Box<dyn Capture>,
    pub transcription: Box<dyn Transcription>,
    pub scoring: Box<dyn Scoring>,
}

/// An interview session: drives one interview from first question to
/// final aggregated result through an explicit state machine.
///
/// Commands arrive as method calls; narration, the thinking countdown,
/// and the transcription loop are suspension points where skip and
/// cancel signals are observed. Adapter failures are absorbed locally:
/// the session always completes with whatever partial data exists.
pub struct InterviewSession {
    config: SessionConfig,
    questions: QuestionSet,
    created_at: DateTime<Utc>,
    started: Instant,

    phase: AtomicU8,
    question_index: AtomicUsize,
    answers: Mutex<Vec<Answer>>,

    narration: Box<dyn Narration>,
    capture: Mutex<Box<dyn Capture>>,
    transcription: Box<dyn Transcription>,
    scoring: Box<dyn Scoring>,

    /// Whether capture start succeeded for the current question
    capture_active: AtomicBool,
    /// Session uptime in ms when the current recording started
    recording_started_ms: AtomicU64,

    skip_tx: mpsc::Sender<()>,
    skip_rx: Mutex<mpsc::Receiver<()>>,
    cancel_tx: watch::Sender<bool>,
    cancel_rx: watch::Receiver<bool>,

    events: broadcast::Sender<SessionEvent>,
    outcome: Mutex<Option<SessionOutcome>>,
}

impl InterviewSession {
    /// Create a new session over a fixed question set
    pub fn new(
        config: SessionConfig,
        questions: QuestionSet,
        adapters: Adapters,
    ) -> Result<Arc<Self>> {
        anyhow::ensure!(
            !questions.is_empty(),
            "question set must contain at least one question"
        );

        info!(
            "Creating interview session {} ({} questions, company={})",
            config.session_id,
            questions.len(),
            questions.company
        );

        let (skip_tx, skip_rx) = mpsc::channel(4);
        let (cancel_tx, cancel_rx) = watch::channel(false);
        let (events, _) = broadcast::channel(64);

        Ok(Arc::new(Self {
            config,
            questions,
            created_at: Utc::now(),
            started: Instant::now(),
            phase: AtomicU8::new(Phase::Idle as u8),
            question_index: AtomicUsize::new(0),
            answers: Mutex::new(Vec::new()),
            narration: adapters.narration,
            capture: Mutex::new(adapters.capture),
            transcription: adapters.transcription,
            scoring: adapters.scoring,
            capture_active: AtomicBool::new(false),
            recording_started_ms: AtomicU64::new(0),
            skip_tx,
            skip_rx: Mutex::new(skip_rx),
            cancel_tx,
            cancel_rx,
            events,
            outcome: Mutex::new(None),
        }))
    }

    pub fn session_id(&self) -> &str {
        &self.config.session_id
    }

    pub fn phase(&self) -> Phase {
        Phase::from_u8(self.phase.load(Ordering::SeqCst))
    }

    /// Text of the question the session is currently on
    pub fn current_question(&self) -> Option<&str> {
        self.questions.get(self.question_index.load(Ordering::SeqCst))
    }

    /// Subscribe to the session's phase-transition event stream
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Ask the current question.
    ///
    /// Validates and transitions to `AskingQuestion` synchronously, then
    /// drives narration, the thinking countdown, and capture start on a
    /// background task so the caller stays responsive.
    pub fn ask_current_question(self: &Arc<Self>) -> Result<(), SessionStateError> {
        self.try_transition(Phase::Idle, Phase::AskingQuestion, "ask_question")?;

        let index = self.question_index.load(Ordering::SeqCst);
        let Some(question) = self.questions.get(index) else {
            // Index past the set can only mean internal inconsistency;
            // back out without changing anything else
            self.phase.store(Phase::Idle as u8, Ordering::SeqCst);
            return Err(SessionStateError::QuestionsExhausted);
        };

        let question = question.to_string();
        let session = Arc::clone(self);
        tokio::spawn(async move {
            session.drive_question(index, question).await;
        });

        Ok(())
    }

    /// Cut the thinking countdown short and start recording immediately
    pub fn skip_thinking(&self) -> Result<(), SessionStateError> {
        let current = self.phase();
        if current != Phase::Thinking {
            return Err(SessionStateError::InvalidCommand {
                command: "skip_thinking",
                phase: current,
            });
        }

        let _ = self.skip_tx.try_send(());
        Ok(())
    }

    /// Stop recording the current answer.
    ///
    /// Stores the answer (empty clip included, so the one-answer-per-
    /// question invariant holds) and either returns to idle for the next
    /// question or, on the last question, runs transcription and
    /// analysis through to a terminal phase.
    pub async fn stop_recording(&self) -> Result<StopOutcome, SessionStateError> {
        self.try_transition(Phase::Recording, Phase::Processing, "stop_recording")?;

        let clip = if self.capture_active.swap(false, Ordering::SeqCst) {
            match self.capture.lock().await.stop().await {
                Ok(clip) => clip,
                Err(e) => {
                    warn!("Capture stop failed; treating as empty clip: {}", e);
                    Clip::empty()
                }
            }
        } else {
            // Capture never started for this question
            Clip::empty()
        };

        let index = self.question_index.load(Ordering::SeqCst);
        let question = self.questions.get(index).unwrap_or("").to_string();
        let answer = Answer::new(index, question, clip);

        let _ = self.events.send(SessionEvent::AnswerCaptured {
            question_index: index,
            clip_bytes: answer.clip_bytes,
        });

        let collected = {
            let mut answers = self.answers.lock().await;
            answers.push(answer);
            answers.len()
        };

        info!("Answer {} stored ({} collected)", index + 1, collected);

        let next = index + 1;
        if next < self.questions.len() {
            self.question_index.store(next, Ordering::SeqCst);
            self.try_transition(Phase::Processing, Phase::Idle, "advance")
                .map_err(|_| SessionStateError::Cancelled)?;
            Ok(StopOutcome::NextQuestion {
                question_index: next,
            })
        } else {
            let outcome = self.finalize().await?;
            Ok(StopOutcome::Finished(Box::new(outcome)))
        }
    }

    /// Cancel the session from any non-terminal phase.
    ///
    /// Deterministically stops and releases the capture device, discards
    /// clip buffers, and emits the terminal payload without invoking the
    /// scoring adapter.
    pub async fn cancel(&self) -> Result<SessionOutcome, SessionStateError> {
        let current = self.phase();
        if current.is_terminal() {
            return Err(SessionStateError::InvalidCommand {
                command: "cancel",
                phase: current,
            });
        }

        info!("Cancelling session {}", self.config.session_id);

        let _ = self.cancel_tx.send(true);
        self.set_phase(Phase::Cancelled);
        self.release_capture().await;

        let answers = {
            let mut answers = self.answers.lock().await;
            for answer in answers.iter_mut() {
                answer.release_clip();
            }
            answers.clone()
        };

        Ok(self.store_outcome(answers, None).await)
    }

    /// Current session status for display
    pub async fn status(&self) -> SessionStatus {
        let answers_collected = self.answers.lock().await.len();
        let phase = self.phase();

        let recording_elapsed_secs = if phase == Phase::Recording {
            let started = self.recording_started_ms.load(Ordering::SeqCst);
            Some(self.uptime_ms().saturating_sub(started) as f64 / 1000.0)
        } else {
            None
        };

        SessionStatus {
            session_id: self.config.session_id.clone(),
            company: self.questions.company.clone(),
            phase,
            question_index: self.question_index.load(Ordering::SeqCst),
            question_count: self.questions.len(),
            answers_collected,
            recording_elapsed_secs,
            status_text: phase.status_text(),
            created_at: self.created_at,
        }
    }

    /// The terminal payload, once the session has reached a terminal
    /// phase
    pub async fn outcome(&self) -> Option<SessionOutcome> {
        self.outcome.lock().await.clone()
    }

    // ------------------------------------------------------------------
    // Internal state machine
    // ------------------------------------------------------------------

    async fn drive_question(self: Arc<Self>, index: usize, question: String) {
        info!("Asking question {}: {}", index + 1, question);

        // Narration failure is non-fatal: continue without audio
        tokio::select! {
            _ = self.cancelled_signal() => return,
            result = self.narration.speak(&question) => {
                if let Err(e) = result {
                    warn!("Narration failed (continuing without audio): {}", e);
                }
            }
        }
        // Claim the skip channel and drop stale signals before entering
        // Thinking, so every skip accepted in that phase is honored
        let mut skip_rx = self.skip_rx.lock().await;
        while skip_rx.try_recv().is_ok() {}

        // A failed transition means cancellation won the race; stop
        // driving and leave the terminal phase alone
        if self
            .try_transition(Phase::AskingQuestion, Phase::Thinking, "think")
            .is_err()
        {
            return;
        }
        if !self.run_thinking_countdown(&mut skip_rx).await {
            return;
        }
        drop(skip_rx);

        // Start the device before announcing Recording so a stop command
        // can never race the device start
        self.begin_capture().await;
        if self
            .try_transition(Phase::Thinking, Phase::Recording, "record")
            .is_err()
        {
            self.capture_active.store(false, Ordering::SeqCst);
        }
    }

    /// Run the thinking countdown on a one-second tick.
    ///
    /// Returns false if the session was cancelled mid-countdown.
    async fn run_thinking_countdown(&self, skip_rx: &mut mpsc::Receiver<()>) -> bool {
        let mut remaining = self.config.thinking_secs;
        while remaining > 0 {
            let _ = self.events.send(SessionEvent::ThinkingTick {
                remaining_secs: remaining,
            });

            tokio::select! {
                _ = self.cancelled_signal() => return false,
                _ = skip_rx.recv() => {
                    info!("Thinking countdown skipped");
                    return true;
                }
                _ = tokio::time::sleep(Duration::from_secs(1)) => {
                    remaining -= 1;
                }
            }
        }

        true
    }

    async fn begin_capture(&self) {
        let mut capture = self.capture.lock().await;
        match capture.start().await {
            Ok(()) => {
                self.capture_active.store(true, Ordering::SeqCst);
            }
            Err(e) => {
                // Degrades to "no data captured", handled at stop time
                warn!("Capture start failed; recording without device: {}", e);
                self.capture_active.store(false, Ordering::SeqCst);
            }
        }
        self.recording_started_ms
            .store(self.uptime_ms(), Ordering::SeqCst);
    }

    /// Transcribe all stored clips sequentially, then run the single
    /// scoring call, then emit the terminal payload.
    async fn finalize(&self) -> Result<SessionOutcome, SessionStateError> {
        self.try_transition(Phase::Processing, Phase::Transcribing, "transcribe")
            .map_err(|_| SessionStateError::Cancelled)?;

        let total = self.answers.lock().await.len();
        for i in 0..total {
            if self.is_cancelled() {
                return Err(SessionStateError::Cancelled);
            }

            let clip = { self.answers.lock().await[i].clip.clone() };

            let (text, failed) = match clip {
                None => {
                    info!("Answer {} captured no audio; skipping transcription", i + 1);
                    (NO_SPEECH_MARKER.to_string(), false)
                }
                Some(clip) => {
                    info!("Transcribing answer {} of {}", i + 1, total);
                    tokio::select! {
                        _ = self.cancelled_signal() => return Err(SessionStateError::Cancelled),
                        result = self.transcription.transcribe(&clip) => match result {
                            Ok(text) if text.trim().is_empty() => {
                                (NO_SPEECH_MARKER.to_string(), false)
                            }
                            Ok(text) => (text, false),
                            Err(e) => {
                                // One clip failing never aborts the loop
                                warn!("Transcription failed for answer {}: {}", i + 1, e);
                                (TRANSCRIPTION_FAILED_MARKER.to_string(), true)
                            }
                        }
                    }
                }
            };

            let mut answers = self.answers.lock().await;
            answers[i].resolve_transcript(text, failed);

            // Transcript resolved: export the clip if configured, then
            // release its buffer
            if let Some(dir) = &self.config.recordings_dir {
                if let Some(clip) = answers[i].clip.as_ref() {
                    match capture::export_clip(dir, &self.config.session_id, i + 1, clip) {
                        Ok(path) => info!("Exported clip to {:?}", path),
                        Err(e) => warn!("Clip export failed: {:#}", e),
                    }
                }
            }
            answers[i].release_clip();
        }

        self.try_transition(Phase::Transcribing, Phase::Analyzing, "analyze")
            .map_err(|_| SessionStateError::Cancelled)?;

        let answers = self.answers.lock().await.clone();
        if answers.is_empty() {
            error!("Session {} produced no answers", self.config.session_id);
            self.release_capture().await;
            self.set_phase(Phase::Failed);
            return Ok(self.store_outcome(answers, None).await);
        }

        let lines = build_transcript_lines(&answers);
        let company = self.questions.company.clone();
        let question_count = self.questions.len();

        let score = tokio::select! {
            _ = self.cancelled_signal() => return Err(SessionStateError::Cancelled),
            result = tokio::time::timeout(
                self.config.scoring_timeout,
                self.scoring.analyze(&lines, &company, question_count),
            ) => match result {
                Ok(Ok(analysis)) => Score::Remote(analysis),
                Ok(Err(e)) => {
                    warn!("Scoring failed; using local fallback: {}", e);
                    Score::Fallback(fallback::score(&lines, &self.config.thresholds))
                }
                Err(_) => {
                    warn!(
                        "Scoring timed out after {:?}; using local fallback",
                        self.config.scoring_timeout
                    );
                    Score::Fallback(fallback::score(&lines, &self.config.thresholds))
                }
            }
        };

        self.release_capture().await;
        self.try_transition(Phase::Analyzing, Phase::Complete, "complete")
            .map_err(|_| SessionStateError::Cancelled)?;

        info!(
            "Session {} complete: {} answers, pass={}",
            self.config.session_id,
            answers.len(),
            score.analysis().decision.pass
        );

        Ok(self.store_outcome(answers, Some(score)).await)
    }

    async fn store_outcome(
        &self,
        mut answers: Vec<Answer>,
        analysis: Option<Score>,
    ) -> SessionOutcome {
        for answer in &mut answers {
            answer.release_clip();
        }

        let outcome = SessionOutcome {
            session: SessionSummary {
                session_id: self.config.session_id.clone(),
                company: self.questions.company.clone(),
                question_count: self.questions.len(),
                created_at: self.created_at,
                phase: self.phase(),
            },
            answers,
            analysis,
        };

        *self.outcome.lock().await = Some(outcome.clone());
        outcome
    }

    async fn release_capture(&self) {
        self.capture_active.store(false, Ordering::SeqCst);
        self.capture.lock().await.release().await;
    }

    fn set_phase(&self, phase: Phase) {
        self.phase.store(phase as u8, Ordering::SeqCst);
        self.emit_phase(phase);
    }

    fn try_transition(
        &self,
        from: Phase,
        to: Phase,
        command: &'static str,
    ) -> Result<(), SessionStateError> {
        match self.phase.compare_exchange(
            from as u8,
            to as u8,
            Ordering::SeqCst,
            Ordering::SeqCst,
        ) {
            Ok(_) => {
                self.emit_phase(to);
                Ok(())
            }
            Err(actual) => Err(SessionStateError::InvalidCommand {
                command,
                phase: Phase::from_u8(actual),
            }),
        }
    }

    fn emit_phase(&self, phase: Phase) {
        let _ = self.events.send(SessionEvent::Phase {
            phase,
            question_index: self.question_index.load(Ordering::SeqCst),
        });
    }

    fn is_cancelled(&self) -> bool {
        *self.cancel_rx.borrow()
    }

    async fn cancelled_signal(&self) {
        let mut rx = self.cancel_rx.clone();
        // Resolves immediately if cancellation already happened; pends
        // forever only if the sender is gone, which cannot outlive self
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }

    fn uptime_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }
}
