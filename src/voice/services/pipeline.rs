//! Finite-state machine from spoken input to a submitted task.

use crate::view::domain::Task;
use crate::view::ports::{BackendError, TaskBackend};
use crate::view::services::{ControllerError, ControllerResult, FetchOutcome, ViewController};
use crate::voice::domain::{TaskDraft, VoiceError};
use crate::voice::ports::SpeechSource;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Lifecycle state of one capture session.
///
/// Failures during `Parsing` and `Submitting` revert to the prior stable
/// state (`Captured` and `Draft` respectively) with user input preserved;
/// the failure itself travels as the operation's `Err` and is retained in
/// [`VoicePipeline::last_error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    /// Nothing captured yet; typed input is accepted.
    Idle,
    /// Speech segments are being appended.
    Recording,
    /// Capture stopped; the transcript is complete and still editable.
    Captured,
    /// The transcript is with the parsing collaborator.
    Parsing,
    /// A draft exists and every field is editable.
    Draft,
    /// The create request is in flight; edits are rejected.
    Submitting,
    /// The task was created; the session is finished.
    Done,
}

impl CaptureState {
    /// Returns a lowercase human-readable name for messages and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Recording => "recording",
            Self::Captured => "captured",
            Self::Parsing => "parsing",
            Self::Draft => "drafting",
            Self::Submitting => "submitting",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for CaptureState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Successful completion of a capture session.
#[derive(Debug)]
pub struct VoiceSubmission {
    /// The created task as returned by the backend.
    pub task: Task,
    /// Outcome of the view refresh issued after creation; `Err` means the
    /// task exists but the view recorded a retryable fetch failure.
    pub refresh: ControllerResult<FetchOutcome>,
}

/// Drives one voice capture session from idle to a created task.
///
/// Capture is additive: every finalized utterance segment appends to the
/// accumulating transcript, never replacing prior text, including across a
/// stop and restart. Spoken and typed input converge on the same transcript
/// string. The session is transient; [`VoicePipeline::close`] discards it.
pub struct VoicePipeline<B> {
    backend: Arc<B>,
    session: Uuid,
    state: CaptureState,
    transcript: String,
    draft: Option<TaskDraft>,
    last_error: Option<VoiceError>,
}

impl<B: TaskBackend> VoicePipeline<B> {
    /// Minimum trimmed transcript length before parsing may be requested.
    pub const MIN_TRANSCRIPT_CHARS: usize = 10;

    /// Opens a new capture session.
    #[must_use]
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            session: Uuid::new_v4(),
            state: CaptureState::Idle,
            transcript: String::new(),
            draft: None,
            last_error: None,
        }
    }

    /// Returns the current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> CaptureState {
        self.state
    }

    /// Returns the accumulated transcript.
    #[must_use]
    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    /// Returns the draft once parsing has produced one.
    #[must_use]
    pub const fn draft(&self) -> Option<&TaskDraft> {
        self.draft.as_ref()
    }

    /// Returns the draft for editing. Only available in the `Draft` state;
    /// edits made there survive a failed submission.
    pub fn draft_mut(&mut self) -> Option<&mut TaskDraft> {
        if self.state == CaptureState::Draft {
            self.draft.as_mut()
        } else {
            None
        }
    }

    /// Returns the most recent failure, if the session has one recorded.
    #[must_use]
    pub const fn last_error(&self) -> Option<&VoiceError> {
        self.last_error.as_ref()
    }

    /// Starts (or restarts) speech capture. Permitted from `Idle` and
    /// `Captured`; restarting appends to the existing transcript.
    ///
    /// # Errors
    ///
    /// Returns [`VoiceError::InvalidTransition`] from any other state.
    pub fn start_recording(&mut self) -> Result<(), VoiceError> {
        match self.state {
            CaptureState::Idle | CaptureState::Captured => {
                tracing::info!(session = %self.session, "recording started");
                self.state = CaptureState::Recording;
                Ok(())
            }
            state => Err(VoiceError::InvalidTransition {
                action: "start recording",
                state,
            }),
        }
    }

    /// Appends one finalized utterance segment to the transcript.
    ///
    /// # Errors
    ///
    /// Returns [`VoiceError::InvalidTransition`] unless recording: no
    /// further appends are accepted once capture has stopped.
    pub fn append_segment(&mut self, segment: &str) -> Result<(), VoiceError> {
        if self.state != CaptureState::Recording {
            return Err(VoiceError::InvalidTransition {
                action: "append a segment",
                state: self.state,
            });
        }
        self.transcript.push_str(segment);
        Ok(())
    }

    /// Starts capture and drains a speech source until it stops delivering.
    /// The session stays in `Recording` afterwards; stopping is the user's
    /// explicit action.
    ///
    /// # Errors
    ///
    /// Returns [`VoiceError::CaptureUnavailable`] when the platform has no
    /// speech support (the typed path via [`Self::edit_transcript`] remains
    /// open), or [`VoiceError::InvalidTransition`] when capture cannot
    /// start from the current state.
    pub async fn capture_from<S>(&mut self, source: &mut S) -> Result<(), VoiceError>
    where
        S: SpeechSource + ?Sized,
    {
        if !source.is_available() {
            return Err(VoiceError::CaptureUnavailable);
        }
        self.start_recording()?;
        while self.state == CaptureState::Recording {
            let Some(segment) = source.next_segment().await else {
                break;
            };
            self.append_segment(&segment)?;
        }
        Ok(())
    }

    /// Stops capture. The transcript is complete but remains editable.
    ///
    /// # Errors
    ///
    /// Returns [`VoiceError::InvalidTransition`] unless recording.
    pub fn stop_recording(&mut self) -> Result<(), VoiceError> {
        if self.state != CaptureState::Recording {
            return Err(VoiceError::InvalidTransition {
                action: "stop recording",
                state: self.state,
            });
        }
        tracing::info!(session = %self.session, chars = self.transcript.chars().count(), "recording stopped");
        self.state = CaptureState::Captured;
        Ok(())
    }

    /// Replaces the transcript with typed text. Spoken and typed input
    /// converge here; accepted while idle, recording, or captured.
    ///
    /// # Errors
    ///
    /// Returns [`VoiceError::InvalidTransition`] once parsing has started:
    /// later edits belong on the draft, whose transcript is read-only.
    pub fn edit_transcript(&mut self, text: impl Into<String>) -> Result<(), VoiceError> {
        match self.state {
            CaptureState::Idle | CaptureState::Recording | CaptureState::Captured => {
                self.transcript = text.into();
                Ok(())
            }
            state => Err(VoiceError::InvalidTransition {
                action: "edit the transcript",
                state,
            }),
        }
    }

    /// Sends the transcript to the parsing collaborator and builds the
    /// draft. Permitted from `Idle` (typed path) and `Captured`.
    ///
    /// On failure the session returns to `Captured` with the transcript
    /// preserved, so the user may retry without re-recording.
    ///
    /// # Errors
    ///
    /// Returns [`VoiceError::TranscriptTooShort`] (local, pre-network) when
    /// the trimmed transcript is under ten characters;
    /// [`VoiceError::Parse`] when the collaborator rejects the transcript;
    /// [`VoiceError::Backend`] on transport failure.
    pub async fn parse(&mut self) -> Result<&TaskDraft, VoiceError> {
        match self.state {
            CaptureState::Idle | CaptureState::Captured => {}
            state => {
                return Err(VoiceError::InvalidTransition {
                    action: "parse the transcript",
                    state,
                });
            }
        }
        let trimmed_len = self.transcript.trim().chars().count();
        if trimmed_len < Self::MIN_TRANSCRIPT_CHARS {
            let err = VoiceError::TranscriptTooShort {
                minimum: Self::MIN_TRANSCRIPT_CHARS,
                actual: trimmed_len,
            };
            self.last_error = Some(err.clone());
            return Err(err);
        }

        self.state = CaptureState::Parsing;
        tracing::info!(session = %self.session, "parsing transcript");
        match self.backend.parse_voice(&self.transcript).await {
            Ok(parsed) => {
                self.state = CaptureState::Draft;
                self.last_error = None;
                let draft = self.draft.insert(TaskDraft::from_parsed(&self.transcript, parsed));
                Ok(draft)
            }
            Err(err) => {
                self.state = CaptureState::Captured;
                let voice_err = match err {
                    BackendError::Rejected { message, .. } => VoiceError::Parse(message),
                    other => VoiceError::Backend(other),
                };
                tracing::warn!(session = %self.session, error = %voice_err, "parse failed");
                self.last_error = Some(voice_err.clone());
                Err(voice_err)
            }
        }
    }

    /// Submits the draft through the view controller's mutation path, which
    /// refreshes the view after the create settles. On success the session
    /// is `Done` and should be closed by the caller; on failure it returns
    /// to `Draft` with every edit intact.
    ///
    /// # Errors
    ///
    /// Returns [`VoiceError::Validation`] (local) when a draft field fails
    /// validation, [`VoiceError::Backend`] when the create call fails, or
    /// [`VoiceError::InvalidTransition`] when no draft is ready.
    pub async fn submit(
        &mut self,
        controller: &ViewController<B>,
    ) -> Result<VoiceSubmission, VoiceError> {
        if self.state != CaptureState::Draft {
            return Err(VoiceError::InvalidTransition {
                action: "submit",
                state: self.state,
            });
        }
        let Some(draft) = self.draft.as_ref() else {
            return Err(VoiceError::InvalidTransition {
                action: "submit",
                state: self.state,
            });
        };
        let payload = match draft.to_create_payload() {
            Ok(payload) => payload,
            Err(err) => {
                let voice_err = VoiceError::Validation(err);
                self.last_error = Some(voice_err.clone());
                return Err(voice_err);
            }
        };

        self.state = CaptureState::Submitting;
        tracing::info!(session = %self.session, "submitting draft");
        match controller.create_task(&payload).await {
            Ok(outcome) => {
                self.state = CaptureState::Done;
                self.last_error = None;
                let Some(task) = outcome.task else {
                    // The backend contract returns the created record.
                    self.state = CaptureState::Draft;
                    let voice_err =
                        VoiceError::Controller("create returned no task".to_owned());
                    self.last_error = Some(voice_err.clone());
                    return Err(voice_err);
                };
                tracing::info!(session = %self.session, id = %task.id(), "task created from voice");
                Ok(VoiceSubmission {
                    task,
                    refresh: outcome.refresh,
                })
            }
            Err(ControllerError::Backend(err)) => {
                self.state = CaptureState::Draft;
                let voice_err = VoiceError::Backend(err);
                tracing::warn!(session = %self.session, error = %voice_err, "submission failed");
                self.last_error = Some(voice_err.clone());
                Err(voice_err)
            }
            Err(ControllerError::Poisoned) => {
                self.state = CaptureState::Draft;
                let voice_err = VoiceError::Controller("view state lock poisoned".to_owned());
                self.last_error = Some(voice_err.clone());
                Err(voice_err)
            }
        }
    }

    /// Discards the session: transcript, draft, and recorded error. The
    /// pipeline returns to `Idle` and may be reused for a fresh session.
    pub fn close(&mut self) {
        tracing::info!(session = %self.session, state = %self.state, "session closed");
        self.session = Uuid::new_v4();
        self.state = CaptureState::Idle;
        self.transcript.clear();
        self.draft = None;
        self.last_error = None;
    }
}
