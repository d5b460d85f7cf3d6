//! State-machine tests for the voice capture pipeline.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use super::support::ScriptedBackend;
use crate::view::domain::{TaskDomainError, TaskPriority, TaskStatus};
use crate::view::ports::{BackendError, ParsedVoice};
use crate::view::services::ViewController;
use crate::voice::adapters::scripted::ScriptedSpeechSource;
use crate::voice::domain::VoiceError;
use crate::voice::services::{CaptureState, VoicePipeline};
use rstest::{fixture, rstest};
use std::sync::Arc;

const SPOKEN: &str = "remind me to prepare the quarterly budget review by Friday";

#[fixture]
fn backend() -> Arc<ScriptedBackend> {
    Arc::new(ScriptedBackend::new())
}

fn captured_pipeline(backend: &Arc<ScriptedBackend>) -> VoicePipeline<ScriptedBackend> {
    let mut pipeline = VoicePipeline::new(Arc::clone(backend));
    pipeline
        .edit_transcript(SPOKEN)
        .expect("typed input accepted while idle");
    pipeline
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn spoken_segments_accumulate_into_the_transcript(backend: Arc<ScriptedBackend>) {
    let mut source =
        ScriptedSpeechSource::new(["remind me to prepare ", "the quarterly budget review"]);
    let mut pipeline = VoicePipeline::new(Arc::clone(&backend));

    pipeline
        .capture_from(&mut source)
        .await
        .expect("capture should run");
    assert_eq!(pipeline.state(), CaptureState::Recording);
    assert_eq!(
        pipeline.transcript(),
        "remind me to prepare the quarterly budget review"
    );

    pipeline.stop_recording().expect("stop accepted");
    assert_eq!(pipeline.state(), CaptureState::Captured);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn restarting_capture_appends_instead_of_replacing(backend: Arc<ScriptedBackend>) {
    let mut pipeline = VoicePipeline::new(Arc::clone(&backend));
    pipeline.start_recording().expect("start accepted");
    pipeline
        .append_segment("first part of the idea ")
        .expect("append accepted");
    pipeline.stop_recording().expect("stop accepted");

    pipeline.start_recording().expect("restart accepted");
    pipeline
        .append_segment("and the second part")
        .expect("append accepted");
    pipeline.stop_recording().expect("stop accepted");

    assert_eq!(
        pipeline.transcript(),
        "first part of the idea and the second part"
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unavailable_speech_leaves_the_typed_path_open(backend: Arc<ScriptedBackend>) {
    let mut source = ScriptedSpeechSource::unavailable();
    let mut pipeline = VoicePipeline::new(Arc::clone(&backend));

    let err = pipeline
        .capture_from(&mut source)
        .await
        .expect_err("capture should be refused");
    assert!(matches!(err, VoiceError::CaptureUnavailable));
    assert_eq!(pipeline.state(), CaptureState::Idle);

    pipeline
        .edit_transcript(SPOKEN)
        .expect("typed input accepted");
    pipeline.parse().await.expect("parse from typed input");
    assert_eq!(pipeline.state(), CaptureState::Draft);
}

#[rstest]
#[case::append_while_idle(|p: &mut VoicePipeline<ScriptedBackend>| p.append_segment("x"))]
#[case::stop_while_idle(|p: &mut VoicePipeline<ScriptedBackend>| p.stop_recording())]
fn actions_outside_their_state_are_rejected(
    backend: Arc<ScriptedBackend>,
    #[case] action: fn(&mut VoicePipeline<ScriptedBackend>) -> Result<(), VoiceError>,
) {
    let mut pipeline = VoicePipeline::new(backend);
    let err = action(&mut pipeline).expect_err("invalid transition");
    assert!(matches!(err, VoiceError::InvalidTransition { .. }));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn short_transcript_never_reaches_the_collaborator(backend: Arc<ScriptedBackend>) {
    // A staged parse failure proves the call is never made.
    backend.fail_next_parse(BackendError::rejected(500, "must not be called".to_owned()));
    let mut pipeline = VoicePipeline::new(Arc::clone(&backend));
    pipeline.edit_transcript("too short").expect("typed input");

    let err = pipeline.parse().await.expect_err("local validation fails");
    assert!(matches!(
        err,
        VoiceError::TranscriptTooShort { minimum: 10, actual: 9 }
    ));
    assert_eq!(pipeline.state(), CaptureState::Idle);
    assert!(pipeline.last_error().is_some());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn collaborator_rejection_returns_to_captured_with_the_transcript(
    backend: Arc<ScriptedBackend>,
) {
    backend.fail_next_parse(BackendError::rejected(
        502,
        "upstream parser unavailable".to_owned(),
    ));
    let mut pipeline = captured_pipeline(&backend);

    let err = pipeline.parse().await.expect_err("rejection surfaces");
    let VoiceError::Parse(message) = err else {
        panic!("rejections map to the parse error, not a transport error");
    };
    assert_eq!(message, "upstream parser unavailable");
    assert_eq!(pipeline.state(), CaptureState::Captured);
    assert_eq!(pipeline.transcript(), SPOKEN);

    // The transcript survives, so a retry needs no re-recording.
    pipeline.parse().await.expect("retry succeeds");
    assert_eq!(pipeline.state(), CaptureState::Draft);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn transport_failure_during_parse_is_not_a_rejection(backend: Arc<ScriptedBackend>) {
    backend.fail_next_parse(BackendError::transport(std::io::Error::other(
        "connection reset",
    )));
    let mut pipeline = captured_pipeline(&backend);

    let err = pipeline.parse().await.expect_err("failure surfaces");
    assert!(matches!(err, VoiceError::Backend(_)));
    assert_eq!(pipeline.state(), CaptureState::Captured);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn transcript_edits_are_rejected_once_a_draft_exists(backend: Arc<ScriptedBackend>) {
    let mut pipeline = captured_pipeline(&backend);
    pipeline.parse().await.expect("parse succeeds");

    let err = pipeline
        .edit_transcript("rewritten after the fact")
        .expect_err("transcript is frozen");
    assert!(matches!(err, VoiceError::InvalidTransition { .. }));
    assert_eq!(pipeline.transcript(), SPOKEN);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn submitted_draft_creates_the_task_and_finishes_the_session(
    backend: Arc<ScriptedBackend>,
) {
    backend
        .inner()
        .set_parse_reply(ParsedVoice {
            title: Some("Prepare the budget review".to_owned()),
            priority: Some("High".to_owned()),
            ..ParsedVoice::default()
        })
        .expect("scripted reply");
    let controller = ViewController::with_defaults(Arc::clone(&backend));
    controller.load_initial().await.expect("initial load");

    let mut pipeline = captured_pipeline(&backend);
    pipeline.parse().await.expect("parse succeeds");

    let submission = pipeline
        .submit(&controller)
        .await
        .expect("submission succeeds");
    assert_eq!(pipeline.state(), CaptureState::Done);
    assert_eq!(submission.task.title(), "Prepare the budget review");
    assert_eq!(submission.task.priority(), TaskPriority::High);
    assert_eq!(submission.task.transcript(), Some(SPOKEN));
    submission.refresh.expect("refresh succeeds");

    // The view already shows the created task.
    let snapshot = controller.snapshot().expect("snapshot");
    assert!(snapshot.collection.find(submission.task.id()).is_some());

    pipeline.close();
    assert_eq!(pipeline.state(), CaptureState::Idle);
    assert_eq!(pipeline.transcript(), "");
    assert!(pipeline.draft().is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_submission_returns_to_draft_with_edits_intact(backend: Arc<ScriptedBackend>) {
    let controller = ViewController::with_defaults(Arc::clone(&backend));
    controller.load_initial().await.expect("initial load");
    let mut pipeline = captured_pipeline(&backend);
    pipeline.parse().await.expect("parse succeeds");
    {
        let draft = pipeline.draft_mut().expect("draft editable");
        draft.set_priority(TaskPriority::Critical);
        draft.set_status(TaskStatus::InProgress);
    }

    backend.fail_next_create(BackendError::rejected(503, "backend busy".to_owned()));
    let err = pipeline
        .submit(&controller)
        .await
        .expect_err("submission fails");
    assert!(matches!(err, VoiceError::Backend(_)));
    assert_eq!(pipeline.state(), CaptureState::Draft);
    let draft = pipeline.draft().expect("draft preserved");
    assert_eq!(draft.priority(), TaskPriority::Critical);
    assert_eq!(draft.status(), TaskStatus::InProgress);
    assert_eq!(backend.inner().stored_count().expect("count"), 0);

    // Resubmitting creates the task exactly once.
    pipeline.submit(&controller).await.expect("resubmission");
    assert_eq!(backend.inner().stored_count().expect("count"), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_draft_fields_fail_before_any_network_call(backend: Arc<ScriptedBackend>) {
    let controller = ViewController::with_defaults(Arc::clone(&backend));
    let mut pipeline = captured_pipeline(&backend);
    pipeline.parse().await.expect("parse succeeds");
    pipeline
        .draft_mut()
        .expect("draft editable")
        .set_title("Short");

    let err = pipeline
        .submit(&controller)
        .await
        .expect_err("validation fails");
    assert!(matches!(
        err,
        VoiceError::Validation(TaskDomainError::TitleTooShort { .. })
    ));
    assert_eq!(pipeline.state(), CaptureState::Draft);
    assert_eq!(backend.inner().stored_count().expect("count"), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn submit_requires_a_draft(backend: Arc<ScriptedBackend>) {
    let controller = ViewController::with_defaults(Arc::clone(&backend));
    let mut pipeline = captured_pipeline(&backend);

    let err = pipeline
        .submit(&controller)
        .await
        .expect_err("no draft yet");
    assert!(matches!(err, VoiceError::InvalidTransition { .. }));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn draft_access_is_gated_on_the_draft_state(backend: Arc<ScriptedBackend>) {
    let mut pipeline = captured_pipeline(&backend);
    assert!(pipeline.draft_mut().is_none());
    pipeline.parse().await.expect("parse succeeds");
    assert!(pipeline.draft_mut().is_some());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn close_discards_the_session_midway(backend: Arc<ScriptedBackend>) {
    let mut pipeline = captured_pipeline(&backend);
    pipeline.parse().await.expect("parse succeeds");

    pipeline.close();
    assert_eq!(pipeline.state(), CaptureState::Idle);
    assert_eq!(pipeline.transcript(), "");
    assert!(pipeline.draft().is_none());
    assert!(pipeline.last_error().is_none());
    assert_eq!(backend.inner().stored_count().expect("count"), 0);
}
