use std::sync::Once;

use pretty_assertions::assert_eq;
use verifier_core::{
    update, AppState, EmailVerificationRecord, Effect, FailureKind, Msg, Notice, NoticeSeverity,
    Phase, PhaseView, VerificationFailure, VerificationStatus, EMPTY_INPUT_MESSAGE,
    VERIFY_FAILED_MESSAGE,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(verifier_logging::initialize_for_tests);
}

fn submit(state: AppState, input: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::InputChanged(input.to_string()));
    update(state, Msg::VerifyClicked)
}

fn submitted_request(effects: &[Effect]) -> u64 {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::SubmitBatch { request_id, .. } => Some(*request_id),
            _ => None,
        })
        .expect("submit effect")
}

fn sample_records() -> Vec<EmailVerificationRecord> {
    vec![
        EmailVerificationRecord::new("good@example.com", VerificationStatus::Valid),
        EmailVerificationRecord::new("bad@@nope", VerificationStatus::Invalid)
            .with_reason("Invalid syntax"),
    ]
}

#[test]
fn submit_moves_idle_to_pending_with_whole_batch() {
    init_logging();
    let (mut state, effects) = submit(AppState::new(), "good@example.com\n\n  bad@@nope \n");

    assert_eq!(
        effects,
        vec![Effect::SubmitBatch {
            request_id: 1,
            emails: vec!["good@example.com".to_string(), "bad@@nope".to_string()],
        }]
    );
    assert!(state.is_pending());
    let view = state.view();
    assert!(!view.submit_enabled);
    assert_eq!(view.submit_label, "Verifying...");
    assert_eq!(
        view.phase,
        PhaseView::Pending {
            failed_attempts: 0,
            max_attempts: None,
            last_error: None,
        }
    );
    assert!(state.consume_dirty());
}

#[test]
fn whitespace_only_input_warns_without_submitting() {
    init_logging();
    let (state, effects) = submit(AppState::new(), "  \n\t\n");

    assert_eq!(effects, vec![Effect::ShowNotice(Notice::empty_input())]);
    assert_eq!(state.phase(), &Phase::Idle);
    let view = state.view();
    assert!(view.submit_enabled);
    let notice = view.notice.expect("notice");
    assert_eq!(notice.severity, NoticeSeverity::Warning);
    assert_eq!(notice.message, EMPTY_INPUT_MESSAGE);
}

#[test]
fn second_submit_while_pending_is_rejected() {
    init_logging();
    let (state, _) = submit(AppState::new(), "a@x.com\n");
    let (state, effects) = submit(state, "b@x.com\n");

    assert!(effects.is_empty());
    assert_eq!(state.pending_request(), Some(1));
}

#[test]
fn success_swaps_in_report_end_to_end() {
    init_logging();
    let (state, effects) = submit(AppState::new(), "good@example.com\nbad@@nope");
    let request_id = submitted_request(&effects);

    let (state, effects) = update(
        state,
        Msg::VerificationSucceeded {
            request_id,
            records: sample_records(),
        },
    );

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.phase, PhaseView::Succeeded);
    assert!(view.submit_enabled);
    let summary = view.summary.expect("summary");
    assert_eq!(
        (summary.total(), summary.valid(), summary.invalid()),
        (2, 1, 1)
    );
    assert_eq!(view.error_count, 1);
    assert_eq!(view.failed_submissions, 0);
    assert!(view.results.is_some());
}

#[test]
fn empty_success_is_a_terminal_state_without_results() {
    init_logging();
    let (state, effects) = submit(AppState::new(), "a@x.com");
    let request_id = submitted_request(&effects);

    let (state, _) = update(
        state,
        Msg::VerificationSucceeded {
            request_id,
            records: Vec::new(),
        },
    );

    let view = state.view();
    assert_eq!(view.phase, PhaseView::Succeeded);
    let summary = view.summary.expect("summary");
    assert_eq!(summary.total(), 0);
    assert!(view.results.is_none());
    assert!(view.notice.is_none());
}

#[test]
fn failure_surfaces_one_notice_and_returns_to_retryable_state() {
    init_logging();
    for kind in [FailureKind::Unavailable, FailureKind::InvalidResponse] {
        let (state, effects) = submit(AppState::new(), "a@x.com");
        let request_id = submitted_request(&effects);

        let (state, effects) = update(
            state,
            Msg::VerificationFailed {
                request_id,
                failure: VerificationFailure::new(kind, "boom"),
            },
        );

        assert_eq!(effects, vec![Effect::ShowNotice(Notice::verification_failed())]);
        let view = state.view();
        assert_eq!(view.phase, PhaseView::Failed { kind });
        assert!(view.submit_enabled);
        assert_eq!(view.failed_submissions, 1);
        assert_eq!(view.error_count, 0);
        let notice = view.notice.expect("notice");
        assert_eq!(notice.severity, NoticeSeverity::Error);
        assert_eq!(notice.message, VERIFY_FAILED_MESSAGE);

        // Failed -> Pending on resubmit.
        let (state, effects) = update(state, Msg::VerifyClicked);
        assert_eq!(submitted_request(&effects), request_id + 1);
        assert!(state.view().notice.is_none());
    }
}

#[test]
fn resubmit_after_success_discards_previous_records() {
    init_logging();
    let (state, effects) = submit(AppState::new(), "good@example.com\nbad@@nope");
    let (state, _) = update(
        state,
        Msg::VerificationSucceeded {
            request_id: submitted_request(&effects),
            records: sample_records(),
        },
    );

    let (state, effects) = submit(state, "other@example.com");
    assert_eq!(submitted_request(&effects), 2);
    assert!(state.report().is_none());
    assert!(state.view().results.is_none());

    let (state, _) = update(
        state,
        Msg::VerificationSucceeded {
            request_id: 2,
            records: vec![EmailVerificationRecord::new(
                "other@example.com",
                VerificationStatus::Valid,
            )],
        },
    );
    let report = state.report().expect("report");
    assert_eq!(report.len(), 1);
    assert_eq!(report.records()[0].email, "other@example.com");
}

#[test]
fn stale_completions_are_ignored() {
    init_logging();
    let (state, effects) = submit(AppState::new(), "a@x.com");
    let request_id = submitted_request(&effects);

    let (state, effects) = update(
        state,
        Msg::VerificationSucceeded {
            request_id: request_id + 7,
            records: sample_records(),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.pending_request(), Some(request_id));

    let (state, effects) = update(
        state,
        Msg::VerificationFailed {
            request_id: request_id + 7,
            failure: VerificationFailure::new(FailureKind::Unavailable, "late"),
        },
    );
    assert!(effects.is_empty());
    assert!(state.is_pending());
}

#[test]
fn attempt_failures_update_pending_progress() {
    init_logging();
    let (state, effects) = submit(AppState::new(), "a@x.com");
    let request_id = submitted_request(&effects);

    let (state, _) = update(
        state,
        Msg::AttemptFailed {
            request_id,
            attempt: 2,
            max_attempts: 4,
            reason: "http status 503".to_string(),
        },
    );

    assert_eq!(
        state.view().phase,
        PhaseView::Pending {
            failed_attempts: 2,
            max_attempts: Some(4),
            last_error: Some("http status 503".to_string()),
        }
    );
}

#[test]
fn notice_can_be_dismissed() {
    init_logging();
    let (state, _) = submit(AppState::new(), "");
    assert!(state.view().notice.is_some());

    let (mut state, effects) = update(state, Msg::NoticeDismissed);
    assert!(effects.is_empty());
    assert!(state.view().notice.is_none());
    assert!(state.consume_dirty());
}
