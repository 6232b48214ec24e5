use crate::presentation::PresentationState;
use crate::view_model::{AppViewModel, PhaseView};
use crate::VerificationReport;

pub type RequestId = u64;

/// Why a submission produced no record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Every attempt failed at the transport or HTTP level.
    Unavailable,
    /// The service answered with something other than a record array.
    InvalidResponse,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationFailure {
    pub kind: FailureKind,
    /// Diagnostic text for logs; never shown verbatim to the user.
    pub detail: String,
}

impl VerificationFailure {
    pub fn new(kind: FailureKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeSeverity {
    Warning,
    Error,
}

/// The single user-facing notification for a blocked or failed submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: NoticeSeverity,
    pub message: String,
}

pub const EMPTY_INPUT_MESSAGE: &str = "Please enter at least one email address.";
pub const VERIFY_FAILED_MESSAGE: &str =
    "Failed to verify emails. Please check your network connection and try again.";

impl Notice {
    pub fn empty_input() -> Self {
        Self {
            severity: NoticeSeverity::Warning,
            message: EMPTY_INPUT_MESSAGE.to_string(),
        }
    }

    /// Both failure kinds share one message.
    pub fn verification_failed() -> Self {
        Self {
            severity: NoticeSeverity::Error,
            message: VERIFY_FAILED_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Pending {
        request_id: RequestId,
        /// Attempts that have failed so far for this request.
        failed_attempts: u32,
        max_attempts: Option<u32>,
        /// Why the most recent attempt failed.
        last_error: Option<String>,
    },
    Succeeded(VerificationReport),
    Failed(VerificationFailure),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    input: String,
    phase: Phase,
    last_request_id: RequestId,
    presentation: PresentationState,
    notice: Option<Notice>,
    failed_submissions: u32,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_presentation(presentation: PresentationState) -> Self {
        Self {
            presentation,
            ..Self::default()
        }
    }

    pub fn view(&self) -> AppViewModel {
        let pending = self.is_pending();
        let phase = match &self.phase {
            Phase::Idle => PhaseView::Idle,
            Phase::Pending {
                failed_attempts,
                max_attempts,
                last_error,
                ..
            } => PhaseView::Pending {
                failed_attempts: *failed_attempts,
                max_attempts: *max_attempts,
                last_error: last_error.clone(),
            },
            Phase::Succeeded(_) => PhaseView::Succeeded,
            Phase::Failed(failure) => PhaseView::Failed { kind: failure.kind },
        };
        let report = self.report();
        let results = report
            .filter(|report| !report.is_empty())
            .map(|report| self.presentation.layout(report.records()));

        AppViewModel {
            phase,
            submit_enabled: !pending,
            submit_label: if pending { "Verifying..." } else { "Verify Emails" },
            notice: self.notice.clone(),
            summary: report.map(VerificationReport::summary),
            error_count: report.map_or(0, VerificationReport::error_count),
            failed_submissions: self.failed_submissions,
            screen: self.presentation.screen_class(),
            results,
            dirty: self.dirty,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn presentation(&self) -> &PresentationState {
        &self.presentation
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.phase, Phase::Pending { .. })
    }

    pub fn pending_request(&self) -> Option<RequestId> {
        match self.phase {
            Phase::Pending { request_id, .. } => Some(request_id),
            _ => None,
        }
    }

    pub fn report(&self) -> Option<&VerificationReport> {
        match &self.phase {
            Phase::Succeeded(report) => Some(report),
            _ => None,
        }
    }

    /// Returns whether anything visible changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_input(&mut self, input: String) {
        if self.input != input {
            self.input = input;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_notice(&mut self, notice: Option<Notice>) {
        if self.notice != notice {
            self.notice = notice;
            self.mark_dirty();
        }
    }

    /// Moves to `Pending` under a fresh request id. The previous record set,
    /// if any, is dropped here.
    pub(crate) fn begin_request(&mut self) -> RequestId {
        self.last_request_id += 1;
        self.phase = Phase::Pending {
            request_id: self.last_request_id,
            failed_attempts: 0,
            max_attempts: None,
            last_error: None,
        };
        self.notice = None;
        self.mark_dirty();
        self.last_request_id
    }

    pub(crate) fn record_attempt_failure(
        &mut self,
        attempt: u32,
        max_attempts: u32,
        reason: String,
    ) {
        if let Phase::Pending {
            failed_attempts,
            max_attempts: max,
            last_error,
            ..
        } = &mut self.phase
        {
            *failed_attempts = attempt;
            *max = Some(max_attempts);
            *last_error = Some(reason);
            self.mark_dirty();
        }
    }

    pub(crate) fn complete(&mut self, report: VerificationReport) {
        let total = report.len();
        self.phase = Phase::Succeeded(report);
        self.presentation.page = 1;
        self.presentation.scroll_offset = 0;
        self.presentation.clamp_to(total);
        self.mark_dirty();
    }

    pub(crate) fn fail(&mut self, failure: VerificationFailure) {
        self.phase = Phase::Failed(failure);
        self.failed_submissions += 1;
        self.mark_dirty();
    }

    fn result_len(&self) -> usize {
        self.report().map_or(0, VerificationReport::len)
    }

    pub(crate) fn resize_viewport(&mut self, width: u32) {
        if self.presentation.viewport_width != width {
            self.presentation.viewport_width = width;
            self.mark_dirty();
        }
    }

    pub(crate) fn scroll_list(&mut self, offset: u32) {
        let before = self.presentation.scroll_offset;
        self.presentation.scroll_to(offset, self.result_len());
        if self.presentation.scroll_offset != before {
            self.mark_dirty();
        }
    }

    pub(crate) fn select_page(&mut self, page: usize) {
        let before = self.presentation.page;
        self.presentation.set_page(page, self.result_len());
        if self.presentation.page != before {
            self.mark_dirty();
        }
    }

    pub(crate) fn select_page_size(&mut self, page_size: usize) {
        let total = self.result_len();
        let before = self.presentation;
        if self.presentation.set_page_size(page_size, total) && self.presentation != before {
            self.mark_dirty();
        }
    }
}
