use crate::{EmailVerificationRecord, RequestId, VerificationFailure};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the address input box.
    InputChanged(String),
    /// User pressed the verify button.
    VerifyClicked,
    /// An attempt failed and the client is about to retry.
    AttemptFailed {
        request_id: RequestId,
        attempt: u32,
        max_attempts: u32,
        reason: String,
    },
    /// The service returned a well-formed record set.
    VerificationSucceeded {
        request_id: RequestId,
        records: Vec<EmailVerificationRecord>,
    },
    /// The submission ended without a record set.
    VerificationFailed {
        request_id: RequestId,
        failure: VerificationFailure,
    },
    /// Viewport width changed.
    ViewportResized { width: u32 },
    /// Virtualized list scrolled to a new offset.
    ListScrolled { offset: u32 },
    /// Table page selected (1-based).
    PageSelected(usize),
    /// Table page size selected.
    PageSizeSelected(usize),
    /// User closed the notification.
    NoticeDismissed,
}
