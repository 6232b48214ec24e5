use crate::{Notice, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send the whole batch to the verification service.
    SubmitBatch {
        request_id: RequestId,
        emails: Vec<String>,
    },
    /// Surface a non-blocking notification.
    ShowNotice(Notice),
}
