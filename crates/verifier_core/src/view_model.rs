use crate::presentation::{ResultsLayout, ScreenClass};
use crate::{FailureKind, HealthSummary, Notice};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhaseView {
    Idle,
    Pending {
        failed_attempts: u32,
        max_attempts: Option<u32>,
        last_error: Option<String>,
    },
    Succeeded,
    Failed {
        kind: FailureKind,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub phase: PhaseView,
    pub submit_enabled: bool,
    pub submit_label: &'static str,
    pub notice: Option<Notice>,
    /// Present once a record set has arrived, even an empty one.
    pub summary: Option<HealthSummary>,
    pub error_count: usize,
    pub failed_submissions: u32,
    pub screen: ScreenClass,
    /// `None` until a non-empty record set is available.
    pub results: Option<ResultsLayout>,
    pub dirty: bool,
}
