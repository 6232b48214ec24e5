//! Verifier core: pure state machine, input normalization, aggregation and
//! presentation helpers.
mod effect;
mod input;
mod msg;
pub mod presentation;
mod record;
mod state;
mod summary;
mod update;
mod view_model;

pub use effect::Effect;
pub use input::{normalize_input, EmptyInputError};
pub use msg::Msg;
pub use record::{EmailVerificationRecord, Facet, FacetGroup, VerificationStatus};
pub use state::{
    AppState, FailureKind, Notice, NoticeSeverity, Phase, RequestId, VerificationFailure,
    EMPTY_INPUT_MESSAGE, VERIFY_FAILED_MESSAGE,
};
pub use summary::{aggregate, HealthSummary, VerificationReport};
pub use update::update;
pub use view_model::{AppViewModel, PhaseView};
