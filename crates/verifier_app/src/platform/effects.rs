use anyhow::Result;
use verifier_core::{Effect, FailureKind, Msg, Notice, VerificationFailure};
use verifier_engine::{ClientSettings, EngineEvent, EngineHandle, VerifyError};
use verifier_logging::{verifier_info, verifier_warn};

use super::ui;

/// Carries out core effects against the engine and turns engine events back
/// into core messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: ClientSettings) -> Result<Self> {
        verifier_info!(
            "Verification endpoint {} (max attempts {})",
            settings.endpoint,
            settings.retry.max_attempts()
        );
        let engine = EngineHandle::new(settings)?;
        Ok(Self { engine })
    }

    pub fn run(&self, effects: Vec<Effect>) -> Result<()> {
        for effect in effects {
            match effect {
                Effect::SubmitBatch { request_id, emails } => {
                    verifier_info!(
                        "SubmitBatch request_id={} batch_len={}",
                        request_id,
                        emails.len()
                    );
                    self.engine.submit(request_id, emails)?;
                }
                Effect::ShowNotice(notice) => show_notice(&notice),
            }
        }
        Ok(())
    }

    /// Blocks for the next engine event; `None` once the engine is gone.
    pub fn next_msg(&self) -> Option<Msg> {
        self.engine.recv().map(map_event)
    }
}

fn show_notice(notice: &Notice) {
    eprintln!("{}", ui::render::render_notice(notice));
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::AttemptFailed {
            request_id,
            attempt,
            max_attempts,
            error,
        } => Msg::AttemptFailed {
            request_id,
            attempt,
            max_attempts,
            reason: error.to_string(),
        },
        EngineEvent::VerificationCompleted { request_id, result } => match result {
            Ok(records) => Msg::VerificationSucceeded {
                request_id,
                records,
            },
            Err(err) => {
                verifier_warn!("Request {} failed: {}", request_id, err);
                Msg::VerificationFailed {
                    request_id,
                    failure: map_failure(&err),
                }
            }
        },
    }
}

fn map_failure(err: &VerifyError) -> VerificationFailure {
    let kind = match err {
        VerifyError::Unavailable { .. } => FailureKind::Unavailable,
        VerifyError::InvalidResponse(_) => FailureKind::InvalidResponse,
    };
    VerificationFailure::new(kind, err.to_string())
}
