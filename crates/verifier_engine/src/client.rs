use std::sync::Arc;

use verifier_core::{EmailVerificationRecord, RequestId};
use verifier_logging::{verifier_debug, verifier_error, verifier_info, verifier_warn};

use crate::retry::{RetryPolicy, Sleeper};
use crate::transport::{ProgressSink, Transport};
use crate::{EngineEvent, VerifyError};

/// Submits a batch with bounded, sequential retries.
#[derive(Clone)]
pub struct VerificationClient {
    transport: Arc<dyn Transport>,
    sleeper: Arc<dyn Sleeper>,
    policy: RetryPolicy,
}

impl VerificationClient {
    pub fn new(transport: Arc<dyn Transport>, sleeper: Arc<dyn Sleeper>, policy: RetryPolicy) -> Self {
        Self {
            transport,
            sleeper,
            policy,
        }
    }

    /// Sends the whole batch, one network call per attempt.
    ///
    /// Retryable failures are reported to `sink` before the delay; a
    /// malformed response ends the request immediately.
    pub async fn verify(
        &self,
        request_id: RequestId,
        emails: &[String],
        sink: &dyn ProgressSink,
    ) -> Result<Vec<EmailVerificationRecord>, VerifyError> {
        let max_attempts = self.policy.max_attempts();
        let mut attempt = 0;

        loop {
            attempt += 1;
            verifier_debug!(
                "request={} attempt={}/{} batch_len={}",
                request_id,
                attempt,
                max_attempts,
                emails.len()
            );

            let err = match self.transport.send(emails).await {
                Ok(records) => {
                    verifier_info!(
                        "request={} verified batch_len={} records={} attempts={}",
                        request_id,
                        emails.len(),
                        records.len(),
                        attempt
                    );
                    return Ok(records);
                }
                Err(err) => err,
            };

            if !err.is_retryable() {
                verifier_error!("request={} invalid response: {}", request_id, err);
                return Err(VerifyError::InvalidResponse(err));
            }

            if !self.policy.should_retry(attempt) {
                verifier_error!(
                    "request={} giving up after {} attempts: {}",
                    request_id,
                    attempt,
                    err
                );
                return Err(VerifyError::Unavailable {
                    attempts: attempt,
                    last: err,
                });
            }

            let delay = self.policy.delay_before_retry(attempt);
            verifier_warn!(
                "request={} attempt {}/{} failed: {}; retrying in {:?}",
                request_id,
                attempt,
                max_attempts,
                err,
                delay
            );
            sink.emit(EngineEvent::AttemptFailed {
                request_id,
                attempt,
                max_attempts,
                error: err,
            });
            self.sleeper.sleep(delay).await;
        }
    }
}
