use std::collections::HashSet;
use std::time::Duration;

use futures_util::StreamExt;
use serde::Serialize;
use url::Url;
use verifier_core::EmailVerificationRecord;

use crate::retry::RetryPolicy;
use crate::{AttemptError, AttemptFailure, EngineError, EngineEvent};

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub endpoint: Url,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_response_bytes: u64,
    pub retry: RetryPolicy,
}

impl ClientSettings {
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_response_bytes: 8 * 1024 * 1024,
            retry: RetryPolicy::default(),
        }
    }
}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelProgressSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// One network round trip carrying a whole batch.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, emails: &[String]) -> Result<Vec<EmailVerificationRecord>, AttemptError>;
}

#[derive(Serialize)]
struct VerifyRequest<'a> {
    emails: &'a [String],
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    endpoint: Url,
    max_response_bytes: u64,
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(settings: &ClientSettings) -> Result<Self, EngineError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()?;
        Ok(Self {
            endpoint: settings.endpoint.clone(),
            max_response_bytes: settings.max_response_bytes,
            client,
        })
    }

    fn too_large(&self, actual: u64) -> AttemptError {
        AttemptError::new(
            AttemptFailure::TooLarge {
                max_bytes: self.max_response_bytes,
                actual: Some(actual),
            },
            "response too large",
        )
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, emails: &[String]) -> Result<Vec<EmailVerificationRecord>, AttemptError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&VerifyRequest { emails })
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(AttemptError::new(
                AttemptFailure::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.max_response_bytes {
                return Err(self.too_large(content_len));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > self.max_response_bytes {
                return Err(self.too_large(next_len));
            }
            body.extend_from_slice(&chunk);
        }

        decode_records(&body)
    }
}

/// Decodes a response body into records, enforcing the array shape and the
/// non-empty, unique `email` key.
pub fn decode_records(body: &[u8]) -> Result<Vec<EmailVerificationRecord>, AttemptError> {
    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|err| AttemptError::new(AttemptFailure::Decode, err.to_string()))?;
    let items = match value {
        serde_json::Value::Array(items) => items,
        other => {
            return Err(AttemptError::new(
                AttemptFailure::NotAnArray,
                format!("expected array, got {}", json_kind(&other)),
            ));
        }
    };

    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let record: EmailVerificationRecord = serde_json::from_value(item).map_err(|err| {
            AttemptError::new(AttemptFailure::Decode, format!("record {index}: {err}"))
        })?;
        records.push(record);
    }

    let mut seen = HashSet::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        if record.email.trim().is_empty() {
            return Err(AttemptError::new(
                AttemptFailure::EmptyEmail { index },
                "record without email",
            ));
        }
        if !seen.insert(record.email.as_str()) {
            return Err(AttemptError::new(
                AttemptFailure::DuplicateEmail {
                    email: record.email.clone(),
                },
                "duplicate record key",
            ));
        }
    }

    Ok(records)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

fn map_reqwest_error(err: reqwest::Error) -> AttemptError {
    if err.is_timeout() {
        return AttemptError::new(AttemptFailure::Timeout, err.to_string());
    }
    AttemptError::new(AttemptFailure::Network, err.to_string())
}
