//! Verifier engine: network client, retry loop and report export.
mod client;
mod engine;
mod export;
mod persist;
mod retry;
mod route;
mod transport;
mod types;

pub use client::VerificationClient;
pub use engine::EngineHandle;
pub use export::{export_report, ExportError, ReportDocument};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use retry::{Backoff, RetryPolicy, Sleeper, TokioSleeper};
pub use route::{ApiRoute, RouteError, DEFAULT_ORIGIN, DEFAULT_VERIFY_PATH};
pub use transport::{
    decode_records, ChannelProgressSink, ClientSettings, ProgressSink, ReqwestTransport,
    Transport,
};
pub use types::{AttemptError, AttemptFailure, EngineError, EngineEvent, VerifyError};
