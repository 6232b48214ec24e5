use std::sync::{mpsc, Arc};
use std::thread;

use verifier_core::RequestId;
use verifier_logging::verifier_debug;

use crate::client::VerificationClient;
use crate::retry::TokioSleeper;
use crate::transport::{ChannelProgressSink, ClientSettings, ReqwestTransport};
use crate::{EngineError, EngineEvent};

enum EngineCommand {
    Verify {
        request_id: RequestId,
        emails: Vec<String>,
    },
}

/// Runs verification requests on a background thread.
///
/// Commands are executed one after another, so at most one request is ever on
/// the wire.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: ClientSettings) -> Result<Self, EngineError> {
        let transport = ReqwestTransport::new(&settings)?;
        let client =
            VerificationClient::new(Arc::new(transport), Arc::new(TokioSleeper), settings.retry);
        Self::with_client(client)
    }

    pub fn with_client(client: VerificationClient) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::Builder::new()
            .name("verifier-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    runtime.block_on(handle_command(&client, command, &event_tx));
                }
                verifier_debug!("engine command channel closed");
            })?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn submit(&self, request_id: RequestId, emails: Vec<String>) -> Result<(), EngineError> {
        self.cmd_tx
            .send(EngineCommand::Verify { request_id, emails })
            .map_err(|_| EngineError::Disconnected)
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Blocks until the next event; `None` once the engine thread is gone.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }
}

async fn handle_command(
    client: &VerificationClient,
    command: EngineCommand,
    event_tx: &mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Verify { request_id, emails } => {
            let sink = ChannelProgressSink::new(event_tx.clone());
            let result = client.verify(request_id, &emails, &sink).await;
            let _ = event_tx.send(EngineEvent::VerificationCompleted { request_id, result });
        }
    }
}
