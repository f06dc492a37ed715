use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use wildtrails_ops::actions::{execute, ActionOutcome};
use wildtrails_ops::poller::{poll_once, PollEvent};
use wildtrails_ops::{ApiClient, PendingAction};

/// Everything the event loop receives from background tasks.
#[derive(Debug)]
pub enum AppEvent {
    Poll(PollEvent),
    Action(ActionOutcome),
}

impl From<PollEvent> for AppEvent {
    fn from(event: PollEvent) -> Self {
        Self::Poll(event)
    }
}

/// Spawns backend work off the draw loop; results come back as [`AppEvent`]s.
#[derive(Debug, Clone)]
pub struct AppActions {
    client: Arc<ApiClient>,
    tx: UnboundedSender<AppEvent>,
}

impl AppActions {
    pub const fn new(client: Arc<ApiClient>, tx: UnboundedSender<AppEvent>) -> Self {
        Self { client, tx }
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    /// Runs a confirmed delete or resolve in the background.
    pub fn dispatch(&self, action: PendingAction) {
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = execute(&client, action).await;
            if tx.send(AppEvent::Action(outcome)).is_err() {
                tracing::debug!(%action, "console closed before the action finished");
            }
        });
    }

    /// Polls once outside the regular interval.
    pub fn refresh_now(&self) {
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        tokio::spawn(async move { poll_once(&client, &tx).await });
    }
}
