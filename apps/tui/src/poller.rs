use crate::api::{Alert, ApiClient, ApiError, Sighting};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Messages the poller sends to whoever owns the view state.
#[derive(Debug)]
pub enum PollEvent {
    /// Credential was valid and both reads are now in flight.
    TickStarted,
    Sightings(Result<Vec<Sighting>, ApiError>),
    Alerts(Result<Vec<Alert>, ApiError>),
    /// The tick was skipped because there is no usable credential.
    AuthFailed(ApiError),
}

/// Background task that fetches both lists immediately and then on every
/// interval. Dropping the handle stops the interval and any tick still in
/// flight.
#[derive(Debug)]
pub struct Poller {
    task: Option<JoinHandle<()>>,
}

impl Poller {
    pub fn spawn<T>(client: Arc<ApiClient>, period: Duration, tx: UnboundedSender<T>) -> Self
    where
        T: From<PollEvent> + Send + 'static,
    {
        tracing::info!(period_secs = period.as_secs(), "poller started");
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut ticks = JoinSet::new();

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if tx.is_closed() {
                            break;
                        }
                        let client = Arc::clone(&client);
                        let tx = tx.clone();
                        ticks.spawn(async move { poll_once(&client, &tx).await });
                    }
                    Some(joined) = ticks.join_next(), if !ticks.is_empty() => {
                        if let Err(e) = joined {
                            tracing::error!(error = %e, "poll tick panicked");
                        }
                    }
                }
            }
            tracing::debug!("poller receiver closed");
        });
        Self { task: Some(task) }
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Stops polling and waits for the task to wind down. Returns `true` if
    /// the task was still running when asked to stop.
    pub async fn shutdown(mut self) -> bool {
        let Some(task) = self.task.take() else {
            return false;
        };
        task.abort();
        match task.await {
            Ok(()) => false,
            Err(e) => e.is_cancelled(),
        }
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// One poll tick: checks the credential, then issues both reads at once and
/// delivers each result as soon as it lands.
pub async fn poll_once<T>(client: &ApiClient, tx: &UnboundedSender<T>)
where
    T: From<PollEvent>,
{
    if let Err(e) = client.credential() {
        tracing::warn!(error = %e, "poll skipped, no usable credential");
        deliver(tx, PollEvent::AuthFailed(e));
        return;
    }
    if !deliver(tx, PollEvent::TickStarted) {
        return;
    }

    let sightings = async {
        let result = client.recent_sightings().await;
        deliver(tx, PollEvent::Sightings(result));
    };
    let alerts = async {
        let result = client.unresolved_alerts().await;
        deliver(tx, PollEvent::Alerts(result));
    };
    tokio::join!(sightings, alerts);
}

fn deliver<T: From<PollEvent>>(tx: &UnboundedSender<T>, event: PollEvent) -> bool {
    if tx.send(T::from(event)).is_err() {
        tracing::debug!("view gone, poll result discarded");
        return false;
    }
    true
}
