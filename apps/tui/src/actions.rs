use crate::api::{ApiClient, ApiError};
use crate::modal::{ActionKind, PendingAction};

/// Result of running a confirmed action against the backend.
#[derive(Debug)]
pub struct ActionOutcome {
    pub action: PendingAction,
    pub result: Result<(), ApiError>,
}

impl ActionOutcome {
    pub const fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// Text for the notification shown once the call has finished.
    pub fn notice(&self) -> String {
        match (&self.result, self.action.kind()) {
            (Ok(()), ActionKind::DeleteSighting) => "Sighting deleted successfully".to_string(),
            (Ok(()), ActionKind::ResolveAlert) => "Alert marked as resolved".to_string(),
            (Err(e), ActionKind::DeleteSighting) => format!("Failed to delete sighting: {e}"),
            (Err(e), ActionKind::ResolveAlert) => format!("Failed to resolve alert: {e}"),
        }
    }
}

/// Sends the mutating request for a confirmed action. Failures are returned
/// in the outcome rather than propagated so the caller can surface them.
pub async fn execute(client: &ApiClient, action: PendingAction) -> ActionOutcome {
    let result = match action.kind() {
        ActionKind::DeleteSighting => client.delete_sighting(action.id()).await,
        ActionKind::ResolveAlert => client.resolve_alert(action.id()).await,
    };
    match &result {
        Ok(()) => tracing::info!(%action, "action applied"),
        Err(e) => tracing::error!(%action, error = %e, "action failed"),
    }
    ActionOutcome { action, result }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::token::tests::token_expiring_in;
    use crate::api::{ApiConfig, StaticToken};
    use crate::modal::{ConfirmModal, ModalEvent};
    use std::sync::Arc;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn confirmed(event: ModalEvent) -> Option<PendingAction> {
        let mut modal = ConfirmModal::new();
        modal.process_event(event).ok()?;
        modal.process_event(ModalEvent::Confirm).ok().flatten()
    }

    #[tokio::test]
    async fn confirmed_resolve_patches_the_alert() -> Result<(), Box<dyn std::error::Error>> {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/api/sos/resolve/12"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(ApiConfig::new(
            server.uri(),
            Arc::new(StaticToken::new(token_expiring_in(600))),
        ))?;
        let action = confirmed(ModalEvent::TriggerResolve(12)).ok_or("modal did not confirm")?;

        let outcome = execute(&client, action).await;
        assert!(outcome.is_success());
        assert_eq!(outcome.notice(), "Alert marked as resolved");
        Ok(())
    }

    #[tokio::test]
    async fn failed_delete_is_captured_in_the_outcome() -> Result<(), Box<dyn std::error::Error>> {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/sightings/delete/3"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = ApiClient::new(ApiConfig::new(
            server.uri(),
            Arc::new(StaticToken::new(token_expiring_in(600))),
        ))?;
        let action = confirmed(ModalEvent::TriggerDelete(3)).ok_or("modal did not confirm")?;

        let outcome = execute(&client, action).await;
        assert!(!outcome.is_success());
        assert!(outcome.notice().starts_with("Failed to delete sighting"));
        Ok(())
    }
}
