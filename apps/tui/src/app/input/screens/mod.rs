use crate::app::state::{App, Screen};
use crossterm::event::KeyCode;

mod dashboard;
mod help;
mod map;
mod modal;
mod summary;

/// Routes a key press. The open confirmation modal captures every key so
/// nothing behind it can fire while it is shown.
pub fn dispatch_input(app: &mut App, key: KeyCode) {
    if app.view.modal().is_open() {
        modal::handle_modal_input(app, key);
        return;
    }

    if help::handle_help_toggle(app, key) {
        return;
    }

    if key == KeyCode::Char('q') {
        app.running = false;
        return;
    }

    match app.screen {
        Screen::Dashboard => dashboard::handle_dashboard_input(app, key),
        Screen::Summary => summary::handle_summary_input(app, key),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::app::actions::{AppActions, AppEvent};
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::mpsc::{self, UnboundedReceiver};
    use tokio::time::timeout;
    use wildtrails_ops::api::{Sighting, StaticToken};
    use wildtrails_ops::config::AppConfig;
    use wildtrails_ops::poller::PollEvent;
    use wildtrails_ops::{AnimalKind, ApiClient, ApiConfig};
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const WAIT: Duration = Duration::from_millis(500);

    pub(crate) fn test_app() -> (App, UnboundedReceiver<AppEvent>) {
        test_app_against("http://127.0.0.1:9", StaticToken::none())
    }

    fn fresh_token() -> String {
        let exp = chrono::Utc::now().timestamp() + 600;
        let claims = serde_json::json!({ "sub": "admin@wildtrails.lk", "exp": exp });
        encode(&Header::default(), &claims, &EncodingKey::from_secret(b"test-secret"))
            .unwrap_or_default()
    }

    fn test_app_against(
        base_url: &str,
        token: StaticToken,
    ) -> (App, UnboundedReceiver<AppEvent>) {
        let config = AppConfig::from_lookup(|_| None).unwrap_or_else(|e| panic!("{e}"));
        let client = ApiClient::new(ApiConfig::new(base_url, Arc::new(token)))
            .unwrap_or_else(|e| panic!("{e}"));
        let (tx, rx) = mpsc::unbounded_channel();
        let app = App::new(&config, AppActions::new(Arc::new(client), tx));
        (app, rx)
    }

    pub(crate) fn with_sighting(app: &mut App) {
        app.view.apply_poll_event(PollEvent::Sightings(Ok(vec![Sighting {
            id: 1,
            animal: AnimalKind::Elephant,
            animal_name: "Elephant".to_string(),
            lat: Some(6.47),
            lng: Some(81.35),
            observed_at: None,
            observed_raw: "2024-05-01T08:00:00Z".to_string(),
            reported_by: "R1".to_string(),
            count: 2,
            notes: None,
        }])));
    }

    #[tokio::test]
    async fn declining_the_modal_dispatches_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(204))
            .expect(0)
            .mount(&server)
            .await;
        let (mut app, mut rx) = test_app_against(&server.uri(), StaticToken::new(fresh_token()));
        with_sighting(&mut app);

        dispatch_input(&mut app, KeyCode::Char('d'));
        assert!(app.view.modal().is_open());
        dispatch_input(&mut app, KeyCode::Char('q'));
        assert!(app.running, "modal swallows other keys");

        dispatch_input(&mut app, KeyCode::Char('n'));
        assert!(!app.view.modal().is_open());
        assert!(timeout(WAIT, rx.recv()).await.is_err());
        assert_eq!(app.view.sightings().len(), 1);
        server.verify().await;
    }

    #[tokio::test]
    async fn confirming_the_modal_deletes_the_sighting() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        let (mut app, mut rx) = test_app_against(&server.uri(), StaticToken::new(fresh_token()));
        with_sighting(&mut app);

        dispatch_input(&mut app, KeyCode::Char('d'));
        dispatch_input(&mut app, KeyCode::Char('y'));
        assert!(!app.view.modal().is_open());

        let outcome = match timeout(WAIT, rx.recv()).await {
            Ok(Some(AppEvent::Action(outcome))) => outcome,
            other => panic!("expected an action outcome, got {other:?}"),
        };
        assert!(outcome.is_success());
        app.apply(AppEvent::Action(outcome));
        assert!(app.view.sightings().is_empty());
        server.verify().await;
    }

    #[tokio::test]
    async fn tab_keys_swap_the_marker_layer() {
        let (mut app, _rx) = test_app();
        with_sighting(&mut app);
        assert_eq!(app.view.pool().len(), 1);

        dispatch_input(&mut app, KeyCode::Char('2'));
        assert!(app.view.pool().is_empty());
        dispatch_input(&mut app, KeyCode::Char('1'));
        assert_eq!(app.view.pool().len(), 1);
    }
}
