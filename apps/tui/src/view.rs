use crate::actions::ActionOutcome;
use crate::api::{Alert, ApiError, Sighting};
use crate::domain::{GeoPoint, MarkerKey, Tab};
use crate::map::{reconcile, MapSurface, MarkerAction, MarkerPool, ReconcileReport};
use crate::modal::{ActionKind, ConfirmModal, ModalEvent, ModalTransitionError, PendingAction};
use crate::poller::PollEvent;
use chrono::{DateTime, Local};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

pub const DEFAULT_ZOOM: u8 = 12;
pub const FOCUS_ZOOM: u8 = 15;
const MIN_ZOOM: u8 = 3;
const MAX_ZOOM: u8 = 18;

pub const NOTICE_TTL: Duration = Duration::from_secs(4);
const MAX_NOTICES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: GeoPoint,
    pub zoom: u8,
}

impl Viewport {
    pub const fn new(center: GeoPoint) -> Self {
        Self {
            center,
            zoom: DEFAULT_ZOOM,
        }
    }

    /// Half-width of the visible area in degrees of longitude.
    pub fn span(self) -> f64 {
        180.0 / f64::from(1_u32 << self.zoom.min(MAX_ZOOM))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub created: Instant,
}

/// Everything the map screen shows, independent of how it is drawn.
///
/// The view is the single owner of both entity lists and of the marker
/// pool; every change to a list is followed by a reconciliation pass so the
/// pool never drifts from the active tab.
#[derive(Debug)]
pub struct MapView<S: MapSurface> {
    surface: S,
    pool: MarkerPool<S::Handle>,
    active_tab: Tab,
    sightings: Vec<Sighting>,
    alerts: Vec<Alert>,
    pending_reads: u32,
    /// Credential missing or expired at tick start.
    auth_error: Option<String>,
    /// A read the backend answered with 401. Only that list's next success
    /// clears it.
    sightings_rejected: Option<String>,
    alerts_rejected: Option<String>,
    sightings_error: Option<String>,
    alerts_error: Option<String>,
    modal: ConfirmModal,
    notices: VecDeque<Notice>,
    home: GeoPoint,
    viewport: Viewport,
    sidebar_open: bool,
    selected: usize,
    marker_cursor: Option<MarkerKey>,
    last_refresh: Option<DateTime<Local>>,
}

impl<S: MapSurface> MapView<S> {
    pub fn new(surface: S, home: GeoPoint) -> Self {
        Self {
            surface,
            pool: MarkerPool::new(),
            active_tab: Tab::default(),
            sightings: Vec::new(),
            alerts: Vec::new(),
            pending_reads: 0,
            auth_error: None,
            sightings_rejected: None,
            alerts_rejected: None,
            sightings_error: None,
            alerts_error: None,
            modal: ConfirmModal::new(),
            notices: VecDeque::new(),
            home,
            viewport: Viewport::new(home),
            sidebar_open: true,
            selected: 0,
            marker_cursor: None,
            last_refresh: None,
        }
    }

    pub const fn surface(&self) -> &S {
        &self.surface
    }

    pub const fn pool(&self) -> &MarkerPool<S::Handle> {
        &self.pool
    }

    pub const fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn sightings(&self) -> &[Sighting] {
        &self.sightings
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    pub const fn is_loading(&self) -> bool {
        self.pending_reads > 0
    }

    pub fn auth_error(&self) -> Option<&str> {
        self.auth_error
            .as_deref()
            .or(self.sightings_rejected.as_deref())
            .or(self.alerts_rejected.as_deref())
    }

    /// Latest read failure, if any list is currently stale.
    pub fn fetch_error(&self) -> Option<&str> {
        self.sightings_error
            .as_deref()
            .or(self.alerts_error.as_deref())
    }

    pub const fn modal(&self) -> &ConfirmModal {
        &self.modal
    }

    pub fn notices(&self) -> impl DoubleEndedIterator<Item = &Notice> + ExactSizeIterator + '_ {
        self.notices.iter()
    }

    pub const fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub const fn sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    pub const fn selected(&self) -> usize {
        self.selected
    }

    pub const fn marker_cursor(&self) -> Option<MarkerKey> {
        self.marker_cursor
    }

    pub const fn last_refresh(&self) -> Option<DateTime<Local>> {
        self.last_refresh
    }

    pub fn unresolved_count(&self) -> usize {
        self.alerts.iter().filter(|alert| !alert.solved).count()
    }

    /// Number of rows in the active tab's list.
    pub fn list_len(&self) -> usize {
        match self.active_tab {
            Tab::Sightings => self.sightings.len(),
            Tab::Alerts => self.alerts.len(),
        }
    }

    pub fn selected_key(&self) -> Option<MarkerKey> {
        match self.active_tab {
            Tab::Sightings => self.sightings.get(self.selected).map(Sighting::key),
            Tab::Alerts => self.alerts.get(self.selected).map(Alert::key),
        }
    }

    /// Folds one poller message into the view. Returns the reconciliation
    /// report when a list was replaced.
    pub fn apply_poll_event(&mut self, event: PollEvent) -> Option<ReconcileReport> {
        match event {
            PollEvent::TickStarted => {
                self.pending_reads = self.pending_reads.saturating_add(2);
                None
            }
            PollEvent::AuthFailed(e) => {
                self.auth_error = Some(e.to_string());
                None
            }
            PollEvent::Sightings(result) => {
                self.pending_reads = self.pending_reads.saturating_sub(1);
                match result {
                    Ok(sightings) => {
                        self.sightings = sightings;
                        self.sightings_error = None;
                        self.sightings_rejected = None;
                        Some(self.after_refresh())
                    }
                    Err(e) => {
                        let (error, rejected) = read_failed("sightings", &e);
                        self.sightings_error = error;
                        self.sightings_rejected = rejected;
                        None
                    }
                }
            }
            PollEvent::Alerts(result) => {
                self.pending_reads = self.pending_reads.saturating_sub(1);
                match result {
                    Ok(alerts) => {
                        self.alerts = alerts;
                        self.alerts_error = None;
                        self.alerts_rejected = None;
                        Some(self.after_refresh())
                    }
                    Err(e) => {
                        let (error, rejected) = read_failed("alerts", &e);
                        self.alerts_error = error;
                        self.alerts_rejected = rejected;
                        None
                    }
                }
            }
        }
    }

    fn after_refresh(&mut self) -> ReconcileReport {
        self.auth_error = None;
        self.last_refresh = Some(Local::now());
        self.sync_markers()
    }

    /// Re-runs reconciliation for the current tab and lists.
    pub fn sync_markers(&mut self) -> ReconcileReport {
        let report = reconcile(
            self.active_tab,
            &self.sightings,
            &self.alerts,
            &mut self.pool,
            &mut self.surface,
        );
        let len = self.list_len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
        if self
            .marker_cursor
            .is_some_and(|key| !self.pool.contains(&key))
        {
            self.marker_cursor = None;
        }
        report
    }

    pub fn set_tab(&mut self, tab: Tab) -> ReconcileReport {
        if tab != self.active_tab {
            self.active_tab = tab;
            self.selected = 0;
            self.marker_cursor = None;
        }
        self.sync_markers()
    }

    pub fn toggle_tab(&mut self) -> ReconcileReport {
        self.set_tab(self.active_tab.toggle())
    }

    pub fn select_next(&mut self) {
        let len = self.list_len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    pub fn select_prev(&mut self) {
        let len = self.list_len();
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }

    fn position_of(&self, key: MarkerKey) -> Option<GeoPoint> {
        match key {
            MarkerKey::Sighting(id) => self
                .sightings
                .iter()
                .find(|s| s.id == id)
                .and_then(Sighting::position),
            MarkerKey::Alert(id) => self
                .alerts
                .iter()
                .find(|a| a.id == id)
                .and_then(Alert::position),
        }
    }

    /// Activates the tab owning `key` and centers the map on it. Entities
    /// without a usable position only switch the tab.
    pub fn focus(&mut self, key: MarkerKey) -> bool {
        let tab = match key {
            MarkerKey::Sighting(_) => Tab::Sightings,
            MarkerKey::Alert(_) => Tab::Alerts,
        };
        if tab != self.active_tab {
            self.set_tab(tab);
        }
        let Some(position) = self.position_of(key) else {
            return false;
        };
        self.viewport = Viewport {
            center: position,
            zoom: FOCUS_ZOOM,
        };
        if self.pool.contains(&key) {
            self.marker_cursor = Some(key);
        }
        true
    }

    pub fn focus_selected(&mut self) -> bool {
        self.selected_key().is_some_and(|key| self.focus(key))
    }

    /// Moves the map focus cursor across the drawn markers.
    pub fn cycle_marker(&mut self, forward: bool) -> Option<MarkerKey> {
        let keys = self.pool.keys().copied().collect::<Vec<_>>();
        if keys.is_empty() {
            self.marker_cursor = None;
            return None;
        }
        let len = keys.len();
        let next = match self.marker_cursor.and_then(|c| keys.iter().position(|k| *k == c)) {
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
            None if forward => 0,
            None => len - 1,
        };
        self.marker_cursor = Some(keys[next]);
        self.marker_cursor
    }

    /// Opens the modal for whatever action the marker was created with.
    pub fn activate_marker(&mut self, key: MarkerKey) -> Result<bool, ModalTransitionError> {
        match self.pool.action(&key) {
            Some(action) => self.trigger(action),
            None => Ok(false),
        }
    }

    pub fn activate_cursor(&mut self) -> Result<bool, ModalTransitionError> {
        match self.marker_cursor {
            Some(key) => self.activate_marker(key),
            None => Ok(false),
        }
    }

    /// Opens the modal for the selected row of the active list.
    pub fn trigger_selected(&mut self) -> Result<bool, ModalTransitionError> {
        let action = match self.active_tab {
            Tab::Sightings => self
                .sightings
                .get(self.selected)
                .map(|s| MarkerAction::DeleteSighting(s.id)),
            Tab::Alerts => self.alerts.get(self.selected).map(|a| {
                if a.solved {
                    MarkerAction::None
                } else {
                    MarkerAction::ResolveAlert(a.id)
                }
            }),
        };
        action.map_or(Ok(false), |action| self.trigger(action))
    }

    fn trigger(&mut self, action: MarkerAction) -> Result<bool, ModalTransitionError> {
        let event = match action {
            MarkerAction::DeleteSighting(id) => ModalEvent::TriggerDelete(id),
            MarkerAction::ResolveAlert(id) => ModalEvent::TriggerResolve(id),
            MarkerAction::None => return Ok(false),
        };
        self.modal.process_event(event)?;
        Ok(true)
    }

    pub fn cancel_modal(&mut self) -> Result<(), ModalTransitionError> {
        self.modal.process_event(ModalEvent::Cancel).map(drop)
    }

    /// Closes the modal and hands back the action the operator agreed to.
    pub fn confirm_modal(&mut self) -> Result<Option<PendingAction>, ModalTransitionError> {
        self.modal.process_event(ModalEvent::Confirm)
    }

    /// Applies the result of a delete or resolve call. Lists only change
    /// after the backend has accepted the mutation.
    pub fn apply_action_outcome(&mut self, outcome: &ActionOutcome) {
        let message = outcome.notice();
        if outcome.is_success() {
            let id = outcome.action.id();
            match outcome.action.kind() {
                ActionKind::DeleteSighting => self.sightings.retain(|s| s.id != id),
                ActionKind::ResolveAlert => self.alerts.retain(|a| a.id != id),
            }
            self.sync_markers();
            self.push_notice(NoticeKind::Success, message);
        } else {
            self.push_notice(NoticeKind::Error, message);
        }
    }

    pub fn push_notice(&mut self, kind: NoticeKind, message: impl Into<String>) {
        if self.notices.len() == MAX_NOTICES {
            self.notices.pop_front();
        }
        self.notices.push_back(Notice {
            kind,
            message: message.into(),
            created: Instant::now(),
        });
    }

    /// Drops notices older than [`NOTICE_TTL`].
    pub fn prune_notices(&mut self, now: Instant) {
        self.notices
            .retain(|notice| now.saturating_duration_since(notice.created) < NOTICE_TTL);
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom = (self.viewport.zoom + 1).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom = self.viewport.zoom.saturating_sub(1).max(MIN_ZOOM);
    }

    pub fn reset_viewport(&mut self) {
        self.viewport = Viewport::new(self.home);
    }
}

/// Splits a read failure into (non-blocking error, auth rejection).
fn read_failed(what: &str, e: &ApiError) -> (Option<String>, Option<String>) {
    tracing::warn!(list = what, error = %e, "read failed, keeping previous data");
    if e.is_auth() {
        return (None, Some(e.to_string()));
    }
    (Some(format!("Failed to load {what}: {e}")), None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::execute;
    use crate::api::token::tests::token_expiring_in;
    use crate::api::{ApiClient, ApiConfig, StaticToken};
    use crate::map::reconcile::tests::{alert, sighting, RecordingSurface};
    use std::sync::Arc;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn loaded_view() -> MapView<RecordingSurface> {
        let mut view = MapView::new(RecordingSurface::default(), GeoPoint::YALA);
        view.apply_poll_event(PollEvent::TickStarted);
        view.apply_poll_event(PollEvent::Sightings(Ok(vec![
            sighting(1, Some(6.47), Some(81.35)),
            sighting(2, Some(6.5), Some(81.4)),
        ])));
        view.apply_poll_event(PollEvent::Alerts(Ok(vec![alert(7, Some(6.41), Some(81.33))])));
        view
    }

    fn client(server: &MockServer) -> Result<ApiClient, ApiError> {
        ApiClient::new(ApiConfig::new(
            server.uri(),
            Arc::new(StaticToken::new(token_expiring_in(600))),
        ))
    }

    #[test]
    fn poll_results_replace_lists_and_markers() {
        let mut view = loaded_view();
        assert!(!view.is_loading());
        assert_eq!(view.pool().len(), 2);
        assert_eq!(view.unresolved_count(), 1);

        let report = view.apply_poll_event(PollEvent::Sightings(Ok(vec![sighting(
            2,
            Some(6.5),
            Some(81.4),
        )])));
        assert_eq!(report.map(|r| r.removed), Some(vec![MarkerKey::Sighting(1)]));
        assert_eq!(view.surface().live.len(), 1);
    }

    #[test]
    fn read_error_keeps_stale_data() {
        let mut view = loaded_view();
        view.apply_poll_event(PollEvent::TickStarted);
        view.apply_poll_event(PollEvent::Sightings(Err(ApiError::Status {
            status: 502,
            endpoint: "/api/sightings/recent".to_string(),
        })));

        assert!(view.is_loading());
        assert_eq!(view.sightings().len(), 2);
        assert!(view
            .fetch_error()
            .is_some_and(|e| e.starts_with("Failed to load sightings")));
        assert!(view.auth_error().is_none());
    }

    #[test]
    fn auth_error_blocks_until_next_successful_poll() {
        let mut view = loaded_view();
        view.apply_poll_event(PollEvent::AuthFailed(ApiError::ExpiredToken));
        assert!(view.auth_error().is_some());
        assert_eq!(view.sightings().len(), 2);

        view.apply_poll_event(PollEvent::TickStarted);
        view.apply_poll_event(PollEvent::Alerts(Ok(Vec::new())));
        assert!(view.auth_error().is_none());
    }

    /// Runs whatever the modal hands back, the way the console does.
    async fn confirm_and_execute(
        view: &mut MapView<RecordingSurface>,
        client: &ApiClient,
    ) -> Option<ActionOutcome> {
        match view.confirm_modal() {
            Ok(Some(action)) => {
                let outcome = execute(client, action).await;
                view.apply_action_outcome(&outcome);
                Some(outcome)
            }
            _ => None,
        }
    }

    #[tokio::test]
    async fn cancelled_delete_sends_nothing() -> Result<(), Box<dyn std::error::Error>> {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(204))
            .expect(0)
            .mount(&server)
            .await;
        let client = client(&server)?;

        let mut view = loaded_view();
        assert_eq!(view.trigger_selected(), Ok(true));
        assert!(view.modal().is_open());
        view.cancel_modal()?;

        assert!(!view.modal().is_open());
        assert!(confirm_and_execute(&mut view, &client).await.is_none());
        assert_eq!(view.sightings().len(), 2);
        server.verify().await;
        Ok(())
    }

    #[tokio::test]
    async fn confirmed_delete_sends_one_request() -> Result<(), Box<dyn std::error::Error>> {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        let client = client(&server)?;

        let mut view = loaded_view();
        assert_eq!(view.trigger_selected(), Ok(true));
        let outcome = confirm_and_execute(&mut view, &client)
            .await
            .ok_or("confirm produced no action")?;

        assert!(outcome.is_success());
        assert_eq!(view.sightings().len(), 1);
        assert!(!view.pool().contains(&MarkerKey::Sighting(1)));
        server.verify().await;
        Ok(())
    }

    #[test]
    fn unauthorized_read_blocks_even_if_the_other_list_loads() {
        let mut view = loaded_view();
        view.apply_poll_event(PollEvent::TickStarted);
        view.apply_poll_event(PollEvent::Sightings(Err(ApiError::Status {
            status: 401,
            endpoint: "/api/sightings/recent".to_string(),
        })));
        assert!(view.auth_error().is_some());
        assert!(view.fetch_error().is_none());

        view.apply_poll_event(PollEvent::Alerts(Ok(Vec::new())));
        assert!(view.auth_error().is_some());
        assert_eq!(view.sightings().len(), 2);

        view.apply_poll_event(PollEvent::TickStarted);
        view.apply_poll_event(PollEvent::Sightings(Ok(Vec::new())));
        assert!(view.auth_error().is_none());
    }

    #[tokio::test]
    async fn failed_delete_keeps_the_sighting() -> Result<(), Box<dyn std::error::Error>> {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;
        let client = client(&server)?;

        let mut view = loaded_view();
        view.activate_marker(MarkerKey::Sighting(1))?;
        let action = view.confirm_modal()?.ok_or("no pending action")?;
        let outcome = execute(&client, action).await;
        view.apply_action_outcome(&outcome);

        assert_eq!(view.sightings().len(), 2);
        assert!(view.pool().contains(&MarkerKey::Sighting(1)));
        let notice = view.notices().next_back().ok_or("no notice")?;
        assert_eq!(notice.kind, NoticeKind::Error);
        Ok(())
    }

    #[tokio::test]
    async fn successful_resolve_removes_the_alert() -> Result<(), Box<dyn std::error::Error>> {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
        let client = client(&server)?;

        let mut view = loaded_view();
        view.set_tab(Tab::Alerts);
        assert_eq!(view.pool().len(), 1);
        view.trigger_selected()?;
        let action = view.confirm_modal()?.ok_or("no pending action")?;
        assert_eq!(action.kind(), ActionKind::ResolveAlert);

        view.apply_action_outcome(&execute(&client, action).await);
        assert!(view.alerts().is_empty());
        assert!(view.pool().is_empty());
        assert_eq!(view.unresolved_count(), 0);
        assert_eq!(view.notices().next_back().map(|n| n.kind), Some(NoticeKind::Success));
        Ok(())
    }

    #[test]
    fn focusing_an_alert_switches_tab_and_recenters() {
        let mut view = loaded_view();
        assert!(view.focus(MarkerKey::Alert(7)));
        assert_eq!(view.active_tab(), Tab::Alerts);
        assert_eq!(view.viewport().zoom, FOCUS_ZOOM);
        assert_eq!(view.viewport().center, GeoPoint { lat: 6.41, lng: 81.33 });
        assert_eq!(view.marker_cursor(), Some(MarkerKey::Alert(7)));

        view.reset_viewport();
        assert_eq!(view.viewport(), Viewport::new(GeoPoint::YALA));
    }

    #[test]
    fn marker_cursor_wraps_around() {
        let mut view = loaded_view();
        assert_eq!(view.cycle_marker(true), Some(MarkerKey::Sighting(1)));
        assert_eq!(view.cycle_marker(true), Some(MarkerKey::Sighting(2)));
        assert_eq!(view.cycle_marker(true), Some(MarkerKey::Sighting(1)));
        assert_eq!(view.cycle_marker(false), Some(MarkerKey::Sighting(2)));
    }

    #[test]
    fn notices_expire_and_stay_bounded() {
        let mut view = MapView::new(RecordingSurface::default(), GeoPoint::YALA);
        for i in 0..8 {
            view.push_notice(NoticeKind::Success, format!("n{i}"));
        }
        assert_eq!(view.notices().count(), MAX_NOTICES);
        assert_eq!(view.notices().next().map(|n| n.message.as_str()), Some("n3"));

        view.prune_notices(Instant::now() + NOTICE_TTL);
        assert_eq!(view.notices().count(), 0);
    }
}
