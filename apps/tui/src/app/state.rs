use crate::app::actions::{AppActions, AppEvent};
use chrono::Local;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use throbber_widgets_tui::ThrobberState;
use wildtrails_ops::config::AppConfig;
use wildtrails_ops::map::CanvasSurface;
use wildtrails_ops::summary::SummaryScope;
use wildtrails_ops::poller::PollEvent;
use wildtrails_ops::{AnimalKind, MapView};

const THROBBER_STEP: Duration = Duration::from_millis(120);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    Summary,
}

/// Which dashboard pane receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Map,
}

impl Focus {
    pub const fn toggle(self) -> Self {
        match self {
            Self::Sidebar => Self::Map,
            Self::Map => Self::Sidebar,
        }
    }
}

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub view: MapView<CanvasSurface>,
    pub screen: Screen,
    pub focus: Focus,
    pub show_help: bool,
    pub status_message: String,
    pub summary_animal_index: usize,
    /// `None` follows the month of the latest sighting.
    pub summary_scope: Option<SummaryScope>,
    pub throbber: ThrobberState,
    pub actions: AppActions,
    pub token_file: PathBuf,
    pub poll_interval: Duration,
    last_step: Instant,
}

impl App {
    pub fn new(config: &AppConfig, actions: AppActions) -> Self {
        Self {
            running: true,
            view: MapView::new(CanvasSurface::new(), config.home),
            screen: Screen::Dashboard,
            focus: Focus::Sidebar,
            show_help: false,
            status_message: String::new(),
            summary_animal_index: 0,
            summary_scope: None,
            throbber: ThrobberState::default(),
            actions,
            token_file: config.token_file.clone(),
            poll_interval: config.poll_interval,
            last_step: Instant::now(),
        }
    }

    /// Per-frame housekeeping: expire notices and spin the loading indicator.
    pub fn update(&mut self) {
        let now = Instant::now();
        self.view.prune_notices(now);
        if self.view.is_loading() && now.duration_since(self.last_step) >= THROBBER_STEP {
            self.throbber.calc_next();
            self.last_step = now;
        }
    }

    pub fn apply(&mut self, event: AppEvent) {
        match event {
            AppEvent::Poll(event) => {
                if !matches!(event, PollEvent::TickStarted) {
                    self.status_message.clear();
                }
                self.view.apply_poll_event(event);
            }
            AppEvent::Action(outcome) => {
                self.view.apply_action_outcome(&outcome);
                self.status_message.clear();
            }
        }
    }

    /// Confirms the open modal and sends the action off to the backend.
    pub fn confirm_modal(&mut self) {
        match self.view.confirm_modal() {
            Ok(Some(action)) => {
                self.status_message = format!("Sending {action}...");
                self.actions.dispatch(action);
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "confirm ignored"),
        }
    }

    pub fn cancel_modal(&mut self) {
        if let Err(e) = self.view.cancel_modal() {
            tracing::warn!(error = %e, "cancel ignored");
        }
    }

    /// Opens the confirmation for the selected sidebar row.
    pub fn trigger_selected(&mut self) {
        match self.view.trigger_selected() {
            Ok(true) => {}
            Ok(false) => self.status_message = "No action available for this entry".to_string(),
            Err(e) => tracing::warn!(error = %e, "trigger ignored"),
        }
    }

    /// Opens the confirmation attached to the focused map marker.
    pub fn activate_marker(&mut self) {
        match self.view.activate_cursor() {
            Ok(true) => {}
            Ok(false) => self.status_message = "No marker action available".to_string(),
            Err(e) => tracing::warn!(error = %e, "marker activation ignored"),
        }
    }

    pub fn refresh_now(&mut self) {
        self.status_message = "Refreshing sightings and alerts...".to_string();
        self.actions.refresh_now();
    }

    pub fn summary_animal(&self) -> AnimalKind {
        AnimalKind::from_index(self.summary_animal_index).unwrap_or(AnimalKind::Elephant)
    }

    pub fn summary_scope(&self) -> SummaryScope {
        self.summary_scope.unwrap_or_else(|| {
            SummaryScope::latest_month(self.view.sightings(), Local::now().date_naive())
        })
    }

    /// Switches the summary between month and day view. The day view opens
    /// on the latest day with data in the shown month.
    pub fn toggle_summary_view(&mut self) {
        let scope = self.summary_scope();
        self.summary_scope = Some(match scope {
            SummaryScope::Month { .. } => {
                let date = wildtrails_ops::summary::days_with_data(self.view.sightings())
                    .into_iter()
                    .rev()
                    .find(|d| scope.contains(*d))
                    .unwrap_or_else(|| Local::now().date_naive());
                SummaryScope::Day { date }
            }
            SummaryScope::Day { date } => SummaryScope::month_of(date),
        });
    }
}
