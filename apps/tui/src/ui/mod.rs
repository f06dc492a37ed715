pub mod screens;
pub mod widgets;

use crate::app::{App, Screen};
use ratatui::Frame;

pub fn ui(app: &App, f: &mut Frame<'_>) {
    match app.screen {
        Screen::Dashboard => screens::dashboard::render_dashboard(app, f),
        Screen::Summary => screens::summary::render_summary(app, f),
    }

    let area = f.area();
    widgets::toast::render_notices(app, f, area);

    if app.view.modal().is_open() {
        screens::confirm::render_confirm(app, f, area);
    }
    if app.show_help {
        screens::help::render_help(f, area);
    }
}
