use crate::app::input::screens::map::handle_map_input;
use crate::app::state::{App, Focus, Screen};
use crossterm::event::KeyCode;
use wildtrails_ops::Tab;

pub fn handle_dashboard_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char('1') => {
            app.view.set_tab(Tab::Sightings);
        }
        KeyCode::Char('2') => {
            app.view.set_tab(Tab::Alerts);
        }
        KeyCode::Char('t') => {
            app.view.toggle_tab();
        }
        KeyCode::Tab => {
            app.focus = if app.view.sidebar_open() {
                app.focus.toggle()
            } else {
                Focus::Map
            };
        }
        KeyCode::Char('b') => {
            app.view.toggle_sidebar();
            if !app.view.sidebar_open() {
                app.focus = Focus::Map;
            }
        }
        KeyCode::Char('s') => app.screen = Screen::Summary,
        KeyCode::Char('r') => app.refresh_now(),
        KeyCode::Char('+' | '=') => app.view.zoom_in(),
        KeyCode::Char('-') => app.view.zoom_out(),
        KeyCode::Char('0') => app.view.reset_viewport(),
        _ => match app.focus {
            Focus::Sidebar if app.view.sidebar_open() => handle_sidebar_input(app, key),
            _ => handle_map_input(app, key),
        },
    }
}

fn handle_sidebar_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.view.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.view.select_next(),
        KeyCode::Enter => {
            if !app.view.focus_selected() {
                app.status_message = "Entry has no usable coordinates".to_string();
            }
        }
        KeyCode::Char('d' | 'x') => app.trigger_selected(),
        _ => {}
    }
}
