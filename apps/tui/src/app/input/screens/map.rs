use crate::app::state::App;
use crossterm::event::KeyCode;

pub fn handle_map_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Right | KeyCode::Down | KeyCode::Char('l' | 'j') => {
            if let Some(marker) = app.view.cycle_marker(true) {
                app.view.focus(marker);
            }
        }
        KeyCode::Left | KeyCode::Up | KeyCode::Char('h' | 'k') => {
            if let Some(marker) = app.view.cycle_marker(false) {
                app.view.focus(marker);
            }
        }
        KeyCode::Enter | KeyCode::Char('d' | 'x') => app.activate_marker(),
        KeyCode::Esc => app.view.reset_viewport(),
        _ => {}
    }
}
