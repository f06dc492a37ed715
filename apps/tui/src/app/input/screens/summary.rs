use crate::app::input::helpers::cycle;
use crate::app::state::{App, Screen};
use crossterm::event::KeyCode;
use wildtrails_ops::AnimalKind;

pub fn handle_summary_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Esc | KeyCode::Char('s') => app.screen = Screen::Dashboard,
        KeyCode::Up => {
            app.summary_animal_index =
                cycle(app.summary_animal_index, AnimalKind::ALL.len(), false);
        }
        KeyCode::Down => {
            app.summary_animal_index =
                cycle(app.summary_animal_index, AnimalKind::ALL.len(), true);
        }
        KeyCode::Left => app.summary_scope = Some(app.summary_scope().shift(false)),
        KeyCode::Right => app.summary_scope = Some(app.summary_scope().shift(true)),
        KeyCode::Char('v') => app.toggle_summary_view(),
        KeyCode::Home => app.summary_scope = None,
        _ => {}
    }
}
