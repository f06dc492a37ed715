use crate::app::state::App;
use crossterm::event::KeyCode;

pub fn handle_modal_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char('y' | 'Y') | KeyCode::Enter => app.confirm_modal(),
        KeyCode::Char('n' | 'N') | KeyCode::Esc => app.cancel_modal(),
        _ => {}
    }
}
