use crate::app::App;
use crate::ui::widgets::popup::fixed_rect;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;
use wildtrails_ops::modal::ModalState;

/// Overlay for the open confirmation. Nothing is drawn while the modal is
/// closed.
pub fn render_confirm(app: &App, f: &mut Frame<'_>, area: Rect) {
    let modal = app.view.modal();
    let Some(kind) = modal.target() else {
        return;
    };
    let id = match modal.state() {
        ModalState::ConfirmDelete(id) | ModalState::ConfirmResolve(id) => id,
        ModalState::Closed => return,
    };

    let popup = fixed_rect(54, 9, area);
    f.render_widget(Clear, popup);

    let key = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let lines = vec![
        TextLine::from(""),
        TextLine::from(kind.message()),
        TextLine::from(Span::styled(format!("#{id}"), Style::default().fg(Color::Gray))),
        TextLine::from(""),
        TextLine::from(vec![
            Span::styled("[y] ", key),
            Span::styled(
                kind.confirm_label(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("[n] ", key),
            Span::raw("Cancel"),
        ]),
    ];

    let paragraph = Paragraph::new(Text::from(lines))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(format!(" {} ", kind.title()))
                .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );
    f.render_widget(paragraph, popup);
}
