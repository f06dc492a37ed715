use crate::app::App;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;
use wildtrails_ops::view::NoticeKind;

const TOAST_WIDTH: u16 = 44;
const TOAST_HEIGHT: u16 = 3;

/// Stacks live notices in the top-right corner, newest at the top.
pub fn render_notices(app: &App, f: &mut Frame<'_>, area: Rect) {
    if area.width < TOAST_WIDTH + 2 {
        return;
    }
    let x = area.x + area.width - TOAST_WIDTH - 1;

    for (i, notice) in app.view.notices().rev().enumerate() {
        #[allow(clippy::cast_possible_truncation)]
        let y = area.y + 1 + (i as u16) * TOAST_HEIGHT;
        if y + TOAST_HEIGHT > area.y + area.height {
            break;
        }
        let rect = Rect::new(x, y, TOAST_WIDTH, TOAST_HEIGHT);
        let (title, color) = match notice.kind {
            NoticeKind::Success => (" Success ", Color::Green),
            NoticeKind::Error => (" Error ", Color::Red),
        };

        let paragraph = Paragraph::new(notice.message.as_str())
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title(title)
                    .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            );
        f.render_widget(Clear, rect);
        f.render_widget(paragraph, rect);
    }
}
