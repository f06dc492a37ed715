use crate::ui::widgets::popup::centered_rect;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

const KEYS: &[(&str, &str)] = &[
    ("?  F1", "Toggle this help"),
    ("1  2  t", "Animal sightings / SOS & alerts tab"),
    ("Tab", "Switch focus between list and map"),
    ("Up Down j k", "Move through the list"),
    ("Enter", "Locate the selected entry, or act on the map marker"),
    ("Arrows h l", "Step between markers (map focus)"),
    ("d  x", "Delete sighting / resolve alert"),
    ("+  -  0", "Zoom in, zoom out, back to the park"),
    ("b", "Collapse or expand the list"),
    ("r", "Refresh now"),
    ("s", "Species summary"),
    ("q", "Quit"),
];

pub fn render_help(f: &mut Frame<'_>, area: Rect) {
    let popup = centered_rect(70, 80, area);
    f.render_widget(Clear, popup);

    let key_style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let mut lines = vec![
        TextLine::from(Span::styled(
            "Wild Trails Live Map",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        TextLine::from(""),
        TextLine::from(
            "Sightings and unresolved alerts refresh in the background. \
             Deleting and resolving always ask for confirmation first.",
        ),
        TextLine::from(""),
        TextLine::from(Span::styled(
            "Keyboard Shortcuts:",
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];
    lines.extend(KEYS.iter().map(|(keys, action)| {
        TextLine::from(vec![
            Span::styled(format!("  {keys:<12}"), key_style),
            Span::raw(format!(" - {action}")),
        ])
    }));
    lines.push(TextLine::from(""));
    lines.push(TextLine::from(vec![
        Span::styled("  y / Enter", key_style),
        Span::raw(" confirms and "),
        Span::styled("n / Esc", key_style),
        Span::raw(" cancels an open confirmation."),
    ]));

    let paragraph = Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title("== Help & Keyboard Shortcuts ==")
                .title_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        );
    f.render_widget(paragraph, popup);

    let hint = Paragraph::new(Span::styled(
        "Press ? or Esc to close",
        Style::default().fg(Color::Gray),
    ))
    .alignment(Alignment::Center);
    let hint_area = Rect {
        x: popup.x,
        y: popup.y + popup.height.saturating_sub(2),
        width: popup.width,
        height: 1,
    };
    f.render_widget(hint, hint_area);
}
