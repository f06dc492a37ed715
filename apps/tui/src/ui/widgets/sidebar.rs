use crate::app::App;
use crate::ui::widgets::map::{alert_color, animal_color};
use crate::ui::widgets::tables::scroll_offset;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;
use wildtrails_ops::Tab;

pub fn render_sidebar(app: &App, f: &mut Frame<'_>, area: Rect, focused: bool) {
    let tab = app.view.active_tab();
    let total_rows = app.view.list_len();
    let border = if focused { Color::Yellow } else { Color::DarkGray };

    let title = if total_rows == 0 {
        format!(" {} ", tab.label())
    } else {
        format!(" {} ({} of {}) ", tab.label(), app.view.selected() + 1, total_rows)
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));

    if total_rows == 0 {
        let empty = match tab {
            Tab::Sightings => "No recent sightings",
            Tab::Alerts => "No unresolved alerts",
        };
        let paragraph = Paragraph::new(empty)
            .block(block)
            .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
        return;
    }

    let max_visible_rows = area.height.saturating_sub(3) as usize;
    let offset = scroll_offset(total_rows, max_visible_rows, app.view.selected());
    let selected_style = Style::default()
        .bg(Color::Rgb(0, 0, 238))
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);

    let (header, rows, widths) = match tab {
        Tab::Sightings => {
            let header = Row::new(["", "Animal", "Count", "Time", "By"]);
            let rows = app
                .view
                .sightings()
                .iter()
                .enumerate()
                .skip(offset)
                .take(max_visible_rows)
                .map(|(i, sighting)| {
                    let style = if i == app.view.selected() {
                        selected_style
                    } else {
                        Style::default().fg(animal_color(sighting.animal))
                    };
                    let position = if sighting.position().is_some() { "" } else { " ?" };
                    Row::new(vec![
                        Cell::from(sighting.animal.glyph().to_string()),
                        Cell::from(format!("{}{position}", sighting.animal.label())),
                        Cell::from(format!("x{}", sighting.count)),
                        Cell::from(sighting.clock()),
                        Cell::from(sighting.reported_by.clone()),
                    ])
                    .style(style)
                })
                .collect::<Vec<_>>();
            let widths = vec![
                Constraint::Length(1),
                Constraint::Length(11),
                Constraint::Length(5),
                Constraint::Length(6),
                Constraint::Min(6),
            ];
            (header, rows, widths)
        }
        Tab::Alerts => {
            let header = Row::new(["", "Type", "ID", "Time", "By"]);
            let rows = app
                .view
                .alerts()
                .iter()
                .enumerate()
                .skip(offset)
                .take(max_visible_rows)
                .map(|(i, alert)| {
                    let style = if i == app.view.selected() {
                        selected_style
                    } else {
                        Style::default().fg(alert_color(alert.kind))
                    };
                    Row::new(vec![
                        Cell::from(alert.kind.glyph().to_string()),
                        Cell::from(alert.kind.label()),
                        Cell::from(format!("#{}", alert.id)),
                        Cell::from(alert.clock()),
                        Cell::from(alert.reported_by.clone()),
                    ])
                    .style(style)
                })
                .collect::<Vec<_>>();
            let widths = vec![
                Constraint::Length(1),
                Constraint::Length(11),
                Constraint::Length(6),
                Constraint::Length(6),
                Constraint::Min(6),
            ];
            (header, rows, widths)
        }
    };

    let table = Table::new(rows, widths)
        .header(header.style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)))
        .block(block)
        .column_spacing(1);

    f.render_widget(table, area);
}
