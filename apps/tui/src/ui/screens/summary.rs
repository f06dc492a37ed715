use crate::app::App;
use crate::ui::widgets::charts::{render_alert_kinds, render_animal_totals, render_daily_chart};
use crate::ui::widgets::map::animal_color;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};
use ratatui::Frame;
use wildtrails_ops::summary::{self, SpeciesSummary};
use wildtrails_ops::AnimalKind;

pub fn render_summary(app: &App, f: &mut Frame<'_>) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Scope and animal tabs
            Constraint::Length(5), // Cards
            Constraint::Min(8),    // Daily chart
            Constraint::Length(9), // Totals
            Constraint::Length(1), // Shortcuts
        ])
        .split(f.area().inner(Margin::new(1, 0)));

    let scope = app.summary_scope();
    let animal = app.summary_animal();
    let stats = summary::summarize(app.view.sightings(), animal, scope);

    render_header(app, f, layout[0], &stats);
    render_cards(&stats, f, layout[1]);
    render_daily_chart(&stats, f, layout[2]);

    let totals = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(layout[3]);
    render_animal_totals(&summary::totals_by_animal(app.view.sightings()), f, totals[0]);
    render_alert_kinds(&summary::alerts_by_kind(app.view.alerts()), f, totals[1]);

    render_shortcuts(f, layout[4]);
}

fn render_header(app: &App, f: &mut Frame<'_>, area: Rect, stats: &SpeciesSummary) {
    let block = Block::default()
        .title(format!(" Summary: {} ", stats.scope))
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let titles = AnimalKind::ALL
        .iter()
        .map(|animal| {
            TextLine::from(Span::styled(
                animal.label(),
                Style::default().fg(animal_color(*animal)),
            ))
        })
        .collect::<Vec<_>>();

    let tabs = Tabs::new(titles)
        .block(block)
        .select(app.summary_animal_index)
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        )
        .divider(Span::raw("|"));
    f.render_widget(tabs, area);
}

fn card(title: &str, value: String, color: Color, f: &mut Frame<'_>, area: Rect) {
    let paragraph = Paragraph::new(vec![
        TextLine::from(""),
        TextLine::from(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .title(format!(" {title} "))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(paragraph, area);
}

fn render_cards(stats: &SpeciesSummary, f: &mut Frame<'_>, area: Rect) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);
    let color = animal_color(stats.animal);

    card("Total", stats.total.to_string(), color, f, cards[0]);
    card("Daily Average", format!("{:.1}", stats.average), color, f, cards[1]);

    let peak = stats.peak.map_or_else(
        || "-".to_string(),
        |day| format!("{} on {}", day.count, day.date.format("%d %b")),
    );
    card("Peak Day", peak, color, f, cards[2]);

    let hotspot = stats
        .hotspot
        .map_or_else(|| "-".to_string(), |point| point.gps_label());
    card("Hotspot", hotspot, color, f, cards[3]);
}

fn render_shortcuts(f: &mut Frame<'_>, area: Rect) {
    let key = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let text = Style::default().fg(Color::Gray);
    let line = TextLine::from(vec![
        Span::styled("Up/Down", key),
        Span::styled(": Animal | ", text),
        Span::styled("Left/Right", key),
        Span::styled(": Period | ", text),
        Span::styled("v", key),
        Span::styled(": Month/Day | ", text),
        Span::styled("Home", key),
        Span::styled(": Latest | ", text),
        Span::styled("Esc", key),
        Span::styled(": Map | ", text),
        Span::styled("q", key),
        Span::styled(": Quit", text),
    ]);
    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}
