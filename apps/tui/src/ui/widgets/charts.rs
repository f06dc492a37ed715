use chrono::Datelike;
use crate::ui::widgets::map::{alert_color, animal_color};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph,
};
use ratatui::Frame;
use wildtrails_ops::summary::{SpeciesSummary, SummaryScope};
use wildtrails_ops::{AlertKind, AnimalKind};

fn empty_panel(title: &str, message: &str, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let paragraph = Paragraph::new(message.to_string())
        .block(block)
        .alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}

/// Per-day counts for one species. Month scopes draw a trend line, day
/// scopes a single bar.
pub fn render_daily_chart(summary: &SpeciesSummary, f: &mut Frame<'_>, area: Rect) {
    let title = format!("{} per day", summary.animal.label());
    if summary.daily.is_empty() {
        empty_panel(&title, "No sightings in this period", f, area);
        return;
    }

    let color = animal_color(summary.animal);
    if matches!(summary.scope, SummaryScope::Day { .. }) || summary.daily.len() == 1 {
        let bars: Vec<Bar<'_>> = summary
            .daily
            .iter()
            .map(|day| {
                Bar::default()
                    .value(day.count)
                    .label(TextLine::from(day.date.format("%d %b").to_string()))
                    .style(Style::default().fg(color))
                    .value_style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
            })
            .collect();
        let chart = BarChart::default()
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .data(BarGroup::default().bars(&bars))
            .bar_gap(1)
            .bar_width(8);
        f.render_widget(chart, area);
        return;
    }

    #[allow(clippy::cast_precision_loss)]
    let points: Vec<(f64, f64)> = summary
        .daily
        .iter()
        .map(|day| (f64::from(day.date.day0() + 1), day.count as f64))
        .collect();
    let first = points.first().map_or(1.0, |p| p.0);
    let last = points.last().map_or(31.0, |p| p.0);
    let peak = summary.peak.map_or(1, |p| p.count).max(1);

    let datasets = vec![
        Dataset::default()
            .name(summary.animal.label())
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(color))
            .data(&points),
    ];

    #[allow(clippy::cast_precision_loss)]
    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .x_axis(
            Axis::default()
                .title("Day")
                .style(Style::default().fg(Color::Gray))
                .bounds([first, last.max(first + 1.0)])
                .labels(vec![
                    Span::raw(format!("{first:.0}")),
                    Span::raw(format!("{last:.0}")),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("Count")
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, peak as f64])
                .labels(vec![Span::raw("0"), Span::raw(peak.to_string())]),
        );
    f.render_widget(chart, area);
}

pub fn render_animal_totals(totals: &[(AnimalKind, u64)], f: &mut Frame<'_>, area: Rect) {
    if totals.iter().all(|(_, count)| *count == 0) {
        empty_panel("Animals seen", "No sightings loaded", f, area);
        return;
    }

    let bars: Vec<Bar<'_>> = totals
        .iter()
        .map(|(animal, count)| {
            Bar::default()
                .value(*count)
                .label(TextLine::from(animal.label()))
                .style(Style::default().fg(animal_color(*animal)))
                .value_style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
        })
        .collect();
    let max_value = totals.iter().map(|(_, c)| *c).max().unwrap_or(0).max(1);

    let chart = BarChart::default()
        .block(
            Block::default()
                .title("Animals seen")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .data(BarGroup::default().bars(&bars))
        .max(max_value)
        .bar_gap(1)
        .bar_width(8);
    f.render_widget(chart, area);
}

pub fn render_alert_kinds(counts: &[(AlertKind, usize)], f: &mut Frame<'_>, area: Rect) {
    if counts.iter().all(|(_, count)| *count == 0) {
        empty_panel("Open alerts", "No unresolved alerts", f, area);
        return;
    }

    let bars: Vec<Bar<'_>> = counts
        .iter()
        .map(|(kind, count)| {
            Bar::default()
                .value(*count as u64)
                .label(TextLine::from(kind.label()))
                .style(Style::default().fg(alert_color(*kind)))
                .value_style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .title("Open alerts")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_gap(1)
        .bar_width(11);
    f.render_widget(chart, area);
}
