use crate::app::{App, Focus};
use crate::ui::widgets::map::render_map;
use crate::ui::widgets::sidebar::render_sidebar;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs, Wrap};
use ratatui::Frame;
use throbber_widgets_tui::{Throbber, WhichUse, BRAILLE_SIX};
use wildtrails_ops::Tab;

pub fn render_dashboard(app: &App, f: &mut Frame<'_>) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tabs
            Constraint::Min(8),    // Sidebar and map
            Constraint::Length(3), // Status
            Constraint::Length(1), // Shortcuts
        ])
        .split(f.area().inner(Margin::new(1, 0)));

    render_header(app, f, layout[0]);
    if let Some(message) = app.view.auth_error() {
        render_auth_panel(app, message, f, layout[1]);
    } else {
        render_body(app, f, layout[1]);
    }
    render_status(app, f, layout[2]);
    render_shortcuts(f, layout[3]);
}

fn render_header(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(" Wild Trails Live Map ")
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(24)])
        .split(inner);

    let unresolved = app.view.unresolved_count();
    let alerts_title = if unresolved > 0 {
        TextLine::from(vec![
            Span::raw("SOS & Alerts "),
            Span::styled(
                format!("({unresolved})"),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
        ])
    } else {
        TextLine::from("SOS & Alerts")
    };
    let tabs = Tabs::new(vec![TextLine::from(Tab::Sightings.label()), alerts_title])
        .select(app.view.active_tab().index())
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )
        .divider(Span::raw("|"));
    f.render_widget(tabs, columns[0]);

    if app.view.is_loading() {
        let throbber = Throbber::default()
            .label("Loading...")
            .style(Style::default().fg(Color::Gray))
            .throbber_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .throbber_set(BRAILLE_SIX)
            .use_type(WhichUse::Spin);
        let mut state = app.throbber.clone();
        f.render_stateful_widget(throbber, columns[1], &mut state);
    } else {
        let updated = app.view.last_refresh().map_or_else(
            || "Waiting for data".to_string(),
            |at| format!("Updated {}", at.format("%H:%M:%S")),
        );
        let paragraph = Paragraph::new(Span::styled(updated, Style::default().fg(Color::Gray)))
            .alignment(Alignment::Right);
        f.render_widget(paragraph, columns[1]);
    }
}

fn render_body(app: &App, f: &mut Frame<'_>, area: Rect) {
    if !app.view.sidebar_open() {
        render_map(app, f, area, true);
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(46), Constraint::Min(20)])
        .split(area);
    render_sidebar(app, f, columns[0], app.focus == Focus::Sidebar);
    render_map(app, f, columns[1], app.focus == Focus::Map);
}

fn render_auth_panel(app: &App, message: &str, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(" Authentication required ")
        .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let lines = vec![
        TextLine::from(""),
        TextLine::from(Span::styled(
            "Authentication required",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        TextLine::from(""),
        TextLine::from(message.to_string()),
        TextLine::from(Span::styled(
            format!("Backend: {}", app.actions.base_url()),
            Style::default().fg(Color::Gray),
        )),
        TextLine::from(""),
        TextLine::from(vec![
            Span::raw("Sign in again and save the token to "),
            Span::styled(
                app.token_file.display().to_string(),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        TextLine::from(vec![
            Span::raw("or set "),
            Span::styled("WILDTRAILS_TOKEN", Style::default().fg(Color::Yellow)),
            Span::raw(", then press "),
            Span::styled(
                "r",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" to retry."),
        ]),
    ];

    let paragraph = Paragraph::new(Text::from(lines))
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn render_status(app: &App, f: &mut Frame<'_>, area: Rect) {
    let status_block = Block::default()
        .title(" Status ")
        .title_style(Style::default().fg(Color::Yellow))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let status_text = if let Some(error) = app.view.fetch_error() {
        Span::styled(
            format!("Showing last known data: {error}"),
            Style::default().fg(Color::Red),
        )
    } else if app.status_message.is_empty() {
        Span::styled(
            format!(
                "{} sightings, {} open alerts, {} markers, refresh every {}s",
                app.view.sightings().len(),
                app.view.unresolved_count(),
                app.view.pool().len(),
                app.poll_interval.as_secs()
            ),
            Style::default().fg(Color::Gray),
        )
    } else {
        Span::styled(app.status_message.as_str(), Style::default().fg(Color::Green))
    };

    let paragraph = Paragraph::new(status_text)
        .block(status_block)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn render_shortcuts(f: &mut Frame<'_>, area: Rect) {
    let key = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let text = Style::default().fg(Color::Gray);
    let line = TextLine::from(vec![
        Span::styled("?", key),
        Span::styled(": Help | ", text),
        Span::styled("1/2", key),
        Span::styled(": Tabs | ", text),
        Span::styled("Tab", key),
        Span::styled(": Focus | ", text),
        Span::styled("Enter", key),
        Span::styled(": Locate | ", text),
        Span::styled("d", key),
        Span::styled(": Delete/Resolve | ", text),
        Span::styled("s", key),
        Span::styled(": Summary | ", text),
        Span::styled("r", key),
        Span::styled(": Refresh | ", text),
        Span::styled("q", key),
        Span::styled(": Quit", text),
    ]);
    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}
