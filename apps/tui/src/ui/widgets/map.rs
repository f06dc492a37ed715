use crate::app::App;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::canvas::{Canvas, Circle, Line as CanvasLine};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use wildtrails_ops::map::{Glyph, MarkerTone};
use wildtrails_ops::{AlertKind, AnimalKind};

pub const fn animal_color(animal: AnimalKind) -> Color {
    match animal {
        AnimalKind::Elephant => Color::Rgb(42, 157, 143),
        AnimalKind::Leopard => Color::Rgb(233, 196, 106),
        AnimalKind::Bear => Color::Rgb(38, 70, 83),
        AnimalKind::Bird => Color::Rgb(244, 162, 97),
        AnimalKind::Other => Color::Rgb(231, 111, 81),
    }
}

pub const fn alert_color(kind: AlertKind) -> Color {
    match kind {
        AlertKind::Sos => Color::Red,
        AlertKind::Injury => Color::LightRed,
        AlertKind::Danger => Color::Yellow,
        AlertKind::Information => Color::Cyan,
    }
}

pub const fn tone_color(tone: MarkerTone) -> Color {
    match tone {
        MarkerTone::Animal(animal) => animal_color(animal),
        MarkerTone::Alert(kind) => alert_color(kind),
    }
}

/// Draws the marker layer around the current viewport, with a detail strip
/// for the focused marker.
pub fn render_map(app: &App, f: &mut Frame<'_>, area: Rect, focused: bool) {
    let cursor = app.view.marker_cursor();
    let focused_glyph = cursor.and_then(|key| app.view.surface().glyphs().find(|g| g.key == key));

    let (map_area, detail_area) = if focused_glyph.is_some() && area.height > 10 {
        let split = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(6), Constraint::Length(5)])
            .split(area);
        (split[0], Some(split[1]))
    } else {
        (area, None)
    };

    let viewport = app.view.viewport();
    let center = viewport.center;
    let lng_span = viewport.span();
    // Cells are roughly twice as tall as they are wide.
    let aspect = f64::from(map_area.height.max(1)) * 2.0 / f64::from(map_area.width.max(1));
    let lat_span = lng_span * aspect;

    let border = if focused { Color::Green } else { Color::DarkGray };
    let block = Block::default()
        .title(format!(
            " Map  z{}  {:.4}, {:.4} ",
            viewport.zoom, center.lat, center.lng
        ))
        .title_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([center.lng - lng_span, center.lng + lng_span])
        .y_bounds([center.lat - lat_span, center.lat + lat_span])
        .paint(|ctx| {
            let tick = lng_span * 0.04;
            ctx.draw(&CanvasLine {
                x1: center.lng - tick,
                y1: center.lat,
                x2: center.lng + tick,
                y2: center.lat,
                color: Color::DarkGray,
            });
            ctx.draw(&CanvasLine {
                x1: center.lng,
                y1: center.lat - tick * aspect,
                x2: center.lng,
                y2: center.lat + tick * aspect,
                color: Color::DarkGray,
            });
            if let Some(glyph) = focused_glyph {
                ctx.draw(&Circle {
                    x: glyph.position.lng,
                    y: glyph.position.lat,
                    radius: lng_span * 0.05,
                    color: Color::White,
                });
            }
            ctx.layer();

            for glyph in app.view.surface().glyphs() {
                let mut style = Style::default()
                    .fg(tone_color(glyph.tone))
                    .add_modifier(Modifier::BOLD);
                if cursor == Some(glyph.key) {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                ctx.print(
                    glyph.position.lng,
                    glyph.position.lat,
                    Span::styled(glyph.tone.glyph().to_string(), style),
                );
            }
        });

    f.render_widget(canvas, map_area);

    if let (Some(glyph), Some(detail_area)) = (focused_glyph, detail_area) {
        render_marker_detail(glyph, f, detail_area);
    }
}

fn render_marker_detail(glyph: &Glyph, f: &mut Frame<'_>, area: Rect) {
    let color = tone_color(glyph.tone);
    let mut lines = vec![TextLine::from(Span::styled(
        glyph.title.clone(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))];
    lines.extend(glyph.detail.iter().map(|line| TextLine::from(line.clone())));

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(format!(" Marker {} ", glyph.key))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );
    f.render_widget(paragraph, area);
}
