use color_eyre::eyre::eyre;
use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::Stdout;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use wildtrails_ops::api::Sighting;
use wildtrails_ops::config::AppConfig;
use wildtrails_ops::map::CanvasSurface;
use wildtrails_ops::poller::{poll_once, PollEvent};
use wildtrails_ops::summary::{alerts_by_kind, summarize, totals_by_animal, SpeciesSummary, SummaryScope};
use wildtrails_ops::{AnimalKind, ApiClient, MapView};

use crate::app::{handle_input, App, AppEvent};
use crate::ui;

const RECENT_LIMIT: usize = 5;

/// Poll once and print what came back instead of starting the console.
pub async fn run_headless(config: &AppConfig, json: bool) -> Result<()> {
    let client = ApiClient::new(config.api_config())?;
    let (tx, mut rx) = mpsc::unbounded_channel::<PollEvent>();
    poll_once(&client, &tx).await;
    drop(tx);

    let mut view = MapView::new(CanvasSurface::new(), config.home);
    while let Some(event) = rx.recv().await {
        view.apply_poll_event(event);
    }
    if let Some(error) = view.auth_error() {
        return Err(eyre!("{error}"));
    }

    let stats = build_headless_stats(&view, client.base_url());
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        render_headless_stats(&stats);
    }
    Ok(())
}

fn render_headless_stats(stats: &HeadlessStats) {
    println!("\nWild Trails Live Stats");
    println!("======================");
    println!("Backend: {}", stats.api_url);
    println!("Sightings loaded: {}", stats.total_sightings);
    println!("Markers drawn: {}", stats.markers_drawn);
    println!("Unresolved alerts: {}", stats.unresolved_alerts);
    for error in &stats.errors {
        println!("Warning: {error}");
    }

    println!("\nAnimals seen:");
    for (animal, count) in &stats.by_animal {
        println!("- {animal}: {count}");
    }

    println!("\nAlerts by type:");
    for (kind, count) in &stats.alerts_by_kind {
        println!("- {kind}: {count}");
    }

    println!("\nMonthly summary ({}):", stats.scope);
    for summary in &stats.summaries {
        let peak = summary.peak.map_or_else(
            || "n/a".to_string(),
            |p| format!("{} ({})", p.count, p.date.format("%d %b")),
        );
        println!(
            "- {}: total {} | avg/day {:.1} | peak {}",
            summary.animal.label(),
            summary.total,
            summary.average,
            peak
        );
    }

    println!("\nRecent sightings:");
    for sighting in &stats.recent_sightings {
        println!(
            "- {} | {} x{} | {} | {}",
            sighting.id, sighting.animal, sighting.count, sighting.time, sighting.reported_by
        );
    }
}

fn build_headless_stats(view: &MapView<CanvasSurface>, api_url: &str) -> HeadlessStats {
    let sightings = view.sightings();
    let scope = SummaryScope::latest_month(sightings, chrono::Local::now().date_naive());

    let mut recent = sightings.iter().collect::<Vec<_>>();
    recent.sort_by(|a, b| b.observed_at.cmp(&a.observed_at));
    let recent_sightings = recent
        .into_iter()
        .take(RECENT_LIMIT)
        .map(HeadlessSighting::from)
        .collect();

    HeadlessStats {
        api_url: api_url.to_string(),
        total_sightings: sightings.len(),
        markers_drawn: view.surface().len(),
        unresolved_alerts: view.unresolved_count(),
        errors: view.fetch_error().map(ToString::to_string).into_iter().collect(),
        by_animal: totals_by_animal(sightings)
            .into_iter()
            .map(|(animal, count)| (animal.as_str().to_string(), count))
            .collect(),
        alerts_by_kind: alerts_by_kind(view.alerts())
            .into_iter()
            .map(|(kind, count)| (kind.as_str().to_string(), count))
            .collect(),
        scope: scope.to_string(),
        summaries: AnimalKind::ALL
            .iter()
            .map(|animal| summarize(sightings, *animal, scope))
            .collect(),
        recent_sightings,
    }
}

#[derive(serde::Serialize)]
struct HeadlessStats {
    api_url: String,
    total_sightings: usize,
    markers_drawn: usize,
    unresolved_alerts: usize,
    errors: Vec<String>,
    by_animal: Vec<(String, u64)>,
    alerts_by_kind: Vec<(String, usize)>,
    scope: String,
    summaries: Vec<SpeciesSummary>,
    recent_sightings: Vec<HeadlessSighting>,
}

#[derive(serde::Serialize)]
struct HeadlessSighting {
    id: i64,
    animal: String,
    count: u32,
    time: String,
    reported_by: String,
}

impl From<&Sighting> for HeadlessSighting {
    fn from(sighting: &Sighting) -> Self {
        Self {
            id: sighting.id,
            animal: sighting.animal.as_str().to_string(),
            count: sighting.count,
            time: sighting.clock(),
            reported_by: sighting.reported_by.clone(),
        }
    }
}

/// Main console loop: drain background events, draw, then wait briefly for
/// a key press.
pub async fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    mut events: UnboundedReceiver<AppEvent>,
) -> Result<()> {
    const EVENT_POLL_TIMEOUT: u64 = 50;

    loop {
        while let Ok(event) = events.try_recv() {
            app.apply(event);
        }
        app.update();

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(eyre!("Terminal draw error: {e}"));
        }

        if matches!(
            event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    handle_input(app, key.code);
                    if !app.running {
                        break;
                    }
                }
                Ok(Event::Resize(_, _)) => {
                    if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
                        tracing::warn!(error = %e, "redraw after resize failed");
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::warn!(error = %e, "failed to read terminal event"),
            }
        }
    }
    Ok(())
}
