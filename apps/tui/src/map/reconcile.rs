use crate::api::{Alert, Sighting};
use crate::domain::{MarkerKey, Tab};
use crate::map::pool::MarkerPool;
use crate::map::surface::{MapSurface, Plottable};
use std::collections::HashSet;

/// What a reconciliation pass changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub added: Vec<MarkerKey>,
    pub removed: Vec<MarkerKey>,
    pub skipped: Vec<MarkerKey>,
}

impl ReconcileReport {
    pub fn is_noop(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Brings `pool` in line with the entities of the active tab.
///
/// Markers are created for entities that have none yet, destroyed for keys
/// that are no longer wanted, and left alone otherwise. Entities without a
/// usable position are skipped and never get a marker, so a marker whose
/// entity lost its coordinates is removed too.
pub fn reconcile<S: MapSurface>(
    tab: Tab,
    sightings: &[Sighting],
    alerts: &[Alert],
    pool: &mut MarkerPool<S::Handle>,
    surface: &mut S,
) -> ReconcileReport {
    let mut report = ReconcileReport::default();

    let wanted = match tab {
        Tab::Sightings => add_missing(sightings, pool, surface, &mut report),
        Tab::Alerts => add_missing(alerts, pool, surface, &mut report),
    };

    let stale = pool
        .keys()
        .filter(|key| !wanted.contains(key))
        .copied()
        .collect::<Vec<_>>();
    for key in stale {
        if pool.destroy(surface, &key) {
            report.removed.push(key);
        }
    }

    if !report.is_noop() {
        tracing::debug!(
            tab = tab.as_str(),
            added = report.added.len(),
            removed = report.removed.len(),
            skipped = report.skipped.len(),
            "markers reconciled"
        );
    }
    report
}

fn add_missing<T, S>(
    items: &[T],
    pool: &mut MarkerPool<S::Handle>,
    surface: &mut S,
    report: &mut ReconcileReport,
) -> HashSet<MarkerKey>
where
    T: Plottable,
    S: MapSurface,
{
    let mut wanted = HashSet::with_capacity(items.len());
    for item in items {
        let key = item.marker_key();
        let Some(position) = item.marker_position() else {
            tracing::warn!(%key, "invalid coordinates, marker skipped");
            report.skipped.push(key);
            continue;
        };
        wanted.insert(key);
        if !pool.contains(&key) && pool.create(surface, &item.marker_spec(position)) {
            report.added.push(key);
        }
    }
    wanted
}
