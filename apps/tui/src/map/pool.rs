use crate::domain::MarkerKey;
use crate::map::surface::{MapSurface, MarkerAction, MarkerSpec};
use std::collections::BTreeMap;

#[derive(Debug)]
struct PooledMarker<H> {
    handle: H,
    action: MarkerAction,
}

/// Live markers keyed by entity. `create` and `destroy` are the only ways
/// in or out, and both go through the surface so the pool never holds a
/// handle the surface no longer draws.
#[derive(Debug)]
pub struct MarkerPool<H> {
    markers: BTreeMap<MarkerKey, PooledMarker<H>>,
}

impl<H> Default for MarkerPool<H> {
    fn default() -> Self {
        Self {
            markers: BTreeMap::new(),
        }
    }
}

impl<H> MarkerPool<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn contains(&self, key: &MarkerKey) -> bool {
        self.markers.contains_key(key)
    }

    /// Keys in ascending order; sightings sort before alerts.
    pub fn keys(&self) -> impl Iterator<Item = &MarkerKey> + '_ {
        self.markers.keys()
    }

    pub fn handle(&self, key: &MarkerKey) -> Option<&H> {
        self.markers.get(key).map(|marker| &marker.handle)
    }

    /// Action attached to the marker when it was created.
    pub fn action(&self, key: &MarkerKey) -> Option<MarkerAction> {
        self.markers.get(key).map(|marker| marker.action)
    }

    /// Draws a marker for `spec` unless one already exists for its key.
    pub fn create<S>(&mut self, surface: &mut S, spec: &MarkerSpec) -> bool
    where
        S: MapSurface<Handle = H>,
    {
        if self.markers.contains_key(&spec.key) {
            return false;
        }
        let handle = surface.create_marker(spec);
        self.markers.insert(
            spec.key,
            PooledMarker {
                handle,
                action: spec.action,
            },
        );
        true
    }

    /// Detaches the marker for `key` from the surface and forgets it.
    pub fn destroy<S>(&mut self, surface: &mut S, key: &MarkerKey) -> bool
    where
        S: MapSurface<Handle = H>,
    {
        match self.markers.remove(key) {
            Some(marker) => {
                surface.remove_marker(marker.handle);
                true
            }
            None => false,
        }
    }
}
