use crate::domain::{GeoPoint, MarkerKey};
use crate::map::surface::{MapSurface, MarkerSpec, MarkerTone};
use std::collections::BTreeMap;

/// Handle to a glyph drawn on a [`CanvasSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GlyphId(u64);

/// A marker as the terminal map draws it.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    pub key: MarkerKey,
    pub position: GeoPoint,
    pub title: String,
    pub detail: Vec<String>,
    pub tone: MarkerTone,
}

impl From<&MarkerSpec> for Glyph {
    fn from(spec: &MarkerSpec) -> Self {
        Self {
            key: spec.key,
            position: spec.position,
            title: spec.title.clone(),
            detail: spec.detail.clone(),
            tone: spec.tone,
        }
    }
}

/// In-memory marker layer rendered by the map widget each frame.
#[derive(Debug, Default)]
pub struct CanvasSurface {
    glyphs: BTreeMap<GlyphId, Glyph>,
    next_id: u64,
}

impl CanvasSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn get(&self, id: GlyphId) -> Option<&Glyph> {
        self.glyphs.get(&id)
    }

    /// Glyphs in creation order.
    pub fn glyphs(&self) -> impl Iterator<Item = &Glyph> + '_ {
        self.glyphs.values()
    }
}

impl MapSurface for CanvasSurface {
    type Handle = GlyphId;

    fn create_marker(&mut self, spec: &MarkerSpec) -> GlyphId {
        self.next_id += 1;
        let id = GlyphId(self.next_id);
        self.glyphs.insert(id, Glyph::from(spec));
        id
    }

    fn remove_marker(&mut self, handle: GlyphId) {
        if self.glyphs.remove(&handle).is_none() {
            tracing::warn!(?handle, "removing a glyph that is not drawn");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AnimalKind;
    use crate::map::surface::MarkerAction;

    fn spec(id: i64) -> MarkerSpec {
        MarkerSpec {
            key: MarkerKey::Sighting(id),
            position: GeoPoint::YALA,
            title: format!("Elephant - 08:00 by R{id}"),
            detail: vec!["Count: 1".to_string()],
            tone: MarkerTone::Animal(AnimalKind::Elephant),
            action: MarkerAction::DeleteSighting(id),
        }
    }

    #[test]
    fn glyphs_follow_create_and_remove() {
        let mut surface = CanvasSurface::new();
        let first = surface.create_marker(&spec(1));
        let second = surface.create_marker(&spec(2));
        assert_ne!(first, second);
        assert_eq!(surface.len(), 2);

        surface.remove_marker(first);
        assert!(surface.get(first).is_none());
        assert_eq!(
            surface.glyphs().map(|g| g.key).collect::<Vec<_>>(),
            vec![MarkerKey::Sighting(2)]
        );

        surface.remove_marker(first);
        assert_eq!(surface.len(), 1);
    }

    #[test]
    fn handles_are_never_reused() {
        let mut surface = CanvasSurface::new();
        let first = surface.create_marker(&spec(1));
        surface.remove_marker(first);
        let again = surface.create_marker(&spec(1));
        assert_ne!(first, again);
    }
}
