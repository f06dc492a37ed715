use crate::api::{Alert, Sighting};
use crate::domain::{AlertKind, AnimalKind, GeoPoint, MarkerKey};

/// What happens when a marker is activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerAction {
    DeleteSighting(i64),
    ResolveAlert(i64),
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerTone {
    Animal(AnimalKind),
    Alert(AlertKind),
}

impl MarkerTone {
    pub const fn glyph(self) -> char {
        match self {
            Self::Animal(animal) => animal.glyph(),
            Self::Alert(kind) => kind.glyph(),
        }
    }
}

/// Everything a surface needs to draw one marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    pub key: MarkerKey,
    pub position: GeoPoint,
    pub title: String,
    pub detail: Vec<String>,
    pub tone: MarkerTone,
    pub action: MarkerAction,
}

/// A drawing surface that hands out opaque handles for the markers it shows.
pub trait MapSurface {
    type Handle;

    fn create_marker(&mut self, spec: &MarkerSpec) -> Self::Handle;

    fn remove_marker(&mut self, handle: Self::Handle);
}

/// Entities that can be placed on the map.
pub trait Plottable {
    fn marker_key(&self) -> MarkerKey;

    fn marker_position(&self) -> Option<GeoPoint>;

    fn marker_spec(&self, position: GeoPoint) -> MarkerSpec;
}

impl Plottable for Sighting {
    fn marker_key(&self) -> MarkerKey {
        self.key()
    }

    fn marker_position(&self) -> Option<GeoPoint> {
        self.position()
    }

    fn marker_spec(&self, position: GeoPoint) -> MarkerSpec {
        let mut detail = vec![format!("Count: {}", self.count)];
        if let Some(notes) = &self.notes {
            detail.push(notes.clone());
        }
        detail.push(position.gps_label());

        MarkerSpec {
            key: self.key(),
            position,
            title: format!(
                "{} - {} by {}",
                self.animal.label(),
                self.clock(),
                self.reported_by
            ),
            detail,
            tone: MarkerTone::Animal(self.animal),
            action: MarkerAction::DeleteSighting(self.id),
        }
    }
}

impl Plottable for Alert {
    fn marker_key(&self) -> MarkerKey {
        self.key()
    }

    fn marker_position(&self) -> Option<GeoPoint> {
        self.position()
    }

    fn marker_spec(&self, position: GeoPoint) -> MarkerSpec {
        MarkerSpec {
            key: self.key(),
            position,
            title: format!(
                "{} alert - ID {} by {}",
                self.kind.label(),
                self.id,
                self.reported_by
            ),
            detail: vec![
                format!("{} ({})", self.clock(), self.status_label()),
                self.details_text().to_string(),
                position.gps_label(),
            ],
            tone: MarkerTone::Alert(self.kind),
            action: if self.solved {
                MarkerAction::None
            } else {
                MarkerAction::ResolveAlert(self.id)
            },
        }
    }
}
