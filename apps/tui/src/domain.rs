use chrono::{DateTime, Local, NaiveDateTime};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimalKind {
    Elephant,
    Leopard,
    Bear,
    Bird,
    Other,
}

impl AnimalKind {
    pub const ALL: [Self; 5] = [
        Self::Elephant,
        Self::Leopard,
        Self::Bear,
        Self::Bird,
        Self::Other,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Elephant => "elephant",
            Self::Leopard => "leopard",
            Self::Bear => "bear",
            Self::Bird => "bird",
            Self::Other => "other",
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Elephant),
            1 => Some(Self::Leopard),
            2 => Some(Self::Bear),
            3 => Some(Self::Bird),
            4 => Some(Self::Other),
            _ => None,
        }
    }

    /// Maps a free-text animal name reported by a driver onto a category.
    /// Matching is by substring so "Sloth Bear" and "Sri Lankan Elephant" land
    /// in the obvious buckets.
    pub fn normalize(name: &str) -> Self {
        let lower = name.trim().to_lowercase();
        if lower.contains("bear") {
            Self::Bear
        } else if lower.contains("elephant") {
            Self::Elephant
        } else if lower.contains("leopard") {
            Self::Leopard
        } else if lower.contains("bird") {
            Self::Bird
        } else {
            Self::Other
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Elephant => "Elephant",
            Self::Leopard => "Leopard",
            Self::Bear => "Bear",
            Self::Bird => "Bird",
            Self::Other => "Other",
        }
    }

    /// Single-cell glyph used on the map canvas.
    pub const fn glyph(self) -> char {
        match self {
            Self::Elephant => 'E',
            Self::Leopard => 'L',
            Self::Bear => 'B',
            Self::Bird => 'V',
            Self::Other => '*',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Sos,
    Injury,
    Danger,
    Information,
}

impl AlertKind {
    pub const ALL: [Self; 4] = [Self::Sos, Self::Injury, Self::Danger, Self::Information];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sos => "sos",
            Self::Injury => "injury",
            Self::Danger => "danger",
            Self::Information => "information",
        }
    }

    /// Missing or unrecognised alert types are treated as `danger`.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_lowercase()).as_deref() {
            Some("sos") => Self::Sos,
            Some("injury") => Self::Injury,
            Some("information" | "info") => Self::Information,
            _ => Self::Danger,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Sos => "SOS",
            Self::Injury => "Injury",
            Self::Danger => "Danger",
            Self::Information => "Information",
        }
    }

    pub const fn glyph(self) -> char {
        match self {
            Self::Sos => 'S',
            Self::Injury => '+',
            Self::Danger => '!',
            Self::Information => 'i',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Sightings,
    Alerts,
}

impl Tab {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sightings => "sightings",
            Self::Alerts => "alerts",
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Sightings => 0,
            Self::Alerts => 1,
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Sightings),
            1 => Some(Self::Alerts),
            _ => None,
        }
    }

    pub const fn toggle(self) -> Self {
        match self {
            Self::Sightings => Self::Alerts,
            Self::Alerts => Self::Sightings,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Sightings => "Animal Sightings",
            Self::Alerts => "SOS & Alerts",
        }
    }
}

/// Identity of a marker in the shared pool. Alerts and sightings live in
/// separate namespaces so equal numeric ids never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MarkerKey {
    Sighting(i64),
    Alert(i64),
}

impl fmt::Display for MarkerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sighting(id) => write!(f, "{id}"),
            Self::Alert(id) => write!(f, "alert-{id}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    /// Yala National Park, the default map center.
    pub const YALA: Self = Self {
        lat: 6.4698,
        lng: 81.3456,
    };

    /// Builds a point only when both coordinates are finite and on the globe.
    pub fn from_parts(lat: Option<f64>, lng: Option<f64>) -> Option<Self> {
        let (lat, lng) = (lat?, lng?);
        if !lat.is_finite() || !lng.is_finite() {
            return None;
        }
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return None;
        }
        Some(Self { lat, lng })
    }

    pub fn gps_label(self) -> String {
        format!("GPS: {:.4}, {:.4}", self.lat, self.lng)
    }
}

/// Parses backend timestamps into local wall-clock time. Zoned ISO-8601 values
/// are converted to the local zone; zone-less values are taken as local.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(zoned) = DateTime::parse_from_rfc3339(raw) {
        return Some(zoned.with_timezone(&Local).naive_local());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
}

/// `HH:MM` for parsed timestamps, the raw text otherwise.
pub fn format_clock(parsed: Option<NaiveDateTime>, raw: &str) -> String {
    parsed.map_or_else(|| raw.to_string(), |t| t.format("%H:%M").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn animal_names_are_normalized_by_substring() {
        assert_eq!(AnimalKind::normalize("Sloth Bear"), AnimalKind::Bear);
        assert_eq!(AnimalKind::normalize("Elephant"), AnimalKind::Elephant);
        assert_eq!(AnimalKind::normalize(" LEOPARD "), AnimalKind::Leopard);
        assert_eq!(AnimalKind::normalize("tiger"), AnimalKind::Other);
        assert_eq!(AnimalKind::normalize("Hornbill bird"), AnimalKind::Bird);
        assert_eq!(AnimalKind::normalize("Spotted deer"), AnimalKind::Other);
        assert_eq!(AnimalKind::normalize(""), AnimalKind::Other);
    }

    #[test]
    fn alert_kind_defaults_to_danger() {
        assert_eq!(AlertKind::parse(None), AlertKind::Danger);
        assert_eq!(AlertKind::parse(Some("flood")), AlertKind::Danger);
        assert_eq!(AlertKind::parse(Some("SOS")), AlertKind::Sos);
        assert_eq!(AlertKind::parse(Some("information")), AlertKind::Information);
    }

    #[test]
    fn marker_keys_are_namespaced() {
        assert_eq!(MarkerKey::Sighting(7).to_string(), "7");
        assert_eq!(MarkerKey::Alert(7).to_string(), "alert-7");
        assert_ne!(MarkerKey::Sighting(7), MarkerKey::Alert(7));
    }

    #[test]
    fn geo_point_rejects_invalid_coordinates() {
        assert!(GeoPoint::from_parts(Some(6.47), Some(81.35)).is_some());
        assert!(GeoPoint::from_parts(None, Some(81.35)).is_none());
        assert!(GeoPoint::from_parts(Some(f64::NAN), Some(81.35)).is_none());
        assert!(GeoPoint::from_parts(Some(6.47), Some(f64::INFINITY)).is_none());
        assert!(GeoPoint::from_parts(Some(95.0), Some(81.35)).is_none());
    }

    #[test]
    fn clock_formatting_falls_back_to_raw_text() {
        let parsed = parse_timestamp("2024-05-01T08:05:00");
        assert_eq!(format_clock(parsed, "2024-05-01T08:05:00"), "08:05");
        assert!(parse_timestamp("2024-05-01T08:00:00Z").is_some());
        assert_eq!(format_clock(parse_timestamp("yesterday"), "yesterday"), "yesterday");
    }
}
