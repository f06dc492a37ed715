use crate::domain::{format_clock, parse_timestamp, AlertKind, AnimalKind, GeoPoint, MarkerKey};
use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Sighting record as returned by `/api/sightings/recent`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSighting {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub sighting_id: Option<i64>,
    pub animal_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub lng: Option<f64>,
    pub date_time: Option<String>,
    pub submitted_by: Option<String>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub count: Option<i64>,
    pub notes: Option<String>,
}

/// Alert record as returned by `/api/sos/unresolved`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAlert {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub alert_id: Option<i64>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub longitude: Option<f64>,
    pub date_time: Option<String>,
    pub timestamp: Option<String>,
    pub driver_name: Option<String>,
    pub reported_by: Option<String>,
    pub details: Option<String>,
    pub solved: Option<bool>,
}

/// A wildlife sighting, normalized for display.
#[derive(Debug, Clone, PartialEq)]
pub struct Sighting {
    pub id: i64,
    pub animal: AnimalKind,
    pub animal_name: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub observed_at: Option<NaiveDateTime>,
    pub observed_raw: String,
    pub reported_by: String,
    pub count: u32,
    pub notes: Option<String>,
}

impl Sighting {
    pub const fn key(&self) -> MarkerKey {
        MarkerKey::Sighting(self.id)
    }

    pub fn position(&self) -> Option<GeoPoint> {
        GeoPoint::from_parts(self.lat, self.lng)
    }

    pub fn clock(&self) -> String {
        format_clock(self.observed_at, &self.observed_raw)
    }
}

impl TryFrom<RawSighting> for Sighting {
    type Error = RawSighting;

    /// Records without an id cannot be keyed and are handed back.
    fn try_from(raw: RawSighting) -> Result<Self, Self::Error> {
        let Some(id) = raw.sighting_id else {
            return Err(raw);
        };
        let animal_name = raw.animal_name.unwrap_or_default();
        let observed_raw = raw.date_time.unwrap_or_default();

        Ok(Self {
            id,
            animal: AnimalKind::normalize(&animal_name),
            animal_name,
            lat: raw.lat,
            lng: raw.lng,
            observed_at: parse_timestamp(&observed_raw),
            observed_raw,
            reported_by: raw.submitted_by.unwrap_or_else(|| "unknown".to_string()),
            count: raw
                .count
                .and_then(|c| u32::try_from(c).ok())
                .filter(|c| *c >= 1)
                .unwrap_or(1),
            notes: raw.notes.filter(|n| !n.trim().is_empty()),
        })
    }
}

/// An SOS or wildlife-danger alert, normalized for display.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub id: i64,
    pub kind: AlertKind,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub reported_at: Option<NaiveDateTime>,
    pub reported_raw: String,
    pub reported_by: String,
    pub details: Option<String>,
    pub solved: bool,
}

impl Alert {
    pub const fn key(&self) -> MarkerKey {
        MarkerKey::Alert(self.id)
    }

    pub fn position(&self) -> Option<GeoPoint> {
        GeoPoint::from_parts(self.lat, self.lng)
    }

    pub fn clock(&self) -> String {
        format_clock(self.reported_at, &self.reported_raw)
    }

    pub fn details_text(&self) -> &str {
        self.details
            .as_deref()
            .unwrap_or("No additional details provided")
    }

    pub const fn status_label(&self) -> &'static str {
        if self.solved {
            "resolved"
        } else {
            "active"
        }
    }
}

impl TryFrom<RawAlert> for Alert {
    type Error = RawAlert;

    fn try_from(raw: RawAlert) -> Result<Self, Self::Error> {
        let Some(id) = raw.alert_id else {
            return Err(raw);
        };
        let reported_raw = raw.date_time.or(raw.timestamp).unwrap_or_default();

        Ok(Self {
            id,
            kind: AlertKind::parse(raw.kind.as_deref()),
            lat: raw.latitude,
            lng: raw.longitude,
            reported_at: parse_timestamp(&reported_raw),
            reported_raw,
            reported_by: raw
                .driver_name
                .or(raw.reported_by)
                .unwrap_or_else(|| "unknown".to_string()),
            details: raw.details.filter(|d| !d.trim().is_empty()),
            solved: raw.solved.unwrap_or(false),
        })
    }
}

/// Normalizes a whole response, dropping records that carry no id.
pub fn normalize_all<R, T>(raw: Vec<R>) -> Vec<T>
where
    T: TryFrom<R, Error = R>,
    R: std::fmt::Debug,
{
    raw.into_iter()
        .filter_map(|record| match T::try_from(record) {
            Ok(entity) => Some(entity),
            Err(record) => {
                tracing::warn!(?record, "dropping record without an id");
                None
            }
        })
        .collect()
}

/// Accepts numbers and numeric strings; anything else becomes `None`.
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }))
}

fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sighting_fields_are_normalized() -> Result<(), serde_json::Error> {
        let raw: Vec<RawSighting> = serde_json::from_value(json!([
            {
                "sightingId": 1,
                "animalName": "Elephant",
                "lat": 6.47,
                "lng": "81.35",
                "dateTime": "2024-05-01T08:00:00",
                "submittedBy": "R1",
                "count": 0,
                "notes": "  "
            },
            { "animalName": "Leopard", "lat": 6.4, "lng": 81.3 }
        ]))?;

        let sightings: Vec<Sighting> = normalize_all(raw);
        assert_eq!(sightings.len(), 1);

        let sighting = &sightings[0];
        assert_eq!(sighting.id, 1);
        assert_eq!(sighting.animal, AnimalKind::Elephant);
        assert_eq!(sighting.lng, Some(81.35));
        assert_eq!(sighting.count, 1);
        assert_eq!(sighting.notes, None);
        assert_eq!(sighting.clock(), "08:00");
        assert_eq!(sighting.key(), MarkerKey::Sighting(1));
        Ok(())
    }

    #[test]
    fn non_numeric_coordinates_survive_as_missing() -> Result<(), serde_json::Error> {
        let raw: RawSighting = serde_json::from_value(json!({
            "sightingId": "9",
            "lat": "north-ish",
            "lng": null
        }))?;

        let sighting = Sighting::try_from(raw).map_err(|_| <serde_json::Error as serde::de::Error>::custom("no id"))?;
        assert_eq!(sighting.id, 9);
        assert_eq!(sighting.position(), None);
        Ok(())
    }

    #[test]
    fn alert_fallback_fields_are_used() -> Result<(), serde_json::Error> {
        let raw: Vec<RawAlert> = serde_json::from_value(json!([
            {
                "alertId": 3,
                "latitude": 6.41,
                "longitude": 81.33,
                "timestamp": "2024-05-01T09:30:00",
                "reportedBy": "Driver K",
                "solved": false
            },
            {
                "alertId": 4,
                "type": "injury",
                "latitude": 6.42,
                "longitude": 81.34,
                "dateTime": "2024-05-01T10:00:00",
                "driverName": "Driver M",
                "details": "Guest twisted ankle"
            }
        ]))?;

        let alerts: Vec<Alert> = normalize_all(raw);
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].kind, AlertKind::Danger);
        assert_eq!(alerts[0].reported_by, "Driver K");
        assert_eq!(alerts[0].clock(), "09:30");
        assert_eq!(alerts[0].details_text(), "No additional details provided");
        assert_eq!(alerts[1].kind, AlertKind::Injury);
        assert_eq!(alerts[1].reported_by, "Driver M");
        assert!(!alerts[1].solved);
        assert_eq!(alerts[1].key(), MarkerKey::Alert(4));
        Ok(())
    }
}
