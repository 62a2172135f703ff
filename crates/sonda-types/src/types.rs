//! Wire records exchanged with the REST backend.
//!
//! Field names on the wire are the backend's Spanish column names; the structs
//! here expose English fields and let serde do the renaming. All records are
//! immutable once fetched: the backend is the system of record and local
//! copies are replaced wholesale on every poll cycle.

use core::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

/// Origin of a LED or button state change.
///
/// The backend stores `"HARDWARE"` or `"WEB"`; the ESP32 firmware also emits
/// the short form `"HW"`, which deserializes to [`Source::Hardware`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Source {
    /// Change triggered by a physical button on the device.
    #[serde(rename = "HARDWARE", alias = "HW")]
    Hardware,
    /// Change triggered through the web/CLI client.
    #[serde(rename = "WEB")]
    Web,
    /// Any wire value this client does not recognize.
    #[serde(other, rename = "UNKNOWN")]
    Unknown,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Hardware => write!(f, "HARDWARE"),
            Source::Web => write!(f, "WEB"),
            Source::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// One ultrasonic distance sample.
///
/// Returned by the backend ordered by timestamp descending (newest first).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Database row id.
    pub id: i64,
    /// Sensor model tag, e.g. `"HC-SR05"`.
    #[serde(rename = "tipo")]
    pub device_type: String,
    /// Measured distance in centimeters. Non-negative.
    #[serde(rename = "valor", deserialize_with = "lenient_f64")]
    pub value: f64,
    /// Capture time as reported by the backend (naive local ISO-8601).
    #[serde(rename = "fecha")]
    pub timestamp: String,
}

/// Current state of one LED.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedState {
    pub id: i64,
    /// Display name, e.g. `"LED Rojo"`.
    #[serde(rename = "nombre")]
    pub name: String,
    /// Display color hint (CSS color string).
    #[serde(default)]
    pub color: String,
    #[serde(rename = "estado")]
    pub on: bool,
}

/// Current state of one physical button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonState {
    pub id: i64,
    #[serde(rename = "nombre", default)]
    pub name: String,
    #[serde(rename = "estado")]
    pub on: bool,
}

/// One append-only record of a LED state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedHistoryEntry {
    pub id: i64,
    /// Id of the LED that changed. Non-owning reference; the client trusts
    /// the backend to keep it consistent.
    #[serde(rename = "led_id")]
    pub device_id: i64,
    /// Username that triggered the change.
    #[serde(rename = "usuario")]
    pub actor: String,
    #[serde(rename = "estado")]
    pub on: bool,
    #[serde(rename = "fuente")]
    pub source: Source,
    #[serde(rename = "fecha")]
    pub timestamp: String,
}

/// One append-only record of a button state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonHistoryEntry {
    pub id: i64,
    #[serde(rename = "pulsador_id")]
    pub device_id: i64,
    #[serde(rename = "usuario")]
    pub actor: String,
    #[serde(rename = "estado")]
    pub on: bool,
    #[serde(rename = "fuente")]
    pub source: Source,
    #[serde(rename = "fecha")]
    pub timestamp: String,
}

/// One audit-log event (logins, toggles, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    #[serde(rename = "accion")]
    pub action: String,
    #[serde(rename = "detalles", default)]
    pub details: String,
    #[serde(rename = "usuario")]
    pub actor: String,
    #[serde(rename = "fecha")]
    pub timestamp: String,
}

/// Summary statistics over a set of readings.
///
/// Either fetched precomputed from `/sensores/estadisticas` or derived
/// locally with [`crate::stats::compute_statistics`]. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Statistics {
    #[serde(rename = "total")]
    pub total_count: u64,
    #[serde(rename = "promedio")]
    pub mean: f64,
    #[serde(rename = "minimo")]
    pub min: f64,
    #[serde(rename = "maximo")]
    pub max: f64,
}

/// Authenticated user profile as returned by the login endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Accept a JSON number or a numeric string.
///
/// The backend's numeric columns round-trip through a layer that sometimes
/// serializes them as strings, so `"valor": "12.50"` and `"valor": 12.5`
/// must both decode.
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        String(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) => s.trim().parse::<f64>().map_err(serde::de::Error::custom),
    }
}

/// Parse a backend timestamp into a naive (civil) datetime.
///
/// The backend writes `datetime.now().isoformat()`, a naive local ISO-8601
/// string such as `2026-03-14T09:26:53.589793`, but offset-bearing RFC 3339
/// also appears on some deployments. Offsets are truncated to their civil
/// component; all comparisons happen in local civil time, which matches how
/// the original dashboard compared dates.
///
/// Returns `None` for anything unparseable; callers treat such records as
/// undated.
pub fn parse_timestamp(raw: &str) -> Option<PrimitiveDateTime> {
    if let Ok(odt) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(PrimitiveDateTime::new(odt.date(), odt.time()));
    }

    let naive_formats = [
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond]"),
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    ];
    naive_formats
        .iter()
        .find_map(|fmt| PrimitiveDateTime::parse(raw, fmt).ok())
}

/// Render a backend timestamp for display as `DD/MM/YYYY HH:MM:SS`.
///
/// Unparseable timestamps are shown verbatim rather than dropped; display
/// is best-effort, only filtering excludes undated records.
pub fn display_timestamp(raw: &str) -> String {
    let fmt = format_description!("[day]/[month]/[year] [hour]:[minute]:[second]");
    match parse_timestamp(raw).and_then(|dt| dt.format(fmt).ok()) {
        Some(s) => s,
        None => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn reading_decodes_spanish_fields() {
        let json = r#"{"id": 7, "tipo": "HC-SR05", "valor": 42.5, "fecha": "2026-01-02T03:04:05.123456"}"#;
        let reading: SensorReading = serde_json::from_str(json).unwrap();
        assert_eq!(reading.id, 7);
        assert_eq!(reading.device_type, "HC-SR05");
        assert_eq!(reading.value, 42.5);
    }

    #[test]
    fn reading_accepts_string_value() {
        let json = r#"{"id": 1, "tipo": "HC-SR05", "valor": "12.50", "fecha": "2026-01-02T03:04:05"}"#;
        let reading: SensorReading = serde_json::from_str(json).unwrap();
        assert_eq!(reading.value, 12.5);
    }

    #[test]
    fn source_accepts_short_hardware_form() {
        assert_eq!(
            serde_json::from_str::<Source>("\"HW\"").unwrap(),
            Source::Hardware
        );
        assert_eq!(
            serde_json::from_str::<Source>("\"HARDWARE\"").unwrap(),
            Source::Hardware
        );
        assert_eq!(
            serde_json::from_str::<Source>("\"WEB\"").unwrap(),
            Source::Web
        );
        assert_eq!(
            serde_json::from_str::<Source>("\"MQTT\"").unwrap(),
            Source::Unknown
        );
    }

    #[test]
    fn source_serializes_wire_form() {
        assert_eq!(serde_json::to_string(&Source::Web).unwrap(), "\"WEB\"");
    }

    #[test]
    fn led_history_decodes() {
        let json = r#"{"id": 3, "led_id": 1, "usuario": "ana", "estado": true, "fuente": "HW", "fecha": "2026-01-02T03:04:05"}"#;
        let entry: LedHistoryEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.device_id, 1);
        assert_eq!(entry.source, Source::Hardware);
        assert!(entry.on);
    }

    #[test]
    fn statistics_decodes_spanish_fields() {
        let json = r#"{"total": 10, "promedio": 25.0, "minimo": 3.1, "maximo": 99.9}"#;
        let stats: Statistics = serde_json::from_str(json).unwrap();
        assert_eq!(stats.total_count, 10);
        assert_eq!(stats.mean, 25.0);
    }

    #[test]
    fn parse_naive_isoformat() {
        let dt = parse_timestamp("2026-03-14T09:26:53.589793").unwrap();
        assert_eq!(dt.date(), datetime!(2026-03-14 00:00).date());
        assert_eq!(dt.hour(), 9);
    }

    #[test]
    fn parse_without_subseconds() {
        assert!(parse_timestamp("2026-03-14T09:26:53").is_some());
    }

    #[test]
    fn parse_rfc3339_truncates_offset() {
        let dt = parse_timestamp("2026-03-14T09:26:53+05:00").unwrap();
        assert_eq!(dt.hour(), 9);
    }

    #[test]
    fn parse_garbage_is_none() {
        assert!(parse_timestamp("ayer").is_none());
        assert!(parse_timestamp("").is_none());
    }

    #[test]
    fn display_formats_day_first() {
        assert_eq!(
            display_timestamp("2026-03-14T09:26:53.589793"),
            "14/03/2026 09:26:53"
        );
    }

    #[test]
    fn display_falls_back_to_raw() {
        assert_eq!(display_timestamp("n/a"), "n/a");
    }
}
