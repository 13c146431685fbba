//! Browser clock report.

use serde::{Deserialize, Serialize};

/// Snapshot of the browser's local clock, posted to `/browsertime`.
///
/// The device has no clock source of its own; it anchors its uptime
/// counter to the most recent report. Constructed fresh for every report,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrowserTimeReport {
    /// Milliseconds since the Unix epoch.
    pub timestamp: f64,

    /// IANA timezone name, e.g. "America/Chicago".
    pub timezone: String,

    /// UTC offset in minutes, JS `getTimezoneOffset` convention
    /// (positive west of UTC).
    pub offset: i32,

    /// Locale-formatted local time, for the device log.
    #[serde(rename = "localTime")]
    pub local_time: String,

    /// ISO-8601 rendering of `timestamp`.
    #[serde(rename = "isoString")]
    pub iso_string: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_field_names_match_device() {
        let report = BrowserTimeReport {
            timestamp: 1_700_000_000_000.0,
            timezone: "America/Chicago".to_string(),
            offset: 360,
            local_time: "11/14/2023, 4:13:20 PM".to_string(),
            iso_string: "2023-11-14T22:13:20.000Z".to_string(),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["timestamp"], 1_700_000_000_000.0);
        assert_eq!(json["timezone"], "America/Chicago");
        assert_eq!(json["offset"], 360);
        assert_eq!(json["localTime"], "11/14/2023, 4:13:20 PM");
        assert_eq!(json["isoString"], "2023-11-14T22:13:20.000Z");
    }

    #[test]
    fn round_trips() {
        let report = BrowserTimeReport {
            timestamp: 0.0,
            timezone: "UTC".to_string(),
            offset: 0,
            local_time: "1/1/1970, 12:00:00 AM".to_string(),
            iso_string: "1970-01-01T00:00:00.000Z".to_string(),
        };
        let back: BrowserTimeReport =
            serde_json::from_str(&serde_json::to_string(&report).unwrap()).unwrap();
        assert_eq!(back, report);
    }
}
