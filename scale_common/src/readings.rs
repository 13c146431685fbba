//! Sensor reading payloads.

use serde::{Deserialize, Deserializer, Serialize};

/// A single load-cell measurement from the device.
///
/// Served by `GET /readings` and embedded in every `new_readings` stream
/// event. `last_update` is in milliseconds, but the device may report
/// either a calendar epoch value or a small uptime counter; the client
/// disambiguates by magnitude.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Scaled load-cell value (the firmware maps raw counts to 0-100).
    #[serde(deserialize_with = "f64_lenient")]
    pub loadcell: f64,

    /// Units label, e.g. "%" or "kg".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,

    /// Milliseconds of the last device-side update. Calendar epoch when
    /// the device has synced time, uptime counter otherwise.
    #[serde(
        rename = "lastUpdate",
        default,
        deserialize_with = "opt_f64_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_update: Option<f64>,
}

/// Payload of a `new_readings` server-sent event.
///
/// Same shape as [`Reading`] plus a server-side event timestamp used only
/// for client-side delta logging. The firmware omits `time` in practice,
/// so it is optional in the schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamEvent {
    /// Server-side timestamp of the event, milliseconds.
    #[serde(
        default,
        deserialize_with = "opt_f64_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub time: Option<f64>,

    #[serde(flatten)]
    pub reading: Reading,
}

/// Accept a JSON number or a numeric string.
///
/// The firmware serializes readings as `String(loadcell)`, so the wire
/// carries `"loadcell": "42"`; older builds sent plain numbers.
fn f64_lenient<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumOrStr {
        Num(f64),
        Str(String),
    }

    match NumOrStr::deserialize(deserializer)? {
        NumOrStr::Num(n) => Ok(n),
        NumOrStr::Str(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid numeric string: {:?}", s))),
    }
}

fn opt_f64_lenient<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Wrapper(#[serde(deserialize_with = "f64_lenient")] f64);

    Ok(Option::<Wrapper>::deserialize(deserializer)?.map(|w| w.0))
}
