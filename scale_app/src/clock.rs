//! Browser clock capture and timestamp normalization.

use wasm_bindgen::JsValue;

use scale_common::BrowserTimeReport;

/// Epoch milliseconds of 2020-01-01T00:00:00Z. A `lastUpdate` below this
/// cannot be a calendar timestamp from this device; it is the firmware's
/// uptime counter.
pub const CALENDAR_EPOCH_FLOOR_MS: f64 = 1_577_836_800_000.0;

/// What a reported `lastUpdate` value actually means.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LastUpdate {
    /// A genuine calendar timestamp, epoch milliseconds.
    Calendar(f64),
    /// Milliseconds since device boot; no calendar meaning.
    Uptime,
    /// Missing or non-positive; leave the display alone.
    Absent,
}

/// Disambiguate a device `lastUpdate` by magnitude.
pub fn classify_last_update(ms: Option<f64>) -> LastUpdate {
    match ms {
        Some(value) if value >= CALENDAR_EPOCH_FLOOR_MS => LastUpdate::Calendar(value),
        Some(value) if value > 0.0 => LastUpdate::Uptime,
        _ => LastUpdate::Absent,
    }
}

/// Locale-formatted rendering of an epoch-millisecond timestamp, or
/// "Unknown" if the value does not form a valid date.
pub fn format_epoch_ms(ms: f64) -> String {
    let date = js_sys::Date::new(&JsValue::from_f64(ms));
    if date.get_time().is_nan() {
        return "Unknown".to_string();
    }
    date.to_locale_string("default", &JsValue::UNDEFINED).into()
}

/// Locale-formatted current browser time.
pub fn now_local_string() -> String {
    js_sys::Date::new_0()
        .to_locale_string("default", &JsValue::UNDEFINED)
        .into()
}

/// Snapshot the browser clock for a `/browsertime` report.
pub fn capture_browser_time() -> BrowserTimeReport {
    let now = js_sys::Date::new_0();
    BrowserTimeReport {
        timestamp: now.get_time(),
        timezone: browser_timezone(),
        offset: now.get_timezone_offset() as i32,
        local_time: now.to_locale_string("default", &JsValue::UNDEFINED).into(),
        iso_string: now.to_iso_string().into(),
    }
}

/// IANA timezone name from `Intl.DateTimeFormat().resolvedOptions()`.
fn browser_timezone() -> String {
    let options = js_sys::Intl::DateTimeFormat::new(&js_sys::Array::new(), &js_sys::Object::new())
        .resolved_options();
    js_sys::Reflect::get(&options, &JsValue::from_str("timeZone"))
        .ok()
        .and_then(|value| value.as_string())
        .unwrap_or_else(|| "UTC".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calendar_timestamps_pass_through() {
        assert_eq!(
            classify_last_update(Some(1_700_000_000_000.0)),
            LastUpdate::Calendar(1_700_000_000_000.0)
        );
        // The threshold itself is a calendar value.
        assert_eq!(
            classify_last_update(Some(CALENDAR_EPOCH_FLOOR_MS)),
            LastUpdate::Calendar(CALENDAR_EPOCH_FLOOR_MS)
        );
    }

    #[test]
    fn small_positive_values_are_uptime() {
        assert_eq!(classify_last_update(Some(1.0)), LastUpdate::Uptime);
        assert_eq!(classify_last_update(Some(5321.0)), LastUpdate::Uptime);
        assert_eq!(
            classify_last_update(Some(CALENDAR_EPOCH_FLOOR_MS - 1.0)),
            LastUpdate::Uptime
        );
    }

    #[test]
    fn zero_negative_or_missing_are_absent() {
        assert_eq!(classify_last_update(Some(0.0)), LastUpdate::Absent);
        assert_eq!(classify_last_update(Some(-42.0)), LastUpdate::Absent);
        assert_eq!(classify_last_update(None), LastUpdate::Absent);
    }
}
