//! Browser-bound tests, run with `wasm-pack test --headless`.

#![cfg(target_arch = "wasm32")]

use leptos::prelude::*;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

use scale_app::clock;
use scale_app::stream::{EventStreamManager, Reading, StreamEvent};

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn browser_time_report_is_coherent() {
    let before = js_sys::Date::now();
    let report = clock::capture_browser_time();
    let after = js_sys::Date::now();

    assert!(report.timestamp >= before);
    assert!(report.timestamp <= after);
    assert!(!report.timezone.is_empty());
    assert!(!report.local_time.is_empty());

    // The ISO string parses back to the same instant.
    let parsed = js_sys::Date::new(&JsValue::from_str(&report.iso_string));
    assert_eq!(parsed.get_time(), report.timestamp);
}

#[wasm_bindgen_test]
fn apply_reading_updates_every_surface() {
    let manager = EventStreamManager::new();
    manager.apply_reading(&Reading {
        loadcell: 42.0,
        units: Some("kg".to_string()),
        last_update: Some(1_700_000_000_000.0),
    });

    assert_eq!(manager.gauge_value.get_untracked(), 42.0);
    assert_eq!(manager.feed_value.get_untracked(), Some(42.0));
    assert_eq!(manager.units.get_untracked(), Some("kg".to_string()));

    // A calendar lastUpdate renders as a formatted date, not a fallback.
    let shown = manager.last_refresh.get_untracked().expect("timestamp shown");
    assert_ne!(shown, "Unknown");
    assert!(shown.contains("2023"));
}

#[wasm_bindgen_test]
fn first_stream_event_applies_without_delta() {
    let manager = EventStreamManager::new();
    manager.handle_stream_event(StreamEvent {
        time: Some(5000.0),
        reading: Reading {
            loadcell: 10.0,
            units: None,
            last_update: None,
        },
    });

    // The reading lands even though there is no previous event time.
    assert_eq!(manager.gauge_value.get_untracked(), 10.0);
    assert_eq!(manager.feed_value.get_untracked(), Some(10.0));
    // Absent optionals leave their surfaces untouched.
    assert_eq!(manager.units.get_untracked(), None);
    assert_eq!(manager.last_refresh.get_untracked(), None);
}

#[wasm_bindgen_test]
fn uptime_counter_shows_browser_time() {
    let manager = EventStreamManager::new();
    manager.apply_reading(&Reading {
        loadcell: 1.0,
        units: None,
        last_update: Some(5321.0),
    });

    // A small uptime counter is replaced by the current browser time.
    let shown = manager.last_refresh.get_untracked().expect("timestamp shown");
    let year = js_sys::Date::new_0().get_full_year().to_string();
    assert!(shown.contains(&year));
}
