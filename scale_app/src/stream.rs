use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{EventSource, MessageEvent};

use crate::api;
use crate::clock::{self, LastUpdate};

pub use scale_common::{Reading, StreamEvent};

// ========== Event Stream Manager ==========

/// Session state for the dashboard: the display signals every update path
/// converges on, plus the server-sent-event subscription that drives them.
///
/// Provided once via context at the app root. Both the one-shot fetch and
/// the stream listener feed [`EventStreamManager::apply_reading`]; the last
/// writer wins.
#[derive(Clone, Copy)]
pub struct EventStreamManager {
    /// Event stream is connected.
    pub connected: ReadSignal<bool>,
    set_connected: WriteSignal<bool>,
    /// Target value for the gauge pointer.
    pub gauge_value: ReadSignal<f64>,
    set_gauge_value: WriteSignal<f64>,
    /// Latest load-cell value for the numeric feed. None until the first
    /// reading arrives.
    pub feed_value: ReadSignal<Option<f64>>,
    set_feed_value: WriteSignal<Option<f64>>,
    /// Units label reported by the device.
    pub units: ReadSignal<Option<String>>,
    set_units: WriteSignal<Option<String>>,
    /// Human-readable time of the last device-side update.
    pub last_refresh: ReadSignal<Option<String>>,
    set_last_refresh: WriteSignal<Option<String>>,
    /// Local clock string, refreshed by the time reporter.
    pub local_time: ReadSignal<Option<String>>,
    set_local_time: WriteSignal<Option<String>>,
    /// Timestamp of the previous stream event, for delta logging.
    last_event_time: StoredValue<Option<f64>>,
}

impl EventStreamManager {
    pub fn new() -> Self {
        let (connected, set_connected) = signal(false);
        let (gauge_value, set_gauge_value) = signal(0.0);
        let (feed_value, set_feed_value) = signal(None);
        let (units, set_units) = signal(None);
        let (last_refresh, set_last_refresh) = signal(None);
        let (local_time, set_local_time) = signal(None);
        let last_event_time = StoredValue::new(None);

        let manager = Self {
            connected,
            set_connected,
            gauge_value,
            set_gauge_value,
            feed_value,
            set_feed_value,
            units,
            set_units,
            last_refresh,
            set_last_refresh,
            local_time,
            set_local_time,
            last_event_time,
        };

        manager.subscribe();
        manager
    }

    /// Open the server-sent-event subscription. The subscription lives for
    /// the page lifetime; reconnection is left to the browser's EventSource
    /// client.
    fn subscribe(&self) {
        let source = match EventSource::new(&api::events_url()) {
            Ok(source) => source,
            Err(err) => {
                log::error!("Failed to create EventSource: {:?}", err);
                return;
            }
        };

        // On open
        let set_connected = self.set_connected;
        let onopen = Closure::wrap(Box::new(move |_: web_sys::Event| {
            log::info!("Events connected");
            set_connected.set(true);
        }) as Box<dyn FnMut(web_sys::Event)>);
        source.set_onopen(Some(onopen.as_ref().unchecked_ref()));
        onopen.forget();

        // On error. The browser retries on its own; only note the drop
        // when the connection is no longer open.
        let set_connected_err = self.set_connected;
        let source_for_err = source.clone();
        let onerror = Closure::wrap(Box::new(move |_: web_sys::Event| {
            if source_for_err.ready_state() != EventSource::OPEN {
                log::warn!("Events disconnected");
                set_connected_err.set(false);
            }
        }) as Box<dyn FnMut(web_sys::Event)>);
        source.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        onerror.forget();

        // Unnamed messages carry no reading payload, log them raw.
        let onmessage = Closure::wrap(Box::new(move |e: MessageEvent| {
            if let Some(data) = e.data().as_string() {
                log::debug!("message: {}", data);
            }
        }) as Box<dyn FnMut(MessageEvent)>);
        source.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));
        onmessage.forget();

        // Named readings events
        let manager = *self;
        let onreadings = Closure::wrap(Box::new(move |e: MessageEvent| {
            let Some(data) = e.data().as_string() else {
                log::warn!("Dropping non-text new_readings event");
                return;
            };
            match serde_json::from_str::<StreamEvent>(&data) {
                Ok(event) => manager.handle_stream_event(event),
                Err(err) => log::warn!("Dropping malformed new_readings payload: {}", err),
            }
        }) as Box<dyn FnMut(MessageEvent)>);
        if let Err(err) =
            source.add_event_listener_with_callback("new_readings", onreadings.as_ref().unchecked_ref())
        {
            log::error!("Failed to attach new_readings listener: {:?}", err);
        }
        onreadings.forget();
    }

    /// React to a validated `new_readings` event: log the spacing between
    /// consecutive events, then update the display.
    pub fn handle_stream_event(&self, event: StreamEvent) {
        let previous = self.last_event_time.get_value();
        match event_delta(previous, event.time) {
            Some(delta_ms) => log::debug!("new_readings after {:.3}s", delta_ms / 1000.0),
            None if previous.is_none() && event.time.is_some() => {
                log::debug!("first new_readings event")
            }
            None => {}
        }
        if event.time.is_some() {
            self.last_event_time.set_value(event.time);
        }

        self.apply_reading(&event.reading);
    }

    /// The display updater. Each step stands alone: a missing optional
    /// field skips its own step and nothing else.
    pub fn apply_reading(&self, reading: &Reading) {
        log::info!(
            "reading: loadcell={} units={:?} last_update={:?}",
            reading.loadcell,
            reading.units,
            reading.last_update
        );

        self.set_gauge_value.set(reading.loadcell);
        self.set_feed_value.set(Some(reading.loadcell));

        if let Some(units) = &reading.units {
            self.set_units.set(Some(units.clone()));
        }

        match clock::classify_last_update(reading.last_update) {
            LastUpdate::Calendar(ms) => {
                self.set_last_refresh.set(Some(clock::format_epoch_ms(ms)));
            }
            // An uptime counter has no calendar meaning; show when the
            // browser saw the reading instead.
            LastUpdate::Uptime => {
                self.set_last_refresh.set(Some(clock::now_local_string()));
            }
            LastUpdate::Absent => {}
        }
    }

    /// Mirror the reporter's local-time string to the display.
    pub fn record_local_time(&self, value: String) {
        self.set_local_time.set(Some(value));
    }
}

/// Spacing between consecutive stream events, when both timestamps exist.
fn event_delta(previous: Option<f64>, current: Option<f64>) -> Option<f64> {
    match (previous, current) {
        (Some(prev), Some(now)) => Some(now - prev),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_requires_both_timestamps() {
        // First event: no previous time yet, so no delta to log.
        assert_eq!(event_delta(None, Some(5000.0)), None);
        // Firmware omits `time` entirely.
        assert_eq!(event_delta(None, None), None);
        assert_eq!(event_delta(Some(1000.0), None), None);
    }

    #[test]
    fn delta_between_consecutive_events() {
        assert_eq!(event_delta(Some(5000.0), Some(7500.0)), Some(2500.0));
    }
}
