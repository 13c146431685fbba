use leptos::prelude::*;
use leptos::mount::mount_to_body;
use leptos::task::spawn_local;
use leptos_use::{use_interval_fn_with_options, UseIntervalFnOptions};
use wasm_bindgen::prelude::*;

pub mod api;
pub mod clock;
pub mod components;
pub mod stream;

use components::{GaugeCard, ReadingsPanel, TopBar};
use stream::EventStreamManager;

/// Period of the browser-time reports, milliseconds.
const TIME_REPORT_INTERVAL_MS: u64 = 30_000;

#[wasm_bindgen(start)]
pub fn main() {
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <App/> });
}

#[component]
pub fn App() -> impl IntoView {
    let manager = EventStreamManager::new();
    provide_context(manager);

    // One-shot fetch of the current reading at page load.
    spawn_local(async move {
        match api::fetch_reading().await {
            Ok(reading) => manager.apply_reading(&reading),
            Err(err) => log::warn!("Initial readings fetch failed: {}", err),
        }
    });

    // Report the browser clock now and every 30 seconds for the lifetime
    // of the page. A failed report is logged and dropped.
    let _ = use_interval_fn_with_options(
        move || report_browser_time(manager),
        TIME_REPORT_INTERVAL_MS,
        UseIntervalFnOptions::default().immediate_callback(true),
    );

    view! {
        <div class="min-h-screen bg-[#0a0a0a] text-white flex flex-col">
            <TopBar/>
            <main class="flex-1 flex items-start justify-center p-4">
                <div class="w-full max-w-md space-y-3">
                    <GaugeCard/>
                    <ReadingsPanel/>
                </div>
            </main>
        </div>
    }
}

/// Capture the local clock, mirror it to the display, and POST it to the
/// device.
fn report_browser_time(manager: EventStreamManager) {
    let report = clock::capture_browser_time();
    manager.record_local_time(report.local_time.clone());

    spawn_local(async move {
        if let Err(err) = api::report_browser_time(&report).await {
            log::warn!("Browser time report failed: {}", err);
        }
    });
}
