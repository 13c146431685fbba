//! Top bar / header component.

use leptos::prelude::*;

use crate::stream::EventStreamManager;

/// Top bar with the stream status indicator and local clock.
#[component]
pub fn TopBar() -> impl IntoView {
    let manager = use_context::<EventStreamManager>().expect("EventStreamManager not found");
    let connected = manager.connected;
    let local_time = manager.local_time;

    view! {
        <header class="h-9 bg-[#111111] border-b border-[#ffffff10] flex items-center px-3 shrink-0">
            <div class="flex items-center space-x-2">
                <h1 class="text-xs font-semibold text-white">"FEED SCALE"</h1>
            </div>

            <div class="flex-1"></div>

            <div class="flex items-center space-x-3">
                // Event stream status
                <div class="flex items-center space-x-1.5">
                    <div class={move || if connected.get() {
                        "w-1.5 h-1.5 bg-[#00d9ff] rounded-full animate-pulse"
                    } else {
                        "w-1.5 h-1.5 bg-[#ff4444] rounded-full"
                    }}></div>
                    <span class="text-[10px] text-[#888888]">"LIVE"</span>
                </div>
                // Local clock, refreshed by the time reporter
                <span class="text-[10px] font-mono text-[#aaaaaa]">
                    {move || local_time.get().unwrap_or_default()}
                </span>
            </div>
        </header>
    }
}
