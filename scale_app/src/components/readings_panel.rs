use leptos::prelude::*;

use crate::stream::EventStreamManager;

/// Textual readout: numeric feed value, units, and last device update.
#[component]
pub fn ReadingsPanel() -> impl IntoView {
    let manager = use_context::<EventStreamManager>().expect("EventStreamManager not found");
    let feed_value = manager.feed_value;
    let units = manager.units;
    let last_refresh = manager.last_refresh;

    view! {
        <div class="bg-[#0a0a0a] rounded border border-[#ffffff08] p-2">
            <h2 class="text-[10px] font-semibold text-[#00d9ff] mb-1.5 uppercase tracking-wide">
                "Feed"
            </h2>
            <Show
                when=move || feed_value.get().is_some()
                fallback=|| view! {
                    <div class="text-center text-[#555555] py-2 text-[10px]">
                        "Waiting..."
                    </div>
                }
            >
                <div class="space-y-0.5">
                    <div class="flex justify-between items-center bg-[#111111] rounded px-1.5 py-1">
                        <span class="text-[#666666] text-[10px] font-medium">"Level"</span>
                        <span class="text-[11px] font-mono text-white tabular-nums">
                            {move || feed_value.get().map(|v| v.to_string()).unwrap_or_default()}
                            <span class="text-[#555555] ml-0.5">
                                {move || units.get().unwrap_or_default()}
                            </span>
                        </span>
                    </div>
                    <div class="flex justify-between items-center bg-[#111111] rounded px-1.5 py-1">
                        <span class="text-[#666666] text-[10px] font-medium">"Updated"</span>
                        <span class="text-[10px] font-mono text-[#aaaaaa]">
                            {move || last_refresh.get().unwrap_or_else(|| "—".to_string())}
                        </span>
                    </div>
                </div>
            </Show>
        </div>
    }
}
