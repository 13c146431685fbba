//! Radial Gauge Widget
//!
//! A radial dial for the load-cell value with an animated pointer.
//! The drawing size is derived from the container's rendered width; the
//! scale widens automatically when a value overruns the configured max.

use leptos::prelude::*;

use crate::stream::EventStreamManager;

/// Pointer animation tick, milliseconds.
const ANIMATION_TICK_MS: u32 = 30;

/// Rendering parameters for the dial. Fixed at initialization; only the
/// value changes afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct GaugeOptions {
    /// Fraction of a half turn the arc extends past horizontal on each
    /// side. 0.15 gives a 234 degree sweep.
    pub angle: f64,
    /// Major tick divisions across the sweep.
    pub divisions: u32,
    /// Minor ticks between consecutive major ticks.
    pub subdivisions: u32,
    /// Pointer length relative to the dial radius.
    pub pointer_length: f64,
    /// Pointer thickness relative to the dial radius.
    pub pointer_width: f64,
    pub pointer_color: &'static str,
    /// Value arc gradient, start to stop.
    pub color_start: &'static str,
    pub color_stop: &'static str,
    /// Background track color.
    pub stroke_color: &'static str,
    pub min: f64,
    pub max: f64,
    /// When true the scale is clamped at `max` instead of widening.
    /// `min` never moves either way.
    pub limit_max: bool,
    /// Pointer movement per animation tick, in gauge units.
    pub animation_speed: f64,
}

impl Default for GaugeOptions {
    fn default() -> Self {
        Self {
            angle: 0.15,
            divisions: 5,
            subdivisions: 3,
            pointer_length: 0.6,
            pointer_width: 0.035,
            pointer_color: "#000000",
            color_start: "#6FADCF",
            color_stop: "#8FC0DA",
            stroke_color: "#E0E0E0",
            min: 0.0,
            max: 100.0,
            limit_max: false,
            animation_speed: 32.0,
        }
    }
}

/// Card wrapping the dial, bound to the manager's gauge signal.
#[component]
pub fn GaugeCard() -> impl IntoView {
    let manager = use_context::<EventStreamManager>().expect("EventStreamManager not found");

    view! {
        <div class="bg-[#0a0a0a] rounded border border-[#ffffff08] p-2">
            <h2 class="text-[10px] font-semibold text-[#00d9ff] mb-1.5 uppercase tracking-wide">
                "Fill Level"
            </h2>
            <GaugeDial value=manager.gauge_value/>
        </div>
    }
}

/// The dial itself.
#[component]
pub fn GaugeDial(
    /// Target value; the pointer animates toward it.
    #[prop(into)] value: Signal<f64>,
    #[prop(default = GaugeOptions::default())] options: GaugeOptions,
) -> impl IntoView {
    let container_ref = NodeRef::<leptos::html::Div>::new();
    let (size, set_size) = signal(250.0_f64);

    // Square drawing size from the container's rendered width, once the
    // node ref populates. Until then the 250 px floor applies.
    Effect::new(move |_| {
        if let Some(container) = container_ref.get() {
            set_size.set(drawing_size(container.offset_width() as f64));
        }
    });

    // Pointer animation: step the displayed value toward the target on a
    // fixed tick. The ticker runs for the page lifetime.
    let (displayed, set_displayed) = signal(options.min);
    let speed = options.animation_speed;
    gloo_timers::callback::Interval::new(ANIMATION_TICK_MS, move || {
        let target = value.get_untracked();
        let current = displayed.get_untracked();
        if current != target {
            set_displayed.set(step_toward(current, target, speed));
        }
    })
    .forget();

    let GaugeOptions {
        angle,
        divisions,
        subdivisions,
        pointer_length,
        pointer_width,
        pointer_color,
        color_start,
        color_stop,
        stroke_color,
        min,
        max,
        limit_max,
        ..
    } = options;
    let sweep = sweep_degrees(angle);

    let scale_max = Memo::new(move |_| effective_max(max, value.get(), limit_max));

    // Geometry lives in a fixed 100x100 view box; width/height scale it.
    let (cx, cy, r) = (50.0, 50.0, 40.0);

    let ticks = tick_marks(cx, cy, r, sweep, divisions, subdivisions);

    let track = arc_path(cx, cy, r, sweep, 1.0);
    let fill = move || {
        arc_path(
            cx,
            cy,
            r,
            sweep,
            value_fraction(displayed.get(), min, scale_max.get()),
        )
    };

    let needle_tip = move || {
        let fraction = value_fraction(displayed.get(), min, scale_max.get());
        arc_point(cx, cy, r * pointer_length, sweep, fraction)
    };

    view! {
        <div node_ref=container_ref class="flex flex-col items-center">
            <svg
                viewBox="0 0 100 100"
                width=move || format!("{:.0}", size.get())
                height=move || format!("{:.0}", size.get())
            >
                <defs>
                    <linearGradient id="gauge-fill" x1="0%" y1="0%" x2="100%" y2="0%">
                        <stop offset="0%" stop-color=color_start/>
                        <stop offset="100%" stop-color=color_stop/>
                    </linearGradient>
                </defs>

                // Dial face
                <circle cx="50" cy="50" r="47" fill="#f5f5f5"/>

                // Tick marks
                {ticks
                    .into_iter()
                    .map(|tick| {
                        let (stroke, width) = if tick.major {
                            ("#333333", "1.1")
                        } else {
                            ("#666666", "0.6")
                        };
                        view! {
                            <line
                                x1=format!("{:.2}", tick.x1)
                                y1=format!("{:.2}", tick.y1)
                                x2=format!("{:.2}", tick.x2)
                                y2=format!("{:.2}", tick.y2)
                                stroke=stroke
                                stroke-width=width
                            />
                        }
                    })
                    .collect::<Vec<_>>()}

                // Background track
                <path
                    d=track
                    fill="none"
                    stroke=stroke_color
                    stroke-width="8"
                    stroke-linecap="round"
                />
                // Value arc
                <path
                    d=fill
                    fill="none"
                    stroke="url(#gauge-fill)"
                    stroke-width="8"
                    stroke-linecap="round"
                />

                // Pointer
                <line
                    x1="50"
                    y1="50"
                    x2=move || format!("{:.2}", needle_tip().0)
                    y2=move || format!("{:.2}", needle_tip().1)
                    stroke=pointer_color
                    stroke-width=format!("{:.2}", pointer_width * r)
                    stroke-linecap="round"
                />
                <circle cx="50" cy="50" r="2.5" fill=pointer_color/>

                // Readout below the pivot
                <text
                    x="50"
                    y="70"
                    text-anchor="middle"
                    font-family="monospace"
                    font-weight="bold"
                    font-size="10"
                    fill="#333333"
                >
                    {move || format!("{:.0}", displayed.get())}
                </text>
            </svg>
        </div>
    }
}

struct Tick {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    major: bool,
}

/// Square drawing size in pixels for a container width.
fn drawing_size(container_width: f64) -> f64 {
    ((container_width * 0.6).min(250.0) * 1.5).max(250.0)
}

/// Sweep of the dial arc in degrees.
fn sweep_degrees(angle: f64) -> f64 {
    180.0 * (1.0 + 2.0 * angle)
}

/// Scale max after auto-extension.
fn effective_max(configured: f64, value: f64, limit_max: bool) -> f64 {
    if limit_max {
        configured
    } else {
        configured.max(value)
    }
}

/// Position of `value` on the scale, clamped to [0, 1].
fn value_fraction(value: f64, min: f64, max: f64) -> f64 {
    let range = max - min;
    if range <= 0.0 {
        return 0.0;
    }
    ((value - min) / range).clamp(0.0, 1.0)
}

/// Point on the dial circle for a scale fraction, screen coordinates.
/// Fraction 0 is the lower-left end of the arc, 0.5 the top.
fn arc_point(cx: f64, cy: f64, r: f64, sweep: f64, fraction: f64) -> (f64, f64) {
    let angle = (90.0 + sweep / 2.0 - fraction * sweep).to_radians();
    (cx + r * angle.cos(), cy - r * angle.sin())
}

/// SVG path for the arc from the scale start up to `fraction`.
fn arc_path(cx: f64, cy: f64, r: f64, sweep: f64, fraction: f64) -> String {
    let (x0, y0) = arc_point(cx, cy, r, sweep, 0.0);
    let (x1, y1) = arc_point(cx, cy, r, sweep, fraction);
    let large_arc = if fraction * sweep > 180.0 { 1 } else { 0 };
    format!(
        "M {:.2} {:.2} A {:.2} {:.2} 0 {} 1 {:.2} {:.2}",
        x0, y0, r, r, large_arc, x1, y1
    )
}

/// Move `current` toward `target` by at most `step`.
fn step_toward(current: f64, target: f64, step: f64) -> f64 {
    let delta = target - current;
    if delta.abs() <= step {
        target
    } else {
        current + step * delta.signum()
    }
}

/// Tick line endpoints across the sweep.
fn tick_marks(cx: f64, cy: f64, r: f64, sweep: f64, divisions: u32, subdivisions: u32) -> Vec<Tick> {
    let mut marks = Vec::new();
    for major in 0..=divisions {
        let fraction = major as f64 / divisions as f64;
        marks.push(tick(cx, cy, r, sweep, fraction, true));
        if major < divisions {
            for minor in 1..=subdivisions {
                let sub =
                    fraction + minor as f64 / (subdivisions + 1) as f64 / divisions as f64;
                marks.push(tick(cx, cy, r, sweep, sub, false));
            }
        }
    }
    marks
}

fn tick(cx: f64, cy: f64, r: f64, sweep: f64, fraction: f64, major: bool) -> Tick {
    let (inner, outer) = if major {
        (r - 10.0, r - 4.0)
    } else {
        (r - 7.0, r - 4.0)
    };
    let (x1, y1) = arc_point(cx, cy, inner, sweep, fraction);
    let (x2, y2) = arc_point(cx, cy, outer, sweep, fraction);
    Tick { x1, y1, x2, y2, major }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drawing_size_follows_container() {
        // 60% of a 300px container is under the 250 cap: 180 * 1.5 = 270.
        assert_eq!(drawing_size(300.0), 270.0);
        // Wide containers cap at 250 * 1.5.
        assert_eq!(drawing_size(1000.0), 375.0);
        // Narrow containers hit the 250 floor.
        assert_eq!(drawing_size(100.0), 250.0);
        assert_eq!(drawing_size(0.0), 250.0);
    }

    #[test]
    fn max_extends_for_overrange_values() {
        assert_eq!(effective_max(100.0, 42.0, false), 100.0);
        assert_eq!(effective_max(100.0, 130.0, false), 130.0);
        // limit_max pins the scale.
        assert_eq!(effective_max(100.0, 130.0, true), 100.0);
    }

    #[test]
    fn fraction_is_clamped() {
        assert_eq!(value_fraction(50.0, 0.0, 100.0), 0.5);
        assert_eq!(value_fraction(-10.0, 0.0, 100.0), 0.0);
        assert_eq!(value_fraction(120.0, 0.0, 100.0), 1.0);
        // Degenerate scale
        assert_eq!(value_fraction(1.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn arc_midpoint_is_straight_up() {
        let (x, y) = arc_point(50.0, 50.0, 40.0, sweep_degrees(0.15), 0.5);
        assert!((x - 50.0).abs() < 1e-9);
        assert!((y - 10.0).abs() < 1e-9);
    }

    #[test]
    fn arc_ends_are_symmetric_and_below_center() {
        let sweep = sweep_degrees(0.15);
        let (x0, y0) = arc_point(50.0, 50.0, 40.0, sweep, 0.0);
        let (x1, y1) = arc_point(50.0, 50.0, 40.0, sweep, 1.0);
        assert!((y0 - y1).abs() < 1e-9);
        assert!(((x0 - 50.0) + (x1 - 50.0)).abs() < 1e-9);
        assert!(y0 > 50.0);
    }

    #[test]
    fn pointer_steps_converge_without_overshoot() {
        let mut current = 0.0;
        let mut ticks = 0;
        while current != 42.0 {
            current = step_toward(current, 42.0, 32.0);
            ticks += 1;
            assert!(current <= 42.0);
            assert!(ticks < 10, "animation failed to converge");
        }
        // Holding at the target is the identity.
        assert_eq!(step_toward(42.0, 42.0, 32.0), 42.0);
        // And animation works downward too.
        assert_eq!(step_toward(42.0, 0.0, 32.0), 10.0);
    }

    #[test]
    fn tick_count_matches_divisions() {
        let ticks = tick_marks(50.0, 50.0, 40.0, 234.0, 5, 3);
        let majors = ticks.iter().filter(|t| t.major).count();
        let minors = ticks.iter().filter(|t| !t.major).count();
        assert_eq!(majors, 6);
        assert_eq!(minors, 15);
    }
}
