mod gauge;
mod readings_panel;
mod top_bar;

pub use gauge::{GaugeCard, GaugeDial, GaugeOptions};
pub use readings_panel::ReadingsPanel;
pub use top_bar::TopBar;
