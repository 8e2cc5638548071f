//! Reusable Dioxus RSX components for the air quality dashboard.

mod chart_container;
mod chart_header;
mod date_picker;
mod error_display;
mod loading_spinner;
mod metric_card;
mod notice_banner;
mod pollutant_picker;
mod station_selector;

pub use chart_container::ChartContainer;
pub use chart_header::ChartHeader;
pub use date_picker::DatePicker;
pub use error_display::ErrorDisplay;
pub use loading_spinner::LoadingSpinner;
pub use metric_card::MetricCard;
pub use notice_banner::NoticeBanner;
pub use pollutant_picker::PollutantPicker;
pub use station_selector::StationSelector;
