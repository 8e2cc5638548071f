//! Application state managed via Dioxus context.
//!
//! `AppState` bundles all reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with `use_context::<AppState>()`.

use baq_db::models::StationInfo;
use baq_db::Database;
use dioxus::prelude::*;

/// Shared application state for the air quality dashboard.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Database instance (None until loaded)
    pub db: Signal<Option<Database>>,
    /// Whether the app is still loading
    pub loading: Signal<bool>,
    /// Error message if something went wrong
    pub error_msg: Signal<Option<String>>,
    /// Currently selected monitoring station name
    pub selected_station: Signal<String>,
    /// Currently selected date (YYYY-MM-DD, as produced by the date input)
    pub selected_date: Signal<String>,
    /// Pollutant column labels the user has ticked for the concentration chart
    pub selected_pollutants: Signal<Vec<String>>,
    /// Available monitoring stations
    pub stations: Signal<Vec<StationInfo>>,
    /// Earliest observation date (YYYY-MM-DD), used to bound the date input
    pub min_date: Signal<String>,
    /// Latest observation date (YYYY-MM-DD), used to bound the date input
    pub max_date: Signal<String>,
}

impl AppState {
    /// Create a new AppState with default signal values.
    pub fn new() -> Self {
        Self {
            db: Signal::new(None),
            loading: Signal::new(true),
            error_msg: Signal::new(None),
            selected_station: Signal::new("Dongsi".to_string()),
            selected_date: Signal::new(String::new()),
            selected_pollutants: Signal::new(Vec::new()),
            stations: Signal::new(Vec::new()),
            min_date: Signal::new(String::new()),
            max_date: Signal::new(String::new()),
        }
    }
}
