//! Dropdown selector for choosing a monitoring station.

use crate::state::AppState;
use dioxus::prelude::*;

/// Station dropdown selector.
/// Reads available stations from AppState and updates selected_station on change.
#[component]
pub fn StationSelector() -> Element {
    let mut state = use_context::<AppState>();
    let stations = state.stations.read().clone();
    let selected = (state.selected_station)();

    let on_change = move |evt: Event<FormData>| {
        let value = evt.value();
        state.selected_station.set(value);
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                r#for: "station-select",
                style: "font-weight: bold; margin-right: 8px;",
                "Station: "
            }
            select {
                id: "station-select",
                onchange: on_change,
                for station in stations.iter() {
                    option {
                        value: "{station.name}",
                        selected: station.name == selected,
                        "{station.name} ({station.district})"
                    }
                }
            }
        }
    }
}
