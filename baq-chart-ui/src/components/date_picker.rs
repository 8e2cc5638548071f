//! Date picker bounded to the loaded dataset.

use crate::state::AppState;
use dioxus::prelude::*;

/// Single date input for choosing the dashboard's reference day.
/// The min/max bounds come from the observation table's date range.
#[component]
pub fn DatePicker() -> Element {
    let mut state = use_context::<AppState>();
    let selected = (state.selected_date)();
    let min = (state.min_date)();
    let max = (state.max_date)();

    let on_change = move |evt: Event<FormData>| {
        state.selected_date.set(evt.value());
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                style: "font-weight: bold;",
                "Date: "
                input {
                    r#type: "date",
                    value: "{selected}",
                    min: "{min}",
                    max: "{max}",
                    onchange: on_change,
                }
            }
        }
    }
}
