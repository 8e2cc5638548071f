//! Checkbox group for choosing pollutants to plot.

use crate::state::AppState;
use baq_core::pollutant::Pollutant;
use dioxus::prelude::*;

/// Pollutant checkbox group.
///
/// One checkbox per pollutant column in the dataset. Ticking a box adds the
/// pollutant's column label to `selected_pollutants`; unticking removes it.
/// Nothing is selected by default, so the concentration chart starts empty.
#[component]
pub fn PollutantPicker() -> Element {
    let mut state = use_context::<AppState>();
    let selected = (state.selected_pollutants)();

    rsx! {
        div {
            style: "margin: 8px 0; display: flex; gap: 12px; flex-wrap: wrap; align-items: center;",
            span {
                style: "font-weight: bold;",
                "Pollutants: "
            }
            for name in Pollutant::ALL.iter().map(|p| p.label()) {
                label {
                    style: "display: flex; align-items: center; gap: 4px; font-size: 14px;",
                    input {
                        r#type: "checkbox",
                        checked: selected.iter().any(|p| p.as_str() == name),
                        onchange: move |_evt: Event<FormData>| {
                            let mut current = (state.selected_pollutants)();
                            if let Some(pos) = current.iter().position(|p| p.as_str() == name) {
                                current.remove(pos);
                            } else {
                                current.push(name.to_string());
                            }
                            state.selected_pollutants.set(current);
                        },
                    }
                    "{name}"
                }
            }
        }
    }
}
