//! Headline metric card component.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct MetricCardProps {
    /// Small label above the value (e.g., "AQI")
    pub title: String,
    /// The headline value itself
    pub value: String,
    /// Optional caption below the value
    #[props(default = String::new())]
    pub caption: String,
    /// Accent color for the card's left border (e.g., an AQI category color)
    #[props(default = String::from("#E0E0E0"))]
    pub accent: String,
}

/// A card showing one headline figure, accented with a category color.
#[component]
pub fn MetricCard(props: MetricCardProps) -> Element {
    let style = format!(
        "padding: 12px 16px; background: #FAFAFA; border: 1px solid #E0E0E0; border-left: 4px solid {}; border-radius: 4px; min-width: 140px;",
        props.accent
    );

    rsx! {
        div {
            style: "{style}",
            div {
                style: "font-size: 12px; color: #666; text-transform: uppercase; letter-spacing: 0.5px;",
                "{props.title}"
            }
            div {
                style: "font-size: 26px; font-weight: bold; margin: 4px 0;",
                "{props.value}"
            }
            if !props.caption.is_empty() {
                div {
                    style: "font-size: 12px; color: #666;",
                    "{props.caption}"
                }
            }
        }
    }
}
