//! Informational notice banner.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct NoticeBannerProps {
    pub message: String,
}

/// Displays a non-fatal notice (missing data, duplicate rows) in an amber box.
/// Unlike [`ErrorDisplay`](super::ErrorDisplay), this is for conditions the
/// dashboard degrades around rather than load failures.
#[component]
pub fn NoticeBanner(props: NoticeBannerProps) -> Element {
    rsx! {
        div {
            style: "padding: 12px 16px; margin: 8px 0; background: #FFF8E1; color: #795548; border-radius: 4px; border: 1px solid #FFE082;",
            "{props.message}"
        }
    }
}
