use serde::{Deserialize, Serialize};

/// The six canonical AQI categories, ordered from best to worst.
///
/// Labels follow the EPA convention and match the `AQI_level` column of the
/// daily dataset exactly.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum AqiLevel {
    Good,
    Moderate,
    UnhealthyForSensitive,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

/// Marker and swatch color used when a category label is not one of the six
/// canonical categories.
pub const FALLBACK_COLOR: &str = "gray";

impl AqiLevel {
    /// All categories in order from best to worst, for iteration.
    pub const ALL: [AqiLevel; 6] = [
        AqiLevel::Good,
        AqiLevel::Moderate,
        AqiLevel::UnhealthyForSensitive,
        AqiLevel::Unhealthy,
        AqiLevel::VeryUnhealthy,
        AqiLevel::Hazardous,
    ];

    /// The dataset label for this category.
    pub fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::UnhealthyForSensitive => "Unhealthy for Sensitive Groups",
            Self::Unhealthy => "Unhealthy",
            Self::VeryUnhealthy => "Very Unhealthy",
            Self::Hazardous => "Hazardous",
        }
    }

    /// CSS color name used for map markers and legend swatches.
    pub fn color_name(self) -> &'static str {
        match self {
            Self::Good => "green",
            Self::Moderate => "yellow",
            Self::UnhealthyForSensitive => "orange",
            Self::Unhealthy => "red",
            Self::VeryUnhealthy => "purple",
            Self::Hazardous => "maroon",
        }
    }

    /// Parse a dataset label back into a category.
    pub fn from_label(label: &str) -> Option<AqiLevel> {
        AqiLevel::ALL.iter().copied().find(|l| l.label() == label)
    }
}

/// Marker color for an arbitrary category label.
///
/// Unknown labels fall back to [`FALLBACK_COLOR`] rather than erroring, so a
/// malformed row can never break the map.
pub fn color_for_label(label: &str) -> &'static str {
    AqiLevel::from_label(label).map_or(FALLBACK_COLOR, AqiLevel::color_name)
}
