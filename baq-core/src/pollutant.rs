use serde::{Deserialize, Serialize};

/// Unit shared by all six tracked pollutant concentrations.
pub const CONCENTRATION_UNIT: &str = "µg/m³";

/// The six tracked pollutant concentrations.
///
/// Variant order matches the dataset column order.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum Pollutant {
    Pm25,
    Pm10,
    So2,
    No2,
    Co,
    O3,
}

impl Pollutant {
    /// All pollutants in dataset column order, for iteration.
    pub const ALL: [Pollutant; 6] = [
        Pollutant::Pm25,
        Pollutant::Pm10,
        Pollutant::So2,
        Pollutant::No2,
        Pollutant::Co,
        Pollutant::O3,
    ];

    /// Dataset column header, also used as the display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Pm25 => "PM2.5",
            Self::Pm10 => "PM10",
            Self::So2 => "SO2",
            Self::No2 => "NO2",
            Self::Co => "CO",
            Self::O3 => "O3",
        }
    }

    /// Parse a column header or display label back into a pollutant.
    pub fn from_label(label: &str) -> Option<Pollutant> {
        Pollutant::ALL.iter().copied().find(|p| p.label() == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_round_trip() {
        for pollutant in Pollutant::ALL {
            assert_eq!(Pollutant::from_label(pollutant.label()), Some(pollutant));
        }
    }

    #[test]
    fn test_unknown_label() {
        assert_eq!(Pollutant::from_label("NH3"), None);
        assert_eq!(Pollutant::from_label("pm2.5"), None);
    }
}
