//! Query result model structs for air quality data.
//!
//! All structs derive `Serialize` so they can be passed to D3.js and Leaflet
//! as JSON from the Dioxus WASM frontend.

use baq_core::pollutant::Pollutant;
use serde::Serialize;

/// A single daily reading for one station.
///
/// Dates use the compact YYYYMMDD storage format. The six pollutant
/// concentrations are in µg/m³ and may be absent from the source data.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ObservationRow {
    /// Calendar date (YYYYMMDD format).
    pub date: String,
    /// Station name (e.g. "Dongsi").
    pub station: String,
    /// Composite air quality index for the day.
    pub aqi: f64,
    /// Category label for the day (e.g. "Moderate").
    pub aqi_level: String,
    pub pm25: Option<f64>,
    pub pm10: Option<f64>,
    pub so2: Option<f64>,
    pub no2: Option<f64>,
    pub co: Option<f64>,
    pub o3: Option<f64>,
}

impl ObservationRow {
    /// Headline AQI value, fixed to two decimal places.
    pub fn formatted_aqi(&self) -> String {
        format!("{:.2}", self.aqi)
    }

    /// Concentration for one pollutant, if the row carries it.
    pub fn pollutant(&self, pollutant: Pollutant) -> Option<f64> {
        match pollutant {
            Pollutant::Pm25 => self.pm25,
            Pollutant::Pm10 => self.pm10,
            Pollutant::So2 => self.so2,
            Pollutant::No2 => self.no2,
            Pollutant::Co => self.co,
            Pollutant::O3 => self.o3,
        }
    }
}

/// Result of an exact (station, date) lookup.
///
/// The dataset is supposed to hold at most one row per (station, date) pair.
/// This enum keeps the lookup honest instead of trusting the invariant: the
/// caller sees whether the match was clean, missing, or a data-quality
/// violation, and can degrade its widget accordingly.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordLookup {
    /// Exactly one row matched.
    Found(ObservationRow),
    /// No row matched the requested station and date.
    NotFound,
    /// More than one row matched; carries the match count.
    Ambiguous(usize),
}

/// Station metadata for selection lists.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StationInfo {
    /// Station name as it appears in the dataset.
    pub name: String,
    /// Administrative district the station sits in.
    pub district: String,
}

/// One map marker: a station's fixed coordinate plus its AQI category on the
/// selected date.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StationMarker {
    pub station: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Category label on the selected date; `None` when the station has no
    /// reading for that date.
    pub aqi_level: Option<String>,
}
