use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};

/// Represents one of the twelve fixed air-quality monitoring stations.
///
/// Holds the static metadata for a station, including the map coordinate
/// used by the overview map. Station names match the `station` column of the
/// daily dataset.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Station {
    /// Station name as it appears in the daily dataset (e.g., "Dongsi")
    pub name: String,
    /// Administrative district the station sits in
    pub district: String,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Station {
    /// Parse a CSV string of station metadata into a vector of Stations.
    ///
    /// Expected CSV columns: NAME, DISTRICT, LATITUDE, LONGITUDE
    pub fn parse_station_csv(csv_object: &str) -> Result<Vec<Station>, std::io::Error> {
        let mut station_list: Vec<Station> = Vec::new();
        let mut rdr = ReaderBuilder::new()
            .delimiter(b',')
            .has_headers(true)
            .from_reader(csv_object.as_bytes());
        for row in rdr.records() {
            let record = row?;
            let name = String::from(record.get(0).unwrap_or("").trim());
            let district = String::from(record.get(1).unwrap_or("").trim());
            let latitude = record
                .get(2)
                .unwrap_or("0.0")
                .trim()
                .parse::<f64>()
                .unwrap_or(0.0);
            let longitude = record
                .get(3)
                .unwrap_or("0.0")
                .trim()
                .parse::<f64>()
                .unwrap_or(0.0);
            if name.is_empty() {
                continue;
            }
            let station = Station {
                name,
                district,
                latitude,
                longitude,
            };
            station_list.push(station);
        }
        Ok(station_list)
    }
}
