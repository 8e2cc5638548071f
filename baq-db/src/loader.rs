//! CSV data loading functions for populating the in-memory SQLite database.
//!
//! Each loader method parses CSV data from a string slice and inserts rows
//! into the corresponding table. The CSV formats match the fixture files
//! shipped with the dashboard.
//!
//! # CSV Formats
//!
//! - **Stations** (has headers): `NAME,DISTRICT,LATITUDE,LONGITUDE`
//! - **Daily observations** (has headers): columns are located by header
//!   name, so the column order may vary. `date`, `station`, `AQI` and
//!   `AQI_level` are required; the six pollutant columns (`PM2.5`, `PM10`,
//!   `SO2`, `NO2`, `CO`, `O3`) are optional and stored as NULL when absent.

use crate::Database;
use baq_core::dates;
use baq_core::pollutant::Pollutant;
use baq_core::station::Station;
use rusqlite::params;

impl Database {
    /// Load station metadata from CSV string.
    ///
    /// Expected format (with headers): `NAME,DISTRICT,LATITUDE,LONGITUDE`
    ///
    /// # Example CSV
    /// ```text
    /// NAME,DISTRICT,LATITUDE,LONGITUDE
    /// Dongsi,Dongcheng,39.929247,116.417731
    /// ```
    pub fn load_stations(&self, csv_data: &str) -> anyhow::Result<()> {
        let conn = self.conn.borrow();
        let stations = Station::parse_station_csv(csv_data)?;

        let mut count = 0u32;
        for station in &stations {
            conn.execute(
                "INSERT OR REPLACE INTO stations (name, district, latitude, longitude)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    station.name,
                    station.district,
                    station.latitude,
                    station.longitude
                ],
            )?;
            count += 1;
        }
        log::info!("[BAQ Debug] loader: Loaded {} stations", count);
        Ok(())
    }

    /// Load daily observations from CSV string.
    ///
    /// Columns are resolved by header name rather than position; `date`,
    /// `station`, `AQI` and `AQI_level` must be present, pollutant columns
    /// may be missing. Dates are accepted in either `YYYY-MM-DD` or
    /// `YYYYMMDD` form and normalized to the compact storage form.
    ///
    /// Rows with an unparseable date, an empty station, or a non-numeric AQI
    /// are skipped and counted. Duplicate (station, date) rows are inserted
    /// as-is; the query layer reports them as data-quality violations.
    ///
    /// # Example CSV
    /// ```text
    /// date,station,AQI,AQI_level,PM2.5,PM10,SO2,NO2,CO,O3
    /// 2013-03-01,Dongsi,120.00,Unhealthy for Sensitive Groups,43.22,87.57,14.80,41.57,1093.2,11.3
    /// ```
    pub fn load_observations(&self, csv_data: &str) -> anyhow::Result<()> {
        let conn = self.conn.borrow();
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_data.as_bytes());

        let headers = rdr.headers()?.clone();
        let date_col = column_index(&headers, "date")
            .ok_or_else(|| anyhow::anyhow!("daily data is missing a 'date' column"))?;
        let station_col = column_index(&headers, "station")
            .ok_or_else(|| anyhow::anyhow!("daily data is missing a 'station' column"))?;
        let aqi_col = column_index(&headers, "AQI")
            .ok_or_else(|| anyhow::anyhow!("daily data is missing an 'AQI' column"))?;
        let level_col = column_index(&headers, "AQI_level")
            .ok_or_else(|| anyhow::anyhow!("daily data is missing an 'AQI_level' column"))?;
        let pollutant_cols: Vec<Option<usize>> = Pollutant::ALL
            .iter()
            .map(|p| column_index(&headers, p.label()))
            .collect();

        let mut count = 0u32;
        let mut skipped = 0u32;
        for result in rdr.records() {
            let r = result?;
            let station = r.get(station_col).unwrap_or("").trim();
            let level = r.get(level_col).unwrap_or("").trim();

            let date = match dates::normalize_compact(r.get(date_col).unwrap_or("")) {
                Ok(d) => d,
                Err(_) => {
                    skipped += 1;
                    continue;
                }
            };
            let aqi: f64 = match r.get(aqi_col).unwrap_or("").trim().parse::<f64>() {
                Ok(v) => v,
                Err(_) => {
                    skipped += 1;
                    continue;
                }
            };
            if station.is_empty() {
                skipped += 1;
                continue;
            }

            let concentrations: Vec<Option<f64>> = pollutant_cols
                .iter()
                .map(|col| numeric_field(&r, *col))
                .collect();

            conn.execute(
                "INSERT INTO observations
                 (station, date, aqi, aqi_level, pm25, pm10, so2, no2, co, o3)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    station,
                    date,
                    aqi,
                    level,
                    concentrations[0],
                    concentrations[1],
                    concentrations[2],
                    concentrations[3],
                    concentrations[4],
                    concentrations[5],
                ],
            )?;
            count += 1;
        }
        log::info!(
            "[BAQ Debug] loader: Loaded {} observations, skipped {} invalid",
            count,
            skipped
        );
        Ok(())
    }
}

/// Position of a named column in the header record, matching trimmed names.
fn column_index(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim() == name)
}

/// Numeric cell value at an optional column position; empty or non-numeric
/// cells become `None`.
fn numeric_field(record: &csv::StringRecord, col: Option<usize>) -> Option<f64> {
    col.and_then(|i| record.get(i))
        .and_then(|s| s.trim().parse::<f64>().ok())
}

#[cfg(test)]
mod tests {
    use crate::Database;

    #[test]
    fn load_stations_from_csv() {
        let db = Database::new().unwrap();
        let csv = "\
NAME,DISTRICT,LATITUDE,LONGITUDE
Dongsi,Dongcheng,39.929247,116.417731
Changping,Changping,40.219646,116.225091
";
        db.load_stations(csv).unwrap();

        let conn = db.conn.borrow();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM stations", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 2);

        let district: String = conn
            .query_row(
                "SELECT district FROM stations WHERE name = 'Dongsi'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(district, "Dongcheng");

        let latitude: f64 = conn
            .query_row(
                "SELECT latitude FROM stations WHERE name = 'Changping'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert!((latitude - 40.219646).abs() < 1e-9);
    }

    #[test]
    fn load_stations_replaces_on_conflict() {
        let db = Database::new().unwrap();
        let csv1 = "\
NAME,DISTRICT,LATITUDE,LONGITUDE
Dongsi,Dongcheng,39.929247,116.417731
";
        let csv2 = "\
NAME,DISTRICT,LATITUDE,LONGITUDE
Dongsi,Updated District,39.929247,116.417731
";
        db.load_stations(csv1).unwrap();
        db.load_stations(csv2).unwrap();

        let conn = db.conn.borrow();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM stations", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1, "Should have 1 row after upsert");

        let district: String = conn
            .query_row(
                "SELECT district FROM stations WHERE name = 'Dongsi'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(district, "Updated District");
    }

    #[test]
    fn load_observations_from_csv() {
        let db = Database::new().unwrap();
        let csv = "\
date,station,AQI,AQI_level,PM2.5,PM10,SO2,NO2,CO,O3
2013-03-01,Dongsi,120.00,Unhealthy for Sensitive Groups,43.22,87.57,14.80,41.57,1093.2,11.3
2013-03-02,Dongsi,95.50,Moderate,33.10,60.20,12.00,38.90,880.0,20.1
2013-03-01,Tiantan,48.00,Good,10.50,22.00,4.10,18.00,400.0,55.0
";
        db.load_observations(csv).unwrap();

        let conn = db.conn.borrow();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM observations", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 3);

        let aqi: f64 = conn
            .query_row(
                "SELECT aqi FROM observations WHERE station = 'Dongsi' AND date = '20130301'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert!((aqi - 120.0).abs() < 0.01);

        let level: String = conn
            .query_row(
                "SELECT aqi_level FROM observations WHERE station = 'Tiantan' AND date = '20130301'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(level, "Good");
    }

    #[test]
    fn load_observations_maps_columns_by_header_name() {
        let db = Database::new().unwrap();
        // Same data, different column order plus an extraneous column.
        let csv = "\
station,O3,AQI_level,date,AQI,notes,PM2.5
Dongsi,11.3,Unhealthy for Sensitive Groups,2013-03-01,120.00,hand-checked,43.22
";
        db.load_observations(csv).unwrap();

        let conn = db.conn.borrow();
        let (aqi, pm25, o3): (f64, Option<f64>, Option<f64>) = conn
            .query_row(
                "SELECT aqi, pm25, o3 FROM observations WHERE station = 'Dongsi'",
                [],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .unwrap();
        assert!((aqi - 120.0).abs() < 0.01);
        assert_eq!(pm25, Some(43.22));
        assert_eq!(o3, Some(11.3));

        // Columns that are absent entirely load as NULL.
        let pm10: Option<f64> = conn
            .query_row(
                "SELECT pm10 FROM observations WHERE station = 'Dongsi'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert!(pm10.is_none());
    }

    #[test]
    fn load_observations_requires_core_columns() {
        let db = Database::new().unwrap();
        let missing_level = "\
date,station,AQI
2013-03-01,Dongsi,120.00
";
        assert!(db.load_observations(missing_level).is_err());

        let missing_station = "\
date,AQI,AQI_level
2013-03-01,120.00,Moderate
";
        assert!(db.load_observations(missing_station).is_err());
    }

    #[test]
    fn load_observations_skips_invalid_rows() {
        let db = Database::new().unwrap();
        let csv = "\
date,station,AQI,AQI_level
2013-03-01,Dongsi,120.00,Unhealthy for Sensitive Groups
not-a-date,Dongsi,90.00,Moderate
2013-03-03,,70.00,Moderate
2013-03-04,Dongsi,n/a,Moderate
2013-03-05,Dongsi,61.20,Moderate
";
        db.load_observations(csv).unwrap();

        let conn = db.conn.borrow();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM observations", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 2, "Only rows with a valid date, station and AQI load");
    }

    #[test]
    fn load_observations_normalizes_dates_to_compact() {
        let db = Database::new().unwrap();
        let csv = "\
date,station,AQI,AQI_level
2013-03-01,Dongsi,120.00,Unhealthy for Sensitive Groups
20130302,Dongsi,95.00,Moderate
";
        db.load_observations(csv).unwrap();

        let conn = db.conn.borrow();
        let dates: Vec<String> = {
            let mut stmt = conn
                .prepare("SELECT date FROM observations ORDER BY date")
                .unwrap();
            stmt.query_map([], |row| row.get(0))
                .unwrap()
                .collect::<Result<Vec<String>, _>>()
                .unwrap()
        };
        assert_eq!(dates, vec!["20130301", "20130302"]);
    }

    #[test]
    fn load_observations_keeps_duplicate_rows() {
        let db = Database::new().unwrap();
        let csv = "\
date,station,AQI,AQI_level
2013-03-01,Dongsi,120.00,Unhealthy for Sensitive Groups
2013-03-01,Dongsi,98.00,Moderate
";
        db.load_observations(csv).unwrap();

        let conn = db.conn.borrow();
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM observations WHERE station = 'Dongsi' AND date = '20130301'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(
            count, 2,
            "Duplicate (station, date) rows must stay visible to the query layer"
        );
    }

    #[test]
    fn load_observations_stores_missing_concentrations_as_null() {
        let db = Database::new().unwrap();
        let csv = "\
date,station,AQI,AQI_level,PM2.5,PM10,SO2,NO2,CO,O3
2013-03-01,Dongsi,120.00,Unhealthy for Sensitive Groups,43.22,87.57,14.80,41.57,,
";
        db.load_observations(csv).unwrap();

        let conn = db.conn.borrow();
        let (co, o3): (Option<f64>, Option<f64>) = conn
            .query_row(
                "SELECT co, o3 FROM observations WHERE station = 'Dongsi'",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .unwrap();
        assert!(co.is_none(), "Empty CO cell should be NULL");
        assert!(o3.is_none(), "Empty O3 cell should be NULL");
    }
}
