//! Typed query methods for building the dashboard views.
//!
//! All queries return typed structs from [`crate::models`] that can be
//! serialized to JSON for consumption by the D3.js and Leaflet renderers.
//!
//! # Date Convention
//!
//! Dates are stored and queried in the compact `YYYYMMDD` form, which sorts
//! lexicographically in chronological order. Conversion to the dashed form
//! used by date inputs and chart axes happens in the consuming crate.

use crate::models::{ObservationRow, RecordLookup, StationInfo, StationMarker};
use crate::Database;
use baq_core::dates;
use rusqlite::params;

impl Database {
    /// Look up the single reading for one station on one date.
    ///
    /// The dataset invariant says at most one row exists per (station, date)
    /// pair. Rather than trusting it, this returns a [`RecordLookup`] that
    /// distinguishes a clean match from a missing row and from duplicate
    /// rows, so the headline widget can degrade instead of failing.
    pub fn query_observation(&self, station: &str, date: &str) -> anyhow::Result<RecordLookup> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT date, station, aqi, aqi_level, pm25, pm10, so2, no2, co, o3
             FROM observations
             WHERE station = ?1 AND date = ?2",
        )?;
        let mut rows = stmt
            .query_map(params![station, date], observation_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "[BAQ Debug] query: query_observation for {} on {} matched {} row(s)",
            station,
            date,
            rows.len()
        );
        let lookup = match rows.len() {
            0 => RecordLookup::NotFound,
            1 => RecordLookup::Found(rows.remove(0)),
            n => RecordLookup::Ambiguous(n),
        };
        Ok(lookup)
    }

    /// Get one station's readings over the trailing 7-day window.
    ///
    /// Returns rows whose date lies in the inclusive range
    /// [`end_date` - 6 days, `end_date`], ordered chronologically. Days the
    /// station did not report are simply absent, so the result may hold
    /// fewer than 7 rows, particularly near the start of the dataset.
    pub fn query_week_window(
        &self,
        station: &str,
        end_date: &str,
    ) -> anyhow::Result<Vec<ObservationRow>> {
        let start_date = week_start_compact(end_date)
            .ok_or_else(|| anyhow::anyhow!("invalid window end date: {}", end_date))?;
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT date, station, aqi, aqi_level, pm25, pm10, so2, no2, co, o3
             FROM observations
             WHERE station = ?1 AND date >= ?2 AND date <= ?3
             ORDER BY date",
        )?;
        let rows = stmt
            .query_map(params![station, start_date, end_date], observation_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "[BAQ Debug] query: query_week_window returned {} records",
            rows.len()
        );
        Ok(rows)
    }

    /// Get every station's reading for one date, worst air first.
    ///
    /// Returns at most one row per station, sorted by AQI descending (ties
    /// break alphabetically by station). Should a station carry duplicate
    /// rows for the date, they collapse to the row with the maximum AQI;
    /// SQLite fills the bare columns from the row that produced the MAX.
    pub fn query_all_stations_on(&self, date: &str) -> anyhow::Result<Vec<ObservationRow>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT date, station, MAX(aqi) AS aqi, aqi_level, pm25, pm10, so2, no2, co, o3
             FROM observations
             WHERE date = ?1
             GROUP BY station
             ORDER BY aqi DESC, station",
        )?;
        let rows = stmt
            .query_map(params![date], observation_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "[BAQ Debug] query: query_all_stations_on returned {} records",
            rows.len()
        );
        Ok(rows)
    }

    /// Get list of all stations.
    ///
    /// Returns metadata for all stations in the database, ordered by name
    /// alphabetically.
    pub fn query_stations(&self) -> anyhow::Result<Vec<StationInfo>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT name, district FROM stations
             ORDER BY name",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(StationInfo {
                    name: row.get(0)?,
                    district: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "[BAQ Debug] query: query_stations returned {} records",
            rows.len()
        );
        Ok(rows)
    }

    /// Get one map marker per station for the selected date.
    ///
    /// Every station in the `stations` table gets a marker; the category
    /// label is NULL for stations without a reading on that date, which the
    /// map renders in the fallback color. Stations that appear in the
    /// observations but not in the metadata have no coordinate and yield no
    /// marker.
    pub fn query_station_markers(&self, date: &str) -> anyhow::Result<Vec<StationMarker>> {
        let conn = self.conn.borrow();
        // MAX(o.aqi) steers which duplicate row supplies the category label.
        let mut stmt = conn.prepare(
            "SELECT s.name, s.latitude, s.longitude, o.aqi_level, MAX(o.aqi)
             FROM stations s
             LEFT JOIN observations o ON o.station = s.name AND o.date = ?1
             GROUP BY s.name
             ORDER BY s.name",
        )?;
        let rows = stmt
            .query_map(params![date], |row| {
                Ok(StationMarker {
                    station: row.get(0)?,
                    latitude: row.get(1)?,
                    longitude: row.get(2)?,
                    aqi_level: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "[BAQ Debug] query: query_station_markers returned {} records",
            rows.len()
        );
        Ok(rows)
    }

    /// Get the (min, max) date range for all observations.
    ///
    /// Returns the earliest and latest dates across all station observations
    /// in YYYYMMDD format. Errors when the database holds no observations.
    pub fn query_date_range(&self) -> anyhow::Result<(String, String)> {
        let conn = self.conn.borrow();
        let (min_date, max_date) =
            conn.query_row("SELECT MIN(date), MAX(date) FROM observations", [], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?;
        log::info!(
            "[BAQ Debug] query: query_date_range returned ({}, {})",
            min_date,
            max_date
        );
        Ok((min_date, max_date))
    }
}

// ───────────────────── Helper Functions ─────────────────────

/// All rows whose AQI equals the maximum AQI in the set.
///
/// Ties are all returned, not just the first, so every worst station gets
/// highlighted. An empty input yields an empty result.
pub fn worst_stations(rows: &[ObservationRow]) -> Vec<ObservationRow> {
    let max_aqi = rows.iter().map(|r| r.aqi).fold(f64::NEG_INFINITY, f64::max);
    rows.iter().filter(|r| r.aqi == max_aqi).cloned().collect()
}

/// Compact start date of the trailing 7-day window ending on `end_compact`.
///
/// Returns `None` if the date string cannot be parsed.
fn week_start_compact(end_compact: &str) -> Option<String> {
    let end = dates::parse_date_compact(end_compact).ok()?;
    Some(dates::format_date_compact(&dates::week_window_start(&end)))
}

/// Map a full observation SELECT row into an [`ObservationRow`].
///
/// Expects the column order
/// `date, station, aqi, aqi_level, pm25, pm10, so2, no2, co, o3`.
fn observation_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ObservationRow> {
    Ok(ObservationRow {
        date: row.get(0)?,
        station: row.get(1)?,
        aqi: row.get(2)?,
        aqi_level: row.get(3)?,
        pm25: row.get(4)?,
        pm10: row.get(5)?,
        so2: row.get(6)?,
        no2: row.get(7)?,
        co: row.get(8)?,
        o3: row.get(9)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    /// Helper to create a database with a small, hand-checked dataset.
    ///
    /// Dongsi reports every day from Feb 27 through Mar 7; Tiantan reports
    /// only Mar 5 and Mar 7; Huairou and Wanliu only Mar 7. Dongsi and
    /// Tiantan tie for the worst AQI on Mar 7.
    fn sample_db() -> Database {
        let db = Database::new().unwrap();

        let stations_csv = "\
NAME,DISTRICT,LATITUDE,LONGITUDE
Dongsi,Dongcheng,39.929247,116.417731
Tiantan,Dongcheng,39.887858,116.392896
Huairou,Huairou,40.315481,116.626028
Wanliu,Haidian,34.81287,113.989313
";
        db.load_stations(stations_csv).unwrap();

        let observations_csv = "\
date,station,AQI,AQI_level,PM2.5,PM10,SO2,NO2,CO,O3
2013-02-27,Dongsi,30.00,Good,7.10,15.80,3.20,14.50,380.0,52.0
2013-03-01,Dongsi,120.00,Unhealthy for Sensitive Groups,43.22,87.57,14.80,41.57,1093.2,11.3
2013-03-02,Dongsi,95.50,Moderate,33.10,60.20,12.00,38.90,880.0,20.1
2013-03-03,Dongsi,72.40,Moderate,24.60,44.80,9.10,30.20,700.5,28.4
2013-03-04,Dongsi,55.00,Moderate,17.80,35.10,7.00,26.00,610.0,35.2
2013-03-05,Dongsi,48.20,Good,11.90,25.30,5.40,22.10,520.8,44.0
2013-03-06,Dongsi,66.70,Moderate,21.50,40.00,8.20,28.60,655.3,31.9
2013-03-07,Dongsi,150.80,Unhealthy,58.30,110.40,20.10,60.80,1400.0,8.7
2013-03-05,Tiantan,48.20,Good,12.00,24.00,5.00,20.00,500.0,47.5
2013-03-07,Tiantan,150.80,Unhealthy,57.90,108.00,19.40,59.20,1350.0,9.9
2013-03-07,Huairou,62.30,Moderate,19.80,36.50,6.70,24.90,580.0,38.6
2013-03-07,Wanliu,88.10,Moderate,29.70,55.60,11.30,36.40,820.0,22.8
";
        db.load_observations(observations_csv).unwrap();

        db
    }

    /// Helper to create a database where Dongsi carries duplicate rows for
    /// one date, violating the uniqueness invariant.
    fn duplicate_row_db() -> Database {
        let db = Database::new().unwrap();
        db.load_stations(
            "NAME,DISTRICT,LATITUDE,LONGITUDE\n\
             Dongsi,Dongcheng,39.929247,116.417731\n\
             Tiantan,Dongcheng,39.887858,116.392896\n",
        )
        .unwrap();
        db.load_observations(
            "date,station,AQI,AQI_level\n\
             2013-03-01,Dongsi,120.00,Unhealthy for Sensitive Groups\n\
             2013-03-01,Dongsi,98.00,Moderate\n\
             2013-03-01,Tiantan,48.00,Good\n",
        )
        .unwrap();
        db
    }

    // ───────────────────── Exact Lookup Tests ─────────────────────

    #[test]
    fn query_observation_finds_exact_match() {
        let db = sample_db();
        let lookup = db.query_observation("Dongsi", "20130301").unwrap();
        match lookup {
            RecordLookup::Found(row) => {
                assert_eq!(row.station, "Dongsi");
                assert_eq!(row.date, "20130301");
                assert_eq!(row.formatted_aqi(), "120.00");
                assert_eq!(row.aqi_level, "Unhealthy for Sensitive Groups");
            }
            other => panic!("Expected Found, got {:?}", other),
        }
    }

    #[test]
    fn query_observation_not_found() {
        let db = sample_db();
        assert_eq!(
            db.query_observation("Dongsi", "20200101").unwrap(),
            RecordLookup::NotFound
        );
        assert_eq!(
            db.query_observation("Nowhere", "20130301").unwrap(),
            RecordLookup::NotFound
        );
    }

    #[test]
    fn query_observation_reports_duplicates() {
        let db = duplicate_row_db();
        assert_eq!(
            db.query_observation("Dongsi", "20130301").unwrap(),
            RecordLookup::Ambiguous(2)
        );
        // The clean row next to the duplicates still resolves normally.
        assert!(matches!(
            db.query_observation("Tiantan", "20130301").unwrap(),
            RecordLookup::Found(_)
        ));
    }

    // ───────────────────── Week Window Tests ─────────────────────

    #[test]
    fn query_week_window_spans_seven_days() {
        let db = sample_db();
        let rows = db.query_week_window("Dongsi", "20130307").unwrap();
        assert_eq!(rows.len(), 7);
        // Ascending by date, bounded by [end - 6 days, end].
        let dates: Vec<&str> = rows.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(
            dates,
            vec![
                "20130301", "20130302", "20130303", "20130304", "20130305", "20130306", "20130307"
            ]
        );
        assert!(rows.iter().all(|r| r.station == "Dongsi"));
        // The Feb 27 reading sits outside the window and must not leak in.
        assert!(rows.iter().all(|r| r.date.as_str() >= "20130301"));
    }

    #[test]
    fn query_week_window_shorter_near_dataset_start() {
        let db = sample_db();
        // Window [2013-02-25, 2013-03-03]; the dataset only starts Feb 27.
        let rows = db.query_week_window("Dongsi", "20130303").unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].date, "20130227");
        assert_eq!(rows[3].date, "20130303");
    }

    #[test]
    fn query_week_window_keeps_gaps_absent() {
        let db = sample_db();
        // Tiantan reported only twice inside the window.
        let rows = db.query_week_window("Tiantan", "20130307").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, "20130305");
        assert_eq!(rows[1].date, "20130307");
    }

    #[test]
    fn query_week_window_unknown_station_is_empty() {
        let db = sample_db();
        let rows = db.query_week_window("Nowhere", "20130307").unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn query_week_window_rejects_invalid_date() {
        let db = sample_db();
        assert!(db.query_week_window("Dongsi", "not-a-date").is_err());
    }

    // ───────────────────── All Stations Tests ─────────────────────

    #[test]
    fn query_all_stations_on_sorted_descending() {
        let db = sample_db();
        let rows = db.query_all_stations_on("20130307").unwrap();
        assert_eq!(rows.len(), 4);

        // Worst air first; the Dongsi/Tiantan tie breaks alphabetically.
        let stations: Vec<&str> = rows.iter().map(|r| r.station.as_str()).collect();
        assert_eq!(stations, vec!["Dongsi", "Tiantan", "Wanliu", "Huairou"]);
        for pair in rows.windows(2) {
            assert!(pair[0].aqi >= pair[1].aqi, "Rows must be AQI-descending");
        }
    }

    #[test]
    fn query_all_stations_on_one_row_per_station() {
        let db = duplicate_row_db();
        let rows = db.query_all_stations_on("20130301").unwrap();
        assert_eq!(rows.len(), 2, "Duplicates must collapse to one row");

        let dongsi = rows.iter().find(|r| r.station == "Dongsi").unwrap();
        assert!((dongsi.aqi - 120.0).abs() < 0.01, "Max AQI row wins");
        assert_eq!(dongsi.aqi_level, "Unhealthy for Sensitive Groups");
    }

    #[test]
    fn query_all_stations_on_empty_date() {
        let db = sample_db();
        let rows = db.query_all_stations_on("20200101").unwrap();
        assert!(rows.is_empty());
    }

    // ───────────────────── Worst Station Tests ─────────────────────

    #[test]
    fn worst_stations_returns_all_ties() {
        let db = sample_db();
        let rows = db.query_all_stations_on("20130307").unwrap();
        let worst = worst_stations(&rows);
        assert_eq!(worst.len(), 2, "Dongsi and Tiantan tie at 150.80");
        assert!(worst.iter().all(|r| (r.aqi - 150.8).abs() < 0.01));
        let names: Vec<&str> = worst.iter().map(|r| r.station.as_str()).collect();
        assert!(names.contains(&"Dongsi"));
        assert!(names.contains(&"Tiantan"));
    }

    #[test]
    fn worst_stations_single_maximum() {
        let db = sample_db();
        let rows = db.query_all_stations_on("20130301").unwrap();
        let worst = worst_stations(&rows);
        assert_eq!(worst.len(), 1);
        assert_eq!(worst[0].station, "Dongsi");
    }

    #[test]
    fn worst_stations_empty_input() {
        assert!(worst_stations(&[]).is_empty());
    }

    // ───────────────────── Marker Tests ─────────────────────

    #[test]
    fn query_station_markers_carries_levels() {
        let db = sample_db();
        let markers = db.query_station_markers("20130305").unwrap();
        // Every station in the metadata table gets a marker, name-ordered.
        assert_eq!(markers.len(), 4);
        let names: Vec<&str> = markers.iter().map(|m| m.station.as_str()).collect();
        assert_eq!(names, vec!["Dongsi", "Huairou", "Tiantan", "Wanliu"]);

        let dongsi = &markers[0];
        assert_eq!(dongsi.aqi_level.as_deref(), Some("Good"));
        assert!((dongsi.latitude - 39.929247).abs() < 1e-9);
        assert!((dongsi.longitude - 116.417731).abs() < 1e-9);

        // Stations without a reading that day keep their marker, level-less.
        let huairou = &markers[1];
        assert!(huairou.aqi_level.is_none());
    }

    #[test]
    fn query_station_markers_duplicate_rows_use_max() {
        let db = duplicate_row_db();
        let markers = db.query_station_markers("20130301").unwrap();
        let dongsi = markers.iter().find(|m| m.station == "Dongsi").unwrap();
        assert_eq!(
            dongsi.aqi_level.as_deref(),
            Some("Unhealthy for Sensitive Groups"),
            "The duplicate with the higher AQI supplies the category"
        );
    }

    #[test]
    fn query_station_markers_skips_unknown_stations() {
        let db = sample_db();
        // A reading for a station with no coordinate entry draws no marker.
        db.load_observations(
            "date,station,AQI,AQI_level\n2013-03-05,Nowhere,300.00,Hazardous\n",
        )
        .unwrap();
        let markers = db.query_station_markers("20130305").unwrap();
        assert_eq!(markers.len(), 4);
        assert!(markers.iter().all(|m| m.station != "Nowhere"));
    }

    // ───────────────────── Metadata Tests ─────────────────────

    #[test]
    fn query_stations_ordered_by_name() {
        let db = sample_db();
        let stations = db.query_stations().unwrap();
        assert_eq!(stations.len(), 4);
        assert_eq!(stations[0].name, "Dongsi");
        assert_eq!(stations[0].district, "Dongcheng");
        assert_eq!(stations[3].name, "Wanliu");
    }

    #[test]
    fn query_date_range_spans_dataset() {
        let db = sample_db();
        let (min_date, max_date) = db.query_date_range().unwrap();
        assert_eq!(min_date, "20130227");
        assert_eq!(max_date, "20130307");
    }

    // ───────────────────── Integration Tests ─────────────────────

    #[test]
    fn full_dashboard_workflow() {
        let db = sample_db();

        // 1. List stations for the selector
        let stations = db.query_stations().unwrap();
        assert!(!stations.is_empty());

        // 2. Get date range for the date picker bounds
        let (min, max) = db.query_date_range().unwrap();
        assert!(min < max);

        // 3. Headline lookup for the first station on the earliest date
        let lookup = db.query_observation(&stations[0].name, &min).unwrap();
        assert!(matches!(lookup, RecordLookup::Found(_)));

        // 4. Trend window ending on the latest date
        let week = db.query_week_window(&stations[0].name, &max).unwrap();
        assert!(!week.is_empty());

        // 5. Ranking for the latest date
        let ranking = db.query_all_stations_on(&max).unwrap();
        assert!(!ranking.is_empty());

        // 6. Worst subset is non-empty and uniform
        let worst = worst_stations(&ranking);
        assert!(!worst.is_empty());
        assert!(worst.iter().all(|r| r.aqi == worst[0].aqi));

        // 7. One marker per known station
        let markers = db.query_station_markers(&max).unwrap();
        assert_eq!(markers.len(), stations.len());
    }
}
