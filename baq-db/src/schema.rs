//! SQL schema definitions for the in-memory SQLite database.
//!
//! Contains CREATE TABLE statements for the station and observation tables.
//! The schema is applied as a single batch when the database is initialized.

/// Returns the full SQL schema as a single batch string.
///
/// This creates the following tables:
///
/// - `stations` - Station metadata (name, district, latitude/longitude)
/// - `observations` - Daily per-station readings (date, AQI, category label,
///   six pollutant concentrations)
///
/// `observations` deliberately has no primary key on (station, date): the
/// dataset invariant says each pair appears at most once, and the query layer
/// must be able to observe and report rows that violate it. Pollutant columns
/// are nullable because concentrations may be absent from the source data.
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS stations (
        name TEXT PRIMARY KEY,
        district TEXT NOT NULL,
        latitude REAL NOT NULL,
        longitude REAL NOT NULL
    );

    CREATE TABLE IF NOT EXISTS observations (
        station TEXT NOT NULL,
        date TEXT NOT NULL,
        aqi REAL NOT NULL,
        aqi_level TEXT NOT NULL,
        pm25 REAL,
        pm10 REAL,
        so2 REAL,
        no2 REAL,
        co REAL,
        o3 REAL
    );
    CREATE INDEX IF NOT EXISTS idx_obs_station ON observations(station);
    CREATE INDEX IF NOT EXISTS idx_obs_date ON observations(date);

    "#
}
