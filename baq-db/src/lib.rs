//! In-memory SQLite database layer for Beijing air quality data.
//!
//! This crate provides a shared database abstraction that loads CSV data
//! into an in-memory SQLite database and exposes typed query methods for
//! consumption by the Dioxus/D3.js dashboard compiled to WASM.
//!
//! # Architecture
//!
//! - `Rc<RefCell<Connection>>` wrapper for interior mutability in single-threaded WASM
//! - In-memory SQLite via `rusqlite` (compiles to WASM via `wasm32-unknown-unknown`)
//! - CSV data loaded via `include_str!` at compile time in consuming crates
//! - Typed query methods returning serializable structs for JSON export to
//!   the D3.js and Leaflet renderers
//!
//! # Usage
//!
//! ```rust
//! use baq_db::Database;
//!
//! let db = Database::new().unwrap();
//!
//! // Load CSV data (typically via include_str! in the consuming crate)
//! db.load_stations("NAME,DISTRICT,LATITUDE,LONGITUDE\nDongsi,Dongcheng,39.929247,116.417731\n").unwrap();
//! db.load_observations("date,station,AQI,AQI_level\n2013-03-01,Dongsi,120,Unhealthy for Sensitive Groups\n").unwrap();
//!
//! // Query typed results
//! let stations = db.query_stations().unwrap();
//! let week = db.query_week_window("Dongsi", "20130301").unwrap();
//! assert_eq!(week.len(), 1);
//! ```
//!
//! # Tables
//!
//! See [`schema::create_schema`] for the full SQL schema.
//!
//! - `stations` - Station metadata (name, district, map coordinate)
//! - `observations` - One row per station per day (AQI, category label, six
//!   pollutant concentrations)
//!
//! The `observations` table carries no uniqueness constraint on
//! (station, date): the dataset is supposed to hold at most one row per pair,
//! and the query layer reports violations instead of the loader hiding them.

pub mod schema;
mod loader;
mod queries;
pub mod models;

pub use queries::worst_stations;

use rusqlite::Connection;
use std::cell::RefCell;
use std::rc::Rc;

/// In-memory SQLite database wrapping the daily air quality dataset.
///
/// This struct is cheaply cloneable (via `Rc`) and suitable for sharing
/// across Dioxus components in a single-threaded WASM environment.
///
/// # Example
///
/// ```rust
/// use baq_db::Database;
///
/// let db = Database::new().unwrap();
/// db.load_stations("NAME,DISTRICT,LATITUDE,LONGITUDE\nDongsi,Dongcheng,39.929247,116.417731\n").unwrap();
/// let stations = db.query_stations().unwrap();
/// assert_eq!(stations.len(), 1);
/// ```
#[derive(Clone)]
pub struct Database {
    conn: Rc<RefCell<Connection>>,
}

impl Database {
    /// Create a new in-memory database with the full schema applied.
    ///
    /// The database is empty after creation; use the `load_*` methods
    /// to populate it with CSV data.
    pub fn new() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(schema::create_schema())?;
        Ok(Self {
            conn: Rc::new(RefCell::new(conn)),
        })
    }
}
