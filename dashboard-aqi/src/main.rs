//! Beijing Air Quality Dashboard
//!
//! Single-page dashboard over the Beijing multi-site air quality dataset.
//! The user picks a date and a monitoring station; the page shows the day's
//! AQI headline, a seven-day AQI trend, pollutant concentrations for the same
//! window, an all-station ranking for the day, the AQI category reference
//! table, and a map of stations colored by that day's category.
//!
//! Data flow:
//! 1. `build.rs` copies `stations.csv` and gzips `daily_data.csv` into `OUT_DIR`.
//! 2. `include_str!`/`include_bytes!` embed both into the WASM binary.
//! 3. On mount, the daily data is inflated and loaded into an in-memory
//!    SQLite database together with the station coordinates.
//! 4. Whenever the date, station, or pollutant selection changes, the app
//!    re-queries the database and hands JSON payloads to the D3/Leaflet
//!    renderers via `js_bridge`.

use baq_chart_ui::components::{
    ChartContainer, ChartHeader, DatePicker, ErrorDisplay, LoadingSpinner, MetricCard,
    NoticeBanner, PollutantPicker, StationSelector,
};
use baq_chart_ui::js_bridge;
use baq_chart_ui::state::AppState;
use baq_core::level::{self, AqiLevel};
use baq_core::pollutant::{Pollutant, CONCENTRATION_UNIT};
use baq_db::models::RecordLookup;
use baq_db::Database;
use dioxus::prelude::*;
use flate2::read::GzDecoder;
use std::io::Read;

/// Station metadata (name, district, coordinates).
const STATIONS_CSV: &str = include_str!(concat!(env!("OUT_DIR"), "/stations.csv"));
/// Gzipped daily observation data for all stations.
const DAILY_DATA_GZ: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/daily_data.csv.gz"));

/// Chart container DOM element IDs used by the JS renderers.
const TREND_CHART_ID: &str = "aqi-trend-chart";
const POLLUTANT_CHART_ID: &str = "pollutant-chart";
const RANKING_CHART_ID: &str = "station-ranking-chart";
const MAP_ID: &str = "station-map";

/// Initial map view over Beijing.
const MAP_CENTER: [f64; 2] = [39.9042, 116.4074];
const MAP_ZOOM: u8 = 10;

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("baq-dashboard-root"))
        .launch(App);
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);

    // Initialize database on mount
    use_effect(move || {
        match Database::new() {
            Ok(db) => {
                if let Err(e) = db.load_stations(STATIONS_CSV) {
                    log::error!("Failed to load stations: {}", e);
                    state
                        .error_msg
                        .set(Some(format!("Failed to load station data: {}", e)));
                    state.loading.set(false);
                    return;
                }

                let daily_csv = match inflate_daily_data() {
                    Ok(csv) => csv,
                    Err(e) => {
                        log::error!("Failed to inflate daily data: {}", e);
                        state
                            .error_msg
                            .set(Some(format!("Failed to decompress daily data: {}", e)));
                        state.loading.set(false);
                        return;
                    }
                };
                if let Err(e) = db.load_observations(&daily_csv) {
                    log::error!("Failed to load observations: {}", e);
                    state
                        .error_msg
                        .set(Some(format!("Failed to load observations: {}", e)));
                    state.loading.set(false);
                    return;
                }

                // Populate the station dropdown
                if let Ok(stations) = db.query_stations() {
                    let default_station = stations
                        .iter()
                        .find(|s| s.name == "Dongsi")
                        .or_else(|| stations.first())
                        .map(|s| s.name.clone())
                        .unwrap_or_default();

                    if !default_station.is_empty() {
                        web_sys::console::log_1(
                            &format!("[BAQ Debug] dashboard: Default station: {}", default_station)
                                .into(),
                        );
                        state.selected_station.set(default_station);
                    }
                    state.stations.set(stations);
                }

                // Bound the date input to the loaded data and start at the
                // earliest observed day
                if let Ok((min_date, max_date)) = db.query_date_range() {
                    if let Ok(min_html) = baq_core::dates::compact_to_dashed(&min_date) {
                        state.selected_date.set(min_html.clone());
                        state.min_date.set(min_html);
                    }
                    if let Ok(max_html) = baq_core::dates::compact_to_dashed(&max_date) {
                        state.max_date.set(max_html);
                    }
                }

                state.db.set(Some(db));
                state.loading.set(false);
            }
            Err(e) => {
                state
                    .error_msg
                    .set(Some(format!("Database initialization failed: {}", e)));
                state.loading.set(false);
            }
        }
    });

    // Re-render all chart sections whenever the date, station, or pollutant
    // selection changes
    use_effect(move || {
        log::info!("[BAQ Debug Rust] dashboard use_effect triggered");

        if (state.loading)() {
            log::info!("[BAQ Debug Rust] Exiting: still loading");
            return;
        }
        if (state.error_msg)().is_some() {
            log::info!("[BAQ Debug Rust] Exiting: error present");
            return;
        }

        let db = match &*state.db.read() {
            Some(db) => db.clone(),
            None => {
                log::info!("[BAQ Debug Rust] Exiting: no database");
                return;
            }
        };

        let station = (state.selected_station)();
        let date_html = (state.selected_date)();
        let pollutants = (state.selected_pollutants)();
        log::info!(
            "[BAQ Debug Rust] Selected station: {}, date: {}",
            station,
            date_html
        );

        if station.is_empty() || date_html.is_empty() {
            log::info!("[BAQ Debug Rust] Exiting: empty station or date");
            return;
        }

        // Convert YYYY-MM-DD back to YYYYMMDD for DB queries
        let date = date_html.replace('-', "");

        // Initialize D3.js/Leaflet scripts
        js_bridge::init_charts();

        draw_trend_chart(&db, &station, &date);
        draw_pollutant_chart(&db, &station, &date, &pollutants);
        draw_ranking_chart(&db, &date);
        draw_station_map(&db, &date);
    });

    // The headline section is plain RSX rather than a JS chart, so its lookup
    // runs here in the component body.
    let station = (state.selected_station)();
    let date_html = (state.selected_date)();
    let headline = {
        let db_guard = state.db.read();
        match &*db_guard {
            Some(db) if !station.is_empty() && !date_html.is_empty() => {
                let date = date_html.replace('-', "");
                match db.query_observation(&station, &date) {
                    Ok(lookup) => Some(lookup),
                    Err(e) => {
                        log::error!("[BAQ Debug Rust] Headline query failed: {}", e);
                        None
                    }
                }
            }
            _ => None,
        }
    };

    // Week-window emptiness feeds a notice under the trend header; the chart
    // itself is torn down by the render effect.
    let trend_notice = {
        let db_guard = state.db.read();
        match &*db_guard {
            Some(db) if !station.is_empty() && !date_html.is_empty() => {
                let date = date_html.replace('-', "");
                match db.query_week_window(&station, &date) {
                    Ok(rows) if rows.is_empty() => Some(format!(
                        "No observations for {} in the week ending {}.",
                        station, date_html
                    )),
                    _ => None,
                }
            }
            _ => None,
        }
    };

    // A clean single match renders as two metric cards; a missing day or
    // duplicate rows degrade to a notice without touching the other sections.
    let headline_section = match &headline {
        Some(RecordLookup::Found(row)) => {
            let accent = level::color_for_label(&row.aqi_level).to_string();
            let aqi_value = row.formatted_aqi();
            let category = row.aqi_level.clone();
            let caption = format!("{} on {}", station, date_html);
            rsx! {
                div {
                    style: "display: flex; gap: 12px; flex-wrap: wrap; margin: 8px 0;",
                    MetricCard {
                        title: "AQI".to_string(),
                        value: aqi_value,
                        caption: caption,
                    }
                    MetricCard {
                        title: "Category".to_string(),
                        value: category,
                        accent: accent,
                    }
                }
            }
        }
        Some(RecordLookup::NotFound) => rsx! {
            NoticeBanner {
                message: format!("No observation for {} on {}.", station, date_html),
            }
        },
        Some(RecordLookup::Ambiguous(count)) => rsx! {
            NoticeBanner {
                message: format!(
                    "{} rows match {} on {}. The ranking and map fall back to the highest AQI among them.",
                    count, station, date_html
                ),
            }
        },
        None => rsx! {},
    };

    rsx! {
        div {
            style: "padding: 16px; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;",

            ChartHeader {
                title: "Beijing Air Quality Dashboard".to_string(),
                subtitle: "Daily AQI and pollutant concentrations across Beijing monitoring stations".to_string(),
            }

            if let Some(err) = (state.error_msg)() {
                ErrorDisplay { message: err }
            } else if (state.loading)() {
                LoadingSpinner {}
            } else {
                div {
                    style: "display: flex; flex-wrap: wrap; gap: 12px; align-items: flex-end; margin-bottom: 8px;",
                    DatePicker {}
                    StationSelector {}
                }

                ChartHeader {
                    title: "Daily Snapshot".to_string(),
                }
                {headline_section}

                ChartHeader {
                    title: "AQI Trend (Last 7 Days)".to_string(),
                }
                if let Some(msg) = trend_notice {
                    NoticeBanner { message: msg }
                }
                ChartContainer {
                    id: TREND_CHART_ID.to_string(),
                    min_height: 320,
                }

                ChartHeader {
                    title: "Pollutant Concentrations (Last 7 Days)".to_string(),
                    subtitle: format!("Concentration ({})", CONCENTRATION_UNIT),
                }
                PollutantPicker {}
                if (state.selected_pollutants)().is_empty() {
                    div {
                        style: "padding: 16px; color: #666; font-style: italic;",
                        "Select at least one pollutant to plot its concentration."
                    }
                }
                ChartContainer {
                    id: POLLUTANT_CHART_ID.to_string(),
                    min_height: 340,
                }

                ChartHeader {
                    title: "Station AQI Ranking".to_string(),
                    subtitle: "All stations reporting on the selected day, worst highlighted".to_string(),
                }
                ChartContainer {
                    id: RANKING_CHART_ID.to_string(),
                    min_height: 380,
                }

                CategoryLegend {}

                ChartHeader {
                    title: "Station Map".to_string(),
                    subtitle: "Markers colored by the selected day's AQI category".to_string(),
                }
                ChartContainer {
                    id: MAP_ID.to_string(),
                    min_height: 420,
                }
            }
        }
    }
}

/// Reference table mapping AQI categories to their marker colors.
#[component]
fn CategoryLegend() -> Element {
    let rows: Vec<(&str, &str)> = AqiLevel::ALL
        .iter()
        .map(|l| (l.label(), l.color_name()))
        .collect();

    rsx! {
        div {
            style: "margin: 8px 0 16px 0;",
            ChartHeader {
                title: "AQI Category Reference".to_string(),
            }
            table {
                style: "border-collapse: collapse; font-size: 13px;",
                thead {
                    tr {
                        th {
                            style: "border: 1px solid #E0E0E0; padding: 6px 10px; text-align: left; background: #FAFAFA;",
                            "Category"
                        }
                        th {
                            style: "border: 1px solid #E0E0E0; padding: 6px 10px; text-align: left; background: #FAFAFA;",
                            "Color"
                        }
                    }
                }
                tbody {
                    for (label, color) in rows {
                        tr {
                            td {
                                style: "border: 1px solid #E0E0E0; padding: 6px 10px;",
                                "{label}"
                            }
                            td {
                                style: "border: 1px solid #E0E0E0; padding: 6px 10px;",
                                span {
                                    style: "display: inline-block; width: 16px; height: 12px; background: {color}; border-radius: 2px; margin-right: 6px; vertical-align: middle;",
                                }
                                "{color}"
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Inflate the embedded gzipped daily data back into CSV text.
fn inflate_daily_data() -> Result<String, std::io::Error> {
    let mut decoder = GzDecoder::new(DAILY_DATA_GZ);
    let mut csv = String::new();
    decoder.read_to_string(&mut csv)?;
    Ok(csv)
}

/// Convert a compact YYYYMMDD date for display, falling back to the raw string.
fn dashed_or_raw(compact: &str) -> String {
    baq_core::dates::compact_to_dashed(compact).unwrap_or_else(|_| compact.to_string())
}

/// Render the seven-day AQI trend line for the selected station.
fn draw_trend_chart(db: &Database, station: &str, date: &str) {
    let rows = match db.query_week_window(station, date) {
        Ok(r) => r,
        Err(e) => {
            log::error!("[BAQ Debug Rust] Week window query failed: {}", e);
            return;
        }
    };
    if rows.is_empty() {
        log::info!("[BAQ Debug Rust] No trend data, destroying chart");
        js_bridge::destroy_chart(TREND_CHART_ID);
        return;
    }

    let data: Vec<serde_json::Value> = rows
        .iter()
        .map(|r| {
            serde_json::json!({
                "date": dashed_or_raw(&r.date),
                "value": r.aqi,
            })
        })
        .collect();

    let data_json = serde_json::to_string(&data).unwrap_or_default();
    let config_json = serde_json::to_string(&serde_json::json!({
        "yAxisLabel": "AQI",
        "valueLabel": "AQI",
        "lineColor": "#1976D2",
        "height": 320,
    }))
    .unwrap_or_default();

    js_bridge::render_line_chart(TREND_CHART_ID, &data_json, &config_json);
}

/// Render concentration lines for the ticked pollutants over the same window.
///
/// Days where a pollutant was not measured are simply absent from its series.
fn draw_pollutant_chart(db: &Database, station: &str, date: &str, selected: &[String]) {
    if selected.is_empty() {
        js_bridge::destroy_chart(POLLUTANT_CHART_ID);
        return;
    }

    let rows = match db.query_week_window(station, date) {
        Ok(r) => r,
        Err(e) => {
            log::error!("[BAQ Debug Rust] Week window query failed: {}", e);
            return;
        }
    };

    let mut data: Vec<serde_json::Value> = Vec::new();
    for label in selected {
        if let Some(pollutant) = Pollutant::from_label(label) {
            for row in &rows {
                if let Some(value) = row.pollutant(pollutant) {
                    data.push(serde_json::json!({
                        "series": label,
                        "date": dashed_or_raw(&row.date),
                        "value": value,
                    }));
                }
            }
        }
    }

    if data.is_empty() {
        log::info!("[BAQ Debug Rust] No pollutant data, destroying chart");
        js_bridge::destroy_chart(POLLUTANT_CHART_ID);
        return;
    }

    let data_json = serde_json::to_string(&data).unwrap_or_default();
    let config_json = serde_json::to_string(&serde_json::json!({
        "yAxisLabel": format!("Concentration ({})", CONCENTRATION_UNIT),
        "valueUnit": CONCENTRATION_UNIT,
        "height": 340,
    }))
    .unwrap_or_default();

    js_bridge::render_multi_line_chart(POLLUTANT_CHART_ID, &data_json, &config_json);
}

/// Render the all-station ranking for the selected day, worst station(s) brown.
fn draw_ranking_chart(db: &Database, date: &str) {
    let rows = match db.query_all_stations_on(date) {
        Ok(r) => r,
        Err(e) => {
            log::error!("[BAQ Debug Rust] Ranking query failed: {}", e);
            return;
        }
    };
    if rows.is_empty() {
        log::info!("[BAQ Debug Rust] No ranking data, destroying chart");
        js_bridge::destroy_chart(RANKING_CHART_ID);
        return;
    }

    let worst = baq_db::worst_stations(&rows);
    let worst_names: Vec<&str> = worst.iter().map(|w| w.station.as_str()).collect();

    let data: Vec<serde_json::Value> = rows
        .iter()
        .map(|r| {
            serde_json::json!({
                "station": r.station,
                "value": r.aqi,
                "level": r.aqi_level,
                "is_worst": worst_names.contains(&r.station.as_str()),
            })
        })
        .collect();

    let data_json = serde_json::to_string(&data).unwrap_or_default();
    let config_json = serde_json::to_string(&serde_json::json!({
        "barColor": "lightgray",
        "highlightColor": "brown",
        "xAxisLabel": "AQI",
        "yAxisLabel": "Station",
    }))
    .unwrap_or_default();

    js_bridge::render_bar_chart(RANKING_CHART_ID, &data_json, &config_json);
}

/// Render the station map with markers colored by the day's category.
///
/// The category-to-color table rides along in the config payload; stations
/// with no observation keep a null level and fall back to gray.
fn draw_station_map(db: &Database, date: &str) {
    let markers = match db.query_station_markers(date) {
        Ok(m) => m,
        Err(e) => {
            log::error!("[BAQ Debug Rust] Marker query failed: {}", e);
            return;
        }
    };
    if markers.is_empty() {
        js_bridge::destroy_chart(MAP_ID);
        return;
    }

    let level_colors: serde_json::Map<String, serde_json::Value> = AqiLevel::ALL
        .iter()
        .map(|l| {
            (
                l.label().to_string(),
                serde_json::Value::String(l.color_name().to_string()),
            )
        })
        .collect();

    let data_json = serde_json::to_string(&markers).unwrap_or_default();
    let config_json = serde_json::to_string(&serde_json::json!({
        "center": MAP_CENTER,
        "zoom": MAP_ZOOM,
        "levelColors": level_colors,
        "fallbackColor": level::FALLBACK_COLOR,
        "height": 420,
    }))
    .unwrap_or_default();

    js_bridge::render_station_map(MAP_ID, &data_json, &config_json);
}
