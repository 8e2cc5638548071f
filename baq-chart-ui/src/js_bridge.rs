//! Typed wrappers around JS interop via `js_sys::eval()`.
//!
//! D3.js chart functions and the Leaflet map helper are split across
//! `assets/js/*.js` and loaded at runtime. They are evaluated as globals
//! (no ES modules) and exposed via `window.*`. This module provides safe
//! Rust wrappers that serialize data and call those globals.

// Embed all chart/map JS files at compile time
static TOOLTIP_JS: &str = include_str!("../assets/js/tooltip.js");
static LINE_CHART_JS: &str = include_str!("../assets/js/line-chart.js");
static MULTI_LINE_CHART_JS: &str = include_str!("../assets/js/multi-line-chart.js");
static BAR_CHART_JS: &str = include_str!("../assets/js/bar-chart.js");
static STATION_MAP_JS: &str = include_str!("../assets/js/station-map.js");

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('BAQ JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Initialize chart scripts with a wait-for-D3 polling loop.
///
/// The chart JS files define functions like `renderLineChart(...)` via
/// `function` declarations. To ensure they become globally accessible
/// (not block-scoped inside the setInterval callback), we evaluate them
/// at global scope via a separate `eval()` call once D3 is ready,
/// and then explicitly promote each function to `window.*`.
pub fn init_charts() {
    let all_js = [
        TOOLTIP_JS,
        LINE_CHART_JS,
        MULTI_LINE_CHART_JS,
        BAR_CHART_JS,
        STATION_MAP_JS,
    ]
    .join("\n");

    // Store the scripts on window so the polling callback can eval them
    // at global scope (not block-scoped inside setInterval).
    let store_js = format!(
        "window.__baqChartScripts = {};",
        serde_json::to_string(&all_js).unwrap_or_default()
    );
    let _ = js_sys::eval(&store_js);

    let init_js = r#"
        (function() {
            var waitForD3 = setInterval(function() {
                if (typeof d3 !== 'undefined') {
                    clearInterval(waitForD3);
                    // Eval at global scope via indirect eval
                    (0, eval)(window.__baqChartScripts);
                    delete window.__baqChartScripts;
                    // Promote function declarations to window explicitly
                    if (typeof renderLineChart !== 'undefined') window.renderLineChart = renderLineChart;
                    if (typeof renderMultiLineChart !== 'undefined') window.renderMultiLineChart = renderMultiLineChart;
                    if (typeof renderBarChart !== 'undefined') window.renderBarChart = renderBarChart;
                    if (typeof renderStationMap !== 'undefined') window.renderStationMap = renderStationMap;
                    if (typeof initTooltip !== 'undefined') window.initTooltip = initTooltip;
                    if (typeof showTooltip !== 'undefined') window.showTooltip = showTooltip;
                    if (typeof hideTooltip !== 'undefined') window.hideTooltip = hideTooltip;
                    window.__baqChartsReady = true;
                    console.log('BAQ charts initialized');
                }
            }, 100);
        })();
    "#;
    let _ = js_sys::eval(init_js);
}

/// Render a single line chart (seven-day AQI trend).
///
/// Uses a polling loop to wait for D3.js to load, chart scripts to initialize,
/// and the container DOM element to exist before rendering.
pub fn render_line_chart(container_id: &str, data_json: &str, config_json: &str) {
    let escaped_data = data_json.replace('\'', "\\'").replace('\n', "");
    let escaped_config = config_json.replace('\'', "\\'").replace('\n', "");
    call_js(&format!(
        r#"
        (function() {{
            var poll = setInterval(function() {{
                if (window.__baqChartsReady &&
                    typeof window.renderLineChart !== 'undefined' &&
                    document.getElementById('{container_id}')) {{
                    clearInterval(poll);
                    try {{
                        window.renderLineChart('{container_id}', '{escaped_data}', '{escaped_config}');
                    }} catch(e) {{ console.error('[BAQ] renderLineChart error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
    ));
}

/// Render a multi-line chart (pollutant concentrations, one line per pollutant).
///
/// Uses a polling loop to wait for D3.js to load, chart scripts to initialize,
/// and the container DOM element to exist before rendering.
pub fn render_multi_line_chart(container_id: &str, data_json: &str, config_json: &str) {
    let escaped_data = data_json.replace('\'', "\\'").replace('\n', "");
    let escaped_config = config_json.replace('\'', "\\'").replace('\n', "");
    call_js(&format!(
        r#"
        (function() {{
            console.log('[BAQ Debug] Initiating polling for multi-line-chart');
            var poll = setInterval(function() {{
                console.log('[BAQ Debug] Poll attempt:', {{
                    chartsReady: !!window.__baqChartsReady,
                    functionAvailable: typeof window.renderMultiLineChart !== 'undefined',
                    domExists: !!document.getElementById('{container_id}'),
                    timestamp: Date.now()
                }});
                if (window.__baqChartsReady &&
                    typeof window.renderMultiLineChart !== 'undefined' &&
                    document.getElementById('{container_id}')) {{
                    clearInterval(poll);
                    try {{
                        window.renderMultiLineChart('{container_id}', '{escaped_data}', '{escaped_config}');
                    }} catch(e) {{ console.error('[BAQ] renderMultiLineChart error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
    ));
}

/// Render a horizontal bar chart (station AQI ranking).
///
/// Uses a polling loop to wait for D3.js to load, chart scripts to initialize,
/// and the container DOM element to exist before rendering.
pub fn render_bar_chart(container_id: &str, data_json: &str, config_json: &str) {
    let escaped_data = data_json.replace('\'', "\\'").replace('\n', "");
    let escaped_config = config_json.replace('\'', "\\'").replace('\n', "");
    call_js(&format!(
        r#"
        (function() {{
            console.log('[BAQ Debug] Initiating polling for bar-chart');
            var poll = setInterval(function() {{
                console.log('[BAQ Debug] Poll attempt:', {{
                    chartsReady: !!window.__baqChartsReady,
                    functionAvailable: typeof window.renderBarChart !== 'undefined',
                    domExists: !!document.getElementById('{container_id}'),
                    timestamp: Date.now()
                }});
                if (window.__baqChartsReady &&
                    typeof window.renderBarChart !== 'undefined' &&
                    document.getElementById('{container_id}')) {{
                    clearInterval(poll);
                    try {{
                        window.renderBarChart('{container_id}', '{escaped_data}', '{escaped_config}');
                    }} catch(e) {{ console.error('[BAQ] renderBarChart error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
    ));
}

/// Render the station map with colored AQI markers.
///
/// The map renderer needs Leaflet in addition to the chart scripts, so the
/// polling loop also waits for the `L` global before calling through.
pub fn render_station_map(container_id: &str, data_json: &str, config_json: &str) {
    let escaped_data = data_json.replace('\'', "\\'").replace('\n', "");
    let escaped_config = config_json.replace('\'', "\\'").replace('\n', "");
    call_js(&format!(
        r#"
        (function() {{
            var poll = setInterval(function() {{
                if (window.__baqChartsReady &&
                    typeof L !== 'undefined' &&
                    typeof window.renderStationMap !== 'undefined' &&
                    document.getElementById('{container_id}')) {{
                    clearInterval(poll);
                    try {{
                        window.renderStationMap('{container_id}', '{escaped_data}', '{escaped_config}');
                    }} catch(e) {{ console.error('[BAQ] renderStationMap error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
    ));
}

/// Destroy/clean up a chart in the given container.
pub fn destroy_chart(container_id: &str) {
    call_js(&format!(
        "var el = document.getElementById('{}'); if (el) el.innerHTML = '';",
        container_id
    ));
}
