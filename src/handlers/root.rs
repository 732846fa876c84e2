//! Root endpoint handler for the live dashboard.
//!
//! This module provides the `/` endpoint. The page is static apart from the
//! host name; its script polls `/api/stats` every two seconds and draws three
//! donut gauges, the network counters and the top process list.

use axum::{
    extract::State,
    response::{Html, IntoResponse},
};
use tracing::{debug, instrument};

use crate::state::SharedState;

/// Placeholder replaced with the escaped host name.
const HOST_PLACEHOLDER: &str = "{{HOST}}";

const DASHBOARD_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>System Monitoring Dashboard</title>
    <script src="https://cdn.plot.ly/plotly-2.24.1.min.js"></script>
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            margin: 0;
            padding: 20px;
            background: #f5f5f5;
            line-height: 1.6;
        }
        .container {
            max-width: 1100px;
            margin: 0 auto;
            background: white;
            padding: 30px 40px;
            border-radius: 8px;
            box-shadow: 0 2px 8px rgba(0,0,0,0.1);
        }
        h1 {
            color: #333;
            border-bottom: 3px solid #007bff;
            padding-bottom: 15px;
            margin-bottom: 10px;
        }
        .meta { color: #666; }
        .description { color: #444; max-width: 850px; }
        .row {
            display: flex;
            justify-content: space-around;
            flex-wrap: wrap;
            margin-top: 25px;
        }
        .card {
            width: 320px;
            text-align: center;
            background: #f8f9fa;
            border-radius: 8px;
            padding: 15px;
            margin: 10px;
        }
        .card h3 { margin: 0 0 10px 0; color: #333; }
        h2 {
            color: #555;
            margin-top: 35px;
            border-bottom: 1px solid #ddd;
            padding-bottom: 5px;
        }
        pre {
            background: #e9ecef;
            padding: 10px;
            border-radius: 4px;
            font-family: 'Courier New', monospace;
            font-size: 14px;
        }
        .proc {
            padding: 4px 8px;
            border-left: 4px solid #007bff;
            margin: 4px 0;
            background: #f8f9fa;
            font-family: 'Courier New', monospace;
        }
    </style>
</head>
<body>
<div class="container">
    <h1>System Monitoring Dashboard</h1>
    <div class="meta"><strong>Host:</strong> <span id="host">{{HOST}}</span></div>
    <p class="description">
        Live <b>CPU</b>, <b>Memory</b> and <b>Disk</b> usage in percent, followed by
        host-wide <b>network counters</b> and the <b>top processes by CPU</b>.
        The page refreshes every two seconds.
    </p>

    <div class="row">
        <div class="card"><h3>CPU Usage (%)</h3><div id="cpu"></div></div>
        <div class="card"><h3>Memory Usage (%)</h3><div id="mem"></div></div>
        <div class="card"><h3>Disk Usage (%)</h3><div id="disk"></div></div>
    </div>

    <h2>Network Statistics</h2>
    <pre id="netpre"></pre>

    <h2>Top Processes (by CPU)</h2>
    <div id="procs"></div>
</div>

<script>
const POLL_INTERVAL_MS = 2000;
const GREEN = '#cfeead', YELLOW = '#ffef93', RED = '#ff6b6b', TRACK = '#eee';

let pollTimer = null;
let inflight = null;
let stopped = false;

function gaugeColor(value) {
    if (value > 80) return RED;
    if (value > 50) return YELLOW;
    return GREEN;
}

function drawGauge(container, value) {
    const known = typeof value === 'number' && isFinite(value);
    const v = known ? Math.max(0, Math.min(100, Math.round(value))) : 0;
    const data = [{
        type: 'pie',
        hole: 0.7,
        values: known ? [v, 100 - v] : [1],
        marker: { colors: known ? [gaugeColor(v), TRACK] : [TRACK] },
        textinfo: 'none',
        hoverinfo: 'none',
        sort: false,
        showlegend: false
    }];
    const layout = {
        margin: { t: 20, b: 20, l: 20, r: 20 },
        height: 260,
        annotations: [{ text: known ? String(v) : '-', showarrow: false, font: { size: 30 } }]
    };
    Plotly.react(container, data, layout, { displayModeBar: false });
}

function renderProcesses(procs) {
    const root = document.getElementById('procs');
    root.replaceChildren();
    for (const p of Array.isArray(procs) ? procs : []) {
        const row = document.createElement('div');
        row.className = 'proc';
        row.textContent = `${p.pid} | ${p.name || ''} | CPU: ${p.cpu}% | MEM: ${p.mem}%`;
        root.appendChild(row);
    }
}

async function refresh() {
    inflight = new AbortController();
    try {
        const res = await fetch('/api/stats', { signal: inflight.signal });
        if (!res.ok) throw new Error('HTTP ' + res.status);
        const s = await res.json();
        drawGauge('cpu', s.cpu);
        drawGauge('mem', s.memory);
        drawGauge('disk', s.disk);
        document.getElementById('netpre').textContent = JSON.stringify(s.net || {}, null, 2);
        renderProcesses(s.top_processes);
    } catch (e) {
        console.error(e);
    } finally {
        inflight = null;
        if (!stopped) pollTimer = setTimeout(refresh, POLL_INTERVAL_MS);
    }
}

function stopPolling() {
    stopped = true;
    if (pollTimer !== null) clearTimeout(pollTimer);
    if (inflight !== null) inflight.abort();
}

window.addEventListener('pagehide', stopPolling);

drawGauge('cpu');
drawGauge('mem');
drawGauge('disk');
refresh();
</script>
</body>
</html>"#;

/// Escapes text for inclusion in HTML element content.
fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders the dashboard page for `hostname`.
pub fn render_dashboard(hostname: &str) -> String {
    DASHBOARD_TEMPLATE.replace(HOST_PLACEHOLDER, &escape_html(hostname))
}

/// Handler for the root `/` endpoint.
#[instrument(skip(state))]
pub async fn root_handler(State(state): State<SharedState>) -> impl IntoResponse {
    debug!("Processing / request");
    Html(render_dashboard(&state.hostname))
}
