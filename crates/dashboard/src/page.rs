//! Server-rendered dashboard page
//!
//! The sliders and the model card are rendered here; the result panel is
//! filled client-side from the `/api/predict` response.

use house_price_core::{DashboardView, InputSpec, INPUT_SPECS, MODEL_CARD};
use std::fmt::Write as _;

const STYLE: &str = r#"
    body { font-family: Arial, sans-serif; margin: 0; background: #f5f5f5; color: #333; }
    .layout { display: flex; min-height: 100vh; }
    .sidebar { width: 320px; padding: 20px; background: #fff; box-shadow: 2px 0 4px rgba(0,0,0,0.1); }
    .main { flex: 1; padding: 30px; max-width: 960px; }
    .slider { margin-bottom: 14px; }
    .slider label { display: flex; justify-content: space-between; font-size: 0.9em; }
    .slider input { width: 100%; }
    button { width: 100%; padding: 10px; background: #4CAF50; color: #fff; border: 0; border-radius: 4px; font-size: 1em; cursor: pointer; }
    button:disabled { background: #bbb; cursor: not-allowed; }
    .notice { padding: 12px; background: #fff3cd; border-left: 4px solid #ff7f0e; margin-bottom: 16px; }
    .price { padding: 16px; background: #e8f5e9; border-left: 4px solid #4CAF50; font-size: 1.3em; }
    .columns { display: flex; gap: 40px; }
    .columns ul { list-style: none; padding: 0; }
    .chart { display: flex; align-items: flex-end; gap: 24px; height: 260px; border-bottom: 1px solid #999; padding: 0 12px; }
    .bar { width: 90px; display: flex; flex-direction: column; justify-content: flex-end; text-align: center; }
    .bar .fill { border-radius: 3px 3px 0 0; }
    .bar-labels { display: flex; gap: 24px; padding: 4px 12px; }
    .bar-labels span { width: 90px; text-align: center; font-size: 0.85em; }
    table { border-collapse: collapse; width: 100%; background: #fff; }
    th, td { border: 1px solid #ddd; padding: 8px; text-align: left; }
    .hidden { display: none; }
"#;

const SCRIPT: &str = r#"
const sliders = document.querySelectorAll('input[type=range]');
sliders.forEach((slider) => {
  slider.addEventListener('input', () => {
    document.getElementById(slider.id + '-value').textContent = slider.value;
  });
});

function el(tag, text) {
  const node = document.createElement(tag);
  if (text !== undefined) node.textContent = text;
  return node;
}

function renderGroup(target, group) {
  target.replaceChildren();
  target.appendChild(el('h4', group.title));
  const list = el('ul');
  group.lines.forEach((line) => {
    const item = el('li');
    item.appendChild(el('strong', line.label + ': '));
    item.appendChild(document.createTextNode(line.value));
    list.appendChild(item);
  });
  target.appendChild(list);
}

function renderChart(report) {
  const colors = Object.fromEntries(report.chart.colors);
  const max = Math.max(...report.comparison.map((row) => row.price_thousands), 1);
  const chart = document.getElementById('chart');
  const labels = document.getElementById('chart-labels');
  chart.replaceChildren();
  labels.replaceChildren();
  document.getElementById('chart-title').textContent = report.chart.title;
  document.getElementById('chart-axis').textContent = report.chart.y_label;
  report.comparison.forEach((row) => {
    const bar = el('div');
    bar.className = 'bar';
    bar.appendChild(el('small', Math.round(row.price_thousands)));
    const fill = el('div');
    fill.className = 'fill';
    fill.style.height = Math.max(0, (row.price_thousands / max) * 220) + 'px';
    fill.style.background = colors[row.series];
    fill.title = row.series;
    bar.appendChild(fill);
    chart.appendChild(bar);
    labels.appendChild(el('span', row.category));
  });
}

function renderImportance(rows) {
  const body = document.getElementById('importance-body');
  body.replaceChildren();
  rows.forEach((row) => {
    const tr = el('tr');
    tr.appendChild(el('td', row.feature));
    tr.appendChild(el('td', row.impact));
    tr.appendChild(el('td', row.rationale));
    body.appendChild(tr);
  });
}

document.getElementById('predict').addEventListener('click', async () => {
  const payload = {};
  sliders.forEach((slider) => {
    payload[slider.id] = slider.dataset.integer === 'true'
      ? parseInt(slider.value, 10)
      : parseFloat(slider.value);
  });
  const response = await fetch('/api/predict', {
    method: 'POST',
    headers: { 'Content-Type': 'application/json' },
    body: JSON.stringify(payload),
  });
  const body = await response.text();
  let view;
  try {
    view = JSON.parse(body);
  } catch (_) {
    view = { error: body };
  }
  const results = document.getElementById('results');
  const error = document.getElementById('error');
  if (!response.ok || view.state !== 'predicted') {
    results.classList.add('hidden');
    error.textContent = view.error || view.notice || 'Prediction unavailable';
    error.classList.remove('hidden');
    return;
  }
  error.classList.add('hidden');
  const report = view.report;
  document.getElementById('price').textContent = 'Estimated Price: ' + report.display_price;
  renderGroup(document.getElementById('summary-property'), report.summary.property);
  renderGroup(document.getElementById('summary-location'), report.summary.location);
  renderChart(report);
  renderImportance(report.importance);
  results.classList.remove('hidden');
});
"#;

/// Escape text for HTML element and attribute content
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

fn render_slider(html: &mut String, spec: &InputSpec) {
    let id = spec.feature.as_str();
    let _ = write!(
        html,
        r#"<div class="slider"><label for="{id}">{label} <output id="{id}-value">{default}</output></label><input type="range" id="{id}" min="{min}" max="{max}" step="{step}" value="{default}" data-integer="{integer}"></div>"#,
        label = escape_html(spec.label),
        default = spec.default,
        min = spec.min,
        max = spec.max,
        step = spec.step,
        integer = spec.integer,
    );
}

fn render_model_card(html: &mut String) {
    let card = &MODEL_CARD;
    html.push_str("<hr><h2>About the Model</h2><ul>");
    let _ = write!(
        html,
        "<li><strong>Model Type</strong>: {}</li><li><strong>Dataset</strong>: {}</li><li><strong>Features Used</strong>: {} ({})</li><li><strong>R&sup2; Score</strong>: ~{:.2} &rarr; {}</li><li><strong>Limitations</strong>:<ul>",
        escape_html(card.model_type),
        escape_html(card.dataset),
        card.feature_count,
        escape_html(card.feature_note),
        card.r2_score,
        escape_html(card.r2_note),
    );
    for limitation in card.limitations {
        let _ = write!(html, "<li>{}</li>", escape_html(limitation));
    }
    html.push_str("</ul></li></ul>");
}

/// Render the full page for the panel's initial state
pub fn render_index(view: &DashboardView) -> String {
    let (enabled, notice) = match view {
        DashboardView::Idle {
            prediction_enabled,
            notice,
        } => (*prediction_enabled, notice.as_deref()),
        DashboardView::Predicted { .. } => (true, None),
    };

    let mut html = String::with_capacity(16 * 1024);
    html.push_str("<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>House Price Predictor</title><style>");
    html.push_str(STYLE);
    html.push_str("</style></head><body><div class=\"layout\"><aside class=\"sidebar\"><h3>Input House Features</h3>");

    for spec in INPUT_SPECS.iter() {
        render_slider(&mut html, spec);
    }
    let _ = write!(
        html,
        r#"<button id="predict"{}>Predict House Price</button></aside>"#,
        if enabled { "" } else { " disabled" }
    );

    html.push_str("<main class=\"main\"><h1>House Price Prediction App</h1><p>This app predicts house prices using a Linear Regression model trained on California housing data.</p>");
    if let Some(notice) = notice {
        let _ = write!(html, r#"<div class="notice">{}</div>"#, escape_html(notice));
    }
    html.push_str(r#"<div id="error" class="notice hidden"></div>"#);

    html.push_str(concat!(
        r#"<section id="results" class="hidden">"#,
        r#"<h2>Predicted House Price</h2><div id="price" class="price"></div>"#,
        r#"<h2>Input Summary</h2><div class="columns"><div id="summary-property"></div><div id="summary-location"></div></div>"#,
        r#"<h2>Price Comparison</h2><h4 id="chart-title"></h4><small id="chart-axis"></small>"#,
        r#"<div id="chart" class="chart"></div><div id="chart-labels" class="bar-labels"></div>"#,
        r#"<h2>What Affects House Prices?</h2>"#,
        r#"<table><thead><tr><th>Feature</th><th>Impact</th><th>Why it matters</th></tr></thead><tbody id="importance-body"></tbody></table>"#,
        r#"</section>"#,
    ));

    render_model_card(&mut html);
    html.push_str("</main></div><script>");
    html.push_str(SCRIPT);
    html.push_str("</script></body></html>");
    html
}
