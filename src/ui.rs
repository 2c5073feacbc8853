use crate::models::FormDefaults;
use crate::view::{ChartData, DashboardLoad, DashboardView, DurationOption, Granularity, TableRow, ViewState, option_list};
use chrono::NaiveDate;
use std::fmt::Write;

pub fn render_index(state: ViewState, load: &DashboardLoad, today: NaiveDate, defaults: FormDefaults) -> String {
    let (view, banner) = match load {
        DashboardLoad::Ready(dashboard) => (Some(dashboard.render(state, today)), String::new()),
        DashboardLoad::Unavailable(reason) => (
            None,
            format!(
                r#"<div class="status" data-type="error" role="alert">Data unavailable: {}</div>"#,
                escape_html(reason)
            ),
        ),
    };

    let options = match &view {
        Some(view) => view.options.clone(),
        None => option_list(state),
    };

    INDEX_HTML
        .replace("{{GRANULARITY_OPTIONS}}", &render_granularity_options(state.granularity))
        .replace("{{DURATION_OPTIONS}}", &render_duration_options(&options))
        .replace("{{BANNER}}", &banner)
        .replace("{{HIDDEN}}", if view.is_some() { "" } else { "hidden" })
        .replace("{{TABLE}}", &view.as_ref().map(render_table).unwrap_or_default())
        .replace("{{CHART_DATA}}", &view.as_ref().map(|view| chart_json(&view.chart)).unwrap_or_else(|| "null".into()))
        .replace("{{TODAY}}", &today.to_string())
        .replace("{{WEIGHT}}", &format!("{:.1}", defaults.weight))
        .replace(
            "{{BODY_FAT}}",
            &defaults.body_fat.map(|value| format!("{value:.1}")).unwrap_or_default(),
        )
}

fn render_granularity_options(selected: Granularity) -> String {
    Granularity::ALL
        .iter()
        .map(|granularity| {
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                granularity.as_str(),
                if *granularity == selected { " selected" } else { "" },
                granularity.label()
            )
        })
        .collect()
}

fn render_duration_options(options: &[DurationOption]) -> String {
    options
        .iter()
        .map(|option| {
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                escape_html(&option.value),
                if option.selected { " selected" } else { "" },
                escape_html(&option.label)
            )
        })
        .collect()
}

fn render_table(view: &DashboardView) -> String {
    let mut html = String::from("<thead><tr><th>Date</th><th>Weight (kg)</th><th>Body fat (%)</th>");
    if view.show_change_rate {
        html.push_str("<th>Weight change (%)</th>");
    }
    html.push_str("</tr></thead><tbody>");

    if view.table.is_empty() {
        let columns = if view.show_change_rate { 4 } else { 3 };
        let _ = write!(html, r#"<tr><td colspan="{columns}" class="empty">No measurements in this period</td></tr>"#);
    }

    for row in &view.table {
        render_row(&mut html, row, view.show_change_rate);
    }

    html.push_str("</tbody>");
    html
}

fn render_row(html: &mut String, row: &TableRow, show_change_rate: bool) {
    let _ = write!(
        html,
        "<tr><td>{}</td><td>{}</td><td>{}</td>",
        escape_html(&row.date),
        format_value(row.weight),
        format_value(row.body_fat)
    );
    if show_change_rate {
        let _ = write!(html, "<td>{}</td>", format_value(row.weight_change_rate));
    }
    html.push_str("</tr>");
}

fn format_value(value: Option<f64>) -> String {
    match value {
        Some(value) if value.is_finite() => format!("{value}"),
        _ => "-".to_string(),
    }
}

/// JSON for inline `<script>` use. `<` is escaped so a label can never close
/// the script element.
fn chart_json(chart: &ChartData) -> String {
    serde_json::to_string(chart)
        .unwrap_or_else(|_| "null".into())
        .replace('<', "\\u003c")
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Body Composition</title>
  <script src="https://cdn.jsdelivr.net/npm/chart.js@4"></script>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #eef4f1;
      --bg-2: #bfe3d4;
      --ink: #23302b;
      --weight: rgba(255, 99, 132, 1);
      --body-fat: rgba(54, 162, 235, 1);
      --accent: #2f6f5a;
      --card: rgba(255, 255, 255, 0.88);
      --shadow: 0 24px 60px rgba(35, 48, 43, 0.16);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #e2f1ea 60%, #f4f8f6 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(960px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.6rem);
      margin: 0;
    }

    h2 {
      margin: 0 0 12px;
      font-size: 1.3rem;
    }

    .subtitle {
      margin: 6px 0 0;
      color: #5d6863;
    }

    .controls {
      display: flex;
      flex-wrap: wrap;
      gap: 16px;
      align-items: end;
    }

    label {
      display: grid;
      gap: 6px;
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
      color: #75807b;
    }

    select,
    input {
      font: inherit;
      font-size: 1rem;
      padding: 10px 14px;
      border-radius: 12px;
      border: 1px solid rgba(35, 48, 43, 0.18);
      background: white;
      color: var(--ink);
    }

    .card {
      background: white;
      border-radius: 20px;
      padding: 18px;
      border: 1px solid rgba(35, 48, 43, 0.08);
    }

    .card[hidden] {
      display: none;
    }

    table {
      width: 100%;
      border-collapse: collapse;
      font-variant-numeric: tabular-nums;
    }

    th,
    td {
      text-align: right;
      padding: 8px 10px;
      border-bottom: 1px solid rgba(35, 48, 43, 0.08);
    }

    th:first-child,
    td:first-child {
      text-align: left;
    }

    td.empty {
      text-align: center;
      color: #75807b;
    }

    .table-scroll {
      max-height: 420px;
      overflow-y: auto;
    }

    .record {
      display: flex;
      flex-wrap: wrap;
      gap: 16px;
      align-items: end;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 12px 22px;
      font: inherit;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent);
      color: white;
    }

    .status {
      font-size: 0.95rem;
      padding: 14px 18px;
      border-radius: 14px;
    }

    .status[data-type="error"] {
      color: #c63b2b;
      background: rgba(198, 59, 43, 0.08);
    }

    @media (max-width: 600px) {
      .app {
        padding: 28px 22px;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Body Composition</h1>
      <p class="subtitle">Weight and body fat over time.</p>
    </header>

    <form class="controls" id="controls" method="get" action="/">
      <input type="hidden" name="changed" id="changed" value="" />
      <label>Granularity
        <select name="granularity" id="granularity-dropdown">{{GRANULARITY_OPTIONS}}</select>
      </label>
      <label>Period
        <select name="duration" id="duration-dropdown">{{DURATION_OPTIONS}}</select>
      </label>
    </form>

    {{BANNER}}

    <section class="card" {{HIDDEN}}>
      <canvas id="bodyCompositionGraph" height="120"></canvas>
    </section>

    <section class="card" {{HIDDEN}}>
      <div class="table-scroll">
        <table id="body-composition-table">{{TABLE}}</table>
      </div>
    </section>

    <section class="card">
      <h2>Record</h2>
      <form class="record" method="post" action="/records">
        <label>Date
          <input type="date" name="date" value="{{TODAY}}" max="{{TODAY}}" required />
        </label>
        <label>Weight (kg)
          <input type="number" name="weight" step="0.1" min="0.1" max="300" value="{{WEIGHT}}" required />
        </label>
        <label>Body fat (%)
          <input type="number" name="body_fat" step="0.1" min="0" max="99.9" value="{{BODY_FAT}}" />
        </label>
        <button type="submit">Save</button>
      </form>
    </section>
  </main>

  <script>
    const controls = document.getElementById('controls');
    const changed = document.getElementById('changed');

    const submitFrom = (control) => {
      changed.value = control;
      controls.submit();
    };

    document.getElementById('granularity-dropdown')
      .addEventListener('change', () => submitFrom('granularity'));
    document.getElementById('duration-dropdown')
      .addEventListener('change', () => submitFrom('duration'));

    const chartData = {{CHART_DATA}};
    if (chartData && window.Chart) {
      new Chart(document.getElementById('bodyCompositionGraph').getContext('2d'), {
        type: 'line',
        data: {
          labels: chartData.labels,
          datasets: [
            {
              label: 'Weight',
              data: chartData.weight,
              borderColor: 'rgba(255, 99, 132, 1)',
              yAxisID: 'y',
              spanGaps: true
            },
            {
              label: 'Body fat',
              data: chartData.body_fat,
              borderColor: 'rgba(54, 162, 235, 1)',
              yAxisID: 'y1',
              spanGaps: true
            }
          ]
        },
        options: {
          responsive: true,
          interaction: { mode: 'index', intersect: false },
          plugins: { title: { display: true, text: 'Weight and body fat' } },
          scales: {
            y: { type: 'linear', position: 'left', title: { display: true, text: 'Weight (kg)' } },
            y1: {
              type: 'linear',
              position: 'right',
              title: { display: true, text: 'Body fat (%)' },
              grid: { drawOnChartArea: false }
            }
          }
        }
      });
    }
  </script>
</body>
</html>
"#;
