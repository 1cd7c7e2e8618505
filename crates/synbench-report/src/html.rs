//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS/JS inlined, covering
//! every model evaluated in one run.

use anyhow::Result;
use std::path::Path;

use synbench_core::model::Label;
use synbench_core::report::EvalReport;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn label_class(label: Label) -> &'static str {
    match label {
        Label::Correct => "pass",
        Label::Wrong => "fail",
        Label::Guess => "guess",
    }
}

/// Generate an HTML report from the reports of one run.
pub fn generate_html(reports: &[EvalReport]) -> String {
    let mut html = String::new();
    let dataset = reports
        .first()
        .map(|r| r.dataset.name.as_str())
        .unwrap_or("(none)");

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>synbench report: {}</title>\n", html_escape(dataset)));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    let questions = reports.first().map(|r| r.dataset.row_count).unwrap_or(0);
    html.push_str("<header>\n");
    html.push_str("<h1>synbench report</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">Dataset: <strong>{}</strong> | {} questions | {} models | {}</p>\n",
        html_escape(dataset),
        questions,
        reports.len(),
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Summary dashboard
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Summary</h2>\n");
    html.push_str("<table class=\"summary\">\n");
    html.push_str("<thead><tr><th>Model</th><th>Vocabulary</th><th>Correct</th><th>Scored</th><th>Guesses</th><th>Accuracy</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    for r in reports {
        let s = &r.summary;
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            html_escape(&s.model_name),
            s.vocabulary_size,
            s.correct_count,
            s.scored_count,
            r.label_counts().guess,
            s.accuracy_display(),
        ));
    }
    html.push_str("</tbody></table>\n");

    if !reports.is_empty() {
        html.push_str(&generate_bar_chart(reports));
    }
    html.push_str("</section>\n");

    // Per-model details
    for (i, r) in reports.iter().enumerate() {
        html.push_str("<section class=\"results\">\n");
        html.push_str(&format!("<h2>{}</h2>\n", html_escape(&r.summary.model_name)));
        html.push_str(&format!("<table class=\"results-table\" id=\"results-{i}\">\n"));
        html.push_str(&format!(
            "<thead><tr><th onclick=\"sortTable({i}, 0)\">Question</th><th onclick=\"sortTable({i}, 1)\">Answer</th><th onclick=\"sortTable({i}, 2)\">Guess</th><th onclick=\"sortTable({i}, 3)\">Label</th></tr></thead>\n"
        ));
        html.push_str("<tbody>\n");
        for o in &r.outcomes {
            let class = label_class(o.label);
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td class=\"{}\">{}</td></tr>\n",
                html_escape(&o.question_word),
                html_escape(&o.answer_word),
                o.guessed_word.as_deref().map(html_escape).unwrap_or_else(|| "-".into()),
                class,
                o.label,
            ));
        }
        html.push_str("</tbody></table>\n");
        html.push_str("</section>\n");
    }

    // Raw summaries
    let summaries: Vec<_> = reports.iter().map(|r| &r.summary).collect();
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Summaries</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(
        &serde_json::to_string_pretty(&summaries)
            .unwrap_or_default()
            .replace('<', "&lt;")
            .replace('>', "&gt;"),
    );
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    // JavaScript for sorting
    html.push_str("<script>\n");
    html.push_str(JS);
    html.push_str("</script>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(reports: &[EvalReport], path: &Path) -> Result<()> {
    let html = generate_html(reports);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

fn generate_bar_chart(reports: &[EvalReport]) -> String {
    let bar_height = 30;
    let max_width = 400;
    let padding = 10;
    let label_width = 240;

    let total_height = reports.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, r) in reports.iter().enumerate() {
        let y = i * (bar_height + padding) + padding;

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            html_escape(&r.summary.model_name)
        ));

        // Undefined accuracy gets a label but no bar
        let Some(score) = r.summary.accuracy else {
            svg.push_str(&format!(
                "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">n/a</text>\n",
                label_width + 8,
                y + bar_height / 2,
            ));
            continue;
        };
        let width = (score * max_width as f64) as usize;
        let color = if score >= 0.8 {
            "#22c55e"
        } else if score >= 0.5 {
            "#eab308"
        } else {
            "#ef4444"
        };

        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width, y, width, bar_height, color
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{:.1}%</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            score * 100.0
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; --fail: #fde2e2; --guess: #f3f4f6; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; --fail: #7f1d1d; --guess: #1f2937; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); cursor: pointer; }
.pass { background: var(--pass); }
.fail { background: var(--fail); }
.guess { background: var(--guess); font-style: italic; }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;

const JS: &str = r#"
function sortTable(idx, col) {
  const table = document.getElementById('results-' + idx);
  const tbody = table.querySelector('tbody');
  const rows = Array.from(tbody.querySelectorAll('tr'));
  const asc = table.dataset.sortCol == col && table.dataset.sortDir == 'asc' ? false : true;
  rows.sort((a, b) => {
    const va = a.cells[col].textContent;
    const vb = b.cells[col].textContent;
    return asc ? va.localeCompare(vb) : vb.localeCompare(va);
  });
  table.dataset.sortCol = col;
  table.dataset.sortDir = asc ? 'asc' : 'desc';
  rows.forEach(r => tbody.appendChild(r));
}
"#;
