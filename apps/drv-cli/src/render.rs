//! Text rendering of dashboards and transformation reports

use comfy_table::{presets::UTF8_FULL, Table};
use drv_stats::{ChartSeries, Dashboard, Figure, Moments, Skew, TransformReport};

/// Width of the longest bar in a text chart
const BAR_WIDTH: usize = 40;

fn format_value(value: f64, precision: usize) -> String {
    if value.is_nan() {
        "-".to_string()
    } else {
        format!("{:.*}", precision, value)
    }
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(header);
    table
}

/// Render the dashboard for X
pub fn dashboard(dashboard: &Dashboard, precision: usize) -> String {
    let mut pmf = new_table(vec!["x", "P(X = x)", "P(X <= x)"]);
    let cdf = dashboard.distribution.cumulative();
    for ((x, p), c) in dashboard.distribution.rows().zip(cdf) {
        pmf.add_row(vec![
            x.to_string(),
            format_value(p, precision),
            format_value(c, precision),
        ]);
    }

    let mut stats = new_table(vec!["Statistic", "X"]);
    for (label, value) in dashboard.summary.entries() {
        stats.add_row(vec![label.to_string(), format_value(value, precision)]);
    }

    let mut out = String::new();
    out.push_str(&format!("{}\n\n{}\n\n", pmf, stats));
    out.push_str(&skew_line("X", dashboard.skew));
    out.push_str(&figure(&dashboard.figure, precision));
    out
}

/// Render the report for g(X), alongside the statistics of X
pub fn transform_report(report: &TransformReport, precision: usize) -> String {
    let mut rows = new_table(vec!["x", "g(x)", "P(X = x)"]);
    for row in &report.rows {
        rows.add_row(vec![
            row.x.to_string(),
            format_value(row.gx, precision),
            format_value(row.probability, precision),
        ]);
    }

    let mut stats = new_table(vec!["Statistic", "X", "g(X)"]);
    for ((label, original), (_, transformed)) in
        report.original.entries().into_iter().zip(report.summary.entries())
    {
        stats.add_row(vec![
            label.to_string(),
            format_value(original, precision),
            format_value(transformed, precision),
        ]);
    }

    let mut out = format!("g(x) = {}\n", report.normalized);
    out.push_str(&moments_line("g(X)", &report.summary.moments(), precision));
    out.push_str(&format!("{}\n\n{}\n\n", rows, stats));
    out.push_str(&skew_line("g(X)", report.skew));
    out.push_str(&figure(&report.figure, precision));
    out
}

fn moments_line(label: &str, moments: &Moments, precision: usize) -> String {
    format!(
        "E({label}) = {}, Var({label}) = {}, S.D.({label}) = {}\n\n",
        format_value(moments.mean, precision),
        format_value(moments.variance, precision),
        format_value(moments.std_dev, precision),
    )
}

fn skew_line(label: &str, skew: Skew) -> String {
    format!("Is {} skewed? {}\n\n", label, skew.describe())
}

fn figure(figure: &Figure, precision: usize) -> String {
    format!(
        "{}\n{}",
        bars(&figure.pmf, precision),
        bars(&figure.cdf, precision)
    )
}

/// Horizontal bar chart, one line per category
pub fn bars(series: &ChartSeries, precision: usize) -> String {
    let mut out = format!("{}\n", series.title);
    let max = series.max_value();
    let labels: Vec<String> = series
        .categories
        .iter()
        .map(|&c| format_value(c, if c.fract() == 0.0 { 0 } else { precision }))
        .collect();
    let label_width = labels.iter().map(String::len).max().unwrap_or(0);

    for (label, (_, value)) in labels.iter().zip(series.bars()) {
        let len = if max > 0.0 {
            (value / max * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        out.push_str(&format!(
            "{:>width$} | {} {}\n",
            label,
            "#".repeat(len),
            format_value(value, precision),
            width = label_width
        ));
    }
    out
}
