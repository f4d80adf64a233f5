//! Fixed chart sequence and page layout of a tardiness report.
//!
//! Chart order: four bar charts (employee minutes, employee instances,
//! manager minutes, manager distinct employees), one time-series chart per
//! employee, then the grid of all time series. The document holds the four
//! bar charts and the grid, one grid row per page.
use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{Result, TardyError};
use crate::model::scope::ReportScope;
use crate::render::canvas::Rgb;
use crate::render::chart::{Bar, BarChart, Chart, GridChart, LineChart};
use crate::render::pdf::write_pdf;
use crate::render::svg::render_svg;
use crate::service::dto::ReportData;

pub const REPORT_TITLE: &str = "Employee Late Punch Report";
pub const GRID_COLUMNS: usize = 3;

const BAR_SIZE: (f64, f64) = (1200.0, 700.0);
const SERIES_SIZE: (f64, f64) = (900.0, 500.0);
const TILE_SIZE: (f64, f64) = (400.0, 260.0);
const GRID_HEADER: f64 = 60.0;

#[derive(Debug, Clone, PartialEq)]
pub struct NamedChart {
    pub file_name: String,
    pub chart: Chart,
    pub size: (f64, f64),
}

/// The four aggregate bar charts, in report order.
pub fn bar_charts(data: &ReportData) -> Vec<Chart> {
    let agg = &data.aggregation;
    vec![
        Chart::Bar(BarChart {
            title: "Total Late Minutes by Employee".into(),
            value_label: "Total Late Minutes".into(),
            color: Rgb::MINUTES,
            bars: agg
                .employees_by_minutes()
                .into_iter()
                .map(|e| Bar { label: e.name.clone(), value: e.total_minutes })
                .collect(),
        }),
        Chart::Bar(BarChart {
            title: "Number of Late Instances by Employee".into(),
            value_label: "Number of Late Instances".into(),
            color: Rgb::INSTANCES,
            bars: agg
                .employees_by_instances()
                .into_iter()
                .map(|e| Bar { label: e.name.clone(), value: e.instance_count as u64 })
                .collect(),
        }),
        Chart::Bar(BarChart {
            title: "Total Late Minutes by Manager".into(),
            value_label: "Total Late Minutes".into(),
            color: Rgb::MANAGER,
            bars: agg
                .managers_by_minutes()
                .into_iter()
                .map(|m| Bar { label: m.manager.clone(), value: m.total_minutes })
                .collect(),
        }),
        Chart::Bar(BarChart {
            title: "Tardy Employees by Manager".into(),
            value_label: "Distinct Employees".into(),
            color: Rgb::DISTINCT,
            bars: agg
                .managers_by_distinct()
                .into_iter()
                .map(|m| Bar { label: m.manager.clone(), value: m.distinct_employees as u64 })
                .collect(),
        }),
    ]
}

pub fn series_charts(data: &ReportData) -> Vec<LineChart> {
    data.series
        .iter()
        .map(|s| LineChart::from_series(s, data.note.as_ref()))
        .collect()
}

pub fn series_grid(data: &ReportData) -> GridChart {
    GridChart {
        title: "Late Minutes Over Time".into(),
        columns: GRID_COLUMNS,
        tiles: series_charts(data),
    }
}

/// Every chart of the report with its image file name, in report order.
pub fn chart_set(data: &ReportData) -> Vec<NamedChart> {
    const BAR_NAMES: [&str; 4] = [
        "01_employee_minutes.svg",
        "02_employee_instances.svg",
        "03_manager_minutes.svg",
        "04_manager_distinct.svg",
    ];

    let mut out: Vec<NamedChart> = bar_charts(data)
        .into_iter()
        .zip(BAR_NAMES)
        .map(|(chart, name)| NamedChart {
            file_name: name.to_string(),
            chart,
            size: BAR_SIZE,
        })
        .collect();

    for (i, (series, chart)) in data.series.iter().zip(series_charts(data)).enumerate() {
        out.push(NamedChart {
            file_name: format!("05_series_{:02}_{}.svg", i + 1, slug(&series.employee)),
            chart: Chart::Line(chart),
            size: SERIES_SIZE,
        });
    }

    let grid = series_grid(data);
    let rows = grid.rows().max(1) as f64;
    out.push(NamedChart {
        file_name: "06_series_grid.svg".to_string(),
        chart: Chart::Grid(grid),
        size: (
            TILE_SIZE.0 * GRID_COLUMNS as f64,
            TILE_SIZE.1 * rows + GRID_HEADER,
        ),
    });
    out
}

/// Pages of the exported document: the four bar charts, then one page per
/// grid row.
pub fn document_pages(data: &ReportData) -> Vec<Chart> {
    let mut pages = bar_charts(data);
    pages.extend(series_grid(data).split_rows().into_iter().map(Chart::Grid));
    pages
}

pub fn page_count(employee_count: usize) -> usize {
    4 + employee_count.div_ceil(GRID_COLUMNS)
}

pub fn report_file_name(scope: &ReportScope) -> String {
    format!("tardiness_report_{}.pdf", scope.slug())
}

fn slug(name: &str) -> String {
    let mut out = String::new();
    for c in name.trim().chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.ends_with('_') {
            out.push('_');
        }
    }
    let trimmed = out.trim_matches('_');
    if trimmed.is_empty() {
        "employee".to_string()
    } else {
        trimmed.to_string()
    }
}

fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| TardyError::io(dir, e))
}

/// Writes every chart as an SVG file under `dir`, returning the paths in
/// report order.
pub fn write_chart_images(data: &ReportData, dir: &Path) -> Result<Vec<PathBuf>> {
    ensure_dir(dir)?;
    let mut written = Vec::new();
    for named in chart_set(data) {
        let path = dir.join(&named.file_name);
        let svg = render_svg(&named.chart, named.size.0, named.size.1);
        fs::write(&path, svg).map_err(|e| TardyError::io(&path, e))?;
        written.push(path);
    }
    info!(dir = %dir.display(), charts = written.len(), "wrote chart images");
    Ok(written)
}

/// Writes the PDF document under `dir` and returns its path.
pub fn export_pdf(data: &ReportData, dir: &Path) -> Result<PathBuf> {
    ensure_dir(dir)?;
    let path = dir.join(report_file_name(&data.scope));
    let pages = document_pages(data);
    let header = format!("{} - {}", REPORT_TITLE, data.scope.label());
    write_pdf(REPORT_TITLE, &header, &pages, &path)?;
    info!(path = %path.display(), pages = pages.len(), "exported report");
    Ok(path)
}
