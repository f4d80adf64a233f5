use chrono::NaiveDate;

use crate::render::canvas::{text_width, Anchor, Area, Canvas, Rgb};
use crate::service::dto::{Annotation, TimeSeries};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bar {
    pub label: String,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarChart {
    pub title: String,
    pub value_label: String,
    pub color: Rgb,
    pub bars: Vec<Bar>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineChart {
    pub title: String,
    pub points: Vec<(NaiveDate, u32)>,
    pub note: Option<Annotation>,
}

impl LineChart {
    pub fn from_series(series: &TimeSeries, note: Option<&Annotation>) -> Self {
        Self {
            title: format!("Late Minutes Over Time for {}", series.employee),
            points: series.points.iter().map(|p| (p.date, p.minutes_late)).collect(),
            note: note.cloned(),
        }
    }

    fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.points.first()?.0, self.points.last()?.0))
    }

    /// The note, if its date falls inside this chart's date range.
    pub fn visible_note(&self) -> Option<&Annotation> {
        let (start, end) = self.date_range()?;
        self.note.as_ref().filter(|n| start <= n.date && n.date <= end)
    }
}

/// Time-series tiles laid out `columns` wide. Unused cells stay blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridChart {
    pub title: String,
    pub columns: usize,
    pub tiles: Vec<LineChart>,
}

impl GridChart {
    pub fn rows(&self) -> usize {
        self.tiles.len().div_ceil(self.columns.max(1))
    }

    /// Splits the grid into one single-row grid per row.
    pub fn split_rows(&self) -> Vec<GridChart> {
        let rows = self.rows();
        self.tiles
            .chunks(self.columns.max(1))
            .enumerate()
            .map(|(i, chunk)| GridChart {
                title: format!("{} ({} of {})", self.title, i + 1, rows),
                columns: self.columns,
                tiles: chunk.to_vec(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Chart {
    Bar(BarChart),
    Line(LineChart),
    Grid(GridChart),
}

impl Chart {
    pub fn title(&self) -> &str {
        match self {
            Chart::Bar(c) => &c.title,
            Chart::Line(c) => &c.title,
            Chart::Grid(c) => &c.title,
        }
    }

    pub fn draw(&self, canvas: &mut dyn Canvas, area: Area) {
        canvas.fill_rect(area, Rgb::WHITE);
        match self {
            Chart::Bar(c) => draw_bar_chart(canvas, area, c),
            Chart::Line(c) => draw_line_chart(canvas, area, c),
            Chart::Grid(c) => draw_grid(canvas, area, c),
        }
    }
}

/// Sizes scale with the area so tiles and full pages share one layout.
struct Metrics {
    title: f64,
    label: f64,
    stroke: f64,
}

impl Metrics {
    fn for_area(area: Area) -> Self {
        let base = area.w.min(area.h * 1.6) / 60.0;
        Self {
            title: base * 1.4,
            label: base,
            stroke: base * 0.15,
        }
    }
}

/// Axis top and tick step for a maximum value; at least one step.
pub fn nice_axis(max: u64) -> (u64, u64) {
    if max == 0 {
        return (1, 1);
    }
    let raw = (max as f64 / 5.0).max(1.0);
    let mag = 10f64.powf(raw.log10().floor());
    let residual = raw / mag;
    let factor = if residual <= 1.0 {
        1.0
    } else if residual <= 2.0 {
        2.0
    } else if residual <= 5.0 {
        5.0
    } else {
        10.0
    };
    let step = ((factor * mag).round() as u64).max(1);
    let top = max.div_ceil(step) * step;
    (top, step)
}

fn fit_label(label: &str, max_chars: usize) -> String {
    let count = label.chars().count();
    if count <= max_chars {
        return label.to_string();
    }
    if max_chars <= 2 {
        return label.chars().take(max_chars).collect();
    }
    let mut out: String = label.chars().take(max_chars - 2).collect();
    out.push_str("..");
    out
}

fn draw_title(canvas: &mut dyn Canvas, area: Area, m: &Metrics, title: &str) {
    let max_chars = (area.w / text_width(1, m.title)).floor() as usize;
    canvas.text(
        area.center_x(),
        area.y + m.title * 1.5,
        m.title,
        Anchor::Middle,
        Rgb::TEXT,
        &fit_label(title, max_chars),
    );
}

fn draw_empty(canvas: &mut dyn Canvas, plot: Area, m: &Metrics) {
    canvas.text(
        plot.center_x(),
        plot.y + plot.h / 2.0,
        m.label,
        Anchor::Middle,
        Rgb::MUTED,
        "No data",
    );
}

/// Horizontal grid lines with value labels; returns the axis top.
fn draw_value_axis(canvas: &mut dyn Canvas, plot: Area, m: &Metrics, max: u64) -> u64 {
    let (top, step) = nice_axis(max);
    let mut tick = 0;
    while tick <= top {
        let y = plot.bottom() - plot.h * (tick as f64 / top as f64);
        canvas.polyline(&[(plot.x, y), (plot.right(), y)], Rgb::GRID, m.stroke);
        canvas.text(
            plot.x - m.label * 0.5,
            y + m.label * 0.35,
            m.label,
            Anchor::End,
            Rgb::MUTED,
            &tick.to_string(),
        );
        tick += step;
    }
    canvas.polyline(
        &[(plot.x, plot.y), (plot.x, plot.bottom()), (plot.right(), plot.bottom())],
        Rgb::TEXT,
        m.stroke * 1.5,
    );
    top
}

fn draw_bar_chart(canvas: &mut dyn Canvas, area: Area, chart: &BarChart) {
    let m = Metrics::for_area(area);
    draw_title(canvas, area, &m, &chart.title);

    let plot = area.inset(m.label * 5.0, m.title * 3.0, m.label * 1.5, m.label * 4.0);
    canvas.text(
        area.x + m.label * 0.8,
        plot.y - m.label,
        m.label,
        Anchor::Start,
        Rgb::MUTED,
        &chart.value_label,
    );

    let max = chart.bars.iter().map(|b| b.value).max().unwrap_or(0);
    let top = draw_value_axis(canvas, plot, &m, max);
    if chart.bars.is_empty() {
        draw_empty(canvas, plot, &m);
        return;
    }

    let slot = plot.w / chart.bars.len() as f64;
    let bar_w = slot * 0.7;
    let label_size = m.label.min(slot / 3.0);
    let max_chars = ((slot / text_width(1, label_size)).floor() as usize).max(1);

    for (i, bar) in chart.bars.iter().enumerate() {
        let h = plot.h * (bar.value as f64 / top as f64);
        let x = plot.x + slot * i as f64 + (slot - bar_w) / 2.0;
        if h > 0.0 {
            canvas.fill_rect(Area::new(x, plot.bottom() - h, bar_w, h), chart.color);
        }
        let cx = x + bar_w / 2.0;
        canvas.text(
            cx,
            plot.bottom() - h - label_size * 0.4,
            label_size,
            Anchor::Middle,
            Rgb::TEXT,
            &bar.value.to_string(),
        );
        canvas.text(
            cx,
            plot.bottom() + label_size * 1.6,
            label_size,
            Anchor::Middle,
            Rgb::TEXT,
            &fit_label(&bar.label, max_chars),
        );
    }
}

fn draw_line_chart(canvas: &mut dyn Canvas, area: Area, chart: &LineChart) {
    let m = Metrics::for_area(area);
    draw_title(canvas, area, &m, &chart.title);

    let plot = area.inset(m.label * 4.0, m.title * 3.0, m.label * 2.5, m.label * 3.0);
    let max = chart.points.iter().map(|p| p.1 as u64).max().unwrap_or(0);
    let top = draw_value_axis(canvas, plot, &m, max);

    let Some((start, end)) = chart.date_range() else {
        draw_empty(canvas, plot, &m);
        return;
    };
    let span = (end - start).num_days().max(1) as f64;
    let x_of = |date: NaiveDate| {
        if start == end {
            plot.center_x()
        } else {
            plot.x + plot.w * ((date - start).num_days() as f64 / span)
        }
    };
    let y_of = |value: u32| plot.bottom() - plot.h * (value as f64 / top as f64);

    let points: Vec<(f64, f64)> = chart.points.iter().map(|&(d, v)| (x_of(d), y_of(v))).collect();
    if points.len() > 1 {
        canvas.polyline(&points, Rgb::SERIES, m.stroke * 2.0);
    }
    let marker = m.stroke * 4.0;
    for &(x, y) in &points {
        canvas.fill_rect(Area::new(x - marker / 2.0, y - marker / 2.0, marker, marker), Rgb::SERIES);
    }

    let label_y = plot.bottom() + m.label * 1.6;
    let fmt = |d: NaiveDate| d.format("%Y-%m-%d").to_string();
    if start == end {
        canvas.text(plot.center_x(), label_y, m.label, Anchor::Middle, Rgb::MUTED, &fmt(start));
    } else {
        canvas.text(plot.x, label_y, m.label, Anchor::Start, Rgb::MUTED, &fmt(start));
        canvas.text(plot.right(), label_y, m.label, Anchor::End, Rgb::MUTED, &fmt(end));
    }

    if let Some(note) = chart.visible_note() {
        let x = x_of(note.date);
        canvas.polyline(&[(x, plot.y), (x, plot.bottom())], Rgb::NOTE, m.stroke * 1.5);
        let max_chars = ((plot.w / 2.0) / text_width(1, m.label)).floor() as usize;
        canvas.text(
            x + m.label * 0.3,
            plot.y + m.label,
            m.label,
            Anchor::Start,
            Rgb::NOTE,
            &fit_label(&note.text, max_chars.max(1)),
        );
    }
}

fn draw_grid(canvas: &mut dyn Canvas, area: Area, chart: &GridChart) {
    let m = Metrics::for_area(area);
    draw_title(canvas, area, &m, &chart.title);

    let body = area.inset(0.0, m.title * 2.5, 0.0, 0.0);
    if chart.tiles.is_empty() {
        draw_empty(canvas, body, &m);
        return;
    }
    let cells = body.cells(chart.columns, chart.rows());
    for (tile, cell) in chart.tiles.iter().zip(cells) {
        let cell = cell.inset(m.label * 0.3, m.label * 0.3, m.label * 0.3, m.label * 0.3);
        Chart::Line(tile.clone()).draw(canvas, cell);
    }
}
