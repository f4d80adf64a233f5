use chrono::Datelike;
use ratatui::{
    prelude::*,
    symbols::Marker,
    widgets::{
        Axis, Bar, BarChart, BarGroup, Block, BorderType, Borders, Chart as LineWidget, Dataset,
        GraphType, Padding, Paragraph,
    },
};
use tardy_core::render::{chart::nice_axis, BarChart as ReportBars, Chart, LineChart};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::tui::app::ViewerApp;

struct Theme {
    primary: Color,
    muted: Color,
    text: Color,
    minutes: Color,
    instances: Color,
    manager: Color,
    distinct: Color,
    series: Color,
    note: Color,
}

const THEME: Theme = Theme {
    primary: Color::Cyan,
    muted: Color::DarkGray,
    text: Color::White,
    minutes: Color::Blue,
    instances: Color::Green,
    manager: Color::Magenta,
    distinct: Color::Yellow,
    series: Color::Cyan,
    note: Color::Red,
};

pub fn draw(frame: &mut Frame, app: &ViewerApp) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Chart + Sidebar
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    draw_header(frame, app, main_layout[0]);

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(75),
            Constraint::Length(1),
            Constraint::Percentage(25),
        ])
        .split(main_layout[1]);

    match app.current_chart() {
        Some(Chart::Bar(chart)) => draw_bars(frame, app.current, chart, content[0]),
        Some(Chart::Line(chart)) => draw_line(frame, chart, content[0]),
        // Grid pages belong to the document only.
        Some(Chart::Grid(_)) | None => frame.render_widget(
            Paragraph::new("No data available").alignment(Alignment::Center),
            content[0],
        ),
    }
    draw_info_panel(frame, app, content[2]);

    let help = Line::from(vec![
        Span::styled("NAV: ", Style::default().fg(THEME.muted)),
        Span::styled("←/→ h/l ", Style::default().fg(THEME.text)),
        Span::raw("  "),
        Span::styled("QUIT: ", Style::default().fg(THEME.muted)),
        Span::styled("q", Style::default().fg(THEME.text)),
    ]);
    frame.render_widget(Paragraph::new(help).alignment(Alignment::Center), main_layout[2]);
}

fn draw_header(frame: &mut Frame, app: &ViewerApp, area: Rect) {
    let header_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(20), Constraint::Min(1), Constraint::Length(40)])
        .split(area);

    let app_title = Paragraph::new(Span::styled(
        "TARDY REPORT",
        Style::default().fg(THEME.primary).add_modifier(Modifier::BOLD),
    ))
    .block(Block::default().padding(Padding::new(0, 0, 1, 0)));
    frame.render_widget(app_title, header_layout[0]);

    let arrow = |enabled: bool, s: &'static str| {
        Span::styled(s, Style::default().fg(if enabled { THEME.text } else { THEME.muted }))
    };
    let nav = Line::from(vec![
        arrow(app.has_previous(), " < "),
        Span::styled(
            format!(" {} ", app.page_label()),
            Style::default().fg(THEME.text).add_modifier(Modifier::BOLD),
        ),
        arrow(app.has_next(), " > "),
    ]);
    frame.render_widget(
        Paragraph::new(nav)
            .alignment(Alignment::Right)
            .block(Block::default().padding(Padding::new(0, 0, 1, 0))),
        header_layout[2],
    );

    frame.render_widget(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(THEME.muted)),
        area,
    );
}

fn chart_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(THEME.muted))
        .title(format!(" {} ", title))
}

/// Cuts `label` to at most `width` terminal columns.
fn truncate(label: &str, width: usize) -> String {
    if label.width() <= width {
        return label.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in label.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

fn bar_color(page: usize) -> Color {
    match page {
        0 => THEME.minutes,
        1 => THEME.instances,
        2 => THEME.manager,
        _ => THEME.distinct,
    }
}

fn draw_bars(frame: &mut Frame, page: usize, chart: &ReportBars, area: Rect) {
    let block = chart_block(&chart.title);
    if chart.bars.is_empty() {
        frame.render_widget(
            Paragraph::new("No data").alignment(Alignment::Center).block(block),
            area,
        );
        return;
    }

    let inner = area.width.saturating_sub(2) as usize;
    let bar_width = (inner / chart.bars.len()).saturating_sub(1).clamp(3, 12);
    let color = bar_color(page);

    let items: Vec<Bar> = chart
        .bars
        .iter()
        .map(|bar| {
            Bar::default()
                .label(truncate(&bar.label, bar_width))
                .value(bar.value)
                .style(Style::default().fg(color))
                .text_value(bar.value.to_string())
        })
        .collect();

    let max = chart.bars.iter().map(|b| b.value).max().unwrap_or(0);
    let widget = BarChart::default()
        .block(block)
        .bar_width(bar_width as u16)
        .bar_gap(1)
        .data(BarGroup::default().bars(&items))
        .max(nice_axis(max).0);
    frame.render_widget(widget, area);
}

fn draw_line(frame: &mut Frame, chart: &LineChart, area: Rect) {
    let block = chart_block(&chart.title);
    let (Some(first), Some(last)) = (chart.points.first(), chart.points.last()) else {
        frame.render_widget(
            Paragraph::new("No data").alignment(Alignment::Center).block(block),
            area,
        );
        return;
    };

    let x_of = |d: chrono::NaiveDate| d.num_days_from_ce() as f64;
    let points: Vec<(f64, f64)> = chart
        .points
        .iter()
        .map(|&(d, v)| (x_of(d), v as f64))
        .collect();

    let (mut x_min, mut x_max) = (x_of(first.0), x_of(last.0));
    if x_min == x_max {
        x_min -= 1.0;
        x_max += 1.0;
    }
    let max = chart.points.iter().map(|p| p.1 as u64).max().unwrap_or(0);
    let y_top = nice_axis(max).0 as f64;

    let note_line = chart.visible_note().map(|note| {
        let x = x_of(note.date);
        (note.text.clone(), [(x, 0.0), (x, y_top)])
    });

    let mut datasets = vec![Dataset::default()
        .name("minutes late")
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(THEME.series))
        .data(&points)];
    if let Some((text, line)) = &note_line {
        datasets.push(
            Dataset::default()
                .name(text.clone())
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(THEME.note))
                .data(line),
        );
    }

    let x_labels = vec![
        first.0.format("%Y-%m-%d").to_string(),
        last.0.format("%Y-%m-%d").to_string(),
    ];
    let y_labels = vec!["0".to_string(), format!("{}", y_top)];

    let widget = LineWidget::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title("Date")
                .style(Style::default().fg(THEME.muted))
                .bounds([x_min, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title("Minutes Late")
                .style(Style::default().fg(THEME.muted))
                .bounds([0.0, y_top])
                .labels(y_labels),
        );
    frame.render_widget(widget, area);
}

fn draw_info_panel(frame: &mut Frame, app: &ViewerApp, area: Rect) {
    let agg = &app.data.aggregation;
    let row = |label: &'static str, value: String, color: Color| {
        Line::from(vec![
            Span::styled(label, Style::default().fg(THEME.muted)),
            Span::styled(value, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        ])
    };

    let mut info_text = vec![
        Line::from(Span::styled("Overview", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(Span::styled(app.data.scope.label(), Style::default().fg(THEME.text))),
        Line::from(""),
        row("Records:   ", agg.total_instances().to_string(), THEME.text),
        row("Minutes:   ", agg.total_minutes().to_string(), THEME.minutes),
        row("Employees: ", agg.employees().len().to_string(), THEME.instances),
        row("Managers:  ", agg.managers().len().to_string(), THEME.manager),
    ];
    if let Some(note) = &app.data.note {
        info_text.push(Line::from(""));
        info_text.push(Line::from(Span::styled("Note", Style::default().fg(THEME.note))));
        info_text.push(Line::from(format!("{} {}", note.date.format("%Y-%m-%d"), note.text)));
    }

    let panel = Paragraph::new(info_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(THEME.muted))
            .title(" Summary "),
    );
    frame.render_widget(panel, area);
}
