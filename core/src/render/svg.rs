use svg::node::element::{Polyline, Rectangle, Text};
use svg::{Document, Node};

use crate::render::canvas::{Anchor, Area, Canvas, Rgb};
use crate::render::chart::Chart;

const FONT_FAMILY: &str = "Helvetica, Arial, sans-serif";

/// Canvas producing an SVG document in pixel units.
pub struct SvgCanvas {
    document: Document,
}

impl SvgCanvas {
    pub fn new(width: f64, height: f64) -> Self {
        let document = Document::new()
            .set("viewBox", (0.0, 0.0, width, height))
            .set("width", width)
            .set("height", height);
        Self { document }
    }

    pub fn into_document(self) -> Document {
        self.document
    }
}

impl Canvas for SvgCanvas {
    fn fill_rect(&mut self, area: Area, color: Rgb) {
        self.document.append(
            Rectangle::new()
                .set("x", area.x)
                .set("y", area.y)
                .set("width", area.w)
                .set("height", area.h)
                .set("fill", color.to_css()),
        );
    }

    fn polyline(&mut self, points: &[(f64, f64)], color: Rgb, width: f64) {
        let points = points
            .iter()
            .map(|(x, y)| format!("{:.2},{:.2}", x, y))
            .collect::<Vec<_>>()
            .join(" ");
        self.document.append(
            Polyline::new()
                .set("points", points)
                .set("fill", "none")
                .set("stroke", color.to_css())
                .set("stroke-width", width),
        );
    }

    fn text(&mut self, x: f64, y: f64, size: f64, anchor: Anchor, color: Rgb, content: &str) {
        let anchor = match anchor {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        };
        self.document.append(
            Text::new()
                .set("x", x)
                .set("y", y)
                .set("font-size", size)
                .set("font-family", FONT_FAMILY)
                .set("text-anchor", anchor)
                .set("fill", color.to_css())
                .add(svg::node::Text::new(content)),
        );
    }
}

pub fn render_svg(chart: &Chart, width: f64, height: f64) -> String {
    let mut canvas = SvgCanvas::new(width, height);
    chart.draw(&mut canvas, Area::new(0.0, 0.0, width, height));
    canvas.into_document().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::chart::{Bar, BarChart};

    #[test]
    fn test_svg_contains_bars_and_labels() {
        let chart = Chart::Bar(BarChart {
            title: "Total Late Minutes by Employee".into(),
            value_label: "Minutes".into(),
            color: Rgb::MINUTES,
            bars: vec![Bar { label: "Alice".into(), value: 15 }],
        });
        let out = render_svg(&chart, 1200.0, 700.0);

        assert!(out.contains("<svg"));
        assert!(out.contains("Total Late Minutes by Employee"));
        assert!(out.contains("Alice"));
        assert!(out.contains("rgb(13,110,253)"));
    }
}
