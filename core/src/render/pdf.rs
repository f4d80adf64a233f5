use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Polygon,
};

use crate::error::{Result, TardyError};
use crate::render::canvas::{text_width, Anchor, Area, Canvas, Rgb};
use crate::render::chart::Chart;

/// A4 landscape, millimetres.
pub const PAGE_WIDTH: f64 = 297.0;
pub const PAGE_HEIGHT: f64 = 210.0;
const MARGIN: f64 = 10.0;
const HEADER: f64 = 12.0;
const PT_PER_MM: f64 = 72.0 / 25.4;

/// Canvas drawing onto one PDF page layer in millimetres.
pub struct PdfCanvas<'a> {
    layer: PdfLayerReference,
    font: &'a IndirectFontRef,
    page_height: f64,
}

impl<'a> PdfCanvas<'a> {
    pub fn new(layer: PdfLayerReference, font: &'a IndirectFontRef, page_height: f64) -> Self {
        Self {
            layer,
            font,
            page_height,
        }
    }

    fn point(&self, x: f64, y: f64) -> Point {
        Point::new(Mm(x as f32), Mm((self.page_height - y) as f32))
    }
}

fn pdf_color(color: Rgb) -> Color {
    Color::Rgb(printpdf::Rgb::new(
        color.0 as f32 / 255.0,
        color.1 as f32 / 255.0,
        color.2 as f32 / 255.0,
        None,
    ))
}

impl Canvas for PdfCanvas<'_> {
    fn fill_rect(&mut self, area: Area, color: Rgb) {
        let ring = vec![
            (self.point(area.x, area.y), false),
            (self.point(area.right(), area.y), false),
            (self.point(area.right(), area.bottom()), false),
            (self.point(area.x, area.bottom()), false),
        ];
        self.layer.set_fill_color(pdf_color(color));
        self.layer.add_polygon(Polygon {
            rings: vec![ring],
            mode: PaintMode::Fill,
            winding_order: WindingOrder::NonZero,
        });
    }

    fn polyline(&mut self, points: &[(f64, f64)], color: Rgb, width: f64) {
        if points.len() < 2 {
            return;
        }
        self.layer.set_outline_color(pdf_color(color));
        self.layer.set_outline_thickness((width * PT_PER_MM) as f32);
        self.layer.add_line(Line {
            points: points.iter().map(|&(x, y)| (self.point(x, y), false)).collect(),
            is_closed: false,
        });
    }

    fn text(&mut self, x: f64, y: f64, size: f64, anchor: Anchor, color: Rgb, content: &str) {
        // Built-in fonts carry no metrics here, so anchoring uses an estimate.
        let width = text_width(content.chars().count(), size);
        let x = match anchor {
            Anchor::Start => x,
            Anchor::Middle => x - width / 2.0,
            Anchor::End => x - width,
        };
        self.layer.set_fill_color(pdf_color(color));
        self.layer.use_text(
            content,
            (size * PT_PER_MM) as f32,
            Mm(x as f32),
            Mm((self.page_height - y) as f32),
            self.font,
        );
    }
}

fn render_err<E: std::fmt::Debug>(e: E) -> TardyError {
    TardyError::Render(format!("{e:?}"))
}

/// Writes one landscape page per chart, each with a header line above the
/// chart drawn full-page.
pub fn write_pdf(title: &str, header: &str, pages: &[Chart], path: &Path) -> Result<()> {
    let (doc, first_page, first_layer) =
        PdfDocument::new(title, Mm(PAGE_WIDTH as f32), Mm(PAGE_HEIGHT as f32), "Layer 1");
    let font = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(render_err)?;

    let mut first = Some((first_page, first_layer));
    for chart in pages {
        let (page, layer) = match first.take() {
            Some(indices) => indices,
            None => doc.add_page(Mm(PAGE_WIDTH as f32), Mm(PAGE_HEIGHT as f32), "Layer 1"),
        };
        let layer = doc.get_page(page).get_layer(layer);
        let mut canvas = PdfCanvas::new(layer, &font, PAGE_HEIGHT);

        canvas.text(MARGIN, MARGIN + 4.0, 4.0, Anchor::Start, Rgb::MUTED, header);
        chart.draw(
            &mut canvas,
            Area::new(
                MARGIN,
                MARGIN + HEADER,
                PAGE_WIDTH - 2.0 * MARGIN,
                PAGE_HEIGHT - 2.0 * MARGIN - HEADER,
            ),
        );
    }

    let file = File::create(path).map_err(|e| TardyError::io(path, e))?;
    doc.save(&mut BufWriter::new(file)).map_err(render_err)?;
    Ok(())
}
