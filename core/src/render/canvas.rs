/// 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const TEXT: Rgb = Rgb(33, 37, 41);
    pub const MUTED: Rgb = Rgb(134, 142, 150);
    pub const GRID: Rgb = Rgb(222, 226, 230);
    pub const MINUTES: Rgb = Rgb(13, 110, 253);
    pub const INSTANCES: Rgb = Rgb(25, 135, 84);
    pub const MANAGER: Rgb = Rgb(111, 66, 193);
    pub const DISTINCT: Rgb = Rgb(253, 126, 20);
    pub const SERIES: Rgb = Rgb(13, 110, 253);
    pub const NOTE: Rgb = Rgb(220, 53, 69);

    pub fn to_css(self) -> String {
        format!("rgb({},{},{})", self.0, self.1, self.2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

/// Axis-aligned rectangle, origin top-left, y growing downwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Area {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Area {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.w / 2.0
    }

    pub fn inset(&self, left: f64, top: f64, right: f64, bottom: f64) -> Area {
        Area::new(
            self.x + left,
            self.y + top,
            (self.w - left - right).max(0.0),
            (self.h - top - bottom).max(0.0),
        )
    }

    /// Grid cells in row-major order.
    pub fn cells(&self, columns: usize, rows: usize) -> Vec<Area> {
        let columns = columns.max(1);
        let rows = rows.max(1);
        let cw = self.w / columns as f64;
        let ch = self.h / rows as f64;
        (0..rows)
            .flat_map(|r| {
                (0..columns).map(move |c| Area::new(self.x + c as f64 * cw, self.y + r as f64 * ch, cw, ch))
            })
            .collect()
    }
}

/// Drawing surface shared by the image and document backends.
///
/// Units are backend-defined (pixels for SVG, millimetres for PDF). Text is
/// positioned by its baseline.
pub trait Canvas {
    fn fill_rect(&mut self, area: Area, color: Rgb);
    fn polyline(&mut self, points: &[(f64, f64)], color: Rgb, width: f64);
    fn text(&mut self, x: f64, y: f64, size: f64, anchor: Anchor, color: Rgb, content: &str);
}

/// Rough advance width of `chars` glyphs of a proportional sans font.
pub fn text_width(chars: usize, size: f64) -> f64 {
    chars as f64 * size * 0.55
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells_are_row_major() {
        let cells = Area::new(0.0, 0.0, 300.0, 200.0).cells(3, 2);
        assert_eq!(cells.len(), 6);
        assert_eq!(cells[1], Area::new(100.0, 0.0, 100.0, 100.0));
        assert_eq!(cells[3], Area::new(0.0, 100.0, 100.0, 100.0));
    }

    #[test]
    fn test_inset_never_negative() {
        let a = Area::new(0.0, 0.0, 10.0, 10.0).inset(8.0, 8.0, 8.0, 8.0);
        assert_eq!((a.w, a.h), (0.0, 0.0));
    }
}
