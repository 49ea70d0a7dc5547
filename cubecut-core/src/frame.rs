/// Drawable 2D primitives produced by a scene redraw
use std::fmt;

use nalgebra::Point2;

use crate::projection::Viewport;

/// Stroke pattern for a projected edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineStyle {
    Solid,
    /// Edge touches the furthest-back vertex of its shape
    Dashed,
}

/// 24-bit colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);
    /// Fill colour of the cutting plane
    pub const ACCENT: Rgb = Rgb::new(0xff, 0x00, 0x5a);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line2 {
    pub from: Point2<f64>,
    pub to: Point2<f64>,
    pub style: LineStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilledPolygon {
    pub points: Vec<Point2<f64>>,
    pub color: Rgb,
}

/// Everything a front end needs to paint one redraw, in paint order:
/// lines first, then the filled polygon on top.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub bounds: Viewport,
    pub lines: Vec<Line2>,
    pub polygon: Option<FilledPolygon>,
}

impl Frame {
    pub fn new(bounds: Viewport) -> Self {
        Self {
            bounds,
            lines: Vec::new(),
            polygon: None,
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.polygon = None;
    }

    pub fn push_line(&mut self, from: Point2<f64>, to: Point2<f64>, style: LineStyle) {
        self.lines.push(Line2 { from, to, style });
    }

    pub fn fill(&mut self, points: Vec<Point2<f64>>, color: Rgb) {
        self.polygon = Some(FilledPolygon { points, color });
    }

    pub fn dashed_count(&self) -> usize {
        self.lines
            .iter()
            .filter(|line| line.style == LineStyle::Dashed)
            .count()
    }
}
