/// ASCII rasterizer for terminal rendering
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use cubecut_core::{FilledPolygon, Frame, Line2, LineStyle, Rgb, Viewport};
use nalgebra::Point2;
use std::io::Write;

const SOLID: char = '#';
const DASHED: char = '.';
const FILL: char = '@';
const BLANK: char = ' ';

/// Cells drawn, then skipped, along a dashed edge
const DASH_RUN: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    character: char,
    color: Color,
}

impl Cell {
    const EMPTY: Cell = Cell {
        character: BLANK,
        color: Color::White,
    };
}

/// Character-grid renderer for scene frames.
///
/// Terminal cells are about twice as tall as they are wide, so a square
/// viewport should be given a grid twice as wide as it is high.
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::EMPTY; width * height],
        }
    }

    /// Largest grid with a 2:1 cell ratio that fits in `columns` x `rows`
    pub fn fitting(columns: usize, rows: usize) -> Self {
        let height = rows.min(columns / 2);
        Self::new(height * 2, height)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }

    /// Rasterize lines in order, then the polygon on top of them
    pub fn render_frame(&mut self, frame: &Frame) {
        self.clear();
        for line in &frame.lines {
            self.draw_line(line, &frame.bounds);
        }
        if let Some(polygon) = &frame.polygon {
            self.fill_polygon(polygon, &frame.bounds);
        }
    }

    fn draw_line(&mut self, line: &Line2, bounds: &Viewport) {
        let (x0, y0) = bounds.to_screen(&line.from, self.width, self.height);
        let (x1, y1) = bounds.to_screen(&line.to, self.width, self.height);

        let steps = (x1 - x0).abs().max((y1 - y0).abs()).ceil().max(1.0) as usize;
        let character = match line.style {
            LineStyle::Solid => SOLID,
            LineStyle::Dashed => DASHED,
        };

        for step in 0..=steps {
            if line.style == LineStyle::Dashed && (step / DASH_RUN) % 2 == 1 {
                continue;
            }
            let t = step as f64 / steps as f64;
            let x = x0 + (x1 - x0) * t;
            let y = y0 + (y1 - y0) * t;
            self.plot(x, y, character, Color::White);
        }
    }

    fn fill_polygon(&mut self, polygon: &FilledPolygon, bounds: &Viewport) {
        if polygon.points.len() < 3 {
            return;
        }

        // Bounding box in cell space
        let corners: Vec<(f64, f64)> = polygon
            .points
            .iter()
            .map(|p| bounds.to_screen(p, self.width, self.height))
            .collect();
        let min_x = corners.iter().map(|c| c.0).fold(f64::INFINITY, f64::min);
        let max_x = corners.iter().map(|c| c.0).fold(f64::NEG_INFINITY, f64::max);
        let min_y = corners.iter().map(|c| c.1).fold(f64::INFINITY, f64::min);
        let max_y = corners.iter().map(|c| c.1).fold(f64::NEG_INFINITY, f64::max);

        // Clip to grid bounds
        let min_x = (min_x.floor().max(0.0)) as usize;
        let min_y = (min_y.floor().max(0.0)) as usize;
        let max_x = (max_x.ceil() as usize).min(self.width);
        let max_y = (max_y.ceil() as usize).min(self.height);

        let color = to_color(polygon.color);
        for y in min_y..max_y {
            for x in min_x..max_x {
                let center =
                    bounds.to_logical(x as f64 + 0.5, y as f64 + 0.5, self.width, self.height);
                if contains(&polygon.points, &center) {
                    self.cells[y * self.width + x] = Cell {
                        character: FILL,
                        color,
                    };
                }
            }
        }
    }

    fn plot(&mut self, x: f64, y: f64, character: char, color: Color) {
        if self.cells.is_empty()
            || x < 0.0
            || y < 0.0
            || x > self.width as f64
            || y > self.height as f64
        {
            return;
        }
        // points on the far edge belong to the last cell
        let col = (x as usize).min(self.width - 1);
        let row = (y as usize).min(self.height - 1);
        self.cells[row * self.width + col] = Cell { character, color };
    }

    pub fn char_at(&self, x: usize, y: usize) -> char {
        self.cells[y * self.width + x].character
    }

    /// Grid contents without colour, one line per row
    pub fn to_plain_string(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in self.cells.chunks(self.width.max(1)) {
            out.extend(row.iter().map(|cell| cell.character));
            out.push('\n');
        }
        out
    }

    /// Queue the grid with its top-left corner at terminal cell (`column`, `row`)
    pub fn draw<W: Write>(&self, writer: &mut W, column: u16, row: u16) -> std::io::Result<()> {
        writer.queue(SetBackgroundColor(to_color(Rgb::BLACK)))?;
        for y in 0..self.height {
            writer.queue(cursor::MoveTo(column, row + y as u16))?;
            for x in 0..self.width {
                let cell = self.cells[y * self.width + x];
                writer.queue(SetForegroundColor(cell.color))?;
                writer.queue(Print(cell.character))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

pub(crate) fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Even-odd point-in-polygon test
fn contains(polygon: &[Point2<f64>], p: &Point2<f64>) -> bool {
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (a, b) = (polygon[i], polygon[j]);
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}
