/// Orthographic projection and viewport mapping
use nalgebra::{Point2, Point3};

/// Square logical view window `[-half_extent, half_extent]` on both axes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub half_extent: f64,
}

impl Viewport {
    pub const DEFAULT_HALF_EXTENT: f64 = 2.0;

    pub fn new(half_extent: f64) -> Self {
        Self { half_extent }
    }

    pub fn min(&self) -> f64 {
        -self.half_extent
    }

    pub fn max(&self) -> f64 {
        self.half_extent
    }

    /// Project a 3D point onto the view plane by dropping its z coordinate
    pub fn project(&self, point: &Point3<f64>) -> Point2<f64> {
        Point2::new(point.x, point.y)
    }

    pub fn contains(&self, point: &Point2<f64>) -> bool {
        let range = self.min()..=self.max();
        range.contains(&point.x) && range.contains(&point.y)
    }

    /// Map a logical point to raster space.
    ///
    /// The result is continuous: (0, 0) is the top-left corner of the raster and
    /// (width, height) the bottom-right, with y growing downwards.
    pub fn to_screen(&self, point: &Point2<f64>, width: usize, height: usize) -> (f64, f64) {
        let span = self.max() - self.min();
        let sx = (point.x - self.min()) / span * width as f64;
        let sy = (self.max() - point.y) / span * height as f64;
        (sx, sy)
    }

    /// Inverse of [`Viewport::to_screen`]
    pub fn to_logical(&self, sx: f64, sy: f64, width: usize, height: usize) -> Point2<f64> {
        let span = self.max() - self.min();
        Point2::new(
            self.min() + sx / width as f64 * span,
            self.max() - sy / height as f64 * span,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(Self::DEFAULT_HALF_EXTENT)
    }
}
