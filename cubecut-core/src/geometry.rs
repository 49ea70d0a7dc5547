/// Geometry primitives for wireframe rendering
use nalgebra::Point3;

use crate::frame::LineStyle;

/// An edge between two vertices of a [`Wireframe`], stored as arena indices
///
/// Segments never copy coordinates, so moving the underlying vertices is
/// reflected by every segment that touches them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Segment {
    pub start: usize,
    pub end: usize,
}

impl Segment {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn touches(&self, index: usize) -> bool {
        self.start == index || self.end == index
    }
}

/// A vertex arena plus the segments connecting it
#[derive(Debug, Clone, PartialEq)]
pub struct Wireframe {
    vertices: Vec<Point3<f64>>,
    segments: Vec<Segment>,
}

impl Wireframe {
    /// Build a wireframe from raw parts.
    ///
    /// Every segment endpoint must index into `vertices`.
    pub fn new(vertices: Vec<Point3<f64>>, segments: Vec<Segment>) -> Self {
        debug_assert!(
            segments
                .iter()
                .all(|s| s.start < vertices.len() && s.end < vertices.len()),
            "segment endpoint out of range"
        );
        Self { vertices, segments }
    }

    /// Connect the vertices in insertion order and close the loop back to the first one
    pub fn closed_loop(vertices: Vec<Point3<f64>>) -> Self {
        let count = vertices.len();
        let segments = (0..count).map(|i| Segment::new(i, (i + 1) % count)).collect();
        Self::new(vertices, segments)
    }

    /// Axis-aligned cube centred on the origin.
    ///
    /// Vertices 0..4 form the top face (z = +half), 4..8 the bottom face, and
    /// the segments are the 4 top edges, the 4 bottom edges and the 4 verticals.
    pub fn cube(size: f64) -> Self {
        let half = size / 2.0;
        let vertices = vec![
            Point3::new(half, half, half),
            Point3::new(half, -half, half),
            Point3::new(-half, -half, half),
            Point3::new(-half, half, half),
            Point3::new(half, half, -half),
            Point3::new(half, -half, -half),
            Point3::new(-half, -half, -half),
            Point3::new(-half, half, -half),
        ];

        let mut segments = Vec::with_capacity(12);
        for face in [0, 4] {
            for i in 0..4 {
                segments.push(Segment::new(face + i, face + (i + 1) % 4));
            }
        }
        for i in 0..4 {
            segments.push(Segment::new(i, i + 4));
        }

        Self::new(vertices, segments)
    }

    pub fn vertices(&self) -> &[Point3<f64>] {
        &self.vertices
    }

    /// Mutable access to coordinates; the vertex count and topology stay fixed
    pub fn vertices_mut(&mut self) -> &mut [Point3<f64>] {
        &mut self.vertices
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Current coordinates of both ends of a segment
    pub fn endpoints(&self, segment: Segment) -> (Point3<f64>, Point3<f64>) {
        (self.vertices[segment.start], self.vertices[segment.end])
    }

    /// Overwrite every coordinate with the matching vertex of `source`.
    ///
    /// Both wireframes must share the same vertex count.
    pub fn reset_from(&mut self, source: &Wireframe) {
        debug_assert_eq!(self.vertices.len(), source.vertices.len());
        for (target, original) in self.vertices.iter_mut().zip(&source.vertices) {
            *target = *original;
        }
    }

    /// Smallest z over all vertices, `None` for an empty wireframe
    pub fn min_z(&self) -> Option<f64> {
        self.vertices.iter().map(|v| v.z).reduce(f64::min)
    }

    /// Hidden-line heuristic: a segment touching a vertex whose z is exactly
    /// the minimum z of the whole wireframe is dashed, every other one solid.
    pub fn classify_segments(&self) -> Vec<LineStyle> {
        let Some(min_z) = self.min_z() else {
            return Vec::new();
        };

        self.segments
            .iter()
            .map(|segment| {
                let (a, b) = self.endpoints(*segment);
                if a.z == min_z || b.z == min_z {
                    LineStyle::Dashed
                } else {
                    LineStyle::Solid
                }
            })
            .collect()
    }
}
