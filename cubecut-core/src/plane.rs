/// Random cutting planes through the cube and the plane-equation solver
use std::fmt;

use log::{debug, info, warn};
use nalgebra::{Point3, Vector3};
use rand::Rng;

use crate::error::{GeometryError, Rejection, SceneError};
use crate::geometry::Wireframe;
use crate::transform::Axis;

/// Plane `A·x + B·y + C·z + D = 0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneEquation {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl PlaneEquation {
    /// Fit the plane through three points using `(p2 - p1) × (p3 - p1)` as its normal
    pub fn through(p1: &Point3<f64>, p2: &Point3<f64>, p3: &Point3<f64>) -> Self {
        let normal = (p2 - p1).cross(&(p3 - p1));
        Self {
            a: normal.x,
            b: normal.y,
            c: normal.z,
            d: -normal.dot(&p1.coords),
        }
    }

    pub fn normal(&self) -> Vector3<f64> {
        Vector3::new(self.a, self.b, self.c)
    }

    pub fn coefficient(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.a,
            Axis::Y => self.b,
            Axis::Z => self.c,
        }
    }

    /// True when any of A, B, C is exactly zero
    pub fn is_degenerate(&self) -> bool {
        self.a == 0.0 || self.b == 0.0 || self.c == 0.0
    }

    /// Signed residual of the plane equation at `point`
    pub fn evaluate(&self, point: &Point3<f64>) -> f64 {
        self.normal().dot(&point.coords) + self.d
    }

    /// Solve the single unset coordinate of `point` so it lies on the plane
    pub fn solve(&self, point: &PartialPoint) -> Result<Point3<f64>, GeometryError> {
        let axis = point.unknown_axis()?;
        let coefficient = self.coefficient(axis);
        if coefficient == 0.0 {
            return Err(GeometryError::ZeroCoefficient(axis));
        }

        let x = point.x.unwrap_or(0.0);
        let y = point.y.unwrap_or(0.0);
        let z = point.z.unwrap_or(0.0);

        Ok(match axis {
            Axis::X => Point3::new(-(self.d + self.c * z + self.b * y) / self.a, y, z),
            Axis::Y => Point3::new(x, -(self.d + self.c * z + self.a * x) / self.b, z),
            Axis::Z => Point3::new(x, y, -(self.d + self.b * y + self.a * x) / self.c),
        })
    }
}

impl fmt::Display for PlaneEquation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.4}x + {:.4}y + {:.4}z + {:.4} = 0",
            self.a, self.b, self.c, self.d
        )
    }
}

/// A point with some coordinates left open
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PartialPoint {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
}

impl PartialPoint {
    pub fn new(x: Option<f64>, y: Option<f64>, z: Option<f64>) -> Self {
        Self { x, y, z }
    }

    /// The one axis left unset, or an error if zero or several are unset
    pub fn unknown_axis(&self) -> Result<Axis, GeometryError> {
        let unknown: Vec<Axis> = Axis::ALL
            .into_iter()
            .filter(|axis| self.get(*axis).is_none())
            .collect();

        match unknown.as_slice() {
            [axis] => Ok(*axis),
            _ => Err(GeometryError::UnderdeterminedPoint {
                unknown: unknown.len(),
            }),
        }
    }

    pub fn get(&self, axis: Axis) -> Option<f64> {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Use `value` for every unset coordinate
    pub fn fill(&self, value: f64) -> Point3<f64> {
        Point3::new(
            self.x.unwrap_or(value),
            self.y.unwrap_or(value),
            self.z.unwrap_or(value),
        )
    }
}

/// A plane slice through the cube, outlined by three sampled seed points
/// followed by two vertices solved from the plane equation.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossSection {
    equation: PlaneEquation,
    outline: Wireframe,
}

impl CrossSection {
    /// Number of outline vertices used for the filled polygon
    pub const FILL_VERTICES: usize = 4;

    pub fn new(equation: PlaneEquation, vertices: Vec<Point3<f64>>) -> Self {
        Self {
            equation,
            outline: Wireframe::closed_loop(vertices),
        }
    }

    pub fn equation(&self) -> &PlaneEquation {
        &self.equation
    }

    /// All vertices, joined in insertion order into one closed loop
    pub fn outline(&self) -> &Wireframe {
        &self.outline
    }

    pub fn seeds(&self) -> &[Point3<f64>] {
        let vertices = self.outline.vertices();
        &vertices[..vertices.len().min(3)]
    }

    pub fn computed(&self) -> &[Point3<f64>] {
        let vertices = self.outline.vertices();
        &vertices[vertices.len().min(3)..]
    }
}

/// Samples seed points on three cube edges and fits a cutting plane through them
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneGenerator {
    band: f64,
    max_attempts: usize,
}

impl PlaneGenerator {
    pub const DEFAULT_BAND: f64 = 0.75;
    pub const DEFAULT_MAX_ATTEMPTS: usize = 10_000;

    /// `band` must be finite and non-negative
    pub fn new(band: f64, max_attempts: usize) -> Result<Self, SceneError> {
        Self::default()
            .with_band(band)
            .map(|generator| generator.with_max_attempts(max_attempts))
    }

    pub fn with_band(mut self, band: f64) -> Result<Self, SceneError> {
        if !(band.is_finite() && band >= 0.0) {
            return Err(SceneError::InvalidBand { band });
        }
        self.band = band;
        Ok(self)
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Half-width of the closed interval random coordinates and computed z values must lie in
    pub fn band(&self) -> f64 {
        self.band
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Retry [`PlaneGenerator::attempt`] until it succeeds or the attempt cap is reached
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<CrossSection, SceneError> {
        for attempt in 1..=self.max_attempts {
            match self.attempt(rng) {
                Ok(section) => {
                    info!(
                        "cutting plane accepted after {attempt} attempt(s): {}",
                        section.equation()
                    );
                    return Ok(section);
                }
                Err(rejection) => debug!("plane attempt {attempt} rejected: {rejection}"),
            }
        }

        warn!("giving up on plane generation after {} attempts", self.max_attempts);
        Err(SceneError::GenerationFailed {
            attempts: self.max_attempts,
        })
    }

    /// One sampling round: three seeds, the fitted plane, and two solved vertices
    pub fn attempt<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<CrossSection, Rejection> {
        let seeds = [
            self.sample(rng, PartialPoint::new(Some(1.0), Some(1.0), None)),
            self.sample(rng, PartialPoint::new(None, Some(1.0), Some(1.0))),
            self.sample(rng, PartialPoint::new(Some(-1.0), None, Some(1.0))),
        ];

        let equation = PlaneEquation::through(&seeds[0], &seeds[1], &seeds[2]);
        if equation.is_degenerate() {
            return Err(Rejection::DegeneratePlane);
        }

        let mut vertices = seeds.to_vec();
        for (x, y) in [(-1.0, -1.0), (1.0, -1.0)] {
            let vertex = equation
                .solve(&PartialPoint::new(Some(x), Some(y), None))
                .map_err(|_| Rejection::DegeneratePlane)?;
            if !(-self.band..=self.band).contains(&vertex.z) {
                return Err(Rejection::OutOfBandIntersection { z: vertex.z });
            }
            vertices.push(vertex);
        }

        Ok(CrossSection::new(equation, vertices))
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R, point: PartialPoint) -> Point3<f64> {
        let value = rng.random_range(-self.band..=self.band);
        point.fill(value)
    }
}

impl Default for PlaneGenerator {
    fn default() -> Self {
        Self {
            band: Self::DEFAULT_BAND,
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
        }
    }
}
