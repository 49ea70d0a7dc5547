/// Rotation matrices and rotation state
use nalgebra::{Matrix3, Point3};

use crate::error::SceneError;

/// One of the three rotation axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Axes in the order the rotation pipeline applies them
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        }
    }
}

impl TryFrom<usize> for Axis {
    type Error = SceneError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(Axis::X),
            1 => Ok(Axis::Y),
            2 => Ok(Axis::Z),
            other => Err(SceneError::InvalidAxis(other)),
        }
    }
}

/// Rotation angles around the three axes (in degrees)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl RotationState {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    pub fn set(&mut self, axis: Axis, degrees: f64) {
        match axis {
            Axis::X => self.x = degrees,
            Axis::Y => self.y = degrees,
            Axis::Z => self.z = degrees,
        }
    }

    pub fn as_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

/// Transform builder for rotations about the origin
pub struct Transform;

impl Transform {
    /// Rotation matrix for a single axis, acting on column vectors.
    ///
    /// X and Z are the usual right-handed rotations. The Y matrix turns +X
    /// towards +Z (x' = x·cos − z·sin, z' = x·sin + z·cos).
    #[rustfmt::skip]
    pub fn axis_matrix(axis: Axis, degrees: f64) -> Matrix3<f64> {
        let (s, c) = degrees.to_radians().sin_cos();
        match axis {
            Axis::X => Matrix3::new(
                1.0, 0.0, 0.0,
                0.0, c, -s,
                0.0, s, c,
            ),
            Axis::Y => Matrix3::new(
                c, 0.0, -s,
                0.0, 1.0, 0.0,
                s, 0.0, c,
            ),
            Axis::Z => Matrix3::new(
                c, -s, 0.0,
                s, c, 0.0,
                0.0, 0.0, 1.0,
            ),
        }
    }

    /// Rotate a point about a single axis through the origin
    pub fn rotate_point(point: &Point3<f64>, axis: Axis, degrees: f64) -> Point3<f64> {
        Point3::from(Self::axis_matrix(axis, degrees) * point.coords)
    }

    /// Apply the X, then Y, then Z rotation, each on the already-rotated result
    pub fn apply(rotation: &RotationState, point: &Point3<f64>) -> Point3<f64> {
        Axis::ALL.iter().fold(*point, |current, &axis| {
            Self::rotate_point(&current, axis, rotation.get(axis))
        })
    }

    /// Composed rotation matrix equivalent to [`Transform::apply`]
    pub fn rotation_matrix(rotation: &RotationState) -> Matrix3<f64> {
        let rx = Self::axis_matrix(Axis::X, rotation.x);
        let ry = Self::axis_matrix(Axis::Y, rotation.y);
        let rz = Self::axis_matrix(Axis::Z, rotation.z);

        // X is applied first, so it sits rightmost
        rz * ry * rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_points() -> Vec<Point3<f64>> {
        vec![
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(-1.0, 0.5, 0.25),
            Point3::new(0.3, -0.7, 0.9),
            Point3::new(0.0, 0.0, 0.0),
        ]
    }

    #[test]
    fn test_rotation_state() {
        let mut state = RotationState::zero();
        assert_eq!(state.as_array(), [0.0, 0.0, 0.0]);

        state.set(Axis::Y, 30.0);
        assert_eq!(state.get(Axis::Y), 30.0);
        assert_eq!(state, RotationState::new(0.0, 30.0, 0.0));
    }

    #[test]
    fn test_axis_from_index() {
        assert_eq!(Axis::try_from(0), Ok(Axis::X));
        assert_eq!(Axis::try_from(2), Ok(Axis::Z));
        assert_eq!(Axis::try_from(3), Err(SceneError::InvalidAxis(3)));
        for axis in Axis::ALL {
            assert_eq!(Axis::try_from(axis.index()), Ok(axis));
        }
    }

    #[test]
    fn test_identity_rotation() {
        let rotation = RotationState::zero();
        let matrix = Transform::rotation_matrix(&rotation);
        assert_relative_eq!(matrix, Matrix3::identity(), epsilon = 1e-12);

        for p in sample_points() {
            assert_relative_eq!(Transform::apply(&rotation, &p), p, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_full_turn_is_identity() {
        for axis in Axis::ALL {
            for p in sample_points() {
                let turned = Transform::rotate_point(&p, axis, 360.0);
                let still = Transform::rotate_point(&p, axis, 0.0);
                assert_relative_eq!(turned, still, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_quarter_turns() {
        let p = Point3::new(1.0, 1.0, 1.0);
        assert_relative_eq!(
            Transform::rotate_point(&p, Axis::Z, 90.0),
            Point3::new(-1.0, 1.0, 1.0),
            epsilon = 1e-9
        );
        assert_relative_eq!(
            Transform::rotate_point(&p, Axis::X, 90.0),
            Point3::new(1.0, -1.0, 1.0),
            epsilon = 1e-9
        );
        assert_relative_eq!(
            Transform::rotate_point(&p, Axis::Y, 90.0),
            Point3::new(-1.0, 1.0, 1.0),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_matrix_matches_sequential_pipeline() {
        let rotation = RotationState::new(45.0, 45.0, 90.0);
        let matrix = Transform::rotation_matrix(&rotation);
        for p in sample_points() {
            let via_matrix = Point3::from(matrix * p.coords);
            assert_relative_eq!(via_matrix, Transform::apply(&rotation, &p), epsilon = 1e-9);
        }
    }

    #[test]
    fn test_order_is_not_commutative() {
        let p = Point3::new(1.0, 0.0, 0.0);
        let xy = Transform::apply(&RotationState::new(30.0, 60.0, 0.0), &p);
        let yz = Transform::apply(&RotationState::new(0.0, 60.0, 30.0), &p);
        assert!((xy - yz).norm() > 1e-3);

        // applying the same angles in reverse order gives a different point
        let q = Point3::new(0.0, 1.0, 0.0);
        let forward = Transform::apply(&RotationState::new(90.0, 90.0, 0.0), &q);
        let reversed = Transform::rotate_point(
            &Transform::rotate_point(&q, Axis::Y, 90.0),
            Axis::X,
            90.0,
        );
        assert!((forward - reversed).norm() > 1e-3);
    }

    #[test]
    fn test_rotation_preserves_length() {
        let rotation = RotationState::new(12.0, 250.0, 33.0);
        for p in sample_points() {
            let rotated = Transform::apply(&rotation, &p);
            assert_relative_eq!(rotated.coords.norm(), p.coords.norm(), epsilon = 1e-9);
        }
    }
}
