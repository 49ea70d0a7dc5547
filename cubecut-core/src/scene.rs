/// Cube plus cutting plane, rotated from their originals on every angle change
use log::trace;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::SceneError;
use crate::frame::{Frame, Rgb};
use crate::geometry::Wireframe;
use crate::plane::{CrossSection, PlaneGenerator};
use crate::projection::Viewport;
use crate::transform::{Axis, RotationState, Transform};

/// Construction parameters for a [`Scene`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneConfig {
    pub initial_angles: RotationState,
    pub generator: PlaneGenerator,
    pub viewport: Viewport,
    pub fill: Rgb,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            initial_angles: RotationState::new(45.0, 45.0, 90.0),
            generator: PlaneGenerator::default(),
            viewport: Viewport::default(),
            fill: Rgb::ACCENT,
        }
    }
}

pub struct Scene {
    cube_original: Wireframe,
    cube: Wireframe,
    section: CrossSection,
    plane: Wireframe,
    angles: RotationState,
    config: SceneConfig,
    frame: Frame,
}

impl Scene {
    /// Scene with the default configuration and a freshly generated plane
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Result<Self, SceneError> {
        Self::with_config(SceneConfig::default(), rng)
    }

    /// Deterministic scene: the same seed always produces the same plane
    pub fn from_seed(seed: u64) -> Result<Self, SceneError> {
        Self::new(&mut ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn with_config<R: Rng + ?Sized>(
        config: SceneConfig,
        rng: &mut R,
    ) -> Result<Self, SceneError> {
        let section = config.generator.generate(rng)?;
        Ok(Self::with_section(config, section))
    }

    /// Build around an existing cross-section, then rotate and draw once
    pub fn with_section(config: SceneConfig, section: CrossSection) -> Self {
        let cube_original = Wireframe::cube(2.0);
        let plane = section.outline().clone();

        let mut scene = Self {
            cube: cube_original.clone(),
            cube_original,
            section,
            plane,
            angles: config.initial_angles,
            frame: Frame::new(config.viewport),
            config,
        };
        scene.rotate();
        scene.draw();
        scene
    }

    /// Set one angle (degrees), recompute every rotated vertex and redraw
    pub fn change_angle(&mut self, axis: Axis, degrees: f64) {
        trace!("{} angle -> {degrees}", axis.label());
        self.angles.set(axis, degrees);
        self.rotate();
        self.draw();
    }

    /// [`Scene::change_angle`] addressed by axis index 0, 1 or 2
    pub fn change_angle_index(&mut self, index: usize, degrees: f64) -> Result<(), SceneError> {
        let axis = Axis::try_from(index)?;
        self.change_angle(axis, degrees);
        Ok(())
    }

    /// Replace the cutting plane with a newly generated one, keeping the angles
    pub fn regenerate_plane<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), SceneError> {
        self.section = self.config.generator.generate(rng)?;
        self.plane = self.section.outline().clone();
        self.rotate();
        self.draw();
        Ok(())
    }

    /// Reset both rotated sets to their originals and apply X, Y, Z in order
    pub fn rotate(&mut self) {
        rotate_from(&mut self.cube, &self.cube_original, &self.angles);
        rotate_from(&mut self.plane, self.section.outline(), &self.angles);
    }

    /// Rebuild the frame from the current rotated geometry
    pub fn draw(&mut self) {
        let viewport = self.config.viewport;
        self.frame.clear();
        self.frame.bounds = viewport;

        for shape in [&self.cube, &self.plane] {
            let styles = shape.classify_segments();
            for (segment, style) in shape.segments().iter().zip(styles) {
                let (a, b) = shape.endpoints(*segment);
                self.frame
                    .push_line(viewport.project(&a), viewport.project(&b), style);
            }
        }

        let outline = self
            .plane
            .vertices()
            .iter()
            .take(CrossSection::FILL_VERTICES)
            .map(|v| viewport.project(v))
            .collect();
        self.frame.fill(outline, self.config.fill);
    }

    pub fn angles(&self) -> RotationState {
        self.angles
    }

    pub fn cube(&self) -> &Wireframe {
        &self.cube
    }

    pub fn cube_original(&self) -> &Wireframe {
        &self.cube_original
    }

    pub fn plane(&self) -> &Wireframe {
        &self.plane
    }

    pub fn cross_section(&self) -> &CrossSection {
        &self.section
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Primitives from the latest redraw
    pub fn frame(&self) -> &Frame {
        &self.frame
    }
}

fn rotate_from(target: &mut Wireframe, original: &Wireframe, angles: &RotationState) {
    target.reset_from(original);
    for vertex in target.vertices_mut() {
        *vertex = Transform::apply(angles, vertex);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::LineStyle;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    fn zeroed() -> SceneConfig {
        SceneConfig {
            initial_angles: RotationState::zero(),
            ..SceneConfig::default()
        }
    }

    #[test]
    fn test_initial_angles() {
        let scene = Scene::from_seed(3).unwrap();
        assert_eq!(scene.angles(), RotationState::new(45.0, 45.0, 90.0));
    }

    #[test]
    fn test_originals_untouched_by_rotation() {
        let mut scene = Scene::from_seed(11).unwrap();
        let plane_before = scene.cross_section().clone();

        scene.change_angle(Axis::X, 123.0);
        scene.change_angle(Axis::Z, 17.5);

        assert_eq!(scene.cube_original(), &Wireframe::cube(2.0));
        assert_eq!(scene.cross_section(), &plane_before);
        assert_eq!(scene.cube().vertices().len(), 8);
        assert_eq!(scene.plane().vertices().len(), 5);
        assert_eq!(scene.cube().segments(), scene.cube_original().segments());
        assert_eq!(scene.plane().segments(), plane_before.outline().segments());
    }

    #[test]
    fn test_zero_angles_leave_points_in_place() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let scene = Scene::with_config(zeroed(), &mut rng).unwrap();
        let cube = scene.cube().vertices();
        for (rotated, original) in cube.iter().zip(scene.cube_original().vertices()) {
            assert_relative_eq!(*rotated, *original, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_change_angle_matches_direct_pipeline() {
        let mut scene = Scene::from_seed(21).unwrap();
        let changes = [
            (Axis::X, 300.0),
            (Axis::Y, 12.0),
            (Axis::Z, 200.0),
            (Axis::Y, 77.0),
        ];
        for (axis, degrees) in changes {
            scene.change_angle(axis, degrees);
        }

        let angles = scene.angles();
        assert_eq!(angles, RotationState::new(300.0, 77.0, 200.0));
        let cube = scene.cube().vertices();
        for (rotated, original) in cube.iter().zip(scene.cube_original().vertices()) {
            assert_relative_eq!(*rotated, Transform::apply(&angles, original), epsilon = 1e-12);
        }
        for (rotated, original) in scene
            .plane()
            .vertices()
            .iter()
            .zip(scene.cross_section().outline().vertices())
        {
            assert_relative_eq!(*rotated, Transform::apply(&angles, original), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_change_angle_index() {
        let mut scene = Scene::from_seed(2).unwrap();
        scene.change_angle_index(1, 10.0).unwrap();
        assert_eq!(scene.angles().y, 10.0);
        assert_eq!(
            scene.change_angle_index(4, 10.0),
            Err(SceneError::InvalidAxis(4))
        );
    }

    #[test]
    fn test_frame_contents() {
        let scene = Scene::from_seed(8).unwrap();
        let frame = scene.frame();

        assert_eq!(frame.bounds, Viewport::new(2.0));
        assert_eq!(frame.lines.len(), 12 + 5);

        let polygon = frame.polygon.as_ref().unwrap();
        assert_eq!(polygon.color, Rgb::ACCENT);
        assert_eq!(polygon.points.len(), 4);
        for (point, vertex) in polygon.points.iter().zip(scene.plane().vertices()) {
            assert_eq!(point.x, vertex.x);
            assert_eq!(point.y, vertex.y);
        }
    }

    #[test]
    fn test_dashed_edges_touch_min_z() {
        let scene = Scene::from_seed(13).unwrap();
        let frame = scene.frame();

        let cube_min = scene.cube().min_z().unwrap();
        for (segment, line) in scene.cube().segments().iter().zip(&frame.lines[..12]) {
            let (a, b) = scene.cube().endpoints(*segment);
            let expected = if a.z == cube_min || b.z == cube_min {
                LineStyle::Dashed
            } else {
                LineStyle::Solid
            };
            assert_eq!(line.style, expected);
        }
        assert!(frame.lines[..12].iter().any(|l| l.style == LineStyle::Dashed));
        assert!(frame.lines[12..].iter().any(|l| l.style == LineStyle::Dashed));
    }

    #[test]
    fn test_axis_aligned_view_dashes_back_face() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let scene = Scene::with_config(zeroed(), &mut rng).unwrap();

        // unrotated: the whole z = -1 face ties for the minimum
        let dashed = scene.frame().lines[..12]
            .iter()
            .filter(|l| l.style == LineStyle::Dashed)
            .count();
        assert_eq!(dashed, 8);
    }

    #[test]
    fn test_regenerate_plane_keeps_angles() {
        let mut scene = Scene::from_seed(4).unwrap();
        scene.change_angle(Axis::Y, 30.0);
        let before = scene.cross_section().clone();

        scene
            .regenerate_plane(&mut ChaCha8Rng::seed_from_u64(99))
            .unwrap();
        assert_ne!(scene.cross_section(), &before);
        assert_eq!(scene.angles().y, 30.0);

        let angles = scene.angles();
        let first = scene.cross_section().outline().vertices()[0];
        assert_relative_eq!(
            scene.plane().vertices()[0],
            Transform::apply(&angles, &first),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_with_section() {
        let section = CrossSection::new(
            crate::plane::PlaneEquation::through(
                &Point3::new(1.0, 1.0, 0.0),
                &Point3::new(0.0, 1.0, 1.0),
                &Point3::new(-1.0, 0.0, 1.0),
            ),
            vec![
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 1.0),
                Point3::new(-1.0, 0.0, 1.0),
                Point3::new(-1.0, -1.0, 0.0),
                Point3::new(1.0, -1.0, -2.0),
            ],
        );
        let scene = Scene::with_section(zeroed(), section);
        // vertex 4 is the unique minimum, so edges 3-4 and 4-0 are dashed
        let styles: Vec<_> = scene.frame().lines[12..].iter().map(|l| l.style).collect();
        assert_eq!(
            styles,
            vec![
                LineStyle::Solid,
                LineStyle::Solid,
                LineStyle::Solid,
                LineStyle::Dashed,
                LineStyle::Dashed,
            ]
        );
    }
}
