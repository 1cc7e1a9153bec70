/// Maps 3D vertices through a camera onto pixel coordinates
use log::warn;
use nalgebra::Point2;

use crate::camera::Camera;
use crate::error::RenderResult;
use crate::geometry::{Face, Mesh, ProjectedFace, ProjectedMesh};
use crate::plane::RayMode;
use crate::vector::{Vec3, VectorExt};

/// Projects onto a target buffer of `width` x `height` pixels.
///
/// Points outside the view window map outside `[0, width] x [0, height]`; the
/// projector never clamps, so callers bounds-check before writing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    width: usize,
    height: usize,
    mode: RayMode,
}

impl Projector {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            mode: RayMode::Line,
        }
    }

    pub fn with_mode(mut self, mode: RayMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn mode(&self) -> RayMode {
        self.mode
    }

    /// Project one vertex to pixel space, row 0 at the top
    pub fn project(&self, camera: &Camera, vertex: &Vec3) -> RenderResult<Point2<f32>> {
        let eye = camera.position();
        let direction = (vertex - eye).checked_normalize()?;
        let hit = camera
            .view_plane()
            .ray_intersection(&eye, &direction, self.mode)?;

        let local = hit - camera.view_corners()[0];
        let u = local.dot(&camera.right());
        let v = local.dot(&camera.up());

        let x = (u / camera.horizontal_mag()) * self.width as f32;
        let y = (1.0 - v / camera.vertical_mag()) * self.height as f32;
        Ok(Point2::new(x, y))
    }

    /// Project every vertex of a face, stopping at the first failure
    pub fn project_face(&self, camera: &Camera, face: &Face) -> RenderResult<ProjectedFace> {
        let points = face
            .vertices()
            .iter()
            .map(|v| self.project(camera, v))
            .collect::<RenderResult<Vec<_>>>()?;
        Ok(ProjectedFace { points })
    }

    /// Project a whole mesh, dropping faces that contain an unprojectable vertex
    pub fn project_mesh(&self, camera: &Camera, mesh: &Mesh) -> ProjectedMesh {
        let mut projected = ProjectedMesh {
            faces: Vec::with_capacity(mesh.faces().len()),
            skipped_faces: 0,
        };

        for (index, face) in mesh.faces().iter().enumerate() {
            match self.project_face(camera, face) {
                Ok(face) => projected.faces.push(face),
                Err(e) => {
                    warn!("skipping face {index}: {e}");
                    projected.skipped_faces += 1;
                }
            }
        }

        projected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;

    fn front_camera() -> Camera {
        Camera::new(Vec3::new(0.0, 0.0, -5.0), Vec3::zeros(), 1.0).unwrap()
    }

    fn assert_point_eq(p: Point2<f32>, x: f32, y: f32) {
        assert!(
            (p.x - x).abs() < 1e-3 && (p.y - y).abs() < 1e-3,
            "({}, {}) != ({x}, {y})",
            p.x,
            p.y
        );
    }

    #[test]
    fn test_point_of_interest_hits_center() {
        let projector = Projector::new(640, 480);
        let camera = Camera::new(
            Vec3::new(2.0, 1.0, -6.0),
            Vec3::new(0.5, 0.0, 1.0),
            3.0,
        )
        .unwrap();
        let p = projector.project(&camera, &camera.point_of_interest()).unwrap();
        assert_point_eq(p, 320.0, 240.0);
    }

    #[test]
    fn test_corners_round_trip() {
        let projector = Projector::new(200, 100);
        let camera = front_camera();
        let expected = [(0.0, 100.0), (0.0, 0.0), (200.0, 0.0), (200.0, 100.0)];
        for (corner, (x, y)) in camera.view_corners().iter().zip(expected) {
            let p = projector.project(&camera, corner).unwrap();
            assert_point_eq(p, x, y);
        }
    }

    #[test]
    fn test_perspective_shrinks_distant_points() {
        let projector = Projector::new(100, 100);
        let camera = front_camera();
        // Twice as far from the eye as the view plane
        let p = projector
            .project(&camera, &Vec3::new(1.0, 1.0, 5.0))
            .unwrap();
        assert_point_eq(p, 75.0, 25.0);
    }

    #[test]
    fn test_outside_window_not_clamped() {
        let projector = Projector::new(100, 100);
        let p = projector
            .project(&front_camera(), &Vec3::new(3.0, 0.0, 0.0))
            .unwrap();
        assert!(p.x > 100.0);
    }

    #[test]
    fn test_small_camera_projects_oblique_vertex() {
        let projector = Projector::new(100, 100);
        let camera = Camera::new(Vec3::new(0.0, 0.0, -5.0), Vec3::zeros(), 1e-3).unwrap();

        // Roughly 80 degrees off the look direction, still in front of the eye
        let p = projector
            .project(&camera, &Vec3::new(6.0, 0.0, -4.0))
            .unwrap();
        assert!(p.x > 100.0);
        assert!((p.y - 50.0).abs() < 1e-2);

        let center = projector.project(&camera, &Vec3::zeros()).unwrap();
        assert_point_eq(center, 50.0, 50.0);
    }

    #[test]
    fn test_vertex_at_eye_fails() {
        let projector = Projector::new(100, 100);
        let camera = front_camera();
        let result = projector.project(&camera, &camera.position());
        assert!(matches!(result, Err(RenderError::DegenerateVector)));
    }

    #[test]
    fn test_vertex_in_eye_plane_is_parallel() {
        let projector = Projector::new(100, 100);
        let result = projector.project(&front_camera(), &Vec3::new(1.0, 0.0, -5.0));
        assert!(matches!(result, Err(RenderError::ParallelRay)));
    }

    #[test]
    fn test_half_line_rejects_vertex_behind_eye() {
        let camera = front_camera();
        let behind = Vec3::new(0.0, 0.0, -10.0);

        assert!(Projector::new(100, 100).project(&camera, &behind).is_ok());

        let result = Projector::new(100, 100)
            .with_mode(RayMode::HalfLine)
            .project(&camera, &behind);
        assert!(matches!(result, Err(RenderError::BehindRayOrigin { .. })));
    }

    #[test]
    fn test_project_mesh_skips_bad_faces() {
        let projector = Projector::new(100, 100);
        let camera = front_camera();
        let good = Face::new(vec![
            Vec3::new(-0.5, -0.5, 0.0),
            Vec3::new(0.5, -0.5, 0.0),
            Vec3::new(0.5, 0.5, 0.0),
        ])
        .unwrap();
        let bad = Face::new(vec![
            camera.position(),
            Vec3::new(0.5, -0.5, 0.0),
            Vec3::new(0.5, 0.5, 0.0),
        ])
        .unwrap();
        let mesh = Mesh::from_faces(vec![good.clone(), bad, good]);

        let projected = projector.project_mesh(&camera, &mesh);
        assert_eq!(projected.faces.len(), 2);
        assert_eq!(projected.skipped_faces, 1);
        assert_eq!(projected.points().count(), 6);

        let first = &projected.faces[0];
        assert_point_eq(first.points[0], 25.0, 75.0);
        assert_point_eq(first.points[1], 75.0, 75.0);
        assert_point_eq(first.points[2], 75.0, 25.0);
    }
}
