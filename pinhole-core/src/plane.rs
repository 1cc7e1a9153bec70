/// Infinite planes and ray intersection
use crate::error::{RenderError, RenderResult};
use crate::vector::{Vec3, DEGENERATE_EPSILON};

/// Which part of the ray `origin + t * direction` counts as a hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RayMode {
    /// Full line: any `t`, including intersections behind the origin
    #[default]
    Line,
    /// Half-line: only `t >= 0`
    HalfLine,
}

/// Plane through `point` perpendicular to `normal`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    point: Vec3,
    normal: Vec3,
}

impl Plane {
    /// Any non-zero normal is accepted and stored at unit length.
    pub fn new(point: Vec3, normal: Vec3) -> RenderResult<Self> {
        let magnitude = normal.magnitude();
        if !magnitude.is_finite() || magnitude == 0.0 {
            return Err(RenderError::InvalidPlane);
        }
        Ok(Self {
            point,
            normal: normal / magnitude,
        })
    }

    /// Plane through three points, normal along `(b - a) x (c - a)`.
    ///
    /// Collinearity is judged on the angle between the edges, so tiny
    /// triangles still define a plane.
    pub fn from_triangle(a: Vec3, b: Vec3, c: Vec3) -> RenderResult<Self> {
        let (ab, ac) = (b - a, c - a);
        let normal = ab.cross(&ac);
        if normal.magnitude() <= DEGENERATE_EPSILON * ab.magnitude() * ac.magnitude() {
            return Err(RenderError::InvalidPlane);
        }
        Self::new(a, normal)
    }

    /// Unit normal
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Signed distance of `p` from the plane along the normal
    pub fn signed_offset(&self, p: &Vec3) -> f32 {
        (p - self.point).dot(&self.normal)
    }

    /// Intersect the ray `origin + t * direction` with this plane
    pub fn ray_intersection(
        &self,
        origin: &Vec3,
        direction: &Vec3,
        mode: RayMode,
    ) -> RenderResult<Vec3> {
        // Cosine of the angle to the normal, scaled by the direction's length
        let denom = direction.dot(&self.normal);
        if !denom.is_finite() || denom.abs() <= DEGENERATE_EPSILON * direction.magnitude() {
            return Err(RenderError::ParallelRay);
        }

        let t = (self.point - origin).dot(&self.normal) / denom;
        if mode == RayMode::HalfLine && t < 0.0 {
            return Err(RenderError::BehindRayOrigin { t });
        }

        Ok(origin + direction * t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tilted() -> Plane {
        Plane::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.3, -1.0, 2.0)).unwrap()
    }

    #[test]
    fn test_zero_normal_rejected() {
        let result = Plane::new(Vec3::zeros(), Vec3::zeros());
        assert!(matches!(result, Err(RenderError::InvalidPlane)));
    }

    #[test]
    fn test_from_collinear_triangle_rejected() {
        let result = Plane::from_triangle(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(2.0, 2.0, 2.0),
        );
        assert!(matches!(result, Err(RenderError::InvalidPlane)));
    }

    #[test]
    fn test_from_triangle_contains_points() {
        let a = Vec3::new(1.0, 0.0, 0.0);
        let b = Vec3::new(0.0, 1.0, 0.0);
        let c = Vec3::new(0.0, 0.0, 1.0);
        let plane = Plane::from_triangle(a, b, c).unwrap();
        for p in [a, b, c] {
            assert!(plane.signed_offset(&p).abs() < 1e-6);
        }
    }

    #[test]
    fn test_intersection_lies_on_plane() {
        let plane = tilted();
        let origins = [
            Vec3::new(0.0, 0.0, -5.0),
            Vec3::new(10.0, -3.0, 2.0),
            Vec3::new(-1.0, 4.0, 0.5),
        ];
        let directions = [
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(-1.0, 0.5, 0.2),
            Vec3::new(0.3, 0.3, -0.9),
        ];
        for origin in &origins {
            for direction in &directions {
                let hit = plane
                    .ray_intersection(origin, direction, RayMode::Line)
                    .unwrap();
                assert!(plane.signed_offset(&hit).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn test_normal_stored_unit_length() {
        let plane = Plane::new(Vec3::zeros(), Vec3::new(0.0, 0.0, -4e-8)).unwrap();
        assert!((plane.normal() - Vec3::new(0.0, 0.0, -1.0)).magnitude() < 1e-6);
        assert!((tilted().normal().magnitude() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_tiny_triangle_defines_plane() {
        let plane = Plane::from_triangle(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 1e-4, 0.0),
            Vec3::new(1e-4, 1e-4, 0.0),
        )
        .unwrap();
        // Steep but not parallel: the ray is 80 degrees off the normal
        let direction = Vec3::new(80f32.to_radians().tan(), 0.0, 1.0);
        let hit = plane
            .ray_intersection(&Vec3::new(0.0, 0.0, -5.0), &direction, RayMode::Line)
            .unwrap();
        assert!(hit.z.abs() < 1e-4);
        assert!((hit.x - 5.0 * direction.x).abs() < 1e-3);
    }

    #[test]
    fn test_parallel_ray() {
        let plane = Plane::new(Vec3::zeros(), Vec3::new(0.0, 0.0, 1.0)).unwrap();
        let result = plane.ray_intersection(
            &Vec3::new(0.0, 0.0, -1.0),
            &Vec3::new(1.0, 0.0, 0.0),
            RayMode::Line,
        );
        assert!(matches!(result, Err(RenderError::ParallelRay)));
    }

    #[test]
    fn test_behind_origin_by_mode() {
        let plane = Plane::new(Vec3::zeros(), Vec3::new(0.0, 0.0, 1.0)).unwrap();
        let origin = Vec3::new(0.0, 0.0, -2.0);
        let away = Vec3::new(0.0, 0.0, -1.0);

        let hit = plane.ray_intersection(&origin, &away, RayMode::Line).unwrap();
        assert!(hit.magnitude() < 1e-6);

        let result = plane.ray_intersection(&origin, &away, RayMode::HalfLine);
        assert!(matches!(result, Err(RenderError::BehindRayOrigin { t }) if t < 0.0));

        let toward = Vec3::new(0.0, 0.0, 1.0);
        assert!(plane
            .ray_intersection(&origin, &toward, RayMode::HalfLine)
            .is_ok());
    }
}
