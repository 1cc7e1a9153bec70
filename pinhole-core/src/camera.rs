/// Pinhole camera: an eye, a look-at target and a square view window
use crate::error::{RenderError, RenderResult};
use crate::plane::Plane;
use crate::vector::{world_up, Vec3, VectorExt};

/// Camera with its view basis and view window derived at construction.
///
/// The window is centred on the point of interest, spans `2 * size` along
/// both `right` and `up`, and lies in the plane through the point of interest
/// perpendicular to the look direction. Derived fields are never recomputed;
/// build a new camera to move it.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vec3,
    point_of_interest: Vec3,
    size: f32,
    look_direction: Vec3,
    right: Vec3,
    up: Vec3,
    view_corners: [Vec3; 4],
    horizontal_mag: f32,
    vertical_mag: f32,
    view_plane: Plane,
}

impl Camera {
    /// Build the view basis and window.
    ///
    /// Fails with `InvalidCamera` for a non-positive or non-finite `size`, and
    /// with `DegenerateVector` when the eye sits on the target or looks
    /// straight along the world up axis.
    pub fn new(position: Vec3, point_of_interest: Vec3, size: f32) -> RenderResult<Self> {
        if !size.is_finite() || size <= 0.0 {
            return Err(RenderError::InvalidCamera(format!(
                "view size must be positive, got {size}"
            )));
        }

        let look_direction = (point_of_interest - position).checked_normalize()?;
        let right = world_up().cross(&look_direction).checked_normalize()?;
        let up = look_direction.cross(&right).checked_normalize()?;

        let h = right * size;
        let v = up * size;
        // Counter-clockwise from bottom-left
        let view_corners = [
            point_of_interest - h - v,
            point_of_interest - h + v,
            point_of_interest + h + v,
            point_of_interest + h - v,
        ];

        let horizontal_mag = (view_corners[3] - view_corners[0]).magnitude();
        let vertical_mag = (view_corners[1] - view_corners[0]).magnitude();
        let view_plane = Plane::from_triangle(view_corners[0], view_corners[1], view_corners[2])?;

        Ok(Self {
            position,
            point_of_interest,
            size,
            look_direction,
            right,
            up,
            view_corners,
            horizontal_mag,
            vertical_mag,
            view_plane,
        })
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn point_of_interest(&self) -> Vec3 {
        self.point_of_interest
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn look_direction(&self) -> Vec3 {
        self.look_direction
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Bottom-left, top-left, top-right, bottom-right
    pub fn view_corners(&self) -> &[Vec3; 4] {
        &self.view_corners
    }

    /// Physical width of the view window
    pub fn horizontal_mag(&self) -> f32 {
        self.horizontal_mag
    }

    /// Physical height of the view window
    pub fn vertical_mag(&self) -> f32 {
        self.vertical_mag
    }

    pub fn view_plane(&self) -> &Plane {
        &self.view_plane
    }
}
