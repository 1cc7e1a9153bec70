/// Vector algebra on top of nalgebra's 3D vectors
///
/// Addition, subtraction, scaling, `dot`, `cross` and `magnitude` come straight
/// from nalgebra. This module adds the two operations the pipeline needs with
/// different semantics: a distance helper and a normalization that reports
/// zero-length input instead of producing NaN.
use nalgebra::Vector3;

use crate::error::{RenderError, RenderResult};

/// 3D point or direction
pub type Vec3 = Vector3<f32>;

/// Magnitudes at or below this are treated as zero
pub const DEGENERATE_EPSILON: f32 = 1e-6;

/// World up axis used to build camera bases
pub fn world_up() -> Vec3 {
    Vec3::new(0.0, 1.0, 0.0)
}

/// Checked operations for [`Vec3`]
pub trait VectorExt {
    /// Euclidean distance between two points
    fn distance(&self, other: &Vec3) -> f32;

    /// Unit vector in the same direction, or `DegenerateVector` for zero input
    fn checked_normalize(&self) -> RenderResult<Vec3>;
}

impl VectorExt for Vec3 {
    fn distance(&self, other: &Vec3) -> f32 {
        (self - other).magnitude()
    }

    fn checked_normalize(&self) -> RenderResult<Vec3> {
        let magnitude = self.magnitude();
        if !magnitude.is_finite() || magnitude <= DEGENERATE_EPSILON {
            return Err(RenderError::DegenerateVector);
        }
        Ok(self.scale(1.0 / magnitude))
    }
}
