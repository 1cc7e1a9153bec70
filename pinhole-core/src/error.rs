/// Error types for the projection pipeline
use std::fmt;

/// Result type for pipeline operations
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors raised by geometry, projection and framebuffer operations
#[derive(Debug)]
pub enum RenderError {
    /// A zero-length vector was used where a direction is required
    DegenerateVector,

    /// The ray direction lies in the plane, so there is no unique intersection
    ParallelRay,

    /// Half-line intersection landed behind the ray origin
    BehindRayOrigin { t: f32 },

    /// Camera parameters cannot produce a view window
    InvalidCamera(String),

    /// Pixel write outside the buffer extents
    OutOfBounds {
        x: f32,
        y: f32,
        width: usize,
        height: usize,
    },

    /// A face needs at least three vertices
    InvalidFace { vertices: usize },

    /// Plane normal is zero (collinear triangle or zero vector)
    InvalidPlane,

    /// Surface pixel array does not hold `width * height` RGBA samples
    SurfaceMismatch { expected: usize, actual: usize },

    /// Scene configuration could not be parsed or validated
    Config(String),

    /// STL data could not be parsed
    Stl(String),

    /// Presentation or file I/O failure
    Io(std::io::Error),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateVector => write!(f, "degenerate (zero-length) vector"),
            Self::ParallelRay => write!(f, "ray is parallel to the plane"),
            Self::BehindRayOrigin { t } => {
                write!(f, "intersection lies behind the ray origin (t = {t})")
            }
            Self::InvalidCamera(msg) => write!(f, "invalid camera: {msg}"),
            Self::OutOfBounds {
                x,
                y,
                width,
                height,
            } => write!(
                f,
                "pixel ({x}, {y}) is outside the {width}x{height} framebuffer"
            ),
            Self::InvalidFace { vertices } => {
                write!(f, "face needs at least 3 vertices, got {vertices}")
            }
            Self::InvalidPlane => write!(f, "plane normal is degenerate"),
            Self::SurfaceMismatch { expected, actual } => write!(
                f,
                "surface holds {actual} bytes, expected {expected}"
            ),
            Self::Config(msg) => write!(f, "config error: {msg}"),
            Self::Stl(msg) => write!(f, "STL parse error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RenderError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_display_out_of_bounds() {
        let err = RenderError::OutOfBounds {
            x: 4.0,
            y: 0.0,
            width: 4,
            height: 3,
        };
        assert_eq!(
            err.to_string(),
            "pixel (4, 0) is outside the 4x3 framebuffer"
        );
    }

    #[test]
    fn test_io_source() {
        let err: RenderError = std::io::Error::new(std::io::ErrorKind::Other, "boom").into();
        assert!(err.source().is_some());
        assert!(RenderError::ParallelRay.source().is_none());
    }
}
