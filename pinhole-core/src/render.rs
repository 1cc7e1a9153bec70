/// One frame pass: project a mesh, plot its vertices, present
use log::debug;

use crate::camera::Camera;
use crate::error::RenderResult;
use crate::framebuffer::{Framebuffer, Rgb, Surface};
use crate::geometry::Mesh;
use crate::projector::Projector;

/// What happened during one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    /// Vertices written to the framebuffer
    pub points_drawn: usize,
    /// Vertices that projected outside the buffer
    pub points_clipped: usize,
    /// Faces dropped because a vertex could not be projected
    pub faces_skipped: usize,
}

/// Clear, plot every projectable vertex of `mesh` in `color`, then present.
///
/// Projection failures and off-screen points are counted, not fatal. Only a
/// presentation error ends the frame early.
pub fn render_frame<S: Surface>(
    mesh: &Mesh,
    camera: &Camera,
    projector: &Projector,
    framebuffer: &mut Framebuffer<S>,
    color: Rgb,
) -> RenderResult<FrameStats> {
    framebuffer.clear();

    let projected = projector.project_mesh(camera, mesh);
    let mut stats = FrameStats {
        faces_skipped: projected.skipped_faces,
        ..Default::default()
    };

    for point in projected.points() {
        match framebuffer.set_pixel(point.x, point.y, color) {
            Ok(()) => stats.points_drawn += 1,
            Err(e) => {
                debug!("{e}");
                stats.points_clipped += 1;
            }
        }
    }

    framebuffer.present()?;
    debug!(
        "frame: {} drawn, {} clipped, {} faces skipped",
        stats.points_drawn, stats.points_clipped, stats.faces_skipped
    );
    Ok(stats)
}
