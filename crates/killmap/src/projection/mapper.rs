//! World-to-canvas projection.
//!
//! The projection is a plan view: world Z runs along canvas X, negated world X runs
//! along canvas Y, and world Y (height) is discarded. Results are not clamped; points
//! may land outside the canvas and are dropped later during binning.
use glam::{Vec2, Vec3};

use super::canvas::{Canvas, PixelPoint};
use super::geometry::MapGeometry;
use crate::error::{Error, Result};

/// Projects world positions of one map onto a canvas.
#[derive(Clone, Copy, Debug)]
pub struct CoordinateMapper {
    origin: Vec3,
    planar_extent: f32,
    canvas_extent: Vec2,
}

impl CoordinateMapper {
    pub fn try_new(geometry: &MapGeometry, canvas: Canvas) -> Result<Self> {
        let planar_extent = geometry.planar_extent();
        if planar_extent == 0.0 || !planar_extent.is_finite() {
            return Err(Error::Geometry(format!(
                "cannot project with planar extent {planar_extent}"
            )));
        }
        Ok(Self {
            origin: geometry.origin(),
            planar_extent,
            canvas_extent: canvas.extent(),
        })
    }

    /// Maps one world position to canvas pixels.
    #[inline]
    pub fn project(&self, world: Vec3) -> PixelPoint {
        let w = self.canvas_extent.x;
        let h = self.canvas_extent.y;
        Vec2::new(
            (world.z - self.origin.z) / self.planar_extent * w + w / 2.0,
            -(world.x - self.origin.x) / self.planar_extent * h + h / 2.0,
        )
    }

    /// Maps every position, preserving order.
    pub fn project_all<I>(&self, positions: I) -> Vec<PixelPoint>
    where
        I: IntoIterator,
        I::Item: Into<Vec3>,
    {
        positions
            .into_iter()
            .map(|p| self.project(p.into()))
            .collect()
    }
}

/// Projects a single world position; see [`CoordinateMapper::project`].
pub fn world_to_canvas(world: Vec3, geometry: &MapGeometry, canvas: Canvas) -> Result<PixelPoint> {
    Ok(CoordinateMapper::try_new(geometry, canvas)?.project(world))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry(origin: Vec3, scale: Vec3) -> MapGeometry {
        MapGeometry::try_new(origin, scale).unwrap()
    }

    #[test]
    fn projects_world_z_onto_canvas_x() {
        let g = geometry(Vec3::ZERO, Vec3::new(2048.0, 0.0, 2048.0));
        let p = world_to_canvas(Vec3::new(0.0, 0.0, 1024.0), &g, Canvas::default()).unwrap();
        assert_eq!(p, Vec2::new(1536.0, 512.0));
    }

    #[test]
    fn negated_world_x_runs_down_the_canvas() {
        let g = geometry(Vec3::ZERO, Vec3::new(2048.0, 0.0, 2048.0));
        let mapper = CoordinateMapper::try_new(&g, Canvas::default()).unwrap();
        assert_eq!(mapper.project(Vec3::new(512.0, 0.0, 0.0)), Vec2::new(512.0, 0.0));
        assert_eq!(mapper.project(Vec3::new(-512.0, 0.0, 0.0)), Vec2::new(512.0, 1024.0));
    }

    #[test]
    fn negative_scale_mirrors_both_axes() {
        let g = geometry(Vec3::ZERO, Vec3::new(-2048.0, 0.0, -2048.0));
        let mapper = CoordinateMapper::try_new(&g, Canvas::default()).unwrap();
        assert_eq!(mapper.project(Vec3::new(0.0, 0.0, 256.0)), Vec2::new(256.0, 512.0));
        assert_eq!(mapper.project(Vec3::new(512.0, 0.0, 0.0)), Vec2::new(512.0, 1024.0));
    }

    #[test]
    fn world_height_is_ignored_and_origin_maps_to_center() {
        let origin = Vec3::new(40.0, -7.0, -12.0);
        let g = geometry(origin, Vec3::new(300.0, 90.0, 120.0));
        let mapper = CoordinateMapper::try_new(&g, Canvas::new(200, 100)).unwrap();
        let a = mapper.project(Vec3::new(40.0, 1000.0, -12.0));
        let b = mapper.project(origin);
        assert_eq!(a, b);
        assert_eq!(b, Vec2::new(100.0, 50.0));
    }

    #[test]
    fn projection_is_deterministic_and_unclamped() {
        let g = geometry(Vec3::new(1.5, 0.0, -3.0), Vec3::new(100.0, 0.0, 100.0));
        let mapper = CoordinateMapper::try_new(&g, Canvas::default()).unwrap();
        let far = Vec3::new(-900.0, 0.0, 900.0);
        let first = mapper.project(far);
        assert_eq!(first, mapper.project(far));
        assert!(!Canvas::default().contains(first));
    }

    #[test]
    fn project_all_preserves_order() {
        let g = geometry(Vec3::ZERO, Vec3::new(2048.0, 0.0, 2048.0));
        let mapper = CoordinateMapper::try_new(&g, Canvas::default()).unwrap();
        let pts = mapper.project_all([Vec3::ZERO, Vec3::new(0.0, 0.0, 1024.0)]);
        assert_eq!(pts, vec![Vec2::new(512.0, 512.0), Vec2::new(1536.0, 512.0)]);
    }
}
