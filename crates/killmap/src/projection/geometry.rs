//! Per-map projection parameters.
//!
//! Maps store their minimap extents as pairs of space-separated triples
//! (`"ox oy oz"`, `"sx sy sz"`). [`MapGeometry`] is the validated, numeric form
//! used by [`crate::projection::CoordinateMapper`].
use glam::Vec3;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Raw minimap extents as stored alongside recorded rounds.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MinimapExtents {
    /// World-space origin, `"x y z"`.
    pub origin: String,
    /// World-space scale, `"x y z"`.
    pub scale: String,
}

impl MinimapExtents {
    pub fn new(origin: impl Into<String>, scale: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            scale: scale.into(),
        }
    }
}

/// Origin and scale of a map's top-down projection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapGeometry {
    origin: Vec3,
    scale: Vec3,
}

impl MapGeometry {
    /// Creates a geometry, rejecting non-finite values and a zero planar extent.
///
/// A negative extent is accepted and mirrors the projection.
    pub fn try_new(origin: Vec3, scale: Vec3) -> Result<Self> {
        if !origin.is_finite() || !scale.is_finite() {
            return Err(Error::Geometry(format!(
                "origin {origin} and scale {scale} must be finite"
            )));
        }
        let geometry = Self { origin, scale };
        let extent = geometry.planar_extent();
        if extent == 0.0 {
            return Err(Error::Geometry(format!(
                "planar extent must be non-zero, got {extent} from scale {scale}"
            )));
        }
        Ok(geometry)
    }

    /// Parses and validates stored minimap extents.
    pub fn from_extents(extents: &MinimapExtents) -> Result<Self> {
        let origin = parse_triple("origin", &extents.origin)?;
        let scale = parse_triple("scale", &extents.scale)?;
        Self::try_new(origin, scale)
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Half of the larger horizontal scale component, `max(sx, sz) / 2`.
    #[inline]
    pub fn planar_extent(&self) -> f32 {
        self.scale.x.max(self.scale.z) / 2.0
    }
}

/// Parses a world position stored as `"x y z"`.
pub fn parse_position(s: &str) -> Result<Vec3> {
    parse_triple("position", s)
}

fn parse_triple(what: &str, s: &str) -> Result<Vec3> {
    let mut values = [0.0f32; 3];
    let mut parts = s.split_whitespace();
    for value in values.iter_mut() {
        let part = parts
            .next()
            .ok_or_else(|| Error::Geometry(format!("{what} '{s}' needs three components")))?;
        *value = part
            .parse::<f32>()
            .map_err(|e| Error::Geometry(format!("{what} '{s}': {e}")))?;
    }
    if parts.next().is_some() {
        return Err(Error::Geometry(format!(
            "{what} '{s}' has more than three components"
        )));
    }
    Ok(Vec3::from_array(values))
}
