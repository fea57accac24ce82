//! Axis-aligned boxes and bounds.
//!
//! All lengths are millimetres in a right-handed frame with +Z pointing out
//! of the printed face.

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Smallest length, in millimetres, that the solid pipeline treats as
/// non-zero. Stays above the CSG kernel's plane tolerance.
pub const GEOM_EPS: f64 = 1e-6;

/// Errors produced when constructing primitives from raw numbers.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("cuboid coordinates must be finite")]
    NonFinite,
    #[error("cuboid is degenerate along {axis} (min={min}, max={max})")]
    Degenerate { axis: char, min: f64, max: f64 },
}

/// Axis-aligned box with strictly positive extent on every axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cuboid {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl Cuboid {
    /// Build a cuboid from two opposite corners in any order.
    pub fn from_corners(a: Point3<f64>, b: Point3<f64>) -> Result<Self, GeometryError> {
        if !(a.iter().all(|v| v.is_finite()) && b.iter().all(|v| v.is_finite())) {
            return Err(GeometryError::NonFinite);
        }
        let min = Point3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z));
        let max = Point3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z));
        for (axis, lo, hi) in [('x', min.x, max.x), ('y', min.y, max.y), ('z', min.z, max.z)] {
            if hi - lo <= GEOM_EPS {
                return Err(GeometryError::Degenerate {
                    axis,
                    min: lo,
                    max: hi,
                });
            }
        }
        Ok(Self { min, max })
    }

    /// Extrude a `width x height` rectangle centered on the XY origin by
    /// `depth` along Z, then move it by `translation`.
    ///
    /// A negative depth extrudes towards -Z, so `extrude_rect(w, h, -d, (x, y, top))`
    /// yields a box hanging down from `top`.
    pub fn extrude_rect(
        width: f64,
        height: f64,
        depth: f64,
        translation: Vector3<f64>,
    ) -> Result<Self, GeometryError> {
        let a = Point3::new(-width / 2.0, -height / 2.0, 0.0) + translation;
        let b = Point3::new(width / 2.0, height / 2.0, depth) + translation;
        Self::from_corners(a, b)
    }

    #[inline]
    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    #[inline]
    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    #[inline]
    pub fn volume(&self) -> f64 {
        let s = self.size();
        s.x * s.y * s.z
    }
}

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds3 {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl Bounds3 {
    pub fn union(&self, other: &Bounds3) -> Bounds3 {
        Bounds3 {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    #[inline]
    pub fn extent(&self) -> Vector3<f64> {
        self.max - self.min
    }
}
