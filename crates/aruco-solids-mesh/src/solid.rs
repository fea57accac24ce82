//! Extruded solids and the booleans between them.

use aruco_solids_core::{Bounds3, Cuboid};
use csgrs::mesh::Mesh;
use csgrs::sketch::Sketch;
use csgrs::traits::CSG;
use nalgebra::Point3;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Mesh type produced by the CSG kernel; parts carry no per-polygon metadata.
pub type CsgMesh = Mesh<()>;

/// A closed polyhedral solid.
///
/// Thin wrapper over a [`CsgMesh`] that adds the measurements the marker
/// pipeline needs (bounds, volume, triangle count) in workspace types.
#[derive(Clone, Debug)]
pub struct Solid {
    mesh: CsgMesh,
}

impl Default for Solid {
    fn default() -> Self {
        Self::empty()
    }
}

impl Solid {
    pub fn empty() -> Self {
        Self {
            mesh: CsgMesh::new(),
        }
    }

    /// Box filling `cuboid`: its footprint rectangle extruded along +Z.
    pub fn cuboid(cuboid: &Cuboid) -> Self {
        let size = cuboid.size();
        let mesh = Sketch::<()>::rectangle(size.x, size.y, None)
            .extrude(size.z)
            .translate(cuboid.min.x, cuboid.min.y, cuboid.min.z);
        Self { mesh }
    }

    /// Box filling `cuboid` with its four vertical edges rounded to
    /// `radius`, each quarter round made of `segments` chords.
    ///
    /// A radius at or below the kernel tolerance yields a plain box.
    pub fn rounded_slab(cuboid: &Cuboid, radius: f64, segments: usize) -> Self {
        let size = cuboid.size();
        let mesh = Sketch::<()>::rounded_rectangle(size.x, size.y, radius, segments.max(1), None)
            .extrude(size.z)
            .translate(cuboid.min.x, cuboid.min.y, cuboid.min.z);
        Self { mesh }
    }

    /// Union of all `solids`; empty when there are none.
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(solids)))]
    pub fn union_all<I>(solids: I) -> Self
    where
        I: IntoIterator<Item = Solid>,
    {
        let mut it = solids.into_iter();
        let Some(first) = it.next() else {
            return Self::empty();
        };
        let mut parts = 1usize;
        let mesh = it.fold(first.mesh, |acc, s| {
            parts += 1;
            acc.union(&s.mesh)
        });
        log::debug!("union of {} solids: {} polygons", parts, mesh.polygons.len());
        Self { mesh }
    }

    pub fn union(&self, other: &Solid) -> Self {
        Self {
            mesh: self.mesh.union(&other.mesh),
        }
    }

    /// `self` with `other` cut away.
    pub fn difference(&self, other: &Solid) -> Self {
        if other.is_empty() {
            return self.clone();
        }
        Self {
            mesh: self.mesh.difference(&other.mesh),
        }
    }

    pub fn intersection(&self, other: &Solid) -> Self {
        Self {
            mesh: self.mesh.intersection(&other.mesh),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mesh.polygons.is_empty()
    }

    #[inline]
    pub fn mesh(&self) -> &CsgMesh {
        &self.mesh
    }

    /// Axis-aligned bounds, `None` for an empty solid.
    pub fn bounds(&self) -> Option<Bounds3> {
        if self.is_empty() {
            return None;
        }
        let aabb = self.mesh.bounding_box();
        Some(Bounds3 {
            min: Point3::new(aabb.mins.x, aabb.mins.y, aabb.mins.z),
            max: Point3::new(aabb.maxs.x, aabb.maxs.y, aabb.maxs.z),
        })
    }

    /// Triangles in the order the STL writers emit them.
    pub fn triangles(&self) -> Vec<[Point3<f64>; 3]> {
        self.mesh
            .polygons
            .iter()
            .flat_map(|poly| poly.triangulate())
            .map(|tri| tri.map(|v| Point3::new(v.pos.x, v.pos.y, v.pos.z)))
            .collect()
    }

    /// Number of facets an STL file of this solid holds.
    pub fn triangle_count(&self) -> usize {
        self.mesh
            .polygons
            .iter()
            .map(|poly| poly.triangulate().len())
            .sum()
    }

    /// Enclosed volume from the divergence theorem; positive when the
    /// facets face outward.
    pub fn volume(&self) -> f64 {
        self.triangles()
            .iter()
            .map(|[a, b, c]| a.coords.dot(&b.coords.cross(&c.coords)))
            .sum::<f64>()
            / 6.0
    }
}
