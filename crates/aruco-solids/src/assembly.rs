//! Two-part marker assembly.

use crate::{BuildError, CellSolidBuilder, MarkerGeometry};
use aruco_solids_bitmap::BitmapGrid;
use aruco_solids_core::{Bounds3, Rgba};
use aruco_solids_mesh::{Solid, StlSolid};

/// Name given to every marker assembly.
pub const ASSEMBLY_NAME: &str = "aruco_marker";
/// Background plate part.
pub const WHITE_PART: &str = "white_bits";
/// Raised black cells part.
pub const BLACK_PART: &str = "black_bits";

/// One colored solid of an assembly.
#[derive(Clone, Debug)]
pub struct Part {
    pub name: String,
    pub color: Rgba,
    pub solid: Solid,
}

/// Named collection of colored parts, written out together.
#[derive(Clone, Debug)]
pub struct Assembly {
    name: String,
    parts: Vec<Part>,
}

impl Assembly {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parts: Vec::new(),
        }
    }

    /// Append a part; parts keep insertion order.
    pub fn add(&mut self, name: impl Into<String>, solid: Solid, color: Rgba) -> &mut Self {
        self.parts.push(Part {
            name: name.into(),
            color,
            solid,
        });
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn part(&self, name: &str) -> Option<&Part> {
        self.parts.iter().find(|p| p.name == name)
    }

    /// STL views of every non-empty part, in insertion order.
    pub fn stl_solids(&self) -> Vec<StlSolid<'_>> {
        self.parts
            .iter()
            .filter(|p| !p.solid.is_empty())
            .map(|p| StlSolid {
                name: &p.name,
                solid: &p.solid,
                color: Some(p.color),
            })
            .collect()
    }

    /// Facets written for the whole assembly.
    pub fn triangle_count(&self) -> usize {
        self.parts.iter().map(|p| p.solid.triangle_count()).sum()
    }

    /// Bounds over all parts, `None` when every part is empty.
    pub fn bounds(&self) -> Option<Bounds3> {
        self.parts
            .iter()
            .filter_map(|p| p.solid.bounds())
            .reduce(|a, b| a.union(&b))
    }
}

/// Composes the white plate and black cells of a marker into an [`Assembly`].
#[derive(Clone, Copy, Debug)]
pub struct AssemblyComposer<'a> {
    geometry: &'a MarkerGeometry,
}

impl<'a> AssemblyComposer<'a> {
    pub fn new(geometry: &'a MarkerGeometry) -> Self {
        Self { geometry }
    }

    /// Build `black_bits` as the union of black cells and `white_bits` as the
    /// plate minus that union.
    pub fn compose(&self, grid: &BitmapGrid) -> Result<Assembly, BuildError> {
        let builder = CellSolidBuilder::new(self.geometry, grid)?;
        let black = builder.black_bits();
        let white = builder.white_bits(&black);

        let mut assembly = Assembly::new(ASSEMBLY_NAME);
        assembly
            .add(WHITE_PART, white, Rgba::WHITE)
            .add(BLACK_PART, black, Rgba::BLACK);
        Ok(assembly)
    }
}
