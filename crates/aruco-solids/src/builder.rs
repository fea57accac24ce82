//! Per-cell boxes and the background plate of one marker.

use crate::{CornerStyle, MarkerGeometry, SpecError};
use aruco_solids_bitmap::BitmapGrid;
use aruco_solids_core::{Cuboid, GeometryError};
use aruco_solids_mesh::Solid;
use nalgebra::Vector3;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors raised while turning a bitmap into solids.
#[derive(thiserror::Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Spec(#[from] SpecError),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Builds the black-cell and white-plate solids for one bitmap.
///
/// Cell `(row, col)` is centered at `(col * pitch, (size - 1 - row) * pitch)`,
/// so row 0 ends up at the top (+Y) and the marker reads correctly from +Z.
#[derive(Debug)]
pub struct CellSolidBuilder<'a> {
    geometry: &'a MarkerGeometry,
    grid: &'a BitmapGrid,
    pitch: f64,
    black: Vec<Cuboid>,
    plate: Cuboid,
}

impl<'a> CellSolidBuilder<'a> {
    /// Validate `geometry` against the grid and lay out every primitive.
    pub fn new(geometry: &'a MarkerGeometry, grid: &'a BitmapGrid) -> Result<Self, BuildError> {
        geometry.validate()?;
        let pitch = geometry.checked_pitch(grid.size())?;

        let black = grid
            .black_cells()
            .map(|(row, col)| cell_cuboid(geometry, grid.size(), pitch, row, col))
            .collect::<Result<Vec<_>, _>>()?;
        let plate = plate_cuboid(geometry, pitch)?;
        log::debug!("{} black cells, pitch {:.4} mm", black.len(), pitch);

        Ok(Self {
            geometry,
            grid,
            pitch,
            black,
            plate,
        })
    }

    /// Printed side length of one cell.
    #[inline]
    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    #[inline]
    pub fn grid(&self) -> &BitmapGrid {
        self.grid
    }

    /// One box per black cell, in row-major order.
    #[inline]
    pub fn black_cuboids(&self) -> &[Cuboid] {
        &self.black
    }

    /// Bounding box of the plate: marker square grown by the margin,
    /// `white_cell_thickness` tall.
    #[inline]
    pub fn plate_cuboid(&self) -> &Cuboid {
        &self.plate
    }

    /// Box for cell `(row, col)`, whether black or not.
    pub fn cell_cuboid(&self, row: usize, col: usize) -> Result<Cuboid, BuildError> {
        cell_cuboid(self.geometry, self.grid.size(), self.pitch, row, col)
    }

    /// Union of all black cells.
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(self)))]
    pub fn black_bits(&self) -> Solid {
        Solid::union_all(self.black.iter().map(Solid::cuboid))
    }

    /// The uncut plate, corners shaped per [`MarkerGeometry::corner_style`].
    ///
    /// Rounded corners use the margin as radius, which matches offsetting
    /// the marker square outward by the margin with round joins.
    pub fn white_plate(&self) -> Solid {
        let margin = self.geometry.effective_margin();
        match self.geometry.corner_style {
            CornerStyle::Rounded { segments } if margin > 0.0 => {
                Solid::rounded_slab(&self.plate, margin, segments)
            }
            _ => Solid::cuboid(&self.plate),
        }
    }

    /// The plate with `black` cut out of it.
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip_all))]
    pub fn white_bits(&self, black: &Solid) -> Solid {
        self.white_plate().difference(black)
    }
}

fn cell_cuboid(
    geometry: &MarkerGeometry,
    size: usize,
    pitch: f64,
    row: usize,
    col: usize,
) -> Result<Cuboid, BuildError> {
    let x = col as f64 * pitch;
    let y = (size - 1 - row) as f64 * pitch;
    Ok(Cuboid::extrude_rect(
        pitch,
        pitch,
        -geometry.black_cell_thickness,
        Vector3::new(x, y, geometry.total_thickness),
    )?)
}

fn plate_cuboid(geometry: &MarkerGeometry, pitch: f64) -> Result<Cuboid, BuildError> {
    let offset = geometry.side_length / 2.0 - pitch / 2.0;
    let side = geometry.side_length + 2.0 * geometry.effective_margin();
    Ok(Cuboid::extrude_rect(
        side,
        side,
        geometry.white_cell_thickness,
        Vector3::new(offset, offset, 0.0),
    )?)
}
