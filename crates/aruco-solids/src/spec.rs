//! Marker geometry parameters and their validation.

use aruco_solids_core::GEOM_EPS;
use serde::{Deserialize, Serialize};

/// Shape of the four outer corners of the background plate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum CornerStyle {
    /// Quarter rounds of radius `margin`, approximated by `segments` chords.
    Rounded { segments: usize },
    /// Plain square corners.
    Square,
}

impl Default for CornerStyle {
    fn default() -> Self {
        CornerStyle::Rounded { segments: 8 }
    }
}

/// Physical dimensions of one printed marker, in millimetres.
///
/// The black cells occupy the top `black_cell_thickness` of the total
/// thickness; the white plate rises from `z = 0` to `white_cell_thickness`
/// and is pocketed wherever a black cell overlaps it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerGeometry {
    /// Side of the marker square including its black border.
    pub side_length: f64,
    /// Height of the top of the black cells.
    pub total_thickness: f64,
    /// White rim added around the marker square.
    pub margin: f64,
    pub black_cell_thickness: f64,
    pub white_cell_thickness: f64,
    /// Border width in cells.
    pub border_bits: usize,
    pub corner_style: CornerStyle,
}

impl Default for MarkerGeometry {
    fn default() -> Self {
        Self {
            side_length: 20.0,
            total_thickness: 2.0,
            margin: 1.5,
            black_cell_thickness: 0.4,
            white_cell_thickness: 1.8,
            border_bits: 1,
            corner_style: CornerStyle::default(),
        }
    }
}

/// Geometry validation errors.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SpecError {
    #[error("{name} must be finite and > 0 (got {value})")]
    NotPositive { name: &'static str, value: f64 },
    #[error("{name} ({value} mm) is below the {min} mm modelling tolerance")]
    TooSmall {
        name: &'static str,
        value: f64,
        min: f64,
    },
    #[error("margin must be finite and >= 0 (got {0})")]
    InvalidMargin(f64),
    #[error("{name} ({value}) exceeds total_thickness ({total})")]
    LayerTooThick {
        name: &'static str,
        value: f64,
        total: f64,
    },
    #[error("border_bits must be >= 1")]
    ZeroBorder,
    #[error("rounded corners need at least one segment")]
    ZeroCornerSegments,
}

impl MarkerGeometry {
    /// Check that every length is usable.
    ///
    /// A white plate thinner than `total - black` is accepted but leaves the
    /// black cells floating above it; a warning is logged in that case.
    pub fn validate(&self) -> Result<(), SpecError> {
        for (name, value) in [
            ("side_length", self.side_length),
            ("total_thickness", self.total_thickness),
            ("black_cell_thickness", self.black_cell_thickness),
            ("white_cell_thickness", self.white_cell_thickness),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(SpecError::NotPositive { name, value });
            }
            if value < GEOM_EPS {
                return Err(SpecError::TooSmall {
                    name,
                    value,
                    min: GEOM_EPS,
                });
            }
        }
        if !self.margin.is_finite() || self.margin < 0.0 {
            return Err(SpecError::InvalidMargin(self.margin));
        }
        for (name, value) in [
            ("black_cell_thickness", self.black_cell_thickness),
            ("white_cell_thickness", self.white_cell_thickness),
        ] {
            if value > self.total_thickness {
                return Err(SpecError::LayerTooThick {
                    name,
                    value,
                    total: self.total_thickness,
                });
            }
        }
        if self.border_bits == 0 {
            return Err(SpecError::ZeroBorder);
        }
        if let CornerStyle::Rounded { segments: 0 } = self.corner_style {
            return Err(SpecError::ZeroCornerSegments);
        }

        let black_floor = self.total_thickness - self.black_cell_thickness;
        if self.white_cell_thickness < black_floor {
            log::warn!(
                "white plate top ({}) is below the black cells ({}); black cells will float",
                self.white_cell_thickness,
                black_floor
            );
        }
        Ok(())
    }

    /// Printed size of one bitmap cell for a grid of `cells` per side.
    #[inline]
    pub fn pitch(&self, cells: usize) -> f64 {
        self.side_length / cells as f64
    }

    /// [`Self::pitch`], rejected when a cell would be narrower than
    /// [`GEOM_EPS`].
    pub fn checked_pitch(&self, cells: usize) -> Result<f64, SpecError> {
        let pitch = self.pitch(cells.max(1));
        if pitch < GEOM_EPS {
            return Err(SpecError::TooSmall {
                name: "pitch",
                value: pitch,
                min: GEOM_EPS,
            });
        }
        Ok(pitch)
    }

    /// Margin actually modelled: anything up to [`GEOM_EPS`] counts as none.
    #[inline]
    pub fn effective_margin(&self) -> f64 {
        if self.margin <= GEOM_EPS {
            0.0
        } else {
            self.margin
        }
    }

    /// Z of the bottom face of the black cells.
    #[inline]
    pub fn black_floor(&self) -> f64 {
        self.total_thickness - self.black_cell_thickness
    }
}

/// Everything needed to build one marker.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarkerSpec {
    /// Dictionary name, e.g. `"DICT_4X4_50"`.
    pub dictionary: String,
    pub marker_id: u32,
    #[serde(default)]
    pub geometry: MarkerGeometry,
}

impl MarkerSpec {
    pub fn new(dictionary: impl Into<String>, marker_id: u32, geometry: MarkerGeometry) -> Self {
        Self {
            dictionary: dictionary.into(),
            marker_id,
            geometry,
        }
    }

    /// Validate the geometry. The id is checked against the dictionary
    /// when the bitmap is produced.
    pub fn validate(&self) -> Result<(), SpecError> {
        self.geometry.validate()
    }
}
