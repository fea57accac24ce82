//! Binary cell bitmaps of ArUco/AprilTag markers.
//!
//! Marker codes come from the dictionaries embedded in `calib-targets-aruco`.
//! This crate only resolves dictionary names and lays a code out on a square
//! grid with its black border; it does not encode or decode markers itself.
//!
//! ```no_run
//! use aruco_solids_bitmap::MarkerBitmapSource;
//!
//! # fn main() -> Result<(), aruco_solids_bitmap::BitmapError> {
//! let source = MarkerBitmapSource::from_name("DICT_4X4_50")?;
//! let grid = source.bitmap(7, 1)?;
//! print!("{}", grid.render_ascii());
//! # Ok(())
//! # }
//! ```

mod dictionary;
mod grid;
mod source;

pub use calib_targets_aruco::Dictionary;
pub use dictionary::{
    canonical_dictionary_name, dictionary_by_name, list_dictionaries, DictionaryInfo,
    BUILTIN_DICTIONARY_NAMES,
};
pub use grid::BitmapGrid;
pub use source::{MarkerBitmapSource, DEFAULT_BORDER_BITS};

/// Errors produced while resolving dictionaries or building bitmaps.
#[derive(thiserror::Error, Debug)]
pub enum BitmapError {
    #[error("unknown marker dictionary `{0}`")]
    UnknownDictionary(String),
    #[error("marker id {id} is out of range for {dictionary} ({available} markers)")]
    MarkerIdOutOfRange {
        id: u32,
        dictionary: String,
        available: usize,
    },
    #[error("border must be at least one cell wide")]
    ZeroBorder,
    #[error("bitmap grid must have at least one cell")]
    EmptyGrid,
    #[error("expected {expected} cells, got {got}")]
    CellCountMismatch { expected: usize, got: usize },
    #[error("row {row} has {len} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("invalid cell character `{0}` (use '#' or '.')")]
    InvalidCellChar(char),
}
