//! High-level facade crate for the `aruco-solids-*` workspace.
//!
//! Turns ArUco/AprilTag marker ids into two-part, 3D-printable solids: a
//! white background plate pocketed where the black cells sit, and the raised
//! black cells themselves. Each marker is written as an STL file named
//! `marker_<DICTIONARY>_id=<id>.stl`.
//!
//! ## Quickstart
//!
//! ```no_run
//! use aruco_solids::{FileExporter, MarkerGenerator, MarkerGeometry};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let generator = MarkerGenerator::new(
//!     "DICT_4X4_50",
//!     MarkerGeometry::default(),
//!     FileExporter::new("output"),
//! )?;
//! for id in 0..16 {
//!     let marker = generator.generate(id)?;
//!     println!("{}", marker.paths[0].display());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `aruco_solids::core`: boxes, bounds, colors, logger.
//! - `aruco_solids::bitmap`: dictionary lookup and marker bitmaps.
//! - `aruco_solids::mesh`: csgrs-backed solids, booleans and STL writers.
//! - [`CellSolidBuilder`] / [`AssemblyComposer`]: bitmap -> solids -> assembly.
//! - [`FileExporter`]: assembly -> STL files.
//! - [`GenerateConfig`]: JSON batch configuration.

pub use aruco_solids_bitmap as bitmap;
pub use aruco_solids_core as core;
pub use aruco_solids_mesh as mesh;

mod assembly;
mod builder;
mod export;
mod generate;
mod io;
mod spec;

pub use assembly::{Assembly, AssemblyComposer, Part, ASSEMBLY_NAME, BLACK_PART, WHITE_PART};
pub use builder::{BuildError, CellSolidBuilder};
pub use export::{marker_file_name, part_file_name, ExportError, FileExporter};
pub use generate::{build_marker, generate_markers, GenerateError, GeneratedMarker, MarkerGenerator};
pub use io::{ConfigError, GenerateConfig, OutputFormat};
pub use spec::{CornerStyle, MarkerGeometry, MarkerSpec, SpecError};
