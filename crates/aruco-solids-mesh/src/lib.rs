//! Marker solids built with the `csgrs` CSG kernel, and their STL output.
//!
//! Every primitive of a marker is a rectangle (optionally with rounded
//! corners) extruded along +Z. [`Solid`] wraps the kernel's mesh type,
//! offers union, difference and intersection, and measures the result in
//! workspace types. [`save_stl`] writes one or more named solids through
//! the kernel's `stl_io` writers.

mod solid;
mod stl;

pub use solid::{CsgMesh, Solid};
pub use stl::{
    binary_stl_len, encode_stl, save_stl, write_stl, StlError, StlFormat, StlSolid,
    STL_HEADER_LEN, STL_TRIANGLE_LEN,
};
