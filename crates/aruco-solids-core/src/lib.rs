//! Core types and utilities for printable ArUco marker solids.
//!
//! This crate is intentionally small and purely geometric. It knows nothing
//! about marker dictionaries or mesh file formats.

mod color;
mod geometry;
mod logger;

pub use color::Rgba;
pub use geometry::{Bounds3, Cuboid, GeometryError, GEOM_EPS};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
