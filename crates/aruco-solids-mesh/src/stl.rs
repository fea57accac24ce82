//! STL encoding through the CSG kernel's `stl_io` writers.
//!
//! Several named solids can share one file. ASCII output keeps one
//! `solid ... endsolid` block per part. Binary output is written by
//! `stl_io` for the merged parts; afterwards each part's color is stamped
//! into the attribute word of its facets (VisCAM/SolidView convention).

use crate::{CsgMesh, Solid};
use aruco_solids_core::Rgba;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Size of the fixed binary STL header.
pub const STL_HEADER_LEN: usize = 80;
/// Bytes per triangle record in binary STL.
pub const STL_TRIANGLE_LEN: usize = 50;

const COUNT_LEN: usize = 4;
const ATTRIBUTE_OFFSET: usize = STL_TRIANGLE_LEN - 2;

/// Output encoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StlFormat {
    #[default]
    Binary,
    Ascii,
}

/// One named solid to write.
#[derive(Clone, Copy, Debug)]
pub struct StlSolid<'a> {
    pub name: &'a str,
    pub solid: &'a Solid,
    pub color: Option<Rgba>,
}

#[derive(thiserror::Error, Debug)]
pub enum StlError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("binary STL holds {found} facets, parts account for {expected}")]
    FacetCount { expected: usize, found: usize },
}

/// Expected byte length of a binary STL holding `triangles` triangles.
pub fn binary_stl_len(triangles: usize) -> usize {
    STL_HEADER_LEN + COUNT_LEN + STL_TRIANGLE_LEN * triangles
}

/// Encode `solids` into one in-memory STL file.
pub fn encode_stl(solids: &[StlSolid<'_>], format: StlFormat) -> Result<Vec<u8>, StlError> {
    match format {
        StlFormat::Binary => encode_binary(solids),
        StlFormat::Ascii => Ok(encode_ascii(solids).into_bytes()),
    }
}

/// Encode `solids` and write them to `out`.
pub fn write_stl<W: Write>(
    out: &mut W,
    solids: &[StlSolid<'_>],
    format: StlFormat,
) -> Result<(), StlError> {
    out.write_all(&encode_stl(solids, format)?)?;
    Ok(())
}

/// Create (or truncate) `path` and write `solids` into it.
pub fn save_stl(
    path: impl AsRef<Path>,
    solids: &[StlSolid<'_>],
    format: StlFormat,
) -> Result<(), StlError> {
    fs::write(path, encode_stl(solids, format)?)?;
    Ok(())
}

fn encode_binary(solids: &[StlSolid<'_>]) -> Result<Vec<u8>, StlError> {
    let merged = CsgMesh::from_polygons(
        &solids
            .iter()
            .flat_map(|s| s.solid.mesh().polygons.iter().cloned())
            .collect::<Vec<_>>(),
        None,
    );
    let mut bytes = merged.to_stl_binary("")?;

    let expected: usize = solids.iter().map(|s| s.solid.triangle_count()).sum();
    let found = (bytes.len().saturating_sub(STL_HEADER_LEN + COUNT_LEN)) / STL_TRIANGLE_LEN;
    if found != expected {
        return Err(StlError::FacetCount { expected, found });
    }

    let mut start = 0;
    for s in solids {
        let count = s.solid.triangle_count();
        if let Some(color) = s.color {
            paint_facets(&mut bytes, start..start + count, color.to_stl_attribute());
        }
        start += count;
    }
    Ok(bytes)
}

/// Write `attribute` into the trailing word of facets `range`.
fn paint_facets(bytes: &mut [u8], range: std::ops::Range<usize>, attribute: u16) {
    for facet in range {
        let at = STL_HEADER_LEN + COUNT_LEN + facet * STL_TRIANGLE_LEN + ATTRIBUTE_OFFSET;
        if let Some(word) = bytes.get_mut(at..at + 2) {
            word.copy_from_slice(&attribute.to_le_bytes());
        }
    }
}

fn encode_ascii(solids: &[StlSolid<'_>]) -> String {
    solids
        .iter()
        .map(|s| s.solid.mesh().to_stl_ascii(&ascii_name(s.name)))
        .collect()
}

fn ascii_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_graphic() { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use aruco_solids_core::Cuboid;
    use nalgebra::Vector3;

    fn unit_box(x: f64) -> Solid {
        Solid::cuboid(&Cuboid::extrude_rect(1.0, 1.0, 1.0, Vector3::new(x, 0.0, 0.0)).expect("box"))
    }

    #[test]
    fn binary_output_is_colored_per_part() {
        let a = unit_box(0.0);
        let b = unit_box(3.0);
        let solids = [
            StlSolid {
                name: "a",
                solid: &a,
                color: None,
            },
            StlSolid {
                name: "b",
                solid: &b,
                color: Some(Rgba::WHITE),
            },
        ];
        let buf = encode_stl(&solids, StlFormat::Binary).expect("encode");
        let facets = a.triangle_count() + b.triangle_count();
        assert_eq!(buf.len(), binary_stl_len(facets));
        assert_eq!(&buf[80..84], &(facets as u32).to_le_bytes());

        let first_attr = u16::from_le_bytes([buf[84 + 48], buf[84 + 49]]);
        assert_eq!(first_attr, 0);
        let last_attr = u16::from_le_bytes([buf[buf.len() - 2], buf[buf.len() - 1]]);
        assert_eq!(last_attr, 0xFFFF);
    }

    #[test]
    fn ascii_output_names_each_solid() {
        let a = unit_box(0.0);
        let solids = [StlSolid {
            name: "white bits",
            solid: &a,
            color: None,
        }];
        let mut buf = Vec::new();
        write_stl(&mut buf, &solids, StlFormat::Ascii).expect("write");
        let text = String::from_utf8(buf).expect("utf8");
        assert!(text.starts_with("solid white_bits\n"));
        assert!(text.trim_end().ends_with("endsolid white_bits"));
        assert_eq!(text.matches("facet normal").count(), a.triangle_count());
    }

    #[test]
    fn save_creates_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("t.stl");
        let a = unit_box(0.0);
        let solids = [StlSolid {
            name: "t",
            solid: &a,
            color: None,
        }];
        save_stl(&path, &solids, StlFormat::Binary).expect("save");
        let len = std::fs::metadata(&path).expect("metadata").len();
        assert_eq!(len as usize, binary_stl_len(a.triangle_count()));
    }
}
