//! Writing assemblies to STL files.

use crate::Assembly;
use aruco_solids_mesh::{save_stl, StlError, StlFormat, StlSolid};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[cfg(feature = "tracing")]
use tracing::instrument;

#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    #[error("cannot write {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("cannot encode {path}: {source}")]
    Stl { path: PathBuf, source: StlError },
    #[error("assembly `{0}` has no geometry to export")]
    EmptyAssembly(String),
}

/// `marker_<DICTIONARY>_id=<id>.stl`
pub fn marker_file_name(dictionary: &str, marker_id: u32) -> String {
    format!("marker_{dictionary}_id={marker_id}.stl")
}

/// `marker_<DICTIONARY>_id=<id>_<part>.stl`
pub fn part_file_name(dictionary: &str, marker_id: u32, part: &str) -> String {
    format!("marker_{dictionary}_id={marker_id}_{part}.stl")
}

/// Writes marker assemblies below one output directory.
#[derive(Clone, Debug)]
pub struct FileExporter {
    output_dir: PathBuf,
    format: StlFormat,
    split_parts: bool,
}

impl FileExporter {
    /// Binary STL, one combined file per marker.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            format: StlFormat::Binary,
            split_parts: false,
        }
    }

    pub fn with_format(mut self, format: StlFormat) -> Self {
        self.format = format;
        self
    }

    /// Also write one file per part next to the combined file.
    pub fn with_split_parts(mut self, split: bool) -> Self {
        self.split_parts = split;
        self
    }

    #[inline]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Path of the combined file for `marker_id`.
    pub fn marker_path(&self, dictionary: &str, marker_id: u32) -> PathBuf {
        self.output_dir.join(marker_file_name(dictionary, marker_id))
    }

    /// Write `assembly`, creating the output directory if needed.
    ///
    /// Returns the written paths, combined file first.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, assembly), fields(dir = %self.output_dir.display()))
    )]
    pub fn export(
        &self,
        assembly: &Assembly,
        dictionary: &str,
        marker_id: u32,
    ) -> Result<Vec<PathBuf>, ExportError> {
        let solids = assembly.stl_solids();
        if solids.is_empty() {
            return Err(ExportError::EmptyAssembly(assembly.name().to_string()));
        }

        fs::create_dir_all(&self.output_dir).map_err(|source| ExportError::Io {
            path: self.output_dir.clone(),
            source,
        })?;

        let mut written = Vec::with_capacity(1 + solids.len());
        let path = self.marker_path(dictionary, marker_id);
        self.save(&path, &solids)?;
        written.push(path);

        if self.split_parts {
            for solid in &solids {
                let path = self
                    .output_dir
                    .join(part_file_name(dictionary, marker_id, solid.name));
                self.save(&path, std::slice::from_ref(solid))?;
                written.push(path);
            }
        }
        Ok(written)
    }

    fn save(&self, path: &Path, solids: &[StlSolid<'_>]) -> Result<(), ExportError> {
        save_stl(path, solids, self.format).map_err(|err| match err {
            StlError::Io(source) => ExportError::Io {
                path: path.to_path_buf(),
                source,
            },
            source => ExportError::Stl {
                path: path.to_path_buf(),
                source,
            },
        })?;
        log::debug!("wrote {} ({} parts)", path.display(), solids.len());
        Ok(())
    }
}
