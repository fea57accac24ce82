//! End-to-end marker generation: bitmap -> solids -> assembly -> STL.

use crate::{
    Assembly, AssemblyComposer, BuildError, ConfigError, ExportError, FileExporter,
    GenerateConfig, MarkerGeometry, MarkerSpec,
};
use aruco_solids_bitmap::{BitmapError, BitmapGrid, MarkerBitmapSource};
use std::path::PathBuf;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors produced by the high-level generation helpers.
#[derive(thiserror::Error, Debug)]
pub enum GenerateError {
    #[error(transparent)]
    Bitmap(#[from] BitmapError),
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result of generating one marker.
#[derive(Clone, Debug)]
pub struct GeneratedMarker {
    pub marker_id: u32,
    /// Written files, combined assembly first.
    pub paths: Vec<PathBuf>,
    pub triangles: usize,
}

/// Generates markers of one dictionary with fixed geometry.
#[derive(Clone, Debug)]
pub struct MarkerGenerator {
    source: MarkerBitmapSource,
    geometry: MarkerGeometry,
    exporter: FileExporter,
}

impl MarkerGenerator {
    /// Resolve `dictionary` and validate `geometry` up front.
    pub fn new(
        dictionary: &str,
        geometry: MarkerGeometry,
        exporter: FileExporter,
    ) -> Result<Self, GenerateError> {
        let source = MarkerBitmapSource::from_name(dictionary)?;
        geometry.validate().map_err(BuildError::from)?;
        Ok(Self {
            source,
            geometry,
            exporter,
        })
    }

    pub fn from_config(cfg: &GenerateConfig) -> Result<Self, GenerateError> {
        let exporter = FileExporter::new(&cfg.output_dir)
            .with_format(cfg.format.into())
            .with_split_parts(cfg.split_parts);
        Self::new(&cfg.dictionary, cfg.geometry, exporter)
    }

    /// Canonical dictionary name used in file names.
    #[inline]
    pub fn dictionary_name(&self) -> &'static str {
        self.source.dictionary_name()
    }

    #[inline]
    pub fn source(&self) -> &MarkerBitmapSource {
        &self.source
    }

    #[inline]
    pub fn exporter(&self) -> &FileExporter {
        &self.exporter
    }

    pub fn spec(&self, marker_id: u32) -> MarkerSpec {
        MarkerSpec::new(self.dictionary_name(), marker_id, self.geometry)
    }

    pub fn bitmap(&self, marker_id: u32) -> Result<BitmapGrid, GenerateError> {
        Ok(self.source.bitmap(marker_id, self.geometry.border_bits)?)
    }

    /// Build the two-part assembly for `marker_id` without writing it.
    pub fn create_assembly(&self, marker_id: u32) -> Result<Assembly, GenerateError> {
        let grid = self.bitmap(marker_id)?;
        log::trace!("marker {}:\n{}", marker_id, grid.render_ascii());
        Ok(AssemblyComposer::new(&self.geometry).compose(&grid)?)
    }

    /// Build and export one marker.
    #[cfg_attr(feature = "tracing", instrument(level = "info", skip(self)))]
    pub fn generate(&self, marker_id: u32) -> Result<GeneratedMarker, GenerateError> {
        let assembly = self.create_assembly(marker_id)?;
        let paths = self
            .exporter
            .export(&assembly, self.dictionary_name(), marker_id)?;
        Ok(GeneratedMarker {
            marker_id,
            paths,
            triangles: assembly.triangle_count(),
        })
    }

    /// Generate each id in turn, stopping at the first failure.
    pub fn generate_all(&self, ids: &[u32]) -> Result<Vec<GeneratedMarker>, GenerateError> {
        let mut out = Vec::with_capacity(ids.len());
        for (n, &id) in ids.iter().enumerate() {
            let marker = self.generate(id)?;
            log::info!(
                "[{}/{}] {} id={} -> {}",
                n + 1,
                ids.len(),
                self.dictionary_name(),
                id,
                marker.paths[0].display()
            );
            out.push(marker);
        }
        Ok(out)
    }
}

/// Build the assembly for a single [`MarkerSpec`].
pub fn build_marker(spec: &MarkerSpec) -> Result<Assembly, GenerateError> {
    spec.validate().map_err(BuildError::from)?;
    let source = MarkerBitmapSource::from_name(&spec.dictionary)?;
    let grid = source.bitmap(spec.marker_id, spec.geometry.border_bits)?;
    Ok(AssemblyComposer::new(&spec.geometry).compose(&grid)?)
}

/// Run a whole [`GenerateConfig`].
pub fn generate_markers(cfg: &GenerateConfig) -> Result<Vec<GeneratedMarker>, GenerateError> {
    let ids = cfg.marker_ids()?;
    let generator = MarkerGenerator::from_config(cfg)?;
    log::info!(
        "generating {} {} markers into {}",
        ids.len(),
        generator.dictionary_name(),
        cfg.output_dir.display()
    );
    generator.generate_all(&ids)
}
