//! JSON configuration for batch generation.

use crate::MarkerGeometry;
use aruco_solids_mesh::StlFormat;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("id range {first}..{first}+{count} overflows u32")]
    IdOverflow { first: u32, count: u32 },
}

/// STL encoding selectable from config and CLI.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Binary,
    Ascii,
}

impl From<OutputFormat> for StlFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Binary => StlFormat::Binary,
            OutputFormat::Ascii => StlFormat::Ascii,
        }
    }
}

fn default_dictionary() -> String {
    "DICT_4X4_50".to_string()
}

fn default_count() -> u32 {
    16
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

/// Which markers to generate, how big, and where to put them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateConfig {
    #[serde(default = "default_dictionary")]
    pub dictionary: String,
    /// First id of the contiguous range, used when `ids` is absent.
    #[serde(default)]
    pub first_id: u32,
    #[serde(default = "default_count")]
    pub count: u32,
    /// Explicit ids; overrides `first_id`/`count`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<u32>>,
    #[serde(default)]
    pub geometry: MarkerGeometry,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default)]
    pub split_parts: bool,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            dictionary: default_dictionary(),
            first_id: 0,
            count: default_count(),
            ids: None,
            geometry: MarkerGeometry::default(),
            output_dir: default_output_dir(),
            format: OutputFormat::default(),
            split_parts: false,
        }
    }
}

impl GenerateConfig {
    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Ids to generate, in order.
    pub fn marker_ids(&self) -> Result<Vec<u32>, ConfigError> {
        if let Some(ids) = &self.ids {
            return Ok(ids.clone());
        }
        let end = self
            .first_id
            .checked_add(self.count)
            .ok_or(ConfigError::IdOverflow {
                first: self.first_id,
                count: self.count,
            })?;
        Ok((self.first_id..end).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_gives_script_defaults() {
        let cfg: GenerateConfig = serde_json::from_str("{}").expect("json");
        assert_eq!(cfg, GenerateConfig::default());
        assert_eq!(cfg.marker_ids().expect("ids"), (0..16).collect::<Vec<_>>());
        assert_eq!(cfg.output_dir, PathBuf::from("output"));
    }

    #[test]
    fn explicit_ids_win_over_range() {
        let cfg: GenerateConfig =
            serde_json::from_str(r#"{ "first_id": 4, "count": 2, "ids": [9, 1] }"#).expect("json");
        assert_eq!(cfg.marker_ids().expect("ids"), vec![9, 1]);

        let cfg = GenerateConfig {
            first_id: u32::MAX,
            count: 2,
            ..GenerateConfig::default()
        };
        assert!(matches!(cfg.marker_ids(), Err(ConfigError::IdOverflow { .. })));
    }

    #[test]
    fn config_survives_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("cfg.json");
        let cfg = GenerateConfig {
            dictionary: "DICT_5X5_100".to_string(),
            format: OutputFormat::Ascii,
            ..GenerateConfig::default()
        };
        cfg.write_json(&path).expect("write");
        assert_eq!(GenerateConfig::load_json(&path).expect("load"), cfg);
    }
}
