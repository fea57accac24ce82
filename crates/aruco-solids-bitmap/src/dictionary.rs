//! Name resolution for the embedded dictionaries.

use crate::BitmapError;
use calib_targets_aruco::{builtins, Dictionary};
use serde::{Deserialize, Serialize};

/// Names of the dictionaries compiled into `calib-targets-aruco`, in the
/// order they are listed by the CLI.
pub const BUILTIN_DICTIONARY_NAMES: &[&str] = &[
    "DICT_4X4_50",
    "DICT_4X4_100",
    "DICT_4X4_250",
    "DICT_4X4_1000",
    "DICT_5X5_50",
    "DICT_5X5_100",
    "DICT_5X5_250",
    "DICT_5X5_1000",
    "DICT_6X6_50",
    "DICT_6X6_100",
    "DICT_6X6_250",
    "DICT_6X6_1000",
    "DICT_7X7_50",
    "DICT_7X7_100",
    "DICT_7X7_250",
    "DICT_7X7_1000",
    "DICT_ARUCO_ORIGINAL",
    "DICT_APRILTAG_16h5",
    "DICT_APRILTAG_25h9",
    "DICT_APRILTAG_36h10",
    "DICT_APRILTAG_36h11",
    "DICT_ARUCO_MIP_36h12",
];

/// Summary of one built-in dictionary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryInfo {
    pub name: String,
    /// Inner bits per marker side.
    pub marker_size: usize,
    /// Number of marker ids (`0..marker_count`).
    pub marker_count: usize,
}

/// Map user input such as `"dict_4x4_50"` or `"4X4_50"` to the canonical
/// built-in name (`"DICT_4X4_50"`).
pub fn canonical_dictionary_name(name: &str) -> Option<&'static str> {
    let trimmed = name.trim();
    let wanted = trimmed
        .strip_prefix("DICT_")
        .or_else(|| trimmed.strip_prefix("dict_"))
        .unwrap_or(trimmed);
    BUILTIN_DICTIONARY_NAMES.iter().copied().find(|known| {
        known
            .strip_prefix("DICT_")
            .is_some_and(|k| k.eq_ignore_ascii_case(wanted))
    })
}

/// Resolve a dictionary by (case-insensitive) name.
pub fn dictionary_by_name(name: &str) -> Result<(&'static str, Dictionary), BitmapError> {
    let canonical = canonical_dictionary_name(name)
        .ok_or_else(|| BitmapError::UnknownDictionary(name.to_string()))?;
    let dict = builtins::builtin_dictionary(canonical)
        .ok_or_else(|| BitmapError::UnknownDictionary(name.to_string()))?;
    Ok((canonical, dict))
}

/// List every built-in dictionary that the linked vision library provides.
pub fn list_dictionaries() -> Vec<DictionaryInfo> {
    BUILTIN_DICTIONARY_NAMES
        .iter()
        .filter_map(|&name| {
            builtins::builtin_dictionary(name).map(|d| DictionaryInfo {
                name: name.to_string(),
                marker_size: d.marker_size,
                marker_count: d.codes.len(),
            })
        })
        .collect()
}
