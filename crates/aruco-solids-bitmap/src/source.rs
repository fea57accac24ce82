//! Marker id -> [`BitmapGrid`] rasterization.

use crate::{dictionary_by_name, BitmapError, BitmapGrid};
use calib_targets_aruco::Dictionary;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// OpenCV's default marker border width in cells.
pub const DEFAULT_BORDER_BITS: usize = 1;

/// Produces one-cell-per-bit bitmaps for the markers of a dictionary.
#[derive(Clone, Debug)]
pub struct MarkerBitmapSource {
    name: &'static str,
    dict: Dictionary,
}

impl MarkerBitmapSource {
    /// Look up a built-in dictionary by name (see [`crate::canonical_dictionary_name`]).
    pub fn from_name(name: &str) -> Result<Self, BitmapError> {
        let (name, dict) = dictionary_by_name(name)?;
        Ok(Self::new(name, dict))
    }

    /// Use an already resolved dictionary under the given display name.
    pub fn new(name: &'static str, dict: Dictionary) -> Self {
        Self { name, dict }
    }

    /// Canonical dictionary name, as used in output file names.
    #[inline]
    pub fn dictionary_name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn dictionary(&self) -> Dictionary {
        self.dict
    }

    /// Inner code bits per side.
    #[inline]
    pub fn marker_size(&self) -> usize {
        self.dict.marker_size
    }

    /// Number of valid marker ids.
    #[inline]
    pub fn marker_count(&self) -> usize {
        self.dict.codes.len()
    }

    /// Cells per side of a rendered marker with the given border width.
    #[inline]
    pub fn grid_size(&self, border_bits: usize) -> usize {
        self.dict.marker_size + 2 * border_bits
    }

    /// Render `marker_id` with a black border `border_bits` cells wide.
    ///
    /// The inner code is read row-major (`idx = y * marker_size + x`) with
    /// black = 1, so cell `(border + y, border + x)` carries bit `idx`.
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(self), fields(dict = self.name)))]
    pub fn bitmap(&self, marker_id: u32, border_bits: usize) -> Result<BitmapGrid, BitmapError> {
        let code = *self
            .dict
            .codes
            .get(marker_id as usize)
            .ok_or(BitmapError::MarkerIdOutOfRange {
                id: marker_id,
                dictionary: self.name.to_string(),
                available: self.dict.codes.len(),
            })?;
        if border_bits == 0 {
            return Err(BitmapError::ZeroBorder);
        }

        let n = self.dict.marker_size;
        let size = self.grid_size(border_bits);
        let grid = BitmapGrid::from_fn(size, |row, col| {
            let inner = row >= border_bits
                && col >= border_bits
                && row < border_bits + n
                && col < border_bits + n;
            if !inner {
                return true;
            }
            let idx = (row - border_bits) * n + (col - border_bits);
            (code >> idx) & 1 == 1
        });

        log::debug!(
            "{} id={} -> {}x{} cells, {} black",
            self.name,
            marker_id,
            size,
            size,
            grid.black_count()
        );
        Ok(grid)
    }
}
