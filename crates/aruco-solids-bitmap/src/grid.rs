//! Square boolean cell grid of a rendered marker.

use crate::BitmapError;
use serde::{Deserialize, Serialize};

/// Square marker bitmap, one entry per printed cell.
///
/// Cells are stored row-major with **black = true**. Row 0 is the top row
/// of the marker as it is printed and read.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitmapGrid {
    size: usize,
    cells: Vec<bool>,
}

impl BitmapGrid {
    /// Wrap `cells` (row-major, `size * size` entries).
    pub fn new(size: usize, cells: Vec<bool>) -> Result<Self, BitmapError> {
        if size == 0 {
            return Err(BitmapError::EmptyGrid);
        }
        if cells.len() != size * size {
            return Err(BitmapError::CellCountMismatch {
                expected: size * size,
                got: cells.len(),
            });
        }
        Ok(Self { size, cells })
    }

    /// Build a grid by evaluating `is_black(row, col)` for every cell.
    pub fn from_fn(size: usize, mut is_black: impl FnMut(usize, usize) -> bool) -> Self {
        let mut cells = Vec::with_capacity(size * size);
        for row in 0..size {
            for col in 0..size {
                cells.push(is_black(row, col));
            }
        }
        Self { size, cells }
    }

    /// Parse rows of `#` (black) and `.` (white). Mostly useful in tests.
    pub fn from_ascii(rows: &[&str]) -> Result<Self, BitmapError> {
        let size = rows.len();
        let mut cells = Vec::with_capacity(size * size);
        for (row, line) in rows.iter().enumerate() {
            if line.chars().count() != size {
                return Err(BitmapError::RaggedRow {
                    row,
                    len: line.chars().count(),
                    expected: size,
                });
            }
            for ch in line.chars() {
                match ch {
                    '#' => cells.push(true),
                    '.' => cells.push(false),
                    other => return Err(BitmapError::InvalidCellChar(other)),
                }
            }
        }
        Self::new(size, cells)
    }

    /// Cells per side.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Color of `(row, col)`; `None` outside the grid.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<bool> {
        if row < self.size && col < self.size {
            Some(self.cells[row * self.size + col])
        } else {
            None
        }
    }

    #[inline]
    pub fn is_black(&self, row: usize, col: usize) -> bool {
        self.get(row, col).unwrap_or(false)
    }

    /// Row-major cell slice.
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// `(row, col)` of every black cell in row-major order.
    pub fn black_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &b)| b)
            .map(move |(i, _)| (i / n, i % n))
    }

    pub fn black_count(&self) -> usize {
        self.cells.iter().filter(|&&b| b).count()
    }

    /// True when every cell within `width` of the outer edge is black.
    pub fn has_black_border(&self, width: usize) -> bool {
        let n = self.size;
        (0..n).all(|row| {
            (0..n).all(|col| {
                let in_border =
                    row < width || col < width || row + width >= n || col + width >= n;
                !in_border || self.cells[row * n + col]
            })
        })
    }

    /// Multi-line `#`/`.` rendering, the inverse of [`BitmapGrid::from_ascii`].
    pub fn render_ascii(&self) -> String {
        let mut out = String::with_capacity(self.size * (self.size + 1));
        for row in self.cells.chunks(self.size) {
            out.extend(row.iter().map(|&b| if b { '#' } else { '.' }));
            out.push('\n');
        }
        out
    }
}
