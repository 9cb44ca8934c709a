// Grid dimensions, window geometry, and the validation boundary shared by
// the integral and hit-count kernels. All buffer/size checks happen here,
// once, so the kernels themselves can stay branch-free inner loops.

use serde::{Deserialize, Serialize};
use std::ops::Add;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },
    #[error("buffer length {len} does not match a {width}x{height} grid")]
    LengthMismatch {
        len: usize,
        width: usize,
        height: usize,
    },
    #[error("window {bw}x{bh} does not fit strictly inside a {width}x{height} grid")]
    WindowTooLarge {
        bw: usize,
        bh: usize,
        width: usize,
        height: usize,
    },
    #[error("hits buffer length {len} is shorter than the {rows} valid window rows")]
    HitsTooShort { len: usize, rows: usize },
}

/// Dimensions of a row-major occupancy grid. Cell (x, y) lives at
/// `y * width + x` in the flat buffer; [`GridDims::index`] is the only
/// place that arithmetic is written out.
///
/// Both extents are positive by construction: the fields are private and
/// every way in, [`GridDims::new`] included, runs the zero-extent check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGridDims")]
pub struct GridDims {
    width: usize,
    height: usize,
}

/// Wire shape for `GridDims`. Deserialization funnels through the same
/// check as `GridDims::new`, so a config file cannot smuggle in a 0x0 grid.
#[derive(Deserialize)]
struct RawGridDims {
    width: usize,
    height: usize,
}

impl TryFrom<RawGridDims> for GridDims {
    type Error = GridError;

    fn try_from(raw: RawGridDims) -> Result<Self, GridError> {
        Self::new(raw.width, raw.height)
    }
}

impl GridDims {
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyGrid { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(self) -> usize {
        self.width
    }

    pub fn height(self) -> usize {
        self.height
    }

    /// Expected flat-buffer length for these dimensions.
    pub fn len(self) -> usize {
        self.width * self.height
    }

    #[inline]
    pub(crate) fn index(self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y * self.width + x
    }

    /// Check that `len` matches `width * height` exactly. Called once per
    /// public entry point; the kernels never re-validate.
    pub fn check_buffer(self, len: usize) -> Result<(), GridError> {
        if len != self.len() {
            return Err(GridError::LengthMismatch {
                len,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

/// A candidate placement rectangle slid across the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub width: usize,
    pub height: usize,
}

impl Window {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Whether the window can be slid anywhere at all. Both extents must be
    /// positive and strictly smaller than the grid, mirroring the early-out
    /// the placement engine performs before rasterizing a word.
    pub fn fits(self, dims: GridDims) -> bool {
        self.width > 0
            && self.height > 0
            && self.width < dims.width()
            && self.height < dims.height()
    }

    /// Number of valid top-left rows, `height - bh`; 0 when the window
    /// does not fit, so sizing a hits buffer off this is always safe.
    pub fn rows(self, dims: GridDims) -> usize {
        dims.height().saturating_sub(self.height)
    }

    /// Number of valid top-left columns per row, `width - bw`; 0 when the
    /// window does not fit.
    pub fn cols(self, dims: GridDims) -> usize {
        dims.width().saturating_sub(self.width)
    }

    pub(crate) fn check(self, dims: GridDims) -> Result<(), GridError> {
        if !self.fits(dims) {
            return Err(GridError::WindowTooLarge {
                bw: self.width,
                bh: self.height,
                width: dims.width(),
                height: dims.height(),
            });
        }
        Ok(())
    }
}

/// How the summed-area builder reads each source cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildMode {
    /// Sum the raw cell values as stored.
    Raw,
    /// Treat any positive cell as a single occupied unit before summing.
    Binarize,
}

impl BuildMode {
    #[inline]
    pub(crate) fn load<T: GridCell>(self, cell: T) -> T {
        match self {
            Self::Raw => cell,
            Self::Binarize => {
                if cell.is_occupied() {
                    T::ONE
                } else {
                    T::ZERO
                }
            }
        }
    }
}

/// Whether per-row hit counts stay independent or become a running total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountMode {
    /// `hits[y]` counts collision-free positions in row y only.
    Independent,
    /// `hits[y]` counts collision-free positions in rows 0..=y.
    Cumulative,
}

/// Cell types the kernels operate on. Signed cells carry raw additive
/// counts; unsigned cells are the binarized occupancy variant.
pub trait GridCell: Copy + Add<Output = Self> + PartialEq + Into<i64> {
    const ZERO: Self;
    const ONE: Self;

    /// True if the cell held any occupancy before summation.
    fn is_occupied(self) -> bool;
}

impl GridCell for i32 {
    const ZERO: Self = 0;
    const ONE: Self = 1;

    fn is_occupied(self) -> bool {
        self > 0
    }
}

impl GridCell for u32 {
    const ZERO: Self = 0;
    const ONE: Self = 1;

    fn is_occupied(self) -> bool {
        self > 0
    }
}
