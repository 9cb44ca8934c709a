// Summed-area table construction. Turns an occupancy grid into its 2D
// inclusive prefix sum in place, so any rectangle sum afterwards costs four
// reads (see `region_sum` and the hit counter in `hits`).

use crate::grid::{BuildMode, GridCell, GridDims, GridError};

/// Transform `grid` in place into its 2D inclusive prefix sum.
///
/// After this returns, cell (x, y) holds the sum of every cell in the
/// rectangle from (0, 0) to (x, y) inclusive, as read through `mode`:
/// [`BuildMode::Raw`] sums the stored values, [`BuildMode::Binarize`]
/// counts each positive cell as one occupied unit. The original grid
/// values are destroyed.
pub fn build_integral<T: GridCell>(
    grid: &mut [T],
    dims: GridDims,
    mode: BuildMode,
) -> Result<(), GridError> {
    dims.check_buffer(grid.len())?;
    build_in_place(grid, dims, mode);
    Ok(())
}

/// Raw-count variant: sums signed cell values as stored.
pub fn cumulative_sum(grid: &mut [i32], dims: GridDims) -> Result<(), GridError> {
    build_integral(grid, dims, BuildMode::Raw)
}

/// Binarizing variant: any positive cell counts as a single occupied unit,
/// so the integral image counts occupied cells rather than summing
/// whatever magnitudes the rasterizer left behind.
pub fn cumulative_sum_binarized(grid: &mut [u32], dims: GridDims) -> Result<(), GridError> {
    build_integral(grid, dims, BuildMode::Binarize)
}

/// The two-pass kernel behind both build modes. Preconditions are the
/// caller's problem here; `build_integral` is the checked boundary.
fn build_in_place<T: GridCell>(grid: &mut [T], dims: GridDims, mode: BuildMode) {
    debug_assert_eq!(grid.len(), dims.len());
    let width = dims.width();

    // Pass 1: inclusive prefix sums along each row. In binarize mode the
    // mapping is applied as the scan advances, so each original cell is
    // read exactly once and never after it has been overwritten.
    for row in grid.chunks_exact_mut(width) {
        let mut acc = mode.load(row[0]);
        row[0] = acc;
        for cell in &mut row[1..] {
            acc = acc + mode.load(*cell);
            *cell = acc;
        }
    }

    // Pass 2: inclusive prefix sums down each column. Must run after the
    // row pass in full; every addition below reads an already
    // row-accumulated value from the row above. No rebinarization.
    for y in 1..dims.height() {
        let (above, below) = grid[(y - 1) * width..(y + 1) * width].split_at_mut(width);
        for (cell, up) in below.iter_mut().zip(above.iter()) {
            *cell = *cell + *up;
        }
    }
}

/// O(1) inclusive rectangle sum over an integral image: the total of the
/// original grid cells in (x0, y0)..=(x1, y1).
///
/// This is the inclusion-exclusion identity the hit counter specializes.
/// Widened to i64 so the corner additions cannot wrap for either cell type.
pub fn region_sum<T: GridCell>(
    integral: &[T],
    dims: GridDims,
    x0: usize,
    y0: usize,
    x1: usize,
    y1: usize,
) -> i64 {
    debug_assert!(x0 <= x1 && y0 <= y1);
    debug_assert_eq!(integral.len(), dims.len());
    let bottom_right: i64 = integral[dims.index(x1, y1)].into();
    let left = if x0 == 0 {
        0
    } else {
        integral[dims.index(x0 - 1, y1)].into()
    };
    let top = if y0 == 0 {
        0
    } else {
        integral[dims.index(x1, y0 - 1)].into()
    };
    let top_left = if x0 == 0 || y0 == 0 {
        0
    } else {
        integral[dims.index(x0 - 1, y0 - 1)].into()
    };
    bottom_right + top_left - left - top
}
