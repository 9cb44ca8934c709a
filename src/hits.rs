// Collision-free window counting over an integral image. For a window of
// size (bw, bh) this answers, per candidate row, how many x-positions hold
// a rectangle the placement engine could drop a word into without touching
// anything already drawn.

use crate::grid::{CountMode, GridCell, GridDims, GridError, Window};

/// Count collision-free positions of `window` over `integral` into `hits`.
///
/// For every top-left row y in `0..height - bh`, `hits[y]` receives the
/// number of x-positions in `0..width - bw` whose window sum is exactly
/// zero. The window sum at (x, y) is the four-corner identity over the
/// inclusive integral image:
///
/// ```text
/// S[y][x] + S[y + bh][x + bw] - S[y][x + bw] - S[y + bh][x]
/// ```
///
/// With [`CountMode::Cumulative`] the filled counts are then prefix-summed
/// down the rows, so `hits[y]` becomes the number of collision-free
/// positions at or above row y. The placement engine binary-searches that
/// running total to pick a uniformly random free slot.
///
/// Every entry in `hits[0..height - bh]` is zeroed before accumulation,
/// regardless of mode; entries past that range are left untouched, so an
/// oversized pooled buffer is fine. The integral image is not mutated.
pub fn count_hits<T: GridCell>(
    integral: &[T],
    dims: GridDims,
    window: Window,
    mode: CountMode,
    hits: &mut [u32],
) -> Result<(), GridError> {
    dims.check_buffer(integral.len())?;
    window.check(dims)?;
    let rows = window.rows(dims);
    if hits.len() < rows {
        return Err(GridError::HitsTooShort {
            len: hits.len(),
            rows,
        });
    }
    count_in_place(integral, dims, window, mode, &mut hits[..rows]);
    Ok(())
}

/// Independent-rows variant: `hits[y]` depends on row y alone.
pub fn hit_count<T: GridCell>(
    integral: &[T],
    dims: GridDims,
    window: Window,
    hits: &mut [u32],
) -> Result<(), GridError> {
    count_hits(integral, dims, window, CountMode::Independent, hits)
}

/// Running-total variant: `hits[y]` counts free positions in rows 0..=y.
pub fn hit_count_cumulative<T: GridCell>(
    integral: &[T],
    dims: GridDims,
    window: Window,
    hits: &mut [u32],
) -> Result<(), GridError> {
    count_hits(integral, dims, window, CountMode::Cumulative, hits)
}

fn count_in_place<T: GridCell>(
    integral: &[T],
    dims: GridDims,
    window: Window,
    mode: CountMode,
    hits: &mut [u32],
) {
    debug_assert_eq!(integral.len(), dims.len());
    debug_assert!(window.fits(dims));
    debug_assert_eq!(hits.len(), window.rows(dims));

    let width = dims.width();
    let cols = window.cols(dims);

    for (y, hit) in hits.iter_mut().enumerate() {
        let top = y * width;
        let bottom = (y + window.height) * width;
        let mut count = 0u32;
        for x in 0..cols {
            // Zero-sum test rearranged as an equality so unsigned integral
            // values never see an intermediate underflow.
            let lhs = integral[top + x] + integral[bottom + x + window.width];
            let rhs = integral[top + x + window.width] + integral[bottom + x];
            if lhs == rhs {
                count += 1;
            }
        }
        *hit = count;
    }

    if mode == CountMode::Cumulative {
        // Inherently sequential scan; each row folds in the one above it.
        for y in 1..hits.len() {
            hits[y] += hits[y - 1];
        }
    }
}
