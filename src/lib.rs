pub mod grid;
pub mod hits;
pub mod integral;

pub use grid::{BuildMode, CountMode, GridCell, GridDims, GridError, Window};
pub use hits::{count_hits, hit_count, hit_count_cumulative};
pub use integral::{build_integral, cumulative_sum, cumulative_sum_binarized, region_sum};
