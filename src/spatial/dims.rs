//! Dims - "square-ish" grid dimensions from a cell count
//!
//! The ideal grid is a square. When that is impossible we look for an exact
//! rectangle close to a square, preferring wide (more columns than rows)
//! over long, within the column cap. Failing that, the grid is allowed empty
//! trailing cells in its last row.

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct GridDims {
    pub rows: u32,
    pub columns: u32,
}

impl GridDims {
    /// Orient a pair so the larger value is the column count.
    pub fn wide(dim1: u32, dim2: u32) -> Self {
        Self {
            rows: dim1.min(dim2),
            columns: dim1.max(dim2),
        }
    }

    /// Orient a pair so the larger value is the row count.
    pub fn long(dim1: u32, dim2: u32) -> Self {
        Self {
            rows: dim1.max(dim2),
            columns: dim1.min(dim2),
        }
    }

    pub fn capacity(&self) -> u32 {
        self.rows * self.columns
    }

    /// True when the grid has no empty trailing cells.
    pub fn is_exact(&self, cell_count: u32) -> bool {
        self.capacity() == cell_count
    }
}

/// 6k ± 1 trial division; cell counts are small.
pub fn is_prime(num: u32) -> bool {
    if num <= 1 {
        return false;
    }
    if num <= 3 {
        return true;
    }
    if num % 2 == 0 || num % 3 == 0 {
        return false;
    }
    let mut i = 5u32;
    while i * i <= num {
        if num % i == 0 || num % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }
    true
}

/// Smallest r with r * r >= num.
pub fn ceil_sqrt(num: u32) -> u32 {
    let mut root = (num as f64).sqrt() as u32;
    while root * root > num {
        root -= 1;
    }
    while root * root < num {
        root += 1;
    }
    root
}

pub fn is_square(num: u32) -> bool {
    let root = ceil_sqrt(num);
    root * root == num
}

/// Rows needed to hold `cell_count` cells in `column_count` columns.
pub fn row_count_from_columns(column_count: u32, cell_count: u32) -> u32 {
    cell_count.div_ceil(column_count.max(1))
}

/// Compute near-square dimensions for `cell_count` cells.
///
/// `column_leeway` is how far above and below `ceil(sqrt(cell_count))` to
/// search for an exact rectangle before settling for one with empty cells.
/// Each candidate is tried wide (`columns >= rows`) first and turned long
/// only when the wide form has more than `max_columns` columns. A long
/// layout keeps its row count within the leeway of the base. The result
/// never has more than `max_columns` columns.
///
/// `cell_count` must be positive; callers reject anything else first.
pub fn compute_dimensions(cell_count: u32, column_leeway: u32, max_columns: u32) -> GridDims {
    debug_assert!(cell_count > 0, "cell count must be validated before layout");
    let cell_count = cell_count.max(1);
    let search = Search {
        cell_count,
        base: ceil_sqrt(cell_count),
        column_leeway,
        max_columns: max_columns.max(1),
    };

    log::debug!(
        "computing dims for {} cells (base {}, leeway {}, max columns {})",
        cell_count,
        search.base,
        column_leeway,
        search.max_columns
    );

    if search.base <= search.max_columns && is_square(cell_count) {
        return GridDims {
            rows: search.base,
            columns: search.base,
        };
    }

    // Primes have no useful factors, go straight to the imperfect layout
    if !is_prime(cell_count) {
        if let Some(dims) = search.exact() {
            log::debug!("exact dims: {}x{}", dims.rows, dims.columns);
            return dims;
        }
        log::debug!("no exact dims within leeway {}", column_leeway);
    }

    let dims = search.nearest_imperfect();
    log::debug!("imperfect dims: {}x{}", dims.rows, dims.columns);
    dims
}

struct Search {
    cell_count: u32,
    base: u32,
    column_leeway: u32,
    max_columns: u32,
}

impl Search {
    /// Pair `dim1` with the dimension it implies, wide first, then long if
    /// the wide form is over the cap.
    fn candidate(&self, dim1: u32, exact: bool) -> Option<GridDims> {
        if dim1 == 0 {
            return None;
        }
        let dim2 = self.cell_count.div_ceil(dim1);
        let wide = GridDims::wide(dim1, dim2);
        log::trace!("trying {} -> {}x{}", dim1, wide.rows, wide.columns);

        if exact && !wide.is_exact(self.cell_count) {
            return None;
        }
        if wide.columns <= self.max_columns {
            return Some(wide);
        }

        let long = GridDims::long(dim1, dim2);
        let fits = long.columns <= self.max_columns
            && long.rows <= self.base + self.column_leeway;
        fits.then_some(long)
    }

    /// Try `base`, then `base + 1`, `base - 1`, `base + 2`, ... out to the leeway.
    fn exact(&self) -> Option<GridDims> {
        if let Some(dims) = self.candidate(self.base, true) {
            return Some(dims);
        }
        for step in 1..=self.column_leeway {
            if let Some(dims) = self.candidate(self.base + step, true) {
                return Some(dims);
            }
            if let Some(down) = self.base.checked_sub(step) {
                if let Some(dims) = self.candidate(down, true) {
                    return Some(dims);
                }
            }
        }
        None
    }

    fn nearest_imperfect(&self) -> GridDims {
        self.candidate(self.base, false).unwrap_or_else(|| {
            // Even the long layout at the base is too wide: fill the cap
            GridDims {
                rows: row_count_from_columns(self.max_columns, self.cell_count),
                columns: self.max_columns,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primes() {
        let primes: Vec<u32> = (0..30).filter(|n| is_prime(*n)).collect();
        assert_eq!(primes, vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
        assert!(!is_prime(567));
        assert!(is_prime(1231));
    }

    #[test]
    fn ceil_sqrt_rounds_up() {
        assert_eq!(ceil_sqrt(1), 1);
        assert_eq!(ceil_sqrt(2), 2);
        assert_eq!(ceil_sqrt(25), 5);
        assert_eq!(ceil_sqrt(26), 6);
        assert_eq!(ceil_sqrt(4000), 64);
        assert!(is_square(3969));
        assert!(!is_square(22));
    }

    #[test]
    fn orientation_helpers() {
        assert_eq!(GridDims::wide(12, 10), GridDims { rows: 10, columns: 12 });
        assert_eq!(GridDims::wide(4, 6), GridDims { rows: 4, columns: 6 });
        assert_eq!(GridDims::long(12, 10), GridDims { rows: 12, columns: 10 });
        assert_eq!(GridDims::long(5, 5), GridDims { rows: 5, columns: 5 });
    }

    #[test]
    fn documented_examples() {
        assert_eq!(compute_dimensions(96, 6, 15), GridDims { rows: 8, columns: 12 });
        assert_eq!(compute_dimensions(51, 6, 15), GridDims { rows: 7, columns: 8 });
    }

    #[test]
    fn single_cell_is_one_by_one() {
        assert_eq!(compute_dimensions(1, 6, 12), GridDims { rows: 1, columns: 1 });
    }

    #[test]
    fn squares_stay_square_under_the_cap() {
        assert_eq!(compute_dimensions(100, 6, 12), GridDims { rows: 10, columns: 10 });
        assert_eq!(compute_dimensions(144, 6, 12), GridDims { rows: 12, columns: 12 });
    }

    #[test]
    fn primes_get_an_imperfect_near_square() {
        // 7 -> 3x3 with two empty cells, never 1x7
        assert_eq!(compute_dimensions(7, 6, 12), GridDims { rows: 3, columns: 3 });
        assert_eq!(compute_dimensions(2, 6, 12), GridDims { rows: 1, columns: 2 });
    }

    #[test]
    fn over_the_cap_goes_long() {
        // 96 wide would need 10+ columns: 12 rows of 8 is exact
        assert_eq!(compute_dimensions(96, 6, 8), GridDims { rows: 12, columns: 8 });
        // 400 cells, cap 15: nothing near 20 fits, fill the cap
        let dims = compute_dimensions(400, 6, 15);
        assert_eq!(dims.columns, 15);
        assert_eq!(dims.rows, 27);
    }

    #[test]
    fn capped_wide_candidates_turn_long() {
        // 12x8 is exact at base 10 + 2; the 10x10 fallback would leave holes
        assert_eq!(compute_dimensions(96, 6, 10), GridDims { rows: 12, columns: 8 });
        assert_eq!(compute_dimensions(14, 6, 6), GridDims { rows: 7, columns: 2 });
        assert_eq!(compute_dimensions(21, 6, 6), GridDims { rows: 7, columns: 3 });
        assert_eq!(compute_dimensions(28, 6, 6), GridDims { rows: 7, columns: 4 });
        assert_eq!(compute_dimensions(32, 6, 6), GridDims { rows: 8, columns: 4 });
    }

    #[test]
    fn long_layouts_stay_near_the_base() {
        // 17x3 is exact but far taller than the 8 the search starts from
        assert_eq!(compute_dimensions(51, 6, 15), GridDims { rows: 7, columns: 8 });
        // Never a single column of 49
        assert_eq!(compute_dimensions(49, 6, 6), GridDims { rows: 9, columns: 6 });
    }

    #[test]
    fn rows_from_columns_rounds_up() {
        assert_eq!(row_count_from_columns(10, 100), 10);
        assert_eq!(row_count_from_columns(12, 100), 9);
        assert_eq!(row_count_from_columns(7, 1), 1);
    }
}
