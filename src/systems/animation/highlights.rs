use std::collections::BTreeSet;

use serde::Serialize;

/// Cells currently marked as reached by the count. Kept sorted so the
/// largest retained cell is the resume point after a redraw.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Highlights {
    cells: BTreeSet<u32>,
}

/// Outcome of fitting existing highlights into a grid of a new size.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Reconciled {
    /// Still inside the grid, to be re-applied.
    pub retained: Vec<u32>,
    /// Past the end of the grid, to be forgotten and unobserved.
    pub dropped: Vec<u32>,
}

impl Highlights {
    pub fn insert(&mut self, cell: u32) -> bool {
        self.cells.insert(cell)
    }

    pub fn contains(&self, cell: u32) -> bool {
        self.cells.contains(&cell)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn last(&self) -> Option<u32> {
        self.cells.last().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.cells.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<u32> {
        self.iter().collect()
    }

    /// Remove everything, returning what was highlighted in ascending order.
    pub fn take_all(&mut self) -> Vec<u32> {
        std::mem::take(&mut self.cells).into_iter().collect()
    }

    /// Drop every cell above `cell_count`.
    pub fn reconcile(&mut self, cell_count: u32) -> Reconciled {
        let dropped: Vec<u32> = self
            .cells
            .split_off(&cell_count.saturating_add(1))
            .into_iter()
            .collect();
        Reconciled {
            retained: self.to_vec(),
            dropped,
        }
    }
}
