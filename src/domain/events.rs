use serde::Serialize;

use super::fields::FieldKey;
use super::state::GridState;

/// Render instructions queued for the view, in the order they happened.
///
/// `Observe`/`Unobserve` drive the view's out-of-viewport watcher for
/// animated cells; `ScrollReset` returns the page to the top of the grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum GridEvent {
    Highlight { cell: u32 },
    Unhighlight { cell: u32 },
    Observe { cell: u32 },
    Unobserve { cell: u32 },
    ScrollReset,
    StateChanged { state: GridState },
    Focus { field: FieldKey },
    /// The grid element was rebuilt; `None` dimensions mean "draw nothing".
    GridReplaced {
        cells: Option<u32>,
        rows: Option<u32>,
        columns: Option<u32>,
    },
}

impl GridEvent {
    pub fn cell(&self) -> Option<u32> {
        match self {
            GridEvent::Highlight { cell }
            | GridEvent::Unhighlight { cell }
            | GridEvent::Observe { cell }
            | GridEvent::Unobserve { cell } => Some(*cell),
            _ => None,
        }
    }
}
