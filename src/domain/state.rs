use std::fmt;

use serde::Serialize;

/// Grid animation state.
///
/// `Restart` and `Clear` are transient: they are entered while highlights are
/// being wiped and immediately left for `Animate` / `Initialise`. `Complete`
/// and `InputErr` hold until a corrective action (fixing a field, restart,
/// clear) moves the machine on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum GridState {
    #[default]
    Initialise,
    Animate,
    Pause,
    Continue,
    Complete,
    Restart,
    Clear,
    InputErr,
}

impl GridState {
    /// The stepping timer may be live in these states.
    pub fn is_running(self) -> bool {
        matches!(self, GridState::Animate | GridState::Continue)
    }

    /// A fresh start from these states wipes previous highlights first.
    pub fn start_restarts(self) -> bool {
        matches!(self, GridState::Pause | GridState::Complete)
    }

    pub fn can_start(self) -> bool {
        matches!(
            self,
            GridState::Initialise | GridState::Clear | GridState::Pause | GridState::Complete
        )
    }
}

impl fmt::Display for GridState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
