//! AnimationEngine - the counting-along state machine
//!
//! `AnimationState` is the single owned record of where the count is: the
//! grid state, the cursor and the highlighted cells. The controller owns it
//! and lends it to the engine for each transition; the engine itself only
//! owns the timer handle.
//!
//! ```text
//! Initialise --start--> Animate --toggle--> Pause --toggle--> Continue --> Animate
//!      ^                  |  \                 |
//!      |                tick  pause            start (restart: wipe, Restart --> Animate)
//!      |                  v                    |
//!      +---- clear ---- Complete <-------------+
//! ```
//!
//! Every tick adds `multiple` to the cursor. A cell at or below the cell
//! count is highlighted; reaching or passing the cell count completes.

mod highlights;
mod transitions;

pub use highlights::{Highlights, Reconciled};

use serde::Serialize;

use crate::domain::events::GridEvent;
use crate::domain::state::GridState;
use crate::env::Ticker;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Cursor {
    /// Last cell reached by stepping, 0 before the first tick.
    pub current_cell: u32,
    pub last_highlight: Option<u32>,
    pub next_highlight: Option<u32>,
}

impl Cursor {
    pub fn reset(&mut self, multiple: u32) {
        self.current_cell = 0;
        self.last_highlight = None;
        self.next_highlight = Some(multiple);
    }

    pub fn next_after(&self, multiple: u32) -> u32 {
        self.last_highlight.unwrap_or(0).saturating_add(multiple)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AnimationState {
    pub state: GridState,
    pub cursor: Cursor,
    pub highlights: Highlights,
}

impl AnimationState {
    pub fn new(multiple: u32) -> Self {
        let mut anim = Self::default();
        anim.cursor.reset(multiple);
        anim
    }
}

/// The grid values a transition needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Run {
    pub multiple: u32,
    pub cell_count: u32,
}

/// Result of one timer tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// The timer fired outside a running state and was ignored.
    Idle,
    Stepped { highlighted: Option<u32> },
    Completed { highlighted: Option<u32> },
}

pub struct AnimationEngine<T: Ticker> {
    ticker: T,
}

impl<T: Ticker> AnimationEngine<T> {
    pub fn new(ticker: T) -> Self {
        Self { ticker }
    }

    pub fn ticker(&self) -> &T {
        &self.ticker
    }

    pub fn ticker_mut(&mut self) -> &mut T {
        &mut self.ticker
    }

    /// Stop the timer. Safe to call when nothing is running.
    pub fn halt(&mut self) {
        self.ticker.cancel();
    }

    /// Begin (or restart) counting. From `Pause`/`Complete` the previous
    /// highlights are wiped and the count starts over from zero.
    pub fn start(
        &mut self,
        anim: &mut AnimationState,
        run: Run,
        interval_ms: u32,
        events: &mut Vec<GridEvent>,
    ) -> bool {
        if anim.state.is_running() {
            log::warn!("start ignored: already running");
            return false;
        }
        if !anim.state.can_start() {
            log::warn!("start ignored in state {}", anim.state);
            return false;
        }

        self.ticker.cancel();
        events.push(GridEvent::ScrollReset);

        if anim.state.start_restarts() {
            transitions::wipe_highlights(anim, events);
            anim.cursor.reset(run.multiple);
            transitions::set_state(anim, GridState::Restart, events);
        }

        log::debug!(
            "counting to {} in multiples of {} from cell {} every {}ms",
            run.cell_count,
            run.multiple,
            anim.cursor.current_cell,
            interval_ms
        );
        transitions::set_state(anim, GridState::Animate, events);
        self.run_timer(anim, interval_ms, events)
    }

    /// Advance one step. Completing cancels the timer.
    pub fn tick(&mut self, anim: &mut AnimationState, run: Run, events: &mut Vec<GridEvent>) -> Step {
        if !anim.state.is_running() {
            log::trace!("tick ignored in state {}", anim.state);
            return Step::Idle;
        }
        let step = transitions::step(anim, run, events);
        if matches!(step, Step::Completed { .. }) {
            self.ticker.cancel();
        }
        step
    }

    /// Pause if running; a second pause is a no-op.
    pub fn pause(&mut self, anim: &mut AnimationState, run: Run, events: &mut Vec<GridEvent>) {
        self.ticker.cancel();
        if anim.state.is_running() {
            transitions::toggle(anim, run, events);
        } else {
            log::debug!("pause ignored in state {}", anim.state);
        }
    }

    /// Pause a running count, or resume a paused one from its cursor.
    pub fn pause_or_continue(
        &mut self,
        anim: &mut AnimationState,
        run: Run,
        interval_ms: u32,
        events: &mut Vec<GridEvent>,
    ) -> bool {
        self.ticker.cancel();
        if transitions::toggle(anim, run, events) {
            events.push(GridEvent::ScrollReset);
            return self.run_timer(anim, interval_ms, events);
        }
        false
    }

    /// Wipe highlights and cursor, passing through `Clear` to `Initialise`.
    pub fn clear(&mut self, anim: &mut AnimationState, run: Run, events: &mut Vec<GridEvent>) {
        self.ticker.cancel();
        transitions::wipe_highlights(anim, events);
        anim.cursor.reset(run.multiple);
        transitions::set_state(anim, GridState::Clear, events);
        transitions::set_state(anim, GridState::Initialise, events);
    }

    /// Wipe highlights and cursor and go straight to `state`.
    pub fn reset(
        &mut self,
        anim: &mut AnimationState,
        run: Run,
        state: GridState,
        events: &mut Vec<GridEvent>,
    ) {
        self.ticker.cancel();
        transitions::reset(anim, run, state, events);
    }

    /// Enter `InputErr`, stopping any running count.
    pub fn fail(&mut self, anim: &mut AnimationState, events: &mut Vec<GridEvent>) {
        self.ticker.cancel();
        transitions::set_state(anim, GridState::InputErr, events);
    }

    /// Fit the highlights into a grid that was just redrawn with
    /// `run.cell_count` cells. Cells past the end are unobserved and
    /// forgotten; the rest are re-applied and the cursor resumes from the
    /// largest of them. A paused or completed count is re-evaluated: it may
    /// become resumable after growing or complete after shrinking.
    pub fn reconcile(
        &mut self,
        anim: &mut AnimationState,
        run: Run,
        events: &mut Vec<GridEvent>,
    ) -> Reconciled {
        let reconciled = anim.highlights.reconcile(run.cell_count);
        let observed = anim.state != GridState::Complete;

        if observed {
            events.extend(reconciled.dropped.iter().map(|cell| GridEvent::Unobserve { cell: *cell }));
        }
        events.extend(reconciled.retained.iter().map(|cell| GridEvent::Highlight { cell: *cell }));

        let last = anim.highlights.last();
        anim.cursor.last_highlight = last;
        anim.cursor.current_cell = last.unwrap_or(0);
        anim.cursor.next_highlight = Some(anim.cursor.next_after(run.multiple));

        if !reconciled.dropped.is_empty() {
            log::debug!(
                "dropped highlights past {}: {:?}",
                run.cell_count,
                reconciled.dropped
            );
        }

        if matches!(anim.state, GridState::Pause | GridState::Complete) {
            transitions::settle(anim, run, events);
        }
        reconciled
    }

    /// Leave `InputErr` once every field is valid again.
    pub fn recover(&mut self, anim: &mut AnimationState, run: Run, events: &mut Vec<GridEvent>) {
        if anim.state != GridState::InputErr {
            return;
        }
        transitions::settle(anim, run, events);
    }

    fn run_timer(
        &mut self,
        anim: &mut AnimationState,
        interval_ms: u32,
        events: &mut Vec<GridEvent>,
    ) -> bool {
        match self.ticker.start(interval_ms) {
            Ok(()) => true,
            Err(err) => {
                log::error!("failed to start step timer: {}", err);
                transitions::set_state(anim, GridState::Pause, events);
                false
            }
        }
    }
}
