use crate::domain::events::GridEvent;
use crate::domain::state::GridState;

use super::{AnimationState, Run, Step};

pub(super) fn set_state(anim: &mut AnimationState, state: GridState, events: &mut Vec<GridEvent>) {
    if anim.state == state {
        return;
    }
    log::debug!("state {} -> {}", anim.state, state);
    anim.state = state;
    events.push(GridEvent::StateChanged { state });
}

/// Remove every highlight. Cells were already unobserved on completion.
pub(super) fn wipe_highlights(anim: &mut AnimationState, events: &mut Vec<GridEvent>) {
    let observed = anim.state != GridState::Complete;
    for cell in anim.highlights.take_all() {
        events.push(GridEvent::Unhighlight { cell });
        if observed {
            events.push(GridEvent::Unobserve { cell });
        }
    }
}

pub(super) fn unobserve_all(anim: &AnimationState, events: &mut Vec<GridEvent>) {
    events.extend(anim.highlights.iter().map(|cell| GridEvent::Unobserve { cell }));
}

pub(super) fn complete(anim: &mut AnimationState, events: &mut Vec<GridEvent>) {
    if anim.state == GridState::Complete {
        return;
    }
    // Stop following the animated cells so the page can scroll back up
    unobserve_all(anim, events);
    set_state(anim, GridState::Complete, events);
}

/// Wipe highlights and cursor, then land in `state` (directly, no transient).
pub(super) fn reset(
    anim: &mut AnimationState,
    run: Run,
    state: GridState,
    events: &mut Vec<GridEvent>,
) {
    wipe_highlights(anim, events);
    anim.cursor.reset(run.multiple);
    set_state(anim, state, events);
}

/// Advance the cursor by one multiple.
pub(super) fn step(anim: &mut AnimationState, run: Run, events: &mut Vec<GridEvent>) -> Step {
    let cursor = &mut anim.cursor;
    cursor.current_cell = cursor.current_cell.saturating_add(run.multiple);
    let current = cursor.current_cell;
    log::trace!("checking cell {} of {}", current, run.cell_count);

    let mut highlighted = None;
    if current <= run.cell_count {
        anim.highlights.insert(current);
        cursor.last_highlight = Some(current);
        events.push(GridEvent::Highlight { cell: current });
        events.push(GridEvent::Observe { cell: current });
        highlighted = Some(current);
    }
    cursor.next_highlight = Some(cursor.next_after(run.multiple));

    // Independent of the highlight above: the terminal cell is both
    if current >= run.cell_count {
        log::debug!("halting: cell {} >= {}", current, run.cell_count);
        complete(anim, events);
        return Step::Completed { highlighted };
    }
    Step::Stepped { highlighted }
}

/// Toggle between running and paused. Returns true when the timer should be
/// (re)started.
pub(super) fn toggle(anim: &mut AnimationState, run: Run, events: &mut Vec<GridEvent>) -> bool {
    match anim.state {
        GridState::Animate | GridState::Continue => set_state(anim, GridState::Pause, events),
        GridState::Pause => set_state(anim, GridState::Continue, events),
        GridState::Complete => {}
        other => {
            log::error!("pause/continue in unexpected state {}", other);
            return false;
        }
    }

    if anim.state != GridState::Complete && is_exhausted(anim, run) {
        complete(anim, events);
    }

    if anim.state == GridState::Continue {
        set_state(anim, GridState::Animate, events);
        return true;
    }
    false
}

/// True when no further highlight fits in the grid: the last highlight is
/// the final cell, or the next one would land past it.
pub(super) fn is_exhausted(anim: &mut AnimationState, run: Run) -> bool {
    let next = anim.cursor.next_after(run.multiple);
    anim.cursor.next_highlight = Some(next);
    anim.cursor.last_highlight == Some(run.cell_count) || next > run.cell_count
}

/// Re-derive the state of a run that has highlights but no live timer,
/// e.g. after the grid was redrawn or a field error was fixed.
pub(super) fn settle(anim: &mut AnimationState, run: Run, events: &mut Vec<GridEvent>) {
    if anim.highlights.is_empty() {
        anim.cursor.reset(run.multiple);
        set_state(anim, GridState::Initialise, events);
    } else if is_exhausted(anim, run) {
        if anim.state == GridState::Complete {
            return;
        }
        complete(anim, events);
    } else {
        set_state(anim, GridState::Pause, events);
    }
}
