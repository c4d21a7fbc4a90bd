use crate::domain::events::GridEvent;
use crate::env::Ticker;
use crate::systems::Step;

use super::GridController;

/// Run controls are frozen while any field is invalid.
fn can_proceed<T: Ticker>(grid: &mut GridController<T>, what: &str) -> bool {
    let Some(first) = grid.validator.first_invalid_key() else {
        return true;
    };
    log::warn!("{} ignored: '{}' is invalid", what, first);
    grid.focus = Some(first);
    grid.events.push(GridEvent::Focus { field: first });
    false
}

pub(super) fn start<T: Ticker>(grid: &mut GridController<T>) -> bool {
    if !can_proceed(grid, "start") {
        return false;
    }
    let run = grid.run();
    let interval_ms = grid.speed.interval_ms();
    grid.engine
        .start(&mut grid.anim, run, interval_ms, &mut grid.events)
}

pub(super) fn pause<T: Ticker>(grid: &mut GridController<T>) {
    let run = grid.run();
    grid.engine.pause(&mut grid.anim, run, &mut grid.events);
}

pub(super) fn pause_or_continue<T: Ticker>(grid: &mut GridController<T>) -> bool {
    if !can_proceed(grid, "pause/continue") {
        return false;
    }
    let run = grid.run();
    let interval_ms = grid.speed.interval_ms();
    grid.engine
        .pause_or_continue(&mut grid.anim, run, interval_ms, &mut grid.events)
}

pub(super) fn clear<T: Ticker>(grid: &mut GridController<T>) {
    if !can_proceed(grid, "clear") {
        return;
    }
    let run = grid.run();
    grid.engine.clear(&mut grid.anim, run, &mut grid.events);
}

pub(super) fn tick<T: Ticker>(grid: &mut GridController<T>) -> Step {
    let run = grid.run();
    grid.engine.tick(&mut grid.anim, run, &mut grid.events)
}
