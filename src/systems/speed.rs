//! Speed <-> step interval mapping
//!
//! The displayed speed is inverted relative to the timer: a higher displayed
//! number means a shorter interval between steps. Internally
//! `internal = max_speed - displayed + 1` is scaled linearly onto the
//! interval range.

use serde::Serialize;

use crate::domain::config::GridOptions;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SpeedBounds {
    pub min_speed: u32,
    pub max_speed: u32,
    pub min_interval_ms: u32,
    pub max_interval_ms: u32,
}

impl SpeedBounds {
    pub fn from_options(options: &GridOptions) -> Self {
        Self {
            min_speed: options.min_speed,
            max_speed: options.max_speed,
            min_interval_ms: options.min_interval_ms,
            max_interval_ms: options.max_interval_ms,
        }
    }
}

/// Step interval (ms) for a displayed speed, rounded to the nearest ms.
pub fn interval_from_speed(
    displayed_speed: u32,
    min_speed: u32,
    max_speed: u32,
    min_interval_ms: u32,
    max_interval_ms: u32,
) -> u32 {
    if max_speed <= min_speed {
        return min_interval_ms;
    }
    let internal = max_speed as f64 - displayed_speed as f64 + 1.0;
    let scale = (max_interval_ms - min_interval_ms) as f64 / (max_speed - min_speed) as f64;
    let interval = min_interval_ms as f64 + (internal - min_speed as f64) * scale;
    (interval.round() as i64).clamp(min_interval_ms as i64, max_interval_ms as i64) as u32
}

/// Displayed speed for a step interval; inverse of [`interval_from_speed`]
/// up to rounding.
pub fn speed_from_interval(
    interval_ms: u32,
    min_speed: u32,
    max_speed: u32,
    min_interval_ms: u32,
    max_interval_ms: u32,
) -> u32 {
    if max_interval_ms <= min_interval_ms {
        return max_speed;
    }
    let scale = (max_speed - min_speed) as f64 / (max_interval_ms - min_interval_ms) as f64;
    let speed = min_speed as f64 + (interval_ms as f64 - min_interval_ms as f64) * scale;
    let displayed = max_speed as f64 - speed + 1.0;
    (displayed.round() as i64).clamp(min_speed as i64, max_speed as i64) as u32
}

/// Displayed speed paired with its derived interval. The two never drift:
/// every mutation goes through one of the mappings above.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SpeedSetting {
    displayed: u32,
    interval_ms: u32,
    #[serde(skip)]
    bounds: SpeedBounds,
}

impl SpeedSetting {
    pub fn new(bounds: SpeedBounds, default_interval_ms: u32) -> Self {
        let mut setting = Self {
            displayed: bounds.min_speed,
            interval_ms: bounds.max_interval_ms,
            bounds,
        };
        setting.reset(default_interval_ms);
        setting
    }

    pub fn displayed(&self) -> u32 {
        self.displayed
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    pub fn bounds(&self) -> SpeedBounds {
        self.bounds
    }

    /// Set from the interval, deriving the displayed speed.
    pub fn reset(&mut self, interval_ms: u32) {
        let b = self.bounds;
        self.interval_ms = interval_ms.clamp(b.min_interval_ms, b.max_interval_ms);
        self.displayed = speed_from_interval(
            self.interval_ms,
            b.min_speed,
            b.max_speed,
            b.min_interval_ms,
            b.max_interval_ms,
        );
    }

    /// Set from a displayed speed, clamped to the scale.
    pub fn set_displayed(&mut self, displayed: u32) {
        let b = self.bounds;
        self.displayed = displayed.clamp(b.min_speed, b.max_speed);
        self.interval_ms = interval_from_speed(
            self.displayed,
            b.min_speed,
            b.max_speed,
            b.min_interval_ms,
            b.max_interval_ms,
        );
    }

    /// Move the displayed speed by `delta`, clamped at both ends.
    pub fn step(&mut self, delta: i32) -> u32 {
        let b = self.bounds;
        let next = (self.displayed as i64 + delta as i64).clamp(b.min_speed as i64, b.max_speed as i64);
        self.set_displayed(next as u32);
        self.displayed
    }
}
