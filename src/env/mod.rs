//! Environment capabilities the engine needs from its host: the single
//! repeating step timer and the log sink.

pub mod logging;
pub mod web;

pub use web::{IntervalTicker, TickSlot};

/// The one repeating timer driving the animation.
///
/// Implementations call back into the controller's `on_tick` every
/// `interval_ms` until cancelled. `cancel` on an idle ticker is a no-op.
pub trait Ticker {
    /// Start ticking. Any running timer is cancelled first.
    fn start(&mut self, interval_ms: u32) -> Result<(), String>;
    fn cancel(&mut self);
    /// Period of the live timer, `None` when idle.
    fn active_interval(&self) -> Option<u32>;

    fn is_active(&self) -> bool {
        self.active_interval().is_some()
    }
}

/// Ticker for native hosts and tests: records what the engine asked for and
/// leaves it to the caller to invoke `on_tick`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ManualTicker {
    active: Option<u32>,
    starts: u32,
    cancels: u32,
}

impl ManualTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `start` calls.
    pub fn starts(&self) -> u32 {
        self.starts
    }

    /// Number of cancels that actually stopped a live timer.
    pub fn cancels(&self) -> u32 {
        self.cancels
    }
}

impl Ticker for ManualTicker {
    fn start(&mut self, interval_ms: u32) -> Result<(), String> {
        if interval_ms == 0 {
            return Err("tick interval must be positive".to_string());
        }
        self.cancel();
        self.active = Some(interval_ms);
        self.starts += 1;
        Ok(())
    }

    fn cancel(&mut self) {
        if self.active.take().is_some() {
            self.cancels += 1;
        }
    }

    fn active_interval(&self) -> Option<u32> {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_is_idempotent() {
        let mut ticker = ManualTicker::new();
        ticker.cancel();
        assert_eq!(ticker.cancels(), 0);

        ticker.start(500).unwrap();
        ticker.cancel();
        ticker.cancel();
        assert_eq!(ticker.cancels(), 1);
        assert!(!ticker.is_active());
    }

    #[test]
    fn restart_replaces_the_live_timer() {
        let mut ticker = ManualTicker::new();
        ticker.start(500).unwrap();
        ticker.start(250).unwrap();
        assert_eq!(ticker.active_interval(), Some(250));
        assert_eq!(ticker.starts(), 2);
        assert_eq!(ticker.cancels(), 1);
    }

    #[test]
    fn zero_interval_is_rejected() {
        let mut ticker = ManualTicker::new();
        assert!(ticker.start(0).is_err());
        assert!(!ticker.is_active());
    }
}
