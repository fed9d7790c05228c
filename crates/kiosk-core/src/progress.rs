//! Fake boot progress: climbs toward 90 while the catalog loads, snaps to
//! 100 when it resolves.

use rand::Rng;
use std::time::Duration;

/// Tick cadence of the progress animation.
pub const TICK: Duration = Duration::from_millis(200);

/// Dwell between the bar reaching 100 and the splash dismissing.
pub const DISMISS_AFTER: Duration = Duration::from_millis(600);

#[derive(Debug, Clone, Copy, Default)]
pub struct Preloader {
    percent: f64,
    finished: bool,
}

impl Preloader {
    pub fn new() -> Self {
        Self::default()
    }

    /// One animation tick: advance by a random step of up to 10 points,
    /// hard-capped at 90 until `finish` is called.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.finished || self.percent >= 90.0 {
            return;
        }
        self.percent = (self.percent + rng.gen::<f64>() * 10.0).min(90.0);
    }

    /// The load resolved: snap to 100.
    pub fn finish(&mut self) {
        self.finished = true;
        self.percent = 100.0;
    }

    pub fn finished(&self) -> bool {
        self.finished
    }

    pub fn percent(&self) -> u16 {
        self.percent.round() as u16
    }
}
