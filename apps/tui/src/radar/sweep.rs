use std::time::{Duration, Instant};

/// Fixed sweep period.
pub const SWEEP_TICK: Duration = Duration::from_millis(50);
/// Degrees advanced per tick.
pub const SWEEP_STEP_DEG: f64 = 2.0;

/// Free-running sweep counter.
///
/// Advances one step per elapsed tick period at most; ticks missed while the
/// loop was busy are dropped, not replayed.
#[derive(Debug, Clone)]
pub struct Sweep {
    angle_deg: f64,
    paused: bool,
    last_tick: Option<Instant>,
}

impl Default for Sweep {
    fn default() -> Self {
        Self::new()
    }
}

impl Sweep {
    pub const fn new() -> Self {
        Self {
            angle_deg: 0.0,
            paused: false,
            last_tick: None,
        }
    }

    pub const fn angle_deg(&self) -> f64 {
        self.angle_deg
    }

    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        self.last_tick = None;
    }

    /// One step, regardless of time.
    pub fn step(&mut self) {
        self.angle_deg = (self.angle_deg + SWEEP_STEP_DEG) % 360.0;
    }

    /// Steps once if a full period passed since the last step. Returns whether it moved.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.paused {
            return false;
        }
        match self.last_tick {
            None => {
                self.last_tick = Some(now);
                false
            }
            Some(last) if now.saturating_duration_since(last) >= SWEEP_TICK => {
                self.step();
                self.last_tick = Some(now);
                true
            }
            Some(_) => false,
        }
    }
}
