#[derive(Clone, Copy, PartialEq, Eq)]
pub enum AnimationMode {
    Running,
    Paused,
}

/// Sweep advance per tick, matching the terminal scope.
pub const SWEEP_STEP_DEG: f64 = 2.0;
pub const SWEEP_TICK_MS: f64 = 50.0;

/// Sweep angle and the time of the last step.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SweepState {
    pub angle_deg: f64,
    last_tick_ms: Option<f64>,
}

/// Steps the sweep 2° once a full 50 ms period has passed since the last
/// step. Periods missed between frames are dropped, so a slow or hidden
/// tab never makes the sweep jump.
pub fn advance_sweep(state: SweepState, now_ms: f64, mode: AnimationMode) -> SweepState {
    if mode == AnimationMode::Paused {
        return SweepState {
            last_tick_ms: None,
            ..state
        };
    }

    match state.last_tick_ms {
        None => SweepState {
            last_tick_ms: Some(now_ms),
            ..state
        },
        Some(last) if now_ms - last >= SWEEP_TICK_MS => SweepState {
            angle_deg: (state.angle_deg + SWEEP_STEP_DEG).rem_euclid(360.0),
            last_tick_ms: Some(now_ms),
        },
        Some(_) => state,
    }
}
