use std::time::Duration;

/// Fixed timestep accumulator.
/// Ensures game logic runs at a consistent rate regardless of frame time.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    /// The fixed delta time per tick.
    dt: Duration,
    /// Accumulated time from variable frame deltas.
    accumulator: Duration,
    /// Most steps a single `accumulate` call may return.
    max_steps: u32,
}

impl FixedTimestep {
    pub fn new(dt: Duration) -> Self {
        Self {
            dt,
            accumulator: Duration::ZERO,
            max_steps: 10,
        }
    }

    /// Change the per-call step cap (default: 10).
    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps.max(1);
        self
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run,
    /// at most `max_steps`. Time beyond the cap stays in the accumulator.
    pub fn accumulate(&mut self, frame_dt: Duration) -> u32 {
        self.accumulator += frame_dt;
        let due = self.accumulator.as_nanos() / self.dt.as_nanos().max(1);
        let steps = due.min(self.max_steps as u128) as u32;
        self.accumulator -= self.dt * steps;
        steps
    }

    /// Remove the whole steps still waiting in the accumulator and return their
    /// total length. The sub-step remainder is kept.
    pub fn take_backlog(&mut self) -> Duration {
        let whole = self.accumulator.as_nanos() / self.dt.as_nanos().max(1);
        let backlog = self.dt.saturating_mul(whole.min(u32::MAX as u128) as u32);
        self.accumulator -= backlog;
        backlog
    }

    /// The fixed delta time.
    pub fn dt(&self) -> Duration {
        self.dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: Duration = Duration::from_millis(10);

    #[test]
    fn one_step_exact() {
        let mut ts = FixedTimestep::new(STEP);
        assert_eq!(ts.accumulate(STEP), 1);
    }

    #[test]
    fn accumulates_partial() {
        let mut ts = FixedTimestep::new(STEP);
        assert_eq!(ts.accumulate(Duration::from_millis(6)), 0);
        assert_eq!(ts.accumulate(Duration::from_millis(6)), 1);
    }

    #[test]
    fn caps_at_max_steps_and_keeps_the_rest() {
        let mut ts = FixedTimestep::new(STEP);
        assert_eq!(ts.accumulate(Duration::from_secs(1)), 10);
        assert_eq!(ts.accumulate(Duration::ZERO), 10);

        let mut wide = FixedTimestep::new(STEP).with_max_steps(50);
        assert_eq!(wide.accumulate(Duration::from_secs(1)), 50);
    }

    #[test]
    fn backlog_hands_back_whole_steps_only() {
        let mut ts = FixedTimestep::new(STEP);
        assert_eq!(ts.accumulate(Duration::from_millis(5_004)), 10);
        assert_eq!(ts.take_backlog(), Duration::from_millis(4_900));
        assert_eq!(ts.take_backlog(), Duration::ZERO);
        // The 4ms remainder still counts toward the next step.
        assert_eq!(ts.accumulate(Duration::from_millis(6)), 1);
    }

    #[test]
    fn whole_second_ticks_from_small_steps() {
        let mut seconds = FixedTimestep::new(Duration::from_secs(1));
        let mut ticks = 0;
        for _ in 0..250 {
            ticks += seconds.accumulate(STEP);
        }
        assert_eq!(ticks, 2);
    }
}
