use std::time::Duration;
use crate::core::time::FixedTimestep;

/// Output of the session countdown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimerEvent {
    Tick { remaining_secs: u32, remaining_fraction: f32 },
    Expired,
}

/// Single-shot countdown in whole seconds. No pause, no reset: a new session
/// gets a new timer.
#[derive(Debug, Clone)]
pub struct RoundTimer {
    total_secs: u32,
    remaining_secs: u32,
    expired: bool,
    seconds: FixedTimestep,
}

impl RoundTimer {
    pub fn new(total_secs: u32) -> Self {
        Self {
            total_secs,
            remaining_secs: total_secs,
            expired: false,
            // Every elapsed second is a tick, however long the step.
            seconds: FixedTimestep::new(Duration::from_secs(1)).with_max_steps(u32::MAX),
        }
    }

    /// One second elapsed. Emits a tick and, on the last second, `Expired`.
    /// Does nothing once expired.
    pub fn tick(&mut self, events: &mut Vec<TimerEvent>) {
        if self.expired {
            return;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        events.push(TimerEvent::Tick {
            remaining_secs: self.remaining_secs,
            remaining_fraction: self.remaining_fraction(),
        });
        if self.remaining_secs == 0 {
            self.expired = true;
            events.push(TimerEvent::Expired);
        }
    }

    /// Feed step time; emits one tick per whole second that passed.
    pub fn advance(&mut self, dt: Duration, events: &mut Vec<TimerEvent>) {
        if self.expired {
            return;
        }
        let ticks = self.seconds.accumulate(dt);
        for _ in 0..ticks {
            self.tick(events);
        }
    }

    /// Remaining share of the budget in [0, 1].
    pub fn remaining_fraction(&self) -> f32 {
        if self.total_secs == 0 {
            return 0.0;
        }
        self.remaining_secs as f32 / self.total_secs as f32
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn total_secs(&self) -> u32 {
        self.total_secs
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }
}
