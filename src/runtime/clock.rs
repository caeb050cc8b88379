use std::time::Duration;

/// Fixed-timestep accumulator
///
/// Wall-clock deltas are added each loop iteration; whole ticks are then
/// taken out, so simulation rate stays fixed no matter how the elapsed time
/// is chunked across iterations. Catch-up after a stall is capped to keep a
/// sustained slowdown from spiraling into ever more ticks per frame; capped
/// ticks are forfeited, not deferred.
#[derive(Debug, Clone)]
pub struct TickClock {
    tick: Duration,
    accumulator: Duration,
    max_catchup: u32,
}

impl TickClock {
    pub fn new(tick: Duration, max_catchup: u32) -> Self {
        Self {
            tick,
            accumulator: Duration::ZERO,
            max_catchup,
        }
    }

    /// Add elapsed wall-clock time and return how many simulation ticks to
    /// run this iteration
    pub fn advance(&mut self, delta: Duration) -> u32 {
        self.accumulator += delta;

        let mut ticks = 0;
        while self.accumulator >= self.tick && ticks < self.max_catchup {
            self.accumulator -= self.tick;
            ticks += 1;
        }

        // Forfeit whatever the cap cut off
        if self.accumulator >= self.tick {
            self.accumulator = Duration::ZERO;
        }

        ticks
    }

    /// Throw away accumulated time without running ticks. Used while the
    /// session is not in the Playing phase, so menu or pause time never
    /// turns into a tick burst on resume.
    pub fn drain(&mut self) {
        self.accumulator = Duration::ZERO;
    }

    /// Restart accounting from zero (round start)
    pub fn reset(&mut self) {
        self.accumulator = Duration::ZERO;
    }
}
