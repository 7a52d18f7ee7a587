use std::time::Duration;

// Accumulated race time. The race loop advances this only while the race is
// in the Running phase, so paused intervals are excluded by construction
// instead of by correcting wall-clock timestamps after the fact.
pub struct RaceClock {
    elapsed: Duration,
}

impl RaceClock {
    pub fn new() -> RaceClock {
        RaceClock {
            elapsed: Duration::ZERO,
        }
    }

    pub fn advance(&mut self, dt: Duration) {
        self.elapsed += dt;
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }
}
