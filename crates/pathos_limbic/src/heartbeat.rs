//! Fixed-timestep accumulator for the run loop.
//!
//! Wall-clock ticks arrive with jitter. The heartbeat banks the elapsed time
//! as lag and pays it out in whole, constant-size simulation steps, so the
//! mood integrates at the same rate no matter how irregularly the loop runs.

use pathos_core::AgentConfig;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Heartbeat {
    step: Duration,
    lag: Duration,
}

impl Heartbeat {
    pub fn new(step: Duration) -> Self {
        Self {
            step: step.max(Duration::from_nanos(1)),
            lag: Duration::ZERO,
        }
    }

    pub fn from_config(config: &AgentConfig) -> Self {
        Self::new(config.step_duration())
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    /// Time banked but not yet simulated. Always shorter than one step.
    pub fn lag(&self) -> Duration {
        self.lag
    }

    /// Bank `elapsed` and return how many whole steps are now owed.
    pub fn accumulate(&mut self, elapsed: Duration) -> u32 {
        self.lag += elapsed;
        let mut owed = 0;
        while self.lag >= self.step {
            self.lag -= self.step;
            owed += 1;
        }
        owed
    }
}

impl Default for Heartbeat {
    fn default() -> Self {
        Self::from_config(&AgentConfig::default())
    }
}
