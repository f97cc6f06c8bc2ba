//! Loop-private simulation state.
//!
//! Owned by exactly one run loop and never shared. Everything here is
//! synchronous and deterministic: time only advances through [`AgentState::tick`]
//! and [`AgentState::step`], which makes the whole engine testable without a
//! runtime or a wall clock.

use crate::command::Command;
use crate::event::{decay_law, Decay, StimulusEvent};
use crate::heartbeat::Heartbeat;
use pathos_core::{AgentConfig, Mood, Personality};
use std::time::Duration;

pub struct AgentState {
    config: AgentConfig,
    law: Box<dyn Decay>,
    heartbeat: Heartbeat,

    /// Simulation clock: number of steps taken × step duration.
    clock: Duration,
    steps: u64,

    mood: Mood,
    /// Resting mood derived from the personality.
    rest: Mood,
    personality: Personality,
    /// Velocity multiplier in [1, max_neurotics].
    neuroticism: f32,

    events: Vec<StimulusEvent>,
    running: bool,
}

impl AgentState {
    pub fn new(config: AgentConfig) -> Self {
        let law = decay_law(config.decay);
        Self::with_decay(config, law)
    }

    /// Build with a custom decay law instead of the configured one.
    pub fn with_decay(config: AgentConfig, law: Box<dyn Decay>) -> Self {
        let personality = Personality::neutral();
        let neuroticism = personality.neuroticism_factor(config.max_neurotics);
        Self {
            heartbeat: Heartbeat::from_config(&config),
            config,
            law,
            clock: Duration::ZERO,
            steps: 0,
            mood: Mood::neutral(),
            rest: personality.to_mood(),
            personality,
            neuroticism,
            events: Vec::new(),
            running: true,
        }
    }

    pub fn mood(&self) -> Mood {
        self.mood
    }

    pub fn rest(&self) -> Mood {
        self.rest
    }

    pub fn personality(&self) -> &Personality {
        &self.personality
    }

    pub fn neuroticism(&self) -> f32 {
        self.neuroticism
    }

    /// Distance covered by one step.
    pub fn velocity(&self) -> f32 {
        self.config.velocity_for(&self.personality)
    }

    pub fn active_events(&self) -> &[StimulusEvent] {
        &self.events
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn clock(&self) -> Duration {
        self.clock
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn step_duration(&self) -> Duration {
        self.heartbeat.step()
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::SetPersonality(personality) => {
                self.rest = personality.to_mood();
                // A new personality resets the mood outright rather than drifting into it
                self.mood = self.rest;
                self.neuroticism = personality.neuroticism_factor(self.config.max_neurotics);
                self.personality = personality;
                tracing::debug!(
                    "Personality set: rest={}, neuroticism={:.2}",
                    self.rest,
                    self.neuroticism
                );
            }
            Command::SubmitStimulus(target) => {
                self.events.push(StimulusEvent::new(
                    target,
                    self.clock,
                    self.config.event_duration(),
                ));
                tracing::debug!(
                    "Stimulus queued: target={}, active={}",
                    target,
                    self.events.len()
                );
            }
            Command::Stop => {
                tracing::debug!("Stop requested");
                self.running = false;
            }
        }
    }

    /// Influence-weighted mean of every event still pulling at the current clock.
    pub fn weighted_target(&self) -> Option<Mood> {
        let law = self.law.as_ref();
        Mood::weighted_average(
            self.events
                .iter()
                .map(|e| (e.target, e.influence(self.clock, law)))
                .filter(|(_, w)| *w > 0.0),
        )
    }

    /// One fixed simulation step.
    pub fn step(&mut self) {
        let now = self.clock;
        let law = self.law.as_ref();

        let mut pulls = Vec::with_capacity(self.events.len());
        self.events.retain(|event| {
            let influence = event.influence(now, law);
            if influence > 0.0 {
                pulls.push((event.target, influence));
                true
            } else {
                false
            }
        });

        let target = Mood::weighted_average(pulls).unwrap_or(self.rest);
        self.mood = self
            .mood
            .move_toward(&target, self.velocity(), self.config.distance_tolerance);

        self.clock += self.heartbeat.step();
        self.steps += 1;
    }

    /// Bank `elapsed` wall-clock time and run every step it pays for.
    pub fn tick(&mut self, elapsed: Duration) -> u32 {
        let owed = self.heartbeat.accumulate(elapsed);
        for _ in 0..owed {
            self.step();
        }
        owed
    }
}
