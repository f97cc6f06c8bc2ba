//! The agent handle and its background loop.
//!
//! The [`Agent`] owns the producer side of the command channel and a reader
//! of the result slot. Everything else (mood, events, personality) lives in
//! an [`AgentState`] that is moved into the spawned loop task and never
//! shared.

use crate::command::{command_channel, Command, CommandInbox, CommandSender};
use crate::slot::{result_slot, MoodReader, ResultSlot};
use crate::state::AgentState;
use pathos_core::{AgentConfig, AgentError, Mood, PersonalityInput, Stimulus};
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Lifecycle of the loop. Moves forward only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopPhase {
    Created,
    Running,
    Stopped,
}

/// Everything the loop takes ownership of when it starts.
struct Pending {
    state: AgentState,
    inbox: CommandInbox,
    slot: ResultSlot,
    phase: watch::Sender<LoopPhase>,
}

/// Cloneable producer side of an agent.
///
/// Payloads are validated here, on the caller's side; only well-formed
/// commands ever reach the loop. A live handle keeps the loop running even
/// after the [`Agent`] itself is dropped.
#[derive(Debug, Clone)]
pub struct AgentHandle {
    commands: CommandSender,
}

impl AgentHandle {
    pub fn submit_stimulus(&self, stimulus: impl Into<Stimulus>) -> Result<(), AgentError> {
        let target = stimulus
            .into()
            .resolve()
            .map_err(AgentError::InvalidStimulus)?;
        self.commands.send(Command::SubmitStimulus(target))
    }

    /// Replace the personality. `PersonalityInput::Neutral` resets to all-zero traits.
    pub fn set_personality(
        &self,
        personality: impl Into<PersonalityInput>,
    ) -> Result<(), AgentError> {
        let personality = personality
            .into()
            .resolve()
            .map_err(AgentError::InvalidPersonality)?;
        self.commands.send(Command::SetPersonality(personality))
    }

    /// Ask the loop to stop. Returns as soon as the request is queued.
    pub fn stop(&self) -> Result<(), AgentError> {
        self.commands.send(Command::Stop)
    }

    pub fn is_closed(&self) -> bool {
        self.commands.is_closed()
    }
}

pub struct Agent {
    handle: AgentHandle,
    reader: MoodReader,
    phase: watch::Receiver<LoopPhase>,
    pending: Option<Pending>,
    task: Option<JoinHandle<()>>,
}

impl Agent {
    /// Create an agent in the `Created` phase.
    ///
    /// The initial personality is queued as the first command, so the loop
    /// applies it on its very first tick.
    pub fn new(
        config: AgentConfig,
        personality: impl Into<PersonalityInput>,
    ) -> Result<Self, AgentError> {
        let (commands, inbox) = command_channel();
        let (slot, reader) = result_slot();
        let (phase_tx, phase_rx) = watch::channel(LoopPhase::Created);

        let handle = AgentHandle { commands };
        handle.set_personality(personality)?;

        Ok(Self {
            handle,
            reader,
            phase: phase_rx,
            pending: Some(Pending {
                state: AgentState::new(config),
                inbox,
                slot,
                phase: phase_tx,
            }),
            task: None,
        })
    }

    /// Spawn the loop onto the current tokio runtime.
    pub fn start(&mut self) -> Result<(), AgentError> {
        if self.pending.is_none() {
            return Err(AgentError::AlreadyStarted);
        }
        let runtime =
            tokio::runtime::Handle::try_current().map_err(|_| AgentError::NoRuntime)?;
        let Some(pending) = self.pending.take() else {
            return Err(AgentError::AlreadyStarted);
        };

        self.task = Some(runtime.spawn(run(
            pending.state,
            pending.inbox,
            pending.slot,
            pending.phase,
        )));
        Ok(())
    }

    pub fn handle(&self) -> AgentHandle {
        self.handle.clone()
    }

    pub fn submit_stimulus(&self, stimulus: impl Into<Stimulus>) -> Result<(), AgentError> {
        self.handle.submit_stimulus(stimulus)
    }

    pub fn set_personality(
        &self,
        personality: impl Into<PersonalityInput>,
    ) -> Result<(), AgentError> {
        self.handle.set_personality(personality)
    }

    pub fn stop(&self) -> Result<(), AgentError> {
        self.handle.stop()
    }

    /// A new reader of the result slot.
    pub fn reader(&self) -> MoodReader {
        self.reader.clone()
    }

    /// Most recently published mood, `None` before the first tick.
    pub fn latest(&self) -> Option<Mood> {
        self.reader.latest()
    }

    /// Wait for a mood this agent has not handed out through `read` yet.
    pub async fn read(&mut self) -> Option<Mood> {
        self.reader.read().await
    }

    pub fn phase(&self) -> LoopPhase {
        *self.phase.borrow()
    }

    /// Wait for the loop to exit. A second call returns immediately.
    pub async fn join(&mut self) -> Result<(), AgentError> {
        if self.pending.is_some() {
            return Err(AgentError::NotStarted);
        }
        match self.task.take() {
            Some(task) => task.await.map_err(|e| {
                tracing::error!("Agent loop task failed: {}", e);
                AgentError::LoopPanicked
            }),
            None => Ok(()),
        }
    }
}

async fn run(
    mut state: AgentState,
    mut inbox: CommandInbox,
    slot: ResultSlot,
    phase: watch::Sender<LoopPhase>,
) {
    phase.send_replace(LoopPhase::Running);
    tracing::info!("Agent loop started (step={:?})", state.step_duration());

    let mut interval = time::interval(state.step_duration());
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last_tick = Instant::now();

    while state.is_running() {
        interval.tick().await;
        let now = Instant::now();
        let elapsed = now.duration_since(last_tick);
        last_tick = now;

        let drained = inbox.drain();
        for command in drained.commands {
            state.apply(command);
        }
        if drained.disconnected && state.is_running() {
            tracing::warn!("Every agent handle dropped, stopping loop");
            state.apply(Command::Stop);
        }

        let steps = state.tick(elapsed);
        slot.publish(state.mood());
        tracing::trace!(
            "tick: steps={}, mood={}, events={}",
            steps,
            state.mood(),
            state.active_events().len()
        );
    }

    phase.send_replace(LoopPhase::Stopped);
    tracing::info!(
        "Agent loop stopped after {} steps, final mood {}",
        state.steps(),
        state.mood()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathos_core::{Appraisal, Emotion, InputError, Personality};
    use std::time::Duration;

    fn neutral_agent() -> Agent {
        Agent::new(AgentConfig::default(), PersonalityInput::Neutral).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_neutral_agent_idles_at_origin() {
        let mut agent = neutral_agent();
        assert_eq!(agent.phase(), LoopPhase::Created);
        assert_eq!(agent.latest(), None);

        agent.start().unwrap();
        time::sleep(Duration::from_secs(2)).await;

        assert_eq!(agent.phase(), LoopPhase::Running);
        assert_eq!(agent.latest(), Some(Mood::neutral()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_read_waits_for_first_publish() {
        let mut agent = neutral_agent();
        agent.start().unwrap();
        assert_eq!(agent.read().await, Some(Mood::neutral()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stimulus_pulls_mood_toward_target() {
        let mut agent = neutral_agent();
        agent.start().unwrap();
        time::sleep(Duration::from_millis(100)).await;

        let target = Mood::new(0.8, 0.6, -0.2);
        let before = agent.latest().unwrap();
        agent.submit_stimulus([0.8, 0.6, -0.2]).unwrap();
        time::sleep(Duration::from_millis(200)).await;

        let after = agent.latest().unwrap();
        assert!(after.distance(&target) < before.distance(&target));
    }

    #[tokio::test(start_paused = true)]
    async fn test_appraisal_stimulus_is_accepted() {
        let mut agent = neutral_agent();
        agent.start().unwrap();
        time::sleep(Duration::from_millis(50)).await;

        let appraisal = Appraisal::new().with(Emotion::Joy, 1.0);
        let target = appraisal.to_mood();
        agent.submit_stimulus(appraisal).unwrap();
        time::sleep(Duration::from_millis(200)).await;

        let mood = agent.latest().unwrap();
        assert!(mood.distance(&target) < target.distance(&Mood::neutral()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_personality_while_running_resets_mood() {
        let mut agent = neutral_agent();
        agent.start().unwrap();
        time::sleep(Duration::from_millis(50)).await;

        let p = Personality::new(0.3, 0.5, 0.7, 0.2, -0.6);
        agent.set_personality(p).unwrap();
        time::sleep(Duration::from_millis(100)).await;

        assert_eq!(agent.latest(), Some(p.to_mood()));
    }

    #[tokio::test]
    async fn test_double_start_is_rejected() {
        let mut agent = neutral_agent();
        agent.start().unwrap();
        assert_eq!(agent.start(), Err(AgentError::AlreadyStarted));
    }

    #[test]
    fn test_start_without_runtime() {
        let mut agent = neutral_agent();
        assert_eq!(agent.start(), Err(AgentError::NoRuntime));
        // Still startable later
        assert_eq!(agent.phase(), LoopPhase::Created);
    }

    #[tokio::test]
    async fn test_join_before_start() {
        let mut agent = neutral_agent();
        assert_eq!(agent.join().await, Err(AgentError::NotStarted));
    }

    #[test]
    fn test_invalid_payloads_rejected_at_call_site() {
        let agent = neutral_agent();

        let err = agent.submit_stimulus(vec![1.0, 2.0]).unwrap_err();
        assert_eq!(
            err,
            AgentError::InvalidStimulus(InputError::Arity {
                expected: 3,
                found: 2
            })
        );
        assert!(matches!(
            agent.submit_stimulus(vec![f32::NAN, 0.0, 0.0]),
            Err(AgentError::InvalidStimulus(InputError::NonFinite { .. }))
        ));
        assert!(matches!(
            agent.set_personality(vec![0.0; 4]),
            Err(AgentError::InvalidPersonality(_))
        ));
        assert!(Agent::new(AgentConfig::default(), vec![0.1, 0.2]).is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_then_join() {
        let mut agent = neutral_agent();
        agent.start().unwrap();
        time::sleep(Duration::from_millis(50)).await;

        agent.stop().unwrap();
        agent.join().await.unwrap();

        assert_eq!(agent.phase(), LoopPhase::Stopped);
        assert!(agent.handle().is_closed());
        assert_eq!(
            agent.submit_stimulus([0.1, 0.1, 0.1]),
            Err(AgentError::Disconnected)
        );
        // Second join is a no-op
        agent.join().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_stimulus_before_stop_is_processed() {
        let mut agent = neutral_agent();
        agent.start().unwrap();
        time::sleep(Duration::from_millis(50)).await;

        agent.submit_stimulus([1.0, 1.0, 1.0]).unwrap();
        agent.stop().unwrap();
        agent.join().await.unwrap();

        // The stopping tick still stepped toward the stimulus
        let last = agent.latest().unwrap();
        assert!(last.pleasure > 0.0);
        assert!(last.arousal > 0.0);
        assert!(last.dominance > 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_queued_before_start() {
        let mut agent = neutral_agent();
        agent.stop().unwrap();
        agent.start().unwrap();
        agent.join().await.unwrap();
        assert_eq!(agent.phase(), LoopPhase::Stopped);
        // One publish on the way out
        assert_eq!(agent.latest(), Some(Mood::neutral()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_agent_ends_loop() {
        let mut agent = neutral_agent();
        agent.start().unwrap();
        let mut reader = agent.reader();
        drop(agent);

        // Drains whatever was published, then sees the slot close
        let mut reads = 0;
        while reader.read().await.is_some() {
            reads += 1;
            assert!(reads < 10);
        }
        assert_eq!(reader.latest(), Some(Mood::neutral()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_handles_from_other_threads() {
        let mut agent = neutral_agent();
        agent.start().unwrap();

        let producers: Vec<_> = (0..3)
            .map(|_| {
                let handle = agent.handle();
                std::thread::spawn(move || handle.submit_stimulus([-0.9, 0.4, 0.0]))
            })
            .collect();
        for p in producers {
            p.join().unwrap().unwrap();
        }

        time::sleep(Duration::from_millis(200)).await;
        assert!(agent.latest().unwrap().pleasure < 0.0);
    }
}
