//! # Pathos Limbic
//!
//! The affective run loop. A mood drifts toward the resting point of the
//! agent's personality and is pulled aside by stimulus events whose influence
//! fades over their lifetime.
//!
//! ## Architecture
//!
//! The loop runs as a background tokio task, once per tick:
//! 1. Drain the command channel and apply every command in arrival order
//! 2. Bank the elapsed wall-clock time and run the fixed steps it pays for
//! 3. Publish the current mood into the result slot
//!
//! Callers hold an [`Agent`] (or any number of [`AgentHandle`]s) and never
//! touch the simulation state directly.

mod agent;
mod command;
mod event;
mod heartbeat;
mod slot;
mod state;

pub use agent::{Agent, AgentHandle, LoopPhase};
pub use command::{command_channel, Command, CommandInbox, CommandSender, Drained};
pub use event::{decay_law, Decay, LinearDecay, QuadraticDecay, StimulusEvent};
pub use heartbeat::Heartbeat;
pub use slot::{result_slot, MoodReader, ResultSlot};
pub use state::AgentState;
