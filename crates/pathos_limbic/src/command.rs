//! The command channel: many producers, one consumer (the run loop).
//!
//! Enqueueing never blocks. Payloads are validated by the sender before they
//! get here, so every queued command is applicable as-is.

use pathos_core::{AgentError, Mood, Personality};
use tokio::sync::mpsc::{self, error::TryRecvError};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SetPersonality(Personality),
    SubmitStimulus(Mood),
    Stop,
}

pub fn command_channel() -> (CommandSender, CommandInbox) {
    let (tx, rx) = mpsc::unbounded_channel();
    (CommandSender { tx }, CommandInbox { rx })
}

#[derive(Debug, Clone)]
pub struct CommandSender {
    tx: mpsc::UnboundedSender<Command>,
}

impl CommandSender {
    pub fn send(&self, command: Command) -> Result<(), AgentError> {
        self.tx.send(command).map_err(|_| AgentError::Disconnected)
    }

    /// True once the run loop has dropped its inbox.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Everything pulled from the inbox in one drain.
#[derive(Debug, Default)]
pub struct Drained {
    pub commands: Vec<Command>,
    /// Every sender is gone; nothing more will ever arrive.
    pub disconnected: bool,
}

#[derive(Debug)]
pub struct CommandInbox {
    rx: mpsc::UnboundedReceiver<Command>,
}

impl CommandInbox {
    /// Take every queued command without waiting, oldest first.
    pub fn drain(&mut self) -> Drained {
        let mut drained = Drained::default();
        loop {
            match self.rx.try_recv() {
                Ok(command) => drained.commands.push(command),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    drained.disconnected = true;
                    break;
                }
            }
        }
        drained
    }
}
