//! The result slot: a single "latest mood" cell.
//!
//! Publishing atomically replaces whatever was there and never waits on
//! readers. Readers see either nothing (before the first publish) or one
//! whole snapshot; there is no backlog.

use pathos_core::Mood;
use tokio::sync::watch;

pub fn result_slot() -> (ResultSlot, MoodReader) {
    let (tx, rx) = watch::channel(None);
    (ResultSlot { tx }, MoodReader { rx })
}

#[derive(Debug)]
pub struct ResultSlot {
    tx: watch::Sender<Option<Mood>>,
}

impl ResultSlot {
    /// Overwrite the slot. Succeeds even when nobody is reading.
    pub fn publish(&self, mood: Mood) {
        self.tx.send_replace(Some(mood));
    }

    pub fn reader(&self) -> MoodReader {
        MoodReader {
            rx: self.tx.subscribe(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MoodReader {
    rx: watch::Receiver<Option<Mood>>,
}

impl MoodReader {
    /// Current snapshot without waiting. `None` until something is published.
    pub fn latest(&self) -> Option<Mood> {
        *self.rx.borrow()
    }

    /// Wait for a publish this reader has not seen yet.
    ///
    /// Returns `None` once the publisher is gone and every snapshot has been
    /// observed.
    pub async fn read(&mut self) -> Option<Mood> {
        match self.rx.changed().await {
            Ok(()) => *self.rx.borrow_and_update(),
            Err(_) => None,
        }
    }

    /// Like [`read`](Self::read) but returns `None` instead of waiting.
    pub fn try_read(&mut self) -> Option<Mood> {
        if self.rx.has_changed().unwrap_or(false) {
            *self.rx.borrow_and_update()
        } else {
            None
        }
    }
}
