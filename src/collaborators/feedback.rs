//! The transient status line.
//!
//! Not a queue: a new message overwrites whatever is showing. Every showing gets
//! a [`Stamp`], and whoever set a message clears it with that stamp after its own
//! delay. A clear whose stamp is no longer showing does nothing, so one widget
//! never blanks a message another widget put up since.

use std::sync::Arc;
use tokio::sync::watch;

/// Identifies one showing of a message on a [`FeedbackChannel`].
pub type Stamp = u64;

pub trait FeedbackChannel: Send + Sync {
    /// Shows `message` and returns the stamp of this showing.
    fn show(&self, message: &str) -> Stamp;

    /// Blanks the line if `stamp` is still the showing on it. Returns whether it did.
    fn clear(&self, stamp: Stamp) -> bool;
}

/// What a [`FeedbackBoard`] currently displays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackLine {
    pub stamp: Stamp,
    pub message: String,
}

/// A [`FeedbackChannel`] backed by a `watch` channel, so any number of views can
/// observe the current message.
#[derive(Debug, Clone)]
pub struct FeedbackBoard {
    sender: Arc<watch::Sender<FeedbackLine>>,
}

impl FeedbackBoard {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(FeedbackLine::default());
        Self {
            sender: Arc::new(sender),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<FeedbackLine> {
        self.sender.subscribe()
    }

    pub fn current(&self) -> String {
        self.sender.borrow().message.clone()
    }
}

impl Default for FeedbackBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedbackChannel for FeedbackBoard {
    fn show(&self, message: &str) -> Stamp {
        let mut stamp = 0;
        self.sender.send_modify(|line| {
            line.stamp += 1;
            line.message = message.to_string();
            stamp = line.stamp;
        });
        stamp
    }

    fn clear(&self, stamp: Stamp) -> bool {
        self.sender.send_if_modified(|line| {
            if line.stamp != stamp || line.message.is_empty() {
                return false;
            }
            line.message.clear();
            true
        })
    }
}
