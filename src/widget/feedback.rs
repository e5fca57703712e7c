//! Auto-clearing feedback.
//!
//! Each message gets a timer task that, after its delay, posts an "elapsed"
//! message back into the widget's own mailbox, so the clear is serialized with
//! every other event. The timer holds only a weak sender: once the widget is gone
//! it has nobody to wake.
//!
//! Only the newest message is cleared. A new message aborts older timers that
//! would merely have cleared text; timers that also reset part of the UI keep
//! their own deadline and do only the reset. Every timer carries a ticket, so a
//! clear that was already in flight when it was aborted is recognised as stale.

use crate::collaborators::{FeedbackChannel, Stamp};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

pub type Ticket = u64;

/// What else resets when a message's delay runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfterClear {
    FeedbackOnly,
    /// Close the options menu and the upload prompt.
    CloseMenus,
    /// Close the link prompt, if it is still the one numbered `prompt`.
    CloseLinkPrompt { prompt: u64 },
}

struct Timer {
    ticket: Ticket,
    after: AfterClear,
    handle: JoinHandle<()>,
}

struct Showing {
    ticket: Ticket,
    stamp: Stamp,
    message: String,
}

pub struct FeedbackScheduler<M> {
    channel: Arc<dyn FeedbackChannel>,
    mailbox: mpsc::WeakSender<M>,
    elapsed: fn(Ticket) -> M,
    showing: Option<Showing>,
    last_ticket: Ticket,
    timers: Vec<Timer>,
}

impl<M: Send + 'static> FeedbackScheduler<M> {
    /// `elapsed` builds the mailbox message a timer posts when it fires.
    pub fn new(
        channel: Arc<dyn FeedbackChannel>,
        mailbox: mpsc::WeakSender<M>,
        elapsed: fn(Ticket) -> M,
    ) -> Self {
        Self {
            channel,
            mailbox,
            elapsed,
            showing: None,
            last_ticket: 0,
            timers: Vec::new(),
        }
    }

    /// The message this scheduler put up and has not cleared yet, `""` when
    /// none. The shared channel may show someone else's message meanwhile.
    pub fn showing(&self) -> &str {
        self.showing.as_ref().map_or("", |s| s.message.as_str())
    }

    /// Shows `message` and arms its clear after `delay`.
    pub fn announce(&mut self, message: &str, delay: Duration, after: AfterClear) -> Ticket {
        self.timers.retain(|timer| {
            if timer.after == AfterClear::FeedbackOnly {
                timer.handle.abort();
                false
            } else {
                true
            }
        });
        self.last_ticket += 1;
        let ticket = self.last_ticket;

        let stamp = self.channel.show(message);
        self.showing = Some(Showing {
            ticket,
            stamp,
            message: message.to_string(),
        });

        let mailbox = self.mailbox.clone();
        let elapsed = self.elapsed;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(sender) = mailbox.upgrade() {
                let _ = sender.send(elapsed(ticket)).await;
            }
        });
        debug!(ticket, message, delay_ms = delay.as_millis() as u64, "Feedback armed");
        self.timers.push(Timer {
            ticket,
            after,
            handle,
        });
        ticket
    }

    /// Handles a fired timer. Clears the message if `ticket` is still the one
    /// showing and returns the reset the caller should apply, or `None` for a
    /// stale ticket.
    pub fn on_elapsed(&mut self, ticket: Ticket) -> Option<AfterClear> {
        let Some(index) = self.timers.iter().position(|t| t.ticket == ticket) else {
            debug!(ticket, "Stale feedback timer");
            return None;
        };
        let timer = self.timers.remove(index);

        if self.showing.as_ref().is_some_and(|s| s.ticket == ticket) {
            if let Some(showing) = self.showing.take() {
                if !self.channel.clear(showing.stamp) {
                    debug!(ticket, "Feedback already replaced on the channel");
                }
            }
        }
        Some(timer.after)
    }

    /// Aborts every pending timer. The message stays as it is.
    pub fn cancel(&mut self) -> bool {
        let pending = !self.timers.is_empty();
        for timer in self.timers.drain(..) {
            timer.handle.abort();
        }
        pending
    }
}

impl<M> Drop for FeedbackScheduler<M> {
    fn drop(&mut self) {
        for timer in self.timers.drain(..) {
            timer.handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::FeedbackBoard;

    fn scheduler_on(
        board: &FeedbackBoard,
    ) -> (
        FeedbackScheduler<Ticket>,
        mpsc::Sender<Ticket>,
        mpsc::Receiver<Ticket>,
    ) {
        let (sender, receiver) = mpsc::channel(4);
        let scheduler =
            FeedbackScheduler::new(Arc::new(board.clone()), sender.downgrade(), |ticket| ticket);
        (scheduler, sender, receiver)
    }

    #[tokio::test(start_paused = true)]
    async fn clears_after_the_delay() {
        let board = FeedbackBoard::new();
        let (mut feedback, _sender, mut receiver) = scheduler_on(&board);

        let ticket = feedback.announce(
            "File uploaded",
            Duration::from_millis(200),
            AfterClear::CloseMenus,
        );
        assert_eq!(board.current(), "File uploaded");
        assert_eq!(feedback.showing(), "File uploaded");

        assert_eq!(receiver.recv().await, Some(ticket));
        assert_eq!(feedback.on_elapsed(ticket), Some(AfterClear::CloseMenus));
        assert_eq!(board.current(), "");
        assert_eq!(feedback.showing(), "");
        assert!(!feedback.cancel());
    }

    #[tokio::test(start_paused = true)]
    async fn a_new_message_supersedes_the_old_timer() {
        let board = FeedbackBoard::new();
        let (mut feedback, _sender, mut receiver) = scheduler_on(&board);

        let first = feedback.announce(
            "Resource deleted",
            Duration::from_millis(3000),
            AfterClear::FeedbackOnly,
        );
        let second = feedback.announce(
            "Link added",
            Duration::from_millis(200),
            AfterClear::CloseLinkPrompt { prompt: 1 },
        );
        assert_eq!(board.current(), "Link added");

        assert_eq!(feedback.on_elapsed(first), None);
        assert_eq!(board.current(), "Link added");

        assert_eq!(receiver.recv().await, Some(second));
        assert_eq!(
            feedback.on_elapsed(second),
            Some(AfterClear::CloseLinkPrompt { prompt: 1 })
        );

        // the aborted timer never fires
        let late = tokio::time::timeout(Duration::from_secs(10), receiver.recv()).await;
        assert!(late.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn a_replaced_reset_keeps_its_own_deadline() {
        let board = FeedbackBoard::new();
        let (mut feedback, _sender, mut receiver) = scheduler_on(&board);

        let uploaded = feedback.announce(
            "File uploaded",
            Duration::from_millis(200),
            AfterClear::CloseMenus,
        );
        let renamed = feedback.announce(
            "Resource renamed",
            Duration::from_millis(3000),
            AfterClear::FeedbackOnly,
        );

        assert_eq!(receiver.recv().await, Some(uploaded));
        assert_eq!(feedback.on_elapsed(uploaded), Some(AfterClear::CloseMenus));
        assert_eq!(board.current(), "Resource renamed");
        assert_eq!(feedback.showing(), "Resource renamed");

        assert_eq!(receiver.recv().await, Some(renamed));
        assert_eq!(feedback.on_elapsed(renamed), Some(AfterClear::FeedbackOnly));
        assert_eq!(board.current(), "");
    }

    #[tokio::test(start_paused = true)]
    async fn a_clear_spares_a_message_shown_by_another_scheduler() {
        let board = FeedbackBoard::new();
        let (mut first, _first_sender, mut first_timers) = scheduler_on(&board);
        let (mut second, _second_sender, _second_timers) = scheduler_on(&board);

        let uploaded = first.announce(
            "File uploaded",
            Duration::from_millis(200),
            AfterClear::CloseMenus,
        );
        second.announce(
            "Module renamed",
            Duration::from_millis(3000),
            AfterClear::FeedbackOnly,
        );

        assert_eq!(first_timers.recv().await, Some(uploaded));
        assert_eq!(first.on_elapsed(uploaded), Some(AfterClear::CloseMenus));
        assert_eq!(first.showing(), "");
        assert_eq!(second.showing(), "Module renamed");
        assert_eq!(board.current(), "Module renamed");
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_keeps_the_message_but_stops_the_clear() {
        let board = FeedbackBoard::new();
        let (mut feedback, _sender, mut receiver) = scheduler_on(&board);

        feedback.announce("Module renamed", Duration::from_millis(3000), AfterClear::FeedbackOnly);
        assert!(feedback.cancel());
        assert!(!feedback.cancel());

        let fired = tokio::time::timeout(Duration::from_secs(10), receiver.recv()).await;
        assert!(fired.is_err());
        assert_eq!(board.current(), "Module renamed");
    }

    #[tokio::test(start_paused = true)]
    async fn timers_do_not_outlive_the_mailbox() {
        let board = FeedbackBoard::new();
        let (mut feedback, sender, receiver) = scheduler_on(&board);
        feedback.announce("File downloaded", Duration::from_millis(3000), AfterClear::FeedbackOnly);
        drop(sender);
        drop(receiver);

        tokio::time::sleep(Duration::from_millis(3001)).await;
        assert_eq!(board.current(), "File downloaded");
    }
}
