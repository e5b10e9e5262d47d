//! Publish/subscribe bus for toast-style notices.
//!
//! Producers publish through a [`Notifier`] they hold a reference to;
//! consumers subscribe and receive notices on their own channel.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A short message meant for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

/// Registry of notice subscribers.
#[derive(Debug, Default)]
pub struct Notifier {
    subscribers: Vec<UnboundedSender<Notice>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new subscriber. Dropping the receiver unsubscribes.
    pub fn subscribe(&mut self) -> UnboundedReceiver<Notice> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    /// Sends a notice to every live subscriber and returns how many got it.
    pub fn publish(&mut self, notice: Notice) -> usize {
        tracing::debug!(level = ?notice.level, text = %notice.text, "Publishing notice");
        self.subscribers.retain(|tx| tx.send(notice.clone()).is_ok());
        self.subscribers.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

/// Shows notices from one subscription, one at a time, each for a fixed time.
#[derive(Debug)]
pub struct ToastBoard {
    rx: UnboundedReceiver<Notice>,
    queue: VecDeque<Notice>,
    current: Option<(Notice, Instant)>,
    duration: Duration,
}

impl ToastBoard {
    pub fn new(rx: UnboundedReceiver<Notice>, duration: Duration) -> Self {
        Self {
            rx,
            queue: VecDeque::new(),
            current: None,
            duration,
        }
    }

    /// Pulls pending notices and expires the visible one.
    pub fn tick(&mut self, now: Instant) {
        loop {
            match self.rx.try_recv() {
                Ok(notice) => self.queue.push_back(notice),
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }

        if let Some((_, shown_at)) = &self.current {
            if now.saturating_duration_since(*shown_at) >= self.duration {
                self.current = None;
            }
        }

        if self.current.is_none() {
            self.current = self.queue.pop_front().map(|notice| (notice, now));
        }
    }

    /// The notice currently on screen.
    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref().map(|(notice, _)| notice)
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_reaches_all_subscribers() {
        let mut notifier = Notifier::new();
        let mut a = notifier.subscribe();
        let mut b = notifier.subscribe();

        let delivered = notifier.publish(Notice::new(NoticeLevel::Info, "hello"));

        assert_eq!(delivered, 2);
        assert_eq!(a.try_recv().unwrap().text, "hello");
        assert_eq!(b.try_recv().unwrap().text, "hello");
    }

    #[test]
    fn test_dropped_subscriber_is_pruned() {
        let mut notifier = Notifier::new();
        let _kept = notifier.subscribe();
        drop(notifier.subscribe());

        assert_eq!(notifier.publish(Notice::new(NoticeLevel::Info, "x")), 1);
        assert_eq!(notifier.subscriber_count(), 1);
    }

    #[test]
    fn test_publish_without_subscribers() {
        let mut notifier = Notifier::new();
        assert_eq!(notifier.publish(Notice::new(NoticeLevel::Error, "lost")), 0);
    }

    #[test]
    fn test_toast_board_shows_in_order_and_expires() {
        let mut notifier = Notifier::new();
        let mut board = ToastBoard::new(notifier.subscribe(), Duration::from_secs(4));
        let start = Instant::now();

        notifier.publish(Notice::new(NoticeLevel::Success, "first"));
        notifier.publish(Notice::new(NoticeLevel::Warning, "second"));

        board.tick(start);
        assert_eq!(board.current().map(|n| n.text.as_str()), Some("first"));

        board.tick(start + Duration::from_secs(1));
        assert_eq!(board.current().map(|n| n.text.as_str()), Some("first"));

        board.tick(start + Duration::from_secs(4));
        assert_eq!(board.current().map(|n| n.text.as_str()), Some("second"));

        board.tick(start + Duration::from_secs(9));
        assert_eq!(board.current(), None);
    }

    #[test]
    fn test_toast_dismiss() {
        let mut notifier = Notifier::new();
        let mut board = ToastBoard::new(notifier.subscribe(), Duration::from_secs(4));
        notifier.publish(Notice::new(NoticeLevel::Error, "oops"));

        let now = Instant::now();
        board.tick(now);
        assert!(board.current().is_some_and(Notice::is_error));
        board.dismiss();
        assert_eq!(board.current(), None);
    }
}
