//! Delivery of "active card changed" to whoever owns application state.
//!
//! The controller runs on the gesture/animation timeline; the host applies
//! selections on its own turn by draining the channel.

use tokio::sync::mpsc;

/// Emitted once per resolved snap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionChanged {
    pub index: usize,
}

/// Somewhere a selection can be delivered to.
pub trait SelectionSink: Send {
    fn deliver(&mut self, event: SelectionChanged);
}

impl SelectionSink for mpsc::UnboundedSender<SelectionChanged> {
    fn deliver(&mut self, event: SelectionChanged) {
        if self.send(event).is_err() {
            tracing::debug!(index = event.index, "selection receiver dropped");
        }
    }
}

/// Owns the sink and remembers the last index it announced.
pub struct SelectionNotifier {
    sink: Box<dyn SelectionSink>,
    last: Option<usize>,
}

impl SelectionNotifier {
    pub fn new(sink: impl SelectionSink + 'static) -> Self {
        Self {
            sink: Box::new(sink),
            last: None,
        }
    }

    /// Notifier backed by a fresh unbounded channel.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<SelectionChanged>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    /// Announce `index`.  Repeats are delivered too; receivers treat them as no-ops.
    pub fn notify(&mut self, index: usize) {
        self.last = Some(index);
        self.sink.deliver(SelectionChanged { index });
    }

    pub fn last_notified(&self) -> Option<usize> {
        self.last
    }
}

impl std::fmt::Debug for SelectionNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionNotifier")
            .field("last", &self.last)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delivers_through_channel_in_order() {
        let (mut notifier, mut rx) = SelectionNotifier::channel();
        notifier.notify(2);
        notifier.notify(3);

        assert_eq!(rx.try_recv().ok(), Some(SelectionChanged { index: 2 }));
        assert_eq!(rx.try_recv().ok(), Some(SelectionChanged { index: 3 }));
        assert!(rx.try_recv().is_err());
        assert_eq!(notifier.last_notified(), Some(3));
    }

    #[test]
    fn dropped_receiver_is_not_fatal() {
        let (mut notifier, rx) = SelectionNotifier::channel();
        drop(rx);
        notifier.notify(1);
        assert_eq!(notifier.last_notified(), Some(1));
    }
}
