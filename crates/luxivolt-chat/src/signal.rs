//! Page-wide signals.
//!
//! Other page elements ask the chat widget to open by publishing
//! [`PageSignal::OpenChat`] on a [`SignalBus`] instead of holding a reference
//! to the widget. Any number of subscribers may listen.

use tokio::sync::broadcast;
use tracing::debug;

/// Buffered signals per subscriber before the oldest are dropped.
const SIGNAL_CAPACITY: usize = 16;

/// Signals broadcast across the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSignal {
    /// Request the chat widget to open.
    OpenChat,
}

/// Broadcast channel for [`PageSignal`]s.
///
/// Cloning the bus yields another publisher on the same channel.
#[derive(Debug, Clone)]
pub struct SignalBus {
    tx: broadcast::Sender<PageSignal>,
}

impl Default for SignalBus {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalBus {
    /// Create a new bus with no subscribers.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(SIGNAL_CAPACITY);
        Self { tx }
    }

    /// Broadcast a signal to every current subscriber.
    ///
    /// Returns the number of subscribers that received it (zero is not an error).
    pub fn publish(&self, signal: PageSignal) -> usize {
        let delivered = self.tx.send(signal).unwrap_or(0);
        debug!(?signal, delivered, "Published page signal");
        delivered
    }

    /// Subscribe to signals published from now on.
    pub fn subscribe(&self) -> SignalSubscription {
        SignalSubscription {
            rx: self.tx.subscribe(),
        }
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// Receiving end of a [`SignalBus`].
#[derive(Debug)]
pub struct SignalSubscription {
    rx: broadcast::Receiver<PageSignal>,
}

impl SignalSubscription {
    /// Take every signal received since the last call, without waiting.
    ///
    /// Signals lost to lag are skipped; only the ones still buffered are returned.
    pub fn drain(&mut self) -> Vec<PageSignal> {
        let mut signals = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(signal) => signals.push(signal),
                Err(broadcast::error::TryRecvError::Lagged(_)) => {}
                Err(
                    broadcast::error::TryRecvError::Empty | broadcast::error::TryRecvError::Closed,
                ) => break,
            }
        }
        signals
    }
}
