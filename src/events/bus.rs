use super::{Audience, RestaurantEvent};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;
use tracing::{debug, trace};

#[derive(Debug)]
struct Subscriber {
    audience: Audience,
    sender: mpsc::UnboundedSender<RestaurantEvent>,
}

/// Routes every [`RestaurantEvent`] to the subscribers whose [`Audience`] accepts it.
///
/// Each subscriber owns an unbounded channel, so a slow reader never loses an event and
/// events of other audiences never count against it. Publishing and subscribing share
/// one lock: every subscriber sees its events in the order they were published.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    subscribers: Arc<Mutex<Vec<Subscriber>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delivers to current subscribers. Subscribers whose receiving half is gone are
    /// pruned.
    pub fn publish(&self, event: RestaurantEvent) {
        let Ok(mut subscribers) = self.subscribers.lock() else {
            debug!(?event, "Bus lock poisoned; event dropped");
            return;
        };
        let mut delivered = 0;
        subscribers.retain(|s| {
            if !s.audience.accepts(&event) {
                return !s.sender.is_closed();
            }
            let sent = s.sender.send(event.clone()).is_ok();
            delivered += usize::from(sent);
            sent
        });
        if delivered == 0 {
            trace!(?event, "No subscribers");
        }
    }

    /// Subscribes from this point on. Earlier events are not replayed.
    pub fn subscribe(&self, audience: Audience) -> Subscription {
        let (sender, receiver) = mpsc::unbounded_channel();
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.push(Subscriber {
                audience: audience.clone(),
                sender,
            });
        }
        Subscription { audience, receiver }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .map(|s| s.iter().filter(|s| !s.sender.is_closed()).count())
            .unwrap_or_default()
    }
}

/// Receiving half for one [`Audience`]. Only accepted events ever arrive here.
#[derive(Debug)]
pub struct Subscription {
    audience: Audience,
    receiver: mpsc::UnboundedReceiver<RestaurantEvent>,
}

impl Subscription {
    pub fn audience(&self) -> &Audience {
        &self.audience
    }

    /// Takes everything already delivered, without waiting.
    pub fn drain(&mut self) -> Vec<RestaurantEvent> {
        let mut events = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
        events
    }

    /// Waits for the next event. `None` once every bus handle is gone.
    pub async fn recv(&mut self) -> Option<RestaurantEvent> {
        self.receiver.recv().await
    }
}
