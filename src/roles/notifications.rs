use std::collections::VecDeque;

/// Messages a server keeps on screen.
pub const NOTIFICATION_CAPACITY: usize = 20;

/// Bounded message list; the oldest message is dropped when full.
#[derive(Debug, Clone)]
pub struct NotificationFeed {
    capacity: usize,
    messages: VecDeque<String>,
}

impl NotificationFeed {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            messages: VecDeque::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, message: String) {
        if self.messages.len() == self.capacity {
            self.messages.pop_front();
        }
        self.messages.push_back(message);
    }

    /// Oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.messages.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for NotificationFeed {
    fn default() -> Self {
        Self::new(NOTIFICATION_CAPACITY)
    }
}
