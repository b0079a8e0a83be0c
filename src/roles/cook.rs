use super::{Employee, Role, RoleError};
use crate::clients::{KitchenClient, TableClient};
use crate::events::{RestaurantEvent, Subscription};
use crate::journal::Logbook;
use crate::model::{CookAttempt, DishStatus, DishTicket};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, instrument, warn};

/// Pulls dishes off the production queue and cooks them, one at a time.
pub struct Cook {
    name: String,
    kitchen: KitchenClient,
    tables: TableClient,
    logbook: Logbook,
    feed: Subscription,
    /// The dish being cooked. `Some` means busy.
    current: Option<DishTicket>,
    next_label: String,
}

impl Cook {
    pub fn new(
        name: impl Into<String>,
        kitchen: KitchenClient,
        tables: TableClient,
        logbook: Logbook,
        feed: Subscription,
    ) -> Self {
        Self {
            name: name.into(),
            kitchen,
            tables,
            logbook,
            feed,
            current: None,
            next_label: String::new(),
        }
    }

    pub fn current_dish(&self) -> Option<&DishTicket> {
        self.current.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.current.is_some()
    }

    /// Takes the queue head and either starts it or cancels it.
    ///
    /// Does nothing while a dish is in progress. Returns the status the pulled dish
    /// moved to (`Seen` or `Cancelled`), or `None` if nothing was pulled.
    #[instrument(skip(self), fields(cook = %self.name))]
    pub async fn mark_seen_and_parse(&mut self) -> Result<Option<DishStatus>, RoleError> {
        if self.is_busy() {
            debug!("Still cooking");
            return Ok(None);
        }
        let Some(attempt) = self.kitchen.start_next().await? else {
            return Ok(None);
        };
        match attempt {
            CookAttempt::Started(ticket) => {
                let status = self
                    .tables
                    .transition(ticket.key, DishStatus::Ordered, true)
                    .await?;
                if status.is_none() {
                    warn!(key = %ticket.key, "Dish left its order before cooking; dropping it");
                    self.kitchen.discard(ticket.key).await?;
                    return Ok(None);
                }
                self.logbook.record(&self.name, "has seen", &ticket);
                self.current = Some(ticket);
                Ok(status)
            }
            CookAttempt::Rejected(ticket) => {
                let status = self
                    .tables
                    .transition(ticket.key, DishStatus::Ordered, false)
                    .await?;
                self.logbook.record(&self.name, "has seen", &ticket);
                Ok(status)
            }
        }
    }

    /// Finishes the current dish. No-op unless it is SEEN.
    #[instrument(skip(self), fields(cook = %self.name))]
    pub async fn complete_dish(&mut self) -> Result<bool, RoleError> {
        let Some(ticket) = self.current.as_ref() else {
            return Ok(false);
        };
        let key = ticket.key;
        let status = self.tables.transition(key, DishStatus::Seen, true).await?;
        if status != Some(DishStatus::Ready) {
            return Ok(false);
        }
        self.kitchen.move_to_deliverable(key).await?;
        self.logbook.record(&self.name, "has finished cooking", ticket);
        self.current = None;
        Ok(true)
    }

    fn absorb_feed(&mut self) {
        for event in self.feed.drain() {
            if let RestaurantEvent::NextDishReady { label } = event {
                self.next_label = label;
            }
        }
    }

    /// Label of the dish at the head of the queue, empty if none.
    pub fn next_dish_label(&mut self) -> String {
        self.absorb_feed();
        self.next_label.clone()
    }

    /// Waits until a dish is queued, up to `timeout`. Returns its label.
    pub async fn await_next_dish(&mut self, timeout: Duration) -> Option<String> {
        self.absorb_feed();
        let deadline = Instant::now() + timeout;
        while self.next_label.is_empty() {
            match tokio::time::timeout_at(deadline, self.feed.recv()).await {
                Ok(Some(RestaurantEvent::NextDishReady { label })) => self.next_label = label,
                Ok(Some(_)) => {}
                Ok(None) | Err(_) => return None,
            }
        }
        Some(self.next_label.clone())
    }
}

impl Employee for Cook {
    fn name(&self) -> &str {
        &self.name
    }

    fn role(&self) -> Role {
        Role::Cook
    }

    fn kitchen(&self) -> &KitchenClient {
        &self.kitchen
    }

    fn logbook(&self) -> &Logbook {
        &self.logbook
    }
}
