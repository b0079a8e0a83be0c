use super::{Employee, Role, RoleError};
use crate::clients::KitchenClient;
use crate::events::{RestaurantEvent, Subscription};
use crate::journal::Logbook;
use tracing::instrument;

/// Watches stock and files restock requests.
pub struct Manager {
    name: String,
    kitchen: KitchenClient,
    logbook: Logbook,
    feed: Subscription,
}

impl Manager {
    pub fn new(
        name: impl Into<String>,
        kitchen: KitchenClient,
        logbook: Logbook,
        feed: Subscription,
    ) -> Self {
        Self {
            name: name.into(),
            kitchen,
            logbook,
            feed,
        }
    }

    /// Inventory printout.
    #[instrument(skip(self), fields(manager = %self.name))]
    pub async fn check_inventory(&self) -> Result<String, RoleError> {
        self.logbook
            .record(&self.name, "requests", "an inventory printout.");
        Ok(self.kitchen.inventory_snapshot().await?)
    }

    /// Every dish still in the kitchen: queued, awaiting delivery, cooking.
    pub async fn orders_in_progress(&self) -> Result<String, RoleError> {
        Ok(self.kitchen.work_in_progress().await?)
    }

    /// Files one restock request per restock event received so far. Returns the
    /// ingredient names, in arrival order.
    #[instrument(skip(self), fields(manager = %self.name))]
    pub fn process_restock_requests(&mut self) -> Vec<String> {
        let mut requested = Vec::new();
        for event in self.feed.drain() {
            if let RestaurantEvent::RestockNeeded { ingredient, .. } = event {
                self.logbook
                    .record(&self.name, "added a request for", &ingredient.name);
                self.logbook.journal().restock_request(&ingredient.name);
                requested.push(ingredient.name);
            }
        }
        requested
    }
}

impl Employee for Manager {
    fn name(&self) -> &str {
        &self.name
    }

    fn role(&self) -> Role {
        Role::Manager
    }

    fn kitchen(&self) -> &KitchenClient {
        &self.kitchen
    }

    fn logbook(&self) -> &Logbook {
        &self.logbook
    }
}
