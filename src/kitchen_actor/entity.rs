//! ActorEntity implementation for the [`Kitchen`].
//!
//! The kitchen publishes two kinds of events while handling actions:
//! - `NextDishReady` whenever the queue head changes (see [`Kitchen::enqueue`] and
//!   `DequeueNext`/`StartNext`);
//! - `RestockNeeded` for every withdrawal that leaves an ingredient at or below its
//!   threshold.

use super::actions::{KitchenAction, KitchenActionResult};
use super::error::KitchenError;
use crate::events::{EventBus, RestaurantEvent};
use crate::framework::ActorEntity;
use crate::model::{CookAttempt, DishTicket, Kitchen, KitchenCreate, KitchenId, KitchenUpdate, RestockNotice};
use async_trait::async_trait;
use tracing::{debug, info};

impl Kitchen {
    fn announce_head(&self, bus: &EventBus) {
        bus.publish(RestaurantEvent::NextDishReady {
            label: self.head_label(),
        });
    }

    fn announce_restock(notices: Vec<RestockNotice>, bus: &EventBus) {
        for notice in notices {
            info!(ingredient = %notice.ingredient.name, amount = notice.ingredient.amount(), "Restock needed");
            bus.publish(RestaurantEvent::RestockNeeded {
                ingredient: notice.ingredient,
                threshold: notice.threshold,
            });
        }
    }

    fn pull(&mut self, bus: &EventBus) -> Option<DishTicket> {
        let ticket = self.dequeue_next();
        self.announce_head(bus);
        ticket
    }
}

#[async_trait]
impl ActorEntity for Kitchen {
    type Id = KitchenId;
    type Create = KitchenCreate;
    type Update = KitchenUpdate;
    type Action = KitchenAction;
    type ActionResult = KitchenActionResult;
    type Context = EventBus;
    type Error = KitchenError;

    fn assign_id(seq: u32, _params: &KitchenCreate) -> KitchenId {
        KitchenId(seq)
    }

    fn from_create_params(id: KitchenId, params: KitchenCreate) -> Result<Self, KitchenError> {
        Ok(Kitchen::new(id, params.inventory))
    }

    /// Applies a shipment to the inventory.
    async fn on_update(&mut self, update: KitchenUpdate, _bus: &EventBus) -> Result<(), KitchenError> {
        match update {
            KitchenUpdate::Shipment(ingredient) => {
                debug!(%ingredient, "Shipment received");
                self.inventory.receive_shipment(&ingredient);
            }
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: KitchenAction,
        bus: &EventBus,
    ) -> Result<KitchenActionResult, KitchenError> {
        let result = match action {
            KitchenAction::Enqueue(tickets) => {
                if self.enqueue(tickets) {
                    self.announce_head(bus);
                }
                KitchenActionResult::Enqueue(())
            }
            KitchenAction::DequeueNext => KitchenActionResult::DequeueNext(self.pull(bus)),
            KitchenAction::SufficientFor(requirements) => {
                KitchenActionResult::SufficientFor(self.inventory.sufficient_for(&requirements))
            }
            KitchenAction::Reserve(requirements) => {
                let notices = self.inventory.reserve(&requirements);
                Self::announce_restock(notices, bus);
                KitchenActionResult::Reserve(())
            }
            KitchenAction::TryReserve(requirements) => {
                let reserved = match self.inventory.try_reserve(&requirements) {
                    Some(notices) => {
                        Self::announce_restock(notices, bus);
                        true
                    }
                    None => false,
                };
                KitchenActionResult::TryReserve(reserved)
            }
            KitchenAction::StartNext => {
                let attempt = self.pull(bus).map(|ticket| {
                    match self.inventory.try_reserve(&ticket.requirements) {
                        Some(notices) => {
                            Self::announce_restock(notices, bus);
                            self.move_to_in_progress(ticket.clone());
                            CookAttempt::Started(ticket)
                        }
                        None => CookAttempt::Rejected(ticket),
                    }
                });
                KitchenActionResult::StartNext(attempt)
            }
            KitchenAction::MoveToInProgress(ticket) => {
                self.move_to_in_progress(ticket);
                KitchenActionResult::MoveToInProgress(())
            }
            KitchenAction::MoveToDeliverable(key) => {
                KitchenActionResult::MoveToDeliverable(self.move_to_deliverable(key))
            }
            KitchenAction::MarkDelivered(key) => {
                KitchenActionResult::MarkDelivered(self.mark_delivered(key))
            }
            KitchenAction::Discard(key) => KitchenActionResult::Discard(self.discard(key)),
            KitchenAction::InventorySnapshot => {
                KitchenActionResult::InventorySnapshot(self.inventory.to_string())
            }
            KitchenAction::WorkInProgress => {
                KitchenActionResult::WorkInProgress(self.work_in_progress())
            }
            KitchenAction::Stock(name) => KitchenActionResult::Stock(self.inventory.stock(&name)),
        };
        Ok(result)
    }
}
